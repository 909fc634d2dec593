//! RGB/HSL conversion and linear color blending.
//!
//! Colors are plain `Vec4`s. Channels are nominally in `[0, 1]` but nothing
//! here clamps them, so out-of-range inputs extrapolate.

use glam::Vec4;

/// Converts RGB(A) to HSL. Alpha of the result is always 1.0.
///
/// The max/min channel is picked with a fixed tie-break: red only wins when
/// strictly greater than both others, otherwise green wins over blue when
/// strictly greater, otherwise blue.
pub fn rgb_to_hsl(color: Vec4) -> Vec4 {
    let (r, g, b) = (color.x, color.y, color.z);

    let red_max = r > g && r > b;
    let max = if red_max {
        r
    } else if g > b {
        g
    } else {
        b
    };
    let min = if r < g && r < b {
        r
    } else if g < b {
        g
    } else {
        b
    };

    let l = (max + min) / 2.0;
    if max == min {
        return Vec4::new(0.0, 0.0, l, 1.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if red_max {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if g > b {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Vec4::new(h / 6.0, s, l, 1.0)
}

/// Converts HSL(A) back to RGB. Alpha of the result is always 1.0.
pub fn hsl_to_rgb(color: Vec4) -> Vec4 {
    let (h, s, l) = (color.x, color.y, color.z);

    if s == 0.0 {
        return Vec4::new(l, l, l, 1.0);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec4::new(
        hsl_helper(p, q, h + 1.0 / 3.0),
        hsl_helper(p, q, h),
        hsl_helper(p, q, h - 1.0 / 3.0),
        1.0,
    )
}

/// Piecewise hue-to-channel ramp between the two pivots `p` and `q`.
///
/// `t` is wrapped by at most one unit in each direction, so it must already
/// lie in `[-1, 2)`.
pub fn hsl_helper(p: f32, q: f32, t: f32) -> f32 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Blends two RGB colors through HSL space.
///
/// Avoids the grey midpoint a straight RGB blend passes through. `ratio` is
/// not clamped.
pub fn interpolate_linear_hsl(c1: Vec4, c2: Vec4, ratio: f32) -> Vec4 {
    let a = rgb_to_hsl(c1);
    let b = rgb_to_hsl(c2);
    hsl_to_rgb(blend(a, b, ratio))
}

/// Blends two colors channel by channel in whatever space they are in.
pub fn interpolate_linear_rgb(c1: Vec4, c2: Vec4, ratio: f32) -> Vec4 {
    blend(c1, c2, ratio)
}

// `c1 * (1 - ratio) + c2 * ratio` keeps both endpoints exact, which
// `Vec4::lerp` does not guarantee at ratio 1.
fn blend(c1: Vec4, c2: Vec4, ratio: f32) -> Vec4 {
    c1 * (1.0 - ratio) + c2 * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_rgb_close(a: Vec4, b: Vec4) {
        assert!(
            (a.truncate() - b.truncate()).abs().max_element() < EPS,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn primary_red_converts_to_zero_hue() {
        let hsl = rgb_to_hsl(Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_rgb_close(hsl, Vec4::new(0.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn achromatic_input_has_no_hue_or_saturation() {
        let hsl = rgb_to_hsl(Vec4::new(0.4, 0.4, 0.4, 0.3));
        assert_eq!(hsl, Vec4::new(0.0, 0.0, 0.4, 1.0));

        let rgb = hsl_to_rgb(Vec4::new(0.7, 0.0, 0.25, 1.0));
        assert_eq!(rgb, Vec4::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn red_green_tie_resolves_max_to_green() {
        // r == g, so red is not strictly greatest and green takes the max slot.
        let hsl = rgb_to_hsl(Vec4::new(1.0, 1.0, 0.0, 1.0));
        // Green branch: (b - r) / d + 2 = 1, divided by 6.
        assert!((hsl.x - 1.0 / 6.0).abs() < EPS);
        assert!((hsl.y - 1.0).abs() < EPS);
        assert!((hsl.z - 0.5).abs() < EPS);
    }

    #[test]
    fn green_blue_tie_resolves_max_to_blue() {
        let hsl = rgb_to_hsl(Vec4::new(0.0, 1.0, 1.0, 1.0));
        // Blue branch: (r - g) / d + 4 = 3, divided by 6.
        assert!((hsl.x - 0.5).abs() < EPS);
    }

    #[test]
    fn red_max_with_blue_above_green_wraps_hue() {
        let hsl = rgb_to_hsl(Vec4::new(1.0, 0.0, 0.5, 1.0));
        // (0 - 0.5) / 1 + 6 = 5.5
        assert!((hsl.x - 5.5 / 6.0).abs() < EPS);
    }

    #[test]
    fn sky_and_night_colors_round_trip() {
        for rgb in [
            Vec4::new(0.45, 0.8, 1.0, 1.0),
            Vec4::new(0.08, 0.05, 0.25, 1.0),
            Vec4::new(0.9, 0.2, 0.3, 1.0),
        ] {
            assert_rgb_close(hsl_to_rgb(rgb_to_hsl(rgb)), rgb);
        }
    }

    #[test]
    fn hsl_round_trip_for_saturated_colors() {
        for &(h, s, l) in &[(0.1, 0.5, 0.3), (0.55, 0.9, 0.6), (0.8, 0.3, 0.45)] {
            let hsl = Vec4::new(h, s, l, 1.0);
            assert_rgb_close(rgb_to_hsl(hsl_to_rgb(hsl)), hsl);
        }
    }

    #[test]
    fn helper_wraps_only_once() {
        // t = -0.25 wraps to 0.75 and lands on the flat `p` segment.
        assert_eq!(hsl_helper(0.2, 0.8, -0.25), 0.2);
        // t = 1.1 wraps to ~0.1, the rising segment.
        let v = hsl_helper(0.0, 1.0, 1.1);
        assert!((v - 0.6).abs() < 1e-4);
        // t = 2.5 is outside the documented range: a single wrap leaves 1.5.
        assert_eq!(hsl_helper(0.2, 0.8, 2.5), 0.2);
    }

    #[test]
    fn helper_segments() {
        let (p, q) = (0.2, 0.8);
        assert!((hsl_helper(p, q, 0.1) - (p + (q - p) * 0.6)).abs() < EPS);
        assert_eq!(hsl_helper(p, q, 0.3), q);
        assert!((hsl_helper(p, q, 0.6) - (p + (q - p) * (2.0 / 3.0 - 0.6) * 6.0)).abs() < EPS);
        assert_eq!(hsl_helper(p, q, 0.9), p);
    }

    #[test]
    fn hsl_blend_of_a_color_with_itself_is_identity() {
        let sky = Vec4::new(0.45, 0.8, 1.0, 1.0);
        for ratio in [0.0, 0.25, 0.5, 1.0, 1.7] {
            assert_rgb_close(interpolate_linear_hsl(sky, sky, ratio), sky);
        }
    }

    #[test]
    fn rgb_blend_hits_endpoints_exactly() {
        let c1 = Vec4::new(0.352, 0.352, 0.452, 1.0);
        let c2 = Vec4::new(0.752, 0.752, 0.752, 0.5);
        assert_eq!(interpolate_linear_rgb(c1, c2, 0.0), c1);
        assert_eq!(interpolate_linear_rgb(c1, c2, 1.0), c2);
    }

    #[test]
    fn ratio_outside_unit_range_extrapolates() {
        let c = interpolate_linear_rgb(Vec4::ZERO, Vec4::ONE, 1.5);
        assert_eq!(c, Vec4::splat(1.5));
    }
}
