//! Sun/moon position on a semicircular arc and the matching specular falloff.

use glam::Vec3;

use super::Direction;

/// Radius of the light's arc; also the horizontal travel limit.
pub const ARC_RADIUS: f32 = 90.0;
pub const BASE_SHININESS: f32 = 10.0;
/// Shininess forced when the light re-enters at the far horizon.
pub const HORIZON_SHININESS: f32 = 70.0;
pub const START_LIGHT_X: f32 = -60.0;

const SHININESS_STEP: f32 = 2.0;
const HORIZON_SNAP: f32 = -89.0;
// Open intervals, in the mirrored coordinate (see `LightOrbit::advance`).
const RISING_BAND: (f32, f32) = (-92.0, -60.0);
const SETTING_BAND: (f32, f32) = (60.0, 92.0);

/// Height of the point at horizontal offset `x` on a circle of `radius`.
///
/// NaN when `|x| > radius`.
pub fn arc_height(x: f32, radius: f32) -> f32 {
    (radius * radius - x * x).sqrt().abs()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightOrbit {
    light_pos_x: f32,
    direction_light: Vec3,
    shininess: f32,
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self::new(START_LIGHT_X)
    }
}

impl LightOrbit {
    pub fn new(light_pos_x: f32) -> Self {
        Self {
            light_pos_x,
            direction_light: light_vector(light_pos_x),
            shininess: BASE_SHININESS,
        }
    }

    pub fn light_pos_x(&self) -> f32 {
        self.light_pos_x
    }

    pub fn direction_light(&self) -> Vec3 {
        self.direction_light
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Moves the light one step along the arc.
    ///
    /// The position jumps to the opposite end once it has passed either
    /// horizon, and the uploaded direction is taken *before* the step.
    /// Shininess follows the stepped position, mirrored for reverse travel so
    /// both directions share one rule.
    pub fn advance(&mut self, direction: Direction) {
        if self.light_pos_x < -ARC_RADIUS {
            self.light_pos_x = ARC_RADIUS;
        }
        if self.light_pos_x > ARC_RADIUS {
            self.light_pos_x = -ARC_RADIUS;
        }
        self.direction_light = light_vector(self.light_pos_x);

        let sign = direction.sign();
        if sign == 0 {
            return;
        }
        self.light_pos_x += sign as f32;

        let mirrored = self.light_pos_x * sign as f32;
        if mirrored <= HORIZON_SNAP {
            self.shininess = HORIZON_SHININESS;
        }

        if within(mirrored, RISING_BAND) {
            self.shininess -= SHININESS_STEP;
        } else if within(mirrored, SETTING_BAND) {
            self.shininess += SHININESS_STEP;
        } else {
            self.shininess = BASE_SHININESS;
        }
    }
}

fn light_vector(x: f32) -> Vec3 {
    Vec3::new(x, arc_height(x, ARC_RADIUS), 1.0)
}

fn within(value: f32, (low, high): (f32, f32)) -> bool {
    value > low && value < high
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit_at(light_pos_x: f32, shininess: f32) -> LightOrbit {
        LightOrbit {
            light_pos_x,
            direction_light: light_vector(light_pos_x),
            shininess,
        }
    }

    #[test]
    fn arc_height_at_center_and_ends() {
        assert_eq!(arc_height(0.0, 90.0), 90.0);
        assert_eq!(arc_height(90.0, 90.0), 0.0);
        assert_eq!(arc_height(-90.0, 90.0), 0.0);
    }

    #[test]
    fn arc_height_outside_radius_is_nan() {
        assert!(arc_height(91.0, 90.0).is_nan());
    }

    #[test]
    fn initial_light_sits_on_the_arc() {
        let orbit = LightOrbit::default();
        assert_eq!(orbit.light_pos_x(), -60.0);
        assert_eq!(orbit.shininess(), BASE_SHININESS);
        let expected = (90.0f32 * 90.0 - 60.0 * 60.0).sqrt();
        assert_eq!(orbit.direction_light(), Vec3::new(-60.0, expected, 1.0));
    }

    #[test]
    fn direction_is_computed_before_the_step() {
        let mut orbit = LightOrbit::default();
        orbit.advance(Direction::Forward);
        assert_eq!(orbit.light_pos_x(), -59.0);
        assert_eq!(orbit.direction_light().x, -60.0);
    }

    #[test]
    fn forward_from_start_reaches_horizon_shininess_at_ninety() {
        let mut orbit = LightOrbit::default();
        while orbit.light_pos_x() < 89.0 {
            orbit.advance(Direction::Forward);
        }
        assert_eq!(orbit.light_pos_x(), 89.0);
        assert_eq!(orbit.shininess(), 68.0);

        orbit.advance(Direction::Forward);
        assert_eq!(orbit.light_pos_x(), 90.0);
        assert_eq!(orbit.shininess(), 70.0);
    }

    #[test]
    fn overshoot_jumps_to_the_opposite_horizon() {
        let mut orbit = orbit_at(91.0, 72.0);
        orbit.advance(Direction::Forward);
        // Wrapped to -90 before the step, so the uploaded vector is at -90.
        assert_eq!(orbit.direction_light(), Vec3::new(-90.0, 0.0, 1.0));
        assert_eq!(orbit.light_pos_x(), -89.0);
        // Snapped to 70 at -89, then ramped down inside the rising band.
        assert_eq!(orbit.shininess(), 68.0);
    }

    #[test]
    fn forward_rising_band_ramps_down_then_resets() {
        let mut orbit = orbit_at(-62.0, 20.0);
        orbit.advance(Direction::Forward);
        assert_eq!(orbit.shininess(), 18.0);
        orbit.advance(Direction::Forward);
        // -60 is outside the open band.
        assert_eq!(orbit.shininess(), BASE_SHININESS);
    }

    #[test]
    fn reverse_mirrors_forward_bands() {
        let mut orbit = orbit_at(-89.0, 68.0);
        orbit.advance(Direction::Reverse);
        // -90 mirrors to 90: inside the setting band.
        assert_eq!(orbit.light_pos_x(), -90.0);
        assert_eq!(orbit.shininess(), 70.0);

        let mut orbit = orbit_at(91.0, 10.0);
        orbit.advance(Direction::Reverse);
        // 91 wraps to -90 and steps to -91, mirrored 91.
        assert_eq!(orbit.light_pos_x(), -91.0);
        assert_eq!(orbit.shininess(), 12.0);

        let mut orbit = orbit_at(-91.0, 72.0);
        orbit.advance(Direction::Reverse);
        // -91 wraps to 90 and steps to 89, mirrored -89: snap then ramp down.
        assert_eq!(orbit.light_pos_x(), 89.0);
        assert_eq!(orbit.shininess(), 68.0);
    }

    #[test]
    fn hold_refreshes_direction_without_moving() {
        let mut orbit = orbit_at(95.0, 40.0);
        orbit.advance(Direction::Hold);
        assert_eq!(orbit.light_pos_x(), -90.0);
        assert_eq!(orbit.direction_light(), Vec3::new(-90.0, 0.0, 1.0));
        assert_eq!(orbit.shininess(), 40.0);
    }

    #[test]
    fn forward_then_reverse_returns_to_start_position() {
        let mut orbit = LightOrbit::default();
        for _ in 0..25 {
            orbit.advance(Direction::Forward);
        }
        for _ in 0..25 {
            orbit.advance(Direction::Reverse);
        }
        assert_eq!(orbit.light_pos_x(), START_LIGHT_X);
    }
}
