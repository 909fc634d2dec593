//! Day/night state machine.
//!
//! `daytime` runs over `[0, 360)` in whole steps and selects one of five
//! bands. Night and day hold fixed colors; dawn and dusk blend between them
//! over a 60-step `daysection` counter.

use glam::{Vec3, Vec4};

use super::color::{interpolate_linear_hsl, interpolate_linear_rgb};
use super::Direction;

pub const DAWN_START: i32 = 30;
pub const DAY_START: i32 = 90;
pub const DUSK_START: i32 = 210;
pub const NIGHT_START: i32 = 270;
pub const FULL_CYCLE: i32 = 360;

/// Steps in one dawn or dusk blend.
pub const SECTION_STEPS: i32 = 60;

pub const START_DAYTIME: i32 = DAY_START;

pub const SKY_COLOR: Vec4 = Vec4::new(0.45, 0.8, 1.0, 1.0);
pub const NIGHT_SKY_COLOR: Vec4 = Vec4::new(0.08, 0.05, 0.25, 1.0);
pub const BASE_MATERIAL: Vec3 = Vec3::new(0.752, 0.752, 0.752);
/// Added to the base material at night for a dark blue tint.
pub const NIGHT_TINT: Vec3 = Vec3::new(-0.4, -0.4, -0.3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBand {
    Night,
    Dawn,
    Day,
    Dusk,
    LateNight,
}

impl DayBand {
    /// Band for a daytime already known to be non-negative. `None` at or past
    /// a full cycle.
    pub fn from_daytime(daytime: i32) -> Option<Self> {
        match daytime {
            t if t < DAWN_START => Some(Self::Night),
            t if t < DAY_START => Some(Self::Dawn),
            t if t < DUSK_START => Some(Self::Day),
            t if t < NIGHT_START => Some(Self::Dusk),
            t if t < FULL_CYCLE => Some(Self::LateNight),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::LateNight => "late night",
        }
    }

    fn rule(self) -> BandRule {
        match self {
            Self::Night | Self::LateNight => BandRule::Hold(Phase::Dark),
            Self::Dawn => BandRule::Blend {
                from: Phase::Dark,
                to: Phase::Light,
            },
            Self::Day => BandRule::Hold(Phase::Light),
            Self::Dusk => BandRule::Blend {
                from: Phase::Light,
                to: Phase::Dark,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Dark,
    Light,
}

impl Phase {
    fn sky(self) -> Vec4 {
        match self {
            Self::Dark => NIGHT_SKY_COLOR,
            Self::Light => SKY_COLOR,
        }
    }

    fn material(self, base: Vec3) -> Vec3 {
        match self {
            Self::Dark => base + NIGHT_TINT,
            Self::Light => base,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum BandRule {
    Hold(Phase),
    Blend { from: Phase, to: Phase },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCycle {
    daytime: i32,
    daysection: i32,
    background: Vec4,
    material_color: Vec3,
    base_material: Vec3,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self::new(START_DAYTIME)
    }
}

impl DayCycle {
    pub fn new(daytime: i32) -> Self {
        Self {
            daytime,
            daysection: 0,
            background: SKY_COLOR,
            material_color: BASE_MATERIAL,
            base_material: BASE_MATERIAL,
        }
    }

    pub fn daytime(&self) -> i32 {
        self.daytime
    }

    pub fn daysection(&self) -> i32 {
        self.daysection
    }

    /// Blend progress through the current transition band.
    pub fn section_ratio(&self) -> f32 {
        self.daysection as f32 / SECTION_STEPS as f32
    }

    pub fn background(&self) -> Vec4 {
        self.background
    }

    pub fn material_color(&self) -> Vec3 {
        self.material_color
    }

    pub fn base_material(&self) -> Vec3 {
        self.base_material
    }

    /// Band the next `advance` will act on, `None` while waiting for the
    /// wrap past a full cycle.
    pub fn band(&self) -> Option<DayBand> {
        if self.daytime < 0 {
            return DayBand::from_daytime(FULL_CYCLE - 1);
        }
        DayBand::from_daytime(self.daytime)
    }

    /// Applies the current band's colors, then steps time by `direction`.
    ///
    /// Negative time wraps to 359 and is handled in the same call. Time at or
    /// past 360 only wraps to 0 on this call; colors and counters are left
    /// alone until the next one.
    pub fn advance(&mut self, direction: Direction) {
        if self.daytime < 0 {
            self.daytime = FULL_CYCLE - 1;
        }

        let Some(band) = DayBand::from_daytime(self.daytime) else {
            self.daytime = 0;
            return;
        };

        let step = direction.sign();
        match band.rule() {
            BandRule::Hold(phase) => {
                self.background = phase.sky();
                self.material_color = phase.material(self.base_material);
                self.daytime += step;
                self.daysection = section_entry(direction);
            }
            BandRule::Blend { from, to } => {
                if self.daysection >= SECTION_STEPS {
                    self.daysection = 0;
                }
                if self.daysection < 0 {
                    self.daysection = SECTION_STEPS - 1;
                }
                let ratio = self.section_ratio();

                self.background = interpolate_linear_hsl(from.sky(), to.sky(), ratio);
                let material = interpolate_linear_rgb(
                    from.material(self.base_material).extend(1.0),
                    to.material(self.base_material).extend(1.0),
                    ratio,
                );
                self.material_color = material.truncate();

                self.daytime += step;
                self.daysection += step;
            }
        }
    }

    #[cfg(test)]
    fn at(daytime: i32, daysection: i32) -> Self {
        Self {
            daysection,
            ..Self::new(daytime)
        }
    }
}

/// Section a blend band starts from when entered in `direction`.
fn section_entry(direction: Direction) -> i32 {
    match direction {
        Direction::Reverse => SECTION_STEPS - 1,
        Direction::Hold | Direction::Forward => 0,
    }
}
