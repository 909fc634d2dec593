use glam::{Vec3, Vec4};

use super::celestial::LightOrbit;
use super::day_cycle::{DayBand, DayCycle};
use super::Direction;

/// Everything the renderer needs from the animation for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub background: Vec4,
    pub material_color: Vec3,
    pub direction_light: Vec3,
    pub shininess: f32,
    pub band: Option<DayBand>,
    pub daytime: i32,
}

/// Owns the day cycle and the light orbit and steps them together.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    cycle: DayCycle,
    light: LightOrbit,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle(&self) -> &DayCycle {
        &self.cycle
    }

    pub fn light(&self) -> &LightOrbit {
        &self.light
    }

    pub fn step(&mut self, direction: Direction) {
        self.cycle.advance(direction);
        self.light.advance(direction);
    }

    pub fn lighting(&self) -> SceneLighting {
        SceneLighting {
            background: self.cycle.background(),
            material_color: self.cycle.material_color(),
            direction_light: self.light.direction_light(),
            shininess: self.light.shininess(),
            band: self.cycle.band(),
            daytime: self.cycle.daytime(),
        }
    }
}
