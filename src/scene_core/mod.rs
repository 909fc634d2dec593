pub mod celestial;
pub mod color;
pub mod config;
pub mod day_cycle;
pub mod scene;
pub mod stl;

/// Signed time step fed to the day cycle and the light orbit each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Reverse,
    Hold,
    Forward,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Self::Reverse => -1,
            Self::Hold => 0,
            Self::Forward => 1,
        }
    }
}
