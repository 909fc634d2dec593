use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::scene_core::Direction;

/// Held state of the two time keys. `A` runs the cycle backwards and wins
/// when both are down; `D` runs it forwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeKeys {
    reverse: bool,
    forward: bool,
}

impl TimeKeys {
    /// Returns `true` when the event was one of the time keys.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return false;
        };
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        self.set_key(code, event.state == ElementState::Pressed)
    }

    fn set_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match code {
            KeyCode::KeyA => self.reverse = pressed,
            KeyCode::KeyD => self.forward = pressed,
            _ => return false,
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step for this frame, `None` when no time key is held.
    pub fn direction(&self) -> Option<Direction> {
        if self.reverse {
            Some(Direction::Reverse)
        } else if self.forward {
            Some(Direction::Forward)
        } else {
            None
        }
    }
}
