use crate::error::GliderError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    Jump,
}

impl FromStr for Control {
    type Err = GliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Control::Forward),
            "back" => Ok(Control::Back),
            "left" => Ok(Control::Left),
            "right" => Ok(Control::Right),
            "jump" => Ok(Control::Jump),
            other => Err(GliderError::UnknownControl(other.to_owned())),
        }
    }
}

/// Held movement keys, plus a latch so a jump tapped mid-air still fires on landing tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    jump_was_pressed: bool,
}

impl ControlState {
    pub fn set(&mut self, control: Control, state: bool) {
        match control {
            Control::Forward => self.forward = state,
            Control::Back => self.back = state,
            Control::Left => self.left = state,
            Control::Right => self.right = state,
            Control::Jump => {
                self.jump = state;
                if state {
                    self.jump_was_pressed = true;
                }
            }
        }
    }

    /// Releases every key. A pending jump latch survives.
    pub fn clear(&mut self) {
        self.forward = false;
        self.back = false;
        self.left = false;
        self.right = false;
        self.jump = false;
    }

    /// `(forward, right)` input, each -1, 0 or 1. Opposing keys cancel.
    pub fn movement(&self) -> (f64, f64) {
        let axis = |positive: bool, negative: bool| positive as i8 as f64 - negative as i8 as f64;
        (
            axis(self.forward, self.back),
            axis(self.right, self.left),
        )
    }

    /// Whether a jump is requested this tick. Clears the latch.
    pub fn take_jump(&mut self) -> bool {
        let requested = self.jump || self.jump_was_pressed;
        self.jump_was_pressed = false;
        requested
    }
}
