//! Keyboard input latch
//!
//! Host key events arrive edge-triggered (down/up); the simulation wants a
//! level snapshot once per tick. Fire is the exception: it acts once per press.
//! Presses that pile up between ticks are queued and fed out one shot per tick.

use crate::sim::TickInput;

/// Logical controls the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
}

/// Map a DOM `KeyboardEvent.key` value to a control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Control::TurnLeft),
        "ArrowRight" | "d" | "D" => Some(Control::TurnRight),
        "ArrowUp" | "w" | "W" => Some(Control::Thrust),
        " " | "Spacebar" => Some(Control::Fire),
        _ => None,
    }
}

/// Held state of every control plus queued fire presses
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    turn_left: bool,
    turn_right: bool,
    thrust: bool,
    fire_held: bool,
    fire_pending: u8,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat presses of a held fire key do not re-arm it.
    pub fn press(&mut self, control: Control) {
        match control {
            Control::TurnLeft => self.turn_left = true,
            Control::TurnRight => self.turn_right = true,
            Control::Thrust => self.thrust = true,
            Control::Fire => {
                if !self.fire_held {
                    self.fire_pending = self.fire_pending.saturating_add(1);
                }
                self.fire_held = true;
            }
        }
    }

    /// Key went up
    pub fn release(&mut self, control: Control) {
        match control {
            Control::TurnLeft => self.turn_left = false,
            Control::TurnRight => self.turn_right = false,
            Control::Thrust => self.thrust = false,
            Control::Fire => self.fire_held = false,
        }
    }

    /// Route a raw key-down; unknown keys are ignored
    pub fn key_down(&mut self, key: &str) -> bool {
        match control_for_key(key) {
            Some(control) => {
                self.press(control);
                true
            }
            None => false,
        }
    }

    /// Route a raw key-up; unknown keys are ignored
    pub fn key_up(&mut self, key: &str) -> bool {
        match control_for_key(key) {
            Some(control) => {
                self.release(control);
                true
            }
            None => false,
        }
    }

    /// Forget every held key (window lost focus, key-ups will never arrive)
    pub fn release_all(&mut self) {
        *self = Self {
            fire_pending: self.fire_pending,
            ..Self::default()
        };
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::TurnLeft => self.turn_left,
            Control::TurnRight => self.turn_right,
            Control::Thrust => self.thrust,
            Control::Fire => self.fire_held,
        }
    }

    /// Queued fire presses not yet handed to a tick
    pub fn pending_shots(&self) -> u8 {
        self.fire_pending
    }

    /// Input for the next tick; consumes at most one queued fire press
    pub fn snapshot(&mut self) -> TickInput {
        let fire = self.fire_pending > 0;
        if fire {
            self.fire_pending -= 1;
        }
        TickInput {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            thrust: self.thrust,
            fire,
        }
    }
}
