use log::trace;

use crate::cast::Cast;
use crate::config::ControlScheme;
use crate::services::Keyboard;
use crate::trail::{Direction::{self, *}, TrailOwner};

/// Turns each trail according to its player's keys.
pub struct ControlActorsAction {
    schemes: [(TrailOwner, ControlScheme); 2],
}

impl ControlActorsAction {
    pub fn new(player_one: ControlScheme, player_two: ControlScheme) -> Self {
        ControlActorsAction { schemes: [(TrailOwner::Red, player_one), (TrailOwner::Green, player_two)] }
    }

    pub fn execute(&mut self, cast: &mut Cast, keyboard: &impl Keyboard) {
        for (owner, scheme) in self.schemes.iter() {
            if let Some(direction) = pressed_direction(scheme, keyboard) {
                let trail = cast.trail_mut(*owner);
                trail.turn_head(direction);
                trace!("{} turns {:?}, heading {}", owner, direction, trail.heading());
            }
        }
    }
}

/// Later checks win, so with several keys down the order of precedence is
/// down, up, right, left.
fn pressed_direction(scheme: &ControlScheme, keyboard: &impl Keyboard) -> Option<Direction> {
    let mut direction = None;

    if keyboard.is_key_down(scheme.left) {
        direction = Some(Left);
    }
    if keyboard.is_key_down(scheme.right) {
        direction = Some(Right);
    }
    if keyboard.is_key_down(scheme.up) {
        direction = Some(Up);
    }
    if keyboard.is_key_down(scheme.down) {
        direction = Some(Down);
    }

    direction
}
