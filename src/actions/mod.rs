//! Per-tick units of behaviour, run by the director in input, update, output order.

mod collisions;
mod control;
mod draw;
mod movement;

pub use collisions::{CollisionRules, HandleCollisionsAction, RoundState};
pub use control::ControlActorsAction;
pub use draw::DrawActorsAction;
pub use movement::MoveActorsAction;

#[cfg(test)]
pub(crate) mod testing {
    use crate::actor::{Color, Player, ScoreDisplay};
    use crate::cast::{Cast, Role};
    use crate::point::Point;
    use crate::trail::{Trail, TrailOwner};

    /// A cast holding the two given trails and both score displays.
    pub fn cast_with(red: Trail, green: Trail) -> Cast {
        let mut cast = Cast::new();
        cast.add_trail(TrailOwner::Red, red);
        cast.add_trail(TrailOwner::Green, green);
        cast.add_actor(Role::Score(Player::One), ScoreDisplay::new(Player::One, Point::new(0, -30), Color::Red));
        cast.add_actor(Role::Score(Player::Two), ScoreDisplay::new(Player::Two, Point::new(600, -30), Color::Green));
        cast
    }
}
