use crate::actor::{Actor, Player};
use crate::cast::{Cast, Role};
use crate::error::GameError;
use crate::services::Video;
use crate::trail::TrailOwner;

/// Draws trails, then scores, then messages on top of everything.
#[derive(Default)]
pub struct DrawActorsAction;

impl DrawActorsAction {
    pub fn new() -> Self {
        DrawActorsAction
    }

    pub fn execute(&self, cast: &Cast, video: &mut impl Video) -> Result<(), GameError> {
        let messages: Vec<Actor> = cast.actors(Role::Messages).cloned().collect();

        video.clear_buffer()?;
        for owner in TrailOwner::ALL.iter() {
            let segments: Vec<Actor> = cast.trail(*owner).segments().iter().map(|s| Actor::Segment(*s)).collect();
            video.draw_actors(&segments, false)?;
        }
        for player in [Player::One, Player::Two].iter() {
            video.draw_actor(&Actor::ScoreDisplay(cast.score(*player).clone()))?;
        }
        video.draw_actors(&messages, true)?;
        video.flush_buffer()
    }
}
