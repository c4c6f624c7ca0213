use log::{debug, info, warn};
use rand::Rng;

use crate::actor::{Message, FROZEN_COLOR};
use crate::cast::{Cast, Role};
use crate::config::Settings;
use crate::point::Field;
use crate::trail::TrailOwner;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundState {
    Running,
    GameOver { winner: TrailOwner },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionRules {
    /// Each tick rolls a number in `0..growth_roll_sides`.
    pub growth_roll_sides: u32,
    /// Rolling this grows both trails by `growth_amount`.
    pub growth_sentinel: u32,
    pub growth_amount: usize,
    /// Whether running into your own trail also ends the round.
    pub self_collision: bool,
}

impl From<&Settings> for CollisionRules {
    fn from(settings: &Settings) -> Self {
        CollisionRules {
            growth_roll_sides: settings.growth_roll_sides,
            growth_sentinel: settings.growth_sentinel,
            growth_amount: settings.growth_amount,
            self_collision: settings.self_collision,
        }
    }
}

/// Decides the round: random bonus growth, crashes, scoring, and the switch
/// to game over. One instance lives for exactly one round.
pub struct HandleCollisionsAction<R> {
    rng: R,
    rules: CollisionRules,
    field: Field,
    state: RoundState,
}

impl<R: Rng> HandleCollisionsAction<R> {
    pub fn new(rng: R, rules: CollisionRules, field: Field) -> Self {
        HandleCollisionsAction { rng, rules, field, state: RoundState::Running }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state != RoundState::Running
    }

    pub fn execute(&mut self, cast: &mut Cast) {
        if self.is_game_over() {
            return;
        }

        self.roll_growth(cast);

        if let Some(winner) = self.find_winner(cast) {
            self.finish(cast, winner);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn roll_growth(&mut self, cast: &mut Cast) {
        let roll = self.rng.gen_range(0..self.rules.growth_roll_sides);
        if roll != self.rules.growth_sentinel {
            return;
        }

        debug!("bonus growth of {} for both trails", self.rules.growth_amount);
        for owner in TrailOwner::ALL.iter() {
            cast.trail_mut(*owner).grow_tail(self.rules.growth_amount);
        }
    }

    /// Checks both directions in the same tick. The crashed trail's opponent
    /// scores; if both crash, both opponents score and the later check names
    /// the winner.
    fn find_winner(&self, cast: &mut Cast) -> Option<TrailOwner> {
        let mut winner = None;

        for owner in TrailOwner::ALL.iter() {
            let opponent = owner.opponent();
            let head = cast.trail(*owner).head().position;

            let crashed = cast.trail(opponent).body_contains(head)
                || (self.rules.self_collision && cast.trail(*owner).body_contains(head));
            if !crashed {
                continue;
            }

            info!("{} crashed at {}, point for {}", owner, head, opponent.player());
            cast.score_mut(opponent.player()).add_points(1);

            if let Some(previous) = winner {
                warn!("both trails crashed this tick, {} replaces {} as winner", opponent, previous);
            }
            winner = Some(opponent);
        }

        winner
    }

    fn finish(&mut self, cast: &mut Cast, winner: TrailOwner) {
        if self.is_game_over() {
            return;
        }
        self.state = RoundState::GameOver { winner };

        for owner in TrailOwner::ALL.iter() {
            cast.trail_mut(*owner).freeze(FROZEN_COLOR);
        }

        let text = format!("Game Over! {} Wins!", winner);
        info!("{}", text);
        cast.add_actor(Role::Messages, Message::new(self.field.center(), text, FROZEN_COLOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::cast_with;
    use crate::actor::{Actor, Color, Player};
    use crate::point::Point;
    use crate::trail::{Direction::*, Trail};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    const CELL: i32 = 15;

    fn rules() -> CollisionRules {
        CollisionRules::from(&Settings::default())
    }

    fn field() -> Field {
        Field::new(CELL, 60, 40)
    }

    /// Every roll comes out as 0, which is never the default sentinel.
    fn quiet_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every roll on 0..50 comes out as 25.
    fn sentinel_rng() -> StepRng {
        StepRng::new(1 << 31, 0)
    }

    fn apart() -> Cast {
        cast_with(
            Trail::new(Point::new(90, 300), 4, Right, CELL, Color::Red),
            Trail::new(Point::new(810, 300), 4, Left, CELL, Color::Green),
        )
    }

    /// Red's head sits on the second segment of Green's body.
    fn red_on_green_body() -> Cast {
        cast_with(
            Trail::new(Point::new(330, 300), 3, Down, CELL, Color::Red),
            Trail::new(Point::new(300, 300), 4, Left, CELL, Color::Green),
        )
    }

    fn messages(cast: &Cast) -> Vec<String> {
        cast.actors(Role::Messages)
            .filter_map(|a| match a {
                Actor::Message(m) => Some(m.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn quiet_tick_changes_nothing() {
        let mut cast = apart();
        let mut action = HandleCollisionsAction::new(quiet_rng(), rules(), field());
        action.execute(&mut cast);

        assert_eq!(action.state(), RoundState::Running);
        assert_eq!(cast.trail(TrailOwner::Red).len(), 4);
        assert_eq!(cast.trail(TrailOwner::Green).len(), 4);
        assert!(messages(&cast).is_empty());
        assert_eq!(cast.score(Player::One).points, 0);
        assert_eq!(cast.score(Player::Two).points, 0);
    }

    #[test]
    fn sentinel_roll_grows_both_trails_by_two() {
        let mut cast = apart();
        let mut action = HandleCollisionsAction::new(sentinel_rng(), rules(), field());
        action.execute(&mut cast);

        assert_eq!(cast.trail(TrailOwner::Red).len(), 6);
        assert_eq!(cast.trail(TrailOwner::Green).len(), 6);
        assert_eq!(action.state(), RoundState::Running);
    }

    #[test]
    fn single_sided_roll_always_grows() {
        let mut cast = apart();
        let rules = CollisionRules { growth_roll_sides: 1, growth_sentinel: 0, ..rules() };
        let mut action = HandleCollisionsAction::new(rand::rngs::StdRng::seed_from_u64(7), rules, field());
        action.execute(&mut cast);
        action.execute(&mut cast);

        assert_eq!(cast.trail(TrailOwner::Red).len(), 8);
    }

    #[test]
    fn head_on_opponent_body_ends_round() {
        let mut cast = red_on_green_body();
        let mut action = HandleCollisionsAction::new(quiet_rng(), rules(), field());
        action.execute(&mut cast);

        assert_eq!(action.state(), RoundState::GameOver { winner: TrailOwner::Green });
        assert_eq!(cast.score(Player::Two).points, 1);
        assert_eq!(cast.score(Player::One).points, 0);
        for owner in TrailOwner::ALL.iter() {
            assert!(cast.trail(*owner).segments().iter().all(|s| s.color == FROZEN_COLOR));
        }
        assert_eq!(messages(&cast), vec!["Game Over! Green Wins!".to_string()]);
        assert_eq!(cast.first_actor(Role::Messages).map(|a| a.position()), Some(Point::new(450, 300)));
    }

    #[test]
    fn game_over_is_terminal() {
        let mut cast = red_on_green_body();
        let mut action = HandleCollisionsAction::new(sentinel_rng(), rules(), field());
        action.execute(&mut cast);
        let lengths = (cast.trail(TrailOwner::Red).len(), cast.trail(TrailOwner::Green).len());

        action.execute(&mut cast);
        action.execute(&mut cast);

        assert_eq!(action.state(), RoundState::GameOver { winner: TrailOwner::Green });
        assert_eq!((cast.trail(TrailOwner::Red).len(), cast.trail(TrailOwner::Green).len()), lengths);
        assert_eq!(cast.score(Player::Two).points, 1);
        assert_eq!(messages(&cast).len(), 1);
    }

    #[test]
    fn collision_needs_exact_cell() {
        let grid = Field::new(1, 100, 100);
        let mut cast = cast_with(
            Trail::new(Point::new(40, 41), 1, Up, 1, Color::Red),
            Trail::new(Point::new(42, 40), 3, Right, 1, Color::Green),
        );
        let mut action = HandleCollisionsAction::new(quiet_rng(), rules(), grid);

        action.execute(&mut cast);
        assert_eq!(action.state(), RoundState::Running);

        cast.trail_mut(TrailOwner::Red).advance(&grid);
        assert_eq!(cast.trail(TrailOwner::Red).head().position, Point::new(40, 40));
        action.execute(&mut cast);
        assert_eq!(action.state(), RoundState::GameOver { winner: TrailOwner::Green });
    }

    #[test]
    fn double_crash_scores_both_and_last_check_wins() {
        let mut red = Trail::new(Point::new(120, 150), 2, Right, CELL, Color::Red);
        red.advance(&field());
        red.turn_head(Down);
        red.advance(&field());
        let green = Trail::new(Point::new(135, 150), 3, Up, CELL, Color::Green);
        let mut cast = cast_with(red, green);

        let mut action = HandleCollisionsAction::new(quiet_rng(), rules(), field());
        action.execute(&mut cast);

        assert_eq!(cast.score(Player::One).points, 1);
        assert_eq!(cast.score(Player::Two).points, 1);
        assert_eq!(action.state(), RoundState::GameOver { winner: TrailOwner::Red });
        assert_eq!(messages(&cast), vec!["Game Over! Red Wins!".to_string()]);
    }

    fn red_in_a_loop() -> Cast {
        let mut red = Trail::new(Point::new(45, 30), 5, Right, CELL, Color::Red);
        for direction in [Down, Left, Up].iter() {
            red.turn_head(*direction);
            red.advance(&field());
        }
        cast_with(red, Trail::new(Point::new(810, 300), 4, Left, CELL, Color::Green))
    }

    #[test]
    fn self_collision_is_off_by_default() {
        let mut cast = red_in_a_loop();
        assert!(cast.trail(TrailOwner::Red).body_contains(cast.trail(TrailOwner::Red).head().position));

        let mut action = HandleCollisionsAction::new(quiet_rng(), rules(), field());
        action.execute(&mut cast);
        assert_eq!(action.state(), RoundState::Running);
    }

    #[test]
    fn self_collision_rule_hands_round_to_opponent() {
        let mut cast = red_in_a_loop();
        let rules = CollisionRules { self_collision: true, ..rules() };
        let mut action = HandleCollisionsAction::new(quiet_rng(), rules, field());
        action.execute(&mut cast);

        assert_eq!(action.state(), RoundState::GameOver { winner: TrailOwner::Green });
        assert_eq!(cast.score(Player::Two).points, 1);
    }
}
