use std::{cmp::min, thread::sleep, time::{Duration, Instant}};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::actions::{
    CollisionRules, ControlActorsAction, DrawActorsAction, HandleCollisionsAction, MoveActorsAction, RoundState,
};
use crate::actor::{Player, ScoreDisplay};
use crate::cast::{Cast, Role};
use crate::config::{check_trail_length, ConfigError, Settings, MIN_FIELD_CELLS};
use crate::error::GameError;
use crate::point::{Field, Point};
use crate::services::KeyState;
use crate::term::{TermInt, TermManager, BORDER_COLUMNS, CHROME_ROWS};
use crate::trail::{Direction, Trail, TrailOwner};

/// What the player asked for while the game was waiting on them.
enum Next {
    Continue,
    Quit,
}

/// Runs rounds until a player quits: input, update and output once per tick.
pub struct Director {
    settings: Settings,
    field: Field,
    term: TermManager,
    rng: StdRng,
    paused: bool,
    scores: [ScoreDisplay; 2],
}

impl Director {
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        let (width, height) = TermManager::size()?;
        let field = fit_field(&settings, width, height)?;
        if field != settings.field() {
            warn!("terminal is {}x{}, field shrunk to {}x{} cells", width, height, field.columns(), field.rows());
        }

        let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!("growth roll seed {}", seed);

        let scores = [
            ScoreDisplay::new(Player::One, score_position(&field, Player::One), TrailOwner::Red.color()),
            ScoreDisplay::new(Player::Two, score_position(&field, Player::Two), TrailOwner::Green.color()),
        ];

        Ok(Director {
            term: TermManager::new(field)?,
            rng: StdRng::seed_from_u64(seed),
            paused: false,
            field,
            settings,
            scores,
        })
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        self.term.setup()?;
        let result = self.run_rounds();
        self.term.restore()?;
        result
    }

    ///////////////////////////////////////////////////////////////////////////

    fn run_rounds(&mut self) -> Result<(), GameError> {
        if let Next::Quit = self.show_intro()? {
            return Ok(());
        }

        let mut round = 1;
        loop {
            info!("round {} starts", round);
            if let Next::Quit = self.play_round()? {
                info!("quit during round {}", round);
                return Ok(());
            }

            self.term.show_status("Any key: next round   Ctrl+C: quit")?;
            if is_ctrl_c(&self.term.read_key_blocking()?) {
                info!("quit after round {}", round);
                return Ok(());
            }
            round += 1;
        }
    }

    fn show_intro(&mut self) -> Result<Next, GameError> {
        let (one, two) = (self.settings.player_one, self.settings.player_two);
        let player_one = format!("Player 1 (red): {}{}{}{}", one.up, one.left, one.down, one.right);
        let player_two = format!("Player 2 (green): {}{}{}{}", two.up, two.left, two.down, two.right);

        self.term.show_message(&[
            player_one.as_str(),
            player_two.as_str(),
            "Cut off your rival with your trail",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Next::Quit);
        }
        Ok(Next::Continue)
    }

    fn play_round(&mut self) -> Result<Next, GameError> {
        let mut cast = self.new_cast();
        let mut control = ControlActorsAction::new(self.settings.player_one, self.settings.player_two);
        let mut movement = MoveActorsAction::new(self.field, self.settings.growth_per_tick);
        let round_rng = StdRng::seed_from_u64(self.rng.gen());
        let mut collisions = HandleCollisionsAction::new(round_rng, CollisionRules::from(&self.settings), self.field);
        let draw = DrawActorsAction::new();
        let tick = Duration::from_millis(self.settings.tick_interval_ms);

        draw.execute(&cast, &mut self.term)?;

        while !collisions.is_game_over() {
            let started = Instant::now();

            let mut keys = KeyState::new();
            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => return Ok(Next::Quit),
                    KeyEvent { code: KeyCode::Esc, modifiers: _ } => self.toggle_pause(&cast)?,
                    KeyEvent { code: KeyCode::Char(c), modifiers: _ } => keys.press(*c),
                    _ => {}
                }
            }

            if !self.paused {
                control.execute(&mut cast, &keys);
                movement.execute(&mut cast);
                collisions.execute(&mut cast);
                draw.execute(&cast, &mut self.term)?;
            }

            if let Some(rest) = tick.checked_sub(started.elapsed()) {
                sleep(rest);
            }
        }

        if let RoundState::GameOver { winner } = collisions.state() {
            info!("{} takes the round", winner.player());
        }
        for (slot, player) in self.scores.iter_mut().zip([Player::One, Player::Two].iter()) {
            *slot = cast.score(*player).clone();
        }
        debug!(
            "scores {} / {}, trail lengths {} / {}",
            self.scores[0].text(),
            self.scores[1].text(),
            cast.trail(TrailOwner::Red).len(),
            cast.trail(TrailOwner::Green).len()
        );
        Ok(Next::Continue)
    }

    fn new_cast(&self) -> Cast {
        let (columns, rows) = (self.field.columns(), self.field.rows());
        let length = self.settings.initial_trail_length;
        let cell = self.field.cell_size;

        let mut cast = Cast::new();
        cast.add_trail(
            TrailOwner::Red,
            Trail::new(self.field.cell(columns / 4, rows / 2), length, Direction::Right, cell, TrailOwner::Red.color()),
        );
        cast.add_trail(
            TrailOwner::Green,
            Trail::new(self.field.cell(columns * 3 / 4, rows / 2), length, Direction::Left, cell, TrailOwner::Green.color()),
        );
        for score in self.scores.iter() {
            cast.add_actor(Role::Score(score.player), score.clone());
        }
        cast
    }

    fn toggle_pause(&mut self, cast: &Cast) -> Result<(), GameError> {
        self.paused = !self.paused;
        info!("{}", if self.paused {"paused"} else {"resumed"});

        if self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])
        } else {
            DrawActorsAction::new().execute(cast, &mut self.term)
        }
    }
}

/// Shrinks the configured field until it fits inside the terminal. Fails
/// when what is left is below the minimum field or too narrow for the
/// starting trails.
pub fn fit_field(settings: &Settings, width: TermInt, height: TermInt) -> Result<Field, ConfigError> {
    let columns = min(settings.columns, width.saturating_sub(BORDER_COLUMNS) as i32);
    let rows = min(settings.rows, height.saturating_sub(CHROME_ROWS) as i32);
    if columns < MIN_FIELD_CELLS || rows < MIN_FIELD_CELLS {
        return Err(ConfigError::TerminalTooSmall { width, height, min: MIN_FIELD_CELLS });
    }
    check_trail_length(settings.initial_trail_length, columns)?;
    Ok(Field::new(settings.cell_size, columns, rows))
}

/// Scores sit on the line above the field: player one left, player two right.
fn score_position(field: &Field, player: Player) -> Point {
    let row = -2;
    match player {
        Player::One => field.cell(0, row),
        Player::Two => field.cell((field.columns() - 12).max(0), row),
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
