use std::collections::HashSet;
use std::iter::FromIterator;

use crate::actor::Actor;
use crate::error::GameError;

pub trait Keyboard {
    fn is_key_down(&self, key: char) -> bool;
}

pub trait Video {
    fn clear_buffer(&mut self) -> Result<(), GameError>;
    fn draw_actor(&mut self, actor: &Actor) -> Result<(), GameError>;
    /// `overlay` draws the actors centred on top of everything else.
    fn draw_actors(&mut self, actors: &[Actor], overlay: bool) -> Result<(), GameError>;
    fn flush_buffer(&mut self) -> Result<(), GameError>;
}

/// The keys seen during one frame. Rebuilt every tick, so nothing carries over.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    down: HashSet<char>,
}

impl KeyState {
    pub fn new() -> Self {
        KeyState { down: HashSet::new() }
    }

    pub fn press(&mut self, key: char) {
        self.down.insert(key.to_ascii_lowercase());
    }
}

impl Keyboard for KeyState {
    fn is_key_down(&self, key: char) -> bool {
        self.down.contains(&key.to_ascii_lowercase())
    }
}

impl FromIterator<char> for KeyState {
    fn from_iter<I: IntoIterator<Item = char>>(keys: I) -> Self {
        let mut state = KeyState::new();
        for key in keys {
            state.press(key);
        }
        state
    }
}
