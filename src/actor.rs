use std::fmt;

use crate::point::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    White,
    Yellow,
}

/// Colour of a trail once its round has ended.
pub const FROZEN_COLOR: Color = Color::White;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// One cell of a trail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: Point,
    pub color: Color,
}

impl Segment {
    pub fn new(position: Point, color: Color) -> Self {
        Segment { position, color }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreDisplay {
    pub player: Player,
    pub position: Point,
    pub points: u32,
    pub color: Color,
}

impl ScoreDisplay {
    pub fn new(player: Player, position: Point, color: Color) -> Self {
        ScoreDisplay { player, position, points: 0, color }
    }

    pub fn add_points(&mut self, points: u32) {
        self.points += points;
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.player, self.points)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub position: Point,
    pub text: String,
    pub color: Color,
}

impl Message {
    pub fn new(position: Point, text: impl Into<String>, color: Color) -> Self {
        Message { position, text: text.into(), color }
    }
}

/// Anything that can be handed to the video service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Actor {
    Segment(Segment),
    ScoreDisplay(ScoreDisplay),
    Message(Message),
}

impl Actor {
    pub fn position(&self) -> Point {
        match self {
            Actor::Segment(s) => s.position,
            Actor::ScoreDisplay(s) => s.position,
            Actor::Message(m) => m.position,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Actor::Segment(s) => s.color,
            Actor::ScoreDisplay(s) => s.color,
            Actor::Message(m) => m.color,
        }
    }
}

impl From<Segment> for Actor {
    fn from(segment: Segment) -> Self {
        Actor::Segment(segment)
    }
}

impl From<ScoreDisplay> for Actor {
    fn from(score: ScoreDisplay) -> Self {
        Actor::ScoreDisplay(score)
    }
}

impl From<Message> for Actor {
    fn from(message: Message) -> Self {
        Actor::Message(message)
    }
}
