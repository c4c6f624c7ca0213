use std::collections::VecDeque;
use std::fmt;

use crate::actor::{Color, Player, Segment};
use crate::point::{Field, Point};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement for this direction, scaled to one grid cell.
    pub fn heading(self, cell_size: i32) -> Point {
        let unit = match self {
            Up => Point::new(0, -1),
            Down => Point::new(0, 1),
            Left => Point::new(-1, 0),
            Right => Point::new(1, 0),
        };
        unit.scale(cell_size)
    }
}

/// Which of the two light cycles a trail belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrailOwner {
    Red,
    Green,
}

impl TrailOwner {
    pub const ALL: [TrailOwner; 2] = [TrailOwner::Red, TrailOwner::Green];

    pub fn opponent(self) -> TrailOwner {
        match self {
            TrailOwner::Red => TrailOwner::Green,
            TrailOwner::Green => TrailOwner::Red,
        }
    }

    pub fn player(self) -> Player {
        match self {
            TrailOwner::Red => Player::One,
            TrailOwner::Green => Player::Two,
        }
    }

    pub fn color(self) -> Color {
        match self {
            TrailOwner::Red => Color::Red,
            TrailOwner::Green => Color::Green,
        }
    }
}

impl fmt::Display for TrailOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailOwner::Red => write!(f, "Red"),
            TrailOwner::Green => write!(f, "Green"),
        }
    }
}

/// A light cycle and the wall it leaves behind. The head is at index 0.
#[derive(Clone, Debug)]
pub struct Trail {
    segments: VecDeque<Segment>,
    heading: Point,
    cell_size: i32,
    pending_growth: usize,
}

impl Trail {
    /// Lays out `length` segments ending at `head`, trailing away from `direction`.
    pub fn new(head: Point, length: usize, direction: Direction, cell_size: i32, color: Color) -> Self {
        assert!(length > 0, "a trail needs at least one segment");

        let heading = direction.heading(cell_size);
        let behind = heading.reverse();
        let segments = (0..length as i32)
            .map(|i| Segment::new(head.add(behind.scale(i)), color))
            .collect();

        Trail { segments, heading, cell_size, pending_growth: 0 }
    }

    pub fn segments(&self) -> &VecDeque<Segment> {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Every segment except the head.
    pub fn body(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().skip(1)
    }

    pub fn heading(&self) -> Point {
        self.heading
    }

    pub fn turn_head(&mut self, direction: Direction) {
        self.heading = direction.heading(self.cell_size);
    }

    /// Moves the head one cell along the heading. Every other segment takes
    /// its predecessor's place, unless growth is pending, in which case the
    /// tail stays put and the trail gets one segment longer.
    pub fn advance(&mut self, field: &Field) {
        let head = *self.head();
        let new_head = head.position.add(self.heading).wrap(field.max_x, field.max_y);
        self.segments.push_front(Segment::new(new_head, head.color));

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.segments.pop_back();
        }
    }

    /// Lengthens the trail by one segment on each of the next `count` advances.
    pub fn schedule_growth(&mut self, count: usize) {
        self.pending_growth += count;
    }

    /// Appends `count` segments at the tail right away. They share the tail's
    /// cell until the trail moves on.
    pub fn grow_tail(&mut self, count: usize) {
        let tail = *self.segments.back().expect("trail is never empty");
        self.segments.extend(std::iter::repeat(tail).take(count));
    }

    pub fn freeze(&mut self, color: Color) {
        for segment in self.segments.iter_mut() {
            segment.color = color;
        }
    }

    pub fn body_contains(&self, position: Point) -> bool {
        self.body().any(|s| s.position == position)
    }
}
