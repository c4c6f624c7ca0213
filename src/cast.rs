//! The registry of everything alive in a round, keyed by role.

use std::fmt;
#[cfg(test)]
use std::str::FromStr;

#[cfg(test)]
use thiserror::Error;

use crate::actor::{Actor, Player, ScoreDisplay};
use crate::trail::{Trail, TrailOwner};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Trail(TrailOwner),
    Score(Player),
    Messages,
}

impl Role {
    /// Category name used by the older string-keyed interface.
    pub fn category(self) -> &'static str {
        match self {
            Role::Trail(TrailOwner::Red) => "red",
            Role::Trail(TrailOwner::Green) => "green",
            Role::Score(Player::One) => "player1_scores",
            Role::Score(Player::Two) => "player2_scores",
            Role::Messages => "messages",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// Nothing reads category names at runtime; the parser stays to pin the
/// name mapping and the "blue" rejection.
#[cfg(test)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("unknown cast category '{0}'")]
    Unknown(String),
    #[error("'blue' names the same trail as 'red'; use 'red'")]
    AmbiguousBlue,
}

#[cfg(test)]
impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Role::Trail(TrailOwner::Red)),
            "green" => Ok(Role::Trail(TrailOwner::Green)),
            "player1_scores" => Ok(Role::Score(Player::One)),
            "player2_scores" => Ok(Role::Score(Player::Two)),
            "messages" => Ok(Role::Messages),
            "blue" => Err(RoleError::AmbiguousBlue),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Member {
    Trail(Trail),
    Actor(Actor),
}

/// Role to members, both kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Cast {
    groups: Vec<(Role, Vec<Member>)>,
}

impl Cast {
    pub fn new() -> Self {
        Cast { groups: vec![] }
    }

    pub fn add_actor(&mut self, role: Role, actor: impl Into<Actor>) {
        self.group_mut(role).push(Member::Actor(actor.into()));
    }

    pub fn add_trail(&mut self, owner: TrailOwner, trail: Trail) {
        self.group_mut(Role::Trail(owner)).push(Member::Trail(trail));
    }

    /// All plain actors filed under `role`, in insertion order.
    pub fn actors(&self, role: Role) -> impl Iterator<Item = &Actor> {
        self.group(role).iter().filter_map(|m| match m {
            Member::Actor(a) => Some(a),
            Member::Trail(_) => None,
        })
    }

    pub fn first_actor(&self, role: Role) -> Option<&Actor> {
        self.actors(role).next()
    }

    /// # Panics
    ///
    /// If no trail was registered for `owner`.
    pub fn trail(&self, owner: TrailOwner) -> &Trail {
        self.group(Role::Trail(owner))
            .iter()
            .find_map(|m| match m {
                Member::Trail(t) => Some(t),
                Member::Actor(_) => None,
            })
            .unwrap_or_else(|| panic!("cast has no '{}' trail", Role::Trail(owner)))
    }

    /// # Panics
    ///
    /// If no trail was registered for `owner`.
    pub fn trail_mut(&mut self, owner: TrailOwner) -> &mut Trail {
        self.group_mut(Role::Trail(owner))
            .iter_mut()
            .find_map(|m| match m {
                Member::Trail(t) => Some(t),
                Member::Actor(_) => None,
            })
            .unwrap_or_else(|| panic!("cast has no '{}' trail", Role::Trail(owner)))
    }

    /// # Panics
    ///
    /// If no score display was registered for `player`.
    pub fn score(&self, player: Player) -> &ScoreDisplay {
        match self.first_actor(Role::Score(player)) {
            Some(Actor::ScoreDisplay(score)) => score,
            _ => panic!("cast has no '{}' display", Role::Score(player)),
        }
    }

    /// # Panics
    ///
    /// If no score display was registered for `player`.
    pub fn score_mut(&mut self, player: Player) -> &mut ScoreDisplay {
        self.group_mut(Role::Score(player))
            .iter_mut()
            .find_map(|m| match m {
                Member::Actor(Actor::ScoreDisplay(s)) => Some(s),
                _ => None,
            })
            .unwrap_or_else(|| panic!("cast has no '{}' display", Role::Score(player)))
    }

    ///////////////////////////////////////////////////////////////////////////

    fn group(&self, role: Role) -> &[Member] {
        self.groups
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[])
    }

    fn group_mut(&mut self, role: Role) -> &mut Vec<Member> {
        let index = match self.groups.iter().position(|(r, _)| *r == role) {
            Some(i) => i,
            None => {
                self.groups.push((role, vec![]));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }
}
