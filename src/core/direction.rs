//! Compass directions in each player's own frame of reference
//!
//! Movement tables and activation needs are authored from the owner's point
//! of view: "forward" always means towards the opponent. At rest the board is
//! stored in seat One's frame, so seat Two's directions flip on both axes.

use crate::core::types::PlayerSeat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Eight compass directions, relative to the owning player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackLeft,
    BackRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackLeft,
        Direction::BackRight,
    ];

    /// Board-frame (dx, dy) unit offset for this direction as seen by `seat`
    ///
    /// Seat One sits at high y and moves towards y = 0, so its forward is
    /// (0, -1). Seat Two is mirrored on both axes.
    pub fn offset(&self, seat: PlayerSeat) -> (i8, i8) {
        let (forward, left): (i8, i8) = match seat {
            PlayerSeat::One => (-1, -1),
            PlayerSeat::Two => (1, 1),
        };
        match self {
            Direction::Forward => (0, forward),
            Direction::Back => (0, -forward),
            Direction::Left => (left, 0),
            Direction::Right => (-left, 0),
            Direction::ForwardLeft => (left, forward),
            Direction::ForwardRight => (-left, forward),
            Direction::BackLeft => (left, -forward),
            Direction::BackRight => (-left, -forward),
        }
    }

    /// Recover the direction from a board-frame unit offset, in `seat`'s frame
    pub fn from_unit(dx: i8, dy: i8, seat: PlayerSeat) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|d| d.offset(seat) == (dx, dy))
    }

    /// The direction the opponent would name this one
    pub fn flipped(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::ForwardLeft => Direction::BackRight,
            Direction::ForwardRight => Direction::BackLeft,
            Direction::BackLeft => Direction::ForwardRight,
            Direction::BackRight => Direction::ForwardLeft,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Forward => "forward",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::ForwardLeft => "forward-left",
            Direction::ForwardRight => "forward-right",
            Direction::BackLeft => "back-left",
            Direction::BackRight => "back-right",
        };
        write!(f, "{}", s)
    }
}
