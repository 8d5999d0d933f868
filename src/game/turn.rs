//! Turn state and per-turn action budgets

use crate::core::{BySeat, PlayerSeat};
use serde::{Deserialize, Serialize};

/// Moves (board moves plus direct attacks) allowed per turn
pub const MAX_MOVES_PER_TURN: u32 = 3;

/// Hand size ceiling enforced at end of turn
pub const HAND_LIMIT: usize = 5;

/// Consecutive-turn center holds needed to win by center control
pub const CENTER_CONTROL_TARGET: u32 = 6;

/// Once-per-turn action flags for one seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFlags {
    pub summoned: bool,
    pub sorcery_used: bool,
    pub land_placed: bool,
}

impl TurnFlags {
    pub fn clear(&mut self) {
        *self = TurnFlags::default();
    }
}

/// Whose turn it is and what they have spent so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnState {
    pub active: PlayerSeat,
    pub moves_this_turn: u32,
    pub turn_number: u32,
    pub flags: BySeat<TurnFlags>,
    /// Consecutive turns each seat has held the center uncontested
    pub center_tile_control: BySeat<u32>,
}

impl TurnState {
    pub fn new() -> Self {
        TurnState {
            active: PlayerSeat::One,
            moves_this_turn: 0,
            turn_number: 1,
            flags: BySeat::new(TurnFlags::default(), TurnFlags::default()),
            center_tile_control: BySeat::new(0, 0),
        }
    }

    pub fn moves_left(&self) -> u32 {
        MAX_MOVES_PER_TURN.saturating_sub(self.moves_this_turn)
    }

    pub fn can_move(&self, seat: PlayerSeat) -> bool {
        seat == self.active && self.moves_this_turn < MAX_MOVES_PER_TURN
    }

    pub fn spend_move(&mut self) {
        self.moves_this_turn += 1;
    }

    /// Hand the turn to the other seat and reset per-turn budgets
    pub fn advance(&mut self) {
        self.active = self.active.opponent();
        self.moves_this_turn = 0;
        self.turn_number += 1;
        self.flags.get_mut(PlayerSeat::One).clear();
        self.flags.get_mut(PlayerSeat::Two).clear();
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_budget() {
        let mut turn = TurnState::new();
        assert!(turn.can_move(PlayerSeat::One));
        assert!(!turn.can_move(PlayerSeat::Two));
        for _ in 0..MAX_MOVES_PER_TURN {
            turn.spend_move();
        }
        assert!(!turn.can_move(PlayerSeat::One));
        assert_eq!(turn.moves_left(), 0);
    }

    #[test]
    fn test_advance_resets_budgets() {
        let mut turn = TurnState::new();
        turn.spend_move();
        turn.flags.get_mut(PlayerSeat::One).summoned = true;
        turn.advance();
        assert_eq!(turn.active, PlayerSeat::Two);
        assert_eq!(turn.moves_this_turn, 0);
        assert_eq!(turn.turn_number, 2);
        assert!(!turn.flags.get(PlayerSeat::One).summoned);
    }
}
