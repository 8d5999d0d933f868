//! Main game state structure

use crate::board::{Grid, Pos, BOARD_SIZE, LAND_BOARD_SIZE};
use crate::core::{BySeat, Card, CardId, EntityStore, PlayerSeat};
use crate::game::interaction::PendingInteraction;
use crate::game::{GameLogger, TurnState};
use crate::zones::PlayerZones;
use crate::{EngineError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Mana each seat starts with; doubles as the life total
pub const STARTING_MANA: i32 = 50;

/// Cards drawn before the first turn
pub const OPENING_HAND: usize = 5;

/// Complete game state
///
/// The central structure holding all game information. Cards live in the
/// entity store; zones and boards reference them by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// All card instances in the game
    pub cards: EntityStore<Card>,

    /// Zones for each seat
    pub zones: BySeat<PlayerZones>,

    /// 6x6 monster board
    pub board: Grid,

    /// 7x7 land board
    pub land_board: Grid,

    /// Mana pools; a seat at 0 has lost
    pub mana: BySeat<i32>,

    /// Turn structure
    pub turn: TurnState,

    /// In-flight multi-step sorcery, if any; locks all other actions
    pub interaction: Option<PendingInteraction>,

    /// Random number generator for gameplay (serializable for deterministic
    /// replay). RefCell so shuffles work while zones are borrowed mutably.
    pub rng: RefCell<ChaCha12Rng>,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    /// Create an empty game; decks are filled in by the deck builder
    pub fn new(seed: u64) -> Self {
        GameState {
            cards: EntityStore::new(),
            zones: BySeat::new(
                PlayerZones::new(PlayerSeat::One),
                PlayerZones::new(PlayerSeat::Two),
            ),
            board: Grid::new(BOARD_SIZE),
            land_board: Grid::new(LAND_BOARD_SIZE),
            mana: BySeat::new(STARTING_MANA, STARTING_MANA),
            turn: TurnState::new(),
            interaction: None,
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(seed)),
            logger: GameLogger::new(),
        }
    }

    /// Reseed the RNG for deterministic replays
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Register a card instance and return its id
    pub fn spawn(&mut self, card: Card) -> CardId {
        let id = self.cards.next_id();
        self.cards.insert(id, card);
        id
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards.get_mut(id)
    }

    pub fn zones(&self, seat: PlayerSeat) -> &PlayerZones {
        self.zones.get(seat)
    }

    pub fn zones_mut(&mut self, seat: PlayerSeat) -> &mut PlayerZones {
        self.zones.get_mut(seat)
    }

    /// Card in a seat's hand at a slot index
    pub fn hand_card(&self, seat: PlayerSeat, slot: usize) -> Result<CardId> {
        self.zones(seat)
            .hand
            .get(slot)
            .ok_or_else(|| EngineError::illegal(format!("no card in hand slot {slot}")))
    }

    pub fn monster_at(&self, pos: Pos) -> Option<CardId> {
        self.board.get(pos)
    }

    pub fn land_at(&self, pos: Pos) -> Option<CardId> {
        self.land_board.get(pos)
    }

    /// Shuffle a seat's main deck with the game RNG
    pub fn shuffle_deck(&mut self, seat: PlayerSeat) {
        use rand::seq::SliceRandom;
        let rng = &mut *self.rng.borrow_mut();
        self.zones.get_mut(seat).deck.cards.shuffle(rng);
    }

    /// Draw the front card of the deck into the hand; no-op on empty deck
    pub fn draw_card(&mut self, seat: PlayerSeat) -> Option<CardId> {
        let zones = self.zones.get_mut(seat);
        let drawn = zones.deck.draw_front()?;
        zones.hand.add(drawn);
        self.logger.verbose(&format!("player {seat} drew a card"));
        Some(drawn)
    }

    /// Move a card (already detached from its zone or board) to its
    /// owner's graveyard
    pub fn send_to_graveyard(&mut self, id: CardId) -> Result<()> {
        let owner = self.card(id)?.owner;
        self.zones.get_mut(owner).graveyard.add(id);
        Ok(())
    }

    /// Remove the monster at `pos` and bury it; Ok(None) on an empty tile
    pub fn destroy_monster_at(&mut self, pos: Pos) -> Result<Option<CardId>> {
        match self.board.take(pos) {
            Some(id) => {
                self.send_to_graveyard(id)?;
                let name = self.card(id)?.name.clone();
                self.logger.normal(&format!("{name} was destroyed"));
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    pub fn mana_of(&self, seat: PlayerSeat) -> i32 {
        *self.mana.get(seat)
    }

    /// A defeated seat is one whose mana pool is empty
    pub fn defeated(&self) -> Option<PlayerSeat> {
        for seat in [PlayerSeat::One, PlayerSeat::Two] {
            if self.mana_of(seat) <= 0 {
                return Some(seat);
            }
        }
        None
    }

    pub fn active_seat(&self) -> PlayerSeat {
        self.turn.active
    }

    /// Reject any ordinary action while an interaction is pending
    pub(crate) fn ensure_unlocked(&self) -> Result<()> {
        if self.interaction.is_some() {
            Err(EngineError::InteractionPending)
        } else {
            Ok(())
        }
    }

    pub(crate) fn ensure_active(&self, seat: PlayerSeat) -> Result<()> {
        if seat != self.turn.active {
            Err(EngineError::illegal("not your turn"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_new_game_defaults() {
        let game = GameState::new(42);
        assert_eq!(game.mana_of(PlayerSeat::One), STARTING_MANA);
        assert_eq!(game.mana_of(PlayerSeat::Two), STARTING_MANA);
        assert_eq!(game.active_seat(), PlayerSeat::One);
        assert!(game.interaction.is_none());
        assert_eq!(game.board.size(), BOARD_SIZE);
        assert_eq!(game.land_board.size(), LAND_BOARD_SIZE);
    }

    #[test]
    fn test_seed_determinism() {
        let mut a = GameState::new(7);
        let mut b = GameState::new(7);
        for seat in [PlayerSeat::One, PlayerSeat::Two] {
            for _ in 0..20 {
                let card = catalog::instantiate(&"bonecrawler".into(), seat).unwrap();
                let id = a.spawn(card.clone());
                a.zones_mut(seat).deck.add(id);
                let id = b.spawn(card);
                b.zones_mut(seat).deck.add(id);
            }
        }
        a.shuffle_deck(PlayerSeat::One);
        b.shuffle_deck(PlayerSeat::One);
        assert_eq!(a.zones(PlayerSeat::One).deck.cards, b.zones(PlayerSeat::One).deck.cards);
    }

    #[test]
    fn test_destroy_buries_by_owner() {
        let mut game = GameState::new(0);
        let card = catalog::instantiate(&"bonecrawler".into(), PlayerSeat::Two).unwrap();
        let id = game.spawn(card);
        let pos = Pos::new(2, 2);
        game.board.place(pos, id);

        let destroyed = game.destroy_monster_at(pos).unwrap();
        assert_eq!(destroyed, Some(id));
        assert!(game.zones(PlayerSeat::Two).graveyard.contains(id));
        assert!(game.board.is_empty_tile(pos));
    }
}
