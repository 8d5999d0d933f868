//! Deck submissions, validation, and game setup

use crate::catalog::{self, TemplateKind};
use crate::core::{PlayerSeat, TemplateId};
use crate::game::state::OPENING_HAND;
use crate::game::GameState;
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Main deck card cap
pub const MAIN_DECK_SIZE: usize = 40;
/// Land deck card cap
pub const LAND_DECK_SIZE: usize = 15;
/// Copies of one template allowed per deck
pub const MAX_COPIES: u32 = 3;

/// One line of a deck list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRow {
    pub card_id: TemplateId,
    pub qty: u32,
}

/// A player's submitted deck: main pile plus land pile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSubmission {
    pub main: Vec<DeckRow>,
    pub lands: Vec<DeckRow>,
}

impl DeckSubmission {
    /// Strict validation: unknown ids, copy caps, kind mismatches and
    /// oversize piles are all rejected
    pub fn validate(&self) -> Result<()> {
        let mut copies: FxHashMap<&str, u32> = FxHashMap::default();
        let mut main_total = 0u32;
        for row in &self.main {
            let template = catalog::find(&row.card_id).ok_or_else(|| {
                EngineError::InvalidDeck(format!("unknown card: {}", row.card_id))
            })?;
            if matches!(template.kind, TemplateKind::Land { .. }) {
                return Err(EngineError::InvalidDeck(format!(
                    "{} is a land and belongs in the land pile",
                    row.card_id
                )));
            }
            if row.qty == 0 {
                return Err(EngineError::InvalidDeck(format!(
                    "zero copies of {}",
                    row.card_id
                )));
            }
            let count = copies.entry(template.id).or_insert(0);
            *count += row.qty;
            if *count > MAX_COPIES {
                return Err(EngineError::InvalidDeck(format!(
                    "more than {MAX_COPIES} copies of {}",
                    row.card_id
                )));
            }
            main_total += row.qty;
        }
        if main_total as usize > MAIN_DECK_SIZE {
            return Err(EngineError::InvalidDeck(format!(
                "main deck has {main_total} cards, cap is {MAIN_DECK_SIZE}"
            )));
        }

        let mut land_copies: FxHashMap<&str, u32> = FxHashMap::default();
        let mut land_total = 0u32;
        for row in &self.lands {
            let template = catalog::find(&row.card_id).ok_or_else(|| {
                EngineError::InvalidDeck(format!("unknown card: {}", row.card_id))
            })?;
            if !matches!(template.kind, TemplateKind::Land { .. }) {
                return Err(EngineError::InvalidDeck(format!(
                    "{} is not a land",
                    row.card_id
                )));
            }
            if row.qty == 0 {
                return Err(EngineError::InvalidDeck(format!(
                    "zero copies of {}",
                    row.card_id
                )));
            }
            let count = land_copies.entry(template.id).or_insert(0);
            *count += row.qty;
            if *count > MAX_COPIES {
                return Err(EngineError::InvalidDeck(format!(
                    "more than {MAX_COPIES} copies of {}",
                    row.card_id
                )));
            }
            land_total += row.qty;
        }
        if land_total as usize > LAND_DECK_SIZE {
            return Err(EngineError::InvalidDeck(format!(
                "land deck has {land_total} cards, cap is {LAND_DECK_SIZE}"
            )));
        }

        Ok(())
    }

    /// Deterministic default deck: up to three copies of each template, in
    /// registry order, until the piles are full
    pub fn default_decks() -> Self {
        let mut main = Vec::new();
        let mut lands = Vec::new();
        let mut main_total = 0usize;
        let mut land_total = 0usize;
        for template in catalog::BASE_SET {
            if matches!(template.kind, TemplateKind::Land { .. }) {
                let take = (MAX_COPIES as usize).min(LAND_DECK_SIZE - land_total);
                if take > 0 {
                    lands.push(DeckRow {
                        card_id: TemplateId::new(template.id),
                        qty: take as u32,
                    });
                    land_total += take;
                }
            } else {
                let take = (MAX_COPIES as usize).min(MAIN_DECK_SIZE - main_total);
                if take > 0 {
                    main.push(DeckRow {
                        card_id: TemplateId::new(template.id),
                        qty: take as u32,
                    });
                    main_total += take;
                }
            }
        }
        DeckSubmission { main, lands }
    }
}

/// Fill a seat's decks from a submission
///
/// Unlike [`DeckSubmission::validate`], building is lenient about unknown
/// ids: they are skipped with a diagnostic so a stale deck list does not
/// brick the room. Everything else still applies.
pub fn build_decks(game: &mut GameState, seat: PlayerSeat, submission: &DeckSubmission) {
    for row in &submission.main {
        let Some(template) = catalog::find(&row.card_id) else {
            game.logger
                .minimal(&format!("skipping unknown card {}", row.card_id));
            continue;
        };
        for _ in 0..row.qty.min(MAX_COPIES) {
            let card = catalog::from_template(template, seat);
            let id = game.spawn(card);
            game.zones_mut(seat).deck.add(id);
        }
    }
    for row in &submission.lands {
        let Some(template) = catalog::find(&row.card_id) else {
            game.logger
                .minimal(&format!("skipping unknown card {}", row.card_id));
            continue;
        };
        for _ in 0..row.qty.min(MAX_COPIES) {
            let card = catalog::from_template(template, seat);
            let id = game.spawn(card);
            game.zones_mut(seat).land_deck.add(id);
        }
    }
}

/// Shuffle both main decks and deal opening hands
pub fn start_game(game: &mut GameState) {
    for seat in [PlayerSeat::One, PlayerSeat::Two] {
        game.shuffle_deck(seat);
        for _ in 0..OPENING_HAND {
            game.draw_card(seat);
        }
    }
}
