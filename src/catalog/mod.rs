//! Static card registry and deck construction

pub mod deck;
pub mod sets;

pub use deck::{
    build_decks, start_game, DeckRow, DeckSubmission, LAND_DECK_SIZE, MAIN_DECK_SIZE, MAX_COPIES,
};
pub use sets::{CardTemplate, TemplateKind, BASE_SET};

use crate::core::{
    Card, CardKind, LandSpec, MonsterState, MovementTable, PlayerSeat, SorcerySpec, TemplateId,
};
use crate::{EngineError, Result};

/// Canonical form of a card name: lowercase, apostrophes dropped, runs of
/// punctuation and whitespace collapsed to single underscores
pub fn canonical_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_sep = true;
    for c in name.chars() {
        if c == '\'' {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_sep = false;
        } else if !last_sep {
            out.push('_');
            last_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Look up a template by its canonical id
pub fn find(id: &TemplateId) -> Option<&'static CardTemplate> {
    BASE_SET.iter().find(|t| t.id == id.as_str())
}

/// All template ids in the set, in registry order
pub fn all_ids() -> impl Iterator<Item = TemplateId> {
    BASE_SET.iter().map(|t| TemplateId::new(t.id))
}

/// Build a fresh card instance of a template for a seat
pub fn instantiate(id: &TemplateId, owner: PlayerSeat) -> Result<Card> {
    let template = find(id)
        .ok_or_else(|| EngineError::InvalidDeck(format!("unknown card template: {id}")))?;
    Ok(from_template(template, owner))
}

/// Build a card instance from a template reference
pub fn from_template(template: &CardTemplate, owner: PlayerSeat) -> Card {
    let kind = match template.kind {
        TemplateKind::Monster {
            attack,
            defense,
            movement,
        } => CardKind::Monster(MonsterState::new(
            attack,
            defense,
            MovementTable::new(movement),
        )),
        TemplateKind::Sorcery { effect, needs, text } => CardKind::Sorcery(SorcerySpec {
            effect,
            activation_needs: needs.iter().copied().collect(),
            text: text.to_string(),
        }),
        TemplateKind::Land { behavior, needs, text } => CardKind::Land(LandSpec {
            behavior,
            creation_needs: needs.iter().copied().collect(),
            text: text.to_string(),
        }),
    };
    Card {
        template: TemplateId::new(template.id),
        name: template.name.into(),
        owner,
        role: template.role,
        mana: template.mana,
        kind,
    }
}
