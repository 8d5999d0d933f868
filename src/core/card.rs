//! Card representation
//!
//! A card is a template id plus per-instance state. The three kinds are a
//! closed enum rather than a class hierarchy: match on [`CardKind`] at the
//! call site instead of downcasting.

use crate::core::direction::Direction;
use crate::core::effects::{LandBehavior, SorceryEffect};
use crate::core::types::{CardName, PlayerSeat, Role, TemplateId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// How far a monster may travel along one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveRange {
    /// Up to this many tiles
    Steps(u8),
    /// The whole line, like a rook or bishop ray
    Any,
}

impl MoveRange {
    pub fn allows(&self, steps: u8) -> bool {
        match self {
            MoveRange::Steps(n) => steps <= *n,
            MoveRange::Any => true,
        }
    }
}

/// Per-direction movement allowance, authored in the owner's frame
///
/// Eight directions at most, so a SmallVec keeps the table inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MovementTable(pub SmallVec<[(Direction, MoveRange); 8]>);

impl MovementTable {
    pub fn new(entries: &[(Direction, MoveRange)]) -> Self {
        MovementTable(entries.iter().copied().collect())
    }

    pub fn range(&self, dir: Direction) -> Option<MoveRange> {
        self.0.iter().find(|(d, _)| *d == dir).map(|(_, r)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, MoveRange)> + '_ {
        self.0.iter().copied()
    }
}

/// Mutable combat state of a monster instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterState {
    pub attack: i32,
    pub defense: i32,
    /// Printed values, kept for snapshots and stat resets
    pub base_attack: i32,
    pub base_defense: i32,
    pub movement: MovementTable,
}

impl MonsterState {
    pub fn new(attack: i32, defense: i32, movement: MovementTable) -> Self {
        MonsterState {
            attack,
            defense,
            base_attack: attack,
            base_defense: defense,
            movement,
        }
    }
}

/// Static description of a sorcery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorcerySpec {
    pub effect: SorceryEffect,
    /// Directions that must be satisfied around the chosen tile
    pub activation_needs: SmallVec<[Direction; 4]>,
    pub text: String,
}

/// Static description of a land
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandSpec {
    pub behavior: LandBehavior,
    /// Directions that must be satisfied around the placement tile
    ///
    /// These double as the land's outgoing support directions when other
    /// cards check their own needs against it.
    pub creation_needs: SmallVec<[Direction; 4]>,
    pub text: String,
}

/// Kind-specific payload of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardKind {
    Monster(MonsterState),
    Sorcery(SorcerySpec),
    Land(LandSpec),
}

impl CardKind {
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Monster(_) => "monster",
            CardKind::Sorcery(_) => "sorcery",
            CardKind::Land(_) => "land",
        }
    }
}

/// A single card instance owned by one seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub template: TemplateId,
    pub name: CardName,
    pub owner: PlayerSeat,
    pub role: Role,
    /// Mana cost to play; also the damage dealt on a direct attack
    pub mana: i32,
    pub kind: CardKind,
}

impl Card {
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster(_))
    }

    pub fn is_sorcery(&self) -> bool {
        matches!(self.kind, CardKind::Sorcery(_))
    }

    pub fn is_land(&self) -> bool {
        matches!(self.kind, CardKind::Land(_))
    }

    pub fn monster(&self) -> Option<&MonsterState> {
        match &self.kind {
            CardKind::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn monster_mut(&mut self) -> Option<&mut MonsterState> {
        match &mut self.kind {
            CardKind::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn sorcery(&self) -> Option<&SorcerySpec> {
        match &self.kind {
            CardKind::Sorcery(s) => Some(s),
            _ => None,
        }
    }

    pub fn land(&self) -> Option<&LandSpec> {
        match &self.kind {
            CardKind::Land(l) => Some(l),
            _ => None,
        }
    }

    /// Directions this card demands satisfied when played onto a tile
    pub fn needs(&self) -> &[Direction] {
        match &self.kind {
            CardKind::Sorcery(s) => &s.activation_needs,
            CardKind::Land(l) => &l.creation_needs,
            CardKind::Monster(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_range_allows() {
        assert!(MoveRange::Steps(2).allows(1));
        assert!(MoveRange::Steps(2).allows(2));
        assert!(!MoveRange::Steps(2).allows(3));
        assert!(MoveRange::Any.allows(5));
    }

    #[test]
    fn test_card_kind_round_trips_through_json() {
        let kind = CardKind::Sorcery(SorcerySpec {
            effect: crate::core::SorceryEffect::Instant(crate::core::InstantEffect::DrawCards(2)),
            activation_needs: [Direction::Back].into_iter().collect(),
            text: "Draw 2 cards.".to_string(),
        });
        let json = serde_json::to_string(&kind).unwrap();
        let back: CardKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_movement_table_lookup() {
        let table = MovementTable::new(&[
            (Direction::Forward, MoveRange::Steps(1)),
            (Direction::Back, MoveRange::Any),
        ]);
        assert_eq!(table.range(Direction::Forward), Some(MoveRange::Steps(1)));
        assert_eq!(table.range(Direction::Back), Some(MoveRange::Any));
        assert_eq!(table.range(Direction::Left), None);
    }
}
