//! Per-player card zones (Deck, LandDeck, Hand, Graveyard)

use crate::core::{CardId, PlayerSeat};
use serde::{Deserialize, Serialize};

/// Zones a card can sit in when it is not on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Deck,
    LandDeck,
    Hand,
    Graveyard,
}

/// An ordered list of cards in one zone
///
/// Order matters everywhere: decks draw from the front, hands are addressed
/// by slot index over the wire, graveyards keep arrival order for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,
    pub owner: PlayerSeat,
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: PlayerSeat) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    /// Put a card at the front, where the next draw will find it
    pub fn add_to_front(&mut self, card_id: CardId) {
        self.cards.insert(0, card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // remove() rather than swap_remove(): slot indices are part of
            // the wire protocol, so ordering must stay stable.
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove by slot index, as addressed by client messages
    pub fn take_at(&mut self, slot: usize) -> Option<CardId> {
        if slot < self.cards.len() {
            Some(self.cards.remove(slot))
        } else {
            None
        }
    }

    pub fn get(&self, slot: usize) -> Option<CardId> {
        self.cards.get(slot).copied()
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw the front card (for decks)
    pub fn draw_front(&mut self) -> Option<CardId> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }
}

/// All zones belonging to one seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: CardZone,
    pub land_deck: CardZone,
    pub hand: CardZone,
    pub graveyard: CardZone,
}

impl PlayerZones {
    pub fn new(seat: PlayerSeat) -> Self {
        PlayerZones {
            deck: CardZone::new(Zone::Deck, seat),
            land_deck: CardZone::new(Zone::LandDeck, seat),
            hand: CardZone::new(Zone::Hand, seat),
            graveyard: CardZone::new(Zone::Graveyard, seat),
        }
    }

    pub fn get_zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Deck => &self.deck,
            Zone::LandDeck => &self.land_deck,
            Zone::Hand => &self.hand,
            Zone::Graveyard => &self.graveyard,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::LandDeck => &mut self.land_deck,
            Zone::Hand => &mut self.hand,
            Zone::Graveyard => &mut self.graveyard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_from_front() {
        let mut zone = CardZone::new(Zone::Deck, PlayerSeat::One);
        zone.add(CardId::new(1));
        zone.add(CardId::new(2));
        assert_eq!(zone.draw_front(), Some(CardId::new(1)));
        assert_eq!(zone.draw_front(), Some(CardId::new(2)));
        assert_eq!(zone.draw_front(), None);
    }

    #[test]
    fn test_front_insert_is_next_draw() {
        let mut zone = CardZone::new(Zone::LandDeck, PlayerSeat::Two);
        zone.add(CardId::new(10));
        zone.add_to_front(CardId::new(99));
        assert_eq!(zone.draw_front(), Some(CardId::new(99)));
    }

    #[test]
    fn test_slot_addressing_stays_stable() {
        let mut zone = CardZone::new(Zone::Hand, PlayerSeat::One);
        for i in 0..4 {
            zone.add(CardId::new(i));
        }
        assert_eq!(zone.take_at(1), Some(CardId::new(1)));
        // Remaining cards keep their relative order
        assert_eq!(zone.get(0), Some(CardId::new(0)));
        assert_eq!(zone.get(1), Some(CardId::new(2)));
        assert_eq!(zone.take_at(5), None);
    }

    #[test]
    fn test_remove_by_id() {
        let mut zone = CardZone::new(Zone::Graveyard, PlayerSeat::One);
        zone.add(CardId::new(7));
        assert!(zone.remove(CardId::new(7)));
        assert!(!zone.remove(CardId::new(7)));
        assert!(zone.is_empty());
    }
}
