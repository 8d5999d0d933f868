//! Card instance ids and central card storage

use crate::EngineError;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer id for a card instance
///
/// Ids stay stable for the lifetime of a game; cards move between zones and
/// the boards but are never reallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Central storage for all card instances in a game
///
/// Zones and boards hold [`CardId`]s; this store owns the cards themselves.
/// Uses FxHashMap for fast hashing of integer keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore<T> {
    entities: FxHashMap<CardId, T>,
    next_id: u32,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            entities: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Generate a new unique CardId
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, id: CardId, entity: T) {
        self.entities.insert(id, entity);
    }

    pub fn get(&self, id: CardId) -> Result<&T> {
        self.entities
            .get(&id)
            .ok_or(EngineError::CardNotFound(id.as_u32()))
    }

    pub fn get_mut(&mut self, id: CardId) -> Result<&mut T> {
        self.entities
            .get_mut(&id)
            .ok_or(EngineError::CardNotFound(id.as_u32()))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &T)> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_store() {
        let mut store: EntityStore<String> = EntityStore::new();
        let id1 = store.next_id();
        let id2 = store.next_id();

        assert_eq!(id1.as_u32(), 0);
        assert_eq!(id2.as_u32(), 1);

        store.insert(id1, "first".to_string());
        store.insert(id2, "second".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id1).unwrap(), "first");
        assert_eq!(store.get(id2).unwrap(), "second");
        assert!(store.get(CardId::new(999)).is_err());
    }

    #[test]
    fn test_missing_card_is_loud() {
        let store: EntityStore<u8> = EntityStore::new();
        match store.get(CardId::new(7)) {
            Err(EngineError::CardNotFound(7)) => {}
            other => panic!("expected CardNotFound, got {other:?}"),
        }
    }
}
