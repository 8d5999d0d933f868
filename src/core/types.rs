//! Strongly-typed wrappers for game concepts
//!
//! Newtypes keep template ids, card names and player seats from being mixed
//! up as bare strings, and give the wire format stable representations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two player seats in a game.
///
/// Serialized as `"1"` / `"2"` to match the client protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSeat {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl PlayerSeat {
    pub fn opponent(self) -> PlayerSeat {
        match self {
            PlayerSeat::One => PlayerSeat::Two,
            PlayerSeat::Two => PlayerSeat::One,
        }
    }

    /// Row on the monster board where this seat summons, which is also its
    /// back row for direct attacks. Seat One plays from the high-index edge
    /// toward row 0; seat Two is the mirror.
    pub fn summon_row(self) -> u8 {
        match self {
            PlayerSeat::One => (crate::board::BOARD_SIZE - 1) as u8,
            PlayerSeat::Two => 0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerSeat::One => 0,
            PlayerSeat::Two => 1,
        }
    }
}

impl fmt::Display for PlayerSeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSeat::One => write!(f, "1"),
            PlayerSeat::Two => write!(f, "2"),
        }
    }
}

/// A pair of values, one per seat.
///
/// Serializes as a `{"1": .., "2": ..}` map, the shape the client protocol
/// uses for mana balances, graveyards and deck sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BySeat<T> {
    #[serde(rename = "1")]
    pub one: T,
    #[serde(rename = "2")]
    pub two: T,
}

impl<T> BySeat<T> {
    pub fn new(one: T, two: T) -> Self {
        BySeat { one, two }
    }

    pub fn get(&self, seat: PlayerSeat) -> &T {
        match seat {
            PlayerSeat::One => &self.one,
            PlayerSeat::Two => &self.two,
        }
    }

    pub fn get_mut(&mut self, seat: PlayerSeat) -> &mut T {
        match seat {
            PlayerSeat::One => &mut self.one,
            PlayerSeat::Two => &mut self.two,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> BySeat<U> {
        BySeat {
            one: f(&self.one),
            two: f(&self.two),
        }
    }
}

/// Canonical snake_case id shared by every copy of a card template
/// (e.g. `"bonecrawler"`), distinct from per-instance [`CardId`]s.
///
/// [`CardId`]: crate::core::CardId
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(s: impl Into<String>) -> Self {
        TemplateId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        TemplateId(s.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        TemplateId(s)
    }
}

/// Display name of a card (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

/// Color-style tag used for free-activation matching and card synergies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Walker,
    Sentinel,
    Aggressor,
    Breaker,
    Manipulator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Walker => "walker",
            Role::Sentinel => "sentinel",
            Role::Aggressor => "aggressor",
            Role::Breaker => "breaker",
            Role::Manipulator => "manipulator",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_opponent() {
        assert_eq!(PlayerSeat::One.opponent(), PlayerSeat::Two);
        assert_eq!(PlayerSeat::Two.opponent(), PlayerSeat::One);
    }

    #[test]
    fn test_seat_serialization() {
        assert_eq!(serde_json::to_string(&PlayerSeat::One).unwrap(), "\"1\"");
        assert_eq!(serde_json::to_string(&PlayerSeat::Two).unwrap(), "\"2\"");
    }

    #[test]
    fn test_by_seat_map_shape() {
        let mana = BySeat::new(50, 42);
        let json = serde_json::to_string(&mana).unwrap();
        assert_eq!(json, "{\"1\":50,\"2\":42}");
        assert_eq!(*mana.get(PlayerSeat::Two), 42);
    }

    #[test]
    fn test_template_id() {
        let id = TemplateId::new("bonecrawler");
        assert_eq!(id.as_str(), "bonecrawler");
        assert_eq!(id.to_string(), "bonecrawler");
    }
}
