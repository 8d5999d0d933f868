//! Gridspell - a two-player tactical card battler engine
//!
//! Rules engine for a board game played on a 6x6 monster grid layered over
//! a 7x7 land grid. Players summon monsters from hand, move and fight,
//! place lands whose auras feed adjacent plays, and cast sorceries that
//! may pause the game for further choices. Win by draining the opponent's
//! mana or by holding the center tiles long enough.
//!
//! The crate splits into the pure engine ([`game`], [`core`], [`board`],
//! [`zones`]), the card catalog ([`catalog`]), and the multiplayer shell
//! ([`protocol`], [`room`]).

pub mod board;
pub mod catalog;
pub mod core;
pub mod error;
pub mod game;
pub mod protocol;
pub mod room;
pub mod zones;

pub use error::{EngineError, Result};
