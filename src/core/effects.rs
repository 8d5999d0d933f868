//! Effect and interaction-step vocabulary
//!
//! Every card behavior in the base set is expressed through the closed enums
//! here. New cards register data in the catalog instead of defining new types,
//! so the interpreter in `game::interaction` stays the single place where
//! effects touch game state.

use crate::board::Pos;
use crate::core::entity::CardId;
use crate::core::types::PlayerSeat;
use serde::{Deserialize, Serialize};

/// Whole-board effect that resolves without further input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstantEffect {
    /// All enemy monsters lose this much defense; those at 0 or below die
    WeakenAllEnemyDefense(i32),
    /// All allied monsters gain this much defense
    RaiseAllAlliedDefense(i32),
    /// Draw this many cards from the main deck
    DrawCards(u8),
    /// Every monster on the board goes to its owner's graveyard
    DestroyAllMonsters,
    /// All enemy monsters lose this much attack
    WeakenAllEnemyAttack(i32),
}

/// Effect that needs one board tile chosen after activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetedEffect {
    /// Destroy the chosen enemy monster
    DestroyEnemy,
    /// Any monster gains attack
    RaiseAttack(i32),
    /// Any monster loses defense; at 0 or below it dies
    WeakenDefense(i32),
    /// The chosen enemy monster changes owner
    SeizeControl,
    /// Double the chosen monster's attack and defense
    DoubleStats,
}

impl TargetedEffect {
    /// Whether only opposing monsters are legal targets
    pub fn enemy_only(&self) -> bool {
        matches!(self, TargetedEffect::DestroyEnemy | TargetedEffect::SeizeControl)
    }
}

/// Which deck cards a tutor effect may fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorFilter {
    /// Monsters whose current attack is at most this value
    MonsterWithMaxAttack(i32),
    AnySorcery,
    /// Fetched lands go to the front of the land deck, not the hand
    AnyLand,
}

/// Named multi-step scripts; each expands to a fixed step list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    /// Discard a card, destroy an enemy monster, then revive one of your own
    /// graveyard monsters onto the freed tile.
    RiteOfTheFallen,
}

/// What a sorcery does when it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SorceryEffect {
    Instant(InstantEffect),
    Targeted(TargetedEffect),
    Tutor(TutorFilter),
    Scripted(ScriptKind),
}

/// Passive behavior of a land tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandBehavior {
    /// Enemy monsters entering lose this much defense; fatal at 0 or below
    BurnOnEnter(i32),
    /// Allied monsters standing here gain defense at their owner's turn start
    HealOnTurnStart(i32),
    /// Enemy monsters may not enter or pass over this tile
    BlockEnemies,
    /// Enemy monsters entering lose this much attack
    WeakenAttackOnEnter(i32),
    /// Enemy monsters entering or passing over lose this much attack and defense
    DrainOnContact(i32),
    /// Enemy monsters with both stats above the threshold may not enter or pass
    BlockStrongEnemies(i32),
}

impl LandBehavior {
    /// Whether this land stops `attack`/`defense` monsters of the other seat
    pub fn blocks(&self, attack: i32, defense: i32) -> bool {
        match self {
            LandBehavior::BlockEnemies => true,
            LandBehavior::BlockStrongEnemies(t) => attack > *t && defense > *t,
            _ => false,
        }
    }
}

/// Whose perspective a step's choice is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerScope {
    /// The player who started the interaction
    Actor,
    /// That player's opponent
    Opponent,
    /// Either seat
    Either,
}

impl OwnerScope {
    pub fn admits(&self, actor: PlayerSeat, owner: PlayerSeat) -> bool {
        match self {
            OwnerScope::Actor => owner == actor,
            OwnerScope::Opponent => owner == actor.opponent(),
            OwnerScope::Either => true,
        }
    }
}

/// Card-kind restriction on a card-choosing step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFilter {
    Monsters,
    Sorceries,
    Lands,
    Any,
}

/// Slot names for values bound by earlier steps and consumed by later ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKey {
    Discard,
    Target,
    Revived,
    Pick,
}

/// A value recorded by a completed step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Pos(Pos),
    Card(CardId),
}

/// Board mutation executed by an [`StepSpec::ApplyEffect`] step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectOp {
    /// Run an instant effect immediately
    Instant(InstantEffect),
    /// Run a targeted effect at the position bound under `target`
    ResolveTarget { effect: TargetedEffect, target: BindingKey },
    /// Move the card bound under `pick` out of the deck per the filter's rule
    ResolveTutor { filter: TutorFilter, pick: BindingKey },
    /// Destroy the monster at the bound position
    DestroyBound { target: BindingKey },
    /// Place the bound graveyard card onto the bound position
    ReviveBound { card: BindingKey, at: BindingKey },
}

/// One step of a pending interaction
///
/// Input-consuming steps wait for a client payload; `ApplyEffect` steps run
/// as soon as the cursor reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepSpec {
    /// Deduct mana from the actor, or nothing when the activation was free
    PayCost,
    /// The scoped player discards a hand card; records it under `bind`
    DiscardFromHand { scope: OwnerScope, bind: BindingKey },
    /// Choose an occupied monster-board tile; records it under `bind`
    SelectBoardTarget { scope: OwnerScope, bind: BindingKey },
    /// Choose a land-board tile
    SelectLandTarget { scope: OwnerScope, bind: BindingKey },
    /// Choose a card from the scoped player's graveyard
    SelectGraveyardCard { scope: OwnerScope, filter: CardFilter, bind: BindingKey },
    /// Choose a card from the scoped player's deck
    SelectDeckCard { scope: OwnerScope, filter: CardFilter, bind: BindingKey },
    /// Run an effect using bindings recorded so far
    ApplyEffect(EffectOp),
}

impl StepSpec {
    /// Steps that wait for client input before the cursor can advance
    pub fn wants_input(&self) -> bool {
        !matches!(self, StepSpec::PayCost | StepSpec::ApplyEffect(_))
    }
}
