//! Core data types shared across the engine

pub mod card;
pub mod direction;
pub mod effects;
pub mod entity;
pub mod types;

pub use card::{Card, CardKind, LandSpec, MonsterState, MoveRange, MovementTable, SorcerySpec};
pub use direction::Direction;
pub use effects::{
    Binding, BindingKey, CardFilter, EffectOp, InstantEffect, LandBehavior, OwnerScope,
    ScriptKind, SorceryEffect, StepSpec, TargetedEffect, TutorFilter,
};
pub use entity::{CardId, EntityStore};
pub use types::{BySeat, CardName, PlayerSeat, Role, TemplateId};
