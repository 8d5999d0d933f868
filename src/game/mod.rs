//! Game state and rules engine

pub mod actions;
pub mod adjacency;
pub mod interaction;
pub mod logger;
pub mod movement;
pub mod snapshot;
pub mod state;
pub mod turn;

pub use actions::{AttackReport, TurnEnd};
pub use adjacency::ActivationScore;
pub use interaction::{
    AwaitingInput, ChoiceHint, PendingInteraction, SorceryProgress, StepInput,
};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use snapshot::{CardView, InteractionView, Snapshot};
pub use state::{GameState, OPENING_HAND, STARTING_MANA};
pub use turn::{TurnFlags, TurnState, CENTER_CONTROL_TARGET, HAND_LIMIT, MAX_MOVES_PER_TURN};
