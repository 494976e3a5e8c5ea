//! Core rules engine for turn-based singles battles.
//!
//! The main entry point for step-based simulations is [`engine::BattleEngine`];
//! the free functions in [`sim::battle`] expose the same state machine over a
//! caller-owned [`sim::battle::BattleState`].

pub mod battle_logger;
pub mod data;
pub mod engine;
pub mod error;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::battle_logger::{BattleLogger, LogEntry, LogKind};
    pub use crate::data::moves::{MoveData, MoveDex};
    pub use crate::data::types::Type;
    pub use crate::engine::{BattleEngine, BattleOutcome, StepResult};
    pub use crate::error::BattleError;
    pub use crate::sim::ai::{BattleAI, Difficulty, RandomAI, ScoringAI};
    pub use crate::sim::battle::{BattleState, BattleTurnAction, Phase, Side};
    pub use crate::sim::{BattlePokemon, BattleTeam, Mechanic, PokemonSet};
}
