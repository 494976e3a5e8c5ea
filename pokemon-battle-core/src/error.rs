use crate::sim::battle::{Phase, Side};
use crate::sim::pokemon::Mechanic;
use thiserror::Error;

/// Rejected actions. Raised before the state is touched.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BattleError {
    #[error("action not allowed during the {phase:?} phase")]
    WrongPhase { phase: Phase },
    #[error("{side:?} has no move in slot {index}")]
    MoveOutOfRange { side: Side, index: usize },
    #[error("{side:?}'s move in slot {index} has no PP left")]
    NoPpLeft { side: Side, index: usize },
    #[error("{side:?} is locked into the move in slot {locked}")]
    ChoiceLocked { side: Side, locked: usize },
    #[error("{side:?} has no team member in slot {index}")]
    SwitchOutOfRange { side: Side, index: usize },
    #[error("{side:?}'s team member in slot {index} is already active")]
    SwitchToActive { side: Side, index: usize },
    #[error("{side:?}'s team member in slot {index} has fainted")]
    SwitchTargetFainted { side: Side, index: usize },
    #[error("{side:?}'s active combatant is trapped")]
    Trapped { side: Side },
    #[error("{side:?} cannot use {mechanic:?}: {reason}")]
    TransformationUnavailable {
        side: Side,
        mechanic: Mechanic,
        reason: &'static str,
    },
    #[error("{side:?} has no healthy team member to send out")]
    NoHealthyMembers { side: Side },
    #[error("{side:?} has no forced switch pending")]
    NoForcedSwitchPending { side: Side },
}
