use thiserror::Error;

use ph_combat::CombatError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

/// Why a task gave up.  The task runner switches to the schedule's fail
/// schedule when one is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskFailure {
    #[error("no enemy")]
    NoEnemy,
    #[error("no route")]
    NoRoute,
    #[error("no target")]
    NoTarget,
    #[error("no position with a clear shot")]
    NoShoot,
}

impl TaskFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskFailure::NoEnemy  => "no_enemy",
            TaskFailure::NoRoute  => "no_route",
            TaskFailure::NoTarget => "no_target",
            TaskFailure::NoShoot  => "no_shoot",
        }
    }
}
