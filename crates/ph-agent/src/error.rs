//! Agent-storage error type.

use thiserror::Error;

use ph_core::{AgentId, SquadHandle};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} is out of range")]
    AgentNotFound(AgentId),

    #[error("squad {0} no longer exists")]
    StaleSquad(SquadHandle),

    #[error("agent {agent} already belongs to squad {squad}")]
    AlreadyInSquad { agent: AgentId, squad: SquadHandle },
}

pub type AgentResult<T> = Result<T, AgentError>;
