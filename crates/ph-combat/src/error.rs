use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombatError {
    #[error("invalid sonic attack config: {0}")]
    InvalidConfig(String),
}

pub type CombatResult<T> = Result<T, CombatError>;
