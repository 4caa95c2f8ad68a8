//! Spatial-subsystem error type.

use thiserror::Error;

use ph_core::EntityId;

/// Errors produced by `ph-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("entity {0} not found in world index")]
    EntityNotFound(EntityId),

    #[error("entity {id} has inverted hull bounds")]
    InvalidBounds { id: EntityId },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
