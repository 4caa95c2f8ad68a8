//! `ph-spatial` — world entities, spatial indexing, and navigation.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`world`]  | `WorldEntity`, `WorldQuery` trait                              |
//! | [`index`]  | `EntityIndex` (R-tree + occluders), `EntityIndexBuilder`       |
//! | [`nav`]    | `Navigator`, `Tactical`, `RadialGoal`, straight-line defaults |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod index;
pub mod nav;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use index::{EntityIndex, EntityIndexBuilder};
pub use nav::{NavPath, Navigator, RadialGoal, RingLosFinder, StraightLineNavigator, Tactical};
pub use world::{WorldEntity, WorldQuery};
