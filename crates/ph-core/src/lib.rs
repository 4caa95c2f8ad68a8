//! `ph-core` — foundational types for the `packhound` creature AI.
//!
//! This crate is a dependency of every other `ph-*` crate.  It intentionally
//! has no `ph-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `EntityId`, `SquadHandle`, `EffectHandle`  |
//! | [`math`]        | `Vec3`, `Angles`, `Aabb`                              |
//! | [`time`]        | `Tick`, `SimTime`, `SimClock`, `SimConfig`            |
//! | [`rng`]         | `RandomSource`, `AgentRng`, `ScriptedRng`             |
//! | [`condition`]   | `Condition`, `ConditionSet`                           |
//! | [`class`]       | `EntityClass` relationship classes                    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod class;
pub mod condition;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::EntityClass;
pub use condition::{Condition, ConditionSet};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, EffectHandle, EntityId, SquadHandle};
pub use math::{Aabb, Angles, Vec3};
pub use rng::{AgentRng, RandomSource, ScriptedRng};
pub use time::{SimClock, SimConfig, SimTime, Tick};
