//! `ph-agent` — Structure-of-Arrays creature storage for `packhound`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `NpcState`, `CollisionGroup`                               |
//! | [`store`]     | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)     |
//! | [`squad`]     | `SquadRegistry`, `Squad` (generational arena)              |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction + spawn defaults) |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.    |

pub mod builder;
pub mod error;
pub mod squad;
pub mod state;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use squad::{Squad, SquadRegistry};
pub use state::{CollisionGroup, NpcState};
pub use store::{AgentRngs, AgentStore};
