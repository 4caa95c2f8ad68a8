//! `ph-sim` — tick loop orchestrator for packhound.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Sync      — mirror agent bodies into the EntityIndex.
//!   ② Think     — Npc::think for each live hound.
//!   ③ Perceive  — rebuild conditions, enemy, and combat state.
//!   ④ Select    — Npc::select_schedule for hounds that need a schedule
//!                 (parallel with the `parallel` feature).
//!   ⑤ Apply     — for each decision in ascending AgentId order:
//!                   translate + begin_schedule
//!                   EmitSound / SetSoundWait / SetNextAttack / SetCollisionGroup
//!                   Broadcast(kind)  → handle_interaction on squad mates
//!   ⑥ Tasks     — start or run the current task; fall back on failure.
//!   ⑦ Animate   — step one-shot clips, fire animation events.
//!   ⑧ Move      — follow paths, integrate hops under gravity.
//!   ⑨ Settle    — apply damage and knockback gathered during the tick.
//! ```
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | `builder`  | `SimBuilder` — validation and defaults                |
//! | `sim`      | `Sim` and the tick loop                               |
//! | `tasks`    | Generic task execution for tasks the policy declines  |
//! | `anim`     | One-shot clip playback and event timing               |
//! | `observer` | `SimObserver`, `TickSummary`, `ScheduleChange`        |
//! | `error`    | `SimError`, `SimResult`                               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the selection phase on Rayon's thread pool.       |
//! | `fx-hash`  | FxHash for the entity → agent lookup.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ph_agent::AgentStoreBuilder;
//! use ph_behavior::AlphaHound;
//! use ph_core::SimConfig;
//! use ph_sim::{NoopObserver, SimBuilder};
//! use ph_spatial::StraightLineNavigator;
//!
//! let (store, rngs) = AgentStoreBuilder::new(3, 42).build();
//! let mut sim = SimBuilder::new(config, store, rngs, AlphaHound::default(), StraightLineNavigator)
//!     .world(world)
//!     .squads(squads)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod anim;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
mod sink;
mod tasks;


pub use anim::{clip, Clip};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ScheduleChange, SimObserver, TickSummary};
pub use sim::Sim;
pub use tasks::COVER_DISTANCE;
