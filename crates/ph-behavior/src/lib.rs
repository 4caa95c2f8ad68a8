//! `ph-behavior` — the alpha hound's decision policy.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`policy`]     | Hook traits (`ScheduleSelector`, `TaskHandler`, …), `Npc`, `DefaultPolicy` |
//! | [`alpha`]      | `AlphaHound`: schedule selection and squad interactions          |
//! | [`perception`] | Enemy acquisition and condition gathering                        |
//! | [`tasks`]      | Custom task start/run, `TaskOutcome`                             |
//! | [`anim`]       | `AnimEvent` codes and their handlers (blast, hop, leap)          |
//! | [`think`]      | Think hooks, `range_attack_condition`, yaw speeds, activity rules|
//! | [`voice`]      | Sound cues, `SoundInterest`, `beam_color`                        |
//! | [`intent`]     | `Decision`, `Intent`, `Interaction`, `InteractionKind`           |
//! | [`context`]    | `SelectContext` (read-only) and `ActionContext` (mutable)        |
//! | [`config`]     | `HoundConfig`                                                    |
//! | [`error`]      | `BehaviorError`, `TaskFailure`                                   |
//!
//! # Design notes
//!
//! Selection is split from its side effects.  `select_schedule` sees only a
//! [`SelectContext`] and returns a [`Decision`] whose [`Intent`]s the sim
//! applies afterwards, so the selection phase can run in parallel.  Squad
//! broadcasts become conditions on the recipients and are acted on in
//! their next selection, never re-entrantly.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config and events.|

pub mod alpha;
pub mod anim;
pub mod config;
pub mod context;
pub mod error;
pub mod intent;
pub mod perception;
pub mod policy;
pub mod tasks;
pub mod think;
pub mod voice;


pub use alpha::AlphaHound;
pub use anim::AnimEvent;
pub use config::HoundConfig;
pub use context::{live_squad, ActionContext, SelectContext};
pub use error::{BehaviorError, BehaviorResult, TaskFailure};
pub use intent::{Decision, Intent, Interaction, InteractionKind};
pub use policy::{
    AnimEventHandler, BasePolicy, DefaultPolicy, InteractionHandler, Npc, Percept, Perception,
    ScheduleSelector, TaskHandler, ThinkHandler, VoiceHandler,
};
pub use tasks::TaskOutcome;
pub use think::{max_yaw_speed, range_attack_condition, translate_activity};
pub use voice::{beam_color, BeamColor, SoundInterest};
