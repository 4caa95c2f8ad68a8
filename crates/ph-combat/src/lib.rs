//! `ph-combat` — the alpha hound's sonic blast and jump kinematics.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`effect`] | `EffectSink` trait, `DamageInfo`, `SoundCue`, `RecordingSink`   |
//! | [`sonic`]  | `SonicAttack` resolver, `Attacker`, `SonicReport`, `SkipReason` |
//! | [`leap`]   | `hop_back_velocity`, `leap_velocity`                            |
//! | [`error`]  | `CombatError`, `CombatResult<T>`                                |
//!
//! # Blast model (summary)
//!
//! Every entity within the blast radius gets one multiplier:
//!
//! ```text
//! adjuster = (1 - dist / R_max)            falloff
//!          × dot(forward, dir)             frontal arc, < 0 → skipped
//!          × 0.5 if occluded player        (occluded non-breakables skipped)
//!          × 1 + (squad_size - 1) × 0.25   pack bonus
//! ```
//!
//! Damage, player knock-back, and physics impulses all scale by `adjuster`.

pub mod effect;
pub mod error;
pub mod leap;
pub mod sonic;

#[cfg(test)]
mod tests;

pub use effect::{
    AppliedEffect, DamageInfo, DamageKind, EffectSink, NullSink, ParticleEffect, RecordingSink,
    SoundCue,
};
pub use error::{CombatError, CombatResult};
pub use leap::{hop_back_velocity, leap_velocity, LEAP_LIFT};
pub use sonic::{Adjustment, Attacker, SkipReason, SonicAttack, SonicHit, SonicReport};
