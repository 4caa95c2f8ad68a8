//! `ScheduleTranslator` — hook mapping generic schedules to creature-specific
//! ones.
//!
//! The sim translates every selected schedule (and every fail or chained
//! schedule) before looking it up in the library.  Returning `Some` replaces
//! the requested ID; returning `None` keeps it.
//!
//! Translators compose: chain them with [`ChainedTranslator`] so an
//! application can layer its own overrides on top of [`HoundTranslation`].

use crate::ScheduleId;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Hook called whenever a schedule is about to start.
///
/// # Contract
///
/// - Must be pure: same input, same output.
/// - Implementations must be `Send + Sync` (shared across Rayon threads).
pub trait ScheduleTranslator: Send + Sync {
    /// Optionally replace `requested` with another schedule.
    fn translate(&self, requested: ScheduleId) -> Option<ScheduleId>;

    /// Translated ID, or `requested` unchanged.
    #[inline]
    fn resolve(&self, requested: ScheduleId) -> ScheduleId {
        self.translate(requested).unwrap_or(requested)
    }
}

// ── No-op ─────────────────────────────────────────────────────────────────────

/// A translator that never changes the requested schedule.
pub struct NoTranslation;

impl ScheduleTranslator for NoTranslation {
    #[inline]
    fn translate(&self, _requested: ScheduleId) -> Option<ScheduleId> {
        None
    }
}

// ── Alpha hound ───────────────────────────────────────────────────────────────

/// The alpha hound's overrides:
///
/// | Requested          | Runs                |
/// |--------------------|---------------------|
/// | `RangeAttack1`     | `HoundRangeAttack1` |
/// | `ChaseEnemyFailed` | `CombatFace`        |
pub struct HoundTranslation;

impl ScheduleTranslator for HoundTranslation {
    fn translate(&self, requested: ScheduleId) -> Option<ScheduleId> {
        match requested {
            ScheduleId::RangeAttack1     => Some(ScheduleId::HoundRangeAttack1),
            ScheduleId::ChaseEnemyFailed => Some(ScheduleId::CombatFace),
            _ => None,
        }
    }
}

// ── Chained translator ────────────────────────────────────────────────────────

/// Applies two translators in sequence.
///
/// The second translator sees the (possibly translated) output of the first.
/// Construct chains with `translator_a.then(translator_b)`.
pub struct ChainedTranslator<A: ScheduleTranslator, B: ScheduleTranslator> {
    first:  A,
    second: B,
}

impl<A: ScheduleTranslator, B: ScheduleTranslator> ScheduleTranslator for ChainedTranslator<A, B> {
    fn translate(&self, requested: ScheduleId) -> Option<ScheduleId> {
        let after_first = self.first.translate(requested);
        let candidate = after_first.unwrap_or(requested);
        self.second.translate(candidate).or(after_first)
    }
}

/// Extension trait that adds `.then(other)` to any `ScheduleTranslator`.
pub trait ScheduleTranslatorExt: ScheduleTranslator + Sized {
    fn then<B: ScheduleTranslator>(self, other: B) -> ChainedTranslator<Self, B> {
        ChainedTranslator { first: self, second: other }
    }
}

impl<T: ScheduleTranslator + Sized> ScheduleTranslatorExt for T {}
