//! Schedule identifiers.
//!
//! One closed enum covers both the generic schedules every creature
//! understands (`IdleStand`, `TakeCoverFromOrigin`, …) and the alpha hound's
//! own pack schedules.  Selection code returns generic IDs where it defers to
//! shared behavior; a [`ScheduleTranslator`](crate::ScheduleTranslator) maps
//! them to creature-specific variants before lookup.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleId {
    // ── Generic ───────────────────────────────────────────────────────────
    IdleStand,
    AlertStand,
    AlertFace,
    CombatFace,
    TakeCoverFromOrigin,
    ChaseEnemyFailed,
    /// Generic ranged attack; translated to [`HoundRangeAttack1`](Self::HoundRangeAttack1).
    RangeAttack1,
    Die,

    // ── Alpha hound ───────────────────────────────────────────────────────
    HoundRangeAttack1,
    AttackStrafe,
    AttackStrafeReverse,
    ChaseEnemy,
    GroupAttack,
    GroupRally,
}

impl ScheduleId {
    pub const ALL: [ScheduleId; 14] = [
        ScheduleId::IdleStand,
        ScheduleId::AlertStand,
        ScheduleId::AlertFace,
        ScheduleId::CombatFace,
        ScheduleId::TakeCoverFromOrigin,
        ScheduleId::ChaseEnemyFailed,
        ScheduleId::RangeAttack1,
        ScheduleId::Die,
        ScheduleId::HoundRangeAttack1,
        ScheduleId::AttackStrafe,
        ScheduleId::AttackStrafeReverse,
        ScheduleId::ChaseEnemy,
        ScheduleId::GroupAttack,
        ScheduleId::GroupRally,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleId::IdleStand           => "idle_stand",
            ScheduleId::AlertStand          => "alert_stand",
            ScheduleId::AlertFace           => "alert_face",
            ScheduleId::CombatFace          => "combat_face",
            ScheduleId::TakeCoverFromOrigin => "take_cover_from_origin",
            ScheduleId::ChaseEnemyFailed    => "chase_enemy_failed",
            ScheduleId::RangeAttack1        => "range_attack1",
            ScheduleId::Die                 => "die",
            ScheduleId::HoundRangeAttack1   => "hound_range_attack1",
            ScheduleId::AttackStrafe        => "attack_strafe",
            ScheduleId::AttackStrafeReverse => "attack_strafe_reverse",
            ScheduleId::ChaseEnemy          => "chase_enemy",
            ScheduleId::GroupAttack         => "group_attack",
            ScheduleId::GroupRally          => "group_rally",
        }
    }

    pub fn parse(s: &str) -> Option<ScheduleId> {
        ScheduleId::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
