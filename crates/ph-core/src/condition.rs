//! Perceptual and squad conditions, stored as a compact bitset.
//!
//! The host perception pass rebuilds the perceptual part of an agent's
//! `ConditionSet` every tick.  Squad conditions (`GroupAttack`,
//! `GroupRally`) are set by interaction handlers on other agents' behalf and
//! survive until the recipient runs the schedule that consumes them.

use std::fmt;

/// A named boolean trigger.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Condition {
    LightDamage = 0,
    HeavyDamage,
    EnemyDead,
    NewEnemy,
    SeeEnemy,
    CanRangeAttack1,
    TooFarToAttack,
    NotFacingAttack,
    WeaponSightOccluded,
    /// A squad-mate asked everyone to attack together.
    GroupAttack,
    /// A squad-mate asked everyone to regroup on it.
    GroupRally,
    /// A squad-mate called a retreat.
    GroupRetreat,
}

impl Condition {
    /// Every condition, in bit order.
    pub const ALL: [Condition; 12] = [
        Condition::LightDamage,
        Condition::HeavyDamage,
        Condition::EnemyDead,
        Condition::NewEnemy,
        Condition::SeeEnemy,
        Condition::CanRangeAttack1,
        Condition::TooFarToAttack,
        Condition::NotFacingAttack,
        Condition::WeaponSightOccluded,
        Condition::GroupAttack,
        Condition::GroupRally,
        Condition::GroupRetreat,
    ];

    #[inline]
    fn bit(self) -> u32 {
        1 << (self as u8)
    }

    /// `true` for conditions set by squad interactions rather than perception.
    pub fn is_squad_signal(self) -> bool {
        matches!(
            self,
            Condition::GroupAttack | Condition::GroupRally | Condition::GroupRetreat
        )
    }

    /// Snake-case label used in schedule files and output.
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::LightDamage         => "light_damage",
            Condition::HeavyDamage         => "heavy_damage",
            Condition::EnemyDead           => "enemy_dead",
            Condition::NewEnemy            => "new_enemy",
            Condition::SeeEnemy            => "see_enemy",
            Condition::CanRangeAttack1     => "can_range_attack1",
            Condition::TooFarToAttack      => "too_far_to_attack",
            Condition::NotFacingAttack     => "not_facing_attack",
            Condition::WeaponSightOccluded => "weapon_sight_occluded",
            Condition::GroupAttack         => "group_attack",
            Condition::GroupRally          => "group_rally",
            Condition::GroupRetreat        => "group_retreat",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Condition> {
        Condition::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ConditionSet ──────────────────────────────────────────────────────────────

/// A set of [`Condition`]s.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionSet(u32);

impl ConditionSet {
    pub const EMPTY: ConditionSet = ConditionSet(0);

    #[inline]
    pub fn new() -> Self {
        Self::EMPTY
    }

    #[inline]
    pub fn contains(self, c: Condition) -> bool {
        self.0 & c.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, c: Condition) {
        self.0 |= c.bit();
    }

    #[inline]
    pub fn remove(&mut self, c: Condition) {
        self.0 &= !c.bit();
    }

    /// Builder-style insert.
    #[inline]
    pub fn with(mut self, c: Condition) -> Self {
        self.insert(c);
        self
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// `true` if any condition is in both sets.
    #[inline]
    pub fn intersects(self, other: ConditionSet) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn union(self, other: ConditionSet) -> ConditionSet {
        ConditionSet(self.0 | other.0)
    }

    /// Keep only the members that satisfy `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(Condition) -> bool) {
        for c in Condition::ALL {
            if self.contains(c) && !keep(c) {
                self.remove(c);
            }
        }
    }

    /// Members in bit order.
    pub fn iter(self) -> impl Iterator<Item = Condition> {
        Condition::ALL.into_iter().filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut set = ConditionSet::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
