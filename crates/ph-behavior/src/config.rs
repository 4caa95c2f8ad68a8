//! Tunables for the alpha hound.

use ph_combat::SonicAttack;

use crate::{BehaviorError, BehaviorResult};

/// Every number the alpha hound's policy consults.
///
/// Odds are expressed as the upper bound of an inclusive integer draw: a
/// `group_attack_odds` of 4 means "draw in `[0, 4]`, act on 0".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoundConfig {
    pub spawn_health: f32,
    /// Blast parameters; `sonic.max_radius` is also the attack radius.
    pub sonic: SonicAttack,

    // ── Range attack gating ───────────────────────────────────────────────
    /// Inside this distance a facing hound may attack regardless of cooldown.
    pub min_attack_radius: f32,
    /// Minimum facing dot product for an attack.
    pub attack_facing_dot: f32,
    /// Beyond `max_radius × attack_range_scale` the enemy is too far.
    pub attack_range_scale: f32,
    /// Line-of-sight search goes out to `max_radius × los_range_scale`.
    pub los_range_scale: f32,
    /// Cooldown after a blast, drawn from `[min, max)` seconds.
    pub attack_cooldown_min: f32,
    pub attack_cooldown_max: f32,
    /// Cooldown after a leap, seconds.
    pub leap_cooldown: f64,

    // ── Squad chatter ─────────────────────────────────────────────────────
    /// Sentences are suppressed for this long after squad chatter.
    pub sound_wait: f64,
    pub group_attack_odds: i32,
    pub group_rally_odds:  i32,
    /// Hurt squad members call a retreat on a draw of exactly this value in
    /// `[0, retreat_odds]`.
    pub retreat_odds: i32,
    /// Chance per tick of a hunting warn cue while running in combat.
    pub warn_chance: f32,

    // ── Strafing ──────────────────────────────────────────────────────────
    pub strafe_radius_min: i32,
    pub strafe_radius_max: i32,
    pub strafe_arc_degrees: f32,
    pub strafe_step: f32,

    // ── Body ──────────────────────────────────────────────────────────────
    /// Above this speed the hound may pass through pack-mates.
    pub interpenetrate_speed: f32,
    /// Enemies further than this are forgotten.
    pub sight_range: f32,
    /// Acquiring a new enemy needs it inside this view cone (dot product).
    pub field_of_view: f32,
    /// A single hit of at least this much damage counts as heavy.
    pub heavy_damage: f32,
}

impl Default for HoundConfig {
    fn default() -> Self {
        Self {
            spawn_health: 200.0,
            sonic: SonicAttack::default(),

            min_attack_radius:   100.0,
            attack_facing_dot:   0.3,
            attack_range_scale:  0.5,
            los_range_scale:     0.9,
            attack_cooldown_min: 5.0,
            attack_cooldown_max: 8.0,
            leap_cooldown:       2.0,

            sound_wait:        1.0,
            group_attack_odds: 4,
            group_rally_odds:  5,
            retreat_odds:      10,
            warn_chance:       0.2,

            strafe_radius_min:  50,
            strafe_radius_max:  500,
            strafe_arc_degrees: 90.0,
            strafe_step:        175.0,

            interpenetrate_speed: 10.0,
            sight_range:          2048.0,
            field_of_view:        0.5,
            heavy_damage:         20.0,
        }
    }
}

impl HoundConfig {
    #[inline]
    pub fn max_attack_radius(&self) -> f32 {
        self.sonic.max_radius
    }

    /// Reject inverted ranges and negative odds.
    pub fn validate(&self) -> BehaviorResult<()> {
        self.sonic.validate()?;
        if self.attack_cooldown_min > self.attack_cooldown_max {
            return Err(BehaviorError::Config(format!(
                "attack cooldown range [{}, {}) is inverted",
                self.attack_cooldown_min, self.attack_cooldown_max
            )));
        }
        if self.strafe_radius_min > self.strafe_radius_max {
            return Err(BehaviorError::Config(format!(
                "strafe radius range [{}, {}] is inverted",
                self.strafe_radius_min, self.strafe_radius_max
            )));
        }
        for (name, odds) in [
            ("group_attack_odds", self.group_attack_odds),
            ("group_rally_odds", self.group_rally_odds),
            ("retreat_odds", self.retreat_odds),
        ] {
            if odds < 0 {
                return Err(BehaviorError::Config(format!("{name} must be non-negative, got {odds}")));
            }
        }
        if !(0.0..=1.0).contains(&self.warn_chance) {
            return Err(BehaviorError::Config(format!(
                "warn_chance must lie in [0, 1], got {}",
                self.warn_chance
            )));
        }
        Ok(())
    }
}
