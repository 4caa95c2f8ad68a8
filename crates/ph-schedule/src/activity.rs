//! Animation-level activities.
//!
//! Tasks request an activity; the host's animation system plays it and
//! reports when a one-shot activity (attack, leap) has finished.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity {
    #[default]
    Idle,
    IdleAngry,
    Walk,
    Run,
    TurnLeft,
    TurnRight,
    /// Lying down asleep.
    CrouchIdle,
    RangeAttack1,
    Leap,
    /// Pack-leader watch pose.
    Guard,
    Die,
}

impl Activity {
    pub const ALL: [Activity; 11] = [
        Activity::Idle,
        Activity::IdleAngry,
        Activity::Walk,
        Activity::Run,
        Activity::TurnLeft,
        Activity::TurnRight,
        Activity::CrouchIdle,
        Activity::RangeAttack1,
        Activity::Leap,
        Activity::Guard,
        Activity::Die,
    ];

    /// One-shot activities finish on their own; looping ones never do.
    pub fn is_one_shot(self) -> bool {
        matches!(self, Activity::RangeAttack1 | Activity::Leap | Activity::Die)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Idle         => "idle",
            Activity::IdleAngry    => "idle_angry",
            Activity::Walk         => "walk",
            Activity::Run          => "run",
            Activity::TurnLeft     => "turn_left",
            Activity::TurnRight    => "turn_right",
            Activity::CrouchIdle   => "crouch_idle",
            Activity::RangeAttack1 => "range_attack1",
            Activity::Leap         => "leap",
            Activity::Guard        => "guard",
            Activity::Die          => "die",
        }
    }

    pub fn parse(s: &str) -> Option<Activity> {
        Activity::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
