//! Small per-agent state enums.

use std::fmt;

/// High-level combat state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcState {
    /// Spawned but not yet initialised by the host.
    #[default]
    None,
    Idle,
    Alert,
    Combat,
    Dead,
}

impl NpcState {
    pub fn as_str(self) -> &'static str {
        match self {
            NpcState::None   => "none",
            NpcState::Idle   => "idle",
            NpcState::Alert  => "alert",
            NpcState::Combat => "combat",
            NpcState::Dead   => "dead",
        }
    }
}

impl fmt::Display for NpcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collision filtering group.
///
/// Hounds in `HoundInterpenetrate` may pass through each other; `Solid`
/// blocks everything.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionGroup {
    Solid,
    #[default]
    HoundInterpenetrate,
}
