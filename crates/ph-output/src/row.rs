//! Plain data row types written by output backends.

/// One schedule change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRow {
    pub tick:      u64,
    pub agent_id:  u32,
    pub requested: &'static str,
    /// Schedule actually run after translation.
    pub running:   &'static str,
}

/// One target affected by a sonic blast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SonicHitRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub target:   u32,
    pub adjuster: f32,
    /// `None` for physics-only targets.
    pub damage:   Option<f32>,
    pub visible:  bool,
}

/// A hound's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        f32,
    pub y:        f32,
    pub z:        f32,
    pub health:   f32,
    pub state:    &'static str,
    /// Empty when no schedule is running.
    pub schedule: &'static str,
    pub task:     u32,
}

/// Summary counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub time_secs:  f64,
    pub alive:      u64,
    pub selections: u64,
    pub blasts:     u64,
    pub hits:       u64,
    pub sounds:     u64,
}
