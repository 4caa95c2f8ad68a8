//! Simulation observer trait for progress reporting and data collection.

use ph_agent::AgentStore;
use ph_behavior::TaskFailure;
use ph_combat::SonicReport;
use ph_core::{AgentId, SimTime, Tick};
use ph_schedule::{ScheduleId, Task};

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickSummary {
    pub tick:       Tick,
    pub time:       SimTime,
    /// Agents not dead at the end of the tick.
    pub alive:      usize,
    /// Schedules chosen this tick.
    pub selections: usize,
    /// Sonic blasts fired this tick.
    pub blasts:     usize,
    /// Damage events landed this tick, from any source.
    pub hits:       usize,
    pub sounds:     usize,
}

/// One schedule change, as seen by observers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScheduleChange {
    pub agent:     AgentId,
    /// What the policy asked for.
    pub requested: ScheduleId,
    /// What actually runs after translation.
    pub running:   ScheduleId,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} alive", summary.tick, summary.alive);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called in the apply phase for every new schedule, in ascending agent
    /// order.
    fn on_schedule(&mut self, _tick: Tick, _change: &ScheduleChange) {}

    /// Called when a task fails and the agent falls back.
    fn on_task_failed(&mut self, _tick: Tick, _agent: AgentId, _task: &Task, _failure: TaskFailure) {}

    /// Called after a sonic blast has been resolved.
    fn on_sonic_attack(&mut self, _tick: Tick, _agent: AgentId, _report: &SonicReport) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
