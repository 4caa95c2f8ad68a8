//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ph_agent::AgentStore;
use ph_combat::SonicReport;
use ph_core::{AgentId, Tick};
use ph_sim::{ScheduleChange, SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, ScheduleRow, SonicHitRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every schedule change, sonic hit, agent
/// snapshot, and tick summary to an [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_schedule(&mut self, tick: Tick, change: &ScheduleChange) {
        let row = ScheduleRow {
            tick:      tick.0,
            agent_id:  change.agent.0,
            requested: change.requested.as_str(),
            running:   change.running.as_str(),
        };
        let result = self.writer.write_schedule(&row);
        self.store_err(result);
    }

    fn on_sonic_attack(&mut self, tick: Tick, agent: AgentId, report: &SonicReport) {
        let rows: Vec<SonicHitRow> = report
            .hits
            .iter()
            .map(|h| SonicHitRow {
                tick:     tick.0,
                agent_id: agent.0,
                target:   h.target.0,
                adjuster: h.adjuster,
                damage:   h.damage,
                visible:  h.visible,
            })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_sonic_hits(&rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:       summary.tick.0,
            time_secs:  summary.time.0,
            alive:      summary.alive as u64,
            selections: summary.selections as u64,
            blasts:     summary.blasts as u64,
            hits:       summary.hits as u64,
            sounds:     summary.sounds as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        let rows: Vec<AgentSnapshotRow> = (0..agents.count)
            .map(|i| {
                let p = agents.position[i];
                AgentSnapshotRow {
                    agent_id: i as u32,
                    tick:     tick.0,
                    x:        p.x,
                    y:        p.y,
                    z:        p.z,
                    health:   agents.health[i],
                    state:    agents.state[i].as_str(),
                    schedule: agents.current_schedule[i].map_or("", |s| s.as_str()),
                    task:     agents.task_index[i] as u32,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
