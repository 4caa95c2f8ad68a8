//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `schedules.csv`
//! - `sonic_hits.csv`
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, ScheduleRow, SonicHitRow, TickSummaryRow};

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    schedules: Writer<File>,
    hits:      Writer<File>,
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut schedules = Writer::from_path(dir.join("schedules.csv"))?;
        schedules.write_record(["tick", "agent_id", "requested", "running"])?;

        let mut hits = Writer::from_path(dir.join("sonic_hits.csv"))?;
        hits.write_record(["tick", "agent_id", "target", "adjuster", "damage", "visible"])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["agent_id", "tick", "x", "y", "z", "health", "state", "schedule", "task"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_secs", "alive", "selections", "blasts", "hits", "sounds"])?;

        Ok(Self { schedules, hits, snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_schedule(&mut self, row: &ScheduleRow) -> OutputResult<()> {
        self.schedules.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.requested.to_owned(),
            row.running.to_owned(),
        ])?;
        Ok(())
    }

    fn write_sonic_hits(&mut self, rows: &[SonicHitRow]) -> OutputResult<()> {
        for row in rows {
            self.hits.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.target.to_string(),
                row.adjuster.to_string(),
                row.damage.map(|d| d.to_string()).unwrap_or_default(),
                (row.visible as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.health.to_string(),
                row.state.to_owned(),
                row.schedule.to_owned(),
                row.task.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.alive.to_string(),
            row.selections.to_string(),
            row.blasts.to_string(),
            row.hits.to_string(),
            row.sounds.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.schedules.flush()?;
        self.hits.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
