//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, OutputResult, ScheduleRow, SonicHitRow, TickSummaryRow};

/// Sink for the rows [`SimOutputObserver`](crate::SimOutputObserver)
/// produces.
///
/// Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    fn write_schedule(&mut self, row: &ScheduleRow) -> OutputResult<()>;

    /// Write every target one blast affected.
    fn write_sonic_hits(&mut self, rows: &[SonicHitRow]) -> OutputResult<()>;

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
