//! `ph-output` — simulation output writers for packhound.
//!
//! | Backend | Files created                                                              |
//! |---------|----------------------------------------------------------------------------|
//! | CSV     | `schedules.csv`, `sonic_hits.csv`, `agent_snapshots.csv`, `tick_summaries.csv` |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ph_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ph_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, ScheduleRow, SonicHitRow, TickSummaryRow};
pub use writer::OutputWriter;
