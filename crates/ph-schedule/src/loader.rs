//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per task or interrupt.  Task rows keep their file order; interrupt
//! rows may appear anywhere among a schedule's rows.
//!
//! ```csv
//! schedule,kind,value,arg
//! group_rally,task,set_tolerance_distance,30
//! group_rally,task,set_fail_schedule,attack_strafe
//! group_rally,task,get_path_to_target,
//! group_rally,task,run_path,
//! group_rally,task,wait_for_movement,
//! group_rally,interrupt,new_enemy,
//! group_rally,interrupt,heavy_damage,
//! ```
//!
//! **`kind`** field:
//!
//! | Value       | `value` column holds        | `arg` column                      |
//! |-------------|-----------------------------|-----------------------------------|
//! | `task`      | task name                   | number, schedule, or activity     |
//! | `interrupt` | condition name              | unused                            |
//!
//! Unknown schedule, task, activity, or condition names are rejected, as is
//! a schedule that lists interrupts but no tasks.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ph_core::Condition;

use crate::library::{Schedule, ScheduleLibrary};
use crate::{ScheduleError, ScheduleId, Task};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScheduleRecord {
    schedule: String,
    kind:     String,
    value:    String,
    #[serde(default)]
    arg:      Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`ScheduleLibrary`] from a CSV file.
pub fn load_library_csv(path: &Path) -> Result<ScheduleLibrary, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_library_reader(file)
}

/// Like [`load_library_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading embedded data.
pub fn load_library_reader<R: Read>(reader: R) -> Result<ScheduleLibrary, ScheduleError> {
    // ── Parse CSV rows, grouping by schedule in first-seen order ──────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut order: Vec<Schedule> = Vec::new();

    for result in csv_reader.deserialize::<ScheduleRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let id = ScheduleId::parse(row.schedule.trim()).ok_or_else(|| {
            ScheduleError::Parse(format!("unknown schedule {:?}", row.schedule))
        })?;

        let idx = match order.iter().position(|s| s.id == id) {
            Some(i) => i,
            None => {
                order.push(Schedule::new(id, Vec::new(), std::iter::empty()));
                order.len() - 1
            }
        };
        let schedule = &mut order[idx];

        match row.kind.trim() {
            "task" => schedule.tasks.push(Task::parse(&row.value, row.arg.as_deref())?),
            "interrupt" => {
                let c = Condition::parse(row.value.trim()).ok_or_else(|| {
                    ScheduleError::Parse(format!("unknown condition {:?}", row.value))
                })?;
                schedule.interrupts.insert(c);
            }
            other => {
                return Err(ScheduleError::Parse(format!(
                    "invalid kind {other:?}: expected \"task\" or \"interrupt\""
                )));
            }
        }
    }

    // ── Validate and register ─────────────────────────────────────────────
    let mut library = ScheduleLibrary::new();
    for schedule in order {
        library.define(schedule)?;
    }
    Ok(library)
}
