//! `ph-schedule` — schedules, tasks, activities, and schedule loading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`id`]         | `ScheduleId`                                                  |
//! | [`activity`]   | `Activity` animation-level states                             |
//! | [`task`]       | `Task` steps with their arguments                             |
//! | [`library`]    | `Schedule`, `ScheduleLibrary` (base + alpha hound sets)       |
//! | [`translate`]  | `ScheduleTranslator` trait, `HoundTranslation`, chaining      |
//! | [`loader`]     | `load_library_csv`, `load_library_reader`                     |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                          |
//!
//! # Schedule model (summary)
//!
//! A schedule is an immutable script: an ordered task list plus the set of
//! conditions that abort it.  The library is built once at start-up and
//! shared read-only by every agent:
//!
//! ```text
//! selector ──▶ ScheduleId ──▶ translator ──▶ library.get(id) ──▶ tasks…
//!                                                  │
//!                          interrupt condition ◀───┘ (abort, reselect)
//! ```

pub mod activity;
pub mod error;
pub mod id;
pub mod library;
pub mod loader;
pub mod task;
pub mod translate;


pub use activity::Activity;
pub use error::{ScheduleError, ScheduleResult};
pub use id::ScheduleId;
pub use library::{Schedule, ScheduleLibrary};
pub use loader::{load_library_csv, load_library_reader};
pub use task::Task;
pub use translate::{
    ChainedTranslator, HoundTranslation, NoTranslation, ScheduleTranslator, ScheduleTranslatorExt,
};
