//! Schedule steps.
//!
//! Tasks carry their argument inline (`Wait(1.0)`,
//! `SetFailSchedule(ScheduleId::ChaseEnemy)`), so a schedule is fully
//! described by its task list.  Generic tasks are run by the host; the alpha
//! hound handles the custom ones listed under "Alpha hound" below and a few
//! generic ones it overrides (`GetPathToEnemyLos`, `RangeAttack1`).

use std::fmt;

use crate::{Activity, ScheduleError, ScheduleId, ScheduleResult};

#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Task {
    // ── Generic ───────────────────────────────────────────────────────────
    StopMoving,
    FaceEnemy,
    FaceIdeal,
    SetActivity(Activity),
    SpeakSentence,
    /// Seconds.
    Wait(f32),
    SetSchedule(ScheduleId),
    SetFailSchedule(ScheduleId),
    /// World units.
    SetToleranceDistance(f32),
    GetPathToEnemy,
    GetPathToTarget,
    GetPathToEnemyLos,
    FindCoverFromOrigin,
    RunPath,
    WaitForMovement,
    RangeAttack1,

    // ── Alpha hound ───────────────────────────────────────────────────────
    CloseEye,
    OpenEye,
    ThreatDisplay,
    FallAsleep,
    WakeUp,
    HopBack,
    GetPathToCircle,
    ReverseStrafeDir,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::StopMoving              => "stop_moving",
            Task::FaceEnemy               => "face_enemy",
            Task::FaceIdeal               => "face_ideal",
            Task::SetActivity(_)          => "set_activity",
            Task::SpeakSentence           => "speak_sentence",
            Task::Wait(_)                 => "wait",
            Task::SetSchedule(_)          => "set_schedule",
            Task::SetFailSchedule(_)      => "set_fail_schedule",
            Task::SetToleranceDistance(_) => "set_tolerance_distance",
            Task::GetPathToEnemy          => "get_path_to_enemy",
            Task::GetPathToTarget         => "get_path_to_target",
            Task::GetPathToEnemyLos       => "get_path_to_enemy_los",
            Task::FindCoverFromOrigin     => "find_cover_from_origin",
            Task::RunPath                 => "run_path",
            Task::WaitForMovement         => "wait_for_movement",
            Task::RangeAttack1            => "range_attack1",
            Task::CloseEye                => "close_eye",
            Task::OpenEye                 => "open_eye",
            Task::ThreatDisplay           => "threat_display",
            Task::FallAsleep              => "fall_asleep",
            Task::WakeUp                  => "wake_up",
            Task::HopBack                 => "hop_back",
            Task::GetPathToCircle         => "get_path_to_circle",
            Task::ReverseStrafeDir        => "reverse_strafe_dir",
        }
    }

    /// `true` for the tasks only the alpha hound knows how to run.
    pub fn is_custom(&self) -> bool {
        matches!(
            self,
            Task::CloseEye
                | Task::OpenEye
                | Task::ThreatDisplay
                | Task::FallAsleep
                | Task::WakeUp
                | Task::HopBack
                | Task::GetPathToCircle
                | Task::ReverseStrafeDir
        )
    }

    /// Parse a task from its name and optional argument column.
    pub fn parse(name: &str, arg: Option<&str>) -> ScheduleResult<Task> {
        let arg = arg.map(str::trim).filter(|a| !a.is_empty());
        let task = match name.trim() {
            "stop_moving"            => Task::StopMoving,
            "face_enemy"             => Task::FaceEnemy,
            "face_ideal"             => Task::FaceIdeal,
            "set_activity"           => Task::SetActivity(activity_arg(name, arg)?),
            "speak_sentence"         => Task::SpeakSentence,
            "wait"                   => Task::Wait(float_arg(name, arg)?),
            "set_schedule"           => Task::SetSchedule(schedule_arg(name, arg)?),
            "set_fail_schedule"      => Task::SetFailSchedule(schedule_arg(name, arg)?),
            "set_tolerance_distance" => Task::SetToleranceDistance(float_arg(name, arg)?),
            "get_path_to_enemy"      => Task::GetPathToEnemy,
            "get_path_to_target"     => Task::GetPathToTarget,
            "get_path_to_enemy_los"  => Task::GetPathToEnemyLos,
            "find_cover_from_origin" => Task::FindCoverFromOrigin,
            "run_path"               => Task::RunPath,
            "wait_for_movement"      => Task::WaitForMovement,
            "range_attack1"          => Task::RangeAttack1,
            "close_eye"              => Task::CloseEye,
            "open_eye"               => Task::OpenEye,
            "threat_display"         => Task::ThreatDisplay,
            "fall_asleep"            => Task::FallAsleep,
            "wake_up"                => Task::WakeUp,
            "hop_back"               => Task::HopBack,
            "get_path_to_circle"     => Task::GetPathToCircle,
            "reverse_strafe_dir"     => Task::ReverseStrafeDir,
            other => return Err(ScheduleError::Parse(format!("unknown task {other:?}"))),
        };
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::SetActivity(a)          => write!(f, "{} {a}", self.name()),
            Task::Wait(s)                 => write!(f, "{} {s}", self.name()),
            Task::SetSchedule(id)         => write!(f, "{} {id}", self.name()),
            Task::SetFailSchedule(id)     => write!(f, "{} {id}", self.name()),
            Task::SetToleranceDistance(d) => write!(f, "{} {d}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

// ── Argument helpers ──────────────────────────────────────────────────────────

fn missing(task: &str) -> ScheduleError {
    ScheduleError::Parse(format!("task {task:?} requires an argument"))
}

fn float_arg(task: &str, arg: Option<&str>) -> ScheduleResult<f32> {
    let a = arg.ok_or_else(|| missing(task))?;
    a.parse::<f32>()
        .map_err(|_| ScheduleError::Parse(format!("task {task:?}: invalid number {a:?}")))
}

fn schedule_arg(task: &str, arg: Option<&str>) -> ScheduleResult<ScheduleId> {
    let a = arg.ok_or_else(|| missing(task))?;
    ScheduleId::parse(a)
        .ok_or_else(|| ScheduleError::Parse(format!("task {task:?}: unknown schedule {a:?}")))
}

fn activity_arg(task: &str, arg: Option<&str>) -> ScheduleResult<Activity> {
    let a = arg.ok_or_else(|| missing(task))?;
    Activity::parse(a)
        .ok_or_else(|| ScheduleError::Parse(format!("task {task:?}: unknown activity {a:?}")))
}
