//! Generic task execution.
//!
//! The creature gets first refusal on every task through
//! [`TaskHandler`](ph_behavior::TaskHandler); whatever it returns
//! `NotHandled` for lands here.  `SetSchedule` is handled by the runner in
//! [`sim`](crate::sim) because it replaces the schedule being stepped.

use ph_behavior::{max_yaw_speed, translate_activity, ActionContext, Npc, TaskFailure, TaskOutcome};
use ph_core::{AgentId, Angles, Vec3};
use ph_schedule::{Activity, Task};
use tracing::debug;

/// How far `FindCoverFromOrigin` retreats.
pub const COVER_DISTANCE: f32 = 256.0;

/// Yaw error, in degrees, at which a face task counts as done.
const FACE_TOLERANCE: f32 = 1.0;

/// Signed shortest turn from `from` to `to`, in `(-180, 180]`.
pub(crate) fn yaw_delta(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Turn toward `point` at the activity's yaw speed.  `true` once facing.
pub(crate) fn turn_toward(ctx: &mut ActionContext<'_>, agent: AgentId, point: Vec3, dt: f64) -> bool {
    let i = agent.index();
    let d = point - ctx.agents.position[i];
    if d.x == 0.0 && d.y == 0.0 {
        return true;
    }
    let ideal = d.y.atan2(d.x).to_degrees();
    let yaw = ctx.agents.angles[i].yaw;
    let delta = yaw_delta(yaw, ideal);
    let step = max_yaw_speed(ctx.agents.activity[i]) * dt as f32;
    if delta.abs() <= step.max(FACE_TOLERANCE) {
        ctx.agents.angles[i].yaw = ideal;
        true
    } else {
        ctx.agents.angles[i].yaw = yaw + step * delta.signum();
        false
    }
}

fn face_enemy(agent: AgentId, ctx: &mut ActionContext<'_>, dt: f64) -> TaskOutcome {
    match ctx.enemy(agent).map(|e| e.origin) {
        Some(p) if !turn_toward(ctx, agent, p, dt) => TaskOutcome::Running,
        _ => TaskOutcome::Complete,
    }
}

fn path_to(agent: AgentId, goal: Vec3, ctx: &mut ActionContext<'_>) -> TaskOutcome {
    let i = agent.index();
    match ctx.nav.set_goal(ctx.agents.position[i], goal, ctx.agents.tolerance[i], ctx.world) {
        Some(path) => {
            ctx.agents.path[i] = path.waypoints.into();
            TaskOutcome::Complete
        }
        None => TaskOutcome::Failed(TaskFailure::NoRoute),
    }
}

fn find_cover(agent: AgentId, ctx: &mut ActionContext<'_>) -> TaskOutcome {
    let i = agent.index();
    let pos = ctx.agents.position[i];
    let away = match ctx.enemy(agent) {
        Some(e) => Vec3::new(pos.x - e.origin.x, pos.y - e.origin.y, 0.0).normalized(),
        None => Angles::from_yaw(ctx.agents.angles[i].yaw).forward() * -1.0,
    };
    if away == Vec3::ZERO {
        return TaskOutcome::Failed(TaskFailure::NoRoute);
    }
    path_to(agent, pos + away * COVER_DISTANCE, ctx)
}

/// Start a task the creature did not claim.
pub(crate) fn start_generic<N: Npc>(
    npc:   &N,
    agent: AgentId,
    task:  &Task,
    ctx:   &mut ActionContext<'_>,
    dt:    f64,
) -> TaskOutcome {
    let i = agent.index();
    match *task {
        Task::StopMoving => {
            ctx.agents.path[i].clear();
            let v = ctx.agents.velocity[i];
            ctx.agents.velocity[i] = Vec3::new(0.0, 0.0, v.z);
            TaskOutcome::Complete
        }
        Task::FaceEnemy | Task::FaceIdeal => face_enemy(agent, ctx, dt),
        Task::SetActivity(a) => {
            let a = translate_activity(a, ctx.agents.state[i]);
            ctx.agents.set_activity(agent, a);
            TaskOutcome::Complete
        }
        Task::SpeakSentence => {
            npc.speak_sentence(agent, ctx);
            TaskOutcome::Complete
        }
        Task::Wait(secs) => {
            ctx.agents.task_wait_until[i] = Some(ctx.now + f64::from(secs));
            TaskOutcome::Running
        }
        Task::SetFailSchedule(s) => {
            ctx.agents.fail_schedule[i] = Some(s);
            TaskOutcome::Complete
        }
        Task::SetToleranceDistance(d) => {
            ctx.agents.tolerance[i] = d;
            TaskOutcome::Complete
        }
        Task::GetPathToEnemy => match ctx.enemy(agent).map(|e| e.origin) {
            Some(goal) => path_to(agent, goal, ctx),
            None => TaskOutcome::Failed(TaskFailure::NoEnemy),
        },
        Task::GetPathToTarget => {
            let world = ctx.world;
            match ctx.agents.target[i].and_then(|t| world.entity(t)).map(|e| e.origin) {
                Some(goal) => path_to(agent, goal, ctx),
                None => TaskOutcome::Failed(TaskFailure::NoTarget),
            }
        }
        Task::FindCoverFromOrigin => find_cover(agent, ctx),
        Task::RunPath => {
            ctx.agents.set_activity(agent, Activity::Run);
            TaskOutcome::Complete
        }
        Task::WaitForMovement => {
            if ctx.agents.path[i].is_empty() {
                TaskOutcome::Complete
            } else {
                TaskOutcome::Running
            }
        }
        Task::RangeAttack1 => {
            ctx.agents.set_activity(agent, Activity::RangeAttack1);
            TaskOutcome::Running
        }
        _ => {
            debug!(%agent, task = %task, "task has no generic implementation");
            TaskOutcome::Failed(TaskFailure::NoRoute)
        }
    }
}

/// Advance a running task the creature did not claim.
pub(crate) fn run_generic(agent: AgentId, task: &Task, ctx: &mut ActionContext<'_>, dt: f64) -> TaskOutcome {
    let i = agent.index();
    match *task {
        Task::FaceEnemy | Task::FaceIdeal => face_enemy(agent, ctx, dt),
        Task::Wait(_) => match ctx.agents.task_wait_until[i] {
            Some(until) if !ctx.now.reached(until) => TaskOutcome::Running,
            _ => TaskOutcome::Complete,
        },
        Task::WaitForMovement => {
            if ctx.agents.path[i].is_empty() {
                let idle = translate_activity(Activity::Idle, ctx.agents.state[i]);
                ctx.agents.set_activity(agent, idle);
                TaskOutcome::Complete
            } else {
                TaskOutcome::Running
            }
        }
        Task::RangeAttack1 => {
            if ctx.agents.activity_finished[i] {
                TaskOutcome::Complete
            } else {
                TaskOutcome::Running
            }
        }
        _ => TaskOutcome::Complete,
    }
}
