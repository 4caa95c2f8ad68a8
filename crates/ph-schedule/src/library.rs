//! Schedule definitions and the start-up schedule library.

use std::collections::HashMap;

use ph_core::{Condition, ConditionSet};

use crate::{Activity, ScheduleError, ScheduleId, ScheduleResult, Task};

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An immutable named script.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub id:         ScheduleId,
    pub tasks:      Vec<Task>,
    /// Any of these conditions aborts the schedule.
    pub interrupts: ConditionSet,
}

impl Schedule {
    pub fn new(id: ScheduleId, tasks: Vec<Task>, interrupts: impl IntoIterator<Item = Condition>) -> Self {
        Self { id, tasks, interrupts: interrupts.into_iter().collect() }
    }

    /// Schedule to switch to if a task fails: the first `SetFailSchedule`.
    pub fn fail_schedule(&self) -> Option<ScheduleId> {
        self.tasks.iter().find_map(|t| match t {
            Task::SetFailSchedule(id) => Some(*id),
            _ => None,
        })
    }

    #[inline]
    pub fn is_interrupted_by(&self, conditions: ConditionSet) -> bool {
        self.interrupts.intersects(conditions)
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ── ScheduleLibrary ───────────────────────────────────────────────────────────

/// All schedules available to a simulation, keyed by ID.
///
/// Built once at start-up, then shared read-only.
#[derive(Clone, Debug, Default)]
pub struct ScheduleLibrary {
    schedules: HashMap<ScheduleId, Schedule>,
}

impl ScheduleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schedule.  Rejects duplicates and empty task lists.
    pub fn define(&mut self, schedule: Schedule) -> ScheduleResult<()> {
        if schedule.is_empty() {
            return Err(ScheduleError::Empty(schedule.id));
        }
        if self.schedules.contains_key(&schedule.id) {
            return Err(ScheduleError::Duplicate(schedule.id));
        }
        self.schedules.insert(schedule.id, schedule);
        Ok(())
    }

    pub fn get(&self, id: ScheduleId) -> Option<&Schedule> {
        self.schedules.get(&id)
    }

    pub fn contains(&self, id: ScheduleId) -> bool {
        self.schedules.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Defined IDs in declaration order of [`ScheduleId::ALL`].
    pub fn ids(&self) -> impl Iterator<Item = ScheduleId> + '_ {
        ScheduleId::ALL.into_iter().filter(|id| self.contains(*id))
    }

    /// The generic schedules every creature falls back on.
    pub fn base() -> Self {
        use Condition::*;
        let mut lib = Self::new();
        for s in [
            Schedule::new(
                ScheduleId::IdleStand,
                vec![Task::StopMoving, Task::SetActivity(Activity::Idle), Task::Wait(5.0)],
                [NewEnemy, SeeEnemy, LightDamage, HeavyDamage],
            ),
            Schedule::new(
                ScheduleId::AlertStand,
                vec![Task::StopMoving, Task::SetActivity(Activity::Idle), Task::Wait(5.0)],
                [NewEnemy, SeeEnemy, LightDamage, HeavyDamage, GroupAttack, GroupRally],
            ),
            Schedule::new(
                ScheduleId::AlertFace,
                vec![Task::StopMoving, Task::SetActivity(Activity::Idle), Task::FaceIdeal],
                [NewEnemy, SeeEnemy, HeavyDamage],
            ),
            Schedule::new(
                ScheduleId::CombatFace,
                vec![Task::StopMoving, Task::SetActivity(Activity::Idle), Task::FaceEnemy],
                [CanRangeAttack1, NewEnemy, EnemyDead, HeavyDamage],
            ),
            Schedule::new(
                ScheduleId::TakeCoverFromOrigin,
                vec![
                    Task::StopMoving,
                    Task::SetFailSchedule(ScheduleId::AlertFace),
                    Task::FindCoverFromOrigin,
                    Task::RunPath,
                    Task::WaitForMovement,
                ],
                [NewEnemy],
            ),
            Schedule::new(
                ScheduleId::ChaseEnemyFailed,
                vec![Task::StopMoving, Task::Wait(0.2)],
                [CanRangeAttack1, NewEnemy, EnemyDead, HeavyDamage],
            ),
            Schedule::new(
                ScheduleId::RangeAttack1,
                vec![Task::StopMoving, Task::FaceEnemy, Task::RangeAttack1],
                [NewEnemy, EnemyDead, HeavyDamage],
            ),
            Schedule::new(
                ScheduleId::Die,
                vec![Task::StopMoving, Task::SetActivity(Activity::Die)],
                std::iter::empty(),
            ),
        ] {
            lib.schedules.insert(s.id, s);
        }
        lib
    }

    /// [`base`](Self::base) plus the alpha hound's pack schedules.
    pub fn hound_alpha() -> Self {
        use Condition::*;
        let mut lib = Self::base();
        for s in [
            Schedule::new(
                ScheduleId::AttackStrafe,
                vec![
                    Task::SetFailSchedule(ScheduleId::AttackStrafeReverse),
                    Task::GetPathToCircle,
                    Task::RunPath,
                    Task::WaitForMovement,
                ],
                [
                    WeaponSightOccluded,
                    NewEnemy,
                    EnemyDead,
                    HeavyDamage,
                    CanRangeAttack1,
                    GroupAttack,
                    GroupRetreat,
                ],
            ),
            Schedule::new(
                ScheduleId::AttackStrafeReverse,
                vec![
                    Task::SetFailSchedule(ScheduleId::ChaseEnemy),
                    Task::ReverseStrafeDir,
                    Task::GetPathToCircle,
                    Task::RunPath,
                    Task::WaitForMovement,
                ],
                [WeaponSightOccluded, NewEnemy, EnemyDead, HeavyDamage, CanRangeAttack1, GroupAttack],
            ),
            Schedule::new(
                ScheduleId::ChaseEnemy,
                vec![
                    Task::SetToleranceDistance(30.0),
                    Task::SetFailSchedule(ScheduleId::ChaseEnemyFailed),
                    Task::GetPathToEnemy,
                    Task::RunPath,
                    Task::WaitForMovement,
                ],
                [NewEnemy, EnemyDead, CanRangeAttack1, GroupAttack],
            ),
            Schedule::new(
                ScheduleId::GroupAttack,
                vec![
                    Task::StopMoving,
                    Task::FaceEnemy,
                    Task::SetActivity(Activity::IdleAngry),
                    Task::SpeakSentence,
                    Task::Wait(1.0),
                    Task::SetSchedule(ScheduleId::HoundRangeAttack1),
                ],
                [NewEnemy, EnemyDead, HeavyDamage],
            ),
            Schedule::new(
                ScheduleId::GroupRally,
                vec![
                    Task::SetToleranceDistance(30.0),
                    Task::SetFailSchedule(ScheduleId::AttackStrafe),
                    Task::GetPathToTarget,
                    Task::RunPath,
                    Task::WaitForMovement,
                ],
                [NewEnemy, EnemyDead, HeavyDamage, GroupAttack],
            ),
            Schedule::new(
                ScheduleId::HoundRangeAttack1,
                vec![
                    Task::StopMoving,
                    Task::SetActivity(Activity::IdleAngry),
                    Task::FaceIdeal,
                    Task::RangeAttack1,
                ],
                [HeavyDamage],
            ),
        ] {
            lib.schedules.insert(s.id, s);
        }
        lib
    }

    /// Merge every schedule of `other` into `self`, rejecting IDs already
    /// defined here.
    pub fn extend(&mut self, other: ScheduleLibrary) -> ScheduleResult<()> {
        let mut incoming: Vec<Schedule> = other.schedules.into_values().collect();
        incoming.sort_by_key(|s| s.id);
        for s in incoming {
            self.define(s)?;
        }
        Ok(())
    }
}
