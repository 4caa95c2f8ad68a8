//! Decisions and the side effects they request.

use ph_agent::CollisionGroup;
use ph_combat::SoundCue;
use ph_core::{EntityId, SimTime};
use ph_schedule::ScheduleId;

/// A side effect requested by schedule selection.
///
/// Selection only reads the world; the sim applies intents afterwards in
/// ascending agent order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Intent {
    EmitSound(SoundCue),
    /// Suppress sentences until the given time.
    SetSoundWait(SimTime),
    /// Allow the next range attack from the given time.
    SetNextAttack(SimTime),
    /// Tell every other squad member.  Recipients react on a later tick.
    Broadcast(InteractionKind),
    SetCollisionGroup(CollisionGroup),
}

/// Output of one selection call.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// Requested schedule, before translation.
    pub schedule: ScheduleId,
    pub intents:  Vec<Intent>,
}

impl Decision {
    pub fn new(schedule: ScheduleId) -> Self {
        Self { schedule, intents: Vec::new() }
    }

    pub fn with_intents(schedule: ScheduleId, intents: Vec<Intent>) -> Self {
        Self { schedule, intents }
    }
}

// ── Interactions ─────────────────────────────────────────────────────────────

/// Kind of squad message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionKind {
    /// "Everyone blast now."
    GroupAttack,
    /// "Regroup on me."
    GroupRally,
    /// An interaction from some other creature's vocabulary.
    Foreign(u32),
}

impl InteractionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::GroupAttack => "group_attack",
            InteractionKind::GroupRally  => "group_rally",
            InteractionKind::Foreign(_)  => "foreign",
        }
    }
}

/// One delivered squad message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interaction {
    pub kind:   InteractionKind,
    /// World entity of the sender.
    pub source: EntityId,
}
