//! Squad registry: a generational slot arena.
//!
//! Squads outlive any single member, so they are owned here rather than by
//! an agent.  Agents hold [`SquadHandle`]s.  Disbanding a squad bumps its
//! slot generation; stale handles then resolve to `None` everywhere.
//!
//! The first member is the leader.  If the leader leaves, the next member in
//! join order takes over.

use ph_core::{AgentId, SquadHandle};

use crate::{AgentError, AgentResult};

/// One live squad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Squad {
    /// Members in join order.  `members[0]` leads.
    pub members: Vec<AgentId>,
}

impl Squad {
    pub fn leader(&self) -> Option<AgentId> {
        self.members.first().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

struct Slot {
    generation: u32,
    squad:      Option<Squad>,
}

/// Owner of every squad in a simulation.
#[derive(Default)]
pub struct SquadRegistry {
    slots: Vec<Slot>,
    free:  Vec<u32>,
}

impl SquadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty squad.
    pub fn create(&mut self) -> SquadHandle {
        match self.free.pop() {
            Some(slot) => {
                let s = &mut self.slots[slot as usize];
                s.squad = Some(Squad::default());
                SquadHandle::new(slot, s.generation)
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, squad: Some(Squad::default()) });
                SquadHandle::new(slot, 0)
            }
        }
    }

    /// Resolve a handle.  `None` once the squad is disbanded.
    pub fn get(&self, handle: SquadHandle) -> Option<&Squad> {
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.squad.as_ref())
    }

    fn get_mut(&mut self, handle: SquadHandle) -> Option<&mut Squad> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.squad.as_mut())
    }

    /// Append `agent` to the squad (no-op if already a member).
    pub fn add_member(&mut self, handle: SquadHandle, agent: AgentId) -> AgentResult<()> {
        let squad = self.get_mut(handle).ok_or(AgentError::StaleSquad(handle))?;
        if !squad.members.contains(&agent) {
            squad.members.push(agent);
        }
        Ok(())
    }

    /// Remove `agent`.  Returns `false` for stale handles or non-members.
    pub fn remove_member(&mut self, handle: SquadHandle, agent: AgentId) -> bool {
        let Some(squad) = self.get_mut(handle) else {
            return false;
        };
        match squad.members.iter().position(|&m| m == agent) {
            Some(i) => {
                squad.members.remove(i);
                true
            }
            None => false,
        }
    }

    /// Destroy the squad and invalidate every outstanding handle.
    pub fn disband(&mut self, handle: SquadHandle) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation && s.squad.is_some())
        else {
            return false;
        };
        slot.squad = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.slot);
        true
    }

    /// Member count, or `None` for a stale handle.
    pub fn num_members(&self, handle: SquadHandle) -> Option<usize> {
        self.get(handle).map(Squad::len)
    }

    /// `true` if `agent` leads the squad.
    pub fn is_leader(&self, handle: SquadHandle, agent: AgentId) -> bool {
        self.get(handle).and_then(Squad::leader) == Some(agent)
    }

    /// Members in join order; empty for a stale handle.
    pub fn members(&self, handle: SquadHandle) -> &[AgentId] {
        self.get(handle).map(|s| s.members.as_slice()).unwrap_or(&[])
    }

    /// Number of live squads.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.squad.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
