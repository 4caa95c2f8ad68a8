//! Sound cues, sound interests, and the squad beam colour.

use std::ops::BitOr;

use ph_combat::SoundCue;
use ph_core::AgentId;
use tracing::warn;

use crate::{ActionContext, AlphaHound, BasePolicy, VoiceHandler};

/// Sound categories a creature listens for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundInterest(pub u8);

impl SoundInterest {
    pub const WORLD:  SoundInterest = SoundInterest(1 << 0);
    pub const COMBAT: SoundInterest = SoundInterest(1 << 1);
    pub const PLAYER: SoundInterest = SoundInterest(1 << 2);
    pub const DANGER: SoundInterest = SoundInterest(1 << 3);

    #[inline]
    pub fn contains(self, other: SoundInterest) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SoundInterest {
    type Output = SoundInterest;

    fn bitor(self, rhs: SoundInterest) -> SoundInterest {
        SoundInterest(self.0 | rhs.0)
    }
}

/// RGB colour of the sonic beam.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BeamColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Palest beam, used by a lone hound.
    pub const SOLO: BeamColor = BeamColor::new(188, 220, 255);
}

/// Beam colour for a squad of `squad_size` (`None` when solo).  Bigger packs
/// glow deeper blue.
pub fn beam_color(squad_size: Option<usize>) -> BeamColor {
    match squad_size {
        None    => BeamColor::SOLO,
        Some(2) => BeamColor::new(101, 133, 221),
        Some(3) => BeamColor::new(67, 85, 255),
        Some(4) => BeamColor::new(62, 33, 211),
        Some(n) => {
            warn!(squad_size = n, "unsupported hound squad size, using solo beam colour");
            BeamColor::SOLO
        }
    }
}

impl<B: BasePolicy> AlphaHound<B> {
    pub fn sound_interests(&self) -> SoundInterest {
        SoundInterest::WORLD | SoundInterest::COMBAT | SoundInterest::PLAYER | SoundInterest::DANGER
    }

    /// Beam colour for this agent's current squad.
    pub fn beam_color(&self, agent: AgentId, ctx: &ActionContext<'_>) -> BeamColor {
        beam_color(ctx.squad_size(agent))
    }
}

impl<B: BasePolicy> VoiceHandler for AlphaHound<B> {
    fn idle_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        let i = agent.index();
        if ctx.now.reached(ctx.agents.sound_wait_until[i]) {
            ctx.sink.emit_sound(ctx.agents.entity[i], SoundCue::Idle);
        }
    }

    /// Only the squad leader (or a lone hound) raises the alarm.
    fn alert_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        if let Some(squad) = ctx.squad(agent) {
            if !ctx.squads.is_leader(squad, agent) {
                return;
            }
        }
        ctx.sink.emit_sound(ctx.agents.entity[agent.index()], SoundCue::Alert);
    }

    fn pain_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        ctx.sink.emit_sound(ctx.agents.entity[agent.index()], SoundCue::Pain);
    }

    fn death_sound(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        ctx.sink.emit_sound(ctx.agents.entity[agent.index()], SoundCue::Die);
    }

    fn speak_sentence(&self, agent: AgentId, ctx: &mut ActionContext<'_>) -> bool {
        let i = agent.index();
        if ctx.now > ctx.agents.sound_wait_until[i] {
            ctx.sink.emit_sound(ctx.agents.entity[i], SoundCue::Sentence);
            ctx.agents.sound_wait_until[i] = ctx.now + self.config.sound_wait;
            true
        } else {
            false
        }
    }

    /// Hurt squad members occasionally call a retreat.
    fn on_damaged(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        let odds = self.config.retreat_odds;
        if ctx.squad(agent).is_some() && ctx.rng.random_int(0, odds) == odds {
            let i = agent.index();
            ctx.sink.emit_sound(ctx.agents.entity[i], SoundCue::Retreat);
            ctx.agents.sound_wait_until[i] = ctx.now + self.config.sound_wait;
        }
    }

    fn on_killed(&self, agent: AgentId, ctx: &mut ActionContext<'_>) {
        let i = agent.index();
        ctx.sink.emit_sound(ctx.agents.entity[i], SoundCue::Retreat);
        ctx.agents.sound_wait_until[i] = ctx.now + self.config.sound_wait;
        if let Some(wave) = ctx.agents.energy_wave[i].take() {
            ctx.sink.remove_effect(wave);
        }
    }
}
