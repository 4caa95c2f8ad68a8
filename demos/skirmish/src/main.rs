//! skirmish — a three-hound pack against one player.
//!
//! The pack spawns in a loose wedge facing a player 200 units away, with a
//! wooden crate and a low wall in the field.  Pass a schedule CSV as the
//! first argument to replace the built-in schedule library; output CSVs land
//! in `./output/skirmish`.
//!
//! `RUST_LOG=ph_sim=debug` shows task failures and unhandled events.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use ph_agent::{AgentStoreBuilder, SquadRegistry};
use ph_behavior::{beam_color, AlphaHound, HoundConfig};
use ph_combat::SonicReport;
use ph_core::{Aabb, AgentId, EntityClass, EntityId, SimConfig, Tick, Vec3};
use ph_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ph_schedule::{load_library_csv, ScheduleLibrary};
use ph_sim::{ScheduleChange, SimBuilder, SimObserver, TickSummary};
use ph_spatial::{EntityIndexBuilder, StraightLineNavigator, WorldEntity, WorldQuery};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TOTAL_TICKS:           u64 = 300; // 30 s at 10 Hz
const OUTPUT_INTERVAL_TICKS: u64 = 10;
const PLAYER_HEALTH:         f32 = 500.0;

// ── Observer wrapper to keep running totals ───────────────────────────────────

struct TallyObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    schedules: usize,
    blasts:    usize,
    hits:      usize,
}

impl<W: OutputWriter> TallyObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, schedules: 0, blasts: 0, hits: 0 }
    }
}

impl<W: OutputWriter> SimObserver for TallyObserver<W> {
    fn on_schedule(&mut self, tick: Tick, change: &ScheduleChange) {
        self.schedules += 1;
        self.inner.on_schedule(tick, change);
    }

    fn on_sonic_attack(&mut self, tick: Tick, agent: AgentId, report: &SonicReport) {
        self.blasts += 1;
        self.inner.on_sonic_attack(tick, agent, report);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.hits += summary.hits;
        if summary.tick.0 % 50 == 0 {
            info!(tick = %summary.tick, alive = summary.alive, blasts = self.blasts, "progress");
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &ph_agent::AgentStore) {
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Schedule library: built-in unless a CSV is given.
    let library = match std::env::args().nth(1) {
        Some(path) => load_library_csv(Path::new(&path))
            .with_context(|| format!("loading schedules from {path}"))?,
        None => ScheduleLibrary::hound_alpha(),
    };

    // 2. World: pack, player, a crate, one wall.
    let pack = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(-60.0, 80.0, 0.0), Vec3::new(-60.0, -80.0, 0.0)];
    let mut b = EntityIndexBuilder::new();
    let hounds: Vec<_> = pack
        .iter()
        .map(|&p| b.add(|id| WorldEntity::new(id, EntityClass::AlphaHound, p)))
        .collect();
    let player = b.add(|id| {
        let mut e = WorldEntity::new(id, EntityClass::Player, Vec3::new(200.0, 0.0, 0.0));
        e.health = PLAYER_HEALTH;
        e
    });
    let crate_box = b.add(|id| {
        WorldEntity::new(id, EntityClass::Breakable, Vec3::new(120.0, 60.0, 0.0))
            .with_hull(Aabb::new(Vec3::new(-16.0, -16.0, 0.0), Vec3::new(16.0, 16.0, 32.0)))
            .with_flags(true, true)
    });
    b.add_occluder(Aabb::new(Vec3::new(100.0, -140.0, 0.0), Vec3::new(116.0, -60.0, 96.0)));
    let world = b.build();

    // 3. Agents, one squad led by the first hound.
    let config = HoundConfig::default();
    let (mut store, rngs) = AgentStoreBuilder::new(pack.len(), SEED)
        .spawn_health(config.spawn_health)
        .build();
    let mut squads = SquadRegistry::new();
    let squad = squads.create();
    for (i, (&pos, &body)) in pack.iter().zip(&hounds).enumerate() {
        store.entity[i] = body;
        store.position[i] = pos;
        store.join_squad(&mut squads, AgentId(i as u32), squad)?;
    }
    let beam = beam_color(squads.num_members(squad));
    println!(
        "Pack of {} hounds vs player {player}, beam rgb({}, {}, {})",
        pack.len(),
        beam.r,
        beam.g,
        beam.b
    );

    // 4. Sim.
    let sim_config = SimConfig {
        total_ticks:           TOTAL_TICKS,
        seed:                  SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        ..SimConfig::default()
    };
    let mut sim = SimBuilder::new(sim_config, store, rngs, AlphaHound::new(config)?, StraightLineNavigator)
        .world(world)
        .squads(squads)
        .library(library)
        .build()?;

    // 5. Output.
    let out_dir = PathBuf::from("output/skirmish");
    std::fs::create_dir_all(&out_dir)?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = TallyObserver::new(SimOutputObserver::new(writer));

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.inner.take_error() {
        return Err(anyhow::Error::new(e).context("writing output"));
    }

    // 7. Report.
    let health = |e: EntityId| sim.world.entity(e).map_or(0.0, |w| w.health);
    println!();
    println!("Ran {TOTAL_TICKS} ticks in {:.2?}", elapsed);
    println!("  schedule changes : {}", obs.schedules);
    println!("  sonic blasts     : {}", obs.blasts);
    println!("  damage events    : {}", obs.hits);
    println!("  player health    : {:.1} / {PLAYER_HEALTH}", health(player));
    println!("  crate health     : {:.1}", health(crate_box));
    for agent in sim.agents.agent_ids() {
        let i = agent.index();
        println!(
            "  {agent}: {} hp, {}, {}",
            sim.agents.health[i],
            sim.agents.state[i],
            sim.agents.current_schedule[i].map_or("no schedule", |s| s.as_str()),
        );
    }
    println!("Output written to {}", out_dir.display());
    Ok(())
}
