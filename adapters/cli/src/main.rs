#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays, inspects and restores dungeon crawler sessions.

mod pilot;
mod render;
mod save_file;
mod settings;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dungeon_crawler_core::{Event, SimulationState};
use dungeon_crawler_system_clock::SimulationClock;
use dungeon_crawler_world::query;
use log::Level;

use crate::{pilot::IntentSource, save_file::SaveFile, settings::Settings};

const DEFAULT_SAVE_KEY: &str = "dungeon-crawler-local";

/// Headless dungeon crawler simulation.
#[derive(Debug, Parser)]
#[command(name = "dungeon-crawler", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generates a dungeon and plays it for a number of ticks.
    Run(RunArgs),
    /// Prints a generated dungeon without simulating it.
    Inspect(DungeonArgs),
    /// Verifies a save file and restores it into a regenerated dungeon.
    Load(LoadArgs),
}

#[derive(Debug, Args)]
struct DungeonArgs {
    /// Seed for dungeon generation and every other random draw.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// TOML file with `[generation]` and `[clock]` overrides.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    dungeon: DungeonArgs,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Player moves as N/E/S/W characters, `.` to wait. Defaults to a random walk.
    #[arg(long)]
    script: Option<String>,
    /// Writes a signed save file here once the run ends.
    #[arg(long)]
    save: Option<PathBuf>,
    /// Key used to sign the save file.
    #[arg(long, default_value = DEFAULT_SAVE_KEY)]
    key: String,
    /// Prints the final dungeon after the summary.
    #[arg(long)]
    map: bool,
}

#[derive(Debug, Args)]
struct LoadArgs {
    /// Save file written by `run --save`.
    path: PathBuf,
    /// Key the save file was signed with.
    #[arg(long, default_value = DEFAULT_SAVE_KEY)]
    key: String,
    /// Prints the restored dungeon after the summary.
    #[arg(long)]
    map: bool,
}

/// Entry point for the dungeon crawler command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Run(args) => run(args),
        Commands::Inspect(args) => inspect(&args),
        Commands::Load(args) => load(&args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let seed = args.dungeon.seed;
    let settings = Settings::load(args.dungeon.config.as_deref())?;
    let mut clock = generate(&settings, seed)?;
    let mut intents = match args.script.as_deref() {
        Some(script) => IntentSource::scripted(script)?,
        None => IntentSource::random_walk(seed),
    };

    let mut events = Vec::new();
    clock.start(&mut events);
    log_events(&mut events);

    for _ in 0..args.ticks {
        if clock.state() != SimulationState::Playing {
            break;
        }
        pilot::manage_items(&mut clock, &mut events);
        let intent = intents.next_intent(clock.world());
        clock.tick(intent, &mut events);
        log_events(&mut events);
    }

    print_summary(&clock);
    if args.map {
        print!("{}", render::render_ascii(clock.world()));
    }

    if let Some(path) = args.save {
        let save = SaveFile {
            seed,
            generation: settings.generation,
            clock: settings.clock,
            snapshot: clock.snapshot(),
        };
        let encoded = save
            .encode(args.key.as_bytes())
            .context("failed to encode save file")?;
        fs::write(&path, format!("{encoded}\n"))
            .with_context(|| format!("failed to write save file {}", path.display()))?;
        log::info!("saved session to {}", path.display());
    }

    Ok(())
}

fn inspect(args: &DungeonArgs) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    let clock = generate(&settings, args.seed)?;
    let dungeon = query::dungeon(clock.world());
    let (width, height) = dungeon.dimensions();

    println!(
        "seed {}: {width}x{height}, {} rooms, {} enemies",
        args.seed,
        dungeon.rooms().len(),
        query::enemy_view(clock.world()).len()
    );
    print!("{}", render::render_ascii(clock.world()));
    Ok(())
}

fn load(args: &LoadArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read save file {}", args.path.display()))?;
    let save = SaveFile::decode(&contents, args.key.as_bytes())
        .with_context(|| format!("rejected save file {}", args.path.display()))?;

    let settings = Settings {
        generation: save.generation,
        clock: save.clock,
    };
    let mut clock = generate(&settings, save.seed)?;
    clock
        .restore(&save.snapshot)
        .context("save file does not fit the regenerated dungeon")?;

    print_summary(&clock);
    if args.map {
        print!("{}", render::render_ascii(clock.world()));
    }
    Ok(())
}

fn generate(settings: &Settings, seed: u64) -> Result<SimulationClock> {
    SimulationClock::generate(&settings.generation, &settings.clock, seed)
        .with_context(|| format!("failed to generate a dungeon from seed {seed}"))
}

fn print_summary(clock: &SimulationClock) {
    let world = clock.world();
    let player = query::player(world);
    println!(
        "{:?} at tick {}: player at {} with {}/{} hp, level {}, {} xp, {} enemies left",
        clock.state(),
        query::tick_index(world),
        player.position,
        player.stats.hp(),
        player.stats.max_hp(),
        player.level,
        player.experience,
        query::enemy_view(world).len()
    );
}

fn log_events(events: &mut Vec<Event>) {
    for event in events.drain(..) {
        log::log!(event_level(&event), "{event:?}");
    }
}

fn event_level(event: &Event) -> Level {
    match event {
        Event::TimeAdvanced { .. } => Level::Trace,
        Event::PlayerMoved { .. } | Event::EnemyMoved { .. } => Level::Debug,
        Event::StateTransitionRejected { .. } | Event::InventoryFull { .. } => Level::Warn,
        _ => Level::Info,
    }
}
