//! Console demonstration of the race engine.
//!
//! Lists the catalog, simulates one race and prints the result, the tail
//! of the event log and the history. `RUST_LOG=debug` shows engine logs.
//!
//! Run with `cargo run --features demo --bin kart-demo`.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use rust_kart::catalog::Catalog;
use rust_kart::core::{EngineConfig, GameRng};
use rust_kart::session::RaceService;

#[derive(Debug, Parser)]
#[command(name = "kart-demo", version)]
#[command(about = "Simulate a kart race in the terminal")]
struct Args {
    /// Participant ids (comma-separated)
    #[arg(long, default_value = "mario,luigi,peach")]
    participants: String,

    /// Track id
    #[arg(long, default_value = "mario-circuit")]
    track: String,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause between rounds in milliseconds; overrides the config file
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for a reproducible race
    #[arg(long)]
    seed: Option<u64>,

    /// Number of log entries to print at the end
    #[arg(long, default_value_t = 5)]
    log_tail: usize,

    /// List participants and tracks and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = Catalog::builtin().context("loading built-in catalog")?;
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&text).context("parsing engine config")?
        }
        None => EngineConfig::default(),
    };
    if let Some(delay_ms) = args.delay_ms {
        config = config.with_round_delay(Duration::from_millis(delay_ms));
    }
    config.validate().context("invalid engine config")?;
    let rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let mut service = RaceService::with_rng(catalog, config, rng);

    println!("🏁 RUST KART RACING SIMULATOR\n");
    print_catalog(&service);
    if args.list {
        return Ok(());
    }

    let participants: Vec<&str> = args
        .participants
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    println!("\n🚀 CREATING RACE...");
    let created = service
        .create_race(participants.as_slice(), &args.track)
        .context("creating race")?;
    println!("✅ Race created with id {}", created.race_id);

    println!("\n🏃 SIMULATING RACE...\n");
    let outcome = service
        .simulate_to_completion(&created.race_id)
        .context("simulating race")?;

    if let Some(winner) = &outcome.winner {
        println!("🏆 WINNER: {} {} ({} pts)", winner.glyph, winner.name, winner.score);
    }

    println!("\n📊 FINAL STANDINGS:");
    for entry in &outcome.final_ranking {
        println!("{}. {} {}: {} pts", entry.position, entry.glyph, entry.name, entry.points);
    }

    println!("\n📈 STATS:");
    println!("⏱️  Duration: {}", outcome.stats.elapsed);
    println!("🔄 Rounds: {}", outcome.stats.current_round);
    println!("👥 Participants: {}", outcome.stats.participants);

    println!("\n📝 RACE LOG (last {} entries):", args.log_tail);
    for entry in outcome.log.tail(args.log_tail) {
        println!("[R{}] {}", entry.round, entry.message);
    }

    println!("\n📚 HISTORY:");
    for (idx, race) in service.history(None).iter().enumerate() {
        let winner = race
            .winner
            .as_ref()
            .map_or_else(|| "-".to_string(), |w| format!("{} {}", w.glyph, w.name));
        let ended = race
            .ended_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
        println!("{}. Winner: {} - {}", idx + 1, winner, ended);
    }

    Ok(())
}

fn print_catalog(service: &RaceService) {
    println!("👥 PARTICIPANTS:");
    for p in service.list_participant_templates() {
        let a = p.attributes;
        println!(
            "{} {} ({}) - SPD:{} HND:{} PWR:{}",
            p.glyph, p.name, p.id, a.speed, a.handling, a.power
        );
    }

    println!("\n🏁 TRACKS:");
    for t in service.list_track_templates() {
        println!("{} {} ({}) - {} ({} laps)", t.glyph, t.name, t.id, t.difficulty, t.laps);
    }
}
