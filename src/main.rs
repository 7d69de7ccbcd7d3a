//! Planet Orbit headless runner
//!
//! Plays an autopilot session without a window and prints a run summary.
//! The browser build enters through `planet_orbit::web` instead.
//!
//! Usage:
//!   cargo run --release -- --seed 42 --difficulty hard --frames 7200

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Result, anyhow};
    use clap::Parser;

    use planet_orbit::runner::{self, RunConfig, RunSummary};
    use planet_orbit::{Difficulty, Settings, Tuning};

    #[derive(Parser)]
    #[command(name = "planet-orbit")]
    #[command(about = "Run a headless Planet Orbit session on autopilot")]
    struct Args {
        /// RNG seed; the same seed always plays the same run
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// easy, normal or hard (defaults to the settings file, then normal)
        #[arg(long)]
        difficulty: Option<String>,

        /// Maximum simulated frames at 60 Hz
        #[arg(long, default_value_t = 3600)]
        frames: u32,

        #[arg(long, default_value_t = 800.0)]
        width: f32,

        #[arg(long, default_value_t = 600.0)]
        height: f32,

        /// Balance overrides (JSON, missing fields keep defaults)
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Player settings (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Score file to record the run into (created if missing)
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let tuning: Tuning = match &args.tuning {
            Some(path) => runner::load_tuning(path)?,
            None => Tuning::default(),
        };
        let settings: Settings = match &args.settings {
            Some(path) => runner::read_json(path)?,
            None => Settings::default(),
        };
        let difficulty = match args.difficulty.as_deref() {
            Some(name) => Difficulty::from_str(name)
                .ok_or_else(|| anyhow!("unknown difficulty '{name}' (easy, normal, hard)"))?,
            None => settings.difficulty,
        };

        let config = RunConfig {
            seed: args.seed,
            difficulty,
            max_frames: args.frames,
            width: args.width,
            height: args.height,
            tuning,
            settings,
        };
        log::info!(
            "Planet Orbit headless run: seed {} on {}",
            config.seed,
            difficulty.as_str()
        );
        let mut summary = runner::run_session(&config)?;

        if let Some(path) = &args.scores {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as f64)
                .unwrap_or(0.0);
            runner::record_run(path, &mut summary, timestamp)?;
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }
        Ok(())
    }

    fn print_summary(s: &RunSummary) {
        println!("=== RUN SUMMARY ===");
        println!("  Seed:        {}", s.seed);
        println!("  Difficulty:  {}", s.difficulty.as_str());
        println!("  Frames:      {} / {}", s.frame_count, s.max_frames);
        println!("  Time:        {:.1}s", s.elapsed_ms / 1000.0);
        println!("  Score:       {}", s.final_score);
        println!("  Level:       {}", s.final_level);
        println!(
            "  Outcome:     {}",
            if s.game_over { "destroyed" } else { "survived" }
        );
        println!();
        println!("  Asteroids:   {}", s.asteroids_spawned);
        println!("  Near misses: {}", s.near_misses);
        println!(
            "  Power-ups:   {} collected of {}",
            s.power_ups_collected, s.power_ups_spawned
        );
        println!("  Bombs:       {}", s.bombs);
        println!("  Blocks:      {}", s.shield_blocks);
        println!("  Level ups:   {}", s.level_ups);
        println!("  Held frames: {}", s.press_frames);
        if let Some(gap) = s.closest_call {
            println!("  Closest:     {gap:.1}px");
        }
        if let Some(record) = &s.record {
            println!();
            match record.rank {
                Some(rank) => println!("  Leaderboard: #{rank}"),
                None => println!("  Leaderboard: did not place"),
            }
            if record.new_best {
                println!("  New best for {}!", s.difficulty.as_str());
            }
            println!("  Credits:     +{}", record.credits_earned);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is planet_orbit::web::init, this is just to satisfy the compiler
}
