//! Hop Runner entry point
//!
//! Native builds run a headless session: the autopilot plays runs against a
//! file-backed store and the outcome is logged. There is no presentation
//! layer; a front end drives `Session` directly.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use hop_runner::consts::*;
    use hop_runner::sim::GamePhase;
    use hop_runner::sim::autopilot::wants_jump;
    use hop_runner::{FileStore, Session, Tuning, host};

    #[derive(Parser)]
    #[command(name = "hop-runner")]
    #[command(about = "Play Hop Runner headlessly with the autopilot")]
    pub struct Cli {
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Runs to play
        #[arg(long, default_value_t = 1)]
        runs: u32,

        /// Tick limit per run
        #[arg(long, default_value_t = 60 * 60 * u64::from(TICK_RATE))]
        max_ticks: u64,

        /// Tuning overrides (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Progress file
        #[arg(long, default_value = "hop-runner-save.json")]
        save: PathBuf,

        /// Spend held revives when a run ends
        #[arg(long)]
        use_revives: bool,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let tuning = Tuning::load_or_default(cli.tuning.as_deref());
        let store = FileStore::open(&cli.save)
            .with_context(|| format!("Failed to open {}", cli.save.display()))?;

        let seed = cli.seed.unwrap_or_else(rand::random);
        log::info!("Session seed: {seed}");
        let mut session = Session::new(store, tuning, seed, &host::today_key());

        for run in 1..=cli.runs {
            session.start_game();
            play(&mut session, cli.max_ticks, cli.use_revives);

            let snapshot = session.snapshot();
            if snapshot.phase == GamePhase::GameOverPending {
                // Declining the revive commits the score
                session.skip_revive()?;
            }
            log::info!(
                "Run {run}: score {}, {} coins, max combo {}, {:.1}s",
                snapshot.score,
                snapshot.run_coins,
                snapshot.max_combo,
                session.state().time_ticks as f32 * SIM_DT
            );
        }

        log::info!("Progress saved to {}", session.store().path().display());
        let profile = session.profile();
        log::info!(
            "High score {}, total coins {}, revives {}",
            profile.high_score,
            profile.total_coins,
            profile.revives
        );
        for challenge in session.challenges() {
            log::info!(
                "[{}] {} ({}/{})",
                if challenge.claimed { "x" } else if challenge.completed { "!" } else { " " },
                challenge.description,
                challenge.progress.min(challenge.target),
                challenge.target
            );
        }
        Ok(())
    }

    fn play(session: &mut Session<FileStore>, max_ticks: u64, use_revives: bool) {
        while session.state().time_ticks < max_ticks {
            match session.phase() {
                GamePhase::Running => {
                    if wants_jump(session.state()) {
                        session.jump();
                    }
                    session.tick();
                }
                GamePhase::GameOverPending if use_revives && session.profile().revives > 0 => {
                    if let Err(e) = session.revive() {
                        log::warn!("Revive failed: {e}");
                        return;
                    }
                }
                _ => return,
            }
        }
        log::info!("Tick limit reached");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hop Runner (headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build embeds the library; there is no wasm entry point here
}
