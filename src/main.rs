//! Track Runner native entry point
//!
//! Headless host: drives the simulation at a fixed frame rate, optionally
//! steering with a simple autopilot, and reports how the run ended. The
//! browser build uses `track_runner::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use track_runner::input::{Action, InputState};
    use track_runner::sim::{
        AabbOverlap, GameEvent, GameState, HitVolume, PcgUniform, RunnerSimulation, TickOutcome,
    };
    use track_runner::SimulationConfig;

    /// Run the endless runner without a window
    #[derive(Debug, Parser)]
    #[command(name = "track-runner", version, about)]
    pub struct Cli {
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON file overriding the default tuning
        #[arg(long)]
        config: Option<PathBuf>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Stop after this many frames even if the run is still going
        #[arg(long, default_value_t = 60 * 120)]
        max_frames: u32,
        /// Dodge obstacles automatically instead of running straight
        #[arg(long)]
        autopilot: bool,
        /// Print the effective config as JSON and exit
        #[arg(long)]
        print_config: bool,
    }

    /// Sidestep the nearest obstacle coming down our lane
    fn autopilot(state: &GameState, config: &SimulationConfig, input: &mut InputState) {
        input.release(Action::MoveLeft);
        input.release(Action::MoveRight);

        let player = HitVolume::for_player(&state.player, config);
        let lane = player.half_extents.x + config.obstacle_hit_half_extents.x + 0.3;
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.pos.z >= player.min().z - config.obstacle_hit_half_extents.z)
            .filter(|o| (o.pos.x - state.player.pos.x).abs() < lane)
            .min_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

        if let Some(obstacle) = threat {
            let room_left = state.player.pos.x + config.lateral_bound;
            let room_right = config.lateral_bound - state.player.pos.x;
            let go_left = if obstacle.pos.x > state.player.pos.x {
                room_left > lane
            } else {
                room_right <= lane
            };
            input.press(if go_left {
                Action::MoveLeft
            } else {
                Action::MoveRight
            });
        }
    }

    pub fn run(cli: Cli) -> anyhow::Result<()> {
        let config = match &cli.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if cli.print_config {
            println!("{}", config.to_json_pretty()?);
            return Ok(());
        }

        anyhow::ensure!(cli.fps > 0, "--fps must be at least 1");
        let rng = match cli.seed {
            Some(seed) => PcgUniform::new(seed),
            None => PcgUniform::from_entropy(),
        };
        let seed = rng.seed();
        let mut sim =
            RunnerSimulation::with_parts(config, rng, AabbOverlap).context("building simulation")?;
        log::info!("Game initialized with seed: {}", seed);

        let dt = 1.0 / cli.fps as f32;
        let mut input = InputState::new();
        let mut outcome = TickOutcome::Continue;
        let mut frames = 0;

        sim.start();
        while frames < cli.max_frames {
            if cli.autopilot {
                autopilot(sim.state(), sim.config(), &mut input);
            }
            outcome = sim.tick(dt, &input);
            frames += 1;

            for event in sim.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) if score % 10 == 0 => {
                        log::info!("Score {}", score)
                    }
                    GameEvent::SpeedIncreased(speed) => log::info!("Speed now {}", speed),
                    _ => {}
                }
            }

            if outcome.ends_run() {
                break;
            }
        }

        let snapshot = sim.snapshot();
        log::info!(
            "Run ended after {} frames ({:.2}s): {}",
            frames,
            snapshot.elapsed_time,
            outcome.as_str()
        );
        log::info!("Soundtrack: {:?}", sim.soundtrack());
        println!("{} {}", outcome.as_str(), snapshot.final_score_text());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Track Runner (native) starting...");
    native::run(native::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `track_runner::web::wasm_init`
}
