//! `RunnerSimulation`: the object a host drives
//!
//! Owns config, world state, the random source and the collision test.
//! Screens, music and the frame loop stay with the host, which reacts to the
//! returned [`TickOutcome`] and the drained [`GameEvent`]s.

use super::collision::{AabbOverlap, CollisionTest};
use super::rng::{PcgUniform, Uniform};
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, TickOutcome, tick};
use crate::audio::Soundtrack;
use crate::config::{ConfigError, SimulationConfig};
use crate::hud::{Screen, Snapshot};
use crate::input::InputState;

pub struct RunnerSimulation<R = PcgUniform, C = AabbOverlap> {
    config: SimulationConfig,
    state: GameState,
    rng: R,
    collision: C,
}

impl RunnerSimulation {
    /// Seeded simulation with box collisions
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_parts(config, PcgUniform::new(seed), AabbOverlap)
    }
}

impl<R: Uniform, C: CollisionTest> RunnerSimulation<R, C> {
    /// Validate `config` and lay out the initial world (phase Idle)
    pub fn with_parts(config: SimulationConfig, mut rng: R, collision: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, &mut rng);
        Ok(Self {
            config,
            state,
            rng,
            collision,
        })
    }

    /// Begin a run from the menu
    ///
    /// Resets the clock, score and speed. Ignored once the run has ended;
    /// use [`restart`](Self::restart) from GameOver or Won.
    pub fn start(&mut self) {
        if self.state.phase.is_terminal() {
            log::debug!("start() ignored in {:?}; restart() required", self.state.phase);
            return;
        }
        self.state.begin_run(&self.config);
        log::info!("Run started");
    }

    /// Put every entity back in place and begin a fresh run
    pub fn restart(&mut self) {
        self.state.reset_world(&self.config, &mut self.rng);
        self.state.begin_run(&self.config);
        log::info!("Run restarted");
    }

    /// Advance one frame
    pub fn tick(&mut self, delta: f32, input: &InputState) -> TickOutcome {
        tick(
            &mut self.state,
            &self.config,
            &TickInput::from(input),
            delta,
            &mut self.rng,
            &self.collision,
        )
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn screen(&self) -> Screen {
        Screen::for_phase(self.state.phase)
    }

    pub fn soundtrack(&self) -> Soundtrack {
        Soundtrack::for_phase(self.state.phase)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that place entities (level scripting, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
