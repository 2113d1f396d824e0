//! Track Runner - An endless runner on a scrolling football pitch
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track recycling, obstacles, scoring)
//! - `config`: Data-driven game balance
//! - `input`: Key state with held/triggered queries
//! - `hud`: Read-only snapshot and screen selection for the host UI
//! - `audio`: Soundtrack cues for the host's music player

pub mod audio;
pub mod config;
pub mod hud;
pub mod input;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::Soundtrack;
pub use config::{ConfigError, SimulationConfig};
pub use hud::{Screen, Snapshot};
pub use input::{Action, InputState};
pub use sim::{GamePhase, RunnerSimulation, TickOutcome};

/// Game configuration constants
pub mod consts {
    /// Track dimensions
    pub const TRACK_WIDTH: f32 = 10.0;
    pub const TRACK_HEIGHT: f32 = 0.1;
    pub const TRACK_DEPTH: f32 = 3.0;
    pub const TRACK_SEGMENT_COUNT: usize = 50;

    /// Obstacle pool
    pub const OBSTACLE_COUNT: usize = 5;
    /// Centre of the spawn band (just past the far end of the track)
    pub const SPAWN_POS_Z: f32 = TRACK_DEPTH * TRACK_SEGMENT_COUNT as f32;
    /// Spawn band extends this far either side of `SPAWN_POS_Z`
    pub const SPAWN_HALF_DEPTH: f32 = 15.0;
    pub const OBSTACLE_HEIGHT: f32 = 0.5;

    /// Forward scroll speed (units/s)
    pub const SPEED_Z: f32 = 20.0;
    pub const MAX_SPEED_Z: f32 = 120.0;
    /// Every this many whole seconds the scroll speed ramps up
    pub const SPEED_RAMP_INTERVAL: u32 = 5;
    pub const SPEED_RAMP_AMOUNT: f32 = 5.0;
    /// Track tiles scroll slower than obstacles
    pub const TRACK_SCROLL_DIVISOR: f32 = 3.0;

    /// Player strafing
    pub const SPEED_X: f32 = 10.0;
    pub const LATERAL_BOUND: f32 = 3.75;
    pub const PLAYER_START_Z: f32 = 6.0;

    /// Ball rolls just ahead of the player's feet
    pub const BALL_HEIGHT: f32 = 0.25;
    pub const BALL_FORWARD_OFFSET: f32 = 1.0;

    /// Player capsule (0.4 wide, 1.7 tall) approximated as a box
    pub const PLAYER_HIT_WIDTH: f32 = 0.4;
    pub const PLAYER_HIT_HEIGHT: f32 = 1.7;
    pub const OBSTACLE_HIT_SIZE: f32 = 1.0;

    /// Seconds survived needed to win
    pub const SCORE_TO_WIN: u32 = 100;
}

/// Whole seconds contained in `t` (floor, as the scoring clock counts them)
#[inline]
pub fn whole_seconds(t: f32) -> i64 {
    t.floor() as i64
}

/// True if advancing a clock from `t - dt` to `t` crossed a whole-second mark
#[inline]
pub fn crossed_second(t: f32, dt: f32) -> bool {
    whole_seconds(t) != whole_seconds(t - dt)
}
