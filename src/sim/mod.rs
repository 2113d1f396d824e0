//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Randomness only through the injected `Uniform` source
//! - Stable iteration order (pool index)
//! - No rendering, audio or DOM dependencies

pub mod collision;
pub mod rng;
pub mod runner;
pub mod state;
pub mod tick;

pub use collision::{AabbOverlap, CollisionTest, HitVolume};
pub use rng::{PcgUniform, Uniform};
pub use runner::RunnerSimulation;
pub use state::{Ball, GameEvent, GamePhase, GameState, Obstacle, Player, TrackSegment};
pub use tick::{TickInput, TickOutcome, tick};
