//! Soundtrack cues
//!
//! The simulation decides which music should be playing; the host owns the
//! actual players (Web Audio, native mixer, nothing at all).

use serde::{Deserialize, Serialize};

use crate::sim::GamePhase;

/// Music track the host should have playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Soundtrack {
    /// Looping menu music
    Menu,
    /// Looping in-run music
    Play,
    /// One-shot game over sting
    Ending,
    /// Everything stopped (after a win)
    Silence,
}

impl Soundtrack {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle => Soundtrack::Menu,
            GamePhase::Running => Soundtrack::Play,
            GamePhase::GameOver => Soundtrack::Ending,
            GamePhase::Won => Soundtrack::Silence,
        }
    }

    /// Asset name of the track, `None` for silence
    pub fn asset(&self) -> Option<&'static str> {
        match self {
            Soundtrack::Menu => Some("menuMusic"),
            Soundtrack::Play => Some("playMusic"),
            Soundtrack::Ending => Some("endingMusic"),
            Soundtrack::Silence => None,
        }
    }

    /// Whether the track loops
    pub fn looping(&self) -> bool {
        matches!(self, Soundtrack::Menu | Soundtrack::Play)
    }

    /// Volume the track plays at (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        match self {
            Soundtrack::Play => 0.4,
            Soundtrack::Menu | Soundtrack::Ending => 0.3,
            Soundtrack::Silence => 0.0,
        }
    }
}
