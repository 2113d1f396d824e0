//! HUD data for the host UI
//!
//! The simulation never touches the DOM. Hosts read a [`Snapshot`] each frame
//! and pick which screen to show from the phase.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Which overlay the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title menu with the play button
    Menu,
    /// In-run score counter only
    Hud,
    /// Game over screen with restart button
    GameOver,
    /// Win screen with restart button
    Win,
}

impl Screen {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle => Screen::Menu,
            GamePhase::Running => Screen::Hud,
            GamePhase::GameOver => Screen::GameOver,
            GamePhase::Won => Screen::Win,
        }
    }

    /// DOM id of the overlay element, if any
    pub fn element_id(&self) -> Option<&'static str> {
        match self {
            Screen::Menu => Some("menu"),
            Screen::Hud => None,
            Screen::GameOver => Some("gameOverScreen"),
            Screen::Win => Some("winScreen"),
        }
    }
}

/// Read-only view of a run for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub elapsed_time: f32,
    pub speed_z: f32,
    pub player_x: f32,
    pub ball_x: f32,
}

impl Snapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            elapsed_time: state.elapsed_time,
            speed_z: state.speed_z,
            player_x: state.player.pos.x,
            ball_x: state.ball.pos.x,
        }
    }

    /// In-run counter text
    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    /// Text for the game over and win screens
    pub fn final_score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn to_json(&self) -> String {
        // Plain numbers and unit enums cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}
