//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Pools are allocated once and
//! entities are repositioned, never created or destroyed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::Uniform;
use crate::config::SimulationConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, nothing moving
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Player hit an obstacle
    GameOver,
    /// Player survived long enough
    Won,
}

impl GamePhase {
    /// GameOver and Won only leave via restart
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Something the host may want to react to (sound, HUD, screens)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (start or restart)
    Started,
    /// Score went up; carries the new score
    ScoreChanged(u32),
    /// Forward speed ramped; carries the new speed
    SpeedIncreased(f32),
    /// Obstacle at this pool index scrolled past and was moved back to the spawn band
    ObstacleRespawned(usize),
    GameOver { score: u32 },
    Won { score: u32 },
}

/// One tile of the scrolling ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub z: f32,
}

/// An obstacle in the recycling pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec3,
}

impl Obstacle {
    /// Draw a fresh position inside the spawn band
    pub fn respawn(&mut self, config: &SimulationConfig, rng: &mut impl Uniform) {
        let half_width = config.half_track_width();
        let x = rng.uniform(-half_width, half_width);
        let z = rng.uniform(config.spawn_min_z(), config.spawn_max_z());
        self.pos = Vec3::new(x, config.obstacle_height, z);
    }

    /// True if the position lies inside the spawn band
    pub fn in_spawn_band(&self, config: &SimulationConfig) -> bool {
        let half_width = config.half_track_width();
        (-half_width..=half_width).contains(&self.pos.x)
            && (config.spawn_min_z()..=config.spawn_max_z()).contains(&self.pos.z)
    }
}

/// The runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Only x moves; y and z stay at the start position
    pub pos: Vec3,
}

impl Player {
    /// Strafe by `dx`, clamped to `±bound`
    pub fn strafe(&mut self, dx: f32, bound: f32) {
        self.pos.x = (self.pos.x + dx).clamp(-bound, bound);
    }
}

/// The ball the player dribbles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
}

impl Ball {
    /// Place the ball in front of the player (derived, never integrated)
    pub fn follow(&mut self, player: &Player, config: &SimulationConfig) {
        self.pos = Vec3::new(
            player.pos.x,
            config.ball_height,
            player.pos.z + config.ball_forward_offset,
        );
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Seconds survived this run
    pub elapsed_time: f32,
    /// Whole-second marks crossed this run
    pub score: u32,
    /// Current forward speed
    pub speed_z: f32,
    pub player: Player,
    pub ball: Ball,
    /// Obstacles in pool order
    pub obstacles: Vec<Obstacle>,
    /// Track tiles in pool order (recycling depends on this order)
    pub tracks: Vec<TrackSegment>,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the initial world: tiles laid end to end, obstacles in the spawn band
    pub fn new(config: &SimulationConfig, rng: &mut impl Uniform) -> Self {
        let player = Player {
            pos: config.player_start,
        };
        let mut ball = Ball { pos: Vec3::ZERO };
        ball.follow(&player, config);

        let mut state = Self {
            phase: GamePhase::Idle,
            elapsed_time: 0.0,
            score: 0,
            speed_z: config.initial_speed_z,
            player,
            ball,
            obstacles: vec![Obstacle { pos: Vec3::ZERO }; config.obstacle_count],
            tracks: vec![TrackSegment { z: 0.0 }; config.track_segment_count],
            events: Vec::new(),
        };
        state.reset_world(config, rng);
        state
    }

    /// Put every entity back at its starting position
    pub fn reset_world(&mut self, config: &SimulationConfig, rng: &mut impl Uniform) {
        self.player.pos = config.player_start;
        self.ball.follow(&self.player, config);
        for obstacle in &mut self.obstacles {
            obstacle.respawn(config, rng);
        }
        self.lay_tracks(config);
        self.speed_z = config.initial_speed_z;
    }

    /// Tile i sits at `i * track_depth`
    pub fn lay_tracks(&mut self, config: &SimulationConfig) {
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.z = config.track_depth * i as f32;
        }
    }

    /// Zero the run counters and enter Running
    pub fn begin_run(&mut self, config: &SimulationConfig) {
        self.elapsed_time = 0.0;
        self.score = 0;
        self.speed_z = config.initial_speed_z;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::PcgUniform;

    #[test]
    fn test_new_state_layout() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(7);
        let state = GameState::new(&config, &mut rng);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.tracks.len(), 50);
        assert_eq!(state.obstacles.len(), 5);
        assert_eq!(state.tracks[10].z, 30.0);
        assert!(state.obstacles.iter().all(|o| o.in_spawn_band(&config)));
        assert_eq!(state.ball.pos, Vec3::new(0.0, 0.25, 7.0));
    }

    #[test]
    fn test_player_strafe_clamps() {
        let mut player = Player {
            pos: Vec3::new(3.5, 0.0, 6.0),
        };
        player.strafe(1.0, 3.75);
        assert_eq!(player.pos.x, 3.75);
        player.strafe(-10.0, 3.75);
        assert_eq!(player.pos.x, -3.75);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!GamePhase::Idle.is_terminal());
        assert!(!GamePhase::Running.is_terminal());
        assert!(GamePhase::GameOver.is_terminal());
        assert!(GamePhase::Won.is_terminal());
    }
}
