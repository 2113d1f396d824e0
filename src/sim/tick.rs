//! Per-frame simulation tick
//!
//! Advances the run by a variable frame delta. Order matters and is fixed:
//! strafe, clock and score, speed ramp, obstacles, track scroll, track
//! recycle, win check.

use super::collision::{CollisionTest, HitVolume};
use super::rng::Uniform;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::SimulationConfig;
use crate::consts::TRACK_SCROLL_DIVISOR;
use crate::input::{Action, InputState};
use crate::{crossed_second, whole_seconds};

/// Movement keys sampled once at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

impl From<&InputState> for TickInput {
    fn from(input: &InputState) -> Self {
        Self {
            move_left: input.is_held(Action::MoveLeft),
            move_right: input.is_held(Action::MoveRight),
        }
    }
}

/// What the host should do after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
    Won,
}

impl TickOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickOutcome::Continue => "continue",
            TickOutcome::GameOver => "game_over",
            TickOutcome::Won => "won",
        }
    }

    /// Host should stop its frame loop
    pub fn ends_run(&self) -> bool {
        !matches!(self, TickOutcome::Continue)
    }
}

/// Advance the game state by one frame of `dt` seconds
///
/// Only acts while Running. A negative or non-finite `dt` leaves the state
/// untouched.
pub fn tick(
    state: &mut GameState,
    config: &SimulationConfig,
    input: &TickInput,
    dt: f32,
    rng: &mut impl Uniform,
    collision: &impl CollisionTest,
) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Continue;
    }
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring invalid frame delta {}", dt);
        return TickOutcome::Continue;
    }

    // Strafe; left wins when both are held
    let step = config.lateral_speed * dt;
    if input.move_left {
        state.player.strafe(-step, config.lateral_bound);
    } else if input.move_right {
        state.player.strafe(step, config.lateral_bound);
    }
    state.ball.follow(&state.player, config);

    // One point per frame that crosses a whole-second mark, however many it skips
    state.elapsed_time += dt;
    if crossed_second(state.elapsed_time, dt) {
        state.score += 1;
        state.events.push(GameEvent::ScoreChanged(state.score));

        let seconds = whole_seconds(state.elapsed_time);
        if seconds.rem_euclid(i64::from(config.speed_ramp_interval)) == 0 {
            let ramped = (state.speed_z + config.speed_ramp_amount).min(config.max_speed_z);
            if ramped > state.speed_z {
                state.speed_z = ramped;
                state.events.push(GameEvent::SpeedIncreased(ramped));
                log::debug!("Speed ramped to {} at {}s", ramped, seconds);
            }
        }
    }

    // Obstacles hold still for the first two points
    let mut collided = false;
    if state.score > 1 {
        let player_volume = HitVolume::for_player(&state.player, config);
        let advance = state.speed_z * dt;
        for (i, obstacle) in state.obstacles.iter_mut().enumerate() {
            obstacle.pos.z -= advance;
            if obstacle.pos.z < 0.0 {
                obstacle.respawn(config, rng);
                state.events.push(GameEvent::ObstacleRespawned(i));
                log::debug!("Obstacle {} respawned at {:?}", i, obstacle.pos);
                continue;
            }
            // No early exit: the rest of the pool still moves this frame
            if collision.collides(&player_volume, &HitVolume::for_obstacle(obstacle, config)) {
                collided = true;
            }
        }
    }

    // Tiles scroll at a third of obstacle speed
    let scroll = state.speed_z / TRACK_SCROLL_DIVISOR * dt;
    for track in &mut state.tracks {
        track.z -= scroll;
    }

    // A tile that passed the camera re-attaches behind its predecessor in pool order
    let count = state.tracks.len();
    for i in 0..count {
        if state.tracks[i].z <= 0.0 {
            let prev = (i + count - 1) % count;
            state.tracks[i].z = state.tracks[prev].z + config.track_depth;
        }
    }

    if collided {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
        return TickOutcome::GameOver;
    }

    if state.score >= config.score_to_win {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won { score: state.score });
        log::info!("Run won with score {}", state.score);
        return TickOutcome::Won;
    }

    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::sim::collision::AabbOverlap;
    use crate::sim::rng::PcgUniform;

    fn never(_: &HitVolume, _: &HitVolume) -> bool {
        false
    }

    fn always(_: &HitVolume, _: &HitVolume) -> bool {
        true
    }

    fn running_state(config: &SimulationConfig, rng: &mut PcgUniform) -> GameState {
        let mut state = GameState::new(config, rng);
        state.begin_run(config);
        state
    }

    #[test]
    fn test_idle_does_nothing() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(12345);
        let mut state = GameState::new(&config, &mut rng);
        let before = state.clone();

        let outcome = tick(&mut state, &config, &TickInput::default(), 0.5, &mut rng, &never);
        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(state.elapsed_time, before.elapsed_time);
        assert_eq!(state.tracks, before.tracks);
    }

    #[test]
    fn test_invalid_delta_ignored() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(12345);
        let mut state = running_state(&config, &mut rng);
        let input = TickInput {
            move_left: true,
            move_right: false,
        };

        for dt in [-1.0, f32::NAN, f32::INFINITY] {
            let outcome = tick(&mut state, &config, &input, dt, &mut rng, &always);
            assert_eq!(outcome, TickOutcome::Continue);
        }
        assert_eq!(state.elapsed_time, 0.0);
        assert_eq!(state.player.pos.x, 0.0);
        assert_eq!(state.tracks[1].z, config.track_depth);
    }

    #[test]
    fn test_left_overrides_right() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(1);
        let mut state = running_state(&config, &mut rng);
        let both = TickInput {
            move_left: true,
            move_right: true,
        };

        tick(&mut state, &config, &both, 0.125, &mut rng, &never);
        assert_eq!(state.player.pos.x, -1.25);
        assert_eq!(state.ball.pos.x, state.player.pos.x);
        assert_eq!(state.ball.pos.z, state.player.pos.z + 1.0);
    }

    #[test]
    fn test_score_once_per_crossing() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(2);
        let mut state = running_state(&config, &mut rng);
        let input = TickInput::default();

        // Jump 2.5 seconds in one frame: marks 1 and 2 both skipped, one point
        tick(&mut state, &config, &input, 2.5, &mut rng, &never);
        assert_eq!(state.score, 1);

        // 0.5 more lands on 3.0
        tick(&mut state, &config, &input, 0.5, &mut rng, &never);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_speed_ramps_on_multiples_of_interval() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(3);
        let mut state = running_state(&config, &mut rng);
        let input = TickInput::default();

        for _ in 0..4 {
            tick(&mut state, &config, &input, 1.0, &mut rng, &never);
        }
        assert_eq!(state.speed_z, config.initial_speed_z);

        tick(&mut state, &config, &input, 1.0, &mut rng, &never);
        assert_eq!(state.elapsed_time, 5.0);
        assert_eq!(state.speed_z, config.initial_speed_z + config.speed_ramp_amount);
        assert!(
            state
                .events
                .contains(&GameEvent::SpeedIncreased(config.initial_speed_z + 5.0))
        );
    }

    #[test]
    fn test_speed_clamped_to_max() {
        let config = SimulationConfig {
            max_speed_z: 22.0,
            ..Default::default()
        };
        let mut rng = PcgUniform::new(4);
        let mut state = running_state(&config, &mut rng);

        for _ in 0..20 {
            tick(&mut state, &config, &TickInput::default(), 1.0, &mut rng, &never);
        }
        assert_eq!(state.speed_z, 22.0);
    }

    #[test]
    fn test_obstacles_frozen_during_grace() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(5);
        let mut state = running_state(&config, &mut rng);
        let before: Vec<Vec3> = state.obstacles.iter().map(|o| o.pos).collect();

        // score 1 after this frame: still frozen, and no collision possible
        let outcome = tick(&mut state, &config, &TickInput::default(), 1.5, &mut rng, &always);
        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(state.score, 1);
        let after: Vec<Vec3> = state.obstacles.iter().map(|o| o.pos).collect();
        assert_eq!(before, after);

        // score 2: obstacles move and the always-hit test fires
        let outcome = tick(&mut state, &config, &TickInput::default(), 1.0, &mut rng, &always);
        assert_eq!(state.score, 2);
        assert_eq!(outcome, TickOutcome::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_collision_with_real_boxes() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(6);
        let mut state = running_state(&config, &mut rng);
        state.score = 5;
        state.elapsed_time = 5.25;

        // Park every obstacle far to the side, then one right in the lane
        for obstacle in &mut state.obstacles {
            obstacle.pos = Vec3::new(4.5, config.obstacle_height, 100.0);
        }
        // Moves 20 * 0.125 = 2.5 toward the player and lands on them
        state.obstacles[2].pos = Vec3::new(0.0, config.obstacle_height, 8.5);

        let outcome = tick(
            &mut state,
            &config,
            &TickInput::default(),
            0.125,
            &mut rng,
            &AabbOverlap,
        );
        assert_eq!(outcome, TickOutcome::GameOver);
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver { score: 5 }));
        // Obstacles after the hit still advanced
        assert_eq!(state.obstacles[4].pos.z, 97.5);
    }

    #[test]
    fn test_respawned_obstacle_is_not_hit() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(7);
        let mut state = running_state(&config, &mut rng);
        state.score = 3;
        state.elapsed_time = 3.25;
        for obstacle in &mut state.obstacles {
            obstacle.pos.z = 0.5;
        }

        let outcome = tick(&mut state, &config, &TickInput::default(), 0.125, &mut rng, &always);
        assert_eq!(outcome, TickOutcome::Continue);
        assert!(state.obstacles.iter().all(|o| o.in_spawn_band(&config)));
        let respawns = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleRespawned(_)))
            .count();
        assert_eq!(respawns, config.obstacle_count);
    }

    #[test]
    fn test_track_recycles_behind_predecessor() {
        let config = SimulationConfig::default();
        let mut rng = PcgUniform::new(8);
        let mut state = running_state(&config, &mut rng);

        // Speed 20, scroll 20/3 per second; a 0.75 s frame moves 5 units
        tick(&mut state, &config, &TickInput::default(), 0.75, &mut rng, &never);

        // Tile 0 was at 0 and tile 1 at 3, both passed the camera
        let last = state.tracks[49].z;
        assert!((state.tracks[0].z - (last + 3.0)).abs() < 1e-4);
        assert!((state.tracks[1].z - (last + 6.0)).abs() < 1e-4);
        assert!((state.tracks[2].z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_win_at_score_to_win() {
        let config = SimulationConfig {
            score_to_win: 3,
            ..Default::default()
        };
        let mut rng = PcgUniform::new(9);
        let mut state = running_state(&config, &mut rng);
        let input = TickInput::default();

        assert_eq!(tick(&mut state, &config, &input, 1.0, &mut rng, &never), TickOutcome::Continue);
        assert_eq!(tick(&mut state, &config, &input, 1.0, &mut rng, &never), TickOutcome::Continue);
        assert_eq!(tick(&mut state, &config, &input, 1.0, &mut rng, &never), TickOutcome::Won);
        assert_eq!(state.phase, GamePhase::Won);

        // Terminal phases ignore further ticks
        assert_eq!(tick(&mut state, &config, &input, 1.0, &mut rng, &never), TickOutcome::Continue);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_game_over_beats_win_in_same_frame() {
        let config = SimulationConfig {
            score_to_win: 3,
            ..Default::default()
        };
        let mut rng = PcgUniform::new(10);
        let mut state = running_state(&config, &mut rng);
        state.score = 2;
        state.elapsed_time = 2.5;

        let outcome = tick(&mut state, &config, &TickInput::default(), 0.5, &mut rng, &always);
        assert_eq!(state.score, 3);
        assert_eq!(outcome, TickOutcome::GameOver);
    }

    #[test]
    fn test_tick_input_from_keys() {
        let mut keys = InputState::new();
        keys.key_down("KeyQ");
        let input = TickInput::from(&keys);
        assert!(input.move_left);
        assert!(!input.move_right);
    }
}
