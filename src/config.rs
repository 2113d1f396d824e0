//! Simulation tuning
//!
//! Fixed at construction. Defaults reproduce the shipped game; a JSON file
//! may override any subset of fields.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`SimulationConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Immutable game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Track ===
    pub track_width: f32,
    /// Length of one track tile along z
    pub track_depth: f32,
    pub track_segment_count: usize,

    // === Obstacles ===
    pub obstacle_count: usize,
    /// Centre of the obstacle spawn band along z
    pub spawn_base_z: f32,
    /// Spawn band spans `spawn_base_z ± spawn_half_depth`
    pub spawn_half_depth: f32,
    pub obstacle_height: f32,

    // === Speed ===
    pub initial_speed_z: f32,
    pub max_speed_z: f32,
    /// Whole seconds between speed ramps
    pub speed_ramp_interval: u32,
    pub speed_ramp_amount: f32,

    // === Player ===
    pub lateral_speed: f32,
    pub lateral_bound: f32,
    pub player_start: Vec3,
    pub ball_height: f32,
    pub ball_forward_offset: f32,

    // === Hit volumes ===
    /// Player box half extents
    pub player_hit_half_extents: Vec3,
    /// Offset from the player origin to the centre of its box
    pub player_hit_offset: Vec3,
    pub obstacle_hit_half_extents: Vec3,

    pub score_to_win: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            track_width: TRACK_WIDTH,
            track_depth: TRACK_DEPTH,
            track_segment_count: TRACK_SEGMENT_COUNT,

            obstacle_count: OBSTACLE_COUNT,
            spawn_base_z: SPAWN_POS_Z,
            spawn_half_depth: SPAWN_HALF_DEPTH,
            obstacle_height: OBSTACLE_HEIGHT,

            initial_speed_z: SPEED_Z,
            max_speed_z: MAX_SPEED_Z,
            speed_ramp_interval: SPEED_RAMP_INTERVAL,
            speed_ramp_amount: SPEED_RAMP_AMOUNT,

            lateral_speed: SPEED_X,
            lateral_bound: LATERAL_BOUND,
            player_start: Vec3::new(0.0, TRACK_HEIGHT / 2.0, PLAYER_START_Z),
            ball_height: BALL_HEIGHT,
            ball_forward_offset: BALL_FORWARD_OFFSET,

            player_hit_half_extents: Vec3::new(
                PLAYER_HIT_WIDTH / 2.0,
                PLAYER_HIT_HEIGHT / 2.0,
                PLAYER_HIT_WIDTH / 2.0,
            ),
            player_hit_offset: Vec3::new(0.0, PLAYER_HIT_HEIGHT / 2.0, 0.0),
            obstacle_hit_half_extents: Vec3::splat(OBSTACLE_HIT_SIZE / 2.0),

            score_to_win: SCORE_TO_WIN,
        }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lowest z an obstacle can spawn at
    #[inline]
    pub fn spawn_min_z(&self) -> f32 {
        self.spawn_base_z - self.spawn_half_depth
    }

    /// Highest z an obstacle can spawn at
    #[inline]
    pub fn spawn_max_z(&self) -> f32 {
        self.spawn_base_z + self.spawn_half_depth
    }

    /// Half the track width (obstacles spawn in `±half_track_width`)
    #[inline]
    pub fn half_track_width(&self) -> f32 {
        self.track_width / 2.0
    }

    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and positive",
                })
            }
        }
        fn finite(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                })
            }
        }
        fn finite_vec(field: &'static str, v: Vec3) -> Result<(), ConfigError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                })
            }
        }

        positive("track_width", self.track_width)?;
        positive("track_depth", self.track_depth)?;
        if self.track_segment_count == 0 {
            return Err(ConfigError::Invalid {
                field: "track_segment_count",
                reason: "must be at least 1",
            });
        }
        if self.obstacle_count == 0 {
            return Err(ConfigError::Invalid {
                field: "obstacle_count",
                reason: "must be at least 1",
            });
        }
        finite("spawn_base_z", self.spawn_base_z)?;
        if !(self.spawn_half_depth.is_finite() && self.spawn_half_depth >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "spawn_half_depth",
                reason: "must be finite and non-negative",
            });
        }
        if self.spawn_min_z() < 0.0 {
            return Err(ConfigError::Invalid {
                field: "spawn_base_z",
                reason: "spawn band must lie at z >= 0",
            });
        }
        finite("obstacle_height", self.obstacle_height)?;

        positive("initial_speed_z", self.initial_speed_z)?;
        positive("max_speed_z", self.max_speed_z)?;
        if self.max_speed_z < self.initial_speed_z {
            return Err(ConfigError::Invalid {
                field: "max_speed_z",
                reason: "must be >= initial_speed_z",
            });
        }
        if self.speed_ramp_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "speed_ramp_interval",
                reason: "must be at least 1 second",
            });
        }
        if !(self.speed_ramp_amount.is_finite() && self.speed_ramp_amount >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "speed_ramp_amount",
                reason: "must be finite and non-negative",
            });
        }

        positive("lateral_speed", self.lateral_speed)?;
        positive("lateral_bound", self.lateral_bound)?;
        finite_vec("player_start", self.player_start)?;
        if self.player_start.x.abs() > self.lateral_bound {
            return Err(ConfigError::Invalid {
                field: "player_start",
                reason: "x must lie within lateral_bound",
            });
        }
        finite("ball_height", self.ball_height)?;
        finite("ball_forward_offset", self.ball_forward_offset)?;

        finite_vec("player_hit_half_extents", self.player_hit_half_extents)?;
        finite_vec("player_hit_offset", self.player_hit_offset)?;
        finite_vec("obstacle_hit_half_extents", self.obstacle_hit_half_extents)?;

        if self.score_to_win == 0 {
            return Err(ConfigError::Invalid {
                field: "score_to_win",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
