//! Hit volumes and the player-vs-obstacle test
//!
//! Hit volumes are invisible boxes distinct from the rendered meshes. The
//! player capsule is approximated by its bounding box.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};
use crate::config::SimulationConfig;

/// Axis-aligned box given by centre and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl HitVolume {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Boxes overlap on every axis (touching faces count)
    pub fn intersects(&self, other: &HitVolume) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.cmple(reach).all()
    }

    pub fn for_player(player: &Player, config: &SimulationConfig) -> Self {
        Self::new(
            player.pos + config.player_hit_offset,
            config.player_hit_half_extents,
        )
    }

    pub fn for_obstacle(obstacle: &Obstacle, config: &SimulationConfig) -> Self {
        Self::new(obstacle.pos, config.obstacle_hit_half_extents)
    }
}

/// Decides whether the player touched an obstacle
pub trait CollisionTest {
    fn collides(&self, player: &HitVolume, obstacle: &HitVolume) -> bool;
}

/// Plain box overlap
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbOverlap;

impl CollisionTest for AabbOverlap {
    fn collides(&self, player: &HitVolume, obstacle: &HitVolume) -> bool {
        player.intersects(obstacle)
    }
}

impl<F> CollisionTest for F
where
    F: Fn(&HitVolume, &HitVolume) -> bool,
{
    fn collides(&self, player: &HitVolume, obstacle: &HitVolume) -> bool {
        self(player, obstacle)
    }
}
