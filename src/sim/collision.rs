//! Collision detection and response
//!
//! Obstacles are tested first: a crash ends the frame immediately, so a
//! pickup touched in the same frame is never collected.

use glam::Vec2;

use super::entities::{Obstacle, ParticleMode, Pickup, Player};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of resolving one frame's collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Player hit an obstacle this frame
    pub crashed: bool,
    /// Pickups collected this frame
    pub collected: usize,
}

pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    let player_box = Aabb::from_pos_size(player.pos, player.size);
    player_box.overlaps(&Aabb::from_pos_size(obstacle.pos, obstacle.size))
}

/// Center distance below half the player width plus the pickup radius
pub fn player_touches_pickup(player: &Player, pickup: &Pickup) -> bool {
    player.center().distance(pickup.pos) < player.size.x / 2.0 + pickup.radius
}

/// Resolve obstacle then pickup collisions for the current frame
pub fn resolve_collisions(state: &mut GameState) -> CollisionResult {
    if state
        .obstacles
        .iter()
        .any(|obstacle| player_hits_obstacle(&state.player, obstacle))
    {
        let center = state.player.center();
        let color = state.player.color;
        state.emit_burst(center, color, ParticleMode::Crash, CRASH_BURST);
        state.end_run();
        return CollisionResult {
            crashed: true,
            collected: 0,
        };
    }

    // Split the live set first, then apply effects to the collected ones
    let (collected, remaining): (Vec<Pickup>, Vec<Pickup>) = std::mem::take(&mut state.pickups)
        .into_iter()
        .partition(|pickup| player_touches_pickup(&state.player, pickup));
    state.pickups = remaining;

    for pickup in &collected {
        state.score += pickup.value;
        state.emit_burst(pickup.pos, pickup.color, ParticleMode::Pickup, PICKUP_BURST);
        state.player.add_boost(PICKUP_BOOST_BONUS);
        state.push_event(GameEvent::PickupCollected {
            value: pickup.value,
        });
    }

    CollisionResult {
        crashed: false,
        collected: collected.len(),
    }
}
