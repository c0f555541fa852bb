//! Obstacle and power-up placement
//!
//! Initial generation retries until every entity respects the minimum
//! spacing. Recycling an obstacle gives up after [`RESPAWN_MAX_TRIES`] and
//! keeps the last candidate, so spacing after a respawn is approximate.

use super::rng::GameRng;
use super::state::{Lanes, Obstacle, PowerUp, obstacle_speed};
use crate::consts::*;
use crate::distance;

/// Rejected candidates between saturation warnings
const STALL_WARN_INTERVAL: u64 = 10_000;

/// Obstacles on screen for a level
pub fn obstacle_count(level: u32) -> usize {
    6 + level as usize * 2
}

/// Build the obstacle set for a level
pub fn generate_obstacles(rng: &mut GameRng, lanes: &Lanes, level: u32) -> Vec<Obstacle> {
    let wanted = obstacle_count(level);
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(wanted);
    let mut rejected = 0u64;

    while obstacles.len() < wanted {
        let candidate = Obstacle::random(rng, lanes, level, OBSTACLE_SPAWN_MAX_DEPTH);
        let crowded = obstacles
            .iter()
            .any(|o| distance(o.pos, candidate.pos) < OBSTACLE_SPACING);
        if crowded {
            rejected += 1;
            if rejected % STALL_WARN_INTERVAL == 0 {
                log::warn!(
                    "Obstacle placement for level {level} struggling: {}/{wanted} placed after {rejected} rejections",
                    obstacles.len()
                );
            }
        } else {
            obstacles.push(candidate);
        }
    }

    log::debug!("Generated {wanted} obstacles for level {level} ({rejected} rejected)");
    obstacles
}

/// Build the power-up set for a level
pub fn generate_power_ups(rng: &mut GameRng, lanes: &Lanes) -> Vec<PowerUp> {
    let mut power_ups: Vec<PowerUp> = Vec::with_capacity(POWER_UP_COUNT);

    while power_ups.len() < POWER_UP_COUNT {
        let candidate = PowerUp::random(rng, lanes);
        let crowded = power_ups
            .iter()
            .any(|p| distance(p.pos, candidate.pos) < POWER_UP_SPACING);
        if !crowded {
            power_ups.push(candidate);
        }
    }

    power_ups
}

/// Recycle the obstacle at `index` back above the top edge
///
/// Reinitializes the slot in place; the index stays valid.
pub fn respawn_obstacle(obstacles: &mut [Obstacle], index: usize, rng: &mut GameRng, lanes: &Lanes, level: u32) {
    let mut tries = 0;
    loop {
        let lane = rng.index(lanes.len());
        let depth = rng.range(OBSTACLE_SPAWN_MIN_DEPTH, OBSTACLE_RESPAWN_MAX_DEPTH);
        let obs = &mut obstacles[index];
        obs.lane = lane;
        obs.pos.x = lanes.x(lane);
        obs.pos.y = -depth;
        obs.w = rng.range(OBSTACLE_MIN_W, OBSTACLE_MAX_W);
        obs.h = rng.range(OBSTACLE_MIN_H, OBSTACLE_MAX_H);
        obs.speed = obstacle_speed(rng, level);
        tries += 1;

        let pos = obs.pos;
        let crowded = obstacles
            .iter()
            .enumerate()
            .any(|(i, o)| i != index && distance(o.pos, pos) < OBSTACLE_SPACING);
        if !crowded || tries >= RESPAWN_MAX_TRIES {
            break;
        }
    }
}
