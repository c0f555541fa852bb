//! Collision predicates between the car and road entities
//!
//! Obstacles use box overlap against the car's hitbox; power-ups use a
//! centre-distance test against the car's width.

use super::state::{Obstacle, Player, PowerUp};
use crate::{aabb_overlap, distance};

/// True when the obstacle's box overlaps the player's hitbox
///
/// Intangibility is not considered here; the caller decides whether a hit
/// counts.
pub fn obstacle_hits_player(obstacle: &Obstacle, player: &Player) -> bool {
    aabb_overlap(obstacle.pos, obstacle.size(), player.pos, player.hitbox())
}

/// True when the player is close enough to pick up the power-up
pub fn power_up_touches_player(power_up: &PowerUp, player: &Player) -> bool {
    distance(power_up.pos, player.pos) < (power_up.size + player.size) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CANVAS_HEIGHT;
    use crate::sim::rng::GameRng;
    use crate::sim::state::{Lanes, ObstacleKind, PowerUpKind};
    use glam::Vec2;

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(&Lanes::default(), CANVAS_HEIGHT);
        player.pos = Vec2::new(x, y);
        player
    }

    fn obstacle_at(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            lane: 0,
            pos: Vec2::new(x, y),
            w,
            h,
            speed: 3.0,
            kind: ObstacleKind::Cone,
        }
    }

    #[test]
    fn test_hitbox_is_taller_than_wide() {
        let player = player_at(200.0, 400.0);
        // Horizontal reach: (40 + 40) / 2 = 40
        assert!(obstacle_hits_player(&obstacle_at(239.0, 400.0, 40.0, 40.0), &player));
        assert!(!obstacle_hits_player(&obstacle_at(240.0, 400.0, 40.0, 40.0), &player));
        // Vertical reach: (40 + 60) / 2 = 50
        assert!(obstacle_hits_player(&obstacle_at(200.0, 449.0, 40.0, 40.0), &player));
        assert!(!obstacle_hits_player(&obstacle_at(200.0, 450.0, 40.0, 40.0), &player));
    }

    #[test]
    fn test_power_up_pickup_radius() {
        let player = player_at(200.0, 400.0);
        let mut rng = GameRng::new(1);
        let mut pu = PowerUp::random(&mut rng, &Lanes::default());
        pu.kind = PowerUpKind::Slow;
        // Reach: (25 + 40) / 2 = 32.5
        pu.pos = Vec2::new(200.0, 432.0);
        assert!(power_up_touches_player(&pu, &player));
        pu.pos = Vec2::new(200.0, 432.5);
        assert!(!power_up_touches_player(&pu, &player));
    }
}
