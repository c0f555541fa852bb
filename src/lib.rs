//! Survival Circuit - a lane-dodging arcade survival game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, spawning, collisions, phases)
//! - `game`: Session object tying input, accounts and simulation together
//! - `accounts`: In-memory user directory and login form
//! - `leaderboard`: Top-3 best scores per player
//! - `input`: Raw key to command mapping
//! - `scene`: Read-only drawable snapshot for renderers
//! - `settings`: Data-driven canvas/lane configuration

pub mod accounts;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use leaderboard::Leaderboard;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 550.0;

    /// Number of lanes on the road
    pub const LANE_COUNT: usize = 5;
    pub const DEFAULT_LANES: [f32; LANE_COUNT] = [60.0, 120.0, 200.0, 280.0, 340.0];

    /// Player car defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Hitbox (and sprite) height relative to width
    pub const PLAYER_HEIGHT_RATIO: f32 = 1.5;
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 100.0;
    /// Movement margins from the canvas edges
    pub const PLAYER_MARGIN_X: f32 = 30.0;
    pub const PLAYER_MARGIN_Y: f32 = 50.0;

    /// Obstacle dimensions (uniform ranges)
    pub const OBSTACLE_MIN_W: f32 = 30.0;
    pub const OBSTACLE_MAX_W: f32 = 50.0;
    pub const OBSTACLE_MIN_H: f32 = 30.0;
    pub const OBSTACLE_MAX_H: f32 = 60.0;
    /// Spawn depth above the top edge (initial generation)
    pub const OBSTACLE_SPAWN_MIN_DEPTH: f32 = 100.0;
    pub const OBSTACLE_SPAWN_MAX_DEPTH: f32 = 1000.0;
    /// Spawn depth above the top edge (recycling)
    pub const OBSTACLE_RESPAWN_MAX_DEPTH: f32 = 600.0;
    /// Minimum centre distance between obstacles
    pub const OBSTACLE_SPACING: f32 = 60.0;
    /// Placement attempts when recycling before accepting the last candidate
    pub const RESPAWN_MAX_TRIES: u32 = 10;
    /// Obstacle speed multiplier while slow-motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.4;

    /// Power-up defaults
    pub const POWER_UP_COUNT: usize = 2;
    pub const POWER_UP_SIZE: f32 = 25.0;
    pub const POWER_UP_SPEED: f32 = 2.0;
    pub const POWER_UP_SLOW_SPEED: f32 = 1.0;
    pub const POWER_UP_SPAWN_MIN_DEPTH: f32 = 300.0;
    pub const POWER_UP_SPAWN_MAX_DEPTH: f32 = 1000.0;
    pub const POWER_UP_SPACING: f32 = 80.0;
    /// Effect duration after activation (ticks)
    pub const POWER_UP_DURATION_TICKS: u32 = 180;

    /// Score needed per level
    pub const LEVEL_SCORE_STEP: u32 = 1000;
    /// Level-up pause length (ticks)
    pub const LEVEL_UP_TICKS: u32 = 120;

    /// Login field limits
    pub const MAX_NAME_LEN: usize = 10;
    pub const MAX_PASSWORD_LEN: usize = 10;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Axis-aligned overlap test between two boxes given by centre and full size
#[inline]
pub fn aabb_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    let delta = (a_center - b_center).abs();
    let reach = (a_size + b_size) / 2.0;
    delta.x < reach.x && delta.y < reach.y
}
