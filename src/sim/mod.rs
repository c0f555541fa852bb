//! Tick-driven simulation module
//!
//! All gameplay logic lives here:
//! - One tick per displayed frame
//! - Seeded RNG only
//! - Entities recycled in place (stable indices)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{obstacle_hits_player, power_up_touches_player};
pub use rng::GameRng;
pub use spawn::{generate_obstacles, generate_power_ups, obstacle_count, respawn_obstacle};
pub use state::{
    ActiveEffects, Bounds, GamePhase, GameState, Lanes, MoveFlags, Obstacle, ObstacleKind, Player,
    PowerUp, PowerUpKind,
};
pub use tick::{TickInput, activate_power_up, tick};
