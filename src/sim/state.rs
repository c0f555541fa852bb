//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there are no
//! module-level globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use super::spawn::{generate_obstacles, generate_power_ups};
use crate::consts::*;
use crate::leaderboard::Leaderboard;
use crate::settings::Settings;

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Login screen (username, then password)
    Home,
    /// Active driving
    Play,
    /// Run ended, waiting for restart
    GameOver,
    /// Pause between levels
    LevelUp,
}

/// The fixed lane positions of the road
///
/// Always [`LANE_COUNT`] strictly increasing x positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lanes([f32; LANE_COUNT]);

impl Lanes {
    /// Build a lane set; panics if positions are not strictly increasing
    pub fn new(xs: [f32; LANE_COUNT]) -> Self {
        assert!(
            Self::is_valid(&xs),
            "lane positions must be strictly increasing: {xs:?}"
        );
        Self(xs)
    }

    pub fn is_valid(xs: &[f32]) -> bool {
        xs.len() == LANE_COUNT && xs.windows(2).all(|w| w[0] < w[1])
    }

    /// X position of a lane
    pub fn x(&self, lane: usize) -> f32 {
        self.0[lane]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn center(&self) -> usize {
        self.0.len() / 2
    }

    pub fn first(&self) -> f32 {
        self.0[0]
    }

    pub fn last(&self) -> f32 {
        self.0[LANE_COUNT - 1]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Default for Lanes {
    fn default() -> Self {
        Self(DEFAULT_LANES)
    }
}

/// Held movement flags (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Rectangle the player's centre is kept inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Collisions are ignored while set
    pub intangible: bool,
    pub intangible_ticks: u32,
}

impl Player {
    /// Spawn in the centre lane near the bottom edge
    pub fn new(lanes: &Lanes, canvas_height: f32) -> Self {
        Self {
            pos: Vec2::new(lanes.x(lanes.center()), canvas_height - PLAYER_START_OFFSET),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            intangible: false,
            intangible_ticks: 0,
        }
    }

    /// Hitbox dimensions (height is 1.5x the width constant)
    pub fn hitbox(&self) -> Vec2 {
        Vec2::new(self.size, self.size * PLAYER_HEIGHT_RATIO)
    }

    /// Apply movement and tick down intangibility
    pub fn update(&mut self, moves: MoveFlags, bounds: Bounds) {
        if moves.left {
            self.pos.x = (self.pos.x - self.speed).max(bounds.min.x);
        }
        if moves.right {
            self.pos.x = (self.pos.x + self.speed).min(bounds.max.x);
        }
        if moves.up {
            self.pos.y = (self.pos.y - self.speed).max(bounds.min.y);
        }
        if moves.down {
            self.pos.y = (self.pos.y + self.speed).min(bounds.max.y);
        }

        if self.intangible {
            self.intangible_ticks = self.intangible_ticks.saturating_sub(1);
            if self.intangible_ticks == 0 {
                self.intangible = false;
            }
        }
    }

    pub fn make_intangible(&mut self, ticks: u32) {
        self.intangible = true;
        self.intangible_ticks = ticks;
    }
}

/// Obstacle look; the renderer maps each tag to an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Oil,
    Tire,
    Cone,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Oil, ObstacleKind::Tire, ObstacleKind::Cone];

    pub fn random(rng: &mut GameRng) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }
}

/// A lane-bound obstacle scrolling down the road
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Random obstacle in a random lane, `depth` units above the top edge
    pub fn random(rng: &mut GameRng, lanes: &Lanes, level: u32, max_depth: f32) -> Self {
        let lane = rng.index(lanes.len());
        Self {
            lane,
            pos: Vec2::new(lanes.x(lane), -rng.range(OBSTACLE_SPAWN_MIN_DEPTH, max_depth)),
            w: rng.range(OBSTACLE_MIN_W, OBSTACLE_MAX_W),
            h: rng.range(OBSTACLE_MIN_H, OBSTACLE_MAX_H),
            speed: obstacle_speed(rng, level),
            kind: ObstacleKind::random(rng),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Move down one tick
    pub fn advance(&mut self, slow_motion: bool) {
        let factor = if slow_motion { SLOW_MOTION_FACTOR } else { 1.0 };
        self.pos.y += self.speed * factor;
    }

    /// Past the bottom edge by more than half its height
    pub fn is_off_screen(&self, canvas_height: f32) -> bool {
        self.pos.y > canvas_height + self.h / 2.0
    }
}

/// Level-scaled obstacle speed, uniform in `[2 + 0.2L, 4 + 0.3L)`
pub fn obstacle_speed(rng: &mut GameRng, level: u32) -> f32 {
    let level = level as f32;
    rng.range(2.0 + level * 0.2, 4.0 + level * 0.3)
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Intangibility,
    Slow,
}

impl PowerUpKind {
    pub fn random(rng: &mut GameRng) -> Self {
        if rng.coin() {
            PowerUpKind::Intangibility
        } else {
            PowerUpKind::Slow
        }
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Intangibility => "INTANGIBILITY",
            PowerUpKind::Slow => "SLOW",
        }
    }
}

/// A collectable power-up
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    /// Collected power-ups stay in the list until the next regeneration
    pub collected: bool,
}

impl PowerUp {
    pub fn random(rng: &mut GameRng, lanes: &Lanes) -> Self {
        let kind = PowerUpKind::random(rng);
        let lane = rng.index(lanes.len());
        Self {
            kind,
            pos: Vec2::new(
                lanes.x(lane),
                -rng.range(POWER_UP_SPAWN_MIN_DEPTH, POWER_UP_SPAWN_MAX_DEPTH),
            ),
            size: POWER_UP_SIZE,
            collected: false,
        }
    }

    /// Move down one tick (speed is level-independent)
    pub fn advance(&mut self, slow_motion: bool) {
        self.pos.y += if slow_motion {
            POWER_UP_SLOW_SPEED
        } else {
            POWER_UP_SPEED
        };
    }
}

/// Global timed effects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub slow_motion: bool,
    pub slow_ticks: u32,
}

impl ActiveEffects {
    /// Start (or restart) slow-motion
    pub fn start_slow_motion(&mut self, ticks: u32) {
        self.slow_motion = true;
        self.slow_ticks = ticks;
    }

    pub fn tick(&mut self) {
        if self.slow_motion {
            self.slow_ticks = self.slow_ticks.saturating_sub(1);
            if self.slow_ticks == 0 {
                self.slow_motion = false;
            }
        }
    }
}

/// Complete session context
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: GameRng,
    pub phase: GamePhase,
    /// Current level (starts at 1)
    pub level: u32,
    pub score: u32,
    /// Best score seen this process
    pub high_score: u32,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    pub width: f32,
    pub height: f32,
    pub lanes: Lanes,
    /// Keep the car between the outer lanes instead of the canvas margins
    pub lane_clamp: bool,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    /// Collected but not yet activated power-up
    pub held_power_up: Option<PowerUpKind>,
    pub effects: ActiveEffects,
    /// A level-up is pending
    pub transitioning: bool,
    pub transition_ticks: u32,
    /// Logged-in player, `None` until a login succeeds
    pub player_name: Option<String>,
    pub leaderboard: Leaderboard,
}

impl GameState {
    /// Fresh state on the home screen
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let lanes = settings.lanes();
        let mut state = Self {
            rng: GameRng::new(seed),
            phase: GamePhase::Home,
            level: 1,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            width: settings.canvas_width,
            height: settings.canvas_height,
            lanes,
            lane_clamp: settings.lane_clamp,
            player: Player::new(&lanes, settings.canvas_height),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            held_power_up: None,
            effects: ActiveEffects::default(),
            transitioning: false,
            transition_ticks: 0,
            player_name: None,
            leaderboard: Leaderboard::new(),
        };
        state.regenerate();
        state
    }

    /// Replace obstacles and power-ups with a fresh set for the current level
    pub fn regenerate(&mut self) {
        self.obstacles = generate_obstacles(&mut self.rng, &self.lanes, self.level);
        self.power_ups = generate_power_ups(&mut self.rng, &self.lanes);
    }

    /// Begin a run after a successful login
    pub fn start_run(&mut self, name: &str) {
        log::info!("{name} logged in, starting run");
        self.player_name = Some(name.to_string());
        self.phase = GamePhase::Play;
        self.score = 0;
        self.level = 1;
        self.held_power_up = None;
        self.effects = ActiveEffects::default();
        self.transitioning = false;
        self.transition_ticks = 0;
        self.player = Player::new(&self.lanes, self.height);
        self.regenerate();
    }

    /// Back to the login screen; leaderboard and high score survive
    pub fn return_home(&mut self) {
        self.phase = GamePhase::Home;
        self.player_name = None;
    }

    /// Name used for the leaderboard
    pub fn display_name(&self) -> &str {
        self.player_name.as_deref().unwrap_or("Player")
    }

    /// End the run and record its score
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        let name = self.display_name().to_string();
        self.leaderboard.record(&name, self.score);
        log::info!(
            "Game over for {name}: score {} (level {})",
            self.score,
            self.level
        );
    }

    /// Region the player's centre may occupy
    pub fn movement_bounds(&self) -> Bounds {
        let (min_x, max_x) = if self.lane_clamp {
            (self.lanes.first(), self.lanes.last())
        } else {
            (PLAYER_MARGIN_X, self.width - PLAYER_MARGIN_X)
        };
        Bounds {
            min: Vec2::new(min_x, PLAYER_MARGIN_Y),
            max: Vec2::new(max_x, self.height - PLAYER_MARGIN_Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            min: Vec2::new(30.0, 50.0),
            max: Vec2::new(370.0, 500.0),
        }
    }

    #[test]
    fn test_lanes_validation() {
        assert!(Lanes::is_valid(&DEFAULT_LANES));
        assert!(!Lanes::is_valid(&[60.0, 60.0, 200.0, 280.0, 340.0]));
        assert!(!Lanes::is_valid(&[60.0, 120.0, 200.0]));
        assert_eq!(Lanes::default().center(), 2);
    }

    #[test]
    #[should_panic]
    fn test_lanes_reject_unsorted() {
        Lanes::new([340.0, 280.0, 200.0, 120.0, 60.0]);
    }

    #[test]
    fn test_player_spawns_center_lane() {
        let player = Player::new(&Lanes::default(), CANVAS_HEIGHT);
        assert_eq!(player.pos, Vec2::new(200.0, 450.0));
        assert_eq!(player.hitbox(), Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_player_movement_clamped() {
        let mut player = Player::new(&Lanes::default(), CANVAS_HEIGHT);
        player.pos = Vec2::new(34.0, 54.0);
        let moves = MoveFlags {
            left: true,
            up: true,
            ..Default::default()
        };
        player.update(moves, bounds());
        assert_eq!(player.pos, Vec2::new(30.0, 50.0));

        player.pos = Vec2::new(366.0, 496.0);
        let moves = MoveFlags {
            right: true,
            down: true,
            ..Default::default()
        };
        player.update(moves, bounds());
        assert_eq!(player.pos, Vec2::new(370.0, 500.0));
    }

    #[test]
    fn test_opposite_flags_cancel() {
        let mut player = Player::new(&Lanes::default(), CANVAS_HEIGHT);
        let start = player.pos;
        let moves = MoveFlags {
            left: true,
            right: true,
            ..Default::default()
        };
        player.update(moves, bounds());
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_intangibility_expires() {
        let mut player = Player::new(&Lanes::default(), CANVAS_HEIGHT);
        player.make_intangible(2);
        player.update(MoveFlags::default(), bounds());
        assert!(player.intangible);
        player.update(MoveFlags::default(), bounds());
        assert!(!player.intangible);
        assert_eq!(player.intangible_ticks, 0);
    }

    #[test]
    fn test_obstacle_slow_motion() {
        let mut rng = GameRng::new(3);
        let mut obs = Obstacle::random(&mut rng, &Lanes::default(), 1, OBSTACLE_SPAWN_MAX_DEPTH);
        obs.pos.y = 0.0;
        obs.speed = 5.0;
        obs.advance(true);
        assert!((obs.pos.y - 2.0).abs() < 1e-5);
        obs.advance(false);
        assert!((obs.pos.y - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_off_screen_uses_half_height() {
        let mut rng = GameRng::new(3);
        let mut obs = Obstacle::random(&mut rng, &Lanes::default(), 1, OBSTACLE_SPAWN_MAX_DEPTH);
        obs.h = 40.0;
        obs.pos.y = CANVAS_HEIGHT + 20.0;
        assert!(!obs.is_off_screen(CANVAS_HEIGHT));
        obs.pos.y = CANVAS_HEIGHT + 20.5;
        assert!(obs.is_off_screen(CANVAS_HEIGHT));
    }

    #[test]
    fn test_random_obstacle_ranges() {
        let mut rng = GameRng::new(11);
        let lanes = Lanes::default();
        for level in 1..6 {
            for _ in 0..200 {
                let obs = Obstacle::random(&mut rng, &lanes, level, OBSTACLE_SPAWN_MAX_DEPTH);
                let l = level as f32;
                assert!(obs.speed >= 2.0 + l * 0.2 && obs.speed < 4.0 + l * 0.3);
                assert!((OBSTACLE_MIN_W..OBSTACLE_MAX_W).contains(&obs.w));
                assert!((OBSTACLE_MIN_H..OBSTACLE_MAX_H).contains(&obs.h));
                assert_eq!(obs.pos.x, lanes.x(obs.lane));
                assert!(obs.pos.y <= -OBSTACLE_SPAWN_MIN_DEPTH);
            }
        }
    }

    #[test]
    fn test_power_up_speed_ignores_level() {
        let mut rng = GameRng::new(5);
        let mut pu = PowerUp::random(&mut rng, &Lanes::default());
        let y = pu.pos.y;
        pu.advance(false);
        assert_eq!(pu.pos.y, y + 2.0);
        pu.advance(true);
        assert_eq!(pu.pos.y, y + 3.0);
    }

    #[test]
    fn test_slow_motion_restart_resets_timer() {
        let mut effects = ActiveEffects::default();
        effects.start_slow_motion(180);
        effects.tick();
        effects.start_slow_motion(180);
        assert_eq!(effects.slow_ticks, 180);
        for _ in 0..180 {
            effects.tick();
        }
        assert!(!effects.slow_motion);
    }

    #[test]
    fn test_new_state_home_with_entities() {
        let state = GameState::new(&Settings::default(), 42);
        assert_eq!(state.phase, GamePhase::Home);
        assert_eq!(state.obstacles.len(), 8);
        assert_eq!(state.power_ups.len(), POWER_UP_COUNT);
        assert_eq!(state.display_name(), "Player");
    }

    #[test]
    fn test_lane_clamp_bounds() {
        let mut state = GameState::new(&Settings::default(), 42);
        assert_eq!(state.movement_bounds().min.x, PLAYER_MARGIN_X);
        state.lane_clamp = true;
        let bounds = state.movement_bounds();
        assert_eq!(bounds.min.x, 60.0);
        assert_eq!(bounds.max.x, 340.0);
    }
}
