//! Drawable snapshot for renderers
//!
//! A [`Scene`] is rebuilt every frame from the game state. Renderers only
//! read it; nothing flows back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::accounts::LoginForm;
use crate::leaderboard::Leaderboard;
use crate::sim::state::{GamePhase, GameState, ObstacleKind, PowerUpKind};

/// Per-level background colours, cycled
const LEVEL_PALETTE: [[u8; 3]; 5] = [
    [80, 180, 255],
    [30, 30, 60],
    [200, 150, 0],
    [0, 100, 60],
    [150, 0, 90],
];

/// Ticks per half-period of the login cursor blink
const CURSOR_BLINK_TICKS: u64 = 30;

/// Background colour for a level
pub fn level_color(level: u32) -> [u8; 3] {
    LEVEL_PALETTE[(level.max(1) as usize - 1) % LEVEL_PALETTE.len()]
}

/// Axis-aligned rectangle given by centre and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleSprite {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpSprite {
    pub center: Vec2,
    pub diameter: f32,
    pub kind: PowerUpKind,
    pub glyph: char,
    pub color: [u8; 3],
}

impl PowerUpSprite {
    fn style(kind: PowerUpKind) -> (char, [u8; 3]) {
        match kind {
            PowerUpKind::Intangibility => ('I', [0, 255, 255]),
            PowerUpKind::Slow => ('S', [255, 165, 0]),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub background: [u8; 3],
    /// Car sprite (drawn at 1.5x height)
    pub player: Rect,
    pub player_intangible: bool,
    pub slow_motion: bool,
    pub obstacles: Vec<ObstacleSprite>,
    /// Uncollected power-ups only
    pub power_ups: Vec<PowerUpSprite>,
    /// Corner HUD lines
    pub hud: Vec<String>,
    /// Full-screen text block (home, game over, level up)
    pub overlay: Vec<String>,
}

impl Scene {
    pub fn capture(state: &GameState, login: &LoginForm) -> Self {
        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleSprite {
                rect: Rect {
                    center: o.pos,
                    size: o.size(),
                },
                kind: o.kind,
            })
            .collect();

        let power_ups = state
            .power_ups
            .iter()
            .filter(|p| !p.collected)
            .map(|p| {
                let (glyph, color) = PowerUpSprite::style(p.kind);
                PowerUpSprite {
                    center: p.pos,
                    diameter: p.size,
                    kind: p.kind,
                    glyph,
                    color,
                }
            })
            .collect();

        let overlay = match state.phase {
            GamePhase::Home => home_overlay(state, login),
            GamePhase::Play => Vec::new(),
            GamePhase::GameOver => game_over_overlay(state),
            GamePhase::LevelUp => vec![format!("LEVEL {}", state.level + 1), "Get ready!".to_string()],
        };

        Self {
            phase: state.phase,
            width: state.width,
            height: state.height,
            background: level_color(state.level),
            player: Rect {
                center: state.player.pos,
                size: state.player.hitbox(),
            },
            player_intangible: state.player.intangible,
            slow_motion: state.effects.slow_motion,
            obstacles,
            power_ups,
            hud: hud_lines(state),
            overlay,
        }
    }
}

fn hud_lines(state: &GameState) -> Vec<String> {
    let held = state.held_power_up.map(|k| k.label()).unwrap_or("");
    vec![
        format!("Score: {}", state.score),
        format!("Level: {}", state.level),
        format!("High Score: {}", state.high_score),
        format!("Power-Up: {held}"),
    ]
}

fn leaderboard_block(board: &Leaderboard) -> Vec<String> {
    let mut lines = vec!["LEADERBOARD".to_string()];
    if board.is_empty() {
        lines.push("(no scores yet)".to_string());
    } else {
        lines.extend(board.lines());
    }
    lines
}

fn home_overlay(state: &GameState, login: &LoginForm) -> Vec<String> {
    let cursor = if (state.time_ticks / CURSOR_BLINK_TICKS) % 2 == 0 {
        "_"
    } else {
        " "
    };

    let mut lines = vec!["THE SURVIVAL CIRCUIT".to_string(), String::new()];
    if login.entering_password {
        lines.push(format!("Password for {}:", login.name));
        lines.push(format!("{}{cursor}", "*".repeat(login.password.chars().count())));
    } else {
        lines.push("Enter username:".to_string());
        lines.push(format!("{}{cursor}", login.name));
    }
    lines.push(String::new());
    lines.push(format!("High Score: {}", state.high_score));
    lines.push(String::new());
    lines.extend(leaderboard_block(&state.leaderboard));
    lines
}

fn game_over_overlay(state: &GameState) -> Vec<String> {
    let mut lines = vec![
        "GAME OVER".to_string(),
        format!("Score: {}", state.score),
        format!("High Score: {}", state.high_score),
        String::new(),
    ];
    lines.extend(leaderboard_block(&state.leaderboard));
    lines.push(String::new());
    lines.push("Press R to return home".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_level_palette_cycles() {
        assert_eq!(level_color(1), [80, 180, 255]);
        assert_eq!(level_color(5), [150, 0, 90]);
        assert_eq!(level_color(6), level_color(1));
    }

    #[test]
    fn test_home_scene_masks_password() {
        let state = GameState::new(&Settings::default(), 1);
        let login = LoginForm {
            name: "AB1".to_string(),
            password: "xyz".to_string(),
            entering_password: true,
        };
        let scene = Scene::capture(&state, &login);
        assert_eq!(scene.phase, GamePhase::Home);
        assert!(scene.overlay.contains(&"Password for AB1:".to_string()));
        assert!(scene.overlay.contains(&"***_".to_string()));
        assert!(!scene.overlay.iter().any(|l| l.contains("xyz")));
    }

    #[test]
    fn test_collected_power_ups_hidden() {
        let mut state = GameState::new(&Settings::default(), 1);
        state.start_run("AB1");
        state.power_ups[0].collected = true;
        state.held_power_up = Some(state.power_ups[0].kind);
        let scene = Scene::capture(&state, &LoginForm::new());
        assert_eq!(scene.power_ups.len(), 1);
        assert_eq!(scene.obstacles.len(), state.obstacles.len());
        assert!(scene.overlay.is_empty());
        assert_eq!(scene.hud[3], format!("Power-Up: {}", state.power_ups[0].kind.label()));
    }

    #[test]
    fn test_game_over_lists_leaderboard() {
        let mut state = GameState::new(&Settings::default(), 1);
        state.start_run("AB1");
        state.score = 437;
        state.game_over();
        let scene = Scene::capture(&state, &LoginForm::new());
        assert_eq!(scene.overlay[0], "GAME OVER");
        assert!(scene.overlay.contains(&"1. AB1 - 437".to_string()));
    }

    #[test]
    fn test_level_up_shows_next_level() {
        let mut state = GameState::new(&Settings::default(), 1);
        state.phase = GamePhase::LevelUp;
        let scene = Scene::capture(&state, &LoginForm::new());
        assert_eq!(scene.overlay[0], "LEVEL 2");
    }
}
