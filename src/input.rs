//! Raw key to game command mapping
//!
//! Key-down events become commands scoped by the current phase; key-up
//! events release held movement. Movement is level-triggered (held flags),
//! everything else is a one-shot command.

use std::collections::HashMap;
use std::time::Duration;

use crate::sim::state::{GamePhase, MoveFlags};

/// Platform-neutral key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key press means in the current context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NameChar(char),
    PasswordChar(char),
    Backspace,
    Confirm,
    Restart,
    Move(Direction),
    ActivatePowerUp,
}

impl MoveFlags {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }
}

/// Movement direction bound to a key (arrows and WASD)
pub fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::Left | Key::Char('a' | 'A') => Some(Direction::Left),
        Key::Right | Key::Char('d' | 'D') => Some(Direction::Right),
        Key::Up | Key::Char('w' | 'W') => Some(Direction::Up),
        Key::Down | Key::Char('s' | 'S') => Some(Direction::Down),
        _ => None,
    }
}

/// Map a key press to a command for the given phase
pub fn map_key_down(key: Key, phase: GamePhase, entering_password: bool) -> Option<Command> {
    match phase {
        GamePhase::Home => match key {
            Key::Enter => Some(Command::Confirm),
            Key::Backspace => Some(Command::Backspace),
            Key::Char(c) if entering_password && !c.is_control() => Some(Command::PasswordChar(c)),
            Key::Char(c) if !entering_password && c.is_ascii_alphanumeric() => Some(Command::NameChar(c)),
            _ => None,
        },
        GamePhase::Play => match key {
            Key::Char(' ') => Some(Command::ActivatePowerUp),
            _ => direction_for(key).map(Command::Move),
        },
        GamePhase::GameOver => match key {
            Key::Char('r' | 'R') => Some(Command::Restart),
            _ => None,
        },
        GamePhase::LevelUp => None,
    }
}

/// Movement released by a key-up, regardless of phase
pub fn map_key_up(key: Key) -> Option<Direction> {
    direction_for(key)
}

/// Movement keys currently held, for terminals that never report releases
///
/// Every press or auto-repeat refreshes a key. A key not refreshed within
/// the hold window counts as released. A real release removes it at once.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    /// Key -> frame it was last pressed or repeated
    last_seen: HashMap<Key, u64>,
    window: u64,
}

impl HeldKeys {
    /// Tracker whose keys expire `window` frames after their last event
    pub fn new(window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            window: window.max(1),
        }
    }

    /// Hold window of `duration` at `fps`, rounded up to whole frames
    pub fn with_duration(duration: Duration, fps: u32) -> Self {
        let frames = (duration.as_millis() * u128::from(fps)).div_ceil(1000);
        Self::new(frames as u64)
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    /// Record a press or repeat; keys without a direction are ignored
    pub fn refresh(&mut self, key: Key, frame: u64) {
        if direction_for(key).is_some() {
            self.last_seen.insert(key, frame);
        }
    }

    /// Forget a key the terminal reported as released
    pub fn release(&mut self, key: Key) -> bool {
        self.last_seen.remove(&key).is_some()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }

    /// Drop and return the keys whose hold window has run out at `frame`
    pub fn expire(&mut self, frame: u64) -> Vec<Key> {
        let window = self.window;
        let mut expired = Vec::new();
        self.last_seen.retain(|key, last| {
            let live = frame.saturating_sub(*last) <= window;
            if !live {
                expired.push(*key);
            }
            live
        });
        expired
    }
}
