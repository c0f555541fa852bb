//! Game session
//!
//! Owns the simulation state, the account store, the login form and the
//! pending tick input. Front-ends feed key events in and call [`Game::update`]
//! once per frame.

use crate::accounts::{AccountStore, LoginForm, LoginOutcome};
use crate::input::{Command, Key, map_key_down, map_key_up};
use crate::scene::Scene;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};

pub struct Game {
    pub state: GameState,
    pub accounts: AccountStore,
    pub login: LoginForm,
    input: TickInput,
}

impl Game {
    /// New session on the home screen, seeded from settings or at random
    pub fn new(settings: &Settings) -> Self {
        let game = Self::with_seed(settings, settings.seed.unwrap_or_else(rand::random));
        log::info!("Session seed {}", game.seed());
        game
    }

    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self {
            state: GameState::new(settings, seed),
            accounts: AccountStore::new(),
            login: LoginForm::new(),
            input: TickInput::default(),
        }
    }

    /// Seed the session RNG started from; replaying it reproduces the run
    pub fn seed(&self) -> u64 {
        self.state.rng.seed()
    }

    /// Handle a key press; returns the command it mapped to, if any
    pub fn key_down(&mut self, key: Key) -> Option<Command> {
        let command = map_key_down(key, self.state.phase, self.login.entering_password)?;
        self.apply(command);
        Some(command)
    }

    /// Handle a key release
    pub fn key_up(&mut self, key: Key) {
        if let Some(direction) = map_key_up(key) {
            self.input.moves.set(direction, false);
        }
    }

    /// Apply a command immediately (menu) or stage it for the next tick (driving)
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::NameChar(c) => {
                self.login.push_name_char(c);
            }
            Command::PasswordChar(c) => {
                self.login.push_password_char(c);
            }
            Command::Backspace => self.login.backspace(),
            Command::Confirm => {
                if self.state.phase != GamePhase::Home {
                    return;
                }
                if let LoginOutcome::LoggedIn(name) = self.login.confirm(&mut self.accounts) {
                    self.input = TickInput::default();
                    self.state.start_run(&name);
                }
            }
            Command::Restart => {
                if self.state.phase == GamePhase::GameOver {
                    self.state.return_home();
                    self.login.reset();
                }
            }
            Command::Move(direction) => self.input.moves.set(direction, true),
            Command::ActivatePowerUp => self.input.activate_power_up = true,
        }
    }

    /// Advance one frame; one-shot inputs are consumed
    pub fn update(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.activate_power_up = false;
    }

    /// Input that the next tick will read
    pub fn pending_input(&self) -> &TickInput {
        &self.input
    }

    pub fn scene(&self) -> Scene {
        Scene::capture(&self.state, &self.login)
    }
}
