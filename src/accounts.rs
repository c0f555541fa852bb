//! In-memory accounts and the home-screen login form
//!
//! Passwords are plain strings compared verbatim. This is a name gate for
//! the leaderboard, not a security boundary.

use std::collections::HashMap;

use crate::consts::{MAX_NAME_LEN, MAX_PASSWORD_LEN};

/// Username -> password directory
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    users: HashMap<String, String>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Create the account with an empty password if it doesn't exist yet
    ///
    /// Returns true when a new account was created.
    pub fn ensure(&mut self, name: &str) -> bool {
        if self.users.contains_key(name) {
            return false;
        }
        self.users.insert(name.to_string(), String::new());
        log::info!("Created account {name}");
        true
    }

    pub fn password(&self, name: &str) -> Option<&str> {
        self.users.get(name).map(String::as_str)
    }

    /// Check a password, setting it first if the account has none
    pub fn verify_or_set(&mut self, name: &str, password: &str) -> bool {
        match self.users.get_mut(name) {
            Some(stored) if stored.is_empty() => {
                *stored = password.to_string();
                true
            }
            Some(stored) => stored == password,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Result of pressing confirm on the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Nothing to confirm (empty field)
    Ignored,
    /// Username accepted, now asking for the password
    PasswordRequested { new_account: bool },
    /// Login succeeded for this name
    LoggedIn(String),
    /// Wrong password; field cleared
    Rejected,
}

/// Username/password text entry on the home screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
    /// Second step: typing the password
    pub entering_password: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a username character (ASCII alphanumeric, uppercased)
    pub fn push_name_char(&mut self, c: char) -> bool {
        if self.entering_password || !c.is_ascii_alphanumeric() || self.name.len() >= MAX_NAME_LEN {
            return false;
        }
        self.name.push(c.to_ascii_uppercase());
        true
    }

    /// Append any printable password character
    pub fn push_password_char(&mut self, c: char) -> bool {
        if !self.entering_password || c.is_control() || self.password.chars().count() >= MAX_PASSWORD_LEN {
            return false;
        }
        self.password.push(c);
        true
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        if self.entering_password {
            self.password.pop();
        } else {
            self.name.pop();
        }
    }

    /// Confirm the active field against the account store
    pub fn confirm(&mut self, accounts: &mut AccountStore) -> LoginOutcome {
        if !self.entering_password {
            if self.name.is_empty() {
                return LoginOutcome::Ignored;
            }
            let new_account = accounts.ensure(&self.name);
            self.entering_password = true;
            return LoginOutcome::PasswordRequested { new_account };
        }

        if self.password.is_empty() {
            return LoginOutcome::Ignored;
        }
        if accounts.verify_or_set(&self.name, &self.password) {
            let name = std::mem::take(&mut self.name);
            self.reset();
            LoginOutcome::LoggedIn(name)
        } else {
            log::info!("Wrong password for {}", self.name);
            self.password.clear();
            LoginOutcome::Rejected
        }
    }

    /// Clear both fields and return to username entry
    pub fn reset(&mut self) {
        self.name.clear();
        self.password.clear();
        self.entering_password = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut LoginForm, s: &str) {
        for c in s.chars() {
            if form.entering_password {
                form.push_password_char(c);
            } else {
                form.push_name_char(c);
            }
        }
    }

    fn login(form: &mut LoginForm, accounts: &mut AccountStore, name: &str, password: &str) -> LoginOutcome {
        type_str(form, name);
        form.confirm(accounts);
        type_str(form, password);
        form.confirm(accounts)
    }

    #[test]
    fn test_name_entry_rules() {
        let mut form = LoginForm::new();
        type_str(&mut form, "ab-1 x!yz0123456789");
        assert_eq!(form.name, "AB1XYZ0123");
        form.backspace();
        assert_eq!(form.name, "AB1XYZ012");
    }

    #[test]
    fn test_empty_name_not_confirmed() {
        let mut form = LoginForm::new();
        let mut accounts = AccountStore::new();
        assert_eq!(form.confirm(&mut accounts), LoginOutcome::Ignored);
        assert!(!form.entering_password);
        assert!(accounts.is_empty());
    }

    #[test]
    fn test_first_login_sets_password() {
        let mut form = LoginForm::new();
        let mut accounts = AccountStore::new();
        type_str(&mut form, "ab1");
        assert_eq!(
            form.confirm(&mut accounts),
            LoginOutcome::PasswordRequested { new_account: true }
        );
        assert_eq!(accounts.password("AB1"), Some(""));

        type_str(&mut form, "xyz");
        assert_eq!(form.confirm(&mut accounts), LoginOutcome::LoggedIn("AB1".to_string()));
        assert_eq!(accounts.password("AB1"), Some("xyz"));
        assert_eq!(form, LoginForm::new());
    }

    #[test]
    fn test_returning_user() {
        let mut form = LoginForm::new();
        let mut accounts = AccountStore::new();
        login(&mut form, &mut accounts, "AB1", "xyz");

        assert_eq!(
            login(&mut form, &mut accounts, "AB1", "xyz"),
            LoginOutcome::LoggedIn("AB1".to_string())
        );
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_wrong_password_clears_field() {
        let mut form = LoginForm::new();
        let mut accounts = AccountStore::new();
        login(&mut form, &mut accounts, "AB1", "xyz");

        assert_eq!(login(&mut form, &mut accounts, "AB1", "wrong"), LoginOutcome::Rejected);
        assert!(form.entering_password);
        assert!(form.password.is_empty());
        assert_eq!(form.name, "AB1");
        assert_eq!(accounts.password("AB1"), Some("xyz"));

        // No lockout
        type_str(&mut form, "xyz");
        assert_eq!(form.confirm(&mut accounts), LoginOutcome::LoggedIn("AB1".to_string()));
    }

    #[test]
    fn test_password_entry_rules() {
        let mut form = LoginForm {
            entering_password: true,
            ..Default::default()
        };
        assert!(form.push_password_char('a'));
        assert!(form.push_password_char(' '));
        assert!(!form.push_password_char('\n'));
        type_str(&mut form, "bcdefghijk");
        assert_eq!(form.password, "a bcdefghi");
        form.backspace();
        assert_eq!(form.password, "a bcdefgh");
        assert!(form.name.is_empty());
    }
}
