//! Local sign-in gate. Nothing is verified against a server; any well-formed
//! credentials open a session.

use bevy::prelude::*;

pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "MISSION LOGIN",
            AuthMode::Register => "RECRUITMENT",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            AuthMode::Login => "Enter Credentials for Access",
            AuthMode::Register => "Create an Account for NASA Insights",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "INITIATE UPLINK",
            AuthMode::Register => "REQUEST CLEARANCE",
        }
    }

    pub fn switch_label(self) -> &'static str {
        match self {
            AuthMode::Login => "DON'T HAVE CLEARANCE? SIGN UP",
            AuthMode::Register => "ALREADY HAVE CLEARANCE? LOGIN",
        }
    }
}

/// Both modes share the same rules. Length is counted in characters.
pub fn validate_credentials(username: &str, security_code: &str) -> Result<(), &'static str> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err("Username too short");
    }
    if security_code.is_empty() {
        return Err("Security code required");
    }
    Ok(())
}

/// Contents of the auth screen, including the blocking alert.
#[derive(Resource, Debug, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub security_code: String,
    /// Shown modally until dismissed.
    pub alert: Option<&'static str>,
}

impl AuthForm {
    /// Returns the username to sign in with, or raises the alert.
    pub fn submit(&mut self) -> Option<String> {
        match validate_credentials(&self.username, &self.security_code) {
            Ok(()) => {
                self.alert = None;
                Some(self.username.clone())
            }
            Err(message) => {
                self.alert = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_username_is_rejected() {
        assert_eq!(validate_credentials("ab", "x"), Err("Username too short"));
        assert_eq!(validate_credentials("", "x"), Err("Username too short"));
    }

    #[test]
    fn three_characters_is_enough() {
        assert_eq!(validate_credentials("abc", "x"), Ok(()));
        // Counted in characters, not bytes.
        assert_eq!(validate_credentials("éé", "x"), Err("Username too short"));
    }

    #[test]
    fn security_code_must_be_present() {
        assert_eq!(
            validate_credentials("astro", ""),
            Err("Security code required")
        );
    }

    #[test]
    fn submit_sets_alert_on_failure() {
        let mut form = AuthForm {
            username: "ab".into(),
            security_code: "secret".into(),
            ..default()
        };
        assert_eq!(form.submit(), None);
        assert_eq!(form.alert, Some("Username too short"));

        form.username = "Astro-Explorer".into();
        assert_eq!(form.submit().as_deref(), Some("Astro-Explorer"));
        assert_eq!(form.alert, None);
    }

    #[test]
    fn modes_only_change_labels() {
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Register);
        assert_eq!(AuthMode::Register.toggled(), AuthMode::Login);
        assert_ne!(AuthMode::Login.title(), AuthMode::Register.title());
    }
}
