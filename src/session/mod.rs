//! Screen flow and the signed-in user

use bevy::prelude::*;

pub mod auth;

pub use auth::{AuthForm, AuthMode, validate_credentials};

/// Top-level screens. Dashboard is only reachable through a successful
/// [`AuthForm::submit`].
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Landing,
    Auth,
    Dashboard,
}

/// The signed-in user. Present exactly while a dashboard session is live.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

/// Plugin for the screen state machine and the auth form
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Screen>()
            .init_resource::<AuthForm>()
            .add_systems(OnEnter(Screen::Auth), reset_auth_form)
            .add_systems(OnExit(Screen::Dashboard), end_session);
    }
}

fn reset_auth_form(mut form: ResMut<AuthForm>) {
    *form = AuthForm::default();
}

fn end_session(mut commands: Commands, session: Option<Res<Session>>) {
    if let Some(session) = session {
        info!("[SESSION] {} signed out", session.username);
    }
    commands.remove_resource::<Session>();
}
