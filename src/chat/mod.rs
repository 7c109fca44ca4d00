//! Orbital-intelligence chat backed by a hosted language model.

use bevy::prelude::*;

use crate::session::Screen;

pub mod fetcher;
pub mod systems;
pub mod types;

pub use systems::{apply_chat_results, submit_chat_input};
pub use types::{ChatChannels, ChatConfig, ChatRole, ChatState};

/// Plugin for the chat worker and conversation state
pub struct ChatPlugin;

impl Plugin for ChatPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ChatConfig::from_env())
            .init_resource::<ChatState>()
            .add_systems(Startup, systems::setup_chat_worker)
            .add_systems(Update, apply_chat_results)
            .add_systems(OnExit(Screen::Dashboard), systems::reset_chat);
    }
}
