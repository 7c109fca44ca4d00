//! User interface module
//!
//! One egui system per screen, plus the chat overlay that floats above the
//! dashboard.

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::session::Screen;

pub mod charts;
pub mod panels;
pub mod state;
pub mod systems;

pub use systems::{auth_ui, chat_ui, dashboard_ui, landing_ui};

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (
                landing_ui.run_if(in_state(Screen::Landing)),
                auth_ui.run_if(in_state(Screen::Auth)),
                (dashboard_ui, chat_ui)
                    .chain()
                    .run_if(in_state(Screen::Dashboard)),
            ),
        );
    }
}
