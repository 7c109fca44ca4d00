//! Dashboard screen state and lifecycle

use bevy::prelude::*;

use crate::neo::{apply_neo_feed_results, request_today_feed};
use crate::session::Screen;

pub mod systems;
pub mod view;

pub use systems::{auto_select_first, load_session_watchlist, teardown_dashboard};

/// Per-session dashboard UI state
#[derive(Resource, Debug, Default)]
pub struct DashboardState {
    pub search: String,
    pub chat_open: bool,
    /// Batch version the auto-selection last reacted to.
    pub seen_batch: Option<u64>,
}

/// Plugin for the dashboard lifecycle
pub struct DashboardPlugin;

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DashboardState>()
            .add_systems(
                OnEnter(Screen::Dashboard),
                (load_session_watchlist, request_today_feed),
            )
            .add_systems(
                Update,
                auto_select_first
                    .after(apply_neo_feed_results)
                    .run_if(in_state(Screen::Dashboard)),
            )
            .add_systems(OnExit(Screen::Dashboard), teardown_dashboard);
    }
}
