//! Selection and per-user watchlist

use bevy::prelude::*;

pub mod state;
pub mod store;

pub use state::{Selection, Watchlist};
pub use store::{WatchlistRepository, WatchlistStore};

/// Plugin for the selection and watchlist resources
pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<Watchlist>()
            .insert_resource(WatchlistStore::open_default());
    }
}
