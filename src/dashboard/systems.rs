//! Dashboard lifecycle: session start, auto-selection and teardown.

use bevy::prelude::*;

use crate::dashboard::DashboardState;
use crate::neo::{NeoBatch, NeoFeedState};
use crate::orbital::LayoutCache;
use crate::selection::{Selection, Watchlist, WatchlistStore};
use crate::session::Session;

pub fn load_session_watchlist(
    session: Option<Res<Session>>,
    store: Res<WatchlistStore>,
    mut watchlist: ResMut<Watchlist>,
) {
    let Some(session) = session else {
        warn!("[WATCHLIST] dashboard entered without a session");
        return;
    };
    watchlist.load_for(&session.username, store.0.as_ref());
}

/// Selects the first record whenever a new batch lands; an empty batch leaves
/// nothing selected.
pub fn auto_select_first(
    batch: Res<NeoBatch>,
    mut state: ResMut<DashboardState>,
    mut selection: ResMut<Selection>,
) {
    if state.seen_batch == Some(batch.version) {
        return;
    }
    state.seen_batch = Some(batch.version);

    let Some(first) = batch.records.first() else {
        selection.clear();
        return;
    };
    let id = first.external_id.clone();
    if let Err(err) = selection.select(&batch, &id) {
        warn!("[DASHBOARD] auto-select failed: {:#}", err);
    }
}

/// Drops everything tied to the session. A fetch still in flight is
/// disowned so its response is discarded on arrival.
pub fn teardown_dashboard(
    mut batch: ResMut<NeoBatch>,
    mut feed: ResMut<NeoFeedState>,
    mut layouts: ResMut<LayoutCache>,
    mut selection: ResMut<Selection>,
    mut watchlist: ResMut<Watchlist>,
    mut state: ResMut<DashboardState>,
) {
    feed.pending_request = None;
    batch.clear();
    layouts.clear();
    selection.clear();
    watchlist.clear();
    *state = DashboardState {
        seen_batch: Some(batch.version),
        ..default()
    };
    info!("[DASHBOARD] session state cleared");
}
