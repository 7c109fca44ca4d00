//! NEO feed systems (request + apply).

use crate::neo::fetcher::{build_feed_url, start_neo_feed_worker};
use crate::neo::types::{
    NeoBatch, NeoFeedChannels, NeoFeedCommand, NeoFeedConfig, NeoFeedResult, NeoFeedState,
};
use bevy::prelude::*;
use chrono::Utc;

pub fn setup_neo_feed_worker(mut commands: Commands) {
    let channels = start_neo_feed_worker();
    info!("[INIT] NEO feed worker started");
    commands.insert_resource(channels);
}

/// Queues a fetch of today's close approaches. Fire-and-forget: the result is
/// picked up by [`apply_neo_feed_results`] if it is still wanted by then.
pub fn request_today_feed(
    config: Res<NeoFeedConfig>,
    mut state: ResMut<NeoFeedState>,
    channels: Option<Res<NeoFeedChannels>>,
) {
    let Some(channels) = channels else {
        warn!("[NEO FETCH] worker not available; dashboard will stay empty");
        return;
    };

    let today = Utc::now().date_naive();
    let url = match build_feed_url(&config, today) {
        Ok(url) => url,
        Err(err) => {
            warn!("[NEO FETCH] {:#}", err);
            return;
        }
    };

    let request_id = state.begin_request();
    let cmd = NeoFeedCommand::FetchToday {
        request_id,
        url,
        date: today.format("%Y-%m-%d").to_string(),
    };
    if let Err(err) = channels.cmd_tx.send(cmd) {
        warn!("[NEO FETCH] failed to queue feed request: {}", err);
        state.pending_request = None;
    }
}

pub fn apply_neo_feed_results(
    mut batch: ResMut<NeoBatch>,
    mut state: ResMut<NeoFeedState>,
    channels: Option<Res<NeoFeedChannels>>,
) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(NeoFeedResult {
        request_id,
        records,
    }) = guard.try_recv()
    {
        if !state.accept(request_id) {
            debug!("[NEO FETCH] dropping stale response {}", request_id);
            continue;
        }
        batch.replace(records);
    }
}
