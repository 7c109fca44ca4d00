//! Near-Earth object feed (NASA NeoWs) and the record model.

use bevy::prelude::*;

pub mod fetcher;
pub mod risk;
pub mod systems;
pub mod types;

pub use risk::RiskLevel;
pub use systems::{apply_neo_feed_results, request_today_feed};
pub use types::{NeoBatch, NeoFeedConfig, NeoFeedState, NeoRecord};

/// Plugin for the NEO feed worker and the shared record batch.
pub struct NeoPlugin;

impl Plugin for NeoPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(NeoFeedConfig::from_env())
            .init_resource::<NeoFeedState>()
            .init_resource::<NeoBatch>()
            .add_systems(Startup, systems::setup_neo_feed_worker)
            .add_systems(Update, apply_neo_feed_results);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::NeoRecord;
    use chrono::Utc;

    pub(crate) fn record(external_id: &str, name: &str) -> NeoRecord {
        NeoRecord {
            id: 1,
            external_id: external_id.to_string(),
            name: name.to_string(),
            diameter_km: 0.1,
            is_hazardous: false,
            miss_distance_km: 1_000_000.0,
            velocity_kph: 50_000.0,
            close_approach_date: "2026-10-19".to_string(),
            fetched_at: Utc::now(),
        }
    }
}
