use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";
const DEFAULT_API_KEY: &str = "DEMO_KEY";

/// One monitored body from today's close-approach feed.
#[derive(Clone, Debug, PartialEq)]
pub struct NeoRecord {
    /// 1-based import sequence number, unique within a batch.
    pub id: u32,
    /// Catalog identifier; the key for selection, watchlist and entities.
    pub external_id: String,
    pub name: String,
    pub diameter_km: f64,
    pub is_hazardous: bool,
    pub miss_distance_km: f64,
    pub velocity_kph: f64,
    pub close_approach_date: String,
    pub fetched_at: DateTime<Utc>,
}

/// The current fetch cycle's records.
///
/// `version` bumps on every [`NeoBatch::replace`], and derived state
/// (orbit layouts, spawned entities) is keyed on it.
#[derive(Resource, Debug, Default)]
pub struct NeoBatch {
    pub version: u64,
    pub records: Vec<NeoRecord>,
}

impl NeoBatch {
    pub fn replace(&mut self, records: Vec<NeoRecord>) {
        self.records = records;
        self.version = self.version.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn contains(&self, external_id: &str) -> bool {
        self.records.iter().any(|r| r.external_id == external_id)
    }

    pub fn get(&self, external_id: &str) -> Option<&NeoRecord> {
        self.records.iter().find(|r| r.external_id == external_id)
    }
}

#[derive(Resource, Clone, Debug)]
pub struct NeoFeedConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for NeoFeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

impl NeoFeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("COSMICWATCH_NEO_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("NASA_API_KEY").filter(|v| !v.trim().is_empty()) {
            config.api_key = key;
        }
        config
    }
}

/// Bookkeeping for the single in-flight feed request.
#[derive(Resource, Debug, Default)]
pub struct NeoFeedState {
    next_request_id: u64,
    /// Request whose response is still wanted. Cleared when the dashboard is
    /// torn down so a late response is dropped instead of applied.
    pub pending_request: Option<u64>,
    pub last_update: Option<DateTime<Utc>>,
}

impl NeoFeedState {
    pub fn begin_request(&mut self) -> u64 {
        self.next_request_id += 1;
        self.pending_request = Some(self.next_request_id);
        self.next_request_id
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Returns true if `request_id` is the one still awaited, and clears it.
    pub fn accept(&mut self, request_id: u64) -> bool {
        if self.pending_request == Some(request_id) {
            self.pending_request = None;
            self.last_update = Some(Utc::now());
            true
        } else {
            false
        }
    }
}

#[derive(Resource)]
pub struct NeoFeedChannels {
    pub cmd_tx: Sender<NeoFeedCommand>,
    pub res_rx: Arc<Mutex<Receiver<NeoFeedResult>>>,
}

#[derive(Debug)]
pub enum NeoFeedCommand {
    FetchToday { request_id: u64, url: String, date: String },
}

/// The worker never reports errors upward: a failed fetch arrives as an
/// empty `records` list.
#[derive(Debug)]
pub struct NeoFeedResult {
    pub request_id: u64,
    pub records: Vec<NeoRecord>,
}
