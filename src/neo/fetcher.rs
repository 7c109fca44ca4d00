//! NeoWs feed worker.

use crate::neo::types::{NeoFeedChannels, NeoFeedCommand, NeoFeedConfig, NeoFeedResult, NeoRecord};
use anyhow::{Context, Result};
use bevy::log::{error, info, warn};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::{
    Arc, Mutex,
    mpsc::{self},
};
use std::thread;

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    near_earth_objects: HashMap<String, Vec<RawNeo>>,
}

#[derive(Debug, Deserialize)]
struct RawNeo {
    id: String,
    name: String,
    estimated_diameter: EstimatedDiameter,
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Deserialize)]
struct EstimatedDiameter {
    kilometers: DiameterRange,
}

#[derive(Debug, Deserialize)]
struct DiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Debug, Deserialize)]
struct CloseApproach {
    close_approach_date: String,
    relative_velocity: RelativeVelocity,
    miss_distance: MissDistance,
}

#[derive(Debug, Deserialize)]
struct RelativeVelocity {
    kilometers_per_hour: String,
}

#[derive(Debug, Deserialize)]
struct MissDistance {
    kilometers: String,
}

pub fn start_neo_feed_worker() -> NeoFeedChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<NeoFeedCommand>();
    let (res_tx, res_rx) = mpsc::channel::<NeoFeedResult>();

    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(err) => {
                error!("[NEO FETCH] failed to start tokio runtime: {}", err);
                return;
            }
        };
        rt.block_on(async move {
            let client = reqwest::Client::new();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    NeoFeedCommand::FetchToday {
                        request_id,
                        url,
                        date,
                    } => {
                        let records = match fetch_feed(&client, &url, &date).await {
                            Ok(records) => {
                                info!("[NEO FETCH] {} objects for {}", records.len(), date);
                                records
                            }
                            Err(err) => {
                                warn!("[NEO FETCH] feed for {} failed: {:#}", date, err);
                                Vec::new()
                            }
                        };
                        let _ = res_tx.send(NeoFeedResult {
                            request_id,
                            records,
                        });
                    }
                }
            }
        });
    });

    NeoFeedChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

/// Feed URL for a single-day window.
pub fn build_feed_url(config: &NeoFeedConfig, date: NaiveDate) -> Result<String> {
    let day = date.format("%Y-%m-%d").to_string();
    let mut url = reqwest::Url::parse(&format!("{}/feed", config.base_url))
        .with_context(|| format!("invalid feed base url {}", config.base_url))?;
    url.query_pairs_mut()
        .append_pair("start_date", &day)
        .append_pair("end_date", &day)
        .append_pair("api_key", &config.api_key);
    Ok(url.to_string())
}

async fn fetch_feed(client: &reqwest::Client, url: &str, date: &str) -> Result<Vec<NeoRecord>> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        anyhow::bail!("HTTP {} from NeoWs", status);
    }
    parse_feed(&body, date, Utc::now())
}

/// Maps the feed body to records for `date`, in feed order.
///
/// A missing date key is an empty day, not an error. Entries without
/// close-approach data or with unparsable numbers are skipped, as are
/// repeated catalog ids.
pub fn parse_feed(body: &str, date: &str, fetched_at: DateTime<Utc>) -> Result<Vec<NeoRecord>> {
    let mut feed: FeedResponse = serde_json::from_str(body).context("malformed feed payload")?;
    let raw = feed.near_earth_objects.remove(date).unwrap_or_default();

    let mut seen = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());
    for neo in raw {
        if !seen.insert(neo.id.clone()) {
            warn!("[NEO FETCH] duplicate object {} dropped", neo.id);
            continue;
        }
        let next_id = records.len() as u32 + 1;
        match map_record(neo, next_id, fetched_at) {
            Ok(record) => records.push(record),
            Err(err) => warn!("[NEO FETCH] skipping object: {:#}", err),
        }
    }
    Ok(records)
}

fn map_record(neo: RawNeo, id: u32, fetched_at: DateTime<Utc>) -> Result<NeoRecord> {
    let approach = neo
        .close_approach_data
        .first()
        .with_context(|| format!("{} has no close approach data", neo.id))?;
    let miss_distance_km = parse_finite(&approach.miss_distance.kilometers)
        .with_context(|| format!("{} miss distance", neo.id))?;
    let velocity_kph = parse_finite(&approach.relative_velocity.kilometers_per_hour)
        .with_context(|| format!("{} relative velocity", neo.id))?;
    let range = &neo.estimated_diameter.kilometers;

    Ok(NeoRecord {
        id,
        name: neo.name,
        diameter_km: (range.estimated_diameter_min + range.estimated_diameter_max) / 2.0,
        is_hazardous: neo.is_potentially_hazardous_asteroid,
        miss_distance_km,
        velocity_kph,
        close_approach_date: approach.close_approach_date.clone(),
        external_id: neo.id,
        fetched_at,
    })
}

fn parse_finite(value: &str) -> Result<f64> {
    let parsed: f64 = value.trim().parse()?;
    anyhow::ensure!(parsed.is_finite(), "non-finite value {}", value);
    Ok(parsed)
}
