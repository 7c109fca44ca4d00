//! Three-tier risk classification for a single record.

use crate::neo::types::NeoRecord;
use bevy::prelude::Color;

/// Objects above this diameter that are also flagged hazardous rank highest.
pub const LARGE_DIAMETER_KM: f64 = 0.1;
/// Closer than this, even unflagged objects are worth watching.
pub const WATCH_DISTANCE_KM: f64 = 5_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Safe,
    Watch,
    PotentiallyHazardous,
}

impl RiskLevel {
    /// Clauses are checked in order; hazardous-and-large beats plain hazardous.
    pub fn assess(is_hazardous: bool, diameter_km: f64, miss_distance_km: f64) -> Self {
        if is_hazardous && diameter_km > LARGE_DIAMETER_KM {
            RiskLevel::PotentiallyHazardous
        } else if is_hazardous || miss_distance_km < WATCH_DISTANCE_KM {
            RiskLevel::Watch
        } else {
            RiskLevel::Safe
        }
    }

    pub fn classify(record: &NeoRecord) -> Self {
        Self::assess(
            record.is_hazardous,
            record.diameter_km,
            record.miss_distance_km,
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Watch => "Watch",
            RiskLevel::PotentiallyHazardous => "Potentially Hazardous",
        }
    }

    /// Badge color for the detail panel.
    pub fn color(self) -> Color {
        match self {
            RiskLevel::Safe => Color::srgb_u8(0x4a, 0xde, 0x80),
            RiskLevel::Watch => Color::srgb_u8(0xfa, 0xcc, 0x15),
            RiskLevel::PotentiallyHazardous => Color::srgb_u8(0xef, 0x44, 0x44),
        }
    }
}
