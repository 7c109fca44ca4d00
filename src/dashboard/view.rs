//! Derived dashboard data: search filtering, stats, chart series and the
//! detail panel's number formats.

use crate::neo::NeoRecord;

pub const DISTANCE_CHART_LEN: usize = 8;
pub const VELOCITY_CHART_LEN: usize = 10;

/// Case-insensitive substring match on the display name. Batch order is kept
/// and an empty query matches everything.
pub fn filter_by_name<'a>(records: &'a [NeoRecord], query: &str) -> Vec<&'a NeoRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub monitored: usize,
    pub hazardous: usize,
}

impl DashboardStats {
    pub fn from_records(records: &[NeoRecord]) -> Self {
        Self {
            monitored: records.len(),
            hazardous: records.iter().filter(|r| r.is_hazardous).count(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub external_id: String,
    pub name: String,
    pub value: f64,
}

fn series(records: &[&NeoRecord], len: usize, value: fn(&NeoRecord) -> f64) -> Vec<ChartPoint> {
    records
        .iter()
        .take(len)
        .map(|record| ChartPoint {
            external_id: record.external_id.clone(),
            name: record.name.clone(),
            value: value(record),
        })
        .collect()
}

/// Miss distance bars for the leading filtered objects.
pub fn miss_distance_series(filtered: &[&NeoRecord]) -> Vec<ChartPoint> {
    series(filtered, DISTANCE_CHART_LEN, |r| r.miss_distance_km)
}

pub fn velocity_series(filtered: &[&NeoRecord]) -> Vec<ChartPoint> {
    series(filtered, VELOCITY_CHART_LEN, |r| r.velocity_kph)
}

pub fn format_diameter(km: f64) -> String {
    format!("{:.3}", km)
}

/// Rounded to whole kph with `,` thousands separators.
pub fn format_velocity(kph: f64) -> String {
    group_thousands(kph.round() as i64)
}

/// Millions of km, two decimals.
pub fn format_miss_distance(km: f64) -> String {
    format!("{:.2}", km / 1_000_000.0)
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::fixtures::record;

    fn sample() -> Vec<NeoRecord> {
        vec![
            record("1", "(2024 AB) Apophis"),
            record("2", "433 Eros"),
            record("3", "(2019 XY) bennu-like"),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let records = sample();
        let filtered = filter_by_name(&records, "");
        let ids: Vec<_> = filtered.iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let records = sample();
        let filtered = filter_by_name(&records, "EROS");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].external_id, "2");

        let filtered = filter_by_name(&records, "20");
        let ids: Vec<_> = filtered.iter().map(|r| r.external_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert!(filter_by_name(&records, "ceres").is_empty());
    }

    #[test]
    fn stats_count_full_batch() {
        let mut records = sample();
        records[1].is_hazardous = true;
        let stats = DashboardStats::from_records(&records);
        assert_eq!(
            stats,
            DashboardStats {
                monitored: 3,
                hazardous: 1
            }
        );
        assert_eq!(DashboardStats::from_records(&[]), DashboardStats::default());
    }

    #[test]
    fn chart_series_are_truncated() {
        let records: Vec<_> = (0..12)
            .map(|i| {
                let mut r = record(&i.to_string(), "Obj");
                r.miss_distance_km = i as f64;
                r
            })
            .collect();
        let filtered = filter_by_name(&records, "");
        let bars = miss_distance_series(&filtered);
        assert_eq!(bars.len(), DISTANCE_CHART_LEN);
        assert_eq!(bars[7].value, 7.0);
        assert_eq!(velocity_series(&filtered).len(), VELOCITY_CHART_LEN);
        assert_eq!(velocity_series(&filtered[..3]).len(), 3);
    }

    #[test]
    fn detail_formats() {
        assert_eq!(format_diameter(0.123_456), "0.123");
        assert_eq!(format_velocity(54_321.6), "54,322");
        assert_eq!(format_velocity(999.4), "999");
        assert_eq!(format_velocity(1_234_567.0), "1,234,567");
        assert_eq!(format_miss_distance(7_460_212.0), "7.46");
        assert_eq!(format_miss_distance(0.0), "0.00");
    }
}
