//! Per-object display placement derived from a record.
//!
//! Layouts are a visual spacing heuristic, not physics: every object lands on
//! a circular orbit between 4 and 14 scene units regardless of its real miss
//! distance so the whole batch stays within camera range.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::neo::{NeoBatch, NeoRecord};

pub const MIN_ORBIT_RADIUS: f32 = 4.0;
/// Largest f32 strictly below 14; the radius range is half-open.
pub const MAX_ORBIT_RADIUS: f32 = 13.999_999;
const ORBIT_RADIUS_SPAN: f64 = 10.0;

pub const MIN_ANGULAR_SPEED: f32 = 0.1;
const VELOCITY_DIVISOR_KPH: f64 = 100_000.0;

pub const MIN_VISUAL_SIZE: f32 = 0.02;
pub const MAX_VISUAL_SIZE: f32 = 0.15;
const SIZE_PER_KM: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLayout {
    pub orbit_radius: f32,
    /// Radians per second before the animator's rate scale.
    pub angular_speed: f32,
    /// Starting angle in `[0, 2π)`, drawn once per batch.
    pub phase_offset: f32,
    pub visual_size: f32,
}

impl OrbitLayout {
    pub fn from_record<R: Rng>(record: &NeoRecord, rng: &mut R) -> Self {
        Self {
            orbit_radius: orbit_radius(record.miss_distance_km),
            angular_speed: angular_speed(record.velocity_kph),
            phase_offset: rng.random_range(0.0..TAU),
            visual_size: visual_size(record.diameter_km),
        }
    }
}

/// Non-finite and negative inputs collapse to zero, which puts them at the
/// bottom of each display range.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub fn orbit_radius(miss_distance_km: f64) -> f32 {
    let offset = sanitize(miss_distance_km) % ORBIT_RADIUS_SPAN;
    (MIN_ORBIT_RADIUS + offset as f32).min(MAX_ORBIT_RADIUS)
}

pub fn angular_speed(velocity_kph: f64) -> f32 {
    MIN_ANGULAR_SPEED + (sanitize(velocity_kph) / VELOCITY_DIVISOR_KPH) as f32
}

pub fn visual_size(diameter_km: f64) -> f32 {
    ((sanitize(diameter_km) * SIZE_PER_KM) as f32).clamp(MIN_VISUAL_SIZE, MAX_VISUAL_SIZE)
}

/// Parallel, order-preserving mapping; no cross-element dependencies.
pub fn compute_layouts<R: Rng>(records: &[NeoRecord], rng: &mut R) -> Vec<OrbitLayout> {
    records
        .iter()
        .map(|record| OrbitLayout::from_record(record, rng))
        .collect()
}

/// Layouts for the current batch, memoized on [`NeoBatch::version`] so the
/// random phases survive unrelated state changes.
#[derive(Resource, Debug, Default)]
pub struct LayoutCache {
    version: Option<u64>,
    pub layouts: Vec<OrbitLayout>,
}

impl LayoutCache {
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn is_current(&self, batch: &NeoBatch) -> bool {
        self.version == Some(batch.version)
    }

    /// Recomputes only when the batch version moved. Returns whether it did.
    pub fn refresh<R: Rng>(&mut self, batch: &NeoBatch, rng: &mut R) -> bool {
        if self.is_current(batch) {
            return false;
        }
        self.layouts = compute_layouts(&batch.records, rng);
        self.version = Some(batch.version);
        true
    }

    pub fn clear(&mut self) {
        self.version = None;
        self.layouts.clear();
    }
}

pub fn refresh_orbit_layouts(batch: Res<NeoBatch>, mut cache: ResMut<LayoutCache>) {
    if cache.is_current(&batch) {
        return;
    }
    let mut rng = rand::rng();
    cache.refresh(&batch, &mut rng);
    debug!(
        "[LAYOUT] {} layouts for batch v{}",
        cache.layouts.len(),
        batch.version
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::fixtures::record;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn batch_of(records: Vec<NeoRecord>) -> NeoBatch {
        let mut batch = NeoBatch::default();
        batch.replace(records);
        batch
    }

    #[test]
    fn radius_stays_in_display_range() {
        for miss in [0.0, 3.7, 9.999_999_99, 10.0, 1_234_567.89, 7_460_212.45, 1e15] {
            let r = orbit_radius(miss);
            assert!((MIN_ORBIT_RADIUS..14.0).contains(&r), "miss={miss} r={r}");
        }
        assert!((orbit_radius(1_234_567.0) - 11.0).abs() < 1e-4);
    }

    #[test]
    fn speed_scales_with_velocity() {
        assert!((angular_speed(0.0) - 0.1).abs() < 1e-6);
        assert!((angular_speed(50_000.0) - 0.6).abs() < 1e-6);
        assert!(angular_speed(120_000.0) > angular_speed(60_000.0));
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(visual_size(0.0), MIN_VISUAL_SIZE);
        assert_eq!(visual_size(0.01), MIN_VISUAL_SIZE);
        assert!((visual_size(0.2) - 0.1).abs() < 1e-6);
        assert_eq!(visual_size(5.0), MAX_VISUAL_SIZE);
    }

    #[test]
    fn non_finite_inputs_fall_to_range_floor() {
        assert_eq!(orbit_radius(f64::NAN), MIN_ORBIT_RADIUS);
        assert_eq!(orbit_radius(f64::INFINITY), MIN_ORBIT_RADIUS);
        assert_eq!(angular_speed(f64::NAN), MIN_ANGULAR_SPEED);
        assert_eq!(visual_size(f64::NEG_INFINITY), MIN_VISUAL_SIZE);
    }

    #[test]
    fn phase_offset_in_full_turn() {
        let mut rng = StdRng::seed_from_u64(7);
        let neo = record("1", "A");
        for _ in 0..500 {
            let layout = OrbitLayout::from_record(&neo, &mut rng);
            assert!((0.0..TAU).contains(&layout.phase_offset));
        }
    }

    #[test]
    fn layouts_parallel_to_records() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut near = record("1", "Near");
        near.miss_distance_km = 2.5;
        let mut far = record("2", "Far");
        far.miss_distance_km = 8.0;
        let layouts = compute_layouts(&[near, far], &mut rng);
        assert_eq!(layouts.len(), 2);
        assert!((layouts[0].orbit_radius - 6.5).abs() < 1e-6);
        assert!((layouts[1].orbit_radius - 12.0).abs() < 1e-6);
        assert!(compute_layouts(&[], &mut rng).is_empty());
    }

    #[test]
    fn cache_keeps_phases_for_same_batch() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = batch_of(vec![record("1", "A"), record("2", "B")]);
        let mut cache = LayoutCache::default();

        assert!(cache.refresh(&batch, &mut rng));
        let first = cache.layouts.clone();
        assert!(!cache.refresh(&batch, &mut rng));
        assert_eq!(cache.layouts, first);
        assert_eq!(cache.version(), Some(batch.version));
    }

    #[test]
    fn cache_recomputes_for_new_batch() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut batch = batch_of(vec![record("1", "A")]);
        let mut cache = LayoutCache::default();
        cache.refresh(&batch, &mut rng);
        let before = cache.layouts[0].phase_offset;

        batch.replace(vec![record("1", "A")]);
        assert!(cache.refresh(&batch, &mut rng));
        // Same seed stream continues, so a fresh draw differs.
        assert_ne!(cache.layouts[0].phase_offset, before);
    }

    #[test]
    fn empty_batch_has_no_layouts() {
        let mut rng = StdRng::seed_from_u64(3);
        let batch = batch_of(Vec::new());
        let mut cache = LayoutCache::default();
        cache.refresh(&batch, &mut rng);
        assert!(cache.layouts.is_empty());
        assert!(cache.is_current(&batch));
        cache.clear();
        assert!(!cache.is_current(&batch));
    }
}
