//! Orbit layout and animation
//!
//! Layouts are derived once per record batch; the animator turns them into
//! per-frame transforms.

use bevy::prelude::*;

use crate::neo::apply_neo_feed_results;

pub mod animation;
pub mod layout;

pub use animation::{
    OrbitHandles, OrbitingBody, PlanetSpin, animate_orbits, orbit_position, rotate_planets,
};
pub use layout::{LayoutCache, OrbitLayout, refresh_orbit_layouts};

/// Plugin for orbit layouts and per-frame animation
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutCache>()
            .init_resource::<OrbitHandles>()
            .add_systems(
                Update,
                (
                    refresh_orbit_layouts.after(apply_neo_feed_results),
                    animate_orbits.after(refresh_orbit_layouts),
                    rotate_planets,
                ),
            );
    }
}
