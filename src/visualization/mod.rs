//! Scene composition: host planet, starfield, lighting, camera and the
//! orbiting object visuals.

use bevy::prelude::*;

use crate::dashboard::auto_select_first;
use crate::orbital::{animate_orbits, refresh_orbit_layouts};
use crate::session::Screen;

pub mod asteroids;
pub mod camera;
pub mod config;
pub mod earth;
pub mod lighting;
pub mod stars;

pub use asteroids::{Asteroid, SpawnedLayoutVersion};
pub use camera::MainCamera;
pub use config::SceneConfig;

/// Plugin for scene setup and per-frame visual updates
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .init_resource::<SpawnedLayoutVersion>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    earth::spawn_earth,
                    stars::spawn_starfield,
                    lighting::setup_lighting,
                ),
            )
            .add_systems(OnEnter(Screen::Landing), camera::enter_landing_view)
            .add_systems(OnEnter(Screen::Dashboard), camera::enter_dashboard_view)
            .add_systems(
                Update,
                (
                    asteroids::sync_asteroid_entities
                        .after(refresh_orbit_layouts)
                        .after(auto_select_first)
                        .before(animate_orbits),
                    asteroids::highlight_selection.after(asteroids::sync_asteroid_entities),
                    camera::auto_rotate_landing.run_if(in_state(Screen::Landing)),
                    asteroids::draw_orbit_rings.run_if(in_state(Screen::Dashboard)),
                ),
            );
    }
}
