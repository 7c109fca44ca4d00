//! Orbit camera and per-screen poses

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::visualization::config::{CameraPose, SceneConfig};

#[derive(Component)]
pub struct MainCamera;

/// Spawned in the landing configuration, which is the initial screen.
pub fn spawn_camera(mut commands: Commands, config: Res<SceneConfig>) {
    let mut pan_orbit = PanOrbitCamera::default();
    landing_settings(&mut pan_orbit, &config);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 500.0,
            ..default()
        }),
        Camera {
            clear_color: ClearColorConfig::Custom(config.background),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(config.landing_camera).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn apply_pose(poc: &mut PanOrbitCamera, pose: CameraPose) {
    poc.focus = Vec3::ZERO;
    poc.target_focus = Vec3::ZERO;
    poc.target_radius = pose.radius;
    poc.target_yaw = pose.yaw;
    poc.target_pitch = pose.pitch;
    poc.radius = Some(pose.radius);
    poc.yaw = Some(pose.yaw);
    poc.pitch = Some(pose.pitch);
    poc.force_update = true;
}

/// Landing: fixed distance, no pan, slow auto-rotation.
fn landing_settings(poc: &mut PanOrbitCamera, config: &SceneConfig) {
    apply_pose(poc, CameraPose::from_position(config.landing_camera));
    let radius = config.landing_camera.length();
    poc.zoom_lower_limit = radius;
    poc.zoom_upper_limit = Some(radius);
    poc.pan_sensitivity = 0.0;
}

/// Dashboard: user-controlled within the zoom range.
fn dashboard_settings(poc: &mut PanOrbitCamera, config: &SceneConfig) {
    apply_pose(poc, CameraPose::from_position(config.dashboard_camera));
    poc.zoom_lower_limit = config.min_zoom;
    poc.zoom_upper_limit = Some(config.max_zoom);
    poc.pan_sensitivity = 1.0;
}

pub fn enter_landing_view(
    config: Res<SceneConfig>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    for mut poc in &mut cameras {
        landing_settings(&mut poc, &config);
    }
}

pub fn enter_dashboard_view(
    config: Res<SceneConfig>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    for mut poc in &mut cameras {
        dashboard_settings(&mut poc, &config);
    }
}

pub fn auto_rotate_landing(
    time: Res<Time>,
    config: Res<SceneConfig>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    for mut poc in &mut cameras {
        poc.target_yaw += config.landing_spin_rate * time.delta_secs();
    }
}
