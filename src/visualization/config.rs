//! Scene configuration

use bevy::prelude::*;

/// Camera placement in orbit-camera terms, looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    /// Pose for a camera at `position` looking at the origin.
    pub fn from_position(position: Vec3) -> Self {
        let radius = position.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                yaw: 0.0,
                pitch: 0.0,
            };
        }
        let direction = position / radius;
        Self {
            radius,
            yaw: direction.x.atan2(direction.z),
            pitch: direction.y.asin(),
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct SceneConfig {
    pub background: Color,
    pub landing_camera: Vec3,
    pub dashboard_camera: Vec3,
    /// Dashboard zoom range; the landing view does not zoom.
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Landing auto-rotation, rad/s.
    pub landing_spin_rate: f32,
    pub star_count: usize,
    pub star_radius: f32,
    pub star_depth: f32,
    pub earth_radius: f32,
    pub selected_color: Color,
    pub hazardous_color: Color,
    pub hazardous_emissive: Color,
    pub neutral_color: Color,
    pub emissive_intensity: f32,
    pub orbit_ring_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Color::srgb_u8(0x02, 0x06, 0x17),
            landing_camera: Vec3::new(0.0, 0.0, 8.0),
            dashboard_camera: Vec3::new(0.0, 5.0, 12.0),
            min_zoom: 3.0,
            max_zoom: 30.0,
            landing_spin_rate: 0.05,
            star_count: 5000,
            star_radius: 100.0,
            star_depth: 50.0,
            earth_radius: 2.0,
            selected_color: Color::srgb_u8(0x22, 0xd3, 0xee),
            hazardous_color: Color::srgb_u8(0xef, 0x44, 0x44),
            hazardous_emissive: Color::srgb_u8(0x7f, 0x1d, 0x1d),
            neutral_color: Color::srgb_u8(0x94, 0xa3, 0xb8),
            emissive_intensity: 0.5,
            orbit_ring_color: Color::srgba_u8(0x33, 0x41, 0x55, 0x26),
        }
    }
}
