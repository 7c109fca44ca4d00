//! Per-frame orbit and spin updates.
//!
//! Everything here is a pure function of elapsed time, so a frame's output
//! does not depend on the frame rate. The systems only write `Transform`s;
//! entity lifetimes belong to the scene layer.

use bevy::prelude::*;

use crate::orbital::layout::{LayoutCache, OrbitLayout};

/// The orbital angle advances at half the layout's angular speed.
pub const ORBIT_RATE_SCALE: f32 = 0.5;
/// Self-rotation rate on the X and Y axes, in rad/s (0.01 rad/frame at 60 fps).
pub const SPIN_RATE: f32 = 0.6;

/// Visual handles indexed parallel to [`LayoutCache::layouts`].
///
/// Slots may be empty or point at despawned entities while a batch is being
/// swapped; the animator skips those.
#[derive(Resource, Debug, Default)]
pub struct OrbitHandles(pub Vec<Option<Entity>>);

/// Marker for entities the animator is allowed to move.
#[derive(Component, Debug)]
pub struct OrbitingBody;

/// Rotates around Y at `elapsed / period_divisor` radians.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlanetSpin {
    pub period_divisor: f32,
}

pub fn orbit_angle(layout: &OrbitLayout, elapsed_secs: f32) -> f32 {
    layout.phase_offset + elapsed_secs * layout.angular_speed * ORBIT_RATE_SCALE
}

/// Position on the layout's circle in the XZ plane.
pub fn orbit_position(layout: &OrbitLayout, elapsed_secs: f32) -> Vec3 {
    let angle = orbit_angle(layout, elapsed_secs);
    Vec3::new(
        layout.orbit_radius * angle.cos(),
        0.0,
        layout.orbit_radius * angle.sin(),
    )
}

pub fn spin_rotation(elapsed_secs: f32) -> Quat {
    let angle = elapsed_secs * SPIN_RATE;
    Quat::from_euler(EulerRot::XYZ, angle, angle, 0.0)
}

pub fn planet_rotation(spin: &PlanetSpin, elapsed_secs: f32) -> Quat {
    if spin.period_divisor == 0.0 {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(elapsed_secs / spin.period_divisor)
}

/// Moves every registered body using one elapsed-time snapshot.
pub fn animate_orbits(
    time: Res<Time>,
    cache: Res<LayoutCache>,
    handles: Res<OrbitHandles>,
    mut bodies: Query<&mut Transform, With<OrbitingBody>>,
) {
    let elapsed = time.elapsed_secs();
    let spin = spin_rotation(elapsed);

    for (layout, handle) in cache.layouts.iter().zip(handles.0.iter()) {
        let Some(entity) = handle else { continue };
        let Ok(mut transform) = bodies.get_mut(*entity) else {
            continue;
        };
        transform.translation = orbit_position(layout, elapsed);
        transform.rotation = spin;
    }
}

pub fn rotate_planets(time: Res<Time>, mut planets: Query<(&mut Transform, &PlanetSpin)>) {
    let elapsed = time.elapsed_secs();
    for (mut transform, spin) in &mut planets {
        transform.rotation = planet_rotation(spin, elapsed);
    }
}
