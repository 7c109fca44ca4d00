//! Background starfield

use bevy::prelude::*;
use rand::Rng;

use crate::visualization::config::SceneConfig;

#[derive(Component)]
pub struct Star;

/// A point in the spherical shell `[radius, radius + depth]`, uniform in
/// direction.
pub fn star_position<R: Rng>(rng: &mut R, radius: f32, depth: f32) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    let distance = radius + rng.random_range(0.0..=depth);
    Vec3::new(ring * theta.cos(), z, ring * theta.sin()) * distance
}

pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let mesh = meshes.add(Sphere::new(0.12).mesh().uv(6, 4));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 2.0,
        unlit: true,
        ..default()
    });

    let mut rng = rand::rng();
    for _ in 0..config.star_count {
        let position = star_position(&mut rng, config.star_radius, config.star_depth);
        let scale = rng.random_range(0.4..1.6);
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
            bevy::picking::Pickable::IGNORE,
            Star,
        ));
    }
    debug!("[INIT] {} stars", config.star_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn stars_stay_in_shell() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let d = star_position(&mut rng, 100.0, 50.0).length();
            assert!((99.99..=150.01).contains(&d), "distance {d}");
        }
    }
}
