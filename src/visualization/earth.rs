use bevy::prelude::*;

use crate::orbital::PlanetSpin;
use crate::visualization::config::SceneConfig;

const EARTH_SPIN_DIVISOR: f32 = 25.0;
const CLOUD_SPIN_DIVISOR: f32 = 20.0;

#[derive(Component)]
pub struct Earth;

struct Shell {
    name: &'static str,
    scale: f32,
    color: Color,
    spin: Option<f32>,
}

/// Cloud layer and two atmosphere halos, as multiples of the Earth radius.
const SHELLS: [Shell; 3] = [
    Shell {
        name: "Clouds",
        scale: 1.0075,
        color: Color::srgba(1.0, 1.0, 1.0, 0.18),
        spin: Some(CLOUD_SPIN_DIVISOR),
    },
    Shell {
        name: "Atmosphere",
        scale: 1.04,
        color: Color::srgba(0.118, 0.251, 0.686, 0.15),
        spin: Some(EARTH_SPIN_DIVISOR),
    },
    Shell {
        name: "Atmosphere Highlight",
        scale: 1.05,
        color: Color::srgba(0.024, 0.714, 0.831, 0.05),
        spin: None,
    },
];

/// Spawns the host planet with its shells as children so they turn with it.
pub fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let sphere = meshes.add(Sphere::new(config.earth_radius).mesh().uv(64, 64));

    let surface = materials.add(StandardMaterial {
        base_color: Color::srgb(0.11, 0.32, 0.68),
        emissive: Color::srgb_u8(0x00, 0x0b, 0x1a).to_linear(),
        perceptual_roughness: 0.85,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(surface),
            Transform::default(),
            Earth,
            PlanetSpin {
                period_divisor: EARTH_SPIN_DIVISOR,
            },
            Name::new("Earth"),
        ))
        .with_children(|parent| {
            for shell in &SHELLS {
                let material = materials.add(StandardMaterial {
                    base_color: shell.color,
                    alpha_mode: AlphaMode::Add,
                    unlit: true,
                    cull_mode: None,
                    ..default()
                });
                let mut child = parent.spawn((
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(material),
                    Transform::from_scale(Vec3::splat(shell.scale)),
                    bevy::picking::Pickable::IGNORE,
                    Name::new(shell.name),
                ));
                if let Some(divisor) = shell.spin {
                    child.insert(PlanetSpin {
                        period_divisor: divisor,
                    });
                }
            }
        });
}
