//! Scene lighting

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

#[derive(Component)]
pub struct KeyLight;

pub fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 100.0,
            ..default()
        },
        KeyLight,
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));
}
