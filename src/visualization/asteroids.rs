//! Orbiting object visuals.
//!
//! Owns the entity lifecycle behind [`OrbitHandles`]: one entity per layout,
//! rebuilt whenever the layout cache moves to a new batch.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::neo::NeoBatch;
use crate::orbital::{LayoutCache, OrbitHandles, OrbitingBody, orbit_position};
use crate::selection::Selection;
use crate::visualization::config::SceneConfig;

#[derive(Component, Debug)]
pub struct Asteroid {
    pub external_id: String,
    pub is_hazardous: bool,
}

/// Layout-cache version the spawned entities were built from.
#[derive(Resource, Debug, Default)]
pub struct SpawnedLayoutVersion(pub Option<u64>);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidStyle {
    pub base_color: Color,
    pub emissive: LinearRgba,
}

/// Selected beats hazardous beats neutral.
pub fn asteroid_style(config: &SceneConfig, selected: bool, hazardous: bool) -> AsteroidStyle {
    let (base_color, glow) = if selected {
        (config.selected_color, Some(config.selected_color))
    } else if hazardous {
        (config.hazardous_color, Some(config.hazardous_emissive))
    } else {
        (config.neutral_color, None)
    };
    AsteroidStyle {
        base_color,
        emissive: glow
            .map(|c| c.to_linear() * config.emissive_intensity)
            .unwrap_or(LinearRgba::BLACK),
    }
}

fn despawn_all(commands: &mut Commands, handles: &mut OrbitHandles) {
    for entity in handles.0.drain(..).flatten() {
        commands.entity(entity).try_despawn();
    }
}

/// Rebuilds the visuals when the layout cache changes batch.
pub fn sync_asteroid_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    batch: Res<NeoBatch>,
    cache: Res<LayoutCache>,
    selection: Res<Selection>,
    config: Res<SceneConfig>,
    mut handles: ResMut<OrbitHandles>,
    mut spawned: ResMut<SpawnedLayoutVersion>,
) {
    if spawned.0 == cache.version() {
        return;
    }
    despawn_all(&mut commands, &mut handles);
    spawned.0 = cache.version();

    if !cache.is_current(&batch) || cache.layouts.is_empty() {
        return;
    }

    let mesh = match Sphere::new(1.0).mesh().ico(1) {
        Ok(mesh) => meshes.add(mesh),
        Err(err) => {
            error!("[SCENE] asteroid mesh: {}", err);
            return;
        }
    };

    for (record, layout) in batch.records.iter().zip(cache.layouts.iter()) {
        let style = asteroid_style(
            &config,
            selection.is_selected(&record.external_id),
            record.is_hazardous,
        );
        let material = materials.add(StandardMaterial {
            base_color: style.base_color,
            emissive: style.emissive,
            perceptual_roughness: 0.9,
            ..default()
        });

        let id = record.external_id.clone();
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(orbit_position(layout, 0.0))
                    .with_scale(Vec3::splat(layout.visual_size)),
                OrbitingBody,
                Asteroid {
                    external_id: record.external_id.clone(),
                    is_hazardous: record.is_hazardous,
                },
                Name::new(record.name.clone()),
            ))
            .observe(
                move |mut click: On<Pointer<Click>>,
                      batch: Res<NeoBatch>,
                      mut selection: ResMut<Selection>| {
                    click.propagate(false);
                    if let Err(err) = selection.select(&batch, &id) {
                        warn!("[SELECT] {:#}", err);
                    }
                },
            )
            .id();
        handles.0.push(Some(entity));
    }
    info!("[SCENE] {} orbiting objects", handles.0.len());
}

/// Re-colors every visual when the selection moves.
pub fn highlight_selection(
    selection: Res<Selection>,
    config: Res<SceneConfig>,
    asteroids: Query<(&Asteroid, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !selection.is_changed() {
        return;
    }
    for (asteroid, material) in &asteroids {
        let Some(mut material) = materials.get_mut(&material.0) else {
            continue;
        };
        let style = asteroid_style(
            &config,
            selection.is_selected(&asteroid.external_id),
            asteroid.is_hazardous,
        );
        material.base_color = style.base_color;
        material.emissive = style.emissive;
    }
}

/// Faint circle under each orbit.
pub fn draw_orbit_rings(mut gizmos: Gizmos, cache: Res<LayoutCache>, config: Res<SceneConfig>) {
    let flat = Isometry3d::from_rotation(Quat::from_rotation_x(FRAC_PI_2));
    for layout in &cache.layouts {
        gizmos
            .circle(flat, layout.orbit_radius, config.orbit_ring_color)
            .resolution(64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::fixtures::record;
    use bevy::ecs::system::RunSystemOnce;

    fn world_with_batch(ids: &[&str]) -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<Selection>();
        world.init_resource::<OrbitHandles>();
        world.init_resource::<SpawnedLayoutVersion>();
        world.insert_resource(SceneConfig::default());

        let mut batch = NeoBatch::default();
        batch.replace(ids.iter().map(|id| record(id, "Obj")).collect());
        let mut cache = LayoutCache::default();
        let mut rng = rand::rng();
        cache.refresh(&batch, &mut rng);
        world.insert_resource(batch);
        world.insert_resource(cache);
        world
    }

    #[test]
    fn style_precedence() {
        let config = SceneConfig::default();
        let selected = asteroid_style(&config, true, true);
        assert_eq!(selected.base_color, config.selected_color);
        assert_eq!(selected.emissive, config.selected_color.to_linear() * 0.5);

        let hazardous = asteroid_style(&config, false, true);
        assert_eq!(hazardous.base_color, config.hazardous_color);
        assert_eq!(
            hazardous.emissive,
            config.hazardous_emissive.to_linear() * 0.5
        );

        let neutral = asteroid_style(&config, false, false);
        assert_eq!(neutral.base_color, config.neutral_color);
        assert_eq!(neutral.emissive, LinearRgba::BLACK);
    }

    #[test]
    fn one_entity_per_layout_in_order() {
        let mut world = world_with_batch(&["a", "b", "c"]);
        world.run_system_once(sync_asteroid_entities).unwrap();

        let handles: Vec<Entity> = world
            .resource::<OrbitHandles>()
            .0
            .iter()
            .flatten()
            .copied()
            .collect();
        assert_eq!(handles.len(), 3);
        let ids: Vec<String> = handles
            .iter()
            .map(|e| world.get::<Asteroid>(*e).unwrap().external_id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let scale = world.get::<Transform>(handles[0]).unwrap().scale;
        let expected = world.resource::<LayoutCache>().layouts[0].visual_size;
        assert_eq!(scale, Vec3::splat(expected));
    }

    #[test]
    fn new_batch_replaces_entities() {
        let mut world = world_with_batch(&["a", "b"]);
        world.run_system_once(sync_asteroid_entities).unwrap();
        let old: Vec<Entity> = world
            .resource::<OrbitHandles>()
            .0
            .iter()
            .flatten()
            .copied()
            .collect();

        world.resource_scope(|world, mut batch: Mut<NeoBatch>| {
            batch.replace(vec![record("z", "Zed")]);
            let mut rng = rand::rng();
            world.resource_mut::<LayoutCache>().refresh(&batch, &mut rng);
        });
        world.run_system_once(sync_asteroid_entities).unwrap();

        for entity in old {
            assert!(world.get_entity(entity).is_err());
        }
        assert_eq!(world.resource::<OrbitHandles>().0.len(), 1);
    }

    #[test]
    fn empty_batch_spawns_nothing() {
        let mut world = world_with_batch(&[]);
        world.run_system_once(sync_asteroid_entities).unwrap();
        assert!(world.resource::<OrbitHandles>().0.is_empty());
        assert_eq!(world.query::<&Asteroid>().iter(&world).count(), 0);
    }

    #[test]
    fn cleared_cache_despawns_everything() {
        let mut world = world_with_batch(&["a"]);
        world.run_system_once(sync_asteroid_entities).unwrap();
        world.resource_mut::<LayoutCache>().clear();
        world.run_system_once(sync_asteroid_entities).unwrap();
        assert!(world.resource::<OrbitHandles>().0.is_empty());
        assert_eq!(world.query::<&Asteroid>().iter(&world).count(), 0);
    }
}
