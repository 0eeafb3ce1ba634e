use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::loader::LoadStatus;
use crate::projection::MapProjection;
use crate::types::{MeteoriteBundle, WorldBundle};

/// Country fill.
pub const LAND: Color = Color::srgb(0.584, 0.882, 0.827);
/// Ocean background and country outline.
pub const OCEAN: Color = Color::srgb(0.149, 0.427, 0.596);
/// Marker outline.
pub const MARKER_STROKE: Color = Color::srgb(0.918, 1.0, 0.816);

#[derive(Component)]
pub struct CountryShape;

#[derive(Component)]
pub struct MeteoriteMarker {
    pub slot: usize,
}

/// Respawns the country layer whenever the world bundle changes.
pub fn respawn_world(
    mut commands: Commands,
    shapes_query: Query<Entity, With<CountryShape>>,
    mut world_bundle: ResMut<WorldBundle>,
    projection: Res<MapProjection>,
    status: Res<LoadStatus>,
) {
    if !world_bundle.respawn || status.failure().is_some() {
        return;
    }
    world_bundle.respawn = false;

    for entity in shapes_query.iter() {
        commands.entity(entity).despawn();
    }

    let mut batch = Vec::new();
    for feature in &world_bundle.features {
        let outline = shapes::Polygon {
            points: feature.projected_outline(&projection),
            closed: true,
        };
        batch.push((
            ShapeBuilder::with(&outline)
                .fill(LAND)
                .stroke((OCEAN, 1.0))
                .build(),
            Transform::from_xyz(0.0, 0.0, 0.0),
            CountryShape,
        ));
    }
    commands.spawn_batch(batch);
}

/// Respawns the marker layer in encoded draw order; the z offset keeps the
/// later (smaller) markers on top.
pub fn respawn_meteorites(
    mut commands: Commands,
    markers_query: Query<Entity, With<MeteoriteMarker>>,
    mut meteorite_bundle: ResMut<MeteoriteBundle>,
    status: Res<LoadStatus>,
) {
    if !meteorite_bundle.respawn || status.failure().is_some() {
        return;
    }
    meteorite_bundle.respawn = false;

    for entity in markers_query.iter() {
        commands.entity(entity).despawn();
    }

    let mut batch = Vec::new();
    for (slot, meteorite) in meteorite_bundle.meteorites.iter().enumerate() {
        let circle = shapes::Circle {
            radius: meteorite.radius,
            center: Vec2::ZERO,
        };
        batch.push((
            ShapeBuilder::with(&circle)
                .fill(meteorite.color.with_alpha(0.5))
                .stroke((MARKER_STROKE, 1.0))
                .build(),
            Transform::from_xyz(
                meteorite.position.x,
                meteorite.position.y,
                1.0 + slot as f32 * 1e-3,
            ),
            MeteoriteMarker { slot },
        ));
    }
    commands.spawn_batch(batch);
}

/// A failed load suppresses the whole visualization: no partial render.
pub fn teardown_on_failure(
    mut commands: Commands,
    status: Res<LoadStatus>,
    entities: Query<Entity, Or<(With<CountryShape>, With<MeteoriteMarker>)>>,
) {
    if status.is_changed() && status.failure().is_some() {
        for entity in entities.iter() {
            commands.entity(entity).despawn();
        }
    }
}
