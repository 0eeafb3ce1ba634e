use bevy::prelude::*;

use crate::projection::MapProjection;
use crate::types::{MeteoriteBundle, WorldBundle};

use super::{respawn_meteorites, respawn_world, teardown_on_failure};

pub struct MapRenderPlugin;

impl Plugin for MapRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(MapProjection::default())
            .insert_resource(WorldBundle::default())
            .insert_resource(MeteoriteBundle::default())
            .add_systems(
                Update,
                (respawn_world, respawn_meteorites, teardown_on_failure),
            );
    }
}
