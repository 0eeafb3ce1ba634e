use bevy::prelude::*;

use crate::projection::MapProjection;

/// One country outline from the world topology, consumed verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldFeature {
    pub id: String,
    /// Outer ring only, stored as (x = longitude, y = latitude) degrees.
    pub geometry: geo::Polygon,
}

impl WorldFeature {
    pub fn projected_outline(&self, projection: &MapProjection) -> Vec<Vec2> {
        self.geometry
            .exterior()
            .coords()
            .map(|coord| projection.project(coord.x, coord.y))
            .collect()
    }
}

#[derive(Resource, Default)]
pub struct WorldBundle {
    pub features: Vec<WorldFeature>,
    pub respawn: bool,
}
