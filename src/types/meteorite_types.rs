use bevy::prelude::*;
use chrono::NaiveDateTime;
use rstar::{AABB, RTree, RTreeObject};

/// A single row of the meteorite landings dataset, as loaded. Never mutated
/// after loading; the encoding pipeline derives [`EncodedMeteorite`]s from it.
#[derive(Clone, Debug, PartialEq)]
pub struct MeteoriteRecord {
    pub name: String,
    /// Mass in grams, non-negative.
    pub mass: f64,
    /// Missing or unparseable timestamps are `None`.
    pub year: Option<NaiveDateTime>,
    pub recclass: String,
    pub reclat: f64,
    pub reclong: f64,
}

/// A record plus everything the renderer needs: hue, color, marker radius
/// and the projected position.
#[derive(Clone, Debug)]
pub struct EncodedMeteorite {
    pub record: MeteoriteRecord,
    pub hue: f32,
    pub color: Color,
    pub radius: f32,
    pub position: Vec2,
}

/// Entry of the pointer hit-test index. `slot` is the position in the draw
/// order; higher slots are drawn on top.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerIndex {
    pub center: [f32; 2],
    pub radius: f32,
    pub slot: usize,
}

impl MarkerIndex {
    pub fn contains(&self, point: Vec2) -> bool {
        let dx = point.x - self.center[0];
        let dy = point.y - self.center[1];
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

impl RTreeObject for MarkerIndex {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.center[0] - self.radius, self.center[1] - self.radius],
            [self.center[0] + self.radius, self.center[1] + self.radius],
        )
    }
}

#[derive(Resource, Default)]
pub struct MeteoriteBundle {
    /// Encoded records in draw order.
    pub meteorites: Vec<EncodedMeteorite>,
    /// Spatial index over the markers, used for hover hit-testing.
    pub index: RTree<MarkerIndex>,
    pub respawn: bool,
}

impl MeteoriteBundle {
    pub fn set(&mut self, encoded: Vec<EncodedMeteorite>) {
        let entries = encoded
            .iter()
            .enumerate()
            .map(|(slot, meteorite)| MarkerIndex {
                center: [meteorite.position.x, meteorite.position.y],
                radius: meteorite.radius,
                slot,
            })
            .collect();
        self.index = RTree::bulk_load(entries);
        self.meteorites = encoded;
        self.respawn = true;
    }

    /// Topmost marker containing `point`, if any. Later draw slots win, the
    /// same way the last drawn circle sits on top.
    pub fn hit(&self, point: Vec2) -> Option<usize> {
        self.index
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
            .filter(|entry| entry.contains(point))
            .map(|entry| entry.slot)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(x: f32, y: f32, radius: f32, slot: usize) -> MarkerIndex {
        MarkerIndex {
            center: [x, y],
            radius,
            slot,
        }
    }

    #[test]
    fn hit_prefers_topmost_slot() {
        let mut bundle = MeteoriteBundle::default();
        bundle.index = RTree::bulk_load(vec![
            marker(0.0, 0.0, 50.0, 0),
            marker(0.0, 0.0, 2.0, 1),
        ]);

        // inside both circles, the later slot wins
        assert_eq!(bundle.hit(Vec2::new(1.0, 1.0)), Some(1));
        // inside the big circle only
        assert_eq!(bundle.hit(Vec2::new(30.0, 0.0)), Some(0));
        // outside both
        assert_eq!(bundle.hit(Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    fn contains_uses_the_circle_not_the_envelope() {
        let entry = marker(0.0, 0.0, 10.0, 0);
        // corner of the bounding box but outside the circle
        assert!(!entry.contains(Vec2::new(9.0, 9.0)));
        assert!(entry.contains(Vec2::new(9.0, 0.0)));
    }
}
