use bevy::prelude::*;

/// Equal-angle cylindrical (plate carrée) projection onto the drawing
/// surface, centered on (0, 0) in drawing space.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct MapProjection {
    pub width: f32,
    pub height: f32,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            width: crate::MAP_WIDTH,
            height: crate::MAP_HEIGHT,
        }
    }
}

impl MapProjection {
    /// Maps (longitude, latitude) in degrees to drawing coordinates.
    /// Expects longitude in [-180, 180] and latitude in [-90, 90].
    pub fn project(&self, long: f64, lat: f64) -> Vec2 {
        Vec2::new(
            (long / 360.0) as f32 * self.width,
            (lat / 180.0) as f32 * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_origin() {
        let projection = MapProjection::default();
        assert_eq!(projection.project(0.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn corners_span_the_surface() {
        let projection = MapProjection::default();
        assert_eq!(projection.project(180.0, 90.0), Vec2::new(480.0, 250.0));
        assert_eq!(projection.project(-180.0, -90.0), Vec2::new(-480.0, -250.0));
    }

    #[test]
    fn monotone_in_both_axes() {
        let projection = MapProjection::default();
        let mut previous_x = f32::NEG_INFINITY;
        let mut previous_y = f32::NEG_INFINITY;
        for step in -18..=18 {
            let point = projection.project(step as f64 * 10.0, step as f64 * 5.0);
            assert!(point.x > previous_x);
            assert!(point.y > previous_y);
            previous_x = point.x;
            previous_y = point.y;
        }
    }
}
