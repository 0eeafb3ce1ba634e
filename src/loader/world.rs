use std::error::Error;

use geojson::FeatureCollection;
use topojson::{TopoJson, to_geojson};

use crate::types::WorldFeature;

/// Parses the world topology and extracts the country outlines stored
/// under `objects.countries`.
pub fn parse_world_features(raw: &str) -> Result<Vec<WorldFeature>, Box<dyn Error>> {
    let collection = match raw.parse::<TopoJson>()? {
        TopoJson::Topology(topology) => to_geojson(&topology, "countries")?,
        _ => return Err("world dataset is not a topology".into()),
    };
    Ok(outlines(collection))
}

fn outlines(collection: FeatureCollection) -> Vec<WorldFeature> {
    let mut features = Vec::new();
    for feature in collection.features {
        let id = feature
            .id
            .as_ref()
            .map_or_else(|| String::from("unknown"), |id| format!("{id:?}"));
        let Some(geometry) = feature.geometry else {
            continue;
        };
        match geometry.value {
            geojson::Value::Polygon(rings) => push_outline(&mut features, &id, rings),
            geojson::Value::MultiPolygon(polygons) => {
                for rings in polygons {
                    push_outline(&mut features, &id, rings);
                }
            }
            _ => continue,
        }
    }
    features
}

fn push_outline(features: &mut Vec<WorldFeature>, id: &str, rings: Vec<Vec<Vec<f64>>>) {
    let Some(outer) = rings.into_iter().next() else {
        return;
    };
    let exterior = geo::LineString(
        outer
            .into_iter()
            .map(|p| geo::Coord { x: p[0], y: p[1] })
            .collect(),
    );
    features.push(WorldFeature {
        id: id.to_string(),
        geometry: geo::Polygon::new(exterior, vec![]),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "Topology",
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "arcs": [[0]] }
                ]
            }
        },
        "arcs": [
            [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]
        ]
    }"#;

    #[test]
    fn extracts_country_outlines() {
        let features = parse_world_features(SAMPLE).unwrap();
        assert_eq!(features.len(), 1);
        let exterior = features[0].geometry.exterior();
        assert_eq!(exterior.coords().count(), 5);
        let first = exterior.coords().next().unwrap();
        assert_eq!((first.x, first.y), (0.0, 0.0));
    }

    #[test]
    fn rejects_non_topology_input() {
        let geojson = r#"{ "type": "FeatureCollection", "features": [] }"#;
        assert!(parse_world_features(geojson).is_err());
    }
}
