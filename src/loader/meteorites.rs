use std::error::Error;

use bevy::prelude::*;
use chrono::NaiveDateTime;
use geojson::GeoJson;
use serde::{Deserialize, Serialize};

use crate::types::MeteoriteRecord;

/// `properties` of one feature in the meteorite landings dataset. The
/// upstream data stores its numbers as strings, so the numeric fields stay
/// loose here and are coerced below.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MeteoriteProperties {
    pub name: Option<String>,
    pub mass: Option<serde_json::Value>,
    pub year: Option<String>,
    pub recclass: Option<String>,
    pub reclat: Option<serde_json::Value>,
    pub reclong: Option<serde_json::Value>,
}

/// Parses the meteorite feature collection. Records without a usable name,
/// mass or position are skipped; an unparseable year is kept as `None`.
pub fn parse_meteorite_records(raw: &str) -> Result<Vec<MeteoriteRecord>, Box<dyn Error>> {
    let GeoJson::FeatureCollection(collection) = raw.parse::<GeoJson>()? else {
        return Err("meteorite dataset is not a feature collection".into());
    };

    let mut records = Vec::new();
    for feature in collection.features {
        let Some(properties) = feature.properties else {
            continue;
        };
        let Ok(properties) =
            serde_json::from_value::<MeteoriteProperties>(serde_json::Value::Object(properties))
        else {
            warn!("skipping meteorite feature with malformed properties");
            continue;
        };
        match record_from(properties) {
            Some(record) => records.push(record),
            None => warn!("skipping meteorite record without usable name, mass or position"),
        }
    }
    Ok(records)
}

fn record_from(properties: MeteoriteProperties) -> Option<MeteoriteRecord> {
    let name = properties.name?;
    let mass = numeric(properties.mass.as_ref())?;
    let reclat = numeric(properties.reclat.as_ref())?;
    let reclong = numeric(properties.reclong.as_ref())?;
    if mass < 0.0 || !(-90.0..=90.0).contains(&reclat) || !(-180.0..=180.0).contains(&reclong) {
        return None;
    }
    Some(MeteoriteRecord {
        name,
        mass,
        year: properties.year.as_deref().and_then(parse_year),
        recclass: properties.recclass.unwrap_or_default(),
        reclat,
        reclong,
    })
}

/// Accepts JSON numbers and numeric strings.
fn numeric(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Timestamps in the dataset look like `1880-01-01T00:00:00.000`.
pub fn parse_year(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
