use std::cmp::Ordering;

use bevy::prelude::*;

use crate::projection::MapProjection;
use crate::types::{EncodedMeteorite, MeteoriteRecord};

/// Base unit of the mass-to-radius bins, in grams.
pub const MASS_BIN_UNIT: f64 = 200_000.0;
/// Hue step between two chronologically adjacent records, in degrees.
pub const HUE_STEP: f64 = 0.35;

/// Runs the full encoding pipeline: chronological sort, hue assignment,
/// mass-descending draw order, radius binning and projection. The returned
/// order is the draw order, biggest markers first so small ones stay
/// visible on top.
pub fn encode(
    mut records: Vec<MeteoriteRecord>,
    projection: &MapProjection,
) -> Vec<EncodedMeteorite> {
    records.sort_by(chronological);

    let hues = assign_hues(records.len());
    let mut encoded: Vec<EncodedMeteorite> = records
        .into_iter()
        .zip(hues)
        .map(|(record, hue)| EncodedMeteorite {
            color: Color::hsl(hue, 1.0, 0.5),
            hue,
            radius: radius_for_mass(record.mass),
            position: projection.project(record.reclong, record.reclat),
            record,
        })
        .collect();

    // Stable, so equal masses keep their chronological order.
    encoded.sort_by(|a, b| b.record.mass.total_cmp(&a.record.mass));
    encoded
}

/// Ascending by year. Records without a parseable year sort after every
/// dated record and keep their input order among themselves.
pub fn chronological(a: &MeteoriteRecord, b: &MeteoriteRecord) -> Ordering {
    match (a.year, b.year) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One hue per record, advancing by [`HUE_STEP`] and wrapping back to the
/// step once the accumulator passes 360. Stored values are rounded to two
/// decimals; the accumulator itself is not.
pub fn assign_hues(count: usize) -> Vec<f32> {
    let mut hues = Vec::with_capacity(count);
    let mut hue = 0.0;
    for _ in 0..count {
        hue += HUE_STEP;
        if hue > 360.0 {
            hue = HUE_STEP;
        }
        hues.push(((hue * 100.0).round() / 100.0) as f32);
    }
    hues
}

/// Marker radius from mass in grams. Total over non-negative masses and
/// monotone in mass.
pub fn radius_for_mass(mass: f64) -> f32 {
    if mass <= MASS_BIN_UNIT {
        2.0
    } else if mass <= MASS_BIN_UNIT * 2.0 {
        10.0
    } else if mass <= MASS_BIN_UNIT * 3.0 {
        20.0
    } else if mass <= MASS_BIN_UNIT * 20.0 {
        30.0
    } else if mass <= MASS_BIN_UNIT * 100.0 {
        40.0
    } else {
        50.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(name: &str, mass: f64, year: Option<i32>) -> MeteoriteRecord {
        MeteoriteRecord {
            name: name.to_string(),
            mass,
            year: year.map(|y| {
                NaiveDate::from_ymd_opt(y, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            }),
            recclass: "L5".to_string(),
            reclat: 10.0,
            reclong: 20.0,
        }
    }

    #[test]
    fn radius_bins_match_thresholds() {
        let masses = [
            50.0,
            200_001.0,
            400_001.0,
            4_000_001.0,
            20_000_001.0,
            20_000_000_001.0,
        ];
        let radii: Vec<f32> = masses.iter().map(|&m| radius_for_mass(m)).collect();
        assert_eq!(radii, vec![2.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn radius_is_monotone_and_bounded() {
        let allowed = [2.0, 10.0, 20.0, 30.0, 40.0, 50.0];
        let mut previous = 0.0;
        for step in 0..20_000 {
            let radius = radius_for_mass(step as f64 * 1_500.0);
            assert!(allowed.contains(&radius));
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn radius_at_bin_edges() {
        assert_eq!(radius_for_mass(0.0), 2.0);
        assert_eq!(radius_for_mass(MASS_BIN_UNIT), 2.0);
        assert_eq!(radius_for_mass(MASS_BIN_UNIT + 1.0), 10.0);
        assert_eq!(radius_for_mass(MASS_BIN_UNIT * 100.0), 40.0);
        assert_eq!(radius_for_mass(MASS_BIN_UNIT * 100.0 + 1.0), 50.0);
    }

    #[test]
    fn hues_advance_by_step() {
        let hues = assign_hues(3);
        for (hue, expected) in hues.iter().zip([0.35f32, 0.7, 1.05]) {
            assert!((hue - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn hues_wrap_past_360() {
        let hues = assign_hues(1100);
        for hue in &hues {
            assert!(*hue > 0.0 && *hue <= 360.0);
        }
        // 0.35 * 1029 passes 360, so slot 1028 restarts the cycle.
        assert!((hues[1027] - 359.8).abs() < 1e-3);
        assert!((hues[1028] - 0.35).abs() < 1e-4);
    }

    #[test]
    fn hues_follow_chronological_order() {
        let records = vec![
            record("a", 1.0, Some(2001)),
            record("b", 1.0, Some(1990)),
            record("c", 1.0, Some(2010)),
        ];
        // equal masses, so the stable draw-order sort keeps the
        // chronological order and the hues line up with it
        let encoded = encode(records, &MapProjection::default());
        let names: Vec<&str> = encoded.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        for (meteorite, expected) in encoded.iter().zip([0.35f32, 0.7, 1.05]) {
            assert!((meteorite.hue - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn draw_order_is_mass_descending_and_stable() {
        let records = vec![
            record("small", 10.0, Some(1990)),
            record("big", 1_000_000.0, Some(1991)),
            record("tie-a", 500.0, Some(1992)),
            record("tie-b", 500.0, Some(1993)),
        ];
        let encoded = encode(records, &MapProjection::default());
        let names: Vec<&str> = encoded.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, vec!["big", "tie-a", "tie-b", "small"]);
        assert_eq!(encoded.len(), 4);

        // applying the draw-order sort again changes nothing
        let mut again = encoded.clone();
        again.sort_by(|a, b| b.record.mass.total_cmp(&a.record.mass));
        let names_again: Vec<&str> = again.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, names_again);
    }

    #[test]
    fn missing_years_sort_last() {
        let records = vec![
            record("undated-1", 1.0, None),
            record("dated", 1.0, Some(2000)),
            record("undated-2", 1.0, None),
        ];
        let encoded = encode(records, &MapProjection::default());
        let names: Vec<&str> = encoded.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, vec!["dated", "undated-1", "undated-2"]);
    }

    #[test]
    fn positions_come_from_the_projection() {
        let encoded = encode(vec![record("a", 1.0, Some(2000))], &MapProjection::default());
        let expected = MapProjection::default().project(20.0, 10.0);
        assert_eq!(encoded[0].position, expected);
    }
}
