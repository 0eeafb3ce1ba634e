use bevy::prelude::*;
use bevy_egui::{
    EguiContexts, EguiPreUpdateSet,
    egui::{self, Color32, RichText},
};
use chrono::Datelike;

use crate::interaction::HoverState;
use crate::loader::LoadStatus;
use crate::types::{EncodedMeteorite, MeteoriteBundle, MeteoriteRecord};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (tooltip_system, error_banner_system).after(EguiPreUpdateSet::InitContexts),
        );
    }
}

fn tooltip_system(
    mut contexts: EguiContexts,
    hover: Res<HoverState>,
    meteorite_bundle: Res<MeteoriteBundle>,
    status: Res<LoadStatus>,
) {
    if status.failure().is_some() {
        return;
    }
    let Some(slot) = hover.slot else {
        return;
    };
    let Some(meteorite) = meteorite_bundle.meteorites.get(slot) else {
        return;
    };
    let ctx = contexts.ctx_mut();

    let position = egui::pos2(hover.pointer.x + 30.0, hover.pointer.y / 1.5);
    egui::Area::new("tooltip".into())
        .fixed_pos(position)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_rgba_premultiplied(30, 30, 30, 230))
                .corner_radius(6.0)
                .inner_margin(8)
                .show(ui, |ui| {
                    for (label, value) in tooltip_rows(meteorite) {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(label)
                                    .strong()
                                    .color(Color32::from_rgb(221, 221, 221)),
                            );
                            ui.label(RichText::new(value).color(Color32::from_rgb(221, 221, 221)));
                        });
                    }
                });
        });
}

fn error_banner_system(mut contexts: EguiContexts, status: Res<LoadStatus>) {
    let Some(message) = status.failure() else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let screen_rect = ctx.screen_rect();
    let position = egui::pos2(screen_rect.center().x - 160.0, screen_rect.center().y - 30.0);

    egui::Area::new("load-error".into())
        .fixed_pos(position)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_rgb(120, 30, 30))
                .corner_radius(10.0)
                .inner_margin(12)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new("Sorry, the map data could not be loaded.")
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.label(RichText::new(message).color(Color32::from_rgb(240, 220, 220)));
                });
        });
}

/// Tooltip rows in display order.
fn tooltip_rows(meteorite: &EncodedMeteorite) -> Vec<(&'static str, String)> {
    let record = &meteorite.record;
    vec![
        ("Name:", record.name.clone()),
        ("Mass:", format!("{} kg", format_mass_kg(record.mass))),
        ("Year:", display_year(record)),
        ("Classification:", record.recclass.clone()),
        ("Latitude:", record.reclat.to_string()),
        ("Longitude:", record.reclong.to_string()),
    ]
}

/// Mass in kilograms: no decimals above 100000 g, two otherwise, thousands
/// separated either way.
pub fn format_mass_kg(mass_g: f64) -> String {
    let kg = mass_g / 1000.0;
    if mass_g > 100_000.0 {
        thousands(&format!("{kg:.0}"))
    } else {
        thousands(&format!("{kg:.2}"))
    }
}

fn display_year(record: &MeteoriteRecord) -> String {
    record
        .year
        .map_or_else(|| String::from("unknown"), |year| year.year().to_string())
}

/// Inserts comma separators into the integer part of a formatted number.
fn thousands(number: &str) -> String {
    let (integer, rest) = match number.find('.') {
        Some(split) => number.split_at(split),
        None => (number, ""),
    };
    let mut grouped = String::new();
    let digits = integer.len();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped + rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_year;

    #[test]
    fn big_masses_round_to_whole_kilograms() {
        assert_eq!(format_mass_kg(150_000_000.0), "150,000");
        assert_eq!(format_mass_kg(100_001.0), "100");
    }

    #[test]
    fn small_masses_keep_two_decimals() {
        assert_eq!(format_mass_kg(500.0), "0.50");
        assert_eq!(format_mass_kg(100_000.0), "100.00");
        assert_eq!(format_mass_kg(21.0), "0.02");
    }

    #[test]
    fn separators_group_by_three() {
        assert_eq!(thousands("1234567"), "1,234,567");
        assert_eq!(thousands("1234.56"), "1,234.56");
        assert_eq!(thousands("999"), "999");
        assert_eq!(thousands("0.50"), "0.50");
    }

    #[test]
    fn year_shows_the_calendar_year_or_unknown() {
        let mut record = MeteoriteRecord {
            name: "Aachen".to_string(),
            mass: 21.0,
            year: parse_year("1880-01-01T00:00:00.000"),
            recclass: "L5".to_string(),
            reclat: 50.775,
            reclong: 6.08333,
        };
        assert_eq!(display_year(&record), "1880");
        record.year = None;
        assert_eq!(display_year(&record), "unknown");
    }
}
