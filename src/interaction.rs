use bevy::{prelude::*, window::PrimaryWindow};
use bevy_prototype_lyon::prelude::{Fill, Shape};

use crate::EguiBlockInputState;
use crate::loader::LoadStatus;
use crate::map::MeteoriteMarker;
use crate::types::MeteoriteBundle;

/// Fired when the pointer enters a marker. `pointer` is the cursor position
/// in window coordinates, for tooltip placement.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MarkerHovered {
    pub slot: usize,
    pub pointer: Vec2,
}

/// Fired when the pointer leaves the marker it was over.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MarkerLeft {
    pub slot: usize,
}

#[derive(Resource, Default)]
pub struct HoverState {
    pub slot: Option<usize>,
    pub pointer: Vec2,
}

pub struct InteractionSystemPlugin;

impl Plugin for InteractionSystemPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HoverState::default())
            .add_event::<MarkerHovered>()
            .add_event::<MarkerLeft>()
            .add_systems(Update, (hover_markers, recolor_markers).chain());
    }
}

/// Converts the cursor to drawing coordinates, hit-tests the marker index
/// and publishes hover transitions.
fn hover_markers(
    q_windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    meteorite_bundle: Res<MeteoriteBundle>,
    status: Res<LoadStatus>,
    mut hover: ResMut<HoverState>,
    mut hovered: EventWriter<MarkerHovered>,
    mut left: EventWriter<MarkerLeft>,
    egui_state: Res<EguiBlockInputState>,
) {
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(window) = q_windows.single() else {
        return;
    };

    let mut slot = None;
    if !egui_state.block_input && status.failure().is_none() {
        if let Some(position) = window.cursor_position() {
            hover.pointer = position;
            if let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, position) {
                slot = meteorite_bundle.hit(world_pos);
            }
        }
    }

    if slot != hover.slot {
        if let Some(previous) = hover.slot {
            left.write(MarkerLeft { slot: previous });
        }
        if let Some(current) = slot {
            hovered.write(MarkerHovered {
                slot: current,
                pointer: hover.pointer,
            });
        }
        hover.slot = slot;
    }
}

/// Hovered markers turn black; on leave the previously assigned encoded
/// color is restored.
fn recolor_markers(
    mut hovered: EventReader<MarkerHovered>,
    mut left: EventReader<MarkerLeft>,
    mut markers: Query<(&MeteoriteMarker, &mut Shape)>,
    meteorite_bundle: Res<MeteoriteBundle>,
) {
    for event in left.read() {
        if let Some(meteorite) = meteorite_bundle.meteorites.get(event.slot) {
            for (marker, mut shape) in markers.iter_mut() {
                if marker.slot == event.slot {
                    shape.fill = Some(Fill::color(meteorite.color.with_alpha(0.5)));
                }
            }
        }
    }
    for event in hovered.read() {
        for (marker, mut shape) in markers.iter_mut() {
            if marker.slot == event.slot {
                shape.fill = Some(Fill::color(Color::BLACK));
            }
        }
    }
}
