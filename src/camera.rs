use bevy::prelude::*;
use bevy_pancam::{DirectionKeys, PanCam, PanCamPlugin};

use crate::EguiBlockInputState;

pub struct CameraSystemPlugin;

impl Plugin for CameraSystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .add_systems(Startup, setup_camera)
            .add_systems(Update, handle_pancam);
    }
}

/// One 2D camera over the whole drawing surface. The pancam transform is
/// the shared pan/zoom, applied to the country and marker layers alike in
/// the same render step.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera { ..default() },
        Transform {
            translation: Vec3::new(0.0, 0.0, 1.0),
            ..Default::default()
        },
        PanCam {
            grab_buttons: vec![MouseButton::Left, MouseButton::Middle],
            move_keys: DirectionKeys {
                up: vec![KeyCode::ArrowUp],
                down: vec![KeyCode::ArrowDown],
                left: vec![KeyCode::ArrowLeft],
                right: vec![KeyCode::ArrowRight],
            },
            speed: 400.,
            enabled: true,
            zoom_to_cursor: true,
            min_scale: 0.5,
            max_scale: 18.0,
            min_x: f32::NEG_INFINITY,
            max_x: f32::INFINITY,
            min_y: f32::NEG_INFINITY,
            max_y: f32::INFINITY,
        },
    ));
}

fn handle_pancam(mut query: Query<&mut PanCam>, state: Res<EguiBlockInputState>) {
    if state.is_changed() {
        for mut pancam in &mut query {
            pancam.enabled = !state.block_input;
        }
    }
}
