use bevy::{
    prelude::*,
    winit::{UpdateMode, WinitSettings},
};

use bevy_egui::EguiPlugin;
use bevy_prototype_lyon::plugin::ShapePlugin;
use camera::CameraSystemPlugin;
use debug::DebugPlugin;
use interaction::InteractionSystemPlugin;
use loader::DatasetLoaderPlugin;
use map::MapRenderPlugin;
use ui::HudPlugin;

pub mod camera;
pub mod debug;
pub mod encoding;
pub mod interaction;
pub mod loader;
pub mod map;
pub mod projection;
pub mod types;
pub mod ui;

/// Logical size of the drawing surface.
pub const MAP_WIDTH: f32 = 960.0;
pub const MAP_HEIGHT: f32 = 500.0;

/// Dataset sources; local paths and http(s) URLs both work.
pub const WORLD_DATA: &str = "assets/world-50m.v1.json";
pub const METEORITE_DATA: &str = "assets/meteorites.json";

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Meteorite Landings".to_string(),
                resolution: (MAP_WIDTH, MAP_HEIGHT).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(DebugPlugin)
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .insert_resource(EguiBlockInputState::default())
        .add_plugins((CameraSystemPlugin, InteractionSystemPlugin, ShapePlugin))
        .insert_resource(WinitSettings {
            unfocused_mode: UpdateMode::Reactive {
                wait: std::time::Duration::from_secs(1),
                react_to_device_events: true,
                react_to_user_events: true,
                react_to_window_events: true,
            },
            ..Default::default()
        })
        // Ocean shows through wherever no country is drawn.
        .insert_resource(ClearColor(Color::from(Srgba {
            red: 0.149,
            green: 0.427,
            blue: 0.596,
            alpha: 1.0,
        })))
        .add_plugins(MapRenderPlugin)
        .add_plugins(DatasetLoaderPlugin)
        .add_plugins(HudPlugin)
        .add_systems(Update, absorb_egui_inputs)
        .run();
}

#[derive(Resource, Default)]
pub struct EguiBlockInputState {
    pub block_input: bool,
}
fn absorb_egui_inputs(
    mut contexts: bevy_egui::EguiContexts,
    mut state: ResMut<EguiBlockInputState>,
) {
    let ctx = contexts.ctx_mut();
    state.block_input = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
}
