use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_tasks::futures_lite::future;
use crossbeam_channel::{Receiver, bounded};

use crate::encoding::encode;
use crate::projection::MapProjection;
use crate::types::{MeteoriteBundle, MeteoriteRecord, WorldBundle, WorldFeature};
use crate::{METEORITE_DATA, WORLD_DATA};

use super::{fetch_dataset, parse_meteorite_records, parse_world_features};

/// Load state of one dataset.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

/// The two loads are independent; either can fail without touching the
/// other's state, but one failure is enough to suppress the visualization.
#[derive(Resource, Default)]
pub struct LoadStatus {
    pub world: LoadState,
    pub meteorites: LoadState,
}

impl LoadStatus {
    /// First failure message, if either load failed.
    pub fn failure(&self) -> Option<&str> {
        for state in [&self.world, &self.meteorites] {
            if let LoadState::Failed(message) = state {
                return Some(message);
            }
        }
        None
    }
}

#[derive(Resource, Deref)]
pub struct WorldReceiver(Receiver<Result<Vec<WorldFeature>, String>>);

#[derive(Resource, Deref)]
pub struct MeteoriteReceiver(Receiver<Result<Vec<MeteoriteRecord>, String>>);

#[derive(Component)]
struct LoadTask(Task<()>);

pub struct DatasetLoaderPlugin;

impl Plugin for DatasetLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LoadStatus::default())
            .add_systems(Startup, start_loads)
            .add_systems(FixedUpdate, (read_world_receiver, read_meteorite_receiver))
            .add_systems(Update, cleanup_tasks);
    }
}

/// Kicks off both dataset loads on the compute pool. Neither blocks the
/// other and no ordering between them is assumed.
fn start_loads(mut commands: Commands) {
    let task_pool = AsyncComputeTaskPool::get();

    let (tx, rx) = bounded(1);
    let task = task_pool.spawn(async move {
        let result = fetch_dataset(WORLD_DATA)
            .and_then(|raw| parse_world_features(&raw))
            .map_err(|e| e.to_string());
        let _ = tx.send(result);
    });
    commands.spawn(LoadTask(task));
    commands.insert_resource(WorldReceiver(rx));

    let (tx, rx) = bounded(1);
    let task = task_pool.spawn(async move {
        let result = fetch_dataset(METEORITE_DATA)
            .and_then(|raw| parse_meteorite_records(&raw))
            .map_err(|e| e.to_string());
        let _ = tx.send(result);
    });
    commands.spawn(LoadTask(task));
    commands.insert_resource(MeteoriteReceiver(rx));
}

fn read_world_receiver(
    receiver: Option<Res<WorldReceiver>>,
    mut world_bundle: ResMut<WorldBundle>,
    mut status: ResMut<LoadStatus>,
) {
    if let Some(receiver) = receiver {
        match receiver.try_recv() {
            Ok(Ok(features)) => {
                info!("loaded {} country outlines", features.len());
                world_bundle.features = features;
                world_bundle.respawn = true;
                status.world = LoadState::Loaded;
            }
            Ok(Err(message)) => {
                error!("world dataset failed to load: {message}");
                status.world = LoadState::Failed(message);
            }
            Err(_) => {}
        }
    }
}

fn read_meteorite_receiver(
    receiver: Option<Res<MeteoriteReceiver>>,
    mut meteorite_bundle: ResMut<MeteoriteBundle>,
    mut status: ResMut<LoadStatus>,
    projection: Res<MapProjection>,
) {
    if let Some(receiver) = receiver {
        match receiver.try_recv() {
            Ok(Ok(records)) => {
                info!("loaded {} meteorite records", records.len());
                meteorite_bundle.set(encode(records, &projection));
                status.meteorites = LoadState::Loaded;
            }
            Ok(Err(message)) => {
                error!("meteorite dataset failed to load: {message}");
                status.meteorites = LoadState::Failed(message);
            }
            Err(_) => {}
        }
    }
}

fn cleanup_tasks(mut commands: Commands, mut tasks: Query<(Entity, &mut LoadTask)>) {
    for (entity, mut task) in tasks.iter_mut() {
        if future::block_on(future::poll_once(&mut task.0)).is_some() {
            commands.entity(entity).despawn();
        }
    }
}
