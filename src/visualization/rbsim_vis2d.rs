//! Bevy 2D viewer
//!
//! Plays the three external roles around the world:
//! - clock: `Time::delta` supplies each tick's `dt`
//! - input: the left mouse button and cursor become an `InputSample`
//! - renderer: every frame the object snapshot is mirrored into mesh entities

use std::collections::{HashMap, HashSet};

use bevy::math::primitives::{Circle, Rectangle};
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;

use crate::math::Vec2f;
use crate::simulation::input::InputSample;
use crate::simulation::shape::Shape;
use crate::simulation::world::{ObjectId, World};

/// Window edge length in logical pixels
const WINDOW_SIZE: f32 = 1000.0;

#[derive(Resource)]
struct Simulation {
    world: World,
}

/// Mesh entity spawned for each object id
#[derive(Resource, Default)]
struct ObjectEntities(HashMap<ObjectId, Entity>);

/// Marks mesh entities mirroring a world object
#[derive(Component)]
struct ObjectTag;

pub fn run_2d(world: World) {
    App::new()
        .insert_resource(Simulation { world })
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<ObjectEntities>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "rbsim".into(),
                resolution: (WINDOW_SIZE, WINDOW_SIZE).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_arena_system)
        .add_systems(Update, (physics_step_system, sync_objects_system).chain())
        .run();
}

fn setup_arena_system(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    info!("rbsim viewer starting with {} objects", sim.world.len());

    commands.spawn(Camera2dBundle::default());

    // Arena disc, drawn behind everything
    let radius = sim.world.parameters().arena.radius as f32;
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(meshes.add(Circle::new(radius))),
        material: materials.add(ColorMaterial::from(Color::WHITE)),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..default()
    });
}

fn physics_step_system(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
) {
    let center = sim.world.parameters().arena.center;
    let cursor = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position().map(|c| window_to_world(c, window, center)));

    let input = match cursor {
        Some(at) if buttons.pressed(MouseButton::Left) => InputSample::pressed_at(at),
        _ => InputSample::released(),
    };

    match sim.world.tick(time.delta_seconds_f64(), input) {
        Ok(report) => {
            if let Some(id) = report.spawned {
                debug!("spawned {id} from mouse input");
            }
        }
        Err(err) => error!("tick failed: {err}"),
    }
}

fn sync_objects_system(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut entities: ResMut<ObjectEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut transforms: Query<&mut Transform, With<ObjectTag>>,
) {
    let center = sim.world.parameters().arena.center;
    let mut live = HashSet::new();

    for object in sim.world.list_objects() {
        live.insert(object.id);
        let translation = world_to_screen(object.position, center).extend(1.0);

        if let Some(&entity) = entities.0.get(&object.id) {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation = translation;
            }
            continue;
        }

        let (mesh, color) = match object.shape {
            Shape::Circle { radius } => (
                Mesh2dHandle(meshes.add(Circle::new(radius as f32))),
                Color::srgb(0.9, 0.2, 0.2),
            ),
            Shape::Rectangle { width, height } => (
                Mesh2dHandle(meshes.add(Rectangle::new(width as f32, height as f32))),
                Color::srgb(0.2, 0.3, 0.9),
            ),
        };
        let entity = commands
            .spawn((
                MaterialMesh2dBundle {
                    mesh,
                    material: materials.add(ColorMaterial::from(color)),
                    transform: Transform::from_translation(translation),
                    ..default()
                },
                ObjectTag,
            ))
            .id();
        entities.0.insert(object.id, entity);
    }

    // Objects removed from the world lose their entity
    entities.0.retain(|id, entity| {
        let keep = live.contains(id);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });
}

/// Window cursor (top-left origin, y down) to world coordinates, with the
/// window centre mapped onto the arena centre
fn window_to_world(cursor: Vec2, window: &Window, center: Vec2f) -> Vec2f {
    Vec2f::new(
        center.x + f64::from(cursor.x - 0.5 * window.width()),
        center.y + f64::from(cursor.y - 0.5 * window.height()),
    )
}

/// World coordinates (y down) to Bevy's centred, y-up screen space
fn world_to_screen(p: Vec2f, center: Vec2f) -> Vec2 {
    Vec2::new((p.x - center.x) as f32, (center.y - p.y) as f32)
}
