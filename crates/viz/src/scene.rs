//! 3D scene rendering: persistent agent/food nodes, rebuilt wall nodes.
//!
//! The renderer owns an abstract node list; a mirror system reconciles it
//! against spawned meshes. Agent and food keep their node identity for the
//! whole session and are only repositioned. Walls are discarded and
//! recreated on every render: wall cardinality can change between
//! snapshots, and repositioning a fixed-count set is unsafe when it does.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use sim_protocol::{GridPos, Snapshot};

use crate::config::VizConfig;
use crate::render::RenderAdapter;
use crate::view_state::{StateUpdatedEvent, ViewState};

/// Agent sphere center height, in cell sizes.
const AGENT_HEIGHT: f32 = 0.5;
/// Food cube center height, in cell sizes.
const FOOD_HEIGHT: f32 = 0.2;
/// Wall cube center height, in cell sizes.
const WALL_HEIGHT: f32 = 0.5;

/// Plugin for the 3D scene presentation.
pub struct SceneRenderPlugin;

impl Plugin for SceneRenderPlugin {
    fn build(&self, app: &mut App) {
        let config = app.world().resource::<VizConfig>().clone();

        app.insert_resource(SceneRenderer::new(config.grid.cell_size))
            .init_resource::<SceneNodeEntities>()
            .insert_resource(ClearColor(Color::srgb(0.87, 0.87, 0.87)))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 300.0,
            })
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                sync_scene.run_if(on_event::<StateUpdatedEvent>()),
            );
    }
}

/// Stable identity of one drawable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// What a node depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Agent,
    Food,
    Wall,
}

/// One drawable node: identity, kind, and scene-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub translation: Vec3,
}

/// Scene-space center of cell `(x, y)` at the given height.
pub fn cell_center(pos: GridPos, cell_size: f32, height: f32) -> Vec3 {
    Vec3::new(
        pos.x as f32 * cell_size + cell_size / 2.0,
        height,
        pos.y as f32 * cell_size + cell_size / 2.0,
    )
}

/// Drawable node list for the 3D presentation.
#[derive(Resource)]
pub struct SceneRenderer {
    cell_size: f32,
    next_id: u64,
    agent: SceneNode,
    food: SceneNode,
    walls: Vec<SceneNode>,
}

impl SceneRenderer {
    /// Creates a renderer with its two session-long nodes.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            next_id: 2,
            agent: SceneNode {
                id: NodeId(1),
                kind: NodeKind::Agent,
                translation: Vec3::ZERO,
            },
            food: SceneNode {
                id: NodeId(2),
                kind: NodeKind::Food,
                translation: Vec3::ZERO,
            },
            walls: Vec::new(),
        }
    }

    /// The agent node.
    pub fn agent(&self) -> &SceneNode {
        &self.agent
    }

    /// The food node.
    pub fn food(&self) -> &SceneNode {
        &self.food
    }

    /// The current wall nodes.
    pub fn walls(&self) -> &[SceneNode] {
        &self.walls
    }

    /// All live nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        [&self.agent, &self.food].into_iter().chain(self.walls.iter())
    }

    fn allocate(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }
}

impl RenderAdapter for SceneRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        let cell = self.cell_size;

        self.agent.translation = cell_center(snapshot.agent_position, cell, AGENT_HEIGHT * cell);
        self.food.translation = cell_center(snapshot.food_position, cell, FOOD_HEIGHT * cell);

        self.walls.clear();
        for wall in &snapshot.walls {
            let id = self.allocate();
            self.walls.push(SceneNode {
                id,
                kind: NodeKind::Wall,
                translation: cell_center(*wall, cell, WALL_HEIGHT * cell),
            });
        }
    }
}

/// Resource mapping node ids to their spawned entities.
#[derive(Resource, Default)]
pub struct SceneNodeEntities {
    map: HashMap<NodeId, Entity>,
}

/// Mesh and material handles shared by all spawned nodes.
#[derive(Resource)]
struct SceneAssets {
    agent_mesh: Handle<Mesh>,
    food_mesh: Handle<Mesh>,
    wall_mesh: Handle<Mesh>,
    agent_material: Handle<StandardMaterial>,
    food_material: Handle<StandardMaterial>,
    wall_material: Handle<StandardMaterial>,
}

/// System spawning the static scene dressing and shared assets.
fn setup_scene(
    mut commands: Commands,
    config: Res<VizConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cell = config.grid.cell_size;
    let board = config.grid.grid_size as f32 * cell;

    // Ground plane under the whole board.
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(board, board)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.53, 0.53, 0.53),
            ..default()
        }),
        transform: Transform::from_xyz(board / 2.0, 0.0, board / 2.0),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 10_000.0,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.insert_resource(SceneAssets {
        agent_mesh: meshes.add(Sphere::new(0.4 * cell)),
        food_mesh: meshes.add(Cuboid::new(0.4 * cell, 0.4 * cell, 0.4 * cell)),
        wall_mesh: meshes.add(Cuboid::new(cell, cell, cell)),
        agent_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 0.0, 1.0),
            ..default()
        }),
        food_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 1.0, 0.0),
            ..default()
        }),
        wall_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.33, 0.33, 0.33),
            ..default()
        }),
    });

    tracing::info!("scene ready ({}x{} board)", config.grid.grid_size, config.grid.grid_size);
}

/// System reconciling spawned meshes with the renderer's node list.
fn sync_scene(
    mut commands: Commands,
    view: Res<ViewState>,
    assets: Res<SceneAssets>,
    mut renderer: ResMut<SceneRenderer>,
    mut entities: ResMut<SceneNodeEntities>,
    mut transforms: Query<&mut Transform>,
) {
    let Some(snapshot) = view.current() else {
        return;
    };
    renderer.render(snapshot);

    let live: HashSet<NodeId> = renderer.nodes().map(|node| node.id).collect();

    // Drop drawables whose node vanished (rebuilt walls).
    entities.map.retain(|id, entity| {
        if live.contains(id) {
            true
        } else {
            commands.entity(*entity).despawn();
            false
        }
    });

    // Spawn new nodes, reposition survivors.
    for node in renderer.nodes() {
        match entities.map.get(&node.id) {
            Some(&entity) => {
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    transform.translation = node.translation;
                }
            }
            None => {
                let (mesh, material) = match node.kind {
                    NodeKind::Agent => (assets.agent_mesh.clone(), assets.agent_material.clone()),
                    NodeKind::Food => (assets.food_mesh.clone(), assets.food_material.clone()),
                    NodeKind::Wall => (assets.wall_mesh.clone(), assets.wall_material.clone()),
                };
                let entity = commands
                    .spawn(PbrBundle {
                        mesh,
                        material,
                        transform: Transform::from_translation(node.translation),
                        ..default()
                    })
                    .id();
                entities.map.insert(node.id, entity);
            }
        }
    }
}
