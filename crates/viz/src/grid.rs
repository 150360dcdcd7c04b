//! Flat grid rendering: one colored cell per board position.
//!
//! The classification buffer is rebuilt from scratch on every render
//! (O(grid_size^2) per call, fine at this board size and polling cadence),
//! and the sprite grid is likewise despawned and respawned wholesale on
//! every update.

use bevy::prelude::*;

use sim_protocol::{GridPos, Snapshot};

use crate::config::VizConfig;
use crate::render::RenderAdapter;
use crate::view_state::{StateUpdatedEvent, ViewState};

/// Gap between neighboring cell sprites, in pixels.
const CELL_GAP: f32 = 2.0;

/// Plugin for the 2D grid presentation.
pub struct GridRenderPlugin;

impl Plugin for GridRenderPlugin {
    fn build(&self, app: &mut App) {
        let config = app.world().resource::<VizConfig>().clone();

        app.insert_resource(GridRenderer::new(config.grid.grid_size))
            .init_resource::<GridSurface>()
            .add_systems(
                Update,
                sync_grid.run_if(on_event::<StateUpdatedEvent>()),
            );
    }
}

/// What occupies a cell, for styling purposes.
///
/// Classifications are applied wall, then food, then agent, so when a cell
/// is claimed by more than one the later one wins: an agent standing on a
/// wall renders as the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Food,
    Agent,
}

/// Cell classification buffer for a fixed-size board.
#[derive(Resource)]
pub struct GridRenderer {
    grid_size: u32,
    cells: Vec<CellKind>,
}

impl GridRenderer {
    /// Creates an all-empty buffer for a `grid_size` by `grid_size` board.
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            cells: vec![CellKind::Empty; (grid_size * grid_size) as usize],
        }
    }

    /// Board width and height in cells.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Classification of the cell at `(x, y)`.
    pub fn cell(&self, x: u32, y: u32) -> CellKind {
        self.cells[(y * self.grid_size + x) as usize]
    }

    /// The full buffer, row-major.
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Marks one cell; out-of-range positions mark nothing.
    fn mark(&mut self, pos: GridPos, kind: CellKind) {
        if pos.in_bounds(self.grid_size) {
            let index = (pos.y as u32 * self.grid_size + pos.x as u32) as usize;
            self.cells[index] = kind;
        }
    }
}

impl RenderAdapter for GridRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.cells.fill(CellKind::Empty);
        for wall in &snapshot.walls {
            self.mark(*wall, CellKind::Wall);
        }
        self.mark(snapshot.food_position, CellKind::Food);
        self.mark(snapshot.agent_position, CellKind::Agent);
    }
}

/// Display color for a cell classification.
pub fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Empty => Color::srgb(0.92, 0.92, 0.92),
        CellKind::Wall => Color::srgb(0.33, 0.33, 0.33),
        CellKind::Food => Color::srgb(0.0, 0.8, 0.0),
        CellKind::Agent => Color::srgb(0.0, 0.0, 0.9),
    }
}

/// Screen-space center of cell `(x, y)` for a board centered on the origin.
/// Row 0 sits at the top, matching the wire coordinate convention.
pub fn cell_translation(x: u32, y: u32, grid_size: u32, cell_pixels: f32) -> Vec2 {
    let half = grid_size as f32 * cell_pixels / 2.0;
    Vec2::new(
        x as f32 * cell_pixels + cell_pixels / 2.0 - half,
        half - (y as f32 * cell_pixels + cell_pixels / 2.0),
    )
}

/// Resource tracking the spawned cell sprites.
#[derive(Resource, Default)]
pub struct GridSurface {
    cells: Vec<Entity>,
}

/// Component tagging a cell sprite with its board position.
#[derive(Component)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

/// System rebuilding the sprite grid from the latest snapshot.
fn sync_grid(
    mut commands: Commands,
    view: Res<ViewState>,
    config: Res<VizConfig>,
    mut renderer: ResMut<GridRenderer>,
    mut surface: ResMut<GridSurface>,
) {
    let Some(snapshot) = view.current() else {
        return;
    };
    renderer.render(snapshot);

    for entity in surface.cells.drain(..) {
        commands.entity(entity).despawn();
    }

    let size = renderer.grid_size();
    let pixels = config.grid.cell_pixels;
    for y in 0..size {
        for x in 0..size {
            let center = cell_translation(x, y, size, pixels);
            let entity = commands
                .spawn((
                    SpriteBundle {
                        sprite: Sprite {
                            color: cell_color(renderer.cell(x, y)),
                            custom_size: Some(Vec2::splat(pixels - CELL_GAP)),
                            ..default()
                        },
                        transform: Transform::from_xyz(center.x, center.y, 0.0),
                        ..default()
                    },
                    GridCell { x, y },
                ))
                .id();
            surface.cells.push(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_protocol::fixtures;

    #[test]
    fn test_reset_scenario_classification() {
        let mut renderer = GridRenderer::new(10);
        renderer.render(&fixtures::reset_snapshot());

        assert_eq!(renderer.cell(0, 0), CellKind::Agent);
        assert_eq!(renderer.cell(5, 5), CellKind::Food);
        assert_eq!(renderer.cell(1, 1), CellKind::Wall);
        assert_eq!(renderer.cell(2, 2), CellKind::Wall);

        let occupied = [(0, 0), (5, 5), (1, 1), (2, 2)];
        for y in 0..10 {
            for x in 0..10 {
                if !occupied.contains(&(x, y)) {
                    assert_eq!(renderer.cell(x, y), CellKind::Empty, "cell ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_agent_wins_colocated_cell() {
        let mut renderer = GridRenderer::new(10);
        renderer.render(&fixtures::crowded_snapshot());
        assert_eq!(renderer.cell(3, 3), CellKind::Agent);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut renderer = GridRenderer::new(10);
        let snapshot = fixtures::reset_snapshot();

        renderer.render(&snapshot);
        let first = renderer.cells().to_vec();
        renderer.render(&snapshot);

        assert_eq!(renderer.cells(), &first[..]);
    }

    #[test]
    fn test_render_has_no_hysteresis() {
        let snapshot = fixtures::reset_snapshot();

        let mut fresh = GridRenderer::new(10);
        fresh.render(&snapshot);

        let mut reused = GridRenderer::new(10);
        reused.render(&fixtures::crowded_snapshot());
        reused.render(&snapshot);

        assert_eq!(reused.cells(), fresh.cells());
    }

    #[test]
    fn test_out_of_range_positions_mark_nothing() {
        let mut renderer = GridRenderer::new(10);
        renderer.render(&fixtures::out_of_range_snapshot());

        // Only the in-range wall shows up; everything else fell outside.
        assert_eq!(renderer.cell(3, 3), CellKind::Wall);
        let marked = renderer
            .cells()
            .iter()
            .filter(|&&kind| kind != CellKind::Empty)
            .count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn test_cell_translation_centers_board() {
        // 10x10 board at 48px per cell: top-left cell center.
        let top_left = cell_translation(0, 0, 10, 48.0);
        assert_eq!(top_left, Vec2::new(-216.0, 216.0));

        // Bottom-right cell mirrors it.
        let bottom_right = cell_translation(9, 9, 10, 48.0);
        assert_eq!(bottom_right, Vec2::new(216.0, -216.0));
    }
}
