//! Editor Flow Tests - Placement, Debounce and Rotation
//!
//! End-to-end tests driving the workbench the way a window loop would: feed
//! keyboard/mouse state, tick frames with simulated wall-clock time, observe
//! the published placeholders and the world mutations.

use std::cell::Cell;
use std::rc::Rc;

use glam::{IVec3, Vec3};

use block_forge_engine::editor::Workbench;
use block_forge_engine::input::{KeyCode, KeyboardState, MouseButton, MouseState};
use block_forge_engine::world::{
    Block, BlockCatalog, BlockVolume, GridPos, RayHit, RaycastProvider, VoxelWorld,
};
use block_forge_engine::CameraPose;

// ============================================================================
// Helpers
// ============================================================================

/// Scene wrapper that counts world mutations.
struct CountingScene {
    volume: BlockVolume,
    adds: Rc<Cell<usize>>,
    removes: Rc<Cell<usize>>,
}

impl CountingScene {
    fn new(volume: BlockVolume) -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let adds = Rc::new(Cell::new(0));
        let removes = Rc::new(Cell::new(0));
        (
            Self {
                volume,
                adds: adds.clone(),
                removes: removes.clone(),
            },
            adds,
            removes,
        )
    }
}

impl VoxelWorld for CountingScene {
    fn contains(&self, cell: GridPos) -> bool {
        self.volume.contains(cell)
    }

    fn block_at(&self, cell: GridPos) -> Option<&Block> {
        self.volume.block_at(cell)
    }

    fn add_block(&mut self, cell: GridPos, block: Block) {
        self.adds.set(self.adds.get() + 1);
        self.volume.add_block(cell, block);
    }

    fn remove_block(&mut self, cell: GridPos) -> Option<Block> {
        self.removes.set(self.removes.get() + 1);
        self.volume.remove_block(cell)
    }
}

impl RaycastProvider for CountingScene {
    fn cursor_ray_hit(&self, pose: &CameraPose, cursor: (f32, f32)) -> Option<RayHit> {
        self.volume.cursor_ray_hit(pose, cursor)
    }
}

fn catalog() -> BlockCatalog {
    let mut catalog = BlockCatalog::new();
    catalog.register(Block::new("grass", "grass", "cube_up"));
    catalog.register(Block::new("stone", "stone", "cube_up"));
    catalog.register(Block::new("wall-left", "wall", "square_left"));
    catalog.register(Block::new("wall-back", "wall", "square_back"));
    catalog.register(Block::new("wall-right", "wall", "square_right"));
    catalog.register(Block::new("wall-front", "wall", "square_front"));
    catalog
}

/// Point the workbench camera straight down at the volume center so a
/// centered cursor targets the (16, *, 16) column.
fn aim_overhead(workbench: &mut Workbench) {
    let camera = workbench.camera_mut();
    camera.set_home(Vec3::new(16.5, 0.0, 16.5));
    camera.orbit_mut().pitch = 88.5_f32.to_radians();
}

/// Center the cursor in an 800x600 viewport.
fn center_cursor(mouse: &mut MouseState) {
    mouse.set_position(400.0, 300.0, 800, 600);
}

const DT: f32 = 0.016;
const DT_MS: u64 = 16;

/// Run `count` frames starting at `now_ms`, returning the time after the
/// last frame.
fn run_frames(
    workbench: &mut Workbench,
    keyboard: &KeyboardState,
    mouse: &mut MouseState,
    mut now_ms: u64,
    count: usize,
) -> u64 {
    for _ in 0..count {
        workbench.frame(keyboard, mouse, DT, now_ms);
        now_ms += DT_MS;
    }
    now_ms
}

// ============================================================================
// Hover and Placement
// ============================================================================

#[test]
fn test_hover_attaches_add_cursor_on_empty_floor() {
    let mut workbench = Workbench::new(BlockVolume::new(), catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 2);

    let markers = workbench.placeholders();
    assert_eq!(markers.add.location(), Some(GridPos::new(16, 0, 16)));
    assert!(!markers.remove.is_attached());
}

#[test]
fn test_click_places_selected_block() {
    let mut workbench = Workbench::new(BlockVolume::new(), catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1000, 1);

    mouse.set_button(MouseButton::Left, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1016, 1);
    mouse.set_button(MouseButton::Left, false);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1032, 1);

    let placed = workbench.scene().block_at(GridPos::new(16, 0, 16)).unwrap();
    assert_eq!(placed.name, "grass");
}

#[test]
fn test_selected_block_channel_last_write_wins() {
    let mut workbench = Workbench::new(BlockVolume::new(), catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    workbench.set_selected_block(Block::new("wall-left", "wall", "square_left"));
    workbench.set_selected_block(Block::new("stone", "stone", "cube_up"));

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1000, 1);

    mouse.set_button(MouseButton::Left, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1016, 1);

    let placed = workbench.scene().block_at(GridPos::new(16, 0, 16)).unwrap();
    assert_eq!(placed.name, "stone");
}

// ============================================================================
// Click Debounce
// ============================================================================

#[test]
fn test_held_trigger_repeats_at_interval() {
    let (scene, adds, _) = CountingScene::new(BlockVolume::new());
    let mut workbench = Workbench::new(scene, catalog());
    workbench.set_click_repeat_interval(100);
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 1);

    // Hold the place trigger for one second of simulated time.
    mouse.set_button(MouseButton::Left, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 16, 62);

    // At most one click per 100 ms window, and repeats clearly happened.
    let count = adds.get();
    assert!(count >= 8, "expected repeated clicks, got {count}");
    assert!(count <= 11, "debounce failed, got {count} clicks in 1s");
}

#[test]
fn test_zero_interval_fires_once_per_press() {
    let (scene, adds, _) = CountingScene::new(BlockVolume::new());
    let mut workbench = Workbench::new(scene, catalog());
    workbench.set_click_repeat_interval(0);
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 1);

    mouse.set_button(MouseButton::Left, true);
    let now = run_frames(&mut workbench, &keyboard, &mut mouse, 16, 100);
    assert_eq!(adds.get(), 1, "held trigger must fire exactly once");

    // Release and press again: one more.
    mouse.set_button(MouseButton::Left, false);
    let now = run_frames(&mut workbench, &keyboard, &mut mouse, now, 1);
    mouse.set_button(MouseButton::Left, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, now, 5);
    assert_eq!(adds.get(), 2);
}

#[test]
fn test_remove_debounce_shares_algorithm() {
    let (scene, _, removes) = CountingScene::new(BlockVolume::new());
    let mut workbench = Workbench::new(scene, catalog());
    workbench.set_click_repeat_interval(0);
    workbench.activate();
    aim_overhead(&mut workbench);

    // Build a small tower to remove from.
    for y in 0..3 {
        workbench.set_selected_block(Block::new("stone", "stone", "cube_up"));
        let keyboard = KeyboardState::new();
        let mut mouse = MouseState::new();
        center_cursor(&mut mouse);
        run_frames(&mut workbench, &keyboard, &mut mouse, y * 100, 1);
        mouse.set_button(MouseButton::Left, true);
        run_frames(&mut workbench, &keyboard, &mut mouse, y * 100 + 16, 1);
        mouse.set_button(MouseButton::Left, false);
        run_frames(&mut workbench, &keyboard, &mut mouse, y * 100 + 32, 1);
    }

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);

    // Hold remove with repeat disabled: exactly one removal.
    mouse.set_button(MouseButton::Right, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 10_000, 50);
    assert_eq!(removes.get(), 1);
}

// ============================================================================
// Bounds and Dragging
// ============================================================================

#[test]
fn test_add_cursor_rejected_outside_world_bounds() {
    // A volume one cell high: the neighbour above an occupied cell is
    // always out of bounds.
    let mut volume = BlockVolume::with_bounds(IVec3::ZERO, IVec3::new(32, 1, 32));
    volume.add_block(GridPos::new(16, 0, 16), Block::new("stone", "stone", "cube_up"));
    let (scene, adds, _) = CountingScene::new(volume);

    let mut workbench = Workbench::new(scene, catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 2);

    let markers = workbench.placeholders();
    assert!(!markers.add.is_attached(), "add cursor must reject out-of-bounds cells");
    assert_eq!(markers.remove.location(), Some(GridPos::new(16, 0, 16)));

    // And the click never fires.
    mouse.set_button(MouseButton::Left, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1000, 5);
    assert_eq!(adds.get(), 0);
}

#[test]
fn test_drag_suspends_placement() {
    let mut workbench = Workbench::new(BlockVolume::new(), catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 2);
    assert!(workbench.placeholders().add.is_attached());

    // Middle mouse engages the camera drag: cursors hide, capture engages.
    mouse.set_button(MouseButton::Middle, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 100, 1);
    assert!(!workbench.placeholders().add.is_attached());
    assert!(workbench.cursor().is_captured());

    mouse.set_button(MouseButton::Middle, false);
    run_frames(&mut workbench, &keyboard, &mut mouse, 200, 1);
    assert!(workbench.placeholders().add.is_attached());
    assert!(!workbench.cursor().is_captured());
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_rotate_key_cycles_block_back_to_start() {
    let mut volume = BlockVolume::new();
    volume.add_block(
        GridPos::new(16, 0, 16),
        Block::new("wall-left", "wall", "square_left"),
    );
    let mut workbench = Workbench::new(volume, catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let mut keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    let mut now = run_frames(&mut workbench, &keyboard, &mut mouse, 0, 1);

    for expected in ["wall-back", "wall-right", "wall-front", "wall-left"] {
        keyboard.handle_key(KeyCode::R, true);
        now = run_frames(&mut workbench, &keyboard, &mut mouse, now, 1);
        keyboard.handle_key(KeyCode::R, false);
        now = run_frames(&mut workbench, &keyboard, &mut mouse, now, 1);

        let block = workbench.scene().block_at(GridPos::new(16, 0, 16)).unwrap();
        assert_eq!(block.name, expected);
    }
}

#[test]
fn test_rotate_without_target_is_silent() {
    let (scene, adds, _) = CountingScene::new(BlockVolume::new());
    let mut workbench = Workbench::new(scene, catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let mut keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 1);

    keyboard.handle_key(KeyCode::R, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 16, 1);
    assert_eq!(adds.get(), 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_deactivation_detaches_everything_synchronously() {
    let mut workbench = Workbench::new(BlockVolume::new(), catalog());
    workbench.activate();
    aim_overhead(&mut workbench);

    let keyboard = KeyboardState::new();
    let mut mouse = MouseState::new();
    center_cursor(&mut mouse);
    run_frames(&mut workbench, &keyboard, &mut mouse, 0, 2);
    assert!(workbench.placeholders().add.is_attached());

    workbench.deactivate();
    assert!(!workbench.placeholders().add.is_attached());
    assert!(!workbench.placeholders().remove.is_attached());
    assert!(!workbench.cursor().is_captured());

    // Frames while inactive change nothing.
    mouse.set_button(MouseButton::Left, true);
    run_frames(&mut workbench, &keyboard, &mut mouse, 1000, 3);
    assert!(!workbench.placeholders().add.is_attached());
}
