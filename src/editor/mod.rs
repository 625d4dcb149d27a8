//! Editor Module
//!
//! The concrete editor controllers and the scheduler composing them. Each
//! controller implements [`EditorState`], an explicit
//! activate/deactivate/tick lifecycle; the [`Workbench`] runs them in a fixed
//! order every frame (camera first, then builder) against a shared
//! [`StateCtx`], so the builder always raycasts against the camera pose of
//! the *current* frame. Everything here is single-threaded and frame-driven:
//! no operation blocks, and disabling a controller detaches its outputs and
//! input groups synchronously within the same call.

pub mod blocks;
pub mod builder;
pub mod camera;
pub mod channel;
pub mod config;

pub use blocks::{BlockLibrary, ShapeGroup, rotated_name};
pub use builder::{BuilderControl, ClickState, EditPhase};
pub use camera::CameraControl;
pub use config::{BuilderSettings, CameraSettings, ConfigError, EditorSettings};

use glam::Vec3;
use log::info;

use crate::camera::CameraPose;
use crate::input::{CursorCapture, InputFrame, InputMapper, KeyboardState, MouseState};
use crate::world::{Block, BlockCatalog, GridPos, RaycastProvider, VoxelWorld};

use channel::Publisher;

/// The scene the editor operates on: a mutable voxel world that can also
/// answer cursor raycasts against its rendered geometry.
pub trait EditScene: VoxelWorld + RaycastProvider {}

impl<T: VoxelWorld + RaycastProvider> EditScene for T {}

/// A transient visual anchor marking where an add or remove operation would
/// apply if triggered this frame. Recomputed every tick, never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholder {
    location: Option<GridPos>,
    attached: bool,
}

impl Placeholder {
    /// Attach the placeholder at a cell. No-op if already attached there.
    pub fn attach_at(&mut self, cell: GridPos) {
        self.location = Some(cell);
        self.attached = true;
    }

    /// Detach the placeholder. No-op if already detached.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Whether the placeholder is currently shown.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The cell the placeholder marks, if attached.
    pub fn location(&self) -> Option<GridPos> {
        self.attached.then_some(self.location).flatten()
    }

    /// World-space transform for the render layer: the marked cell's center.
    pub fn center(&self) -> Option<Vec3> {
        self.location().map(GridPos::center)
    }
}

/// The two placement cursors published once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholders {
    /// Marks the neighbour cell a new block would be added into.
    pub add: Placeholder,
    /// Marks the existing block the remove/rotate actions would target.
    pub remove: Placeholder,
}

impl Placeholders {
    /// Hide both cursors.
    pub fn detach_all(&mut self) {
        self.add.detach();
        self.remove.detach();
    }
}

/// Shared per-frame context the scheduler hands to every controller.
///
/// Controllers communicate through it one-directionally: the camera publishes
/// `camera_pose`, the builder reads it and publishes `placeholders`.
pub struct StateCtx {
    pub mapper: InputMapper,
    pub catalog: BlockCatalog,
    pub scene: Box<dyn EditScene>,
    pub camera_pose: CameraPose,
    pub placeholders: Placeholders,
    pub cursor: CursorCapture,
}

impl StateCtx {
    /// Create a context around a scene and catalog with default input
    /// bindings and no active groups.
    pub fn new(scene: impl EditScene + 'static, catalog: BlockCatalog) -> Self {
        Self {
            mapper: InputMapper::with_default_bindings(),
            catalog,
            scene: Box::new(scene),
            camera_pose: CameraPose::default(),
            placeholders: Placeholders::default(),
            cursor: CursorCapture::new(),
        }
    }
}

/// Explicit controller lifecycle, composed by the [`Workbench`] scheduler.
///
/// `activate` and `deactivate` own all resource acquisition and release
/// (input groups, published outputs); `tick` runs once per frame and must
/// not block.
pub trait EditorState {
    fn activate(&mut self, ctx: &mut StateCtx);
    fn deactivate(&mut self, ctx: &mut StateCtx);
    fn tick(&mut self, ctx: &mut StateCtx, frame: &InputFrame);
}

/// The editor scheduler: owns the shared context and runs the camera and
/// builder controllers in registration order every frame.
pub struct Workbench {
    ctx: StateCtx,
    camera: CameraControl,
    builder: BuilderControl,
    selected_tx: Publisher<Block>,
    active: bool,
}

impl Workbench {
    /// Create a workbench around a scene and block catalog. Call
    /// [`activate`](Self::activate) before the first frame.
    pub fn new(scene: impl EditScene + 'static, catalog: BlockCatalog) -> Self {
        let (selected_tx, selected_rx) = channel::channel();
        Self {
            ctx: StateCtx::new(scene, catalog),
            camera: CameraControl::new(),
            builder: BuilderControl::new(selected_rx),
            selected_tx,
            active: false,
        }
    }

    /// Activate all controllers in run order.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        let Self { ctx, camera, builder, .. } = self;
        let states: [&mut dyn EditorState; 2] = [camera, builder];
        for state in states {
            state.activate(ctx);
        }
        self.active = true;
        info!("Workbench activated");
    }

    /// Deactivate all controllers, synchronously detaching their outputs and
    /// input groups.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        let Self { ctx, camera, builder, .. } = self;
        let states: [&mut dyn EditorState; 2] = [camera, builder];
        for state in states {
            state.deactivate(ctx);
        }
        self.active = false;
        info!("Workbench deactivated");
    }

    /// Whether the workbench is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Snapshot device state into an input frame and run one tick.
    ///
    /// `now_ms` is the frame's wall-clock reference (milliseconds); the
    /// embedding application supplies it, tests may simulate it.
    pub fn frame(
        &mut self,
        keyboard: &KeyboardState,
        mouse: &mut MouseState,
        dt: f32,
        now_ms: u64,
    ) {
        let frame = self.ctx.mapper.begin_frame(keyboard, mouse, dt, now_ms);
        self.dispatch(&frame);
    }

    /// Run one tick against a pre-built input frame.
    pub fn dispatch(&mut self, frame: &InputFrame) {
        if !self.active {
            return;
        }
        let Self { ctx, camera, builder, .. } = self;
        let states: [&mut dyn EditorState; 2] = [camera, builder];
        for state in states {
            state.tick(ctx, frame);
        }
    }

    /// The camera pose published by the last frame.
    pub fn camera_pose(&self) -> CameraPose {
        self.ctx.camera_pose
    }

    /// The placement cursors published by the last frame.
    pub fn placeholders(&self) -> &Placeholders {
        &self.ctx.placeholders
    }

    /// Cursor capture state for the windowing layer.
    pub fn cursor(&self) -> &CursorCapture {
        &self.ctx.cursor
    }

    /// Mutable cursor capture state (focus events, dirty handshake).
    pub fn cursor_mut(&mut self) -> &mut CursorCapture {
        &mut self.ctx.cursor
    }

    /// The scene being edited.
    pub fn scene(&self) -> &dyn EditScene {
        &*self.ctx.scene
    }

    /// The block catalog.
    pub fn catalog(&self) -> &BlockCatalog {
        &self.ctx.catalog
    }

    /// The camera controller.
    pub fn camera(&self) -> &CameraControl {
        &self.camera
    }

    /// Mutable camera controller (home point, tuning).
    pub fn camera_mut(&mut self) -> &mut CameraControl {
        &mut self.camera
    }

    /// The builder controller.
    pub fn builder(&self) -> &BuilderControl {
        &self.builder
    }

    /// Publish the block the next place action will use. Last write wins;
    /// the builder reads at most one pending value per tick.
    pub fn set_selected_block(&self, block: Block) {
        self.selected_tx.publish(block);
    }

    /// Time between repeated clicks while a trigger is held, milliseconds.
    pub fn click_repeat_interval(&self) -> u32 {
        self.builder.click_repeat_interval()
    }

    /// Set the repeat interval for both triggers. `0` disables repeat.
    pub fn set_click_repeat_interval(&mut self, interval_ms: u32) {
        self.builder.set_click_repeat_interval(interval_ms);
    }

    /// Apply loaded settings to the controllers.
    pub fn apply_settings(&mut self, settings: &EditorSettings) {
        self.camera.orbit_mut().config = settings.camera.to_orbit_config();
        self.builder
            .set_click_repeat_interval(settings.builder.click_repeat_interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockVolume;

    #[test]
    fn test_placeholder_lifecycle() {
        let mut placeholder = Placeholder::default();
        assert!(!placeholder.is_attached());
        assert!(placeholder.location().is_none());

        placeholder.attach_at(GridPos::new(1, 2, 3));
        assert!(placeholder.is_attached());
        assert_eq!(placeholder.location(), Some(GridPos::new(1, 2, 3)));
        assert_eq!(placeholder.center(), Some(Vec3::new(1.5, 2.5, 3.5)));

        placeholder.detach();
        assert!(!placeholder.is_attached());
        assert!(placeholder.center().is_none());
    }

    #[test]
    fn test_workbench_activation_is_idempotent() {
        let mut workbench = Workbench::new(BlockVolume::new(), BlockCatalog::new());
        assert!(!workbench.is_active());
        workbench.activate();
        workbench.activate();
        assert!(workbench.is_active());
        workbench.deactivate();
        assert!(!workbench.is_active());
    }

    #[test]
    fn test_dispatch_ignored_while_inactive() {
        let mut workbench = Workbench::new(BlockVolume::new(), BlockCatalog::new());
        let pose_before = workbench.camera_pose();
        workbench.dispatch(&InputFrame::empty(0.016, 0));
        assert_eq!(workbench.camera_pose(), pose_before);
    }

    #[test]
    fn test_tick_publishes_pose() {
        let mut workbench = Workbench::new(BlockVolume::new(), BlockCatalog::new());
        workbench.activate();
        workbench.dispatch(&InputFrame::empty(0.016, 0));
        // Default orbit: 40 units from the origin focus point.
        let pose = workbench.camera_pose();
        assert!(((pose.position - pose.target).length() - 40.0).abs() < 1e-3);
    }
}
