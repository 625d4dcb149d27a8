//! Block Builder Module
//!
//! The per-frame placement state machine. While hovering it raycasts from
//! the cursor through the current camera pose, parks the add cursor on the
//! neighbour cell of the hit face and the remove cursor on the hit block,
//! and fires the place/remove actions with debounced repeat-clicking. The
//! rotate action swaps the targeted block for its 90-degree rotated variant
//! by name, when the catalog has one.
//!
//! Every malformed input degrades to "nothing shown, nothing fires": a
//! raycast miss hides both cursors, an out-of-bounds add cell hides the add
//! cursor, a missing rotated variant leaves the block untouched.

use log::{debug, info, trace};

use crate::input::{InputFrame, InputFunction, InputGroup};
use crate::world::{Block, RayHit, RaycastProvider, VoxelWorld};

use super::blocks::rotated_name;
use super::channel::Consumer;
use super::{EditorState, StateCtx};

/// Default time between consecutive clicks while a trigger is held.
pub const DEFAULT_CLICK_INTERVAL_MS: u32 = 125;

/// The builder's input-handling phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// Deactivated; nothing is raycast and nothing fires.
    Idle,
    /// Following the cursor and positioning placeholders.
    Hovering,
    /// Camera drag in progress; raycasting suspended, placeholders hidden.
    Dragging,
}

/// Debounced trigger state for one click action.
///
/// With a positive repeat interval a held trigger fires every `interval` ms;
/// with an interval of zero it fires exactly once per press.
#[derive(Debug, Clone)]
pub struct ClickState {
    pressed: bool,
    last_click_ms: Option<u64>,
    repeat_interval_ms: u32,
}

impl ClickState {
    /// Create a click state with the given repeat interval.
    pub fn new(repeat_interval_ms: u32) -> Self {
        Self {
            pressed: false,
            last_click_ms: None,
            repeat_interval_ms,
        }
    }

    /// The trigger transitioned to on.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// The trigger transitioned to off; the click timestamp only resets here.
    pub fn release(&mut self) {
        self.pressed = false;
        self.last_click_ms = None;
    }

    /// Whether the bound action should fire this frame.
    pub fn should_fire(&self, now_ms: u64) -> bool {
        if !self.pressed {
            return false;
        }
        if self.repeat_interval_ms > 0 {
            match self.last_click_ms {
                Some(last) => last + self.repeat_interval_ms as u64 <= now_ms,
                None => true,
            }
        } else {
            // Repeat disabled: fire only when there was no previous click.
            self.last_click_ms.is_none()
        }
    }

    /// Record that the action fired.
    pub fn mark_fired(&mut self, now_ms: u64) {
        self.last_click_ms = Some(now_ms);
    }

    /// Current repeat interval in milliseconds.
    pub fn repeat_interval(&self) -> u32 {
        self.repeat_interval_ms
    }

    /// Change the repeat interval. `0` disables repeat.
    pub fn set_repeat_interval(&mut self, interval_ms: u32) {
        self.repeat_interval_ms = interval_ms;
    }
}

/// The voxel placement/removal controller.
pub struct BuilderControl {
    phase: EditPhase,
    selected: Option<Block>,
    selected_rx: Consumer<Block>,
    place_click: ClickState,
    remove_click: ClickState,
}

impl BuilderControl {
    /// Create a builder reading selected-block updates from `selected_rx`.
    pub fn new(selected_rx: Consumer<Block>) -> Self {
        Self {
            phase: EditPhase::Idle,
            selected: None,
            selected_rx,
            place_click: ClickState::new(DEFAULT_CLICK_INTERVAL_MS),
            remove_click: ClickState::new(DEFAULT_CLICK_INTERVAL_MS),
        }
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// The block the next place action will use.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref()
    }

    /// Time between repeated clicks while a trigger is held, milliseconds.
    pub fn click_repeat_interval(&self) -> u32 {
        self.place_click.repeat_interval()
    }

    /// Set the repeat interval for both triggers. `0` disables repeat.
    pub fn set_click_repeat_interval(&mut self, interval_ms: u32) {
        self.place_click.set_repeat_interval(interval_ms);
        self.remove_click.set_repeat_interval(interval_ms);
    }

    /// Park the placeholders against the latest collision.
    fn position_placeholders(&self, ctx: &mut StateCtx, hit: RayHit) {
        let add_cell = hit.cell.offset(hit.normal);
        if ctx.scene.contains(add_cell) {
            ctx.placeholders.add.attach_at(add_cell);
        } else {
            ctx.placeholders.add.detach();
        }

        let remove_cell = hit.cell;
        if ctx.scene.block_at(remove_cell).is_some() {
            ctx.placeholders.remove.attach_at(remove_cell);
        } else {
            ctx.placeholders.remove.detach();
        }
    }

    /// Place the selected block at the add cursor.
    fn add_block(&self, ctx: &mut StateCtx) {
        let (Some(cell), Some(block)) = (ctx.placeholders.add.location(), &self.selected) else {
            return;
        };
        debug!("Placing '{}' at {:?}", block.name, cell);
        ctx.scene.add_block(cell, block.clone());
    }

    /// Remove the block under the remove cursor.
    fn remove_block(&self, ctx: &mut StateCtx) {
        let Some(cell) = ctx.placeholders.remove.location() else {
            return;
        };
        debug!("Removing block at {cell:?}");
        ctx.scene.remove_block(cell);
    }

    /// Swap the block under the remove cursor for its rotated variant.
    ///
    /// Silent no-op when nothing is targeted, the block has no facing
    /// suffix, or the rotated name is not in the catalog.
    fn rotate_block(&self, ctx: &mut StateCtx) {
        let Some(cell) = ctx.placeholders.remove.location() else {
            return;
        };
        let Some(current_name) = ctx.scene.block_at(cell).map(|b| b.name.clone()) else {
            return;
        };
        let Some(next_name) = rotated_name(&current_name) else {
            trace!("Block '{current_name}' has no rotated variant");
            return;
        };
        let Some(rotated) = ctx.catalog.get(&next_name).cloned() else {
            trace!("Rotated block '{next_name}' not in catalog");
            return;
        };
        debug!("Rotating '{current_name}' to '{next_name}' at {cell:?}");
        ctx.scene.add_block(cell, rotated);
    }
}

impl EditorState for BuilderControl {
    fn activate(&mut self, ctx: &mut StateCtx) {
        ctx.mapper.activate_group(InputGroup::Builder);
        self.phase = EditPhase::Hovering;
        if self.selected.is_none() {
            self.selected = ctx.catalog.default_block().cloned();
        }
        info!(
            "Builder activated, selected block: {:?}",
            self.selected.as_ref().map(|b| b.name.as_str())
        );
    }

    fn deactivate(&mut self, ctx: &mut StateCtx) {
        ctx.placeholders.detach_all();
        ctx.mapper.deactivate_group(InputGroup::Builder);
        self.place_click.release();
        self.remove_click.release();
        self.phase = EditPhase::Idle;
        info!("Builder deactivated");
    }

    fn tick(&mut self, ctx: &mut StateCtx, frame: &InputFrame) {
        // At most one pending selection per tick, last write wins.
        if let Some(block) = self.selected_rx.take() {
            self.selected = Some(block);
        }

        self.phase = if frame.is_held(InputFunction::Drag) {
            EditPhase::Dragging
        } else {
            EditPhase::Hovering
        };

        // Don't raycast while the camera is being dragged.
        if self.phase == EditPhase::Dragging {
            ctx.placeholders.detach_all();
        } else {
            let hit = frame
                .cursor
                .and_then(|uv| ctx.scene.cursor_ray_hit(&ctx.camera_pose, uv));
            match hit {
                Some(hit) => self.position_placeholders(ctx, hit),
                None => ctx.placeholders.detach_all(),
            }
        }

        // Trigger edges. The timestamp resets only when a press ends.
        if frame.was_pressed(InputFunction::PlaceBlock) {
            self.place_click.press();
        }
        if frame.was_released(InputFunction::PlaceBlock) {
            self.place_click.release();
        }
        if frame.was_pressed(InputFunction::RemoveBlock) {
            self.remove_click.press();
        }
        if frame.was_released(InputFunction::RemoveBlock) {
            self.remove_click.release();
        }

        // Debounced repeat clicking; actions only fire while their
        // placeholder is attached.
        if self.place_click.should_fire(frame.now_ms) && ctx.placeholders.add.is_attached() {
            self.add_block(ctx);
            self.place_click.mark_fired(frame.now_ms);
        }
        if self.remove_click.should_fire(frame.now_ms) && ctx.placeholders.remove.is_attached() {
            self.remove_block(ctx);
            self.remove_click.mark_fired(frame.now_ms);
        }

        // Rotate fires on the press edge only, no repeat.
        if frame.was_pressed(InputFunction::RotateBlock) {
            self.rotate_block(ctx);
        }
    }
}
