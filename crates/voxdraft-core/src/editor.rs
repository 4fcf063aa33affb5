//! Editor facade: routes input to the stores and edits to the history.

use crate::action::Action;
use crate::annotation::{AnnotationId, AnnotationStore};
use crate::bridge::ActionBus;
use crate::camera::Camera;
use crate::color::CellColor;
use crate::config::{ConfigResult, EditorConfig, GridConfig};
use crate::geometry::{brush_footprint, grid_to_cell_space, stroke_stamps, CellAddress};
use crate::grid::GridStore;
use crate::history::ActionHistory;
use crate::input::{resolve_shortcut, EditorCommand, KeyChord, MouseButton, PointerEvent};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Size, Vec2};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Largest gap, in cells, between interpolated brush stamps.
const STROKE_STEP: f64 = 0.5;

/// The pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Painting or erasing cells; `last` is in cell space.
    Voxel { last: Point },
    /// Drawing the store's current annotation.
    Annotation,
    /// Dragging the view; `last` is in screen space.
    Panning { last: Point },
}

/// Owns the grid, the annotations and their shared undo history.
///
/// All positions passed in are screen coordinates; the editor converts them
/// through its [`Camera`].
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    grid: Rc<RefCell<GridStore>>,
    annotations: Rc<RefCell<AnnotationStore>>,
    bus: ActionBus,
    history: ActionHistory,
    pub camera: Camera,
    tools: ToolManager,
    gesture: Gesture,
    /// Last pointer position over the surface, for the brush preview.
    hover: Option<Point>,
}

impl Editor {
    /// Create an editor with an empty grid.
    pub fn new(config: EditorConfig) -> ConfigResult<Self> {
        config.grid.validate()?;

        let grid = Rc::new(RefCell::new(GridStore::new(config.grid)));
        let annotations = Rc::new(RefCell::new(AnnotationStore::new()));

        let bus = ActionBus::new();
        bus.subscribe(grid.clone());
        bus.subscribe(annotations.clone());

        let dispatch = bus.clone();
        let history = ActionHistory::new(move |action, direction| dispatch.dispatch(action, direction))
            .with_limit(config.history_limit);

        log::debug!(
            "Editor created with {}x{} chunks of {} cells",
            config.grid.grid_size,
            config.grid.grid_size,
            config.grid.chunk_size
        );

        Ok(Self {
            config,
            grid,
            annotations,
            bus,
            history,
            camera: Camera::new(),
            tools: ToolManager::new(),
            gesture: Gesture::Idle,
            hover: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn grid_config(&self) -> GridConfig {
        self.config.grid
    }

    /// Read access to the grid, for rendering.
    pub fn grid(&self) -> Ref<'_, GridStore> {
        self.grid.borrow()
    }

    /// Read access to the annotations, for rendering.
    pub fn annotations(&self) -> Ref<'_, AnnotationStore> {
        self.annotations.borrow()
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// The bus the stores are subscribed to. Extra listeners may join it.
    pub fn bus(&self) -> &ActionBus {
        &self.bus
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Check if a drawing or panning gesture is in progress.
    pub fn is_gesture_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    // --- Settings ---

    /// Switch tools, finishing any gesture made with the old one.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.finish_gesture();
        self.tools.set_tool(tool);
    }

    pub fn set_color(&mut self, color: CellColor) {
        self.tools.set_color(color);
    }

    pub fn set_brush_size(&mut self, size: u32) -> ConfigResult<()> {
        self.tools.set_brush_size(size).inspect_err(|e| log::warn!("{e}"))
    }

    /// Rebuild the grid for a new shape.
    ///
    /// The grid is emptied and the history forgotten: recorded actions refer
    /// to chunks that may no longer exist.
    pub fn set_grid_config(&mut self, grid: GridConfig) -> ConfigResult<()> {
        grid.validate().inspect_err(|e| log::warn!("Rejected grid config: {e}"))?;

        self.finish_gesture();
        self.config.grid = grid;
        self.grid.borrow_mut().reset_grid(grid);
        self.history.clear();
        log::debug!("Grid reset to {}x{} chunks", grid.grid_size, grid.grid_size);
        Ok(())
    }

    /// Center the grid in a viewport at 100% zoom.
    pub fn reset_view(&mut self, viewport: Size) {
        let extent = self.config.grid.pixel_extent();
        self.camera.center_on(Size::new(extent, extent), viewport);
    }

    // --- Coordinate helpers ---

    fn to_grid_space(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    fn to_cell_space(&self, screen: Point) -> Point {
        grid_to_cell_space(self.to_grid_space(screen), &self.config.grid)
    }

    /// Cells the current brush would touch at a screen position.
    ///
    /// Empty for tools that don't edit cells.
    pub fn brush_preview(&self, screen: Point) -> Vec<CellAddress> {
        if !self.tools.current_tool.is_voxel() {
            return Vec::new();
        }
        brush_footprint(
            self.to_cell_space(screen),
            self.tools.brush_size(),
            &self.config.grid,
        )
    }

    /// Brush preview at the last hovered position.
    pub fn hover_preview(&self) -> Vec<CellAddress> {
        self.hover
            .map(|screen| self.brush_preview(screen))
            .unwrap_or_default()
    }

    // --- Input ---

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => self.handle_pointer_down(position, button),
            PointerEvent::Move { position } => self.handle_pointer_move(position),
            PointerEvent::Up => self.handle_pointer_up(),
            PointerEvent::Leave => self.handle_pointer_leave(),
            PointerEvent::Scroll { position, delta } => self.handle_scroll(position, delta),
        }
    }

    pub fn handle_pointer_down(&mut self, screen: Point, button: MouseButton) {
        self.finish_gesture();
        self.hover = Some(screen);

        let tool = self.tools.current_tool;
        if button == MouseButton::Middle || (button == MouseButton::Left && tool == ToolKind::Pan) {
            self.gesture = Gesture::Panning { last: screen };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        if tool.is_voxel() {
            let cell = self.to_cell_space(screen);
            self.grid.borrow_mut().start_batch();
            self.stamp(cell);
            self.gesture = Gesture::Voxel { last: cell };
        } else if tool.is_annotation() {
            let world = self.to_grid_space(screen);
            let started = self.annotations.borrow_mut().start_annotation(
                tool,
                world,
                self.tools.color,
                self.tools.thickness(),
            );
            if started {
                self.gesture = Gesture::Annotation;
            }
        }
    }

    pub fn handle_pointer_move(&mut self, screen: Point) {
        self.hover = Some(screen);

        match self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { last } => {
                self.camera.pan(screen - last);
                self.gesture = Gesture::Panning { last: screen };
            }
            Gesture::Voxel { last } => {
                let cell = self.to_cell_space(screen);
                let stamps = if self.config.interpolate_strokes {
                    stroke_stamps(last, cell, self.tools.brush_size(), STROKE_STEP, &self.config.grid)
                } else {
                    vec![cell]
                };
                for stamp in stamps {
                    self.stamp(stamp);
                }
                self.gesture = Gesture::Voxel { last: cell };
            }
            Gesture::Annotation => {
                let world = self.to_grid_space(screen);
                self.annotations.borrow_mut().update_annotation(world);
            }
        }
    }

    /// Finish the gesture. A later up or leave for the same gesture is ignored.
    pub fn handle_pointer_up(&mut self) {
        self.finish_gesture();
    }

    /// The pointer left the surface: finish the gesture as if released.
    pub fn handle_pointer_leave(&mut self) {
        self.finish_gesture();
        self.hover = None;
    }

    pub fn handle_scroll(&mut self, screen: Point, delta: Vec2) {
        self.camera.zoom_by_wheel(screen, delta.y);
    }

    /// Run the command bound to a key chord, if any.
    pub fn handle_key(&mut self, chord: &KeyChord, text_input_focused: bool) -> Option<EditorCommand> {
        let command = resolve_shortcut(chord, text_input_focused)?;
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
        };
        Some(command)
    }

    /// Apply the brush once at a cell-space position.
    fn stamp(&mut self, center: Point) {
        let tool = self.tools.current_tool;
        let color = self.tools.color;
        let cells = brush_footprint(center, self.tools.brush_size(), &self.config.grid);

        let mut grid = self.grid.borrow_mut();
        for address in cells {
            match tool {
                ToolKind::VoxelPlace => grid.place_cell(address, color),
                ToolKind::Eraser => grid.remove_cell(address),
                _ => None,
            };
        }
    }

    /// Close the open gesture and record what it did.
    fn finish_gesture(&mut self) {
        let action = match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return,
            Gesture::Panning { .. } => None,
            Gesture::Voxel { .. } => self.grid.borrow_mut().end_batch(),
            Gesture::Annotation => self.annotations.borrow_mut().end_annotation(),
        };
        if let Some(action) = action {
            self.history.record(action);
        }
    }

    fn record(&mut self, action: Option<Action>) -> bool {
        match action {
            Some(action) => {
                self.history.record(action);
                true
            }
            None => false,
        }
    }

    // --- Edits outside gestures ---

    /// Place a single cell with the current color.
    pub fn place_cell(&mut self, address: CellAddress) -> bool {
        self.finish_gesture();
        let action = self.grid.borrow_mut().place_cell(address, self.tools.color);
        self.record(action)
    }

    /// Erase a single cell. Returns false if it was already empty.
    pub fn erase_cell(&mut self, address: CellAddress) -> bool {
        self.finish_gesture();
        let action = self.grid.borrow_mut().remove_cell(address);
        self.record(action)
    }

    /// Empty every chunk as one undoable step.
    pub fn clear_grid(&mut self) {
        self.finish_gesture();
        let action = self.grid.borrow_mut().clear_grid();
        self.history.record(action);
    }

    pub fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        self.finish_gesture();
        let action = self.annotations.borrow_mut().remove_annotation(id);
        self.record(action)
    }

    pub fn clear_annotations(&mut self) -> bool {
        self.finish_gesture();
        let action = self.annotations.borrow_mut().clear_annotations();
        self.record(action)
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        self.history.redo()
    }
}
