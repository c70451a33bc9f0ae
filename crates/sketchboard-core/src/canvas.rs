//! Canvas state and the pointer/keyboard interaction engine.

use crate::camera::Camera;
use crate::config::{ConfigError, EngineConfig};
use crate::input::{Key, Modifiers, MouseButton, PointerEvent};
use crate::interaction::{Mode, SelectionRect};
use crate::nodes::{Node, NodeId, NodeKind, NodePatch, TextStyle};
use crate::resize::{ResizeHandle, ResizeRules, ResizeStart, apply_resize, hit_test_handle};
use crate::selection::Selection;
use crate::store::NodeStore;
use crate::suggestions::{Suggestion, layout_suggestions};
use crate::tools::{PathBuilder, PenPress, ToolKind};
use kurbo::{BezPath, Point, Rect, Size};

/// The whiteboard: nodes, view, selection, active tool and interaction mode.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub store: NodeStore,
    pub camera: Camera,
    pub selection: Selection,
    tool: ToolKind,
    mode: Mode,
    pen: PathBuilder,
    config: EngineConfig,
    text_style: TextStyle,
    /// A text field outside the canvas has keyboard focus.
    text_focus: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty canvas after validating `config`.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            store: NodeStore::new(),
            camera: Camera::with_bounds(config.min_scale, config.max_scale),
            selection: Selection::new(),
            tool: ToolKind::default(),
            mode: Mode::Idle,
            pen: PathBuilder::new(),
            text_style: TextStyle::with_size(config.default_font_size),
            config,
            text_focus: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. An in-progress pen path survives; only Escape abandons it.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            log::debug!("tool {} -> {}", self.tool, tool);
        }
        self.tool = tool;
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn text_focus(&self) -> bool {
        self.text_focus
    }

    /// Report whether an external text field has keyboard focus.
    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    /// The node property editors should show.
    pub fn primary_node(&self) -> Option<&Node> {
        self.selection.primary().and_then(|id| self.store.find(id))
    }

    /// Current marquee rectangle in world coordinates.
    pub fn selection_rect(&self) -> Option<Rect> {
        match &self.mode {
            Mode::BoxSelecting { rect, .. } => Some(rect.to_rect()),
            _ => None,
        }
    }

    /// Live preview of the pen path being authored, in world coordinates.
    pub fn pen_preview(&self) -> Option<BezPath> {
        self.pen.preview()
    }

    pub fn pen(&self) -> &PathBuilder {
        &self.pen
    }

    fn resize_rules(&self) -> ResizeRules {
        ResizeRules {
            min_size: self.config.min_node_size,
            min_font_size: self.config.min_font_size,
        }
    }

    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers),
            PointerEvent::Move { position, .. } => self.pointer_move(position),
            PointerEvent::Up { modifiers, .. } => self.pointer_up(Some(modifiers)),
            PointerEvent::Leave => self.pointer_up(None),
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.camera.apply_wheel(
                position,
                delta,
                modifiers.zoom(),
                self.config.zoom_sensitivity,
            ),
        }
    }

    fn enter(&mut self, mode: Mode) {
        log::debug!("{} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
    }

    fn pointer_down(&mut self, screen: Point, button: MouseButton, modifiers: Modifiers) {
        if !self.mode.is_idle() {
            // A press without a release in between; close the old interaction first.
            self.pointer_up(None);
        }
        let world = self.camera.screen_to_world(screen);

        if button == MouseButton::Middle || self.tool == ToolKind::Pan {
            self.enter(Mode::Panning { last: screen });
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        if self.tool == ToolKind::Pen {
            self.pen_press(world);
            return;
        }

        if let Some((id, handle)) = self.handle_at(world) {
            if let Some(node) = self.store.find(id) {
                let start = ResizeStart::capture(node);
                self.enter(Mode::Resizing {
                    id,
                    handle,
                    start,
                    press: world,
                });
                return;
            }
        }

        if let Some(kind) = self.tool.creates() {
            self.begin_creation(kind, world);
            return;
        }

        let tolerance = self.camera.screen_len_to_world(self.config.hit_tolerance);
        if let Some(id) = self.store.node_at(world, tolerance).map(|n| n.id()) {
            if modifiers.additive() {
                if !self.selection.toggle(id) {
                    // Shift-click on a selected node only deselects it.
                    return;
                }
            } else if !self.selection.contains(id) {
                self.selection.replace([id]);
            }
            self.enter(Mode::Dragging { last: world });
        } else if self.config.empty_click_pans {
            self.enter(Mode::Panning { last: screen });
        } else {
            if !modifiers.additive() {
                self.selection.clear();
            }
            self.enter(Mode::BoxSelecting {
                rect: SelectionRect::new(world),
                additive: modifiers.additive(),
            });
        }
    }

    /// Topmost resize handle of a selected node under `world`, primary first.
    fn handle_at(&self, world: Point) -> Option<(NodeId, ResizeHandle)> {
        let tolerance = self.camera.screen_len_to_world(self.config.handle_hit_tolerance);
        self.selection.current().iter().rev().find_map(|&id| {
            let node = self.store.find(id)?;
            hit_test_handle(node, world, tolerance).map(|handle| (id, handle))
        })
    }

    fn begin_creation(&mut self, kind: NodeKind, world: Point) {
        if kind == NodeKind::Text {
            let mut node = Node::of_kind(kind, world, self.config.text_size, &self.text_style);
            node.floor_size(self.config.min_node_size);
            let id = self.store.append(node);
            self.selection.replace([id]);
            self.tool = ToolKind::Select;
            log::debug!("placed text {id}");
            return;
        }
        let node = Node::of_kind(kind, world, Size::ZERO, &self.text_style);
        let id = self.store.append(node);
        self.enter(Mode::Drawing {
            id,
            kind,
            origin: world,
            moved: false,
        });
    }

    fn pen_press(&mut self, world: Point) {
        let scale = self.camera.scale();
        match self.pen.press(world, scale, self.config.pen_close_threshold) {
            PenPress::Added(index) => {
                log::trace!("pen anchor {index} at {world:?}");
                self.enter(Mode::PenHandle);
            }
            PenPress::Close => {
                self.finish_pen(true);
            }
        }
    }

    fn pointer_move(&mut self, screen: Point) {
        let world = self.camera.screen_to_world(screen);
        self.mode = match std::mem::take(&mut self.mode) {
            Mode::Idle => {
                if self.tool == ToolKind::Pen {
                    self.pen.hover(world);
                }
                Mode::Idle
            }
            Mode::Panning { last } => {
                self.camera.pan(screen - last);
                Mode::Panning { last: screen }
            }
            Mode::BoxSelecting { mut rect, additive } => {
                rect.current = world;
                Mode::BoxSelecting { rect, additive }
            }
            Mode::Drawing { id, kind, origin, .. } => {
                self.store.update(id, |node| node.extend_creation(origin, world));
                Mode::Drawing {
                    id,
                    kind,
                    origin,
                    moved: true,
                }
            }
            Mode::Resizing {
                id,
                handle,
                start,
                press,
            } => {
                let result = apply_resize(&start, handle, world - press, self.resize_rules());
                self.store.update(id, |node| result.apply(node));
                log::trace!("resize {handle} {}x{}", result.width, result.height);
                Mode::Resizing {
                    id,
                    handle,
                    start,
                    press,
                }
            }
            Mode::Dragging { last } => {
                let delta = world - last;
                self.store
                    .update_many(self.selection.current(), |node| node.translate(delta));
                Mode::Dragging { last: world }
            }
            Mode::PenHandle => {
                self.pen.drag(world);
                Mode::PenHandle
            }
        };
    }

    /// Finish the active interaction. `modifiers` is `None` when the pointer
    /// left the surface.
    fn pointer_up(&mut self, modifiers: Option<Modifiers>) {
        let mode = std::mem::take(&mut self.mode);
        if !mode.is_idle() {
            log::debug!("{} -> idle", mode.name());
        }
        let min = self.config.min_node_size;
        match mode {
            Mode::Idle | Mode::Panning { .. } | Mode::Dragging { .. } => {}
            Mode::BoxSelecting { rect, additive } => {
                let additive = modifiers.map_or(additive, |m| m.additive());
                let hits = self.store.nodes_in_rect(rect.to_rect());
                log::debug!("box selected {} nodes", hits.len());
                if additive {
                    self.selection.extend(hits);
                } else {
                    self.selection.replace(hits);
                }
            }
            Mode::Drawing { id, kind, moved, .. } => {
                let default_size = match kind {
                    NodeKind::Sticky => Some(self.config.sticky_size),
                    k if k.shape_kind().is_some() => Some(self.config.shape_size),
                    _ => None,
                };
                let committed = self.store.update(id, |node| {
                    match (moved, default_size) {
                        (false, Some(size)) => {
                            node.width = size.width;
                            node.height = size.height;
                        }
                        _ => node.normalize_stroke(),
                    }
                    node.floor_size(min);
                });
                // Nodes from a tool that stays active are left unselected.
                if committed && moved && !self.tool.is_sticky() {
                    self.selection.replace([id]);
                    self.tool = ToolKind::Select;
                }
            }
            Mode::Resizing { id, .. } => {
                self.store.update(id, |node| node.floor_size(min));
            }
            Mode::PenHandle => self.pen.release(),
        }
    }

    /// Handle a key press. Returns true if the engine consumed it.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Delete | Key::Backspace => {
                if self.text_focus {
                    return false;
                }
                !self.delete_selected().is_empty()
            }
            Key::Escape => {
                if self.pen.is_empty() {
                    return false;
                }
                log::debug!("pen path cancelled");
                self.pen.cancel();
                if self.mode == Mode::PenHandle {
                    self.mode = Mode::Idle;
                }
                true
            }
            Key::Enter => self.pen.len() >= 2 && self.finish_pen_path().is_some(),
        }
    }

    /// Remove every selected node and clear the selection.
    pub fn delete_selected(&mut self) -> Vec<Node> {
        let removed = self.store.remove(self.selection.current());
        self.selection.clear();
        if !removed.is_empty() {
            log::debug!("deleted {} nodes", removed.len());
        }
        removed
    }

    /// Finish the in-progress pen path as an open path.
    pub fn finish_pen_path(&mut self) -> Option<NodeId> {
        self.finish_pen(false)
    }

    fn finish_pen(&mut self, closed: bool) -> Option<NodeId> {
        if self.mode == Mode::PenHandle {
            self.mode = Mode::Idle;
        }
        let count = self.pen.len();
        let Some(baked) = self.pen.finish(closed) else {
            log::debug!("discarded pen path with {count} points");
            return None;
        };
        let id = self.store.append(baked.into_node());
        self.selection.replace([id]);
        log::debug!("pen path {id} finished (closed: {closed})");
        Some(id)
    }

    /// Place an image centered on a world point.
    pub fn place_image(&mut self, src: impl Into<String>, center: Point, size: Size) -> NodeId {
        let origin = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        let mut node = Node::image(src, origin, size);
        node.floor_size(self.config.min_node_size);
        let id = self.store.append(node);
        self.selection.replace([id]);
        id
    }

    /// Patch one node; geometry is floored to the minimum node size.
    pub fn patch(&mut self, id: NodeId, patch: &NodePatch) -> bool {
        self.store.patch(id, patch, self.config.min_node_size)
    }

    /// Patch every selected node. Returns how many were patched.
    pub fn patch_selected(&mut self, patch: &NodePatch) -> usize {
        self.store
            .patch_many(self.selection.current(), patch, self.config.min_node_size)
    }

    /// Lay generated suggestions out below `source` and append them.
    /// Returns the new ids, or nothing if `source` is gone.
    pub fn expand_suggestions(&mut self, source: NodeId, suggestions: &[Suggestion]) -> Vec<NodeId> {
        let Some(source) = self.store.find(source) else {
            return Vec::new();
        };
        let config = &self.config;
        let nodes = layout_suggestions(
            source,
            suggestions,
            config.suggestion_radius,
            config.suggestion_flatten,
            config.min_node_size,
            |kind| match kind {
                NodeKind::Sticky => config.sticky_size,
                NodeKind::Text => config.text_size,
                _ => config.shape_size,
            },
            &self.text_style,
        );
        nodes.into_iter().map(|n| self.store.append(n)).collect()
    }
}
