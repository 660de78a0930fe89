//! Screen - tree root, node arena, and per-screen state.
//!
//! A [`Screen`] owns every node of one GUI screen, the id registry, the focus
//! reference, the "processed by a floating node" flag, and the outbox of
//! [`ScreenEvent`]s that controllers push for the host.
//!
//! Behavior is split across modules the same way the state is:
//! - tree construction, disposal, values, ticking - here
//! - layout - [`crate::layout::solver`]
//! - visibility - [`crate::state::visibility`]
//! - pointer / keyboard / focus / scroll - [`crate::state`]
//! - render traversal - [`crate::pipeline`]
//!
//! # Example
//!
//! ```ignore
//! use spark_gui::{Screen, NodeDesc, Arrangement, Constraint};
//!
//! let mut screen = Screen::new("editor");
//! screen.set_screen_size(1024, 768);
//! let root = screen.root();
//! screen.add_sub_node(root, NodeDesc::layout("main", Arrangement::Vertical))?;
//! screen.layout();
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;

use tracing::{debug, warn};

use super::node::{ControllerSlot, Node, NodeDesc, NodeId, NodeKind};
use super::registry::NodeArena;
use crate::controllers::{Controller, default_controller};
use crate::error::{GuiError, Result};
use crate::layout::RequestedConstraints;

// =============================================================================
// Options
// =============================================================================

/// Default pixels scrolled per wheel unit.
pub const DEFAULT_WHEEL_SCROLL_STEP: f32 = 1.0;

/// Per-screen tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenOptions {
    /// Pixels scrolled per mouse wheel unit.
    pub wheel_scroll_step: f32,
    /// Unprocessed Tab / Shift+Tab presses cycle focus.
    pub focus_cycling: bool,
    /// Elements maintain `mouseover` / `click` active conditions during dispatch.
    pub track_pointer_conditions: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            wheel_scroll_step: DEFAULT_WHEEL_SCROLL_STEP,
            focus_cycling: true,
            track_pointer_conditions: true,
        }
    }
}

impl ScreenOptions {
    pub fn with_wheel_scroll_step(mut self, step: f32) -> Self {
        self.wheel_scroll_step = step;
        self
    }

    pub fn with_focus_cycling(mut self, enabled: bool) -> Self {
        self.focus_cycling = enabled;
        self
    }

    pub fn with_pointer_conditions(mut self, enabled: bool) -> Self {
        self.track_pointer_conditions = enabled;
        self
    }
}

// =============================================================================
// Screen events
// =============================================================================

/// Kind of an action reported by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// The element was activated (click release, space press).
    Performed,
    /// The element finished processing an action.
    Processed,
}

/// Notification collected for the host, drained with [`Screen::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Action { node: NodeId, kind: ActionKind },
    ValueChanged { node: NodeId },
}

// =============================================================================
// Screen
// =============================================================================

/// Root of a node tree.
pub struct Screen {
    pub(crate) arena: NodeArena,
    pub(crate) root: NodeId,
    pub(crate) options: ScreenOptions,
    pub(crate) focused: Option<NodeId>,
    pub(crate) pending_focus: Vec<(NodeId, bool)>,
    pub(crate) floating_processed: bool,
    pub(crate) floating_nodes: Vec<NodeId>,
    pub(crate) conditions_dirty: bool,
    events: Vec<ScreenEvent>,
}

impl Screen {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_options(id, ScreenOptions::default())
    }

    pub fn with_options(id: impl Into<String>, options: ScreenOptions) -> Self {
        let mut arena = NodeArena::default();
        let (node, _, _) = Node::from_desc(NodeDesc::new(id, NodeKind::Screen), None);
        let id = node.id.clone();
        let root = arena.insert(node);
        arena.register(&id, root);
        Self {
            arena,
            root,
            options,
            focused: None,
            pending_focus: Vec::new(),
            floating_processed: false,
            floating_nodes: Vec::new(),
            conditions_dirty: true,
            events: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        self.arena.get(self.root).map(Node::id).unwrap_or_default()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ScreenOptions) {
        self.options = options;
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<NodeId> {
        self.arena.lookup(id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(Node::parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.arena.get(id).map(Node::children).unwrap_or_default()
    }

    /// Set the screen size in pixels. Takes effect on the next layout.
    pub fn set_screen_size(&mut self, width: i32, height: i32) {
        if let Some(root) = self.arena.get_mut(self.root) {
            root.requested = RequestedConstraints::fixed(width, height);
            root.computed.width = width;
            root.computed.height = height;
        }
    }

    pub fn screen_width(&self) -> i32 {
        self.arena.get(self.root).map_or(0, |root| root.computed.width)
    }

    pub fn screen_height(&self) -> i32 {
        self.arena.get(self.root).map_or(0, |root| root.computed.height)
    }

    /// `id` itself followed by all its descendants, in tree order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.arena.get(current) else { continue };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(node) = current {
            out.push(node);
            current = self.parent_of(node);
        }
        out
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Index an attached node under its id.
    ///
    /// Fails (returns false) if another node is indexed under the same
    /// non-empty id. Empty ids always succeed and are not indexed.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        let Some(id) = self.arena.get(node).map(|n| n.id.clone()) else {
            return false;
        };
        if self.arena.lookup(&id) == Some(node) {
            return true;
        }
        self.arena.register(&id, node)
    }

    /// Drop `node` and its descendants from the id index. The nodes stay attached.
    pub fn remove_node(&mut self, node: NodeId) {
        for id in self.subtree(node) {
            if let Some(key) = self.arena.get(id).map(|n| n.id.clone()) {
                self.arena.unregister(&key, id);
            }
        }
    }

    /// Generate a node id that is unique within this screen.
    pub fn allocate_node_id(&mut self) -> String {
        let prefix = self.id().to_string();
        self.arena.allocate_id(&prefix)
    }

    // =========================================================================
    // Tree construction
    // =========================================================================

    /// Attach a node (and the children of its description) under `parent`.
    ///
    /// Controllers are initialized once their node's subtree is attached.
    /// Elements and scrollbars without an explicit controller get the default one.
    /// On failure nothing of `desc` stays attached.
    pub fn add_sub_node(&mut self, parent: NodeId, desc: NodeDesc) -> Result<NodeId> {
        let parent_node = self.arena.get(parent).ok_or(GuiError::UnknownNode(parent))?;
        if !parent_node.kind.is_parent() {
            return Err(GuiError::NotAParentNode(parent_node.id.clone()));
        }
        if let NodeKind::Scrollbar { content, .. } = desc.kind {
            if !self.arena.contains(content) {
                return Err(GuiError::UnknownNode(content));
            }
        }
        if !desc.id.is_empty() && self.arena.lookup(&desc.id).is_some() {
            return Err(GuiError::DuplicateNodeId {
                screen: self.id().to_string(),
                id: desc.id,
            });
        }

        let (node, controller, children) = Node::from_desc(desc, Some(parent));
        let controller = controller.or_else(|| default_controller(&node.kind));
        let key = node.id.clone();
        let kind = node.kind.type_name();
        let id = self.arena.insert(node);
        self.arena.register(&key, id);
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(id);
        }
        self.conditions_dirty = true;
        debug!(node = %key, kind, "node attached");

        for child in children {
            if let Err(err) = self.add_sub_node(id, child) {
                self.dispose_node(id);
                return Err(err);
            }
        }

        if let Some(controller) = controller {
            if let Some(node) = self.arena.get_mut(id) {
                node.controller = ControllerSlot::Present(controller);
            }
            self.with_controller(id, |controller, screen| controller.init(screen, id));
        }
        Ok(id)
    }

    /// Attach a controller to an existing node, replacing (and disposing) any previous one.
    pub fn set_controller(&mut self, node: NodeId, controller: impl Controller + 'static) -> Result<()> {
        let slot = self.arena.get_mut(node).ok_or(GuiError::UnknownNode(node))?;
        let previous = std::mem::replace(&mut slot.controller, ControllerSlot::Present(Box::new(controller)));
        if let ControllerSlot::Present(mut previous) = previous {
            previous.dispose(self, node);
        }
        self.with_controller(node, |controller, screen| controller.init(screen, node));
        Ok(())
    }

    /// Dispose every child of `parent` and reset its scroll offsets.
    pub fn clear_sub_nodes(&mut self, parent: NodeId) {
        let children = match self.arena.get_mut(parent) {
            Some(node) => {
                node.scroll_offset_x = 0.0;
                node.scroll_offset_y = 0.0;
                std::mem::take(&mut node.children)
            }
            None => return,
        };
        for child in children {
            self.dispose_subtree(child);
        }
        self.conditions_dirty = true;
    }

    /// Replace the children of `parent` with freshly attached descriptions.
    ///
    /// The subtree must be laid out again before the next render.
    pub fn replace_sub_nodes(
        &mut self,
        parent: NodeId,
        descs: impl IntoIterator<Item = NodeDesc>,
    ) -> Result<Vec<NodeId>> {
        self.clear_sub_nodes(parent);
        descs
            .into_iter()
            .map(|desc| self.add_sub_node(parent, desc))
            .collect()
    }

    // =========================================================================
    // Disposal
    // =========================================================================

    /// Dispose `node`, its descendants, and their controllers.
    ///
    /// Disposing the root disposes the whole tree but keeps the root itself.
    pub fn dispose_node(&mut self, node: NodeId) {
        if node == self.root {
            self.dispose();
            return;
        }
        if let Some(parent) = self.parent_of(node) {
            if let Some(parent) = self.arena.get_mut(parent) {
                parent.children.retain(|child| *child != node);
            }
        }
        self.dispose_subtree(node);
        self.conditions_dirty = true;
    }

    /// Dispose the whole tree below the root, and the root's controller.
    pub fn dispose(&mut self) {
        let root = self.root;
        self.clear_sub_nodes(root);
        self.dispose_controller(root);
        self.focused = None;
        self.pending_focus.clear();
        self.floating_nodes.clear();
        self.events.clear();
    }

    fn dispose_subtree(&mut self, node: NodeId) {
        for child in self.children_of(node).to_vec() {
            self.dispose_subtree(child);
        }
        self.dispose_controller(node);
        if self.focused == Some(node) {
            self.focused = None;
        }
        self.pending_focus.retain(|(pending, _)| *pending != node);
        if let Some(removed) = self.arena.remove(node) {
            self.arena.unregister(&removed.id, node);
            debug!(node = %removed.id, "node disposed");
        }
    }

    fn dispose_controller(&mut self, node: NodeId) {
        let slot = match self.arena.get_mut(node) {
            Some(n) => std::mem::replace(&mut n.controller, ControllerSlot::Empty),
            None => return,
        };
        match slot {
            ControllerSlot::Present(mut controller) => controller.dispose(self, node),
            ControllerSlot::InUse => {
                warn!(node = node.index(), "disposing node while its controller is running");
            }
            ControllerSlot::Empty => {}
        }
    }

    // =========================================================================
    // Controllers
    // =========================================================================

    /// Run `f` with the controller of `owner` moved out of the tree.
    ///
    /// Returns None if `owner` has no controller or its controller is already
    /// running further up the call stack.
    pub(crate) fn with_controller<R>(
        &mut self,
        owner: NodeId,
        f: impl FnOnce(&mut dyn Controller, &mut Screen) -> R,
    ) -> Option<R> {
        let node = self.arena.get_mut(owner)?;
        let mut controller = match std::mem::replace(&mut node.controller, ControllerSlot::InUse) {
            ControllerSlot::Present(controller) => controller,
            ControllerSlot::InUse => {
                warn!(node = %node.id, "controller re-entered, call skipped");
                return None;
            }
            ControllerSlot::Empty => {
                node.controller = ControllerSlot::Empty;
                return None;
            }
        };
        let result = f(controller.as_mut(), self);
        if let Some(node) = self.arena.get_mut(owner) {
            if matches!(node.controller, ControllerSlot::InUse) {
                node.controller = ControllerSlot::Present(controller);
            }
        }
        Some(result)
    }

    /// Read-only access to the controller of `owner`.
    pub fn controller(&self, owner: NodeId) -> Option<&dyn Controller> {
        match &self.arena.get(owner)?.controller {
            ControllerSlot::Present(controller) => Some(controller.as_ref()),
            _ => None,
        }
    }

    /// Nearest node carrying a controller, starting at `node` itself.
    pub fn controller_node_for(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.arena.get(id)?;
            if n.controller.is_attached() {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    /// Nodes carrying a controller below (and including) `from`, in tree order.
    pub(crate) fn controller_nodes(&self, from: NodeId, visible_only: bool) -> Vec<NodeId> {
        self.subtree(from)
            .into_iter()
            .filter(|id| {
                self.arena.get(*id).is_some_and(|n| {
                    n.controller.is_attached() && (!visible_only || n.conditions_met)
                })
            })
            .collect()
    }

    /// Call [`Controller::tick`] on every visible controller. Once per frame.
    pub fn tick(&mut self) {
        self.refresh_conditions();
        for owner in self.controller_nodes(self.root, true) {
            self.with_controller(owner, |controller, screen| controller.tick(screen, owner));
        }
        self.flush_focus_notifications();
    }

    // =========================================================================
    // Element state
    // =========================================================================

    /// Element name, if `node` is an element.
    pub fn element_name(&self, node: NodeId) -> Option<&str> {
        match &self.arena.get(node)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Element value attribute, if `node` is an element.
    pub fn element_value(&self, node: NodeId) -> Option<&str> {
        match &self.arena.get(node)?.kind {
            NodeKind::Element { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Values of all element controllers that expose one, keyed by element name.
    ///
    /// The first non-empty value per name wins.
    pub fn get_values(&self) -> HashMap<String, String> {
        let mut values: HashMap<String, String> = HashMap::new();
        for owner in self.controller_nodes(self.root, false) {
            let (Some(name), Some(controller)) = (self.element_name(owner), self.controller(owner))
            else {
                continue;
            };
            let Some(value) = controller.value() else { continue };
            match values.get(name) {
                Some(existing) if !existing.is_empty() => {}
                _ => {
                    values.insert(name.to_string(), value.to_string());
                }
            }
        }
        values
    }

    /// Push values into element controllers, matched by element name.
    pub fn set_values(&mut self, values: &HashMap<String, String>) {
        for owner in self.controller_nodes(self.root, false) {
            let Some(value) = self.element_name(owner).and_then(|name| values.get(name)).cloned()
            else {
                continue;
            };
            self.with_controller(owner, |controller, screen| {
                if controller.value().is_some() {
                    controller.set_value(screen, owner, &value);
                }
            });
        }
        self.flush_focus_notifications();
    }

    // =========================================================================
    // Outbox
    // =========================================================================

    pub fn delegate_action_performed(&mut self, node: NodeId, kind: ActionKind) {
        self.events.push(ScreenEvent::Action { node, kind });
    }

    pub fn delegate_value_changed(&mut self, node: NodeId) {
        self.events.push(ScreenEvent::ValueChanged { node });
    }

    /// Take all collected screen events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ScreenEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// One line per node: kind, id, requested and computed constraints.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else { continue };
            let r = &node.requested;
            let c = &node.computed;
            let _ = writeln!(
                out,
                "{:indent$}{} '{}' requested=[{}, {}, {}, {}] computed=[{}, {}, {}x{}]{}",
                "",
                node.kind.type_name(),
                node.id,
                r.left,
                r.top,
                r.width,
                r.height,
                c.x(),
                c.y(),
                c.width,
                c.height,
                if node.conditions_met { "" } else { " hidden" },
                indent = depth * 2,
            );
            stack.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::{CheckboxController, ElementController};
    use crate::types::Arrangement;

    fn setup() -> (Screen, NodeId) {
        let mut screen = Screen::new("screen");
        screen.set_screen_size(200, 100);
        let root = screen.root();
        let panel = screen
            .add_sub_node(root, NodeDesc::layout("panel", Arrangement::Vertical))
            .unwrap();
        (screen, panel)
    }

    #[test]
    fn test_root_is_registered() {
        let (screen, _) = setup();
        assert_eq!(screen.get_node_by_id("screen"), Some(screen.root()));
        assert_eq!(screen.screen_width(), 200);
        assert_eq!(screen.screen_height(), 100);
    }

    #[test]
    fn test_add_sub_node_registers_children() {
        let (mut screen, panel) = setup();
        let id = screen
            .add_sub_node(
                panel,
                NodeDesc::element("row", "row").with_child(NodeDesc::space("gap")),
            )
            .unwrap();
        assert_eq!(screen.get_node_by_id("row"), Some(id));
        let gap = screen.get_node_by_id("gap").unwrap();
        assert_eq!(screen.parent_of(gap), Some(id));
        assert_eq!(screen.children_of(panel), &[id]);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let (mut screen, panel) = setup();
        let count = screen.node_count();
        let err = screen
            .add_sub_node(panel, NodeDesc::space("panel"))
            .unwrap_err();
        assert_eq!(
            err,
            GuiError::DuplicateNodeId {
                screen: "screen".into(),
                id: "panel".into()
            }
        );
        assert_eq!(screen.node_count(), count);
    }

    #[test]
    fn test_duplicate_in_nested_child_rolls_back() {
        let (mut screen, panel) = setup();
        let count = screen.node_count();
        let desc = NodeDesc::element("outer", "outer").with_child(NodeDesc::space("panel"));
        assert!(screen.add_sub_node(panel, desc).is_err());
        assert_eq!(screen.node_count(), count);
        assert_eq!(screen.get_node_by_id("outer"), None);
        assert!(screen.children_of(panel).is_empty());
    }

    #[test]
    fn test_empty_ids_are_not_indexed() {
        let (mut screen, panel) = setup();
        let a = screen.add_sub_node(panel, NodeDesc::space("")).unwrap();
        let b = screen.add_sub_node(panel, NodeDesc::space("")).unwrap();
        assert_ne!(a, b);
        assert_eq!(screen.get_node_by_id(""), None);
        assert!(screen.add_node(a));
    }

    #[test]
    fn test_add_node_and_remove_node() {
        let (mut screen, panel) = setup();
        let gap = screen.add_sub_node(panel, NodeDesc::space("gap")).unwrap();
        screen.remove_node(panel);
        assert_eq!(screen.get_node_by_id("panel"), None);
        assert_eq!(screen.get_node_by_id("gap"), None);
        assert!(screen.contains(gap));

        assert!(screen.add_node(gap));
        assert_eq!(screen.get_node_by_id("gap"), Some(gap));
        // Already indexed under the same handle
        assert!(screen.add_node(gap));
    }

    #[test]
    fn test_add_to_leaf_fails() {
        let (mut screen, panel) = setup();
        let gap = screen.add_sub_node(panel, NodeDesc::space("gap")).unwrap();
        assert_eq!(
            screen.add_sub_node(gap, NodeDesc::space("x")).unwrap_err(),
            GuiError::NotAParentNode("gap".into())
        );
    }

    #[test]
    fn test_dispose_node_cascades() {
        let (mut screen, panel) = setup();
        let row = screen
            .add_sub_node(panel, NodeDesc::element("row", "row").with_child(NodeDesc::space("gap")))
            .unwrap();
        let gap = screen.get_node_by_id("gap").unwrap();
        screen.dispose_node(row);
        assert!(!screen.contains(row));
        assert!(!screen.contains(gap));
        assert_eq!(screen.get_node_by_id("gap"), None);
        assert!(screen.children_of(panel).is_empty());
    }

    #[test]
    fn test_dispose_clears_focus() {
        let (mut screen, panel) = setup();
        let button = screen
            .add_sub_node(
                panel,
                NodeDesc::element("ok", "ok").focusable(true).with_controller(ElementController::new()),
            )
            .unwrap();
        screen.set_focused_node(button);
        screen.dispose();
        assert_eq!(screen.focused_node(), None);
        assert_eq!(screen.node_count(), 1);
    }

    #[test]
    fn test_replace_sub_nodes() {
        let (mut screen, panel) = setup();
        screen.add_sub_node(panel, NodeDesc::space("old")).unwrap();
        let ids = screen
            .replace_sub_nodes(panel, vec![NodeDesc::space("a"), NodeDesc::space("b")])
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(screen.get_node_by_id("old"), None);
        assert_eq!(screen.children_of(panel), ids.as_slice());
    }

    #[test]
    fn test_allocate_node_id_is_unique() {
        let (mut screen, _) = setup();
        let a = screen.allocate_node_id();
        let b = screen.allocate_node_id();
        assert_ne!(a, b);
        assert!(a.starts_with("screen"));
    }

    #[test]
    fn test_values_roundtrip_by_name() {
        let (mut screen, panel) = setup();
        screen
            .add_sub_node(
                panel,
                NodeDesc::element("agree", "agree").with_controller(CheckboxController::new(false)),
            )
            .unwrap();
        assert_eq!(screen.get_values().get("agree").map(String::as_str), Some(""));

        let mut values = HashMap::new();
        values.insert("agree".to_string(), "1".to_string());
        screen.set_values(&values);
        assert_eq!(screen.get_values().get("agree").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_drain_events() {
        let (mut screen, panel) = setup();
        screen.delegate_action_performed(panel, ActionKind::Performed);
        screen.delegate_value_changed(panel);
        let events = screen.drain_events();
        assert_eq!(
            events,
            vec![
                ScreenEvent::Action { node: panel, kind: ActionKind::Performed },
                ScreenEvent::ValueChanged { node: panel },
            ]
        );
        assert!(screen.drain_events().is_empty());
    }

    #[test]
    fn test_dump_tree() {
        let (mut screen, panel) = setup();
        screen.add_sub_node(panel, NodeDesc::space("gap")).unwrap();
        screen.layout();
        let dump = screen.dump_tree();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("screen 'screen'"));
        assert!(lines[1].starts_with("  layout 'panel'"));
        assert!(lines[2].starts_with("    space 'gap'"));
    }
}
