//! Editor root.
//!
//! `LayoutEditor` exclusively owns the tree. Panes and splits never mutate
//! it: interactions become protocol messages, the messages are routed to
//! the root, and the root commits the resulting tree and notifies its
//! [`ChangeSink`] exactly once per committed change.
//!
//! The one piece of interaction state lives here too: at most one
//! [`ActiveResize`], holding the split being dragged, its pending ratio and
//! the pointer subscription for the duration of the drag.

use super::pointer::{ListenerGauge, PointerSubscription};
use crate::geometry::{collapse_survivor, frame_of, pending_ratio, Frame, ResizeFrame, ResizeSettings};
use crate::model::{Axis, ContentRef, IdGenerator, LayoutNode, NodeId, Ratio};
use crate::protocol::{dispatch, dispatch_intent, Edge, LeafIntent, Msg, RootOutcome};
use tracing::{debug, info};

/// Receiver of committed layouts.
pub trait ChangeSink {
    /// Called once per committed structural change with the new tree.
    fn layout_changed(&mut self, next: &LayoutNode);

    /// Short status for the host to display, e.g. the last save result.
    fn status(&self) -> Option<String> {
        None
    }
}

impl<F> ChangeSink for F
where
    F: FnMut(&LayoutNode),
{
    fn layout_changed(&mut self, next: &LayoutNode) {
        self(next)
    }
}

/// The split currently being dragged.
#[derive(Debug)]
pub struct ActiveResize {
    node: NodeId,
    axis: Axis,
    committed: Ratio,
    pending: Ratio,
    _subscription: PointerSubscription,
}

impl ActiveResize {
    /// Split being resized.
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Axis of that split.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Ratio the split had when the drag began.
    pub fn committed(&self) -> Ratio {
        self.committed
    }

    /// Live ratio, not yet written to the tree.
    pub fn pending(&self) -> Ratio {
        self.pending
    }
}

/// Owner of the layout tree and the only place it changes.
pub struct LayoutEditor<S: ChangeSink> {
    tree: LayoutNode,
    sink: S,
    ids: Box<dyn IdGenerator>,
    settings: ResizeSettings,
    container: Frame,
    read_only: bool,
    active: Option<ActiveResize>,
    pointer: ListenerGauge,
    revision: u64,
}

impl<S: ChangeSink> LayoutEditor<S> {
    /// Editor over `layout`, or over a fresh leaf when there is none.
    pub fn new(layout: Option<LayoutNode>, sink: S, mut ids: Box<dyn IdGenerator>) -> Self {
        let tree = layout.unwrap_or_else(|| LayoutNode::new_leaf(ids.as_mut()));
        Self {
            tree,
            sink,
            ids,
            settings: ResizeSettings::default(),
            container: Frame::default(),
            read_only: false,
            active: None,
            pointer: ListenerGauge::new(),
            revision: 0,
        }
    }

    /// Builder: resize engine settings.
    pub fn with_settings(mut self, settings: ResizeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: read-only mode.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    // ===== Accessors =====

    /// Current committed tree.
    pub fn tree(&self) -> &LayoutNode {
        &self.tree
    }

    /// Number of committed changes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Resize engine settings.
    pub fn settings(&self) -> &ResizeSettings {
        &self.settings
    }

    /// Region the tree is laid out in.
    pub fn container(&self) -> Frame {
        self.container
    }

    /// Update the region the tree is laid out in.
    pub fn set_container(&mut self, container: Frame) {
        self.container = container;
    }

    /// True when every interaction is suppressed.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The resize in progress, if any.
    pub fn active_resize(&self) -> Option<&ActiveResize> {
        self.active.as_ref()
    }

    /// Pending ratio of the active split, for rendering.
    pub fn pending_override(&self) -> Option<(&NodeId, Ratio)> {
        self.active.as_ref().map(|a| (&a.node, a.pending))
    }

    /// True while the host should forward pointer moves and releases.
    pub fn is_tracking_pointer(&self) -> bool {
        self.active.is_some()
    }

    /// Gauge of live pointer subscriptions; survives the editor.
    pub fn pointer_gauge(&self) -> ListenerGauge {
        self.pointer.clone()
    }

    /// The change sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The change sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ===== Interactions =====

    /// The edge handle `edge` of pane `leaf` was pressed.
    pub fn grab_edge(&mut self, leaf: &NodeId, edge: Edge) {
        self.leaf_intent(leaf, LeafIntent::GrabEdge(edge));
    }

    /// The delete button of pane `leaf` was pressed.
    pub fn delete_view(&mut self, leaf: &NodeId) {
        self.leaf_intent(leaf, LeafIntent::Delete);
    }

    /// Place `content` in pane `leaf`, or clear it.
    pub fn assign_content(&mut self, leaf: &NodeId, content: Option<ContentRef>) {
        self.leaf_intent(leaf, LeafIntent::SetContent(content));
    }

    /// Replace the layout with a single empty pane.
    pub fn reset(&mut self) {
        if !self.accepts_edits("reset") {
            return;
        }
        if self.tree.is_leaf() && self.tree.content().is_none() {
            debug!("Reset of an empty layout ignored");
            return;
        }
        let fresh = LayoutNode::new_leaf(self.ids.as_mut());
        self.commit(fresh, "reset");
    }

    /// Make `node` the active resize target.
    ///
    /// Ignored while another resize is active or when `node` is not a split.
    pub fn resize_start(&mut self, node: &NodeId) {
        if self.read_only {
            return;
        }
        if let Some(active) = &self.active {
            debug!(requested = %node, active = %active.node, "ResizeStart rejected, resize already active");
            return;
        }
        let Some(split) = self.tree.find(node) else {
            debug!(%node, "ResizeStart for unknown node ignored");
            return;
        };
        let (Some(axis), Some(ratio)) = (split.axis(), split.ratio()) else {
            debug!(%node, "ResizeStart for a pane ignored");
            return;
        };
        debug!(%node, ?axis, %ratio, "Resize started");
        self.active = Some(ActiveResize {
            node: node.clone(),
            axis,
            committed: ratio,
            pending: ratio,
            _subscription: self.pointer.subscribe(),
        });
    }

    /// Pointer moved to (`x`, `y`) during a resize.
    pub fn resize_move(&mut self, x: f64, y: f64) {
        let frame = match &self.active {
            Some(active) => match self.settings.frame {
                ResizeFrame::Editor => Some(self.container),
                ResizeFrame::Split => frame_of(&self.tree, &active.node, &self.container),
            },
            None => return,
        };
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Some(ratio) = frame
            .and_then(|frame| pending_ratio(active.axis, x, y, &frame, &self.settings))
        else {
            return;
        };
        active.pending = ratio;
    }

    /// Pointer released: commit the pending ratio, or collapse the split if
    /// the ratio left one child without area.
    pub fn resize_stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let ActiveResize {
            node,
            committed,
            pending,
            ..
        } = active;

        let Some(split) = self.tree.find(&node) else {
            return;
        };

        let replacement = match collapse_survivor(pending, self.settings.collapse_epsilon) {
            Some(slot) => match split.child(slot) {
                Some(survivor) => {
                    debug!(%node, ?slot, "Split collapsed on release");
                    survivor.clone()
                }
                None => return,
            },
            None if pending == committed => {
                debug!(%node, "Resize released without change");
                return;
            }
            None => split.with_ratio(pending),
        };

        let msg = Msg::UpdateSubtree {
            child: node.clone(),
            subtree: replacement,
            resize: None,
        };
        let outcome = dispatch(&self.tree, &node, msg, self.ids.as_mut());
        self.apply(outcome, "resize");
    }

    /// Handle one protocol message addressed to the root.
    ///
    /// `GrabEdge`, `DeleteView` and `UpdateSubtree` are routed from the
    /// node they name; the resize messages act on the active resize.
    pub fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::GrabEdge { source, edge } => self.grab_edge(&source, edge),
            Msg::DeleteView { target } => self.delete_view(&target),
            Msg::ResizeStart { node } => self.resize_start(&node),
            Msg::ResizeMove { x, y } => self.resize_move(x, y),
            Msg::ResizeStop => self.resize_stop(),
            Msg::UpdateSubtree { ref child, .. } => {
                if !self.accepts_edits("update") {
                    return;
                }
                let origin = child.clone();
                let outcome = dispatch(&self.tree, &origin, msg, self.ids.as_mut());
                self.apply(outcome, "update");
            }
        }
    }

    // ===== Internals =====

    fn accepts_edits(&self, what: &str) -> bool {
        if self.read_only {
            return false;
        }
        if let Some(active) = &self.active {
            debug!(what, active = %active.node, "Edit rejected while resizing");
            return false;
        }
        true
    }

    fn leaf_intent(&mut self, leaf: &NodeId, intent: LeafIntent) {
        if !self.accepts_edits("intent") {
            return;
        }
        let outcome = dispatch_intent(&self.tree, leaf, intent, self.ids.as_mut());
        self.apply(outcome, "edit");
    }

    fn apply(&mut self, outcome: RootOutcome, reason: &'static str) {
        match outcome {
            RootOutcome::Replace { tree, resize } => {
                self.commit(tree, reason);
                if let Some(node) = resize {
                    self.resize_start(&node);
                }
            }
            RootOutcome::BeginResize(node) => self.resize_start(&node),
            RootOutcome::Ignored => {}
        }
    }

    fn commit(&mut self, tree: LayoutNode, reason: &'static str) {
        self.tree = tree;
        self.revision += 1;
        info!(
            reason,
            revision = self.revision,
            leaves = self.tree.count_leaves(),
            "Layout committed"
        );
        self.sink.layout_changed(&self.tree);
    }
}

impl<S: ChangeSink> std::fmt::Debug for LayoutEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEditor")
            .field("tree", &self.tree)
            .field("active", &self.active)
            .field("read_only", &self.read_only)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
