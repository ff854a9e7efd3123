//! Protocol vocabulary: the messages a node receives from its descendants.

use crate::model::{Axis, ContentRef, LayoutNode, NodeId, Slot};

/// Side of a pane whose border was grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Upper border.
    Top,
    /// Right border.
    Right,
    /// Lower border.
    Bottom,
    /// Left border.
    Left,
}

impl Edge {
    /// All edges, clockwise from the top.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Axis of the split a grab on this edge would create or resize.
    ///
    /// Left and right borders separate panes side by side (`VSplit`).
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Vertical,
            Self::Top | Self::Bottom => Axis::Horizontal,
        }
    }

    /// True for the right and bottom borders.
    pub fn is_trailing(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    /// Slot whose child has this edge on the shared boundary of its parent.
    ///
    /// A first child meets its sibling along its trailing edge, a second
    /// child along its leading edge.
    pub fn inner_slot(self) -> Slot {
        if self.is_trailing() {
            Slot::First
        } else {
            Slot::Second
        }
    }
}

/// A message travelling up the tree, or addressed to the editor root.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// An edge handle of `source` was pressed.
    GrabEdge {
        /// Node the grab currently speaks for (the leaf, then forwarding ancestors).
        source: NodeId,
        /// Grabbed edge.
        edge: Edge,
    },
    /// Make `node` the active resize target.
    ResizeStart {
        /// Split to resize.
        node: NodeId,
    },
    /// Pointer moved while a resize is active.
    ResizeMove {
        /// Pointer column in editor coordinates.
        x: f64,
        /// Pointer row in editor coordinates.
        y: f64,
    },
    /// Pointer released while a resize is active.
    ResizeStop,
    /// Remove the leaf `target`.
    DeleteView {
        /// Leaf to remove.
        target: NodeId,
    },
    /// Replace the node `child` with `subtree`.
    UpdateSubtree {
        /// Id of the node being replaced.
        child: NodeId,
        /// Replacement.
        subtree: LayoutNode,
        /// Split to enter resize mode on once the change is committed.
        resize: Option<NodeId>,
    },
}

impl Msg {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GrabEdge { .. } => "GrabEdge",
            Self::ResizeStart { .. } => "ResizeStart",
            Self::ResizeMove { .. } => "ResizeMove",
            Self::ResizeStop => "ResizeStop",
            Self::DeleteView { .. } => "DeleteView",
            Self::UpdateSubtree { .. } => "UpdateSubtree",
        }
    }
}

/// Interaction raised on a leaf, before it becomes a protocol message.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafIntent {
    /// Edge handle pressed.
    GrabEdge(Edge),
    /// Delete button pressed.
    Delete,
    /// Place content in the pane, or clear it.
    SetContent(Option<ContentRef>),
}
