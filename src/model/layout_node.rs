//! Recursive split-pane layout tree.
//!
//! A layout is a strict binary tree: leaves are panes, inner nodes divide
//! their area in two along one axis. All operations here are pure; edits
//! produce new trees and never mutate shared nodes.

use super::identifiers::{IdGenerator, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Ratio =====

/// Committed split position in percent, always within `[0, 100]`.
///
/// For a `VSplit` it is the left child's share of the width, for an
/// `HSplit` the top child's share of the height.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Ratio(f64);

impl Ratio {
    /// First child degenerate (zero size).
    pub const MIN: Ratio = Ratio(0.0);
    /// Even split.
    pub const HALF: Ratio = Ratio(50.0);
    /// Second child degenerate (zero size).
    pub const MAX: Ratio = Ratio(100.0);

    /// Clamp a raw percentage into range. NaN maps to an even split.
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            Self::HALF
        } else {
            Self(percent.clamp(0.0, 100.0))
        }
    }

    /// Raw percentage.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Share left for the second child.
    pub fn complement(self) -> Self {
        Self(100.0 - self.0)
    }
}

impl From<f64> for Ratio {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ===== ContentRef =====

/// Reference to content placed in a pane, typically a file URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Wrap a content reference.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Axis / Slot =====

/// Split orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right pair divided by a vertical boundary (`VSplit`).
    Vertical,
    /// Top/bottom pair divided by a horizontal boundary (`HSplit`).
    Horizontal,
}

impl Axis {
    /// The other axis.
    pub fn opposite(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// Position of a child inside its parent split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Left child of a `VSplit`, top child of an `HSplit`.
    First,
    /// Right child of a `VSplit`, bottom child of an `HSplit`.
    Second,
}

impl Slot {
    /// The sibling position.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

// ===== LayoutNode =====

/// One node of the layout tree.
///
/// The serialized form is the persisted record shape: a `type` tag plus the
/// variant's fields. Records written by the legacy editor (`v-node`/`h-node`
/// with `val`) are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayoutNode {
    /// Terminal pane.
    #[serde(rename = "leaf")]
    Leaf {
        /// Node id.
        id: NodeId,
        /// Content placed in the pane, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<ContentRef>,
    },
    /// Left/right pair.
    #[serde(rename = "vsplit", alias = "v-node")]
    VSplit {
        /// Node id.
        id: NodeId,
        /// Left child's share of the width.
        #[serde(alias = "val")]
        ratio: Ratio,
        /// Left child.
        left: Box<LayoutNode>,
        /// Right child.
        right: Box<LayoutNode>,
    },
    /// Top/bottom pair.
    #[serde(rename = "hsplit", alias = "h-node")]
    HSplit {
        /// Node id.
        id: NodeId,
        /// Top child's share of the height.
        #[serde(alias = "val")]
        ratio: Ratio,
        /// Top child.
        top: Box<LayoutNode>,
        /// Bottom child.
        bottom: Box<LayoutNode>,
    },
}

impl LayoutNode {
    /// Fresh empty leaf with a newly generated id.
    pub fn new_leaf(ids: &mut dyn IdGenerator) -> Self {
        Self::Leaf {
            id: ids.next_id(),
            content: None,
        }
    }

    /// Leaf with an explicit id.
    pub fn leaf(id: NodeId, content: Option<ContentRef>) -> Self {
        Self::Leaf { id, content }
    }

    /// Split along `axis` with `first`/`second` in left/top, right/bottom order.
    pub fn split(
        axis: Axis,
        id: NodeId,
        ratio: Ratio,
        first: LayoutNode,
        second: LayoutNode,
    ) -> Self {
        match axis {
            Axis::Vertical => Self::VSplit {
                id,
                ratio,
                left: Box::new(first),
                right: Box::new(second),
            },
            Axis::Horizontal => Self::HSplit {
                id,
                ratio,
                top: Box::new(first),
                bottom: Box::new(second),
            },
        }
    }

    /// This node's id.
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Leaf { id, .. } | Self::VSplit { id, .. } | Self::HSplit { id, .. } => id,
        }
    }

    /// True for a terminal pane.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// True for a left/right split.
    pub fn is_vsplit(&self) -> bool {
        matches!(self, Self::VSplit { .. })
    }

    /// True for a top/bottom split.
    pub fn is_hsplit(&self) -> bool {
        matches!(self, Self::HSplit { .. })
    }

    /// Split axis, `None` for leaves.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Self::Leaf { .. } => None,
            Self::VSplit { .. } => Some(Axis::Vertical),
            Self::HSplit { .. } => Some(Axis::Horizontal),
        }
    }

    /// Committed ratio, `None` for leaves.
    pub fn ratio(&self) -> Option<Ratio> {
        match self {
            Self::Leaf { .. } => None,
            Self::VSplit { ratio, .. } | Self::HSplit { ratio, .. } => Some(*ratio),
        }
    }

    /// Placed content, `None` for splits and empty leaves.
    pub fn content(&self) -> Option<&ContentRef> {
        match self {
            Self::Leaf { content, .. } => content.as_ref(),
            _ => None,
        }
    }

    /// Both children in first/second order, `None` for leaves.
    pub fn children(&self) -> Option<(&LayoutNode, &LayoutNode)> {
        match self {
            Self::Leaf { .. } => None,
            Self::VSplit { left, right, .. } => Some((left, right)),
            Self::HSplit { top, bottom, .. } => Some((top, bottom)),
        }
    }

    /// Child at `slot`, `None` for leaves.
    pub fn child(&self, slot: Slot) -> Option<&LayoutNode> {
        self.children().map(|(first, second)| match slot {
            Slot::First => first,
            Slot::Second => second,
        })
    }

    /// Which direct child carries `id`.
    pub fn slot_of(&self, id: &NodeId) -> Option<Slot> {
        let (first, second) = self.children()?;
        if first.id() == id {
            Some(Slot::First)
        } else if second.id() == id {
            Some(Slot::Second)
        } else {
            None
        }
    }

    /// Copy of this split with the child at `slot` replaced.
    ///
    /// Returns `None` for leaves.
    pub fn with_child(&self, slot: Slot, replacement: LayoutNode) -> Option<LayoutNode> {
        let axis = self.axis()?;
        let ratio = self.ratio()?;
        let (first, second) = self.children()?;
        let (first, second) = match slot {
            Slot::First => (replacement, second.clone()),
            Slot::Second => (first.clone(), replacement),
        };
        Some(Self::split(axis, self.id().clone(), ratio, first, second))
    }

    /// Copy of this split with a new committed ratio. Leaves are returned as is.
    pub fn with_ratio(&self, ratio: Ratio) -> LayoutNode {
        let mut next = self.clone();
        if let Self::VSplit { ratio: r, .. } | Self::HSplit { ratio: r, .. } = &mut next {
            *r = ratio;
        }
        next
    }

    /// Copy of this leaf holding `content`. Splits are returned as is.
    pub fn with_content(&self, content: Option<ContentRef>) -> LayoutNode {
        match self {
            Self::Leaf { id, .. } => Self::Leaf {
                id: id.clone(),
                content,
            },
            other => other.clone(),
        }
    }

    // ===== Queries =====

    /// Number of leaves in this subtree. Always at least 1.
    pub fn count_leaves(&self) -> usize {
        match self.children() {
            None => 1,
            Some((first, second)) => first.count_leaves() + second.count_leaves(),
        }
    }

    /// Number of nodes in this subtree.
    pub fn count_nodes(&self) -> usize {
        match self.children() {
            None => 1,
            Some((first, second)) => 1 + first.count_nodes() + second.count_nodes(),
        }
    }

    /// Height of the subtree; a bare leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 1,
            Some((first, second)) => 1 + first.depth().max(second.depth()),
        }
    }

    /// Find a node by id.
    pub fn find(&self, id: &NodeId) -> Option<&LayoutNode> {
        if self.id() == id {
            return Some(self);
        }
        let (first, second) = self.children()?;
        first.find(id).or_else(|| second.find(id))
    }

    /// True if a node with `id` lives in this subtree.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Leaf ids in left-to-right / top-to-bottom order.
    pub fn leaf_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if node.is_leaf() {
                out.push(node.id().clone());
            }
        });
        out
    }

    /// All node ids, pre-order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.visit(&mut |node| out.push(node.id().clone()));
        out
    }

    /// Slots to follow from this node down to `id`.
    ///
    /// Empty when `id` is this node, `None` when absent.
    pub fn path_to(&self, id: &NodeId) -> Option<Vec<Slot>> {
        if self.id() == id {
            return Some(Vec::new());
        }
        let (first, second) = self.children()?;
        for (slot, child) in [(Slot::First, first), (Slot::Second, second)] {
            if let Some(mut rest) = child.path_to(id) {
                rest.insert(0, slot);
                return Some(rest);
            }
        }
        None
    }

    /// Structural equality ignoring ids.
    pub fn same_shape(&self, other: &LayoutNode) -> bool {
        match (self, other) {
            (Self::Leaf { content: a, .. }, Self::Leaf { content: b, .. }) => a == b,
            (
                Self::VSplit {
                    ratio: ra,
                    left: la,
                    right: rta,
                    ..
                },
                Self::VSplit {
                    ratio: rb,
                    left: lb,
                    right: rtb,
                    ..
                },
            )
            | (
                Self::HSplit {
                    ratio: ra,
                    top: la,
                    bottom: rta,
                    ..
                },
                Self::HSplit {
                    ratio: rb,
                    top: lb,
                    bottom: rtb,
                    ..
                },
            ) => ra == rb && la.same_shape(lb) && rta.same_shape(rtb),
            _ => false,
        }
    }

    /// Pre-order traversal.
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a LayoutNode)) {
        f(self);
        if let Some((first, second)) = self.children() {
            first.visit(f);
            second.visit(f);
        }
    }
}

// ===== Tests =====
