//! Bottom-up tree walk.
//!
//! A message raised at some node is handed to each ancestor in turn, nearest
//! first, until one absorbs it or it reaches the root. The walk owns the
//! recursion; reducers only ever see one node and one message.

use super::message::{LeafIntent, Msg};
use super::reducer::{reduce_leaf, reduce_split, wrap_with_new_leaf};
use crate::model::{IdGenerator, LayoutNode, NodeId, Slot};
use tracing::debug;

/// What the editor root should do with a message that reached it.
#[derive(Debug, Clone, PartialEq)]
pub enum RootOutcome {
    /// Commit `tree` as the new layout, then optionally start resizing.
    Replace {
        /// Next tree.
        tree: LayoutNode,
        /// Split to resize once committed.
        resize: Option<NodeId>,
    },
    /// Start resizing an existing split.
    BeginResize(NodeId),
    /// Nothing to do.
    Ignored,
}

/// Hand `msg`, raised at `origin`, to every ancestor of `origin`.
///
/// Returns the message that leaves the root, or `None` if an ancestor
/// absorbed it or `origin` is not in the tree.
pub fn propagate(
    root: &LayoutNode,
    origin: &NodeId,
    msg: Msg,
    ids: &mut dyn IdGenerator,
) -> Option<Msg> {
    let path = root.path_to(origin)?;

    let mut ancestors: Vec<(&LayoutNode, Slot)> = Vec::with_capacity(path.len());
    let mut node = root;
    for slot in path {
        ancestors.push((node, slot));
        node = node.child(slot)?;
    }

    let mut msg = msg;
    for (ancestor, slot) in ancestors.into_iter().rev() {
        debug!(node = %ancestor.id(), kind = msg.kind(), "Routing message upward");
        msg = reduce_split(ancestor, slot, msg, ids)?;
    }
    Some(msg)
}

/// Interpret a message that left the root.
///
/// The root has no parent to defer to, so a grab that was forwarded all
/// the way up splits the whole tree.
pub fn reduce_root(root: &LayoutNode, msg: Msg, ids: &mut dyn IdGenerator) -> RootOutcome {
    match msg {
        Msg::GrabEdge { source, edge } if &source == root.id() => {
            let tree = wrap_with_new_leaf(root, edge, ids);
            let resize = Some(tree.id().clone());
            RootOutcome::Replace { tree, resize }
        }
        Msg::UpdateSubtree {
            child,
            subtree,
            resize,
        } if &child == root.id() => RootOutcome::Replace {
            tree: subtree,
            resize,
        },
        Msg::ResizeStart { node } => RootOutcome::BeginResize(node),
        Msg::DeleteView { .. } => {
            debug!("Delete of the only pane ignored");
            RootOutcome::Ignored
        }
        other => {
            debug!(kind = other.kind(), "Message ignored at root");
            RootOutcome::Ignored
        }
    }
}

/// Route `msg` from `origin` to the root and interpret it there.
pub fn dispatch(
    root: &LayoutNode,
    origin: &NodeId,
    msg: Msg,
    ids: &mut dyn IdGenerator,
) -> RootOutcome {
    match propagate(root, origin, msg, ids) {
        Some(msg) => reduce_root(root, msg, ids),
        None => RootOutcome::Ignored,
    }
}

/// Raise `intent` on the leaf `leaf` and route the result to the root.
pub fn dispatch_intent(
    root: &LayoutNode,
    leaf: &NodeId,
    intent: LeafIntent,
    ids: &mut dyn IdGenerator,
) -> RootOutcome {
    let Some(node) = root.find(leaf) else {
        debug!(%leaf, "Intent for unknown pane ignored");
        return RootOutcome::Ignored;
    };
    match reduce_leaf(node, intent) {
        Some(msg) => dispatch(root, leaf, msg, ids),
        None => RootOutcome::Ignored,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
