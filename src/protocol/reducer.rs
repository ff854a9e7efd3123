//! Per-node reducers.
//!
//! Each node type interprets a message from one of its children and either
//! absorbs it or produces the message for its own parent. Reducers never
//! mutate: replacement subtrees are built as new values and carried upward
//! inside [`Msg::UpdateSubtree`].

use super::message::{Edge, LeafIntent, Msg};
use crate::model::{IdGenerator, LayoutNode, Ratio, Slot};
use tracing::debug;

/// Turn an interaction on `leaf` into the message it sends to its parent.
///
/// Returns `None` when `leaf` is not a leaf or the intent changes nothing.
pub fn reduce_leaf(leaf: &LayoutNode, intent: LeafIntent) -> Option<Msg> {
    if !leaf.is_leaf() {
        return None;
    }
    let id = leaf.id().clone();
    match intent {
        LeafIntent::GrabEdge(edge) => Some(Msg::GrabEdge { source: id, edge }),
        LeafIntent::Delete => Some(Msg::DeleteView { target: id }),
        LeafIntent::SetContent(content) => {
            if leaf.content() == content.as_ref() {
                return None;
            }
            Some(Msg::UpdateSubtree {
                child: id,
                subtree: leaf.with_content(content),
                resize: None,
            })
        }
    }
}

/// Interpret `msg`, received by the split `node` from its child at `from`.
///
/// # Behavior
/// - `GrabEdge` along this split's axis on the shared boundary starts a
///   resize of this split; along this axis but facing outward it is
///   forwarded with this split as the new source.
/// - `GrabEdge` across this split's axis wraps the child in a new split of
///   the edge's axis holding a fresh leaf on the grabbed side.
/// - `DeleteView` for a child leaf replaces this split with the sibling.
/// - `UpdateSubtree` for a child replaces that child and re-targets the
///   message at this split.
/// - `ResizeStart` passes through unchanged.
///
/// Messages that do not name the child they came from are ignored, as are
/// `ResizeMove` and `ResizeStop`, which the editor root handles directly.
pub fn reduce_split(
    node: &LayoutNode,
    from: Slot,
    msg: Msg,
    ids: &mut dyn IdGenerator,
) -> Option<Msg> {
    let axis = node.axis()?;
    let child = node.child(from)?;

    match msg {
        Msg::GrabEdge { source, edge } => {
            if &source != child.id() {
                debug!(node = %node.id(), %source, "GrabEdge from unknown source ignored");
                return None;
            }
            if edge.axis() != axis {
                let wrapped = wrap_with_new_leaf(child, edge, ids);
                let resize = Some(wrapped.id().clone());
                let subtree = node.with_child(from, wrapped)?;
                debug!(node = %node.id(), ?edge, "Split child across axis");
                return Some(Msg::UpdateSubtree {
                    child: node.id().clone(),
                    subtree,
                    resize,
                });
            }
            if edge.inner_slot() == from {
                Some(Msg::ResizeStart {
                    node: node.id().clone(),
                })
            } else {
                Some(Msg::GrabEdge {
                    source: node.id().clone(),
                    edge,
                })
            }
        }
        Msg::DeleteView { target } => {
            if &target != child.id() || !child.is_leaf() {
                debug!(node = %node.id(), %target, "DeleteView for non-child ignored");
                return None;
            }
            let sibling = node.child(from.other())?;
            Some(Msg::UpdateSubtree {
                child: node.id().clone(),
                subtree: sibling.clone(),
                resize: None,
            })
        }
        Msg::UpdateSubtree {
            child: replaced,
            subtree,
            resize,
        } => {
            if &replaced != child.id() {
                debug!(node = %node.id(), %replaced, "UpdateSubtree for non-child ignored");
                return None;
            }
            Some(Msg::UpdateSubtree {
                child: node.id().clone(),
                subtree: node.with_child(from, subtree)?,
                resize,
            })
        }
        msg @ Msg::ResizeStart { .. } => Some(msg),
        Msg::ResizeMove { .. } | Msg::ResizeStop => None,
    }
}

/// Wrap `target` in a new split of `edge`'s axis with a fresh leaf on the
/// `edge` side.
///
/// The new leaf starts with zero size: the split ratio is 100 when the leaf
/// is the second child and 0 when it is the first.
pub fn wrap_with_new_leaf(
    target: &LayoutNode,
    edge: Edge,
    ids: &mut dyn IdGenerator,
) -> LayoutNode {
    let fresh = LayoutNode::new_leaf(ids);
    let split_id = ids.next_id();
    if edge.is_trailing() {
        LayoutNode::split(edge.axis(), split_id, Ratio::MAX, target.clone(), fresh)
    } else {
        LayoutNode::split(edge.axis(), split_id, Ratio::MIN, fresh, target.clone())
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axis, ContentRef, NodeId, SequentialIds};

    fn id(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    fn leaf(s: &str) -> LayoutNode {
        LayoutNode::leaf(id(s), None)
    }

    fn vsplit(s: &str, ratio: f64, l: LayoutNode, r: LayoutNode) -> LayoutNode {
        LayoutNode::split(Axis::Vertical, id(s), Ratio::new(ratio), l, r)
    }

    fn grab(source: &str, edge: Edge) -> Msg {
        Msg::GrabEdge {
            source: id(source),
            edge,
        }
    }

    #[test]
    fn leaf_grab_names_itself_as_source() {
        let msg = reduce_leaf(&leaf("A"), LeafIntent::GrabEdge(Edge::Top));
        assert_eq!(msg, Some(grab("A", Edge::Top)));
    }

    #[test]
    fn leaf_setting_same_content_is_silent() {
        let a = leaf("A").with_content(Some(ContentRef::new("x")));
        assert_eq!(
            reduce_leaf(&a, LeafIntent::SetContent(Some(ContentRef::new("x")))),
            None
        );
    }

    #[test]
    fn leaf_setting_content_emits_replacement() {
        let msg = reduce_leaf(&leaf("A"), LeafIntent::SetContent(Some(ContentRef::new("x"))));
        let Some(Msg::UpdateSubtree { child, subtree, .. }) = msg else {
            panic!("expected UpdateSubtree, got {msg:?}");
        };
        assert_eq!(child, id("A"));
        assert_eq!(subtree.content(), Some(&ContentRef::new("x")));
    }

    #[test]
    fn intents_on_splits_are_ignored() {
        let v = vsplit("v", 50.0, leaf("A"), leaf("B"));
        assert_eq!(reduce_leaf(&v, LeafIntent::Delete), None);
    }

    #[test]
    fn inner_boundary_grab_starts_resize() {
        // GIVEN: A | B
        let v = vsplit("v", 50.0, leaf("A"), leaf("B"));
        let mut ids = SequentialIds::default();

        // WHEN: A's right edge (the shared boundary) is grabbed
        let out = reduce_split(&v, Slot::First, grab("A", Edge::Right), &mut ids);

        // THEN: this split becomes the resize target
        assert_eq!(out, Some(Msg::ResizeStart { node: id("v") }));

        // AND: B's left edge means the same boundary
        let out = reduce_split(&v, Slot::Second, grab("B", Edge::Left), &mut ids);
        assert_eq!(out, Some(Msg::ResizeStart { node: id("v") }));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn outward_same_axis_grab_is_forwarded() {
        let v = vsplit("v", 50.0, leaf("A"), leaf("B"));
        let mut ids = SequentialIds::default();
        let out = reduce_split(&v, Slot::First, grab("A", Edge::Left), &mut ids);
        assert_eq!(out, Some(grab("v", Edge::Left)));
    }

    #[test]
    fn cross_axis_grab_wraps_child() {
        // GIVEN: A | B
        let v = vsplit("v", 30.0, leaf("A"), leaf("B"));
        let mut ids = SequentialIds::default();

        // WHEN: A's bottom edge is grabbed
        let out = reduce_split(&v, Slot::First, grab("A", Edge::Bottom), &mut ids);

        // THEN: A becomes HSplit{ratio 100, top A, bottom fresh} and resize is requested
        let Some(Msg::UpdateSubtree {
            child,
            subtree,
            resize,
        }) = out
        else {
            panic!("expected UpdateSubtree, got {out:?}");
        };
        assert_eq!(child, id("v"));
        assert_eq!(subtree.ratio(), Some(Ratio::new(30.0)), "own ratio untouched");
        let left = subtree.child(Slot::First).unwrap();
        assert!(left.is_hsplit());
        assert_eq!(left.ratio(), Some(Ratio::MAX));
        assert_eq!(left.child(Slot::First).unwrap().id(), &id("A"));
        assert_eq!(left.child(Slot::Second).unwrap().id(), &id("n1"));
        assert_eq!(resize, Some(left.id().clone()));
    }

    #[test]
    fn leading_edge_wrap_puts_new_leaf_first() {
        let mut ids = SequentialIds::default();
        let wrapped = wrap_with_new_leaf(&leaf("A"), Edge::Top, &mut ids);
        assert!(wrapped.is_hsplit());
        assert_eq!(wrapped.ratio(), Some(Ratio::MIN));
        assert_eq!(wrapped.leaf_ids(), vec![id("n1"), id("A")]);
    }

    #[test]
    fn delete_replaces_split_with_sibling() {
        let inner = vsplit("w", 50.0, leaf("C"), leaf("D"));
        let v = vsplit("v", 50.0, leaf("A"), inner.clone());
        let mut ids = SequentialIds::default();
        let out = reduce_split(
            &v,
            Slot::First,
            Msg::DeleteView { target: id("A") },
            &mut ids,
        );
        assert_eq!(
            out,
            Some(Msg::UpdateSubtree {
                child: id("v"),
                subtree: inner,
                resize: None,
            })
        );
    }

    #[test]
    fn delete_of_split_child_is_ignored() {
        let v = vsplit("v", 50.0, leaf("A"), vsplit("w", 50.0, leaf("C"), leaf("D")));
        let mut ids = SequentialIds::default();
        let out = reduce_split(
            &v,
            Slot::Second,
            Msg::DeleteView { target: id("w") },
            &mut ids,
        );
        assert_eq!(out, None);
    }

    #[test]
    fn update_subtree_is_retargeted_at_parent() {
        let v = vsplit("v", 50.0, leaf("A"), leaf("B"));
        let mut ids = SequentialIds::default();
        let out = reduce_split(
            &v,
            Slot::Second,
            Msg::UpdateSubtree {
                child: id("B"),
                subtree: leaf("Z"),
                resize: Some(id("q")),
            },
            &mut ids,
        );
        assert_eq!(
            out,
            Some(Msg::UpdateSubtree {
                child: id("v"),
                subtree: vsplit("v", 50.0, leaf("A"), leaf("Z")),
                resize: Some(id("q")),
            })
        );
    }

    #[test]
    fn messages_naming_a_stranger_are_ignored() {
        let v = vsplit("v", 50.0, leaf("A"), leaf("B"));
        let mut ids = SequentialIds::default();
        assert_eq!(
            reduce_split(&v, Slot::First, grab("B", Edge::Right), &mut ids),
            None
        );
        assert_eq!(
            reduce_split(
                &v,
                Slot::First,
                Msg::UpdateSubtree {
                    child: id("B"),
                    subtree: leaf("Z"),
                    resize: None,
                },
                &mut ids,
            ),
            None
        );
    }

    #[test]
    fn resize_pointer_messages_do_not_travel() {
        let v = vsplit("v", 50.0, leaf("A"), leaf("B"));
        let mut ids = SequentialIds::default();
        assert_eq!(
            reduce_split(&v, Slot::First, Msg::ResizeMove { x: 1.0, y: 1.0 }, &mut ids),
            None
        );
        assert_eq!(reduce_split(&v, Slot::First, Msg::ResizeStop, &mut ids), None);
        assert_eq!(
            reduce_split(&v, Slot::First, Msg::ResizeStart { node: id("x") }, &mut ids),
            Some(Msg::ResizeStart { node: id("x") })
        );
    }
}
