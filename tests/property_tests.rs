//! Property-based tests for editor tree invariants.
//!
//! Random edit sessions are replayed against a `LayoutEditor` and the tree
//! is checked after every step:
//! 1. At least one pane always exists
//! 2. Node ids are unique
//! 3. No split is left with a degenerate ratio once its resize ends
//! 4. Splitting a pane off and deleting the new pane restores the tree exactly
//! 5. Trees survive the JSON record form unchanged

use proptest::prelude::*;
use signage_layout::geometry::Frame;
use signage_layout::model::persist::{layout_from_json, layout_to_json};
use signage_layout::model::{LayoutNode, NodeId, SequentialIds};
use signage_layout::protocol::Edge;
use signage_layout::state::LayoutEditor;
use std::collections::HashSet;

// ===== Arbitrary Strategies =====

#[derive(Debug, Clone)]
enum Op {
    /// Grab an edge, drag to `pos`, release.
    Split { pane: usize, edge: Edge, pos: u8 },
    /// Grab an edge and release without moving.
    Abandon { pane: usize, edge: Edge },
    /// Drag an existing split to `pos` and release.
    Drag { split: usize, pos: u8 },
    /// Press a pane's delete button.
    Delete { pane: usize },
    /// Reset the whole layout.
    Reset,
}

fn edge_strategy() -> impl Strategy<Value = Edge> {
    prop_oneof![
        Just(Edge::Top),
        Just(Edge::Bottom),
        Just(Edge::Left),
        Just(Edge::Right),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), edge_strategy(), 5u8..=95)
            .prop_map(|(pane, edge, pos)| Op::Split { pane, edge, pos }),
        1 => (any::<usize>(), edge_strategy()).prop_map(|(pane, edge)| Op::Abandon { pane, edge }),
        2 => (any::<usize>(), 0u8..=100).prop_map(|(split, pos)| Op::Drag { split, pos }),
        2 => any::<usize>().prop_map(|pane| Op::Delete { pane }),
        1 => Just(Op::Reset),
    ]
}

// ===== Helpers =====

type Editor = LayoutEditor<fn(&LayoutNode)>;

fn ignore(_: &LayoutNode) {}

/// Editor whose container is 100x100 so pointer positions read as percent.
fn editor(layout: Option<LayoutNode>) -> Editor {
    let mut editor = LayoutEditor::new(
        layout,
        ignore as fn(&LayoutNode),
        Box::new(SequentialIds::default()),
    );
    editor.set_container(Frame::new(0.0, 0.0, 100.0, 100.0));
    editor
}

fn split_ids(tree: &LayoutNode) -> Vec<NodeId> {
    tree.node_ids()
        .into_iter()
        .filter(|id| tree.find(id).is_some_and(|node| !node.is_leaf()))
        .collect()
}

fn pick(ids: &[NodeId], index: usize) -> Option<NodeId> {
    (!ids.is_empty()).then(|| ids[index % ids.len()].clone())
}

fn drag(editor: &mut Editor, pos: u8) {
    let pos = f64::from(pos);
    editor.resize_move(pos, pos);
    editor.resize_stop();
}

fn apply(editor: &mut Editor, op: &Op) {
    match *op {
        Op::Split { pane, edge, pos } => {
            if let Some(leaf) = pick(&editor.tree().leaf_ids(), pane) {
                editor.grab_edge(&leaf, edge);
                drag(editor, pos);
            }
        }
        Op::Abandon { pane, edge } => {
            if let Some(leaf) = pick(&editor.tree().leaf_ids(), pane) {
                editor.grab_edge(&leaf, edge);
                editor.resize_stop();
            }
        }
        Op::Drag { split, pos } => {
            if let Some(node) = pick(&split_ids(editor.tree()), split) {
                editor.resize_start(&node);
                drag(editor, pos);
            }
        }
        Op::Delete { pane } => {
            if let Some(leaf) = pick(&editor.tree().leaf_ids(), pane) {
                editor.delete_view(&leaf);
            }
        }
        Op::Reset => editor.reset(),
    }
}

/// Editor after replaying `ops` from a single pane.
fn session(ops: &[Op]) -> Editor {
    let mut editor = editor(None);
    for op in ops {
        apply(&mut editor, op);
    }
    editor
}

fn ratios(tree: &LayoutNode) -> Vec<f64> {
    let mut out = Vec::new();
    tree.visit(&mut |node| {
        if let Some(ratio) = node.ratio() {
            out.push(ratio.value());
        }
    });
    out
}

// ===== Properties =====

proptest! {
    #[test]
    fn at_least_one_pane_always_exists(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut editor = editor(None);
        for op in &ops {
            apply(&mut editor, op);
            prop_assert!(editor.tree().count_leaves() >= 1);
            prop_assert_eq!(
                editor.tree().count_nodes(),
                2 * editor.tree().count_leaves() - 1,
                "every split has exactly two children"
            );
        }
    }

    #[test]
    fn node_ids_are_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let editor = session(&ops);
        let ids = editor.tree().node_ids();
        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn released_splits_never_stay_degenerate(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let editor = session(&ops);
        prop_assert!(editor.active_resize().is_none());
        prop_assert!(!editor.is_tracking_pointer());
        let epsilon = editor.settings().collapse_epsilon;
        for ratio in ratios(editor.tree()) {
            prop_assert!(
                ratio > epsilon && ratio < 100.0 - epsilon,
                "ratio {} left degenerate",
                ratio
            );
        }
    }

    #[test]
    fn split_then_delete_restores_the_tree(
        ops in prop::collection::vec(op_strategy(), 0..20),
        pane in any::<usize>(),
        edge in edge_strategy(),
        pos in 5u8..=95,
    ) {
        let mut editor = session(&ops);
        let before = editor.tree().clone();
        let leaf = pick(&before.leaf_ids(), pane).unwrap();

        editor.grab_edge(&leaf, edge);
        // an inner edge resizes an existing split instead
        let wrapped = editor.tree().count_leaves() == before.count_leaves() + 1;
        drag(&mut editor, pos);
        if !wrapped {
            prop_assert_eq!(editor.tree().count_leaves(), before.count_leaves());
            return Ok(());
        }
        prop_assert_eq!(editor.tree().count_leaves(), before.count_leaves() + 1);

        let added: Vec<NodeId> = editor
            .tree()
            .leaf_ids()
            .into_iter()
            .filter(|id| !before.contains(id))
            .collect();
        prop_assert_eq!(added.len(), 1);

        editor.delete_view(&added[0]);
        prop_assert_eq!(editor.tree(), &before);
    }

    #[test]
    fn abandoned_grab_leaves_the_tree_unchanged(
        ops in prop::collection::vec(op_strategy(), 0..20),
        pane in any::<usize>(),
        edge in edge_strategy(),
    ) {
        let mut editor = session(&ops);
        let before = editor.tree().clone();
        let leaf = pick(&before.leaf_ids(), pane).unwrap();

        editor.grab_edge(&leaf, edge);
        editor.resize_stop();

        prop_assert_eq!(editor.tree(), &before);
    }

    #[test]
    fn trees_survive_the_record_form(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let editor = session(&ops);
        let json = layout_to_json(editor.tree()).unwrap();
        let decoded = layout_from_json(&json, &mut SequentialIds::new("fresh"));
        prop_assert_eq!(&decoded, editor.tree());
    }
}
