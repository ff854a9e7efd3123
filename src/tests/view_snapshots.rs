//! Snapshot tests of the rendered screen.

use crate::model::{Axis, ContentRef, LayoutNode, NodeId, Ratio};
use crate::test_harness::{AcceptanceTestHarness, HarnessOptions};
use crossterm::event::KeyCode;

fn id(s: &str) -> NodeId {
    NodeId::new(s).unwrap()
}

#[test]
fn two_panes_side_by_side() {
    let layout = LayoutNode::split(
        Axis::Vertical,
        id("v"),
        Ratio::HALF,
        LayoutNode::leaf(id("A"), None),
        LayoutNode::leaf(id("B"), None),
    );
    let mut harness = AcceptanceTestHarness::with_options(
        Some(layout),
        HarnessOptions {
            width: 40,
            height: 8,
            ..HarnessOptions::default()
        },
    );

    insta::assert_snapshot!(harness.render_to_string(), @r"
 Lobby | 2 panes | rev 0
┌───────────────[x]┐┌───────────────[x]┐
│(empty)           ││(empty)           │
│                  ││                  │
│                  ││                  │
│                  ││                  │
└──────────────────┘└──────────────────┘
 content: none | ?: help  q: quit
");
}

#[test]
fn read_only_stack_with_ids() {
    let layout = LayoutNode::split(
        Axis::Horizontal,
        id("h"),
        Ratio::HALF,
        LayoutNode::leaf(id("A"), None),
        LayoutNode::leaf(id("B"), Some(ContentRef::new("menu.mp4"))),
    );
    let mut harness = AcceptanceTestHarness::with_options(
        Some(layout),
        HarnessOptions {
            width: 40,
            height: 8,
            read_only: true,
            ..HarnessOptions::default()
        },
    );
    harness.send_key(KeyCode::Char('i'));

    insta::assert_snapshot!(harness.render_to_string(), @r"
 Lobby | 2 panes | rev 0 | read-only
┌ A ───────────────────────────────────┐
│(empty)                               │
└──────────────────────────────────────┘
┌ B ───────────────────────────────────┐
│menu.mp4                              │
└──────────────────────────────────────┘
 content: none | ?: help  q: quit
");
}
