//! Snapshot tests for composed layouts and persisted records
//!
//! Uses insta to pin the region outline produced by `compose` and the JSON
//! record shape written to screen documents. These protect against
//! accidental changes to pane placement and to the on-disk format.

use chrono::{TimeZone, Utc};
use signage_layout::geometry::{compose, Frame};
use signage_layout::model::{
    Axis, ContentRef, LayoutNode, NodeId, Ratio, ScreenDocument, DOCUMENT_VERSION,
};

// ===== Test Helpers =====

fn id(s: &str) -> NodeId {
    NodeId::new(s).expect("valid id")
}

/// `VSplit(v, 40) { A(promo.png) | HSplit(h, 70) { B / C(menu.mp4) } }`
fn lobby() -> LayoutNode {
    LayoutNode::split(
        Axis::Vertical,
        id("v"),
        Ratio::new(40.0),
        LayoutNode::leaf(id("A"), Some(ContentRef::new("promo.png"))),
        LayoutNode::split(
            Axis::Horizontal,
            id("h"),
            Ratio::new(70.0),
            LayoutNode::leaf(id("B"), None),
            LayoutNode::leaf(id("C"), Some(ContentRef::new("menu.mp4"))),
        ),
    )
}

/// Editor area of a 100x24 terminal.
fn editor_frame() -> Frame {
    Frame::new(0.0, 1.0, 100.0, 22.0)
}

// ===== Composition Snapshots =====

#[test]
fn snapshot_composed_lobby() {
    let composition = compose(&lobby(), &editor_frame(), None);

    insta::assert_snapshot!(composition.describe().trim_end(), @r###"
    vsplit v 40.0% 0,1 100x22
      leaf A 0,1 40x22 promo.png
      hsplit h 70.0% 40,1 60x22
        leaf B 40,1 60x15 (empty)
        leaf C 40,16 60x7 menu.mp4
    "###);
}

#[test]
fn snapshot_composed_lobby_during_resize() {
    let composition = compose(&lobby(), &editor_frame(), Some((&id("h"), Ratio::new(25.0))));

    insta::assert_snapshot!(composition.describe().trim_end(), @r###"
    vsplit v 40.0% 0,1 100x22
      leaf A 0,1 40x22 promo.png
      hsplit h 25.0% 40,1 60x22 *
        leaf B 40,1 60x6 (empty)
        leaf C 40,7 60x16 menu.mp4
    "###);
}

// ===== Record Snapshots =====

#[test]
fn snapshot_layout_record() {
    let json = serde_json::to_string_pretty(&lobby()).expect("serializable");

    insta::assert_snapshot!(json, @r###"
    {
      "type": "vsplit",
      "id": "v",
      "ratio": 40.0,
      "left": {
        "type": "leaf",
        "id": "A",
        "content": "promo.png"
      },
      "right": {
        "type": "hsplit",
        "id": "h",
        "ratio": 70.0,
        "top": {
          "type": "leaf",
          "id": "B"
        },
        "bottom": {
          "type": "leaf",
          "id": "C",
          "content": "menu.mp4"
        }
      }
    }
    "###);
}

#[test]
fn snapshot_screen_document() {
    let document = ScreenDocument {
        version: DOCUMENT_VERSION,
        name: "Lobby".to_string(),
        updated_at: Some(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()),
        layout: LayoutNode::leaf(id("A"), Some(ContentRef::new("promo.png"))),
    };
    let json = serde_json::to_string_pretty(&document).expect("serializable");

    insta::assert_snapshot!(json, @r###"
    {
      "version": 1,
      "name": "Lobby",
      "updated_at": "2026-10-18T09:30:00Z",
      "layout": {
        "type": "leaf",
        "id": "A",
        "content": "promo.png"
      }
    }
    "###);
}
