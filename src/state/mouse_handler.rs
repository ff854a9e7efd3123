//! Mouse event handler.
//!
//! Maps terminal mouse events onto editor interactions using the last
//! composed layout for hit testing.

use crate::geometry::{Composition, LeafRegion};
use crate::model::NodeId;
use crate::protocol::Edge;
use crate::state::{ChangeSink, ContentPalette, LayoutEditor};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

/// Label of the delete affordance drawn in a pane's top border.
pub const DELETE_BUTTON: &str = "[x]";

/// Minimum pane width that shows the delete button.
pub const DELETE_BUTTON_MIN_WIDTH: u16 = 6;

/// What a pointer press landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A pane border, away from the corners.
    Edge {
        /// Pane.
        leaf: NodeId,
        /// Which border.
        edge: Edge,
    },
    /// The delete button of a pane.
    Delete {
        /// Pane.
        leaf: NodeId,
    },
    /// The inside of a pane.
    Body {
        /// Pane.
        leaf: NodeId,
    },
    /// A corner, or nothing.
    Miss,
}

/// Columns covered by the delete button of a pane, end exclusive.
///
/// The button sits in the top border just left of the top-right corner.
/// `None` for panes too narrow to show it.
pub fn delete_button_columns(area: Rect) -> Option<(u16, u16)> {
    if area.width < DELETE_BUTTON_MIN_WIDTH || area.height == 0 {
        return None;
    }
    let end = area.right() - 1;
    Some((end - DELETE_BUTTON.len() as u16, end))
}

fn classify(leaf: &LeafRegion, column: u16, row: u16) -> HitTarget {
    let area = leaf.area;
    let id = leaf.id.clone();

    if row == area.y {
        if let Some((start, end)) = delete_button_columns(area) {
            if column >= start && column < end {
                return HitTarget::Delete { leaf: id };
            }
        }
    }

    let left = column == area.x;
    let right = column == area.right() - 1;
    let top = row == area.y;
    let bottom = row == area.bottom() - 1;

    let edge = match (top, bottom, left, right) {
        (true, _, true, _) | (true, _, _, true) | (_, true, true, _) | (_, true, _, true) => {
            return HitTarget::Miss;
        }
        (true, _, _, _) => Edge::Top,
        (_, true, _, _) => Edge::Bottom,
        (_, _, true, _) => Edge::Left,
        (_, _, _, true) => Edge::Right,
        _ => return HitTarget::Body { leaf: id },
    };
    HitTarget::Edge { leaf: id, edge }
}

/// Find what the cell at (`column`, `row`) belongs to.
///
/// Read-only layouts expose no affordances.
pub fn detect_hit(composition: &Composition, column: u16, row: u16, read_only: bool) -> HitTarget {
    if read_only {
        return HitTarget::Miss;
    }
    match composition.leaf_at(column, row) {
        Some(leaf) => classify(leaf, column, row),
        None => HitTarget::Miss,
    }
}

/// Pointer position of a cell: its center.
pub fn cell_center(column: u16, row: u16) -> (f64, f64) {
    (f64::from(column) + 0.5, f64::from(row) + 0.5)
}

/// Route one mouse event to the editor.
///
/// # Behavior
/// - Left press on a border grabs that edge, on the delete button deletes
///   the pane, on the body places the palette's selected content.
/// - Drag and release only reach the editor while it tracks the pointer.
/// - Presses are ignored while a resize is in progress.
pub fn handle_mouse_event<S: ChangeSink>(
    editor: &mut LayoutEditor<S>,
    event: MouseEvent,
    composition: &Composition,
    palette: &ContentPalette,
) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if editor.is_tracking_pointer() {
                return;
            }
            let hit = detect_hit(composition, event.column, event.row, editor.is_read_only());
            debug!(?hit, column = event.column, row = event.row, "Mouse press");
            match hit {
                HitTarget::Edge { leaf, edge } => editor.grab_edge(&leaf, edge),
                HitTarget::Delete { leaf } => editor.delete_view(&leaf),
                HitTarget::Body { leaf } => editor.assign_content(&leaf, palette.selected().cloned()),
                HitTarget::Miss => {}
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if editor.is_tracking_pointer() {
                let (x, y) = cell_center(event.column, event.row);
                editor.resize_move(x, y);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if editor.is_tracking_pointer() {
                editor.resize_stop();
            }
        }
        _ => {}
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
