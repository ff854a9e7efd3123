//! Subdivision of the editable area into nested regions.
//!
//! Geometry is carried in fractional cells and rounded to whole cells only
//! at the end, edge by edge, so neighbouring regions share their boundary
//! cell column or row exactly.

use super::resize::Frame;
use crate::model::{Axis, ContentRef, LayoutNode, NodeId, Ratio, Slot};
use ratatui::layout::Rect;
use std::fmt::Write as _;

/// Divide `frame` along `axis` at `ratio` into first and second parts.
pub fn split_frame(axis: Axis, ratio: Ratio, frame: &Frame) -> (Frame, Frame) {
    let (start, length) = frame.span(axis);
    let boundary = start + length * ratio.value() / 100.0;
    let end = start + length;
    match axis {
        Axis::Vertical => (
            Frame::new(start, frame.y, boundary - start, frame.height),
            Frame::new(boundary, frame.y, end - boundary, frame.height),
        ),
        Axis::Horizontal => (
            Frame::new(frame.x, start, frame.width, boundary - start),
            Frame::new(frame.x, boundary, frame.width, end - boundary),
        ),
    }
}

/// Region occupied by node `id` when `root` fills `frame`.
pub fn frame_of(root: &LayoutNode, id: &NodeId, frame: &Frame) -> Option<Frame> {
    let mut node = root;
    let mut current = *frame;
    for slot in root.path_to(id)? {
        let axis = node.axis()?;
        let ratio = node.ratio()?;
        let (first, second) = split_frame(axis, ratio, &current);
        current = match slot {
            Slot::First => first,
            Slot::Second => second,
        };
        node = node.child(slot)?;
    }
    Some(current)
}

/// Round a fractional frame to the cells it covers.
///
/// Each edge is rounded independently; coordinates are clamped to `u16`.
pub fn to_cells(frame: &Frame) -> Rect {
    fn cell(v: f64) -> u16 {
        v.round().clamp(0.0, f64::from(u16::MAX)) as u16
    }
    let x0 = cell(frame.x);
    let y0 = cell(frame.y);
    let x1 = cell(frame.right());
    let y1 = cell(frame.bottom());
    Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

// ===== Composition =====

/// A pane.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafRegion {
    /// Leaf id.
    pub id: NodeId,
    /// Placed content.
    pub content: Option<ContentRef>,
    /// Nesting depth, root is 0.
    pub depth: usize,
    /// Fractional region.
    pub frame: Frame,
    /// Covered cells.
    pub area: Rect,
}

/// A split and the region it divides.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRegion {
    /// Split id.
    pub id: NodeId,
    /// Split axis.
    pub axis: Axis,
    /// Ratio in effect: the pending ratio while this split is being resized.
    pub ratio: Ratio,
    /// True while this split is being resized.
    pub active: bool,
    /// Nesting depth, root is 0.
    pub depth: usize,
    /// Fractional region.
    pub frame: Frame,
    /// Covered cells.
    pub area: Rect,
}

/// One composed region.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Pane.
    Leaf(LeafRegion),
    /// Split.
    Split(SplitRegion),
}

/// Every region of a tree laid out in a frame, in pre-order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composition {
    regions: Vec<Region>,
}

impl Composition {
    /// All regions, pre-order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Pane regions in reading order.
    pub fn leaves(&self) -> impl Iterator<Item = &LeafRegion> {
        self.regions.iter().filter_map(|region| match region {
            Region::Leaf(leaf) => Some(leaf),
            Region::Split(_) => None,
        })
    }

    /// Split regions, outermost first.
    pub fn splits(&self) -> impl Iterator<Item = &SplitRegion> {
        self.regions.iter().filter_map(|region| match region {
            Region::Split(split) => Some(split),
            Region::Leaf(_) => None,
        })
    }

    /// Pane covering the cell at (`column`, `row`).
    ///
    /// Panes rounded to zero cells cover nothing.
    pub fn leaf_at(&self, column: u16, row: u16) -> Option<&LeafRegion> {
        self.leaves().find(|leaf| {
            let a = leaf.area;
            column >= a.x && column < a.right() && row >= a.y && row < a.bottom()
        })
    }

    /// Pane by id.
    pub fn leaf(&self, id: &NodeId) -> Option<&LeafRegion> {
        self.leaves().find(|leaf| &leaf.id == id)
    }

    /// Split by id.
    pub fn split(&self, id: &NodeId) -> Option<&SplitRegion> {
        self.splits().find(|split| &split.id == id)
    }

    /// Indented plain-text outline, one region per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for region in &self.regions {
            match region {
                Region::Leaf(leaf) => {
                    let _ = writeln!(
                        out,
                        "{}leaf {} {} {}",
                        "  ".repeat(leaf.depth),
                        leaf.id,
                        describe_rect(leaf.area),
                        leaf.content
                            .as_ref()
                            .map_or("(empty)", ContentRef::as_str),
                    );
                }
                Region::Split(split) => {
                    let kind = match split.axis {
                        Axis::Vertical => "vsplit",
                        Axis::Horizontal => "hsplit",
                    };
                    let _ = writeln!(
                        out,
                        "{}{} {} {} {}{}",
                        "  ".repeat(split.depth),
                        kind,
                        split.id,
                        split.ratio,
                        describe_rect(split.area),
                        if split.active { " *" } else { "" },
                    );
                }
            }
        }
        out
    }
}

fn describe_rect(area: Rect) -> String {
    format!("{},{} {}x{}", area.x, area.y, area.width, area.height)
}

/// Lay `root` out in `frame`.
///
/// `active` overrides the ratio of the split being resized with its pending
/// ratio, so the live drag is what gets drawn.
pub fn compose(
    root: &LayoutNode,
    frame: &Frame,
    active: Option<(&NodeId, Ratio)>,
) -> Composition {
    let mut composition = Composition::default();
    compose_node(root, *frame, 0, active, &mut composition.regions);
    composition
}

fn compose_node(
    node: &LayoutNode,
    frame: Frame,
    depth: usize,
    active: Option<(&NodeId, Ratio)>,
    out: &mut Vec<Region>,
) {
    let (Some(axis), Some(committed), Some((first, second))) =
        (node.axis(), node.ratio(), node.children())
    else {
        out.push(Region::Leaf(LeafRegion {
            id: node.id().clone(),
            content: node.content().cloned(),
            depth,
            frame,
            area: to_cells(&frame),
        }));
        return;
    };

    let pending = active.filter(|(id, _)| *id == node.id()).map(|(_, r)| r);
    let ratio = pending.unwrap_or(committed);
    out.push(Region::Split(SplitRegion {
        id: node.id().clone(),
        axis,
        ratio,
        active: pending.is_some(),
        depth,
        frame,
        area: to_cells(&frame),
    }));

    let (first_frame, second_frame) = split_frame(axis, ratio, &frame);
    compose_node(first, first_frame, depth + 1, active, out);
    compose_node(second, second_frame, depth + 1, active, out);
}

// ===== Tests =====
