//! Screen layout rendering.
//!
//! Header bar, the composed panes, and a status bar. Pane geometry comes
//! from a [`Composition`]; nothing here decides where a pane goes.

use super::constants::{EMPTY_PANE_LABEL, HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use super::styles::PaneStyles;
use crate::geometry::{split_frame, to_cells, Composition, LeafRegion, SplitRegion};
use crate::model::Axis;
use crate::state::mouse_handler::{delete_button_columns, DELETE_BUTTON};
use crate::state::{ActiveResize, ContentPalette};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Everything the renderer draws from.
#[derive(Debug)]
pub struct ScreenView<'a> {
    /// Screen name for the header.
    pub name: &'a str,
    /// Committed changes so far.
    pub revision: u64,
    /// Panes and splits laid out in the editor area.
    pub composition: &'a Composition,
    /// Resize in progress, if any.
    pub resize: Option<&'a ActiveResize>,
    /// Content palette for the status bar.
    pub palette: &'a ContentPalette,
    /// Show node ids in pane titles.
    pub show_ids: bool,
    /// Hide edit affordances.
    pub read_only: bool,
    /// Host status, e.g. the last save result.
    pub status: Option<String>,
}

/// Split the terminal into header, editor area and status bar.
pub fn screen_areas(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// The area panes are laid out in.
pub fn editor_area(area: Rect) -> Rect {
    screen_areas(area).1
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, view: &ScreenView) {
    let styles = PaneStyles::new();
    let (header_area, _, status_area) = screen_areas(frame.area());

    render_header(frame, header_area, view, &styles);

    for leaf in view.composition.leaves() {
        render_pane(frame, leaf, view, &styles);
    }
    for split in view.composition.splits().filter(|split| split.active) {
        highlight_boundary(frame.buffer_mut(), split, &styles);
    }

    render_status_bar(frame, status_area, view, &styles);
}

fn render_header(frame: &mut Frame, area: Rect, view: &ScreenView, styles: &PaneStyles) {
    let panes = view.composition.leaves().count();
    let text = format!(
        " {} | {} pane{} | rev {}{}",
        view.name,
        panes,
        if panes == 1 { "" } else { "s" },
        view.revision,
        if view.read_only { " | read-only" } else { "" },
    );
    frame.render_widget(Paragraph::new(Line::from(text)).style(styles.header), area);
}

fn render_pane(frame: &mut Frame, leaf: &LeafRegion, view: &ScreenView, styles: &PaneStyles) {
    let area = leaf.area.intersection(frame.area());
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border);
    if view.show_ids {
        block = block.title(Span::styled(format!(" {} ", leaf.id), styles.title));
    }

    let inner = block.inner(area);
    let body = match &leaf.content {
        Some(content) => Span::styled(
            truncate_to_width(content.as_str(), inner.width),
            styles.content,
        ),
        None => Span::styled(EMPTY_PANE_LABEL, styles.muted),
    };
    frame.render_widget(
        Paragraph::new(Line::from(body))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );

    if !view.read_only {
        if let Some((start, _)) = delete_button_columns(area) {
            frame
                .buffer_mut()
                .set_string(start, area.y, DELETE_BUTTON, styles.delete_button);
        }
    }
}

/// Cells on both sides of the boundary the active split is dragging.
fn boundary_cells(split: &SplitRegion) -> Rect {
    let (first, _) = split_frame(split.axis, split.ratio, &split.frame);
    let first = to_cells(&first);
    let area = split.area;
    let rect = match split.axis {
        Axis::Vertical => {
            let x = first.right().saturating_sub(1).max(area.x);
            Rect::new(x, area.y, 2, area.height)
        }
        Axis::Horizontal => {
            let y = first.bottom().saturating_sub(1).max(area.y);
            Rect::new(area.x, y, area.width, 2)
        }
    };
    rect.intersection(area)
}

fn highlight_boundary(buf: &mut Buffer, split: &SplitRegion, styles: &PaneStyles) {
    let cells = boundary_cells(split).intersection(buf.area);
    if cells.is_empty() {
        return;
    }
    buf.set_style(cells, styles.active_boundary);

    let label = format!(" {} ", split.ratio);
    let (x, y) = match split.axis {
        Axis::Vertical => (
            cells.x.saturating_sub(label.width() as u16 / 2).max(split.area.x),
            cells.y,
        ),
        Axis::Horizontal => (cells.x.saturating_add(1), cells.y),
    };
    put_label(buf, x, y, &label, split.area, styles.active_boundary);
}

/// Write `label` at (`x`, `y`), clipped to `bounds` and the buffer.
fn put_label(buf: &mut Buffer, x: u16, y: u16, label: &str, bounds: Rect, style: Style) {
    let bounds = bounds.intersection(buf.area);
    if x < bounds.x || x >= bounds.right() || y < bounds.y || y >= bounds.bottom() {
        return;
    }
    buf.set_stringn(x, y, label, usize::from(bounds.right() - x), style);
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &ScreenView, styles: &PaneStyles) {
    let mut spans = vec![Span::raw(format!(" content: {}", view.palette.label()))];

    if let Some(resize) = view.resize {
        spans.push(Span::styled(
            format!(
                " | resizing {} {} -> {}",
                resize.node(),
                resize.committed(),
                resize.pending()
            ),
            styles.active_boundary,
        ));
    }
    if let Some(status) = &view.status {
        spans.push(Span::raw(format!(" | {status}")));
    }
    spans.push(Span::styled(" | ?: help  q: quit", styles.muted));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: u16) -> String {
    let max = usize::from(max);
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
