//! Content palette: the content references a pane click can place.

use crate::model::{ContentRef, KeyAction};

/// Configured content entries plus a cursor.
///
/// Cursor position 0 is "none" (clicking clears a pane); positions
/// `1..=len` select the entries in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPalette {
    entries: Vec<ContentRef>,
    cursor: usize,
}

impl ContentPalette {
    /// Palette over `entries`, cursor on "none".
    pub fn new(entries: Vec<ContentRef>) -> Self {
        Self { entries, cursor: 0 }
    }

    /// All entries.
    pub fn entries(&self) -> &[ContentRef] {
        &self.entries
    }

    /// Entry a pane click would place, `None` for clearing.
    pub fn selected(&self) -> Option<&ContentRef> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// Advance the cursor, wrapping past the last entry back to "none".
    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % (self.entries.len() + 1);
    }

    /// Move the cursor back, wrapping from "none" to the last entry.
    pub fn prev(&mut self) {
        let positions = self.entries.len() + 1;
        self.cursor = (self.cursor + positions - 1) % positions;
    }

    /// Label for the status bar.
    pub fn label(&self) -> String {
        match self.selected() {
            Some(content) => format!("{}/{} {}", self.cursor, self.entries.len(), content),
            None => "none".to_string(),
        }
    }
}

/// Apply a palette key action. Other actions leave the palette unchanged.
pub fn handle_palette_action(palette: &mut ContentPalette, action: KeyAction) {
    match action {
        KeyAction::NextContent => palette.next(),
        KeyAction::PrevContent => palette.prev(),
        _ => {}
    }
}
