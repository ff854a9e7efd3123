//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` with convenient methods for simulating
//! mouse gestures and key presses against a layout.

use crate::model::{ContentRef, LayoutNode, SequentialIds};
use crate::state::{ChangeSink, ContentPalette, LayoutEditor};
use crate::view::{ScreenOptions, TuiApp};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Records every committed layout.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commits: Vec<LayoutNode>,
}

impl ChangeSink for RecordingSink {
    fn layout_changed(&mut self, next: &LayoutNode) {
        self.commits.push(next.clone());
    }

    fn status(&self) -> Option<String> {
        (!self.commits.is_empty()).then(|| format!("{} commits", self.commits.len()))
    }
}

/// Harness setup.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Open read-only.
    pub read_only: bool,
    /// Palette entries.
    pub content: Vec<&'static str>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 24,
            read_only: false,
            content: Vec::new(),
        }
    }
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend, RecordingSink>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness on a 100x24 terminal. Ids are issued as `n1`, `n2`, ...
    pub fn new(layout: Option<LayoutNode>) -> Self {
        Self::with_options(layout, HarnessOptions::default())
    }

    /// Harness with custom setup.
    pub fn with_options(layout: Option<LayoutNode>, options: HarnessOptions) -> Self {
        let terminal = Terminal::new(TestBackend::new(options.width, options.height))
            .expect("TestBackend terminal");
        let editor = LayoutEditor::new(
            layout,
            RecordingSink::default(),
            Box::new(SequentialIds::default()),
        )
        .with_read_only(options.read_only);
        let palette = ContentPalette::new(options.content.into_iter().map(ContentRef::new).collect());
        let mut app =
            TuiApp::new_for_test(terminal, editor, ScreenOptions::new("Lobby", false, palette));
        app.render_test().expect("initial render");

        Self { app, running: true }
    }

    // ===== Keys =====

    /// Send a single key event. Returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C). Returns true if the app quit.
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        } else {
            self.app.render_test().expect("render after key");
        }
        quit
    }

    // ===== Mouse =====

    fn send_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if !self.running {
            return;
        }
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.app.render_test().expect("render after mouse");
    }

    /// Left button down.
    pub fn press(&mut self, column: u16, row: u16) {
        self.send_mouse(MouseEventKind::Down(MouseButton::Left), column, row);
    }

    /// Left button drag.
    pub fn drag_to(&mut self, column: u16, row: u16) {
        self.send_mouse(MouseEventKind::Drag(MouseButton::Left), column, row);
    }

    /// Left button up.
    pub fn release(&mut self, column: u16, row: u16) {
        self.send_mouse(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    /// Press at `from`, drag to `to`, release there.
    pub fn drag(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.press(from.0, from.1);
        self.drag_to(to.0, to.1);
        self.release(to.0, to.1);
    }

    /// Press and release in place.
    pub fn click(&mut self, column: u16, row: u16) {
        self.press(column, row);
        self.release(column, row);
    }

    // ===== Inspection =====

    /// The editor.
    pub fn editor(&self) -> &LayoutEditor<RecordingSink> {
        self.app.editor()
    }

    /// Current tree.
    pub fn tree(&self) -> &LayoutNode {
        self.app.editor().tree()
    }

    /// Every committed layout, in order.
    pub fn commits(&self) -> &[LayoutNode] {
        &self.app.editor().sink().commits
    }

    /// Whether the help overlay is showing.
    pub fn help_visible(&self) -> bool {
        self.app.help_visible()
    }

    /// Whether pane titles show ids.
    pub fn show_ids(&self) -> bool {
        self.app.options().show_ids
    }

    /// Check if app is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Rendered row `y`, trailing spaces kept.
    pub fn row(&mut self, y: u16) -> String {
        self.app.render_test().expect("render");
        let buffer = self.app.terminal().backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }
}
