//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod layout;
pub mod styles;

pub use help::{key_label, render_help_overlay};
pub use layout::{editor_area, render_layout, screen_areas, truncate_to_width, ScreenView};
pub use styles::{ColorConfig, PaneStyles};

use crate::config::KeyBindings;
use crate::geometry::{compose, Composition, Frame};
use crate::model::KeyAction;
use crate::state::{
    handle_mouse_event, handle_palette_action, ChangeSink, ContentPalette, LayoutEditor,
};
use constants::EVENT_POLL_INTERVAL;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Startup options of the terminal shell.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    /// Screen name shown in the header.
    pub name: String,
    /// Show node ids in pane titles.
    pub show_ids: bool,
    /// Content offered for placement.
    pub palette: ContentPalette,
    /// Key map.
    pub key_bindings: KeyBindings,
}

impl ScreenOptions {
    /// Options with default key bindings.
    pub fn new(name: impl Into<String>, show_ids: bool, palette: ContentPalette) -> Self {
        Self {
            name: name.into(),
            show_ids,
            palette,
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: ChangeSink,
{
    terminal: Terminal<B>,
    editor: LayoutEditor<S>,
    options: ScreenOptions,
    help_visible: bool,
    /// Panes as last drawn, for hit testing.
    composition: Composition,
}

impl<S: ChangeSink> TuiApp<CrosstermBackend<Stdout>, S> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(editor: LayoutEditor<S>, options: ScreenOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, editor, options))
    }
}

impl<B, S> TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: ChangeSink,
{
    fn with_terminal(
        terminal: Terminal<B>,
        editor: LayoutEditor<S>,
        options: ScreenOptions,
    ) -> Self {
        Self {
            terminal,
            editor,
            options,
            help_visible: false,
            composition: Composition::default(),
        }
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws only after input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if !event::poll(EVENT_POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                }
                _ => continue,
            }
            self.draw()?;
        }
    }

    /// The editor.
    pub fn editor(&self) -> &LayoutEditor<S> {
        &self.editor
    }

    /// Consume the app, returning the editor.
    pub fn into_editor(self) -> LayoutEditor<S> {
        self.editor
    }

    /// Handle a key press. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if key.code == KeyCode::Esc && self.help_visible {
            self.help_visible = false;
            return false;
        }

        let Some(action) = self.options.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        if action.edits_layout() && self.editor.is_read_only() {
            return false;
        }

        match action {
            KeyAction::Quit => return true,
            KeyAction::ToggleHelp => self.help_visible = !self.help_visible,
            KeyAction::ToggleIds => self.options.show_ids = !self.options.show_ids,
            KeyAction::ResetLayout => self.editor.reset(),
            KeyAction::NextContent | KeyAction::PrevContent => {
                handle_palette_action(&mut self.options.palette, action)
            }
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // a resize in progress still needs its drag and release
        let ends_resize = self.editor.is_tracking_pointer()
            && matches!(mouse.kind, MouseEventKind::Drag(_) | MouseEventKind::Up(_));
        if self.help_visible && !ends_resize {
            return;
        }
        handle_mouse_event(&mut self.editor, mouse, &self.composition, &self.options.palette);
    }

    /// Lay the tree out in the current terminal and render it.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let area = layout::editor_area(Rect::new(0, 0, size.width, size.height));
        self.editor.set_container(Frame::from(area));
        self.composition = compose(
            self.editor.tree(),
            &self.editor.container(),
            self.editor.pending_override(),
        );

        let view = ScreenView {
            name: &self.options.name,
            revision: self.editor.revision(),
            composition: &self.composition,
            resize: self.editor.active_resize(),
            palette: &self.options.palette,
            show_ids: self.options.show_ids,
            read_only: self.editor.is_read_only(),
            status: self.editor.sink().status(),
        };
        let help_visible = self.help_visible;
        let bindings = &self.options.key_bindings;

        self.terminal.draw(|frame| {
            layout::render_layout(frame, &view);
            if help_visible {
                help::render_help_overlay(frame, bindings, view.read_only);
            }
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// Crate-internal hooks for the acceptance harness.

#[cfg(test)]
impl<B, S> TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: ChangeSink,
{
    /// Create TuiApp on any backend without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        editor: LayoutEditor<S>,
        options: ScreenOptions,
    ) -> Self {
        Self::with_terminal(terminal, editor, options)
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event.
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Render a single frame.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Terminal, for buffer inspection.
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Shell options as currently toggled.
    pub(crate) fn options(&self) -> &ScreenOptions {
        &self.options
    }

    /// Whether the help overlay is showing.
    pub(crate) fn help_visible(&self) -> bool {
        self.help_visible
    }
}

/// Initialize and run the TUI application around `editor`.
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
/// Logging must be initialized by the caller.
pub fn run_with_editor<S: ChangeSink>(
    editor: LayoutEditor<S>,
    options: ScreenOptions,
) -> Result<LayoutEditor<S>, TuiError> {
    let mut app = match TuiApp::new(editor, options) {
        Ok(app) => app,
        Err(e) => {
            // setup may have failed halfway
            let _ = restore_terminal();
            return Err(e);
        }
    };

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result.map(|()| app.into_editor())
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
