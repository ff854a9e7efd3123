//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show or hide the help overlay. Default: ?
    ToggleHelp,

    // Display
    /// Show node ids in pane titles. Default: i
    ToggleIds,

    // Layout
    /// Replace the layout with a single empty pane. Default: r
    ResetLayout,

    // Content palette
    /// Select the next palette entry. Default: ]
    NextContent,
    /// Select the previous palette entry. Default: [
    PrevContent,
}

impl KeyAction {
    /// Actions that edit the layout and are suppressed in read-only mode.
    pub fn edits_layout(self) -> bool {
        matches!(self, Self::ResetLayout)
    }
}
