//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for the numeric values the shell lays itself out with.

use std::time::Duration;

/// Height of the header bar in lines.
///
/// Shows the screen name, pane count and revision.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for the palette selection, resize readout and save status.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;

/// How long the event loop waits for input before checking again.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Body text of a pane with no content.
pub const EMPTY_PANE_LABEL: &str = "(empty)";
