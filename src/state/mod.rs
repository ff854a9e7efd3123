//! Editor state machine (pure).
//!
//! All state transitions are testable without a terminal.

pub mod editor;
pub mod mouse_handler;
pub mod palette;
pub mod pointer;

// Re-export for convenience
pub use editor::{ActiveResize, ChangeSink, LayoutEditor};
pub use mouse_handler::{detect_hit, handle_mouse_event, HitTarget};
pub use palette::{handle_palette_action, ContentPalette};
pub use pointer::{ListenerGauge, PointerSubscription};
