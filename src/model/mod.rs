//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod layout_node;
pub mod persist;

// Re-export for convenience
pub use error::{AppError, DocumentError};
pub use identifiers::{IdGenerator, InvalidNodeId, NodeId, SequentialIds, UuidIds};
pub use key_action::KeyAction;
pub use layout_node::{Axis, ContentRef, LayoutNode, Ratio, Slot};
pub use persist::{ScreenDocument, DOCUMENT_VERSION};
