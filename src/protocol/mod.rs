//! Interaction protocol (pure).
//!
//! Leaf interactions become messages, messages travel from the originating
//! node up to the root, and each split on the way may reinterpret them.

pub mod dispatch;
pub mod message;
pub mod reducer;

pub use dispatch::{dispatch, dispatch_intent, propagate, reduce_root, RootOutcome};
pub use message::{Edge, LeafIntent, Msg};
pub use reducer::{reduce_leaf, reduce_split, wrap_with_new_leaf};
