//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests driving the terminal app with synthetic
//! mouse and key events.

mod view_snapshots;
