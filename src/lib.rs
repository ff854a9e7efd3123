//! Signage Layout Editor
//!
//! Terminal editor for recursive split-pane screen layouts.
//!
//! Pure Core / Impure Shell: `model`, `protocol`, `geometry` and `state`
//! never touch the terminal or the file system (document persistence in
//! `model::persist` aside); `view`, `config` and `logging` do.

pub mod config;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
