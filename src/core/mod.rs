//! Core page logic: counters, layout, navigation and the form.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! passed in explicitly as a `Duration` since app start.

pub mod color;
pub mod counter;
pub mod easing;
pub mod fade;
pub mod form;
pub mod format;
pub mod nav;
pub mod page;
pub mod scheduler;
pub mod viewport;
