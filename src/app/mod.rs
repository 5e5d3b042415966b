//! Application orchestration: state, the event reader and input handling.

pub mod event;
pub mod handler;
pub mod state;
