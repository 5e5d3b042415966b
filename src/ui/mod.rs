//! UI / rendering layer.  Everything that touches Ratatui widgets.
//!
//! This layer takes the *core* page model and animation state and turns
//! them into cells on the terminal.  Widgets only read state.

pub mod layout;
pub mod nav_bar;
pub mod page_widget;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
