//! Terminal breakpoint viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`viewer`]**: viewer state, keyboard event loop and the [`ViewerPause`]
//!   that runs it full screen
//! - **[`theme`]**: colour palette for report text and connector rows
//!
//! [`ViewerPause`]: viewer::ViewerPause

pub mod theme;
pub mod viewer;

pub use viewer::{Viewer, ViewerPause};
