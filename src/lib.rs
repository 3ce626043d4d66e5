//! # Introduction
//!
//! dbgview renders arbitrary values, including cyclic and aliased object
//! graphs, as one line of text. Every reference is expanded the first time
//! it is reached and printed as a reuse marker afterwards. When aliasing was
//! found, a connector diagram drawn under the line links each reference's
//! first appearance to all of its later ones:
//!
//! ```text
//! pair = Pair{ a: &1, b: & }
//!                 │      │
//!                 └──────┘
//! ```
//!
//! ## Rendering pipeline
//!
//! ```text
//! value → Inspect → ValueNode → Introspector → text + registry → Diagram
//! ```
//!
//! 1. [`value`]: the [`Inspect`] trait that turns a value into a closed
//!    [`ValueNode`], and its implementations for std types.
//! 2. [`render`]: the recursive walker, its text buffer, the identity
//!    registry and the diagram builder.
//! 3. [`facade`]: [`render()`], [`format()`] and [`format_flat()`], the
//!    options and the pretty layout.
//! 4. [`debug`]: call-site reports, stack capture and pausing.
//! 5. [`ui`]: ratatui viewer for a report; not part of the stable library API.

pub mod debug;
pub mod error;
pub mod facade;
pub mod render;
pub mod ui;
pub mod value;

pub use debug::{Breaker, Frame, Report};
pub use error::{DebugError, Result};
pub use facade::{format, format_flat, render, Arg, Formatter, RenderOptions};
pub use value::{Field, IdentityKey, Inspect, Referent, ValueNode};
