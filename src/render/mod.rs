//! Rendering core
//!
//! - [`buffer`]: append-only text buffer with character positions
//! - [`registry`]: identity registry with one [`PointerRecord`] per shared reference
//! - [`introspect`]: the recursive walker producing text and registry
//! - [`diagram`]: the connector grid built from a finished registry
//! - [`constants`]: output literals and limits
//!
//! One [`Introspector`] renders exactly one top-level value; its registry is
//! never reused, so aliasing is only detected within a single value.

pub mod buffer;
pub mod constants;
pub mod diagram;
pub mod introspect;
pub mod registry;

pub use buffer::RenderBuffer;
pub use diagram::{Diagram, Glyph, GlyphSet};
pub use introspect::{Introspector, RenderedValue};
pub use registry::{IdentityRegistry, PointerRecord};
