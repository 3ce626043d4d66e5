// Literals and limits used by the renderer

/// Prefix emitted before an expanded referent, and the bare reuse marker
pub const REFERENCE_SIGIL: &str = "&";

/// Literal for a reference in the "no value" state
pub const NIL_LITERAL: &str = "nil";

/// Marker for a value that is not there at all
pub const INVALID_MARKER: &str = "`Invalid Type`";

/// Prefix of the marker for values the dispatch table cannot render
pub const UNRENDERABLE_PREFIX: &str = "`Unrenderable";

/// Marker emitted in place of values nested deeper than the depth limit
pub const DEPTH_LIMIT_MARKER: &str = "`Depth Limit`";

/// Separator between siblings in aggregates
pub const SEPARATOR: &str = ", ";

/// Default nesting limit for one top-level value
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Width of the ` = ` between a label and its value
pub const HEADER_PADDING: usize = 3;
