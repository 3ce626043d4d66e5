//! Rendering configuration

use crate::render::constants::DEFAULT_MAX_DEPTH;
use crate::render::GlyphSet;

const ENV_POINTERS: &str = "DBGVIEW_POINTERS";
const ENV_SHOW_IDENTITY: &str = "DBGVIEW_SHOW_IDENTITY";
const ENV_PRETTY: &str = "DBGVIEW_PRETTY";
const ENV_MAX_DEPTH: &str = "DBGVIEW_MAX_DEPTH";
const ENV_GLYPHS: &str = "DBGVIEW_GLYPHS";

/// Options shared by every value of one formatting call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw the connector diagram under aliased values
    pub print_pointers: bool,
    /// Print reused references as their address instead of a bare `&`
    pub show_identity_value: bool,
    /// Reflow the text one field per line (disables the diagram)
    pub pretty: bool,
    /// Nested inspections allowed per top-level value
    pub max_depth: usize,
    pub glyphs: GlyphSet,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            print_pointers: true,
            show_identity_value: false,
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
            glyphs: GlyphSet::Unicode,
        }
    }
}

impl RenderOptions {
    pub fn with_print_pointers(mut self, print_pointers: bool) -> Self {
        self.print_pointers = print_pointers;
        self
    }

    pub fn with_show_identity_value(mut self, show: bool) -> Self {
        self.show_identity_value = show;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Defaults overridden by `DBGVIEW_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    ///
    /// Unparsable values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if let Some(value) = lookup(ENV_POINTERS) {
            apply(ENV_POINTERS, &value, parse_flag, &mut options.print_pointers);
        }
        if let Some(value) = lookup(ENV_SHOW_IDENTITY) {
            apply(
                ENV_SHOW_IDENTITY,
                &value,
                parse_flag,
                &mut options.show_identity_value,
            );
        }
        if let Some(value) = lookup(ENV_PRETTY) {
            apply(ENV_PRETTY, &value, parse_flag, &mut options.pretty);
        }
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            apply(
                ENV_MAX_DEPTH,
                &value,
                |v| v.parse::<usize>().ok().filter(|&depth| depth > 0),
                &mut options.max_depth,
            );
        }
        if let Some(value) = lookup(ENV_GLYPHS) {
            apply(ENV_GLYPHS, &value, parse_glyphs, &mut options.glyphs);
        }

        options
    }
}

fn apply<T>(key: &str, raw: &str, parse: impl Fn(&str) -> Option<T>, slot: &mut T) {
    match parse(raw.trim()) {
        Some(value) => *slot = value,
        None => tracing::warn!(key, value = raw, "ignoring unparsable setting"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_glyphs(value: &str) -> Option<GlyphSet> {
    match value.to_ascii_lowercase().as_str() {
        "unicode" => Some(GlyphSet::Unicode),
        "ascii" => Some(GlyphSet::Ascii),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> RenderOptions {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RenderOptions::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_is_default() {
        assert_eq!(from_pairs(&[]), RenderOptions::default());
    }

    #[test]
    fn test_overrides() {
        let options = from_pairs(&[
            ("DBGVIEW_POINTERS", "off"),
            ("DBGVIEW_SHOW_IDENTITY", "1"),
            ("DBGVIEW_PRETTY", "TRUE"),
            ("DBGVIEW_MAX_DEPTH", "8"),
            ("DBGVIEW_GLYPHS", "ascii"),
        ]);

        assert!(!options.print_pointers);
        assert!(options.show_identity_value);
        assert!(options.pretty);
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.glyphs, GlyphSet::Ascii);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let options = from_pairs(&[("DBGVIEW_MAX_DEPTH", "0"), ("DBGVIEW_GLYPHS", "emoji")]);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(options.glyphs, GlyphSet::Unicode);
    }
}
