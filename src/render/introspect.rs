//! Recursive value walker
//!
//! The [`Introspector`] owns the [`RenderBuffer`] and [`IdentityRegistry`]
//! for one top-level value. It asks each value for its [`ValueNode`] and
//! dispatches on the node kind only.
//!
//! A reference is registered *before* its referent is expanded, so a cycle
//! back to it is found in the registry and printed as a reuse marker instead
//! of recursing forever.

use super::buffer::RenderBuffer;
use super::constants::{
    DEPTH_LIMIT_MARKER, INVALID_MARKER, NIL_LITERAL, REFERENCE_SIGIL, UNRENDERABLE_PREFIX,
};
use super::diagram::Diagram;
use super::registry::IdentityRegistry;
use crate::facade::options::RenderOptions;
use crate::value::{Inspect, Referent, ValueNode};
use unicode_width::UnicodeWidthStr;

/// Output of one rendering pass
#[derive(Debug, Clone)]
pub struct RenderedValue {
    pub text: String,
    pub registry: IdentityRegistry,
}

impl RenderedValue {
    /// Text width in display columns
    pub fn width(&self) -> usize {
        self.text.width()
    }

    /// Connector diagram for this value, if any identity was reused
    pub fn diagram(&self, header_width: usize) -> Option<Diagram> {
        Diagram::build(&self.registry, header_width, self.width())
    }
}

/// Traversal context for one top-level value
pub struct Introspector<'o> {
    options: &'o RenderOptions,
    buffer: RenderBuffer,
    registry: IdentityRegistry,
    depth: usize,
}

impl<'o> Introspector<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Introspector {
            options,
            buffer: RenderBuffer::new(),
            registry: IdentityRegistry::new(),
            depth: 0,
        }
    }

    /// Render `value` and everything reachable from it
    pub fn render(&mut self, value: &dyn Inspect) {
        if self.depth >= self.options.max_depth {
            tracing::warn!(
                max_depth = self.options.max_depth,
                "value nested past the depth limit, truncating"
            );
            self.buffer.push_str(DEPTH_LIMIT_MARKER);
            return;
        }

        self.depth += 1;
        value.inspect(&mut |node: ValueNode<'_>| self.render_node(node));
        self.depth -= 1;
    }

    pub fn finish(self) -> RenderedValue {
        RenderedValue {
            text: self.buffer.into_string(),
            registry: self.registry,
        }
    }

    fn render_node(&mut self, node: ValueNode<'_>) {
        match node {
            ValueNode::Bool(b) => self.buffer.push_str(if b { "true" } else { "false" }),
            ValueNode::Int(n) => self.buffer.push_str(&n.to_string()),
            ValueNode::Uint(n) => self.buffer.push_str(&n.to_string()),
            ValueNode::Float(x) => self.buffer.push_str(&x.to_string()),
            ValueNode::Complex { re, im } => self.buffer.push_str(&format_complex(re, im)),
            ValueNode::Text(text) => {
                self.buffer.push('"');
                self.buffer.push_str(&text);
                self.buffer.push('"');
            }
            ValueNode::Reference(None) => self.buffer.push_str(NIL_LITERAL),
            ValueNode::Reference(Some(referent)) => self.render_reference(referent),
            ValueNode::Struct { name, fields } => {
                self.buffer.push_str(&name);
                if fields.is_empty() {
                    self.buffer.push_str("{}");
                    return;
                }
                self.buffer.push_str("{ ");
                for (i, field) in fields.iter().enumerate() {
                    self.buffer.separate(i);
                    self.buffer.push_str(&field.name);
                    self.buffer.push_str(": ");
                    self.render(field.value);
                }
                self.buffer.push_str(" }");
            }
            ValueNode::Sequence { element, items } => {
                self.buffer.push_str(&element);
                self.buffer.push('[');
                for (i, item) in items.iter().enumerate() {
                    self.buffer.separate(i);
                    self.render(*item);
                }
                self.buffer.push(']');
            }
            ValueNode::Map { type_name, entries } => {
                self.buffer.push_str(&type_name);
                if entries.is_empty() {
                    self.buffer.push_str("{}");
                    return;
                }
                self.buffer.push_str("{ ");
                for (i, (key, value)) in entries.iter().enumerate() {
                    self.buffer.separate(i);
                    self.render(*key);
                    self.buffer.push_str(": ");
                    self.render(*value);
                }
                self.buffer.push_str(" }");
            }
            ValueNode::Channel { description } => self.buffer.push_str(&description),
            ValueNode::Invalid => self.buffer.push_str(INVALID_MARKER),
            ValueNode::Unrenderable { description } => {
                self.buffer.push_str(UNRENDERABLE_PREFIX);
                self.buffer.push(' ');
                self.buffer.push_str(&description);
                self.buffer.push('`');
            }
        }
    }

    fn render_reference(&mut self, referent: Referent<'_>) {
        if referent.identity.is_zero_sized() {
            self.buffer.push_str(REFERENCE_SIGIL);
            self.render(referent.target);
            return;
        }

        let position = self.buffer.position();

        if let Some(record) = self.registry.lookup_mut(&referent.identity) {
            record.record_usage(position);
            if self.options.show_identity_value {
                self.buffer.push_str(&referent.identity.to_string());
            } else {
                self.buffer.push_str(REFERENCE_SIGIL);
            }
            return;
        }

        self.registry.define(referent.identity, position);
        self.buffer.push_str(REFERENCE_SIGIL);
        self.render(referent.target);
    }
}

/// `(re+imi)`, with the sign spelled out for NaN and infinite parts
fn format_complex(re: f64, im: f64) -> String {
    let sign = if im.is_sign_negative() && !im.is_nan() {
        '-'
    } else {
        '+'
    };
    format!("({}{}{}i)", re, sign, im.abs())
}
