//! Inspected value representation
//!
//! This module defines [`ValueNode`], the closed tagged union every inspected
//! value is reduced to, and the [`Inspect`] trait that adapts concrete Rust
//! types into it.
//!
//! # Node Kinds
//!
//! - Scalars: [`ValueNode::Bool`], [`ValueNode::Int`], [`ValueNode::Uint`],
//!   [`ValueNode::Float`], [`ValueNode::Complex`]
//! - [`ValueNode::Text`]: rendered between quotation marks
//! - [`ValueNode::Reference`]: shared storage, identified by an [`IdentityKey`]
//! - Aggregates: [`ValueNode::Struct`], [`ValueNode::Sequence`], [`ValueNode::Map`]
//! - Markers: [`ValueNode::Channel`], [`ValueNode::Invalid`], [`ValueNode::Unrenderable`]
//!
//! # Laziness
//!
//! Children are handed out as `&dyn Inspect` rather than as nested nodes, so a
//! cyclic graph (an `Rc<RefCell<_>>` ring, say) never has to be materialised.
//! The renderer decides whether to descend into a referent only after
//! consulting its identity registry.

pub mod adapters;
pub mod names;

pub use adapters::{Absent, Complex, Opaque};
pub use names::{short_type_name, shorten_type_name};

use std::borrow::Cow;
use std::fmt;

/// Adapter from a concrete type to a [`ValueNode`]
///
/// Implementations call `out` exactly once with the node describing `self`.
/// The callback shape lets adapters hand out nodes that borrow from
/// temporaries such as a `RefCell` guard.
pub trait Inspect {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>));

    /// Whether a plain `&` borrow of this value renders as the value itself
    /// instead of as a tracked reference. True for text and slices.
    fn borrow_is_transparent(&self) -> bool {
        false
    }
}

/// One inspected value
pub enum ValueNode<'a> {
    Bool(bool),
    Int(i128),
    Uint(u128),
    Float(f64),
    Complex { re: f64, im: f64 },
    Text(Cow<'a, str>),
    /// `None` is the nil state: rendered as `nil`, never registered
    Reference(Option<Referent<'a>>),
    Struct {
        name: Cow<'a, str>,
        fields: Vec<Field<'a>>,
    },
    Sequence {
        element: Cow<'a, str>,
        items: Vec<&'a dyn Inspect>,
    },
    /// Entry order is whatever the source container iterates in
    Map {
        type_name: Cow<'a, str>,
        entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>,
    },
    Channel { description: Cow<'a, str> },
    Invalid,
    Unrenderable { description: Cow<'a, str> },
}

impl<'a> ValueNode<'a> {
    /// Build a named-field aggregate node
    pub fn structure(name: impl Into<Cow<'a, str>>, fields: Vec<Field<'a>>) -> Self {
        ValueNode::Struct {
            name: name.into(),
            fields,
        }
    }

    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        ValueNode::Text(text.into())
    }

    pub fn unrenderable(description: impl Into<Cow<'a, str>>) -> Self {
        ValueNode::Unrenderable {
            description: description.into(),
        }
    }

    /// Short kind label, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ValueNode::Bool(_) => "bool",
            ValueNode::Int(_) => "int",
            ValueNode::Uint(_) => "uint",
            ValueNode::Float(_) => "float",
            ValueNode::Complex { .. } => "complex",
            ValueNode::Text(_) => "text",
            ValueNode::Reference(_) => "reference",
            ValueNode::Struct { .. } => "struct",
            ValueNode::Sequence { .. } => "sequence",
            ValueNode::Map { .. } => "map",
            ValueNode::Channel { .. } => "channel",
            ValueNode::Invalid => "invalid",
            ValueNode::Unrenderable { .. } => "unrenderable",
        }
    }
}

/// A named field of a [`ValueNode::Struct`]
pub struct Field<'a> {
    pub name: Cow<'a, str>,
    pub value: &'a dyn Inspect,
}

impl<'a> Field<'a> {
    pub fn new<T: Inspect>(name: impl Into<Cow<'a, str>>, value: &'a T) -> Self {
        Field {
            name: name.into(),
            value,
        }
    }
}

/// The storage a non-nil reference points at
pub struct Referent<'a> {
    pub identity: IdentityKey,
    pub target: &'a dyn Inspect,
}

/// Identity of one piece of referenced storage
///
/// Two keys are equal iff they denote the same address viewed as the same
/// type. The type component keeps a struct and its first field apart even
/// though they share an address.
///
/// Zero-sized values have no storage of their own: every `Box` of one points
/// at the same dangling address. Such keys are flagged and never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    address: usize,
    type_name: &'static str,
    zero_sized: bool,
}

impl IdentityKey {
    pub fn of<T: ?Sized>(target: &T) -> Self {
        IdentityKey {
            address: (target as *const T).cast::<()>() as usize,
            type_name: std::any::type_name::<T>(),
            zero_sized: std::mem::size_of_val(target) == 0,
        }
    }

    /// Whether the key was taken from a zero-sized value
    pub fn is_zero_sized(&self) -> bool {
        self.zero_sized
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.address)
    }
}

/// Implement [`Inspect`] for a struct with named fields, in declaration order
///
/// ```
/// use dbgview::inspect_struct;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// inspect_struct!(Point { x, y });
///
/// assert_eq!(dbgview::render(false, &[&Point { x: 1, y: 2 }]), "Point{ x: 1, y: 2 }");
/// ```
#[macro_export]
macro_rules! inspect_struct {
    ($ty:ident < $lt:lifetime > { $($field:ident),* $(,)? }) => {
        impl<$lt> $crate::value::Inspect for $ty<$lt> {
            fn inspect(&self, out: &mut dyn FnMut($crate::value::ValueNode<'_>)) {
                out($crate::value::ValueNode::structure(
                    stringify!($ty),
                    vec![$($crate::value::Field::new(stringify!($field), &self.$field)),*],
                ))
            }
        }
    };
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::value::Inspect for $ty {
            fn inspect(&self, out: &mut dyn FnMut($crate::value::ValueNode<'_>)) {
                out($crate::value::ValueNode::structure(
                    stringify!($ty),
                    vec![$($crate::value::Field::new(stringify!($field), &self.$field)),*],
                ))
            }
        }
    };
}
