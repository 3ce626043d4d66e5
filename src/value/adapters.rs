//! [`Inspect`] implementations for std types
//!
//! Smart pointers (`Box`, `Rc`, `Arc`, `Weak`) and plain borrows become
//! [`ValueNode::Reference`] nodes keyed by the address of their target.
//! Interior-mutability cells and `Option` are transparent: they render as
//! whatever they hold.

use super::names::short_type_name;
use super::{IdentityKey, Inspect, Referent, ValueNode};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::{self, Rc};
use std::sync::{self, mpsc, Arc, Mutex, TryLockError};

/// Complex number, rendered as `(re+imi)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }
}

/// A value that is not there at all; renders as the invalid marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Absent;

/// Wrapper for values that cannot be rendered as data
///
/// Only the wrapped type's name appears in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Opaque<T>(pub T);

/// View of a possibly unsized referent as a sized trait object
struct Pointee<'a, T: ?Sized>(&'a T);

impl<T: Inspect + ?Sized> Inspect for Pointee<'_, T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        self.0.inspect(out)
    }
}

fn reference_to<T: Inspect + ?Sized>(target: &T, out: &mut dyn FnMut(ValueNode<'_>)) {
    let pointee = Pointee(target);
    out(ValueNode::Reference(Some(Referent {
        identity: IdentityKey::of(target),
        target: &pointee,
    })));
}

fn sequence<'a, T: Inspect + 'a>(
    items: impl Iterator<Item = &'a T>,
    out: &mut dyn FnMut(ValueNode<'_>),
) {
    out(ValueNode::Sequence {
        element: short_type_name::<T>().into(),
        items: items.map(|item| item as &dyn Inspect).collect(),
    })
}

fn map<'a, K: Inspect + 'a, V: Inspect + 'a>(
    container: &str,
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    out: &mut dyn FnMut(ValueNode<'_>),
) {
    out(ValueNode::Map {
        type_name: format!(
            "{}<{}, {}>",
            container,
            short_type_name::<K>(),
            short_type_name::<V>()
        )
        .into(),
        entries: entries
            .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
            .collect(),
    })
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(impl Inspect for $t {
            fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
                out(ValueNode::Int(*self as i128))
            }
        })*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(impl Inspect for $t {
            fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
                out(ValueNode::Uint(*self as u128))
            }
        })*
    };
}

impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);

impl Inspect for bool {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Bool(*self))
    }
}

impl Inspect for f64 {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Float(*self))
    }
}

impl Inspect for f32 {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        // Widen through the shortest decimal form so 0.1f32 stays 0.1
        let widened = self.to_string().parse().unwrap_or(f64::from(*self));
        out(ValueNode::Float(widened))
    }
}

impl Inspect for Complex {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Complex {
            re: self.re,
            im: self.im,
        })
    }
}

impl Inspect for char {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::text(self.to_string()))
    }
}

impl Inspect for str {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::text(self))
    }

    fn borrow_is_transparent(&self) -> bool {
        true
    }
}

impl Inspect for String {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::text(self.as_str()))
    }

    fn borrow_is_transparent(&self) -> bool {
        true
    }
}

impl Inspect for Absent {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Invalid)
    }
}

impl<T> Inspect for Opaque<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::unrenderable(short_type_name::<T>()))
    }
}

impl Inspect for dyn Any {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::unrenderable("dyn Any"))
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        match self {
            Some(value) => value.inspect(out),
            None => out(ValueNode::Reference(None)),
        }
    }
}

// === References ===

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        if (**self).borrow_is_transparent() {
            (**self).inspect(out)
        } else {
            reference_to(&**self, out)
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        if (**self).borrow_is_transparent() {
            (**self).inspect(out)
        } else {
            reference_to(&**self, out)
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        reference_to(&**self, out)
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        reference_to(&**self, out)
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        reference_to(&**self, out)
    }
}

impl<T: Inspect + ?Sized> Inspect for rc::Weak<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        match self.upgrade() {
            Some(strong) => reference_to(&*strong, out),
            None => out(ValueNode::Reference(None)),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for sync::Weak<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        match self.upgrade() {
            Some(strong) => reference_to(&*strong, out),
            None => out(ValueNode::Reference(None)),
        }
    }
}

// === Cells ===

impl<T: Inspect + ?Sized> Inspect for RefCell<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        match self.try_borrow() {
            Ok(guard) => (*guard).inspect(out),
            Err(_) => out(ValueNode::unrenderable(format!(
                "{} (mutably borrowed)",
                short_type_name::<Self>()
            ))),
        }
    }
}

impl<T: Inspect + Copy> Inspect for Cell<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        self.get().inspect(out)
    }
}

impl<T: Inspect + ?Sized> Inspect for Mutex<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        match self.try_lock() {
            Ok(guard) => (*guard).inspect(out),
            Err(TryLockError::Poisoned(poisoned)) => {
                let guard = poisoned.into_inner();
                (*guard).inspect(out)
            }
            Err(TryLockError::WouldBlock) => out(ValueNode::unrenderable(format!(
                "{} (locked)",
                short_type_name::<Self>()
            ))),
        }
    }
}

// === Sequences ===

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        sequence(self.iter(), out)
    }

    fn borrow_is_transparent(&self) -> bool {
        true
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        sequence(self.iter(), out)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        sequence(self.iter(), out)
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        sequence(self.iter(), out)
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        sequence(self.iter(), out)
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        sequence(self.iter(), out)
    }
}

// === Maps ===

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        map("HashMap", self.iter(), out)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        map("BTreeMap", self.iter(), out)
    }
}

// === Channels ===

impl<T> Inspect for mpsc::Sender<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Channel {
            description: short_type_name::<Self>().into(),
        })
    }
}

impl<T> Inspect for mpsc::SyncSender<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Channel {
            description: short_type_name::<Self>().into(),
        })
    }
}

impl<T> Inspect for mpsc::Receiver<T> {
    fn inspect(&self, out: &mut dyn FnMut(ValueNode<'_>)) {
        out(ValueNode::Channel {
            description: short_type_name::<Self>().into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(value: &dyn Inspect) -> &'static str {
        let mut kind = "";
        value.inspect(&mut |node: ValueNode<'_>| kind = node.kind());
        kind
    }

    fn identity_of(value: &dyn Inspect) -> Option<IdentityKey> {
        let mut identity = None;
        value.inspect(&mut |node: ValueNode<'_>| {
            if let ValueNode::Reference(Some(referent)) = node {
                identity = Some(referent.identity);
            }
        });
        identity
    }

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(kind_of(&-3i8), "int");
        assert_eq!(kind_of(&3usize), "uint");
        assert_eq!(kind_of(&true), "bool");
        assert_eq!(kind_of(&1.5f32), "float");
        assert_eq!(kind_of(&Complex::new(1.0, 2.0)), "complex");
        assert_eq!(kind_of(&'x'), "text");
    }

    #[test]
    fn test_text_borrows_are_transparent() {
        let owned = String::from("hi");
        assert_eq!(kind_of(&"hi"), "text");
        assert_eq!(kind_of(&&owned), "text");
        assert_eq!(kind_of(&&[1, 2][..]), "sequence");
    }

    #[test]
    fn test_plain_borrow_is_reference() {
        let x = 1;
        let r = &x;
        assert_eq!(kind_of(&r), "reference");
        assert_eq!(identity_of(&r), Some(IdentityKey::of(&x)));
    }

    #[test]
    fn test_rc_clones_share_identity() {
        let a = Rc::new(5u8);
        let b = Rc::clone(&a);
        assert_eq!(identity_of(&a), identity_of(&b));

        let c = Rc::new(5u8);
        assert_ne!(identity_of(&a), identity_of(&c));
    }

    #[test]
    fn test_zero_sized_boxes_are_flagged() {
        let first = Box::new(Absent);
        let second = Box::new(Absent);

        let identity = identity_of(&first).unwrap();
        assert!(identity.is_zero_sized());
        assert!(identity_of(&second).unwrap().is_zero_sized());
        assert!(!identity_of(&Box::new(1u8)).unwrap().is_zero_sized());
    }

    #[test]
    fn test_none_and_dead_weak_are_nil() {
        let mut nil = false;
        Inspect::inspect(&None::<Box<i32>>, &mut |node: ValueNode<'_>| {
            nil = matches!(node, ValueNode::Reference(None));
        });
        assert!(nil);

        let weak = {
            let strong = Rc::new(1);
            Rc::downgrade(&strong)
        };
        let mut dead = false;
        weak.inspect(&mut |node: ValueNode<'_>| {
            dead = matches!(node, ValueNode::Reference(None));
        });
        assert!(dead);
    }

    #[test]
    fn test_busy_refcell_is_unrenderable() {
        let cell = RefCell::new(1);
        let _guard = cell.borrow_mut();
        assert_eq!(kind_of(&cell), "unrenderable");
    }

    #[test]
    fn test_markers() {
        let (tx, rx) = mpsc::channel::<i32>();
        assert_eq!(kind_of(&tx), "channel");
        assert_eq!(kind_of(&rx), "channel");
        assert_eq!(kind_of(&Absent), "invalid");
        assert_eq!(kind_of(&Opaque(|| 1)), "unrenderable");
    }
}
