//! Caller-owned destinations and the internal mirror of the last stored value.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use crate::option::Kind;

// ============================================================================
// Dest — shared destination cell
// ============================================================================

/// A destination the caller owns and an option writes into.
///
/// Cloning yields another handle to the same cell, so the caller can keep
/// reading (and mutating) the value after handing a clone to an option.
#[derive(Debug, Default, PartialEq)]
pub struct Dest<T>(Rc<RefCell<T>>);

impl<T> Clone for Dest<T> {
    fn clone(&self) -> Self {
        Dest(Rc::clone(&self.0))
    }
}

impl<T> Dest<T> {
    pub fn new(value: T) -> Self {
        Dest(Rc::new(RefCell::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T: Clone> Dest<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

// ============================================================================
// Value — opaque snapshot in the natural shape of a Kind
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Float64(f64),
    StringSlice(Vec<String>),
    IntSlice(Vec<i64>),
    StringMap(HashMap<String, String>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::StringSlice(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::IntSlice(v)
    }
}

impl From<HashMap<String, String>> for Value {
    fn from(v: HashMap<String, String>) -> Self {
        Value::StringMap(v)
    }
}

// ============================================================================
// Bound — last value plus optional destination
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Bound<T> {
    last: T,
    dest: Option<Dest<T>>,
    preset: bool,
}

impl<T: Clone> Bound<T> {
    /// Attach a destination. A value preset before binding is written into
    /// it; otherwise its current content becomes the last value.
    pub(crate) fn bind(&mut self, dest: &Dest<T>) {
        if self.preset {
            dest.set(self.last.clone());
        } else {
            self.last = dest.get();
        }
        self.dest = Some(dest.clone());
    }

    /// Store an initial value, kept across a later `bind`.
    pub(crate) fn preset(&mut self, value: T) {
        self.store(value);
        self.preset = true;
    }

    /// The value a save builds on: the destination if bound, so caller
    /// edits made between saves are honoured.
    pub(crate) fn current(&self) -> T {
        match &self.dest {
            Some(d) => d.get(),
            None => self.last.clone(),
        }
    }

    /// Write to the destination (if any) and the mirror.
    pub(crate) fn store(&mut self, value: T) {
        if let Some(d) = &self.dest {
            d.set(value.clone());
        }
        self.last = value;
    }

    pub(crate) fn last(&self) -> &T {
        &self.last
    }
}

// ============================================================================
// Slot — one Bound per Kind
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Slot {
    Bool(Bound<bool>),
    String(Bound<String>),
    Int(Bound<i64>),
    Float(Bound<f64>),
    StringList(Bound<Vec<String>>),
    IntList(Bound<Vec<i64>>),
    StringMap(Bound<HashMap<String, String>>),
}

impl Slot {
    pub(crate) fn new(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Slot::Bool(Bound::default()),
            Kind::String => Slot::String(Bound::default()),
            Kind::Int => Slot::Int(Bound::default()),
            Kind::Float => Slot::Float(Bound::default()),
            Kind::StringList => Slot::StringList(Bound::default()),
            Kind::IntList => Slot::IntList(Bound::default()),
            Kind::StringMap => Slot::StringMap(Bound::default()),
        }
    }

    pub(crate) fn value(&self) -> Value {
        match self {
            Slot::Bool(b) => Value::Bool(*b.last()),
            Slot::String(b) => Value::String(b.last().clone()),
            Slot::Int(b) => Value::Int(*b.last()),
            Slot::Float(b) => Value::Float64(*b.last()),
            Slot::StringList(b) => Value::StringSlice(b.last().clone()),
            Slot::IntList(b) => Value::IntSlice(b.last().clone()),
            Slot::StringMap(b) => Value::StringMap(b.last().clone()),
        }
    }
}

// ============================================================================
// Shape — typed access to the Bound inside a Slot
// ============================================================================

/// A Rust type that backs one of the option kinds.
pub(crate) trait Shape: Clone + Default + Sized {
    const KIND: Kind;
    fn bound(slot: &Slot) -> Option<&Bound<Self>>;
    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>>;
}

impl Shape for bool {
    const KIND: Kind = Kind::Bool;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Shape for String {
    const KIND: Kind = Kind::String;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::String(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::String(b) => Some(b),
            _ => None,
        }
    }
}

impl Shape for i64 {
    const KIND: Kind = Kind::Int;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::Int(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::Int(b) => Some(b),
            _ => None,
        }
    }
}

impl Shape for f64 {
    const KIND: Kind = Kind::Float;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::Float(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::Float(b) => Some(b),
            _ => None,
        }
    }
}

impl Shape for Vec<String> {
    const KIND: Kind = Kind::StringList;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::StringList(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::StringList(b) => Some(b),
            _ => None,
        }
    }
}

impl Shape for Vec<i64> {
    const KIND: Kind = Kind::IntList;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::IntList(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::IntList(b) => Some(b),
            _ => None,
        }
    }
}

impl Shape for HashMap<String, String> {
    const KIND: Kind = Kind::StringMap;

    fn bound(slot: &Slot) -> Option<&Bound<Self>> {
        match slot {
            Slot::StringMap(b) => Some(b),
            _ => None,
        }
    }

    fn bound_mut(slot: &mut Slot) -> Option<&mut Bound<Self>> {
        match slot {
            Slot::StringMap(b) => Some(b),
            _ => None,
        }
    }
}
