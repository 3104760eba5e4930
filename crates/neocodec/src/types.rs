//! # Type identity
//!
//! Registries are keyed by the exact concrete type of a value.
//!
//! ## Invariants
//!
//! - **Exact Identity**: `T` and `Box<T>` are different keys. Nothing here strips
//!   an owning pointer to reach the value behind it.
//! - **Erased Values Keep Their Key**: a value boxed as `dyn Reflect` reports the
//!   key of the concrete type it was created from, not the key of the box.

use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use crate::wire::WireMessage;

/// A comparable descriptor of a concrete `'static` type.
///
/// Equality and hashing only look at the `TypeId`; the name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + Any>() -> Self {
        Self { id: TypeId::of::<T>(), name: std::any::type_name::<T>() }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

/// Object-safe access to the concrete identity of an erased value.
///
/// Implemented for every `Any + Send` type. When holding a `Box<dyn Reflect>`
/// (or `Box<dyn WireMessage>`), call through the trait object with
/// `(*boxed).type_key()`: the box itself also implements `Reflect` and would
/// report its own key.
pub trait Reflect: Any + Send {
    fn type_key(&self) -> TypeKey;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Any + Send> Reflect for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Turns an erased value back into a wire message, if it holds the expected type.
pub(crate) type WireCast = fn(Box<dyn Any + Send>) -> Option<Box<dyn WireMessage>>;

fn wire_cast<W: WireMessage>(value: Box<dyn Any + Send>) -> Option<Box<dyn WireMessage>> {
    let message: Box<W> = value.downcast::<W>().ok()?;
    Some(message as Box<dyn WireMessage>)
}

/// A parameter or result type as seen by the signature validator.
///
/// A descriptor is wire-capable exactly when it was built with
/// [`TypeInfo::wire`]; the capability is the cast it carries.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    key: TypeKey,
    cast: Option<WireCast>,
}

impl TypeInfo {
    /// A plain domain type.
    ///
    /// The descriptor carries no wire cast, so it never counts as a wire message,
    /// even when `T` implements `WireMessage`. Describe wire types with
    /// `TypeInfo::wire` instead.
    pub fn of<T: Any>() -> Self {
        Self { key: TypeKey::of::<T>(), cast: None }
    }

    /// A type that satisfies the wire message capability.
    pub fn wire<W: WireMessage>() -> Self {
        Self { key: TypeKey::of::<W>(), cast: Some(wire_cast::<W>) }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn is_wire(&self) -> bool {
        self.cast.is_some()
    }

    pub(crate) fn cast(&self) -> Option<WireCast> {
        self.cast
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("key", &self.key)
            .field("wire", &self.is_wire())
            .finish()
    }
}
