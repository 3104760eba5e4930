//! # Encoder Registry
//!
//! Maps each domain type to the one conversion that turns it into a wire message.
//!
//! ## Invariants
//!
//! - **One Per Type**: at most one encoder per exact domain type. A second
//!   registration for the same type is a wiring error, never an overwrite.
//! - **Exact Match**: an encoder registered for `T` serves only values of type
//!   `T`. Values of type `Box<T>` need their own encoder.

use std::any::Any;

use crate::error::DispatchError;
use crate::error::RegistrationError;
use crate::error::Result;
use crate::signature::validate;
use crate::signature::Candidate;
use crate::signature::Role;
use crate::table::Table;
use crate::types::Reflect;
use crate::types::TypeKey;
use crate::wire::WireMessage;

/// Registry of domain → wire conversions.
pub struct EncoderRegistry {
    pub(crate) table: Table,
}

impl EncoderRegistry {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry with room for `capacity` encoders.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: Table::new(Role::Encoder, capacity) }
    }

    /// Records an encoder.
    ///
    /// Registration usually happens once, at startup, so an invalid encoder
    /// stops the program right there.
    ///
    /// # Panics
    /// If the candidate is absent, not a function, does not map exactly one
    /// input to exactly one wire message, or its domain type is already taken.
    ///
    /// ```
    /// # use neocodec::{Conversion, EncoderRegistry, WireMessage};
    /// # #[derive(Debug)] struct Ping;
    /// # impl WireMessage for Ping {
    /// #     fn pack(&self, enc: &mut neopack::Encoder) -> neopack::Result<()> { enc.unit() }
    /// #     fn unpack(dec: &mut neopack::Decoder<'_>) -> neopack::Result<Self> { dec.unit().map(|_| Ping) }
    /// # }
    /// let encoders = EncoderRegistry::new();
    /// encoders.register(Conversion::encoder(|_: u32| Ping));
    /// assert!(encoders.encode(7u32).is_ok());
    /// ```
    pub fn register(&self, candidate: impl Into<Option<Candidate>>) -> &Self {
        if let Err(err) = self.try_register(candidate) {
            tracing::error!(%err, "invalid encoder registration");
            panic!("{err}");
        }
        self
    }

    /// Records an encoder, returning registration faults instead of panicking.
    pub fn try_register(&self, candidate: impl Into<Option<Candidate>>) -> std::result::Result<&Self, RegistrationError> {
        let conversion = validate(candidate.into(), Role::Encoder)?;
        self.table.insert(conversion)?;
        Ok(self)
    }

    /// Encodes a value with the encoder registered for its exact type.
    ///
    /// `T` is the key, so an already erased `Box<dyn Reflect>` would be looked up
    /// as the box itself. Hand erased values to `encode_dyn` instead.
    pub fn encode<T: Any + Send>(&self, value: T) -> Result<Box<dyn WireMessage>> {
        self.encode_dyn(Box::new(value))
    }

    /// Encodes an already-erased value.
    ///
    /// # Errors
    /// - `NotRegistered` if no encoder accepts the value's concrete type.
    /// - `OutputNotWireMessage` if the encoder returned something other than the
    ///   wire type it declared.
    pub fn encode_dyn(&self, value: Box<dyn Reflect>) -> Result<Box<dyn WireMessage>> {
        // Through the trait object: the box would report `Box<dyn Reflect>`.
        let key = (*value).type_key();
        let entry = self.table.lookup(key)?;

        let output = (entry.call)(Reflect::into_any(value))?;

        entry.output.cast()
            .and_then(|cast| cast(output))
            .ok_or(DispatchError::OutputNotWireMessage(key))
    }

    /// Whether an encoder is registered for exactly `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.table.contains(TypeKey::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The domain types with a registered encoder, in no particular order.
    pub fn registered(&self) -> Vec<TypeKey> {
        self.table.keys()
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
