//! # Decoder Registry
//!
//! The inverse of the encoder registry: maps each wire type to the conversion
//! that turns it back into a domain value. Same invariants, keyed on the wire side.

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
use crate::wire;
use crate::wire::WireMessage;

/// Registry of wire → domain conversions.
pub struct DecoderRegistry {
    pub(crate) table: Table,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: Table::new(Role::Decoder, capacity) }
    }

    /// Records a decoder.
    ///
    /// # Panics
    /// If the candidate is absent, not a function, does not take exactly one wire
    /// message and return exactly one value, or its wire type is already taken.
    pub fn register(&self, candidate: impl Into<Option<Candidate>>) -> &Self {
        if let Err(err) = self.try_register(candidate) {
            tracing::error!(%err, "invalid decoder registration");
            panic!("{err}");
        }
        self
    }

    pub fn try_register(&self, candidate: impl Into<Option<Candidate>>) -> std::result::Result<&Self, RegistrationError> {
        let conversion = validate(candidate.into(), Role::Decoder)?;
        self.table.insert(conversion)?;
        Ok(self)
    }

    /// Decodes a wire message with the decoder registered for its concrete type.
    ///
    /// Accepts a `Box<dyn WireMessage>` or an `Option` of one.
    ///
    /// # Errors
    /// - `NilMessage` when given `None`.
    /// - `NotRegistered` if no decoder accepts the message's concrete type.
    pub fn decode(&self, message: impl Into<Option<Box<dyn WireMessage>>>) -> Result<Box<dyn Any + Send>> {
        let message = message.into().ok_or(DispatchError::NilMessage)?;
        let key = (*message).type_key();
        let entry = self.table.lookup(key)?;

        (entry.call)(Reflect::into_any(message))
    }

    /// Decodes and downcasts the result to `T`.
    pub fn decode_as<T: Any>(&self, message: impl Into<Option<Box<dyn WireMessage>>>) -> Result<T> {
        let value = self.decode(message)?;
        value.downcast::<T>()
            .map(|value| *value)
            .map_err(|_| DispatchError::UnexpectedOutput { expected: TypeKey::of::<T>() })
    }

    /// Unpacks a `W` from neopack bytes and decodes it.
    pub fn decode_bytes<W: WireMessage>(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>> {
        let message: W = wire::from_bytes(bytes)?;
        self.decode(Box::new(message) as Box<dyn WireMessage>)
    }

    /// Whether a decoder is registered for exactly the wire type `W`.
    pub fn contains<W: WireMessage>(&self) -> bool {
        self.table.contains(TypeKey::of::<W>())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn registered(&self) -> Vec<TypeKey> {
        self.table.keys()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
