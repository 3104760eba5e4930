//! Lock-guarded slot map shared by both registries.
//!
//! Both sides key their conversions by the conversion's input type: the domain
//! type for encoders, the wire type for decoders. Writers take the exclusive
//! lock; lookups take the shared lock and clone the entry out, so the
//! conversion itself runs with no lock held.

use std::collections::HashMap;

use parking_lot::RwLock;
use parking_lot::RwLockWriteGuard;

use crate::error::DispatchError;
use crate::error::RegistrationError;
use crate::error::Result;
use crate::signature::ErasedCall;
use crate::signature::Role;
use crate::signature::Validated;
use crate::types::TypeInfo;
use crate::types::TypeKey;

/// A registered conversion, minus its key.
#[derive(Clone)]
pub(crate) struct Entry {
    /// The type on the other side of the conversion.
    pub(crate) output: TypeInfo,
    pub(crate) call: ErasedCall,
}

pub(crate) struct Slots {
    role: Role,
    map: HashMap<TypeKey, Entry>,
}

impl Slots {
    /// Rejects a conversion whose input type is already taken.
    pub(crate) fn check_vacant(&self, conversion: &Validated) -> std::result::Result<(), RegistrationError> {
        let key = conversion.input.key();
        if self.map.contains_key(&key) {
            return Err(RegistrationError::DuplicateRegistration {
                role: self.role,
                key,
                signature: conversion.describe(),
            });
        }
        Ok(())
    }

    /// Stores a conversion. Callers check vacancy first.
    pub(crate) fn put(&mut self, conversion: Validated) {
        let key = conversion.input.key();
        tracing::debug!(role = %self.role, input = %key, output = %conversion.output.key(), "registered conversion");
        self.map.insert(key, Entry { output: conversion.output, call: conversion.call });
    }
}

pub(crate) struct Table {
    slots: RwLock<Slots>,
}

impl Table {
    pub(crate) fn new(role: Role, capacity: usize) -> Self {
        let map = HashMap::with_capacity(capacity);
        Self { slots: RwLock::new(Slots { role, map }) }
    }

    /// Exclusive access for registration.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Slots> {
        self.slots.write()
    }

    pub(crate) fn insert(&self, conversion: Validated) -> std::result::Result<(), RegistrationError> {
        let mut slots = self.slots.write();
        slots.check_vacant(&conversion)?;
        slots.put(conversion);
        Ok(())
    }

    /// Finds the conversion for an exact input type.
    pub(crate) fn lookup(&self, key: TypeKey) -> Result<Entry> {
        let slots = self.slots.read();
        match slots.map.get(&key) {
            Some(entry) => {
                tracing::trace!(role = %slots.role, input = %key, "dispatching");
                Ok(entry.clone())
            }
            None => {
                tracing::debug!(role = %slots.role, input = %key, "no conversion registered");
                Err(DispatchError::NotRegistered { role: slots.role, key })
            }
        }
    }

    pub(crate) fn contains(&self, key: TypeKey) -> bool {
        self.slots.read().map.contains_key(&key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.read().map.len()
    }

    pub(crate) fn keys(&self) -> Vec<TypeKey> {
        self.slots.read().map.keys().copied().collect()
    }
}
