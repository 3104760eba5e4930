//! # Wire messages
//!
//! The capability a type needs to cross the system boundary. The registries only
//! route wire messages by type; the bytes belong to `neopack`.

use std::fmt;

use neopack::Decoder;
use neopack::Encoder;

use crate::types::Reflect;

/// A value that can be packed into, and unpacked from, the neopack wire format.
///
/// This is the only bound placed on the output of an encoder and the input of a
/// decoder. Domain types carry no bound beyond `Any + Send`.
pub trait WireMessage: Reflect + Sync + fmt::Debug {
    /// Writes exactly one neopack item for this message.
    fn pack(&self, enc: &mut Encoder) -> neopack::Result<()>;

    /// Reads one item written by `pack`.
    fn unpack(dec: &mut Decoder<'_>) -> neopack::Result<Self>
    where
        Self: Sized;
}

impl dyn WireMessage {
    pub fn is<W: WireMessage>(&self) -> bool {
        self.as_any().is::<W>()
    }

    pub fn downcast_ref<W: WireMessage>(&self) -> Option<&W> {
        self.as_any().downcast_ref::<W>()
    }

    pub fn downcast<W: WireMessage>(self: Box<Self>) -> Option<Box<W>> {
        Reflect::into_any(self).downcast::<W>().ok()
    }
}

/// Packs a message into a standalone neopack buffer.
pub fn to_bytes(message: &dyn WireMessage) -> neopack::Result<Vec<u8>> {
    let mut enc = Encoder::new();
    message.pack(&mut enc)?;
    enc.into_bytes()
}

/// Unpacks a message of a known wire type from a neopack buffer.
pub fn from_bytes<W: WireMessage>(bytes: &[u8]) -> neopack::Result<W> {
    let mut dec = Decoder::new(bytes);
    W::unpack(&mut dec)
}
