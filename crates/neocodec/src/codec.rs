//! # Codec
//!
//! One encoder registry and one decoder registry, registered in pairs.
//!
//! ## Invariants
//!
//! - **Round-Trip Pairs**: the wire type an encoder produces is the wire type its
//!   decoder accepts, and the domain type the decoder produces is the one the
//!   encoder accepts. Checked once, when the pair is registered.
//! - **All Or Nothing**: a rejected pair leaves both registries untouched. Both
//!   write locks are held (encoder first, then decoder) across the vacancy
//!   checks and the insertion.

use std::any::Any;

use crate::decoder::DecoderRegistry;
use crate::encoder::EncoderRegistry;
use crate::error::RegistrationError;
use crate::error::Result;
use crate::signature::validate;
use crate::signature::Candidate;
use crate::signature::Role;
use crate::table::Table;
use crate::types::Reflect;
use crate::types::TypeKey;
use crate::wire::WireMessage;

/// Bidirectional registry of domain <-> wire conversions.
pub struct Codec {
    encoder: EncoderRegistry,
    decoder: DecoderRegistry,
}

impl Codec {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty codec with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            encoder: EncoderRegistry::with_capacity(capacity),
            decoder: DecoderRegistry::with_capacity(capacity),
        }
    }

    /// Starts a declarative codec definition.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::default()
    }

    /// Records an encoder/decoder pair.
    ///
    /// # Panics
    /// If either conversion is invalid on its own, the pair does not agree on its
    /// wire or domain type, or either side is already registered.
    pub fn register(
        &self,
        encoder: impl Into<Option<Candidate>>,
        decoder: impl Into<Option<Candidate>>,
    ) -> &Self {
        if let Err(err) = self.try_register(encoder, decoder) {
            tracing::error!(%err, "invalid codec registration");
            panic!("{err}");
        }
        self
    }

    pub fn try_register(
        &self,
        encoder: impl Into<Option<Candidate>>,
        decoder: impl Into<Option<Candidate>>,
    ) -> std::result::Result<&Self, RegistrationError> {
        let encoder = validate(encoder.into(), Role::Encoder)?;
        let decoder = validate(decoder.into(), Role::Decoder)?;

        if encoder.output.key() != decoder.input.key() {
            return Err(RegistrationError::PairTypeMismatch {
                output: encoder.output.key(),
                input: decoder.input.key(),
            });
        }

        if encoder.input.key() != decoder.output.key() {
            return Err(RegistrationError::PairDomainMismatch {
                input: encoder.input.key(),
                output: decoder.output.key(),
            });
        }

        let mut encoders = self.encoder.table.write();
        let mut decoders = self.decoder.table.write();

        encoders.check_vacant(&encoder)?;
        decoders.check_vacant(&decoder)?;

        encoders.put(encoder);
        decoders.put(decoder);

        Ok(self)
    }

    /// See `EncoderRegistry::encode`; erased values go through `encode_dyn`.
    pub fn encode<T: Any + Send>(&self, value: T) -> Result<Box<dyn WireMessage>> {
        self.encoder.encode(value)
    }

    pub fn encode_dyn(&self, value: Box<dyn Reflect>) -> Result<Box<dyn WireMessage>> {
        self.encoder.encode_dyn(value)
    }

    pub fn decode(&self, message: impl Into<Option<Box<dyn WireMessage>>>) -> Result<Box<dyn Any + Send>> {
        self.decoder.decode(message)
    }

    pub fn decode_as<T: Any>(&self, message: impl Into<Option<Box<dyn WireMessage>>>) -> Result<T> {
        self.decoder.decode_as(message)
    }

    pub fn decode_bytes<W: WireMessage>(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>> {
        self.decoder.decode_bytes::<W>(bytes)
    }

    /// Introspection of the encoding side. Registration only goes through `register`.
    pub fn encoder(&self) -> RegistryView<'_> {
        RegistryView { table: &self.encoder.table }
    }

    /// Introspection of the decoding side.
    pub fn decoder(&self) -> RegistryView<'_> {
        RegistryView { table: &self.decoder.table }
    }
}

/// Read-only view of one side of a `Codec`.
///
/// Conversions can only enter a codec in pairs, so the view has no `register`:
///
/// ```compile_fail
/// # use neocodec::{Codec, Conversion, WireMessage};
/// # #[derive(Debug)] struct Ping;
/// # impl WireMessage for Ping {
/// #     fn pack(&self, enc: &mut neopack::Encoder) -> neopack::Result<()> { enc.unit() }
/// #     fn unpack(dec: &mut neopack::Decoder<'_>) -> neopack::Result<Self> { dec.unit().map(|_| Ping) }
/// # }
/// let codec = Codec::new();
/// codec.encoder().register(Conversion::encoder(|_: u8| Ping));
/// ```
#[derive(Clone, Copy)]
pub struct RegistryView<'a> {
    table: &'a Table,
}

impl RegistryView<'_> {
    /// Whether a conversion is registered for exactly the input type `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.table.contains(TypeKey::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The input types with a registered conversion, in no particular order.
    pub fn registered(&self) -> Vec<TypeKey> {
        self.table.keys()
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects pairs and builds a `Codec` in one step.
///
/// ```
/// # use neocodec::{Codec, Conversion, WireMessage};
/// # #[derive(Debug)] struct Ping;
/// # impl WireMessage for Ping {
/// #     fn pack(&self, enc: &mut neopack::Encoder) -> neopack::Result<()> { enc.unit() }
/// #     fn unpack(dec: &mut neopack::Decoder<'_>) -> neopack::Result<Self> { dec.unit().map(|_| Ping) }
/// # }
/// let codec = Codec::builder()
///     .pair(Conversion::encoder(|_: ()| Ping), Conversion::decoder(|_: Ping| ()))
///     .build()
///     .expect("valid pairs");
/// assert_eq!(codec.encoder().len(), 1);
/// ```
#[derive(Default)]
pub struct CodecBuilder {
    pairs: Vec<(Option<Candidate>, Option<Candidate>)>,
}

impl CodecBuilder {
    pub fn pair(
        mut self,
        encoder: impl Into<Option<Candidate>>,
        decoder: impl Into<Option<Candidate>>,
    ) -> Self {
        self.pairs.push((encoder.into(), decoder.into()));
        self
    }

    /// Registers every pair in order.
    ///
    /// # Errors
    /// The first registration fault, as `Codec::try_register` reports it.
    pub fn build(self) -> std::result::Result<Codec, RegistrationError> {
        let codec = Codec::with_capacity(self.pairs.len());
        for (encoder, decoder) in self.pairs {
            codec.try_register(encoder, decoder)?;
        }
        Ok(codec)
    }
}
