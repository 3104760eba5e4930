//! # NeoCodec
//!
//! A type-directed registry of conversions between domain values and wire messages.
//!
//! ## Architecture
//!
//! Applications register, per domain type, a conversion into a `neopack` wire
//! message and a conversion back. `encode`/`decode` then pick the conversion by the
//! exact runtime type of their argument, so domain models never need to know about
//! wire types and vice versa.
//!
//! - **Signature Validator** (`signature`): checks a candidate's shape for its role.
//! - **Encoder Registry** (`encoder`): domain type → conversion producing a wire message.
//! - **Decoder Registry** (`decoder`): wire type → conversion producing a domain value.
//! - **Codec** (`codec`): one of each, registered in round-trip pairs.
//!
//! ## Failure Model
//!
//! Registration faults mean the program is wired wrong: `register` panics, and
//! `try_register` hands the fault back for builders. Dispatch faults are plain
//! `Result`s. Panics raised inside a registered conversion pass through untouched.
//!
//! ```
//! use neocodec::{Codec, Conversion, WireMessage};
//!
//! #[derive(Debug, PartialEq)]
//! struct Account { id: String }
//!
//! #[derive(Debug)]
//! struct AccountMsg { id: String }
//!
//! impl WireMessage for AccountMsg {
//!     fn pack(&self, enc: &mut neopack::Encoder) -> neopack::Result<()> { enc.str(&self.id) }
//!     fn unpack(dec: &mut neopack::Decoder<'_>) -> neopack::Result<Self> {
//!         Ok(AccountMsg { id: dec.str()?.to_string() })
//!     }
//! }
//!
//! let codec = Codec::new();
//! codec.register(
//!     Conversion::encoder(|a: Account| AccountMsg { id: a.id }),
//!     Conversion::decoder(|m: AccountMsg| Account { id: m.id }),
//! );
//!
//! let msg = codec.encode(Account { id: "42".into() }).unwrap();
//! let back: Account = codec.decode_as(msg).unwrap();
//! assert_eq!(back, Account { id: "42".into() });
//! ```

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod signature;
pub mod types;
pub mod wire;

mod table;


pub use codec::Codec;
pub use codec::CodecBuilder;
pub use codec::RegistryView;
pub use decoder::DecoderRegistry;
pub use encoder::EncoderRegistry;
pub use error::DispatchError;
pub use error::RegistrationError;
pub use error::Result;
pub use signature::Candidate;
pub use signature::Conversion;
pub use signature::Role;
pub use signature::Signature;
pub use types::Reflect;
pub use types::TypeInfo;
pub use types::TypeKey;
pub use wire::WireMessage;
