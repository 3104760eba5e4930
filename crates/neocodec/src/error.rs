//! # Error Definitions
//!
//! Two ledgers of failure, handled differently:
//!
//! - `RegistrationError`: broken wiring. Raised while registering conversions,
//!   normally at startup, and turned into a panic by `register`.
//! - `DispatchError`: an ordinary, recoverable outcome of `encode`/`decode`.

use crate::signature::Role;
use crate::types::TypeKey;

/// A conversion could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// No callable was supplied.
    #[error("{role} can not be absent")]
    NilCallable { role: Role },
    /// The candidate is a plain item, not a function.
    #[error("{role} must be a function, found an item of type `{found}`")]
    NotAFunction { role: Role, found: TypeKey },
    /// The callable does not take exactly one input.
    #[error("{role} must take exactly one input, found {found}")]
    WrongInputArity { role: Role, found: usize },
    /// The callable does not return exactly one output.
    #[error("{role} must return exactly one output, found {found}")]
    WrongOutputArity { role: Role, found: usize },
    /// An encoder's output is not a wire message.
    #[error("encoder output `{0}` is not a wire message: its descriptor lacks the wire cast (build it with `TypeInfo::wire`)")]
    InvalidEncoderOutput(TypeKey),
    /// A decoder's input is not a wire message.
    #[error("decoder input `{0}` is not a wire message: its descriptor lacks the wire cast (build it with `TypeInfo::wire`)")]
    InvalidDecoderInput(TypeKey),
    /// The input type already has a conversion of this role.
    #[error("{role} already registered for `{key}`: {signature}")]
    DuplicateRegistration { role: Role, key: TypeKey, signature: String },
    /// The wire type produced by the encoder is not the one the decoder accepts.
    #[error("wire types do not match: encoder produces `{output}`, decoder accepts `{input}`")]
    PairTypeMismatch { output: TypeKey, input: TypeKey },
    /// The domain type accepted by the encoder is not the one the decoder produces.
    #[error("domain types do not match: encoder accepts `{input}`, decoder produces `{output}`")]
    PairDomainMismatch { input: TypeKey, output: TypeKey },
}

/// An `encode` or `decode` call could not be completed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    /// No conversion is registered for the concrete type of the argument.
    #[error("no {role} registered for values of type `{key}`")]
    NotRegistered { role: Role, key: TypeKey },
    /// `decode` was handed no message at all.
    #[error("cannot decode an absent message")]
    NilMessage,
    /// The encoder returned something other than its declared wire type.
    #[error("encoding a `{0}` did not produce a wire message")]
    OutputNotWireMessage(TypeKey),
    /// An erased conversion was called with a value of the wrong type.
    #[error("conversion expects `{expected}` as input")]
    InputMismatch { expected: TypeKey },
    /// The decoded value is not of the type the caller asked for.
    #[error("decoded value is not a `{expected}`")]
    UnexpectedOutput { expected: TypeKey },
    /// The wire library rejected the bytes.
    #[error("wire format error: {0}")]
    Wire(#[from] neopack::Error),
}

/// A specialized Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
