//! # Signature Validation
//!
//! Every conversion handed to a registry is described by a `Signature`: the
//! reflected list of its parameter and result types. Before anything is stored,
//! the signature is checked against the role the conversion will play.
//!
//! ## Philosophy
//!
//! - **Register-Time Safety**: shape errors are wiring bugs. They are found once,
//!   when the conversion is registered, never on the dispatch path.
//! - **Typed In, Erased Out**: `Conversion::encoder`/`Conversion::decoder` derive
//!   the signature from the closure's types, so typed callers always pass.
//!   `Conversion::new` takes a hand-written signature for callers that only know
//!   the shape at runtime, and those are the shapes that can fail.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::error::RegistrationError;
use crate::error::Result;
use crate::types::TypeInfo;
use crate::types::TypeKey;
use crate::wire::WireMessage;

/// Which side of the translation a conversion sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Domain value in, wire message out.
    Encoder,
    /// Wire message in, domain value out.
    Decoder,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Encoder => f.write_str("encoder"),
            Role::Decoder => f.write_str("decoder"),
        }
    }
}

/// A type-erased conversion body.
pub(crate) type ErasedCall =
    Arc<dyn Fn(Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>> + Send + Sync>;

/// The reflected shape of a callable.
#[derive(Debug, Clone)]
pub struct Signature {
    pub params: Vec<TypeInfo>,
    pub results: Vec<TypeInfo>,
}

impl Signature {
    pub fn new(params: Vec<TypeInfo>, results: Vec<TypeInfo>) -> Self {
        Self { params, results }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params.iter()
            .map(|p| p.key().name())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({})", params)?;

        match self.results.as_slice() {
            [] => Ok(()),
            [one] => write!(f, " -> {}", one.key()),
            many => {
                let results = many.iter()
                    .map(|r| r.key().name())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, " -> ({})", results)
            }
        }
    }
}

/// A callable together with its signature.
#[derive(Clone)]
pub struct Conversion {
    signature: Signature,
    call: ErasedCall,
}

impl Conversion {
    /// Wraps an erased body described by an explicit signature.
    ///
    /// The body receives the input boxed as `Any` and must downcast it itself.
    pub fn new<F>(signature: Signature, call: F) -> Self
    where
        F: Fn(Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>> + Send + Sync + 'static,
    {
        Self { signature, call: Arc::new(call) }
    }

    /// An encoder from the domain type `T` to the wire type `W`.
    pub fn encoder<T, W, F>(f: F) -> Self
    where
        T: Any + Send,
        W: WireMessage,
        F: Fn(T) -> W + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![TypeInfo::of::<T>()], vec![TypeInfo::wire::<W>()]);
        Self { signature, call: erase(f) }
    }

    /// A decoder from the wire type `W` to the domain type `T`.
    pub fn decoder<W, T, F>(f: F) -> Self
    where
        W: WireMessage,
        T: Any + Send,
        F: Fn(W) -> T + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![TypeInfo::wire::<W>()], vec![TypeInfo::of::<T>()]);
        Self { signature, call: erase(f) }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

fn erase<A, R, F>(f: F) -> ErasedCall
where
    A: Any + Send,
    R: Any + Send,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Arc::new(move |input: Box<dyn Any + Send>| {
        let input = input.downcast::<A>()
            .map_err(|_| DispatchError::InputMismatch { expected: TypeKey::of::<A>() })?;
        Ok(Box::new(f(*input)) as Box<dyn Any + Send>)
    })
}

/// Anything offered to `register`.
#[derive(Debug, Clone)]
pub enum Candidate {
    /// A callable conversion.
    Func(Conversion),
    /// A non-callable item, e.g. a constant picked up by a dynamic loader.
    Item(TypeInfo),
}

impl From<Conversion> for Candidate {
    fn from(conversion: Conversion) -> Self {
        Candidate::Func(conversion)
    }
}

impl From<Conversion> for Option<Candidate> {
    fn from(conversion: Conversion) -> Self {
        Some(Candidate::Func(conversion))
    }
}

/// A conversion that passed validation for a given role.
#[derive(Clone)]
pub struct Validated {
    pub input: TypeInfo,
    pub output: TypeInfo,
    pub(crate) call: ErasedCall,
}

impl Validated {
    /// Renders the accepted shape, e.g. `fn(app::Account) -> pb::AccountMsg`.
    pub fn describe(&self) -> String {
        format!("fn({}) -> {}", self.input.key(), self.output.key())
    }
}

impl fmt::Debug for Validated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validated")
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Checks that a candidate can serve as a conversion of the given role.
///
/// # Errors
/// Returns the first violated rule, checked in this order: presence, callability,
/// input arity, output arity, wire capability of the role's wire side.
pub fn validate(candidate: Option<Candidate>, role: Role) -> std::result::Result<Validated, RegistrationError> {
    let conversion = match candidate {
        None => return Err(RegistrationError::NilCallable { role }),
        Some(Candidate::Item(item)) => {
            return Err(RegistrationError::NotAFunction { role, found: item.key() });
        }
        Some(Candidate::Func(conversion)) => conversion,
    };

    let Conversion { signature, call } = conversion;

    let [input] = signature.params.as_slice() else {
        return Err(RegistrationError::WrongInputArity { role, found: signature.params.len() });
    };

    let [output] = signature.results.as_slice() else {
        return Err(RegistrationError::WrongOutputArity { role, found: signature.results.len() });
    };

    match role {
        Role::Encoder if !output.is_wire() => {
            return Err(RegistrationError::InvalidEncoderOutput(output.key()));
        }
        Role::Decoder if !input.is_wire() => {
            return Err(RegistrationError::InvalidDecoderInput(input.key()));
        }
        _ => {}
    }

    Ok(Validated { input: *input, output: *output, call })
}
