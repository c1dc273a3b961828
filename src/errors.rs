//! Error types.

/// Alias for [`core::result::Result`] with the `rsa-primitives` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Integer does not fit in the requested number of octets.
    IntegerTooLarge,

    /// Intended encoded message length too short.
    EncodedMessageTooShort,

    /// Requested mask is longer than MGF1 can produce.
    MaskTooLong,

    /// Hash algorithm is not one of the supported digests.
    UnsupportedHash,

    /// DigestInfo without a NULL parameter requested for a hash which requires it.
    DigestInfoRequiresNull,

    /// More than one padding mode of the same category was selected.
    ConflictingPadding,

    /// Requested modulus size is too small.
    KeySizeTooSmall,

    /// Requested smallest prime size is too small.
    PrimeSizeTooSmall,

    /// Public exponent is even or smaller than 3.
    InvalidPublicExponent,

    /// Too few primes of the layout's prime size exist to build the key.
    TooFewPrimes,

    /// Key generation was cancelled.
    Cancelled,

    /// Verification error.
    Verification,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Invalid coefficient.
    InvalidCoefficient,

    /// Native key generation backend failed or returned an unusable key.
    NativeBackend,

    /// PKCS#1 error.
    Pkcs1(pkcs1::Error),

    /// Internal error.
    Internal,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::IntegerTooLarge => write!(f, "integer too large"),
            Error::EncodedMessageTooShort => {
                write!(f, "intended encoded message length too short")
            }
            Error::MaskTooLong => write!(f, "mask too long"),
            Error::UnsupportedHash => write!(f, "unsupported hash algorithm"),
            Error::DigestInfoRequiresNull => {
                write!(f, "hash algorithm requires a NULL DigestInfo parameter")
            }
            Error::ConflictingPadding => {
                write!(f, "at most one padding mode per category may be selected")
            }
            Error::KeySizeTooSmall => write!(f, "key size too small"),
            Error::PrimeSizeTooSmall => write!(f, "smallest prime size too small"),
            Error::InvalidPublicExponent => write!(f, "public exponent must be odd and >= 3"),
            Error::TooFewPrimes => {
                write!(f, "too few primes of given length to generate an RSA key")
            }
            Error::Cancelled => write!(f, "key generation cancelled"),
            Error::Verification => write!(f, "verification error"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidCoefficient => write!(f, "invalid coefficient"),
            Error::NativeBackend => write!(f, "native key generation backend error"),
            Error::Pkcs1(err) => write!(f, "{}", err),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Error {
        Error::Pkcs1(err)
    }
}
