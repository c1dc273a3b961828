//! Selection between a native key generation backend and the portable generator.

use alloc::vec::Vec;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::errors::Result;

/// Public exponent a native backend must use to be eligible.
pub const NATIVE_EXPONENT: u64 = 65537;

/// Smallest modulus size delegated to a native backend.
pub const NATIVE_MIN_BITS: usize = 384;

/// A platform key generation engine (for example an OpenSSL binding) that
/// can produce two-prime keys faster than the portable generator.
pub trait NativeBackend {
    /// Public exponent the backend always generates keys with.
    fn public_exponent(&self) -> u64;

    /// Generates a two-prime private key of `bits` bits and returns it as a
    /// DER encoded PKCS#1 `RSAPrivateKey`.
    fn generate_pkcs1_der(
        &self,
        bits: usize,
        exponent: u64,
        config_path: Option<&str>,
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// Decides whether key generation for the given parameters may be delegated
/// to `backend`. The choice never affects the shape of the generated key.
pub fn prefer_native_backend(
    nprimes: usize,
    bits: usize,
    public_exponent: &BigUint,
    backend: Option<&dyn NativeBackend>,
) -> bool {
    let Some(backend) = backend else {
        return false;
    };
    nprimes == 2
        && bits >= NATIVE_MIN_BITS
        && *public_exponent == BigUint::from(NATIVE_EXPONENT)
        && backend.public_exponent() == NATIVE_EXPONENT
}
