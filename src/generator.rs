//! Key generation front end: configuration snapshot, engine selection and
//! cancellation.

use alloc::string::String;
use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::generate::{
    check_generation_params, generate_multi_prime_key_with_exp, prime_layout,
};
use crate::engine::{prefer_native_backend, NativeBackend, NATIVE_EXPONENT};
use crate::errors::{Error, Result};
use crate::key::RsaPrivateKey;
use crate::traits::PublicKeyParts;

/// Default public exponent.
pub const DEFAULT_EXPONENT: u64 = 65537;

/// Default size of the smallest prime; moduli above twice this size are
/// built from more than two primes.
pub const DEFAULT_SMALLEST_PRIME_BITS: usize = 4096;

/// Policy values that would otherwise be process-wide settings.
///
/// A [`KeyGenerator`] takes its own copy when it is created, so changing a
/// shared `RsaConfig` never affects a generation that is already running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaConfig {
    /// Public exponent of generated keys.
    pub public_exponent: BigUint,
    /// Prime size above which keys use more than two primes.
    pub smallest_prime_bits: usize,
    /// Configuration file handed to the native backend, if any.
    pub native_config_path: Option<String>,
    /// Whether private key operations should blind their input.
    pub blinding: bool,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            public_exponent: BigUint::from(DEFAULT_EXPONENT),
            smallest_prime_bits: DEFAULT_SMALLEST_PRIME_BITS,
            native_config_path: None,
            blinding: true,
        }
    }
}

/// Generates RSA private keys.
///
/// ```
/// use rsa_primitives::{KeyGenerator, RsaConfig, traits::PrivateKeyParts};
///
/// let mut rng = rand::thread_rng(); // rand@0.8
///
/// let config = RsaConfig { smallest_prime_bits: 256, ..RsaConfig::default() };
/// let key = KeyGenerator::new(&config).generate(&mut rng, 768).expect("failed to generate a key");
/// assert_eq!(key.primes().len(), 3);
/// ```
pub struct KeyGenerator<'a> {
    config: RsaConfig,
    backend: Option<&'a dyn NativeBackend>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> KeyGenerator<'a> {
    /// Creates a generator using a snapshot of `config`.
    pub fn new(config: &RsaConfig) -> Self {
        Self {
            config: config.clone(),
            backend: None,
            cancel: None,
        }
    }

    /// Allows delegating eligible requests to `backend`.
    pub fn with_backend(mut self, backend: &'a dyn NativeBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Aborts generation with [`Error::Cancelled`] once `flag` is set. The
    /// flag is checked before each attempt, never during a prime search.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The configuration snapshot used by this generator.
    pub fn config(&self) -> &RsaConfig {
        &self.config
    }

    /// Generates a private key whose modulus has exactly `bit_size` bits.
    pub fn generate<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        bit_size: usize,
    ) -> Result<RsaPrivateKey> {
        let config = &self.config;
        check_generation_params(bit_size, &config.public_exponent, config.smallest_prime_bits)?;

        let (nprimes, _) = prime_layout(bit_size, config.smallest_prime_bits);
        if let Some(backend) = self.backend {
            if prefer_native_backend(nprimes, bit_size, &config.public_exponent, Some(backend)) {
                if self.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                match self.generate_native(backend, bit_size) {
                    Ok(key) => return Ok(key),
                    Err(err) => warn!(
                        "native backend failed to generate a {}-bit key ({}), using the portable generator",
                        bit_size, err
                    ),
                }
            }
        }

        let components = generate_multi_prime_key_with_exp(
            rng,
            bit_size,
            &config.public_exponent,
            config.smallest_prime_bits,
            self.cancel,
        )?;
        Ok(RsaPrivateKey::from_generated(components))
    }

    fn generate_native(&self, backend: &dyn NativeBackend, bit_size: usize) -> Result<RsaPrivateKey> {
        debug!("delegating {}-bit key generation to native backend", bit_size);

        let der = backend.generate_pkcs1_der(
            bit_size,
            NATIVE_EXPONENT,
            self.config.native_config_path.as_deref(),
        )?;
        let key = RsaPrivateKey::from_pkcs1_der(&der)?;

        if key.bits() != bit_size || *key.e() != self.config.public_exponent {
            return Err(Error::NativeBackend);
        }

        Ok(key)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}
