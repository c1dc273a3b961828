use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::algorithms::generate::RsaPrivateKeyComponents;
use crate::algorithms::rsa::{
    compute_coefficients, compute_crt_exponents, compute_modulus,
    compute_private_exponent_carmichael,
};
use crate::errors::{Error, Result};
use crate::generator::{KeyGenerator, RsaConfig};
use crate::params::KeyParams;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    ///
    /// Typically 0x10001 (65537)
    e: BigUint,
    params: KeyParams,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
    /// Prime factors of N, contains >= 2 elements.
    primes: Vec<BigUint>,
    /// `e^-1 mod (p_i - 1)` for every prime.
    exponents: Vec<BigUint>,
    /// CRT coefficients, see [`PrivateKeyParts::coefficients`].
    coefficients: Vec<BigUint>,
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("pubkey_components", &self.pubkey_components)
            .field("primes", &self.primes.len())
            .finish_non_exhaustive()
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        // zeroizing leaves a denormalized zero digit behind
        self.d = BigUint::zero();
        for prime in self.primes.iter_mut() {
            prime.zeroize();
        }
        self.primes.clear();
        for exponent in self.exponents.iter_mut() {
            exponent.zeroize();
        }
        self.exponents.clear();
        for coefficient in self.coefficients.iter_mut() {
            coefficient.zeroize();
        }
        self.coefficients.clear();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.pubkey_components.clone()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = Self {
            n,
            e,
            params: KeyParams::default(),
        };
        check_public(&k)?;
        Ok(k)
    }

    /// Padding and hash configuration of this key.
    pub fn params(&self) -> &KeyParams {
        &self.params
    }

    /// Returns a copy of this key carrying `params`.
    pub fn with_params(&self, params: KeyParams) -> Self {
        Self {
            params,
            ..self.clone()
        }
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn primes(&self) -> &[BigUint] {
        &self.primes
    }

    fn exponents(&self) -> &[BigUint] {
        &self.exponents
    }

    fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size using the default
    /// configuration: exponent 65537, two primes while `bit_size / 2` is at
    /// most 4096, otherwise `bit_size / 4096` primes.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
        KeyGenerator::new(&RsaConfig::default()).generate(rng, bit_size)
    }

    /// Generate a new RSA key pair of the given bit size and public exponent.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: &BigUint,
    ) -> Result<Self> {
        let config = RsaConfig {
            public_exponent: exp.clone(),
            ..RsaConfig::default()
        };
        KeyGenerator::new(&config).generate(rng, bit_size)
    }

    /// Constructs an RSA key pair from individual components, deriving the
    /// CRT exponents and coefficients, and validates the result.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        primes: Vec<BigUint>,
    ) -> Result<RsaPrivateKey> {
        if primes.len() < 2 {
            return Err(Error::InvalidPrime);
        }

        let exponents = compute_crt_exponents(&primes, &e)?;
        let coefficients = compute_coefficients(&primes)?;

        let k = RsaPrivateKey {
            pubkey_components: RsaPublicKey {
                n,
                e,
                params: KeyParams::default(),
            },
            d,
            primes,
            exponents,
            coefficients,
        };

        k.validate()?;
        Ok(k)
    }

    /// Constructs an RSA key pair from its primes and public exponent. The
    /// private exponent is computed modulo Carmichael's λ(n).
    pub fn from_primes(primes: Vec<BigUint>, public_exponent: BigUint) -> Result<RsaPrivateKey> {
        if primes.len() < 2 {
            return Err(Error::InvalidPrime);
        }

        let n = compute_modulus(&primes);
        let d = compute_private_exponent_carmichael(&primes, &public_exponent)?;
        Self::from_components(n, public_exponent, d, primes)
    }

    pub(crate) fn from_generated(components: RsaPrivateKeyComponents) -> RsaPrivateKey {
        RsaPrivateKey {
            pubkey_components: RsaPublicKey {
                n: components.n,
                e: components.e,
                params: KeyParams::default(),
            },
            d: components.d,
            primes: components.primes,
            exponents: components.exponents,
            coefficients: components.coefficients,
        }
    }

    /// Parses a DER encoded two-prime PKCS#1 `RSAPrivateKey`, as produced by a
    /// native backend, cross-checking its CRT values against the derived ones.
    pub(crate) fn from_pkcs1_der(der: &[u8]) -> Result<RsaPrivateKey> {
        let pkcs1_key = pkcs1::RsaPrivateKey::try_from(der)?;

        if pkcs1_key.version() != pkcs1::Version::TwoPrime {
            return Err(Error::NativeBackend);
        }

        let uint = |bytes: pkcs1::UintRef<'_>| BigUint::from_bytes_be(bytes.as_bytes());

        let k = Self::from_components(
            uint(pkcs1_key.modulus),
            uint(pkcs1_key.public_exponent),
            uint(pkcs1_key.private_exponent),
            vec![uint(pkcs1_key.prime1), uint(pkcs1_key.prime2)],
        )?;

        if k.exponents[0] != uint(pkcs1_key.exponent1) || k.exponents[1] != uint(pkcs1_key.exponent2)
        {
            return Err(Error::InvalidExponent);
        }
        if k.coefficients[0] != uint(pkcs1_key.coefficient) {
            return Err(Error::InvalidCoefficient);
        }

        Ok(k)
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` implements the `PublicKey` trait,
    /// but it can occasionally be useful to discard the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Padding and hash configuration of this key.
    pub fn params(&self) -> &KeyParams {
        &self.pubkey_components.params
    }

    /// Returns a copy of this key carrying `params`.
    pub fn with_params(&self, params: KeyParams) -> Self {
        let mut k = self.clone();
        k.pubkey_components.params = params;
        k
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        if self.primes.len() < 2 {
            return Err(Error::InvalidPrime);
        }

        // Check that Πprimes == n.
        let mut m = BigUint::one();
        for prime in &self.primes {
            // Any primes ≤ 1 will cause divide-by-zero panics later.
            if *prime <= BigUint::one() {
                return Err(Error::InvalidPrime);
            }
            m *= prime;
        }
        if m != *self.n() {
            return Err(Error::InvalidModulus);
        }

        // Check that de ≡ 1 mod p-1, for each prime.
        // This implies that e is coprime to each p-1 as e has a multiplicative
        // inverse. Therefore e is coprime to lcm(p-1,q-1,r-1,...) =
        // exponent(ℤ/nℤ). It also implies that a^de ≡ a mod p as a^(p-1) ≡ 1
        // mod p. Thus a^de ≡ a mod n for all a coprime to n, as required.
        let de = self.e() * &self.d;
        for prime in &self.primes {
            let congruence = &de % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        if self.exponents.len() != self.primes.len() {
            return Err(Error::InvalidExponent);
        }
        for (prime, exponent) in self.primes.iter().zip(&self.exponents) {
            let congruence = (self.e() * exponent) % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        if self.coefficients != compute_coefficients(&self.primes)? {
            return Err(Error::InvalidCoefficient);
        }

        Ok(())
    }
}

/// Check that the public key is well formed.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    if public_key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }

    if *public_key.e() <= BigUint::one() {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Padding;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_from_into() {
        let private_key = RsaPrivateKey::from_components(
            big(3233),
            big(17),
            big(413),
            vec![big(61), big(53)],
        )
        .unwrap();
        let public_key: RsaPublicKey = private_key.into();

        assert_eq!(public_key.n(), &big(3233));
        assert_eq!(public_key.e(), &big(17));
        assert_eq!(public_key.size(), 2);
        assert_eq!(public_key.bits(), 12);
    }

    #[test]
    fn test_from_components_derives_crt_values() {
        let key =
            RsaPrivateKey::from_components(big(3233), big(17), big(413), vec![big(61), big(53)])
                .unwrap();
        // 17^-1 mod 60 = 53, 17^-1 mod 52 = 49, 53^-1 mod 61 = 38
        assert_eq!(key.exponents(), &[big(53), big(49)]);
        assert_eq!(key.coefficients(), &[big(38)]);
    }

    #[test]
    fn test_from_primes() {
        let key = RsaPrivateKey::from_primes(vec![big(61), big(53)], big(17)).unwrap();
        assert_eq!(key.n(), &big(3233));
        // lcm(60, 52) = 780, 17 * 413 = 9 * 780 + 1
        assert_eq!(key.d(), &big(413));

        assert_eq!(
            RsaPrivateKey::from_primes(vec![big(61), big(53)], big(5)),
            Err(Error::InvalidExponent)
        );
    }

    #[test]
    fn test_invalid_components() {
        assert_eq!(
            RsaPrivateKey::from_components(big(3233), big(17), big(413), vec![big(3233)]),
            Err(Error::InvalidPrime)
        );
        assert_eq!(
            RsaPrivateKey::from_components(big(3234), big(17), big(413), vec![big(61), big(53)]),
            Err(Error::InvalidModulus)
        );
        assert_eq!(
            RsaPrivateKey::from_components(big(3233), big(17), big(414), vec![big(61), big(53)]),
            Err(Error::InvalidExponent)
        );
        assert_eq!(RsaPublicKey::new(big(0), big(17)), Err(Error::InvalidModulus));
        assert_eq!(RsaPublicKey::new(big(3233), big(1)), Err(Error::InvalidExponent));
    }

    #[test]
    fn test_zeroize_clears_secrets() {
        let mut key =
            RsaPrivateKey::from_components(big(3233), big(17), big(413), vec![big(61), big(53)])
                .unwrap();
        key.zeroize();
        assert!(key.d().is_zero());
        assert_eq!(key.d(), &BigUint::zero());
        assert!(key.d().to_bytes_be().iter().all(|b| *b == 0));
        assert!(key.primes().is_empty());
        assert!(key.exponents().is_empty());
        assert!(key.coefficients().is_empty());
    }

    #[test]
    fn test_with_params_returns_new_key() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let params = key.params().with_hash("sha1").unwrap();
        let configured = key.with_params(params.clone());

        assert_eq!(configured.params(), &params);
        assert_eq!(key.params(), &KeyParams::default());
        assert_eq!(configured.n(), key.n());
        assert_eq!(configured.primes(), key.primes());

        let public_key = configured
            .to_public_key()
            .with_params(KeyParams::new().with_padding(Padding::SIGNATURE_PKCS1).unwrap());
        assert_eq!(public_key.params().encryption_padding(), None);
        assert_eq!(configured.params().hash_len(), 20);
    }

    #[test]
    fn test_validate_generated_key() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for _ in 0..5 {
            let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
            assert_eq!(key.validate(), Ok(()));
            assert_eq!(key.bits(), 512);
            assert_eq!(key.size(), 64);
        }
    }

    #[test]
    fn test_new_with_exp() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let key = RsaPrivateKey::new_with_exp(&mut rng, 256, &big(3)).unwrap();
        assert_eq!(key.e(), &big(3));
        assert_eq!(key.validate(), Ok(()));
    }
}
