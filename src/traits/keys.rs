//! Traits related to the key components

use num_bigint::BigUint;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the modulus size in bytes. Raw signatures and ciphertexts for
    /// or by this public key will have the same size.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }

    /// Returns the modulus size in bits, zero for an unset (zero) modulus.
    fn bits(&self) -> usize {
        self.n().bits()
    }
}

/// Components of an RSA private key.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the prime factors.
    fn primes(&self) -> &[BigUint];

    /// Returns the per-prime CRT exponents, `e^-1 mod (p_i - 1)`.
    fn exponents(&self) -> &[BigUint];

    /// Returns the CRT coefficients, one fewer than there are primes.
    ///
    /// The first entry is `p_2^-1 mod p_1`, entry `j > 0` is
    /// `(p_1 * ... * p_{j+1})^-1 mod p_{j+2}`.
    fn coefficients(&self) -> &[BigUint];
}
