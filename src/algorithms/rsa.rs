//! Number theoretic helpers shared by key generation and key construction.

use alloc::vec::Vec;
use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::errors::{Error, Result};

/// Returns `a^-1 mod m`, if it exists.
pub(crate) fn inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() || m.is_one() {
        return None;
    }
    let a = a % m;
    if a.is_zero() {
        return None;
    }
    a.mod_inverse(m).and_then(IntoBigUint::into_biguint)
}

/// Computes the modulus from the primes.
pub(crate) fn compute_modulus(primes: &[BigUint]) -> BigUint {
    primes.iter().fold(BigUint::one(), |acc, p| acc * p)
}

/// Carmichael's function λ(n) = lcm(p_i - 1).
pub(crate) fn compute_lambda(primes: &[BigUint]) -> BigUint {
    primes
        .iter()
        .fold(BigUint::one(), |acc, p| acc.lcm(&(p - BigUint::one())))
}

/// Private exponent `d = e^-1 mod λ(n)`.
pub(crate) fn compute_private_exponent_carmichael(
    primes: &[BigUint],
    exp: &BigUint,
) -> Result<BigUint> {
    inverse(exp, &compute_lambda(primes)).ok_or(Error::InvalidExponent)
}

/// Per-prime CRT exponents `e^-1 mod (p_i - 1)`.
pub(crate) fn compute_crt_exponents(primes: &[BigUint], exp: &BigUint) -> Result<Vec<BigUint>> {
    primes
        .iter()
        .map(|p| inverse(exp, &(p - BigUint::one())).ok_or(Error::InvalidExponent))
        .collect()
}

/// CRT coefficients in PKCS#1 order.
///
/// The first entry is `p_2^-1 mod p_1` (qInv); every following entry `j` is
/// `(p_1 * ... * p_{j+1})^-1 mod p_{j+2}`. This asymmetry between the first
/// two primes and the rest is how PKCS#1 defines them (RFC 8017 § A.1.2).
pub(crate) fn compute_coefficients(primes: &[BigUint]) -> Result<Vec<BigUint>> {
    if primes.len() < 2 {
        return Err(Error::InvalidPrime);
    }

    let mut coefficients = Vec::with_capacity(primes.len() - 1);
    coefficients.push(inverse(&primes[1], &primes[0]).ok_or(Error::InvalidCoefficient)?);

    let mut r = &primes[0] * &primes[1];
    for prime in &primes[2..] {
        coefficients.push(inverse(&r, prime).ok_or(Error::InvalidCoefficient)?);
        r *= prime;
    }

    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_inverse() {
        assert_eq!(inverse(&big(3), &big(11)), Some(big(4)));
        // a larger than m gets reduced first
        assert_eq!(inverse(&big(65537), &big(10)), Some(big(3)));
        assert_eq!(inverse(&big(4), &big(10)), None);
        assert_eq!(inverse(&big(10), &big(10)), None);
        assert_eq!(inverse(&big(3), &big(1)), None);
    }

    #[test]
    fn test_lambda() {
        // lcm(2, 4, 6) = 12, whereas (2*4*6)/gcd(2, 4, 6) would be 24
        let primes = [big(3), big(5), big(7)];
        assert_eq!(compute_lambda(&primes), big(12));
        assert_eq!(compute_modulus(&primes), big(105));
    }

    #[test]
    fn test_coefficients() {
        let primes = [big(11), big(13), big(17), big(19)];
        let coefficients = compute_coefficients(&primes).unwrap();
        assert_eq!(coefficients.len(), 3);
        // 13^-1 mod 11
        assert_eq!((&coefficients[0] * big(13)) % big(11), big(1));
        // (11*13)^-1 mod 17
        assert_eq!((&coefficients[1] * big(143)) % big(17), big(1));
        // (11*13*17)^-1 mod 19
        assert_eq!((&coefficients[2] * big(2431)) % big(19), big(1));
    }

    #[test]
    fn test_crt_exponents() {
        let primes = [big(11), big(17)];
        let exponents = compute_crt_exponents(&primes, &big(3)).unwrap();
        assert_eq!(exponents, vec![big(7), big(11)]);
        assert_eq!(
            compute_crt_exponents(&[big(7)], &big(3)),
            Err(Error::InvalidExponent)
        );
    }
}
