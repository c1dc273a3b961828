//! Generate prime components for the RSA Private Key

use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use num_bigint::{BigUint, RandPrime};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

use crate::algorithms::prime::gen_prime_in_range;
use crate::algorithms::rsa::{compute_crt_exponents, inverse};
use crate::errors::{Error, Result};

/// Smallest modulus size accepted by the generator.
pub(crate) const MIN_MODULUS_BITS: usize = 16;

/// Smallest value accepted for the smallest prime size.
pub(crate) const MIN_PRIME_BITS: usize = 8;

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: Vec<BigUint>,
    pub exponents: Vec<BigUint>,
    pub coefficients: Vec<BigUint>,
}

/// Number of primes and the size of every prime but the last for a modulus
/// of `bit_size` bits.
///
/// Two primes of half the modulus size are used, unless that would make them
/// larger than `smallest_prime_bits`; in that case the modulus is split into
/// `bit_size / smallest_prime_bits` primes of `smallest_prime_bits` bits, with
/// the last prime taking up the remainder.
pub(crate) fn prime_layout(bit_size: usize, smallest_prime_bits: usize) -> (usize, usize) {
    let reg_size = bit_size / 2;
    if reg_size > smallest_prime_bits {
        (bit_size / smallest_prime_bits, smallest_prime_bits)
    } else {
        (2, reg_size)
    }
}

/// Rejects parameters for which no key can be produced, before any prime search.
pub(crate) fn check_generation_params(
    bit_size: usize,
    exp: &BigUint,
    smallest_prime_bits: usize,
) -> Result<()> {
    if bit_size < MIN_MODULUS_BITS {
        return Err(Error::KeySizeTooSmall);
    }
    if smallest_prime_bits < MIN_PRIME_BITS {
        return Err(Error::PrimeSizeTooSmall);
    }
    if exp.is_even() || *exp < BigUint::from(3u32) {
        return Err(Error::InvalidPublicExponent);
    }

    let (nprimes, prime_bits) = prime_layout(bit_size, smallest_prime_bits);
    if prime_bits < 64 {
        let prime_limit = (1u64 << prime_bits) as f64;

        // pi approximates the number of primes less than prime_limit
        let mut pi = prime_limit / (prime_bits as f64 * core::f64::consts::LN_2 - 1.);

        // Generated primes start with 0b11, so only a quarter of them are reachable.
        pi /= 4f64;
        // Leave a factor of two so that duplicate rejection terminates quickly.
        pi /= 2f64;

        // The last prime comes from its own range and is not counted.
        if pi < (nprimes - 1) as f64 {
            return Err(Error::TooFewPrimes);
        }
    }

    Ok(())
}

/// Generates the components of an RSA key of `bit_size` bits with public
/// exponent `exp`, using the prime layout of [`prime_layout`]. Multi-prime
/// public keys look like any other, but their private keys cannot be stored
/// in every key format.
///
/// Every prime but the last is a random prime of the layout's prime size. The
/// last prime is drawn from the interval which places the modulus in
/// `[2^(bit_size-1), 2^bit_size)` given the primes already chosen, so the
/// modulus always has exactly `bit_size` bits.
///
/// An attempt is discarded and restarted if two primes collide or if
/// `gcd(e, λ(n)) != 1`. `cancel` is checked before every attempt.
pub(crate) fn generate_multi_prime_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
    smallest_prime_bits: usize,
    cancel: Option<&AtomicBool>,
) -> Result<RsaPrivateKeyComponents> {
    check_generation_params(bit_size, exp, smallest_prime_bits)?;

    let (nprimes, prime_bits) = prime_layout(bit_size, smallest_prime_bits);
    debug!(
        "generating {}-bit RSA key from {} primes ({} bits for all but the last)",
        bit_size, nprimes, prime_bits
    );

    let min = BigUint::one() << (bit_size - 1);
    let max = (BigUint::one() << bit_size) - BigUint::one();

    let mut attempts = 0usize;
    'next: loop {
        if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            debug!("key generation cancelled after {} attempts", attempts);
            return Err(Error::Cancelled);
        }
        attempts += 1;

        let mut primes: Vec<BigUint> = Vec::with_capacity(nprimes);
        let mut coefficients: Vec<BigUint> = Vec::with_capacity(nprimes - 1);
        let mut n = BigUint::one();
        let mut lambda = BigUint::one();

        for i in 0..nprimes {
            let prime = if i + 1 < nprimes {
                rng.gen_prime(prime_bits)
            } else {
                let (lower, rem) = min.div_rem(&n);
                let lower = if rem.is_zero() { lower } else { lower + BigUint::one() };
                let upper = &max / &n;
                match gen_prime_in_range(rng, &lower, &upper) {
                    Some(prime) => prime,
                    None => continue 'next,
                }
            };

            if primes.contains(&prime) {
                debug!("attempt {}: duplicate prime, retrying", attempts);
                continue 'next;
            }

            // Coefficients of the third and later primes use the product of
            // the primes before them; the first coefficient is computed below.
            if i >= 2 {
                match inverse(&n, &prime) {
                    Some(coefficient) => coefficients.push(coefficient),
                    None => continue 'next,
                }
            }

            n *= &prime;
            lambda = lambda.lcm(&(&prime - BigUint::one()));
            primes.push(prime);
        }

        if !lambda.gcd(exp).is_one() {
            debug!(
                "attempt {}: public exponent not coprime with lambda, retrying",
                attempts
            );
            continue 'next;
        }

        let Some(qinv) = inverse(&primes[1], &primes[0]) else {
            continue 'next;
        };
        coefficients.insert(0, qinv);

        let d = inverse(exp, &lambda).ok_or(Error::Internal)?;
        let exponents = compute_crt_exponents(&primes, exp)?;

        debug!("generated {}-bit RSA key after {} attempts", n.bits(), attempts);

        return Ok(RsaPrivateKeyComponents {
            n,
            e: exp.clone(),
            d,
            primes,
            exponents,
            coefficients,
        });
    }
}
