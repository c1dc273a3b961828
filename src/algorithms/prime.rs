//! Generation of random primes within a closed interval.

use num_bigint::prime::probably_prime;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;

/// A list of small, prime numbers that allows us to rapidly
/// exclude some fraction of composite candidates when searching for a random
/// prime. This list is truncated at the point where the product exceeds
/// a u64. It does not include two because we ensure that the candidates are
/// odd by construction.
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// The product of the values in `SMALL_PRIMES`.
const SMALL_PRIMES_PRODUCT: u64 = 16_294_579_238_595_022_365;

/// Miller-Rabin rounds, on top of the Baillie-PSW test `probably_prime` always runs.
const PRIME_ROUNDS: usize = 20;

/// Draws a random probable prime `p` with `min <= p <= max`.
///
/// The distribution is not uniform: a random start is advanced past multiples
/// of small primes, so primes that follow long prime gaps are favoured.
///
/// Returns `None` for an empty interval or a single composite value. Any wider
/// interval must contain a prime, otherwise this does not terminate.
pub(crate) fn gen_prime_in_range<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    min: &BigUint,
    max: &BigUint,
) -> Option<BigUint> {
    let two = BigUint::from(2u32);
    let lower = if min < &two { two.clone() } else { min.clone() };
    if &lower > max {
        return None;
    }
    if &lower == max {
        return probably_prime(&lower, PRIME_ROUNDS).then_some(lower);
    }

    let upper = max + BigUint::one();
    let small_primes_product = BigUint::from(SMALL_PRIMES_PRODUCT);

    loop {
        let mut p = rng.gen_biguint_range(&lower, &upper);
        if p.is_even() {
            p += BigUint::one();
        }

        // must always fit a u64, as SMALL_PRIMES_PRODUCT is a u64
        let Some(rem) = (&p % &small_primes_product).to_u64() else {
            continue;
        };

        'next: for delta in (0..1u64 << 20).step_by(2) {
            let m = rem + delta;

            for prime in &SMALL_PRIMES {
                let prime = u64::from(*prime);
                if m % prime == 0 && (p.bits() > 6 || m != prime) {
                    continue 'next;
                }
            }

            if delta > 0 {
                p += BigUint::from(delta);
            }

            break;
        }

        // Adding delta may have stepped past the interval.
        if &p <= max && probably_prime(&p, PRIME_ROUNDS) {
            return Some(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_prime_in_range() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let min = BigUint::from(1_000_000u32);
        let max = BigUint::from(1_000_100u32);
        for _ in 0..20 {
            let p = gen_prime_in_range(&mut rng, &min, &max).unwrap();
            assert!(p >= min && p <= max);
            assert!(probably_prime(&p, 32));
        }
    }

    #[test]
    fn test_prime_in_large_range() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let min = BigUint::one() << 511;
        let max = (BigUint::one() << 512) - BigUint::one();
        let p = gen_prime_in_range(&mut rng, &min, &max).unwrap();
        assert_eq!(p.bits(), 512);
        assert!(probably_prime(&p, 32));
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut rng = ChaCha8Rng::from_seed([1; 32]);
        let two = BigUint::from(2u32);
        assert_eq!(gen_prime_in_range(&mut rng, &BigUint::one(), &two), Some(two.clone()));

        let seven = BigUint::from(7u32);
        assert_eq!(gen_prime_in_range(&mut rng, &seven, &seven), Some(seven));

        let nine = BigUint::from(9u32);
        assert_eq!(gen_prime_in_range(&mut rng, &nine, &nine), None);

        let ten = BigUint::from(10u32);
        assert_eq!(gen_prime_in_range(&mut rng, &ten, &ten), None);
        assert_eq!(gen_prime_in_range(&mut rng, &ten, &BigUint::from(9u32)), None);
    }
}
