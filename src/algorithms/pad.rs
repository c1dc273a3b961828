//! Conversions between `BigUint` and fixed-length octet strings (RFC 8017 § 4).

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::IntegerTooLarge);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// I2OSP: converts `x` to a big-endian octet string of exactly `x_len` bytes.
///
/// Fails with [`Error::IntegerTooLarge`] if `x >= 256^x_len`.
pub(crate) fn i2osp(x: &BigUint, x_len: usize) -> Result<Vec<u8>> {
    // `to_bytes_be` encodes zero as a single byte, which would not fit `x_len == 0`.
    if x.is_zero() {
        return Ok(vec![0u8; x_len]);
    }
    let bytes = Zeroizing::new(x.to_bytes_be());
    left_pad(&bytes, x_len)
}

/// OS2IP: interprets `x` as a big-endian unsigned integer. The empty string maps to zero.
#[inline]
pub(crate) fn os2ip(x: &[u8]) -> BigUint {
    BigUint::from_bytes_be(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_left_pad() {
        const INPUT_LEN: usize = 3;
        let input = vec![0u8; INPUT_LEN];

        // input len < padded len
        let padded = left_pad(&input, INPUT_LEN + 1).unwrap();
        assert_eq!(padded.len(), INPUT_LEN + 1);

        // input len == padded len
        let padded = left_pad(&input, INPUT_LEN).unwrap();
        assert_eq!(padded.len(), INPUT_LEN);

        // input len > padded len
        let padded = left_pad(&input, INPUT_LEN - 1);
        assert_eq!(padded, Err(Error::IntegerTooLarge));
    }

    #[test]
    fn test_i2osp_pads_on_the_left() {
        let x = BigUint::from(0x0102u32);
        assert_eq!(i2osp(&x, 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(i2osp(&x, 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_i2osp_too_large() {
        assert_eq!(i2osp(&BigUint::from(256u32), 1), Err(Error::IntegerTooLarge));
        assert_eq!(i2osp(&BigUint::one(), 0), Err(Error::IntegerTooLarge));
    }

    #[test]
    fn test_i2osp_zero() {
        assert_eq!(i2osp(&BigUint::zero(), 0).unwrap(), Vec::<u8>::new());
        assert_eq!(i2osp(&BigUint::zero(), 3).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_os2ip() {
        assert!(os2ip(&[]).is_zero());
        assert!(os2ip(&[0, 0, 0]).is_zero());
        assert_eq!(os2ip(&[0, 1, 0]), BigUint::from(256u32));
        assert_eq!(os2ip(&[0xff; 2]), BigUint::from(0xffffu32));
    }
}
