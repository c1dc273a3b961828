//! Mask generation function common to both PSS and OAEP padding

use alloc::vec::Vec;
use digest::DynDigest;

use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// MGF1 as defined in RFC 8017 § B.2.1: returns a mask of exactly `mask_len` bytes.
pub(crate) fn mgf1(seed: &[u8], mask_len: usize, hash: HashAlgorithm) -> Result<Vec<u8>> {
    let mut out = vec![0u8; mask_len];
    let mut digest = hash.new_digest();
    mgf1_xor(&mut out, digest.as_mut(), seed)?;
    Ok(out)
}

/// XORs `out` in place with the MGF1 mask derived from `seed`.
///
/// Fails with [`Error::MaskTooLong`] if `out` would need more than 2^32 digest blocks.
pub(crate) fn mgf1_xor(out: &mut [u8], digest: &mut dyn DynDigest, seed: &[u8]) -> Result<()> {
    let h_len = digest.output_size() as u64;
    if h_len == 0 || out.len() as u64 > (1u64 << 32) * h_len {
        return Err(Error::MaskTooLong);
    }

    let mut counter = [0u8; 4];
    let mut i = 0;

    while i < out.len() {
        digest.update(seed);
        digest.update(&counter);
        let digest_output = digest.finalize_reset();

        for (dst, src) in out[i..].iter_mut().zip(digest_output.iter()) {
            *dst ^= *src;
        }
        i += digest_output.len();
        inc_counter(&mut counter);
    }

    Ok(())
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}
