//! Low-level PKCS#1 v2.2 building blocks.
//!
//! # WARNING: HAZARDOUS API
//!
//! These functions convert between integers and octet strings, generate
//! masks and produce encoded messages. They do not apply the RSA function
//! itself and are intended for implementing higher-level schemes.

use alloc::vec::Vec;
use digest::DynDigest;
use num_bigint::BigUint;

use crate::algorithms::{mgf, pad, pkcs1v15};
use crate::errors::Result;
use crate::hash::HashAlgorithm;

/// I2OSP (RFC 8017 § 4.1): big-endian encoding of `x` in exactly `x_len`
/// bytes.
///
/// Fails with [`Error::IntegerTooLarge`](crate::Error::IntegerTooLarge) if
/// `x >= 256^x_len`.
pub fn i2osp(x: &BigUint, x_len: usize) -> Result<Vec<u8>> {
    pad::i2osp(x, x_len)
}

/// OS2IP (RFC 8017 § 4.2): interprets `x` as a big-endian unsigned integer.
pub fn os2ip(x: &[u8]) -> BigUint {
    pad::os2ip(x)
}

/// MGF1 (RFC 8017 § B.2.1) with the given hash.
///
/// ```
/// use rsa_primitives::{primitives::mgf1, HashAlgorithm};
/// use hex_literal::hex;
///
/// let mask = mgf1(b"foo", 3, HashAlgorithm::Sha1).unwrap();
/// assert_eq!(mask, hex!("1ac907"));
/// ```
pub fn mgf1(seed: &[u8], mask_len: usize, hash: HashAlgorithm) -> Result<Vec<u8>> {
    mgf::mgf1(seed, mask_len, hash)
}

/// XORs `out` in place with the MGF1 mask of `seed`, using any digest.
pub fn mgf1_xor(out: &mut [u8], digest: &mut dyn DynDigest, seed: &[u8]) -> Result<()> {
    mgf::mgf1_xor(out, digest, seed)
}

/// EMSA-PKCS1-v1_5 encoding (RFC 8017 § 9.2) with the DigestInfo NULL
/// parameter present.
pub fn emsa_pkcs1v15_encode(msg: &[u8], em_len: usize, hash: HashAlgorithm) -> Result<Vec<u8>> {
    pkcs1v15::emsa_pkcs1v15_encode(msg, em_len, hash)
}

/// EMSA-PKCS1-v1_5 encoding with the DigestInfo NULL parameter omitted.
///
/// MD2 and MD5 are rejected, since their DigestInfo always carries NULL.
pub fn emsa_pkcs1v15_encode_without_null(
    msg: &[u8],
    em_len: usize,
    hash: HashAlgorithm,
) -> Result<Vec<u8>> {
    pkcs1v15::emsa_pkcs1v15_encode_without_null(msg, em_len, hash)
}

/// Checks that `em` is the EMSA-PKCS1-v1_5 encoding of `msg`.
///
/// `relaxed` additionally accepts the NULL-less DigestInfo form.
pub fn emsa_pkcs1v15_verify(
    em: &[u8],
    msg: &[u8],
    hash: HashAlgorithm,
    relaxed: bool,
) -> Result<()> {
    pkcs1v15::emsa_pkcs1v15_verify(em, msg, hash, relaxed)
}
