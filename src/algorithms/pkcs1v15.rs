//! EMSA-PKCS1-v1_5 encoding as described in [RFC8017 § 9.2].
//!
//! [RFC8017 § 9.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

use alloc::vec::Vec;
use subtle::{Choice, ConstantTimeEq};

use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// DER encoded `DigestInfo` prefixes whose `AlgorithmIdentifier` carries an
/// explicit NULL parameter, i.e.
/// `0x30 <len> 0x30 <len> 0x06 <oid_len> oid 0x05 0x00 0x04 <digest_len>`.
fn digest_info_prefix(hash: HashAlgorithm) -> &'static [u8] {
    match hash {
        HashAlgorithm::Md2 => &[
            0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x02,
            0x05, 0x00, 0x04, 0x10,
        ],
        HashAlgorithm::Md5 => &[
            0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x05,
            0x05, 0x00, 0x04, 0x10,
        ],
        HashAlgorithm::Sha1 => &[
            0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04,
            0x14,
        ],
        HashAlgorithm::Sha224 => &[
            0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x04, 0x05, 0x00, 0x04, 0x1c,
        ],
        HashAlgorithm::Sha256 => &[
            0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x01, 0x05, 0x00, 0x04, 0x20,
        ],
        HashAlgorithm::Sha384 => &[
            0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x02, 0x05, 0x00, 0x04, 0x30,
        ],
        HashAlgorithm::Sha512 => &[
            0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x03, 0x05, 0x00, 0x04, 0x40,
        ],
        HashAlgorithm::Sha512_224 => &[
            0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x05, 0x05, 0x00, 0x04, 0x1c,
        ],
        HashAlgorithm::Sha512_256 => &[
            0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x06, 0x05, 0x00, 0x04, 0x20,
        ],
    }
}

/// DER encoded `DigestInfo` prefixes with the parameters field omitted
/// (RFC 8017 § 9.2, note 2). MD2 and MD5 have no such form.
fn digest_info_prefix_without_null(hash: HashAlgorithm) -> Option<&'static [u8]> {
    let prefix: &'static [u8] = match hash {
        HashAlgorithm::Md2 | HashAlgorithm::Md5 => return None,
        HashAlgorithm::Sha1 => &[
            0x30, 0x1f, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x04, 0x14,
        ],
        HashAlgorithm::Sha224 => &[
            0x30, 0x2b, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x04, 0x04, 0x1c,
        ],
        HashAlgorithm::Sha256 => &[
            0x30, 0x2f, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x01, 0x04, 0x20,
        ],
        HashAlgorithm::Sha384 => &[
            0x30, 0x3f, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x02, 0x04, 0x30,
        ],
        HashAlgorithm::Sha512 => &[
            0x30, 0x4f, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x03, 0x04, 0x40,
        ],
        HashAlgorithm::Sha512_224 => &[
            0x30, 0x2b, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x05, 0x04, 0x1c,
        ],
        HashAlgorithm::Sha512_256 => &[
            0x30, 0x2f, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x06, 0x04, 0x20,
        ],
    };
    Some(prefix)
}

/// EMSA-PKCS1-v1_5 encoding of `msg` into `em_len` bytes, using the DigestInfo
/// form with an explicit NULL parameter.
pub(crate) fn emsa_pkcs1v15_encode(
    msg: &[u8],
    em_len: usize,
    hash: HashAlgorithm,
) -> Result<Vec<u8>> {
    let hashed = hash.digest(msg);
    pkcs1v15_sign_pad(digest_info_prefix(hash), &hashed, em_len)
}

/// EMSA-PKCS1-v1_5 encoding of `msg` into `em_len` bytes, using the DigestInfo
/// form without the NULL parameter.
pub(crate) fn emsa_pkcs1v15_encode_without_null(
    msg: &[u8],
    em_len: usize,
    hash: HashAlgorithm,
) -> Result<Vec<u8>> {
    let prefix = digest_info_prefix_without_null(hash).ok_or(Error::DigestInfoRequiresNull)?;
    let hashed = hash.digest(msg);
    pkcs1v15_sign_pad(prefix, &hashed, em_len)
}

/// Checks in constant time that `em` is the EMSA-PKCS1-v1_5 encoding of `msg`.
///
/// With `relaxed` set, the NULL-less DigestInfo form is accepted as well.
pub(crate) fn emsa_pkcs1v15_verify(
    em: &[u8],
    msg: &[u8],
    hash: HashAlgorithm,
    relaxed: bool,
) -> Result<()> {
    let hashed = hash.digest(msg);

    let mut ok = pkcs1v15_sign_unpad(digest_info_prefix(hash), &hashed, em);
    if relaxed {
        if let Some(prefix) = digest_info_prefix_without_null(hash) {
            ok |= pkcs1v15_sign_unpad(prefix, &hashed, em);
        }
    }

    if ok.unwrap_u8() != 1 {
        return Err(Error::Verification);
    }

    Ok(())
}

#[inline]
fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + 11 {
        return Err(Error::EncodedMessageTooShort);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..k].copy_from_slice(hashed);

    Ok(em)
}

#[inline]
fn pkcs1v15_sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8]) -> Choice {
    let k = em.len();
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + 11 {
        return Choice::from(0);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut ok = em[0].ct_eq(&0u8);
    ok &= em[1].ct_eq(&1u8);
    ok &= em[k - hash_len..k].ct_eq(hashed);
    ok &= em[k - t_len..k - hash_len].ct_eq(prefix);
    ok &= em[k - t_len - 1].ct_eq(&0u8);

    for el in em.iter().skip(2).take(k - t_len - 3) {
        ok &= el.ct_eq(&0xff)
    }

    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    /// prefix = 0x30 <oid_len + 8 + digest_len> 0x30 <oid_len + 4> 0x06 <oid_len> oid 0x05 0x00 0x04 <digest_len>
    fn generate_prefix(hash: HashAlgorithm, with_null: bool) -> Vec<u8> {
        let oid = hash.oid();
        let oid = oid.as_bytes();
        let oid_len = oid.len() as u8;
        let digest_len = hash.output_size() as u8;
        let null_len = if with_null { 2 } else { 0 };
        let mut v = vec![
            0x30,
            oid_len + 6 + null_len + digest_len,
            0x30,
            oid_len + 2 + null_len,
            0x6,
            oid_len,
        ];
        v.extend_from_slice(oid);
        if with_null {
            v.extend_from_slice(&[0x05, 0x00]);
        }
        v.extend_from_slice(&[0x04, digest_len]);
        v
    }

    #[test]
    fn test_prefix_tables_match_oids() {
        for hash in HashAlgorithm::ALL {
            assert_eq!(
                digest_info_prefix(hash),
                generate_prefix(hash, true).as_slice(),
                "{}",
                hash
            );
            if let Some(prefix) = digest_info_prefix_without_null(hash) {
                assert_eq!(prefix, generate_prefix(hash, false).as_slice(), "{}", hash);
            }
        }
    }

    #[test]
    fn test_encode_sha256_layout() {
        let msg = b"hello world";
        let em = emsa_pkcs1v15_encode(msg, 256, HashAlgorithm::Sha256).unwrap();
        let prefix = digest_info_prefix(HashAlgorithm::Sha256);
        assert_eq!(prefix.len(), 19);

        assert_eq!(em.len(), 256);
        assert_eq!(&em[..2], &[0x00, 0x01]);
        let ps_len = 256 - 3 - 19 - 32;
        assert!(em[2..2 + ps_len].iter().all(|b| *b == 0xff));
        assert_eq!(em[2 + ps_len], 0x00);
        assert_eq!(&em[3 + ps_len..3 + ps_len + 19], prefix);
        assert_eq!(&em[256 - 32..], HashAlgorithm::Sha256.digest(msg).as_slice());
    }

    #[test]
    fn test_encode_minimum_length() {
        // tLen = 19 + 32, the smallest accepted emLen is tLen + 11
        let em = emsa_pkcs1v15_encode(b"m", 62, HashAlgorithm::Sha256).unwrap();
        assert_eq!(em.len(), 62);
        assert_eq!(&em[2..10], &[0xff; 8]);
        assert_eq!(
            emsa_pkcs1v15_encode(b"m", 61, HashAlgorithm::Sha256),
            Err(Error::EncodedMessageTooShort)
        );
        assert_eq!(
            emsa_pkcs1v15_encode(b"m", 30, HashAlgorithm::Sha256),
            Err(Error::EncodedMessageTooShort)
        );
    }

    #[test]
    fn test_encode_without_null() {
        let em = emsa_pkcs1v15_encode_without_null(b"m", 128, HashAlgorithm::Sha1).unwrap();
        assert_eq!(em.len(), 128);
        let t_len = 13 + 20;
        assert_eq!(em[128 - t_len - 1], 0);
        assert_eq!(&em[128 - t_len..128 - 20], &[
            0x30, 0x1f, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x04, 0x14
        ]);

        assert_eq!(
            emsa_pkcs1v15_encode_without_null(b"m", 128, HashAlgorithm::Md5),
            Err(Error::DigestInfoRequiresNull)
        );
        assert_eq!(
            emsa_pkcs1v15_encode_without_null(b"m", 128, HashAlgorithm::Md2),
            Err(Error::DigestInfoRequiresNull)
        );
        assert_eq!(
            emsa_pkcs1v15_encode_without_null(b"m", 40, HashAlgorithm::Sha256),
            Err(Error::EncodedMessageTooShort)
        );
    }

    #[test]
    fn test_verify() {
        let msg = b"message";
        let em = emsa_pkcs1v15_encode(msg, 128, HashAlgorithm::Sha512).unwrap();
        assert_eq!(emsa_pkcs1v15_verify(&em, msg, HashAlgorithm::Sha512, false), Ok(()));
        assert_eq!(
            emsa_pkcs1v15_verify(&em, b"other", HashAlgorithm::Sha512, false),
            Err(Error::Verification)
        );

        let mut tampered = em.clone();
        tampered[5] = 0xfe;
        assert_eq!(
            emsa_pkcs1v15_verify(&tampered, msg, HashAlgorithm::Sha512, false),
            Err(Error::Verification)
        );

        assert_eq!(
            emsa_pkcs1v15_verify(&em[..40], msg, HashAlgorithm::Sha512, true),
            Err(Error::Verification)
        );
    }

    #[test]
    fn test_verify_relaxed_accepts_missing_null() {
        let msg = b"message";
        let em = emsa_pkcs1v15_encode_without_null(msg, 128, HashAlgorithm::Sha256).unwrap();
        assert_eq!(
            emsa_pkcs1v15_verify(&em, msg, HashAlgorithm::Sha256, false),
            Err(Error::Verification)
        );
        assert_eq!(emsa_pkcs1v15_verify(&em, msg, HashAlgorithm::Sha256, true), Ok(()));
    }
}
