//! Digest algorithms usable for signatures, OAEP and MGF1.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use const_oid::ObjectIdentifier;
use digest::DynDigest;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

const ID_MD2: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.2.2");
const ID_MD5: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.2.5");
const ID_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
const ID_SHA224: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.4");
const ID_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
const ID_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
const ID_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");
const ID_SHA512_224: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.5");
const ID_SHA512_256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.6");

/// The supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HashAlgorithm {
    /// MD2 (legacy, PKCS#1 v1.5 signatures only).
    #[cfg_attr(feature = "serde", serde(rename = "md2"))]
    Md2,
    /// MD5 (legacy).
    #[cfg_attr(feature = "serde", serde(rename = "md5"))]
    Md5,
    /// SHA-1.
    #[cfg_attr(feature = "serde", serde(rename = "sha1"))]
    Sha1,
    /// SHA-224.
    #[cfg_attr(feature = "serde", serde(rename = "sha224"))]
    Sha224,
    /// SHA-256.
    #[cfg_attr(feature = "serde", serde(rename = "sha256"))]
    Sha256,
    /// SHA-384.
    #[cfg_attr(feature = "serde", serde(rename = "sha384"))]
    Sha384,
    /// SHA-512.
    #[cfg_attr(feature = "serde", serde(rename = "sha512"))]
    Sha512,
    /// SHA-512/224.
    #[cfg_attr(feature = "serde", serde(rename = "sha512/224"))]
    Sha512_224,
    /// SHA-512/256.
    #[cfg_attr(feature = "serde", serde(rename = "sha512/256"))]
    Sha512_256,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 9] = [
        HashAlgorithm::Md2,
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
    ];

    /// Canonical lowercase name, e.g. `sha512/256`.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md2 => "md2",
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha512_224 => "sha512/224",
            HashAlgorithm::Sha512_256 => "sha512/256",
        }
    }

    /// Returns the length in bytes of a digest.
    pub fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Md2 | HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha512_224 => 28,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha512_256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Object identifier of the algorithm.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            HashAlgorithm::Md2 => ID_MD2,
            HashAlgorithm::Md5 => ID_MD5,
            HashAlgorithm::Sha1 => ID_SHA1,
            HashAlgorithm::Sha224 => ID_SHA224,
            HashAlgorithm::Sha256 => ID_SHA256,
            HashAlgorithm::Sha384 => ID_SHA384,
            HashAlgorithm::Sha512 => ID_SHA512,
            HashAlgorithm::Sha512_224 => ID_SHA512_224,
            HashAlgorithm::Sha512_256 => ID_SHA512_256,
        }
    }

    /// Creates a fresh hasher for this algorithm.
    pub fn new_digest(&self) -> Box<dyn DynDigest + Send + Sync> {
        match self {
            HashAlgorithm::Md2 => Box::new(md2::Md2::default()),
            HashAlgorithm::Md5 => Box::new(md5::Md5::default()),
            HashAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
            HashAlgorithm::Sha224 => Box::new(sha2::Sha224::default()),
            HashAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
            HashAlgorithm::Sha384 => Box::new(sha2::Sha384::default()),
            HashAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
            HashAlgorithm::Sha512_224 => Box::new(sha2::Sha512_224::default()),
            HashAlgorithm::Sha512_256 => Box::new(sha2::Sha512_256::default()),
        }
    }

    /// One-shot digest of `msg`.
    pub fn digest(&self, msg: &[u8]) -> Vec<u8> {
        let mut hasher = self.new_digest();
        hasher.update(msg);
        hasher.finalize().into_vec()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HashAlgorithm::ALL
            .iter()
            .copied()
            .find(|hash| hash.name().eq_ignore_ascii_case(s))
            .ok_or(Error::UnsupportedHash)
    }
}
