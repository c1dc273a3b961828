#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Supported primitives
//!
//! This crate provides the building blocks described in [RFC8017] that sit
//! underneath the RSA encryption and signature schemes:
//!
//! - [I2OSP / OS2IP](#integer-conversion) integer to octet string conversion
//! - [MGF1](#mgf1) mask generation
//! - [EMSA-PKCS1-v1_5](#emsa-pkcs1-v1_5-encoding) message encoding, with and
//!   without the DigestInfo NULL parameter
//! - [Key generation](#key-generation) for two or more primes, including
//!   the CRT exponents and coefficients
//!
//! # Usage
//!
//! ## Integer conversion
//! ```
//! use rsa_primitives::{primitives::{i2osp, os2ip}, BigUint};
//!
//! let x = BigUint::from(0x0102u32);
//! let bytes = i2osp(&x, 4).expect("value fits");
//! assert_eq!(bytes, [0, 0, 1, 2]);
//! assert_eq!(os2ip(&bytes), x);
//!
//! assert!(i2osp(&BigUint::from(256u32), 1).is_err());
//! ```
//!
//! ## MGF1
//! ```
//! use rsa_primitives::{primitives::mgf1, HashAlgorithm};
//!
//! let short = mgf1(b"seed", 16, HashAlgorithm::Sha256).unwrap();
//! let long = mgf1(b"seed", 48, HashAlgorithm::Sha256).unwrap();
//! assert_eq!(&long[..16], &short[..]);
//! ```
//!
//! ## EMSA-PKCS1-v1_5 encoding
//! ```
//! use rsa_primitives::{primitives::{emsa_pkcs1v15_encode, emsa_pkcs1v15_verify}, HashAlgorithm};
//!
//! let em = emsa_pkcs1v15_encode(b"hello world", 256, HashAlgorithm::Sha256).unwrap();
//! assert_eq!(em.len(), 256);
//! assert_eq!(&em[..3], &[0x00, 0x01, 0xff]);
//! emsa_pkcs1v15_verify(&em, b"hello world", HashAlgorithm::Sha256, false).expect("failed to verify");
//! ```
//!
//! ## Key generation
//! ```
//! use rsa_primitives::{RsaPrivateKey, RsaPublicKey, traits::{PrivateKeyParts, PublicKeyParts}};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let bits = 1024;
//! let private_key = RsaPrivateKey::new(&mut rng, bits).expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! assert_eq!(public_key.bits(), bits);
//! assert_eq!(private_key.primes().len(), 2);
//! private_key.validate().expect("generated key is valid");
//! ```
//!
//! Keys carry an immutable [`KeyParams`] describing the padding and hashes
//! to use with them:
//!
//! ```
//! use rsa_primitives::{KeyParams, Padding};
//!
//! let params = KeyParams::default()
//!     .with_hash("sha512").unwrap()
//!     .with_padding(Padding::ENCRYPTION_PKCS1 | Padding::SIGNATURE_PSS).unwrap();
//! assert_eq!(params.hash_len(), 64);
//!
//! assert!(params.with_padding(Padding::ENCRYPTION_OAEP | Padding::ENCRYPTION_PKCS1).is_err());
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod engine;
pub mod errors;
pub mod hash;
pub mod params;
pub mod primitives;
pub mod traits;

mod generator;
mod key;

pub use pkcs1;

pub use crate::{
    engine::{prefer_native_backend, NativeBackend},
    errors::{Error, Result},
    generator::{KeyGenerator, RsaConfig, DEFAULT_EXPONENT, DEFAULT_SMALLEST_PRIME_BITS},
    hash::HashAlgorithm,
    key::{RsaPrivateKey, RsaPublicKey},
    params::{EncryptionPadding, KeyParams, Padding, SignaturePadding},
};
