//! Per-key padding and hash configuration.
//!
//! [`KeyParams`] is a value type: every `with_*` method returns a new
//! configuration and leaves the receiver untouched, so a configuration that
//! is already shared can never change underneath its holders.

use alloc::vec::Vec;
use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// Bit set used to select padding modes, see [`KeyParams::with_padding`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Padding(u8);

impl Padding {
    /// OAEP encryption padding.
    pub const ENCRYPTION_OAEP: Padding = Padding(1);
    /// PKCS#1 v1.5 encryption padding.
    pub const ENCRYPTION_PKCS1: Padding = Padding(2);
    /// Raw RSA encryption, no padding.
    pub const ENCRYPTION_NONE: Padding = Padding(4);
    /// PSS signature padding.
    pub const SIGNATURE_PSS: Padding = Padding(16);
    /// PKCS#1 v1.5 signatures, accepting DigestInfo with or without NULL parameters.
    pub const SIGNATURE_RELAXED_PKCS1: Padding = Padding(32);
    /// PKCS#1 v1.5 signatures.
    pub const SIGNATURE_PKCS1: Padding = Padding(64);

    /// No padding mode selected.
    pub const fn empty() -> Padding {
        Padding(0)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Padding) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Padding {
    type Output = Padding;

    fn bitor(self, rhs: Padding) -> Padding {
        Padding(self.0 | rhs.0)
    }
}

impl BitOrAssign for Padding {
    fn bitor_assign(&mut self, rhs: Padding) {
        self.0 |= rhs.0;
    }
}

/// Padding scheme used for encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EncryptionPadding {
    /// RSAES-OAEP.
    Oaep,
    /// RSAES-PKCS1-v1_5.
    Pkcs1v15,
    /// Raw RSA.
    None,
}

impl EncryptionPadding {
    const ALL: [EncryptionPadding; 3] = [
        EncryptionPadding::Oaep,
        EncryptionPadding::Pkcs1v15,
        EncryptionPadding::None,
    ];

    /// The selection bit for this mode.
    pub const fn flag(self) -> Padding {
        match self {
            EncryptionPadding::Oaep => Padding::ENCRYPTION_OAEP,
            EncryptionPadding::Pkcs1v15 => Padding::ENCRYPTION_PKCS1,
            EncryptionPadding::None => Padding::ENCRYPTION_NONE,
        }
    }
}

/// Padding scheme used for signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignaturePadding {
    /// RSASSA-PSS.
    Pss,
    /// RSASSA-PKCS1-v1_5, verification also accepts a NULL-less DigestInfo.
    RelaxedPkcs1v15,
    /// RSASSA-PKCS1-v1_5.
    Pkcs1v15,
}

impl SignaturePadding {
    const ALL: [SignaturePadding; 3] = [
        SignaturePadding::Pss,
        SignaturePadding::RelaxedPkcs1v15,
        SignaturePadding::Pkcs1v15,
    ];

    /// The selection bit for this mode.
    pub const fn flag(self) -> Padding {
        match self {
            SignaturePadding::Pss => Padding::SIGNATURE_PSS,
            SignaturePadding::RelaxedPkcs1v15 => Padding::SIGNATURE_RELAXED_PKCS1,
            SignaturePadding::Pkcs1v15 => Padding::SIGNATURE_PKCS1,
        }
    }
}

/// Picks the single mode of a category whose bit is set in `padding`.
fn select<T: Copy>(padding: Padding, modes: &[T], flag: impl Fn(T) -> Padding) -> Result<Option<T>> {
    let mut selected = None;
    for mode in modes.iter().copied() {
        if padding.contains(flag(mode)) {
            if selected.is_some() {
                return Err(Error::ConflictingPadding);
            }
            selected = Some(mode);
        }
    }
    Ok(selected)
}

/// Hash, MGF and padding settings attached to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyParams {
    hash: HashAlgorithm,
    mgf_hash: HashAlgorithm,
    salt_len: Option<usize>,
    label: Vec<u8>,
    encryption_padding: Option<EncryptionPadding>,
    signature_padding: Option<SignaturePadding>,
}

impl Default for KeyParams {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::Sha256,
            mgf_hash: HashAlgorithm::Sha256,
            salt_len: None,
            label: Vec::new(),
            encryption_padding: Some(EncryptionPadding::Oaep),
            signature_padding: Some(SignaturePadding::Pss),
        }
    }
}

impl KeyParams {
    /// Default configuration: SHA-256 for both hash and MGF1, OAEP and PSS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash used for signatures and OAEP.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Digest length of [`Self::hash`].
    pub fn hash_len(&self) -> usize {
        self.hash.output_size()
    }

    /// Hash used inside MGF1.
    pub fn mgf_hash(&self) -> HashAlgorithm {
        self.mgf_hash
    }

    /// Digest length of [`Self::mgf_hash`].
    pub fn mgf_hash_len(&self) -> usize {
        self.mgf_hash.output_size()
    }

    /// PSS salt length: the explicit value if one was set, the digest length otherwise.
    pub fn salt_len(&self) -> usize {
        self.salt_len.unwrap_or_else(|| self.hash_len())
    }

    /// OAEP label, empty by default.
    pub fn label(&self) -> &[u8] {
        &self.label
    }

    /// Selected encryption padding, if any.
    pub fn encryption_padding(&self) -> Option<EncryptionPadding> {
        self.encryption_padding
    }

    /// Selected signature padding, if any.
    pub fn signature_padding(&self) -> Option<SignaturePadding> {
        self.signature_padding
    }

    /// Selected modes of both categories as a bit set.
    pub fn padding(&self) -> Padding {
        let mut padding = Padding::empty();
        if let Some(mode) = self.encryption_padding {
            padding |= mode.flag();
        }
        if let Some(mode) = self.signature_padding {
            padding |= mode.flag();
        }
        padding
    }

    /// Returns a copy using the hash named `name`.
    pub fn with_hash(&self, name: &str) -> Result<Self> {
        let hash = name.parse::<HashAlgorithm>()?;
        Ok(Self {
            hash,
            ..self.clone()
        })
    }

    /// Returns a copy using the MGF1 hash named `name`.
    pub fn with_mgf_hash(&self, name: &str) -> Result<Self> {
        let mgf_hash = name.parse::<HashAlgorithm>()?;
        Ok(Self {
            mgf_hash,
            ..self.clone()
        })
    }

    /// Returns a copy with an explicit PSS salt length.
    pub fn with_salt_len(&self, salt_len: usize) -> Self {
        Self {
            salt_len: Some(salt_len),
            ..self.clone()
        }
    }

    /// Returns a copy with the given OAEP label.
    pub fn with_label(&self, label: &[u8]) -> Self {
        Self {
            label: label.to_vec(),
            ..self.clone()
        }
    }

    /// Returns a copy with the padding modes selected in `padding`.
    ///
    /// At most one encryption mode and one signature mode may be set; a
    /// category with no bit set is cleared.
    pub fn with_padding(&self, padding: Padding) -> Result<Self> {
        let encryption_padding = select(padding, &EncryptionPadding::ALL, EncryptionPadding::flag)?;
        let signature_padding = select(padding, &SignaturePadding::ALL, SignaturePadding::flag)?;
        Ok(Self {
            encryption_padding,
            signature_padding,
            ..self.clone()
        })
    }
}
