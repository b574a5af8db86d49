//! Ed25519 keys.
//!
//! This implementation uses the `ed25519-consensus` crate, which adheres to a strict set of
//! validation rules for Ed25519 (necessary for stability in a consensus context).
//!
//! Fixture keys are never generated randomly: a [PrivateKey] is derived from a fixed secret so
//! that every run (and every implementation) sees the same public key.
//!
//! # Example
//! ```rust
//! use amino_cryptography::ed25519::PrivateKey;
//!
//! let key = PrivateKey::from_secret(b"foo").public_key();
//! assert_eq!(key.as_ref().len(), 32);
//! ```

use crate::Error;
use amino_codec::{util::hex, Field, Typ3};
use bytes::BufMut;
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display};
use zeroize::Zeroizing;

const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 Private Key.
#[derive(Clone)]
pub struct PrivateKey {
    raw: Zeroizing<[u8; PRIVATE_KEY_LENGTH]>,
    key: ed25519_consensus::SigningKey,
}

impl PrivateKey {
    /// Derives a private key from an arbitrary secret.
    ///
    /// The seed of the key is the SHA-256 digest of the secret.
    ///
    /// # Warning
    ///
    /// This function is insecure for low-entropy secrets and should only be used for fixtures
    /// and testing.
    pub fn from_secret(secret: &[u8]) -> Self {
        let seed: [u8; PRIVATE_KEY_LENGTH] = Sha256::digest(secret).into();
        Self::from(seed)
    }

    /// Returns the [PublicKey] corresponding to this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            raw: self.key.verification_key().to_bytes(),
        }
    }
}

impl From<[u8; PRIVATE_KEY_LENGTH]> for PrivateKey {
    fn from(seed: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        let key = ed25519_consensus::SigningKey::from(seed);
        Self {
            raw: Zeroizing::new(seed),
            key,
        }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        *self.raw == *other.raw
    }
}

impl Eq for PrivateKey {}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey(..)")
    }
}

/// Ed25519 Public Key.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PublicKey {
    raw: [u8; PUBLIC_KEY_LENGTH],
}

// Written as a byte sequence (length-delimited).
impl<Cx> Field<Cx> for PublicKey {
    const TYP3: Typ3 = Typ3::ByteLength;

    fn is_empty_cx(&self, cx: &Cx) -> bool {
        Field::<Cx>::is_empty_cx(&self.raw, cx)
    }

    fn write_value(&self, buf: &mut impl BufMut, cx: &Cx) {
        self.raw.write_value(buf, cx);
    }

    fn value_size(&self, cx: &Cx) -> usize {
        Field::<Cx>::value_size(&self.raw, cx)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl TryFrom<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    type Error = Error;
    fn try_from(raw: [u8; PUBLIC_KEY_LENGTH]) -> Result<Self, Self::Error> {
        ed25519_consensus::VerificationKey::try_from(raw).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { raw })
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; PUBLIC_KEY_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidPublicKeyLength)?;
        Self::try_from(raw)
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}
