//! Deterministic keys and their registered amino encoding.
//!
//! A [PublicKey] is a polymorphic value: it is written as the registered prefix of its concrete
//! variant followed by the concrete key (a length-delimited byte sequence). The prefix of each
//! variant is derived from its registered name by a [Registry], which must be supplied as the
//! encoding context.
//!
//! # Example
//!
//! ```rust
//! use amino_codec::{util::hex, Encode, Registry};
//! use amino_cryptography::{ed25519, PublicKey};
//!
//! let registry = Registry::<PublicKey>::new().unwrap();
//! let key = PublicKey::from(ed25519::PrivateKey::from_secret(b"foo").public_key());
//! let encoded = key.encode_cx(&registry);
//! assert_eq!(&hex(&encoded)[..10], "1624de6420");
//! ```

use amino_codec::{field::Field, EncodeSize, Interface, Message, Registry, Write};
use base64::Engine;
use bytes::BufMut;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

pub mod ed25519;

/// Registered name of the Ed25519 public key variant.
pub const ED25519_NAME: &str = "tendermint/PubKeyEd25519";

/// Errors that can occur when interacting with cryptographic primitives.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid public key length")]
    InvalidPublicKeyLength,
    #[error("invalid public key")]
    InvalidPublicKey,
}

/// A public key of any registered scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519(ed25519::PublicKey),
}

impl PublicKey {
    /// Returns the registered name of this key's scheme.
    pub fn name(&self) -> &'static str {
        Self::VARIANTS[self.variant()]
    }

    /// Returns the raw bytes of the concrete key.
    pub fn raw(&self) -> &[u8] {
        match self {
            Self::Ed25519(key) => key.as_ref(),
        }
    }
}

impl From<ed25519::PublicKey> for PublicKey {
    fn from(key: ed25519::PublicKey) -> Self {
        Self::Ed25519(key)
    }
}

impl Interface for PublicKey {
    const VARIANTS: &'static [&'static str] = &[ED25519_NAME];

    fn variant(&self) -> usize {
        match self {
            Self::Ed25519(_) => 0,
        }
    }
}

impl Message for PublicKey {
    type Context = Registry<PublicKey>;
}

// The prefix is followed by the concrete key, which is never omitted even if empty.
impl Write<Registry<PublicKey>> for PublicKey {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &Registry<PublicKey>) {
        buf.put_slice(cx.prefix(self).as_ref());
        match self {
            Self::Ed25519(key) => key.write_value(buf, &()),
        }
    }
}

impl EncodeSize<Registry<PublicKey>> for PublicKey {
    fn encode_size_cx(&self, cx: &Registry<PublicKey>) -> usize {
        let concrete = match self {
            Self::Ed25519(key) => Field::<()>::value_size(key, &()),
        };
        cx.prefix(self).len() + concrete
    }
}

/// Renders the key as `{"type": <registered name>, "value": <base64 key>}`.
impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = base64::engine::general_purpose::STANDARD.encode(self.raw());
        let mut state = serializer.serialize_struct("PublicKey", 2)?;
        state.serialize_field("type", self.name())?;
        state.serialize_field("value", &value)?;
        state.end()
    }
}
