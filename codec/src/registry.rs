//! Registered type prefixes for polymorphic values.
//!
//! A polymorphic value (an [Interface]) is written as the 4-byte prefix of its concrete variant
//! followed by the concrete variant's own encoding. Prefixes are derived from a stable name
//! (e.g. `tendermint/PubKeyEd25519`), never from registration order, so every implementation
//! that registers the same name agrees on the bytes.
//!
//! # Derivation
//!
//! The SHA-256 digest of the name is computed. Leading zero bytes are dropped and the next 3
//! bytes form the disambiguation bytes. Leading zero bytes are dropped again and the next 4 bytes
//! form the prefix.
//!
//! # Lifecycle
//!
//! A [Registry] derives the prefixes of every variant of an interface once, when it is
//! constructed, and is immutable afterwards. It is passed by reference as the context of every
//! encode call that may reach a value of that interface.

use crate::Error;
use sha2::{Digest, Sha256};
use std::{fmt, marker::PhantomData, ops::Deref};

/// Length of the disambiguation bytes.
pub const DISAMBIGUATION_LENGTH: usize = 3;

/// Length of a type prefix.
pub const PREFIX_LENGTH: usize = 4;

/// Bytes written before the concrete encoding of a registered variant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix([u8; PREFIX_LENGTH]);

/// Bytes that distinguish names whose prefixes collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Disambiguation([u8; DISAMBIGUATION_LENGTH]);

macro_rules! impl_bytes {
    ($type:ident, $len:expr) => {
        impl AsRef<[u8]> for $type {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Deref for $type {
            type Target = [u8; $len];
            fn deref(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", crate::util::hex(&self.0))
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", crate::util::hex(&self.0))
            }
        }
    };
}
impl_bytes!(Prefix, PREFIX_LENGTH);
impl_bytes!(Disambiguation, DISAMBIGUATION_LENGTH);

/// Fills `out` from `bytes`, after skipping any leading zero bytes.
///
/// A SHA-256 digest runs out only if almost all of its bytes are zero, in which case the
/// remainder is zero-filled.
fn take_nonzero<const N: usize>(bytes: &mut impl Iterator<Item = u8>) -> [u8; N] {
    let mut out = [0u8; N];
    let mut rest = bytes.skip_while(|b| *b == 0);
    for (slot, byte) in out.iter_mut().zip(&mut rest) {
        *slot = byte;
    }
    out
}

/// Derives the disambiguation bytes and prefix of a registered name.
pub fn derive(name: &str) -> (Disambiguation, Prefix) {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = digest.iter().copied();
    let disambiguation = Disambiguation(take_nonzero(&mut bytes));
    let prefix = Prefix(take_nonzero(&mut bytes));
    (disambiguation, prefix)
}

/// A polymorphic value over a closed set of registered variants.
pub trait Interface {
    /// The registered name of every variant, in [Interface::variant] order.
    const VARIANTS: &'static [&'static str];

    /// Returns the index of this value's variant in [Interface::VARIANTS].
    fn variant(&self) -> usize;
}

#[derive(Clone, Debug)]
struct Entry {
    name: &'static str,
    disambiguation: Disambiguation,
    prefix: Prefix,
}

/// The derived prefixes of every variant of an [Interface].
#[derive(Clone, Debug)]
pub struct Registry<I> {
    entries: Vec<Entry>,
    _interface: PhantomData<fn() -> I>,
}

impl<I: Interface> Registry<I> {
    /// Registers every variant of `I`.
    ///
    /// Fails if a name is registered twice or if two names derive the same prefix, as values of
    /// those variants could not be told apart.
    pub fn new() -> Result<Self, Error> {
        let mut entries: Vec<Entry> = Vec::with_capacity(I::VARIANTS.len());
        for &name in I::VARIANTS {
            let (disambiguation, prefix) = derive(name);
            for existing in &entries {
                if existing.name == name {
                    return Err(Error::DuplicateName(name));
                }
                if existing.prefix == prefix {
                    return Err(Error::PrefixCollision(existing.name, name));
                }
            }
            entries.push(Entry {
                name,
                disambiguation,
                prefix,
            });
        }
        Ok(Self {
            entries,
            _interface: PhantomData,
        })
    }

    fn entry(&self, value: &I) -> &Entry {
        // Every variant was registered on construction.
        &self.entries[value.variant()]
    }

    /// Returns the prefix of a value's variant.
    pub fn prefix(&self, value: &I) -> &Prefix {
        &self.entry(value).prefix
    }

    /// Returns the disambiguation bytes of a value's variant.
    pub fn disambiguation(&self, value: &I) -> &Disambiguation {
        &self.entry(value).disambiguation
    }

    /// Returns the registered name of a value's variant.
    pub fn name(&self, value: &I) -> &'static str {
        self.entry(value).name
    }

    /// Returns the number of registered variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the interface has no variants.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hex;

    enum Key {
        Ed25519,
        Secp256k1,
    }

    impl Interface for Key {
        const VARIANTS: &'static [&'static str] =
            &["tendermint/PubKeyEd25519", "tendermint/PubKeySecp256k1"];

        fn variant(&self) -> usize {
            match self {
                Self::Ed25519 => 0,
                Self::Secp256k1 => 1,
            }
        }
    }

    struct Twice;

    impl Interface for Twice {
        const VARIANTS: &'static [&'static str] = &["a/B", "a/B"];

        fn variant(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_derive_known_names() {
        let vectors = [
            ("tendermint/PubKeyEd25519", "ac2679", "1624de64"),
            ("tendermint/PubKeySecp256k1", "f8ccea", "eb5ae987"),
            ("tendermint/PrivKeyEd25519", "954568", "a3288910"),
            ("tendermint/PubKeyMultisigThreshold", "b449ae", "22c1f7e2"),
        ];
        for (name, disambiguation, prefix) in vectors {
            let (d, p) = derive(name);
            assert_eq!(hex(d.as_ref()), disambiguation);
            assert_eq!(hex(p.as_ref()), prefix);
        }
    }

    #[test]
    fn test_derive_stable() {
        // Independent registries agree on every prefix
        let a = Registry::<Key>::new().unwrap();
        let b = Registry::<Key>::new().unwrap();
        for key in [Key::Ed25519, Key::Secp256k1] {
            assert_eq!(a.prefix(&key), b.prefix(&key));
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = Registry::<Key>::new().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(&Key::Ed25519), "tendermint/PubKeyEd25519");
        assert_eq!(registry.prefix(&Key::Ed25519).to_string(), "1624de64");
        assert_eq!(
            registry.disambiguation(&Key::Secp256k1).to_string(),
            "f8ccea"
        );
        assert_ne!(
            registry.prefix(&Key::Ed25519),
            registry.prefix(&Key::Secp256k1)
        );
    }

    #[test]
    fn test_registry_duplicate() {
        assert!(matches!(
            Registry::<Twice>::new(),
            Err(Error::DuplicateName("a/B"))
        ));
    }
}
