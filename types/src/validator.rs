//! Validator set hashing.

use amino_codec::{field_size, write_field, EncodeSize, Message, Registry, Write};
use amino_cryptography::PublicKey;
use bytes::BufMut;
use serde::{ser::SerializeSeq, Serialize, Serializer};

/// The record hashed for each validator when computing the hash of a validator set.
///
/// The public key is a registered (polymorphic) value, so encoding requires the
/// [Registry] of [PublicKey].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidatorHashInput {
    #[serde(serialize_with = "raw_key")]
    pub pub_key: PublicKey,
    pub voting_power: i64,
}

// Rendered as the array of its raw key bytes.
fn raw_key<S: Serializer>(key: &PublicKey, serializer: S) -> Result<S::Ok, S::Error> {
    let raw = key.raw();
    let mut seq = serializer.serialize_seq(Some(raw.len()))?;
    for byte in raw {
        seq.serialize_element(byte)?;
    }
    seq.end()
}

impl Message for ValidatorHashInput {
    type Context = Registry<PublicKey>;
}

impl Write<Registry<PublicKey>> for ValidatorHashInput {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &Registry<PublicKey>) {
        write_field(1, &self.pub_key, buf, cx);
        write_field(2, &self.voting_power, buf, cx);
    }
}

impl EncodeSize<Registry<PublicKey>> for ValidatorHashInput {
    fn encode_size_cx(&self, cx: &Registry<PublicKey>) -> usize {
        field_size(1, &self.pub_key, cx) + field_size(2, &self.voting_power, cx)
    }
}
