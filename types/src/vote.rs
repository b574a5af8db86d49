//! Votes cast by validators.

use crate::{
    canonical::canonicalize,
    json::{base64_or_null, upper_hex},
    BlockId, Timestamp,
};
use amino_codec::EncodeExt;
use bytes::{Bytes, BytesMut};
use serde::Serialize;

/// The kind of a signed consensus message.
///
/// Any byte is representable; only the associated constants are meaningful to consensus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SignedMsgType(pub u8);

impl SignedMsgType {
    pub const PREVOTE: Self = Self(0x01);
    pub const PRECOMMIT: Self = Self(0x02);
    pub const PROPOSAL: Self = Self(0x20);
}

/// A prevote or precommit for a block (or for nil) at some height and round.
///
/// A vote is never encoded as-is. It is reduced to its canonical form for a chain first (see
/// [canonicalize]), which drops the validator fields and the signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vote {
    #[serde(rename = "type")]
    pub msg_type: SignedMsgType,
    pub height: i64,
    pub round: i32,
    pub block_id: BlockId,
    pub timestamp: Timestamp,
    #[serde(serialize_with = "upper_hex")]
    pub validator_address: Bytes,
    pub validator_index: i32,
    #[serde(serialize_with = "base64_or_null")]
    pub signature: Option<Bytes>,
}

impl Vote {
    /// Returns the bytes a validator signs for this vote on `chain_id`.
    ///
    /// This is the canonical vote prefixed by its length.
    pub fn sign_bytes(&self, chain_id: &str) -> BytesMut {
        canonicalize(self, chain_id).encode_length_prefixed()
    }
}
