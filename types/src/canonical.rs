//! Canonical forms of signed records.
//!
//! The canonical form of a record is the exact subset of its fields (in a fixed order, with
//! fixed widths) that validators sign. It is scoped to a chain by appending the chain
//! identifier, so a signature on one chain can never be replayed on another.
//!
//! Note that the canonical part-set header writes its hash before its total, the reverse of
//! [crate::PartSetHeader].

use crate::{BlockId, PartSetHeader, Timestamp, Vote};
use amino_codec::{field_size, write_field, EncodeSize, Fixed64, Message, Write};
use bytes::{BufMut, Bytes};

/// Canonical form of a [PartSetHeader].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CanonicalPartSetHeader {
    pub hash: Bytes,
    pub total: u32,
}

impl From<&PartSetHeader> for CanonicalPartSetHeader {
    fn from(parts: &PartSetHeader) -> Self {
        Self {
            hash: parts.hash.clone(),
            total: parts.total,
        }
    }
}

impl Message for CanonicalPartSetHeader {
    type Context = ();
}

impl Write for CanonicalPartSetHeader {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.hash, buf, cx);
        write_field(2, &self.total, buf, cx);
    }
}

impl EncodeSize for CanonicalPartSetHeader {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.hash, cx) + field_size(2, &self.total, cx)
    }
}

/// Canonical form of a [BlockId].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CanonicalBlockId {
    pub hash: Bytes,
    pub parts: CanonicalPartSetHeader,
}

impl From<&BlockId> for CanonicalBlockId {
    fn from(block_id: &BlockId) -> Self {
        Self {
            hash: block_id.hash.clone(),
            parts: CanonicalPartSetHeader::from(&block_id.parts),
        }
    }
}

impl Message for CanonicalBlockId {
    type Context = ();
}

impl Write for CanonicalBlockId {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.hash, buf, cx);
        write_field(2, &self.parts, buf, cx);
    }
}

impl EncodeSize for CanonicalBlockId {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.hash, cx) + field_size(2, &self.parts, cx)
    }
}

/// Canonical form of a [Vote] on some chain.
///
/// Height and round are written as 8 little-endian bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalVote {
    pub msg_type: u8,
    pub height: Fixed64<i64>,
    pub round: Fixed64<i64>,
    pub block_id: CanonicalBlockId,
    pub timestamp: Timestamp,
    pub chain_id: String,
}

impl Message for CanonicalVote {
    type Context = ();
}

impl Write for CanonicalVote {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.msg_type, buf, cx);
        write_field(2, &self.height, buf, cx);
        write_field(3, &self.round, buf, cx);
        write_field(4, &self.block_id, buf, cx);
        write_field(5, &self.timestamp, buf, cx);
        write_field(6, &self.chain_id, buf, cx);
    }
}

impl EncodeSize for CanonicalVote {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.msg_type, cx)
            + field_size(2, &self.height, cx)
            + field_size(3, &self.round, cx)
            + field_size(4, &self.block_id, cx)
            + field_size(5, &self.timestamp, cx)
            + field_size(6, &self.chain_id, cx)
    }
}

/// Reduces a vote to its canonical form on `chain_id`.
///
/// The validator address, validator index and signature of the vote are ignored.
pub fn canonicalize(vote: &Vote, chain_id: &str) -> CanonicalVote {
    CanonicalVote {
        msg_type: vote.msg_type.0,
        height: Fixed64(vote.height),
        round: Fixed64(i64::from(vote.round)),
        block_id: CanonicalBlockId::from(&vote.block_id),
        timestamp: vote.timestamp,
        chain_id: chain_id.to_string(),
    }
}
