//! Block identifiers.

use crate::json::upper_hex;
use amino_codec::{field_size, write_field, EncodeSize, Message, Write};
use bytes::{BufMut, Bytes};
use serde::Serialize;

/// Identifies the parts a block was split into for gossip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PartSetHeader {
    pub total: u32,
    #[serde(serialize_with = "upper_hex")]
    pub hash: Bytes,
}

impl Message for PartSetHeader {
    type Context = ();
}

impl Write for PartSetHeader {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.total, buf, cx);
        write_field(2, &self.hash, buf, cx);
    }
}

impl EncodeSize for PartSetHeader {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.total, cx) + field_size(2, &self.hash, cx)
    }
}

/// Identifies a block by its hash and the header of its part set.
///
/// The default (empty hash, empty parts) identifies no block, as in a vote for nil.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BlockId {
    #[serde(serialize_with = "upper_hex")]
    pub hash: Bytes,
    pub parts: PartSetHeader,
}

impl BlockId {
    /// Returns true if this identifies no block.
    pub fn is_nil(&self) -> bool {
        self == &Self::default()
    }
}

impl Message for BlockId {
    type Context = ();
}

impl Write for BlockId {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.hash, buf, cx);
        write_field(2, &self.parts, buf, cx);
    }
}

impl EncodeSize for BlockId {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.hash, cx) + field_size(2, &self.parts, cx)
    }
}
