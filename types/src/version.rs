//! Protocol versions.

use amino_codec::{field_size, write_field, EncodeSize, Message, Write};
use bytes::BufMut;
use serde::Serialize;

/// The block and application protocol versions a block was produced under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Consensus {
    pub block: u64,
    pub app: u64,
}

impl Message for Consensus {
    type Context = ();
}

impl Write for Consensus {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.block, buf, cx);
        write_field(2, &self.app, buf, cx);
    }
}

impl EncodeSize for Consensus {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.block, cx) + field_size(2, &self.app, cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amino_codec::{util::hex, EncodeExt};

    #[test]
    fn test_encode() {
        let vectors = [
            (Consensus { block: 11, app: 15 }, "080b100f"),
            (Consensus { block: 3, app: 0 }, "0803"),
            (Consensus { block: 0, app: 1 }, "1001"),
            (Consensus { block: 1234, app: 5678 }, "08d20910ae2c"),
            (Consensus { block: 0, app: 0 }, ""),
        ];
        for (version, expected) in vectors {
            assert_eq!(hex(&version.encode()), expected);
        }
    }

    #[test]
    fn test_json() {
        let version = Consensus { block: 1, app: 0 };
        assert_eq!(
            serde_json::to_string(&version).unwrap(),
            r#"{"block":1,"app":0}"#
        );
    }
}
