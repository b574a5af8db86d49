//! Struct field framing.
//!
//! Every field of a [Message] is written as a varint key followed by its value. The key packs
//! the field number with the 3-bit wire type ([Typ3]) of the value: `(number << 3) | typ3`.
//!
//! # Omission
//!
//! A field whose value is empty is not written at all (neither key nor value). Empty means a
//! zero scalar, a zero-length byte sequence or string, or a nested message whose own encoding is
//! zero bytes long. There is no way to distinguish an empty field from an absent one, and every
//! implementation must agree on this to produce identical bytes.

use crate::{varint, EncodeSize, Message, Write};
use bytes::BufMut;

/// The wire type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Typ3 {
    /// Unsigned varint (also used for signed integers and booleans).
    Varint = 0,
    /// 8 little-endian bytes.
    Fixed64 = 1,
    /// Varint length followed by that many bytes (byte sequences, strings, messages).
    ByteLength = 2,
    /// 4 little-endian bytes.
    Fixed32 = 5,
}

/// Returns the key of a field.
pub fn key(number: u32, typ3: Typ3) -> u64 {
    (u64::from(number) << 3) | typ3 as u64
}

/// Trait for values that can be written as a field of a [Message].
pub trait Field<Cx = ()> {
    /// The wire type of the value.
    const TYP3: Typ3;

    /// Returns true if the field must be omitted.
    fn is_empty_cx(&self, cx: &Cx) -> bool;

    /// Writes the value (without its key).
    fn write_value(&self, buf: &mut impl BufMut, cx: &Cx);

    /// Returns the number of bytes [Field::write_value] will produce.
    fn value_size(&self, cx: &Cx) -> usize;
}

// Nested messages are written length-delimited.
impl<M> Field<M::Context> for M
where
    M: Message + Write<M::Context> + EncodeSize<M::Context>,
{
    const TYP3: Typ3 = Typ3::ByteLength;

    fn is_empty_cx(&self, cx: &M::Context) -> bool {
        self.encode_size_cx(cx) == 0
    }

    fn write_value(&self, buf: &mut impl BufMut, cx: &M::Context) {
        varint::write(self.encode_size_cx(cx) as u64, buf);
        self.write_cx(buf, cx);
    }

    fn value_size(&self, cx: &M::Context) -> usize {
        let len = self.encode_size_cx(cx);
        varint::size(len as u64) + len
    }
}

/// Writes field `number` with `value`, omitting it if the value is empty.
pub fn write_field<Cx, F: Field<Cx>>(number: u32, value: &F, buf: &mut impl BufMut, cx: &Cx) {
    if value.is_empty_cx(cx) {
        return;
    }
    varint::write(key(number, F::TYP3), buf);
    value.write_value(buf, cx);
}

/// Returns the number of bytes [write_field] will produce.
pub fn field_size<Cx, F: Field<Cx>>(number: u32, value: &F, cx: &Cx) -> usize {
    if value.is_empty_cx(cx) {
        return 0;
    }
    varint::size(key(number, F::TYP3)) + value.value_size(cx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::hex, EncodeExt, Fixed64};
    use bytes::Bytes;

    struct Inner {
        hash: Bytes,
        total: u32,
    }

    impl Message for Inner {
        type Context = ();
    }

    impl Write for Inner {
        fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
            write_field(1, &self.hash, buf, cx);
            write_field(2, &self.total, buf, cx);
        }
    }

    impl EncodeSize for Inner {
        fn encode_size_cx(&self, cx: &()) -> usize {
            field_size(1, &self.hash, cx) + field_size(2, &self.total, cx)
        }
    }

    struct Outer {
        height: Fixed64<i64>,
        inner: Inner,
        label: String,
    }

    impl Message for Outer {
        type Context = ();
    }

    impl Write for Outer {
        fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
            write_field(1, &self.height, buf, cx);
            write_field(2, &self.inner, buf, cx);
            write_field(3, &self.label, buf, cx);
        }
    }

    impl EncodeSize for Outer {
        fn encode_size_cx(&self, cx: &()) -> usize {
            field_size(1, &self.height, cx)
                + field_size(2, &self.inner, cx)
                + field_size(3, &self.label, cx)
        }
    }

    #[test]
    fn test_key() {
        assert_eq!(key(1, Typ3::Varint), 0x08);
        assert_eq!(key(2, Typ3::Fixed64), 0x11);
        assert_eq!(key(3, Typ3::Fixed64), 0x19);
        assert_eq!(key(4, Typ3::ByteLength), 0x22);
        assert_eq!(key(5, Typ3::ByteLength), 0x2a);
        assert_eq!(key(6, Typ3::ByteLength), 0x32);
        assert_eq!(key(7, Typ3::Fixed32), 0x3d);
        assert_eq!(key(16, Typ3::Varint), 0x80);
    }

    #[test]
    fn test_empty_fields_omitted() {
        let outer = Outer {
            height: Fixed64(0),
            inner: Inner {
                hash: Bytes::new(),
                total: 0,
            },
            label: String::new(),
        };
        assert!(outer.encode().is_empty());
        assert_eq!(outer.encode_size_cx(&()), 0);
    }

    #[test]
    fn test_nested_fields() {
        let outer = Outer {
            height: Fixed64(1),
            inner: Inner {
                hash: Bytes::from_static(&[0xab, 0xcd]),
                total: 0,
            },
            label: "x".to_string(),
        };
        let encoded = outer.encode();
        assert_eq!(u64::from(encoded[0]), key(1, Typ3::Fixed64));
        assert_eq!(hex(&encoded), "09010000000000000012040a02abcd1a0178");
    }

    #[test]
    fn test_large_field_number() {
        let mut buf = Vec::new();
        write_field(16, &1u64, &mut buf, &());
        assert_eq!(buf, vec![0x80, 0x01, 0x01]);
        assert_eq!(field_size(16, &1u64, &()), 3);
    }
}
