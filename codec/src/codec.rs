//! Core codec traits and implementations

use crate::varint;
use bytes::{BufMut, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
///
/// The `Cx` type parameter carries the encoding context. Types that embed a registered
/// (polymorphic) value are written against the [crate::Registry] of that value's interface.
/// Use `()` for types that do not require context.
pub trait Write<Cx = ()> {
    /// Writes the bare encoding of this value to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write_cx(&self, buf: &mut impl BufMut, cx: &Cx);
}

/// Trait for types that can report the exact length of their bare encoding.
pub trait EncodeSize<Cx = ()> {
    /// Returns the encoded length of this value.
    ///
    /// This method MUST return the exact number of bytes that will be written by
    /// [Write::write_cx].
    fn encode_size_cx(&self, cx: &Cx) -> usize;
}

/// Trait for types that can be encoded to a buffer.
pub trait Encode<Cx = ()>: Write<Cx> + EncodeSize<Cx> {
    /// Encodes a value to a `BytesMut` buffer (amino's "bare" form).
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    ///
    /// (Provided method).
    fn encode_cx(&self, cx: &Cx) -> BytesMut {
        let len = self.encode_size_cx(cx);
        let mut buffer = BytesMut::with_capacity(len);
        self.write_cx(&mut buffer, cx);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }

    /// Encodes a value prefixed by the varint length of its bare encoding.
    ///
    /// This is the form that is signed (Tendermint's "sign bytes").
    ///
    /// (Provided method).
    fn encode_length_prefixed_cx(&self, cx: &Cx) -> BytesMut {
        let len = self.encode_size_cx(cx);
        let prefix = varint::size(len as u64);
        let mut buffer = BytesMut::with_capacity(prefix + len);
        varint::write(len as u64, &mut buffer);
        self.write_cx(&mut buffer, cx);
        assert_eq!(
            buffer.len(),
            prefix + len,
            "write() did not write expected bytes"
        );
        buffer
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<Cx, T: Write<Cx> + EncodeSize<Cx>> Encode<Cx> for T {}

/// Extension trait providing ergonomic encode methods for types requiring no context.
pub trait EncodeExt: Encode<()> {
    /// Encodes a value using the `()` context.
    fn encode(&self) -> BytesMut {
        self.encode_cx(&())
    }

    /// Encodes a length-prefixed value using the `()` context.
    fn encode_length_prefixed(&self) -> BytesMut {
        self.encode_length_prefixed_cx(&())
    }
}

// Automatically implement `EncodeExt` for types that implement `Encode` with no context.
impl<T: Encode<()>> EncodeExt for T {}

/// Trait for composite records.
///
/// A message's bare encoding is the concatenation of its fields (see
/// [crate::field::write_field]). When a message is itself a field of another message, it is
/// written length-delimited (see [crate::Field]).
pub trait Message {
    /// The context the message is written against.
    type Context;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{field_size, write_field};

    struct Pair {
        a: u64,
        b: u64,
    }

    impl Message for Pair {
        type Context = ();
    }

    impl Write for Pair {
        fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
            write_field(1, &self.a, buf, cx);
            write_field(2, &self.b, buf, cx);
        }
    }

    impl EncodeSize for Pair {
        fn encode_size_cx(&self, cx: &()) -> usize {
            field_size(1, &self.a, cx) + field_size(2, &self.b, cx)
        }
    }

    struct Liar;

    impl Write for Liar {
        fn write_cx(&self, buf: &mut impl BufMut, _: &()) {
            buf.put_u8(1);
        }
    }

    impl EncodeSize for Liar {
        fn encode_size_cx(&self, _: &()) -> usize {
            2
        }
    }

    #[test]
    fn test_encode() {
        let pair = Pair { a: 11, b: 15 };
        assert_eq!(pair.encode().as_ref(), &[0x08, 0x0b, 0x10, 0x0f]);
    }

    #[test]
    fn test_encode_length_prefixed() {
        let pair = Pair { a: 11, b: 15 };
        assert_eq!(
            pair.encode_length_prefixed().as_ref(),
            &[0x04, 0x08, 0x0b, 0x10, 0x0f]
        );

        // An empty message is prefixed by a zero length
        let empty = Pair { a: 0, b: 0 };
        assert!(empty.encode().is_empty());
        assert_eq!(empty.encode_length_prefixed().as_ref(), &[0x00]);
    }

    #[test]
    #[should_panic(expected = "write() did not write expected bytes")]
    fn test_encode_size_mismatch() {
        let _ = Liar.encode();
    }
}
