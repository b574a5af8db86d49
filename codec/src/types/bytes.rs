//! Field implementations for byte sequences and strings.
//!
//! Every byte sequence is written as the varint of its length followed by its raw bytes. A
//! zero-length sequence is empty and therefore omitted from its message.

use crate::{
    field::{Field, Typ3},
    varint,
};
use bytes::{BufMut, Bytes};

#[inline]
fn write_bytes(value: &[u8], buf: &mut impl BufMut) {
    varint::write(value.len() as u64, buf);
    buf.put_slice(value);
}

#[inline]
fn bytes_size(value: &[u8]) -> usize {
    varint::size(value.len() as u64) + value.len()
}

// Length-delimited implementation
macro_rules! impl_byte_length {
    ($type:ty) => {
        impl<Cx> Field<Cx> for $type {
            const TYP3: Typ3 = Typ3::ByteLength;

            #[inline]
            fn is_empty_cx(&self, _: &Cx) -> bool {
                self.is_empty()
            }

            #[inline]
            fn write_value(&self, buf: &mut impl BufMut, _: &Cx) {
                write_bytes(AsRef::<[u8]>::as_ref(self), buf);
            }

            #[inline]
            fn value_size(&self, _: &Cx) -> usize {
                bytes_size(AsRef::<[u8]>::as_ref(self))
            }
        }
    };
}
impl_byte_length!(Bytes);
impl_byte_length!(Vec<u8>);
impl_byte_length!(String);

// Constant-size array implementation
impl<Cx, const N: usize> Field<Cx> for [u8; N] {
    const TYP3: Typ3 = Typ3::ByteLength;

    #[inline]
    fn is_empty_cx(&self, _: &Cx) -> bool {
        N == 0
    }

    #[inline]
    fn write_value(&self, buf: &mut impl BufMut, _: &Cx) {
        write_bytes(self, buf);
    }

    #[inline]
    fn value_size(&self, _: &Cx) -> usize {
        bytes_size(self)
    }
}
