//! Field implementations for Rust primitive types.
//!
//! # Varint vs Fixed-size
//!
//! Integers are written as unsigned varints by default. Signed integers are sign-extended to 64
//! bits and written as the varint of their two's-complement value (no ZigZag), so a negative
//! field always takes 10 bytes.
//!
//! Wrap an integer in [Fixed64] or [Fixed32] to write it as a fixed-width little-endian value
//! instead. This is how heights and rounds are written in signed records.

use crate::{
    field::{Field, Typ3},
    varint,
};
use bytes::BufMut;

// Unsigned varint implementation
macro_rules! impl_uvarint {
    ($type:ty) => {
        impl<Cx> Field<Cx> for $type {
            const TYP3: Typ3 = Typ3::Varint;

            #[inline]
            fn is_empty_cx(&self, _: &Cx) -> bool {
                *self == 0
            }

            #[inline]
            fn write_value(&self, buf: &mut impl BufMut, _: &Cx) {
                varint::write(u64::from(*self), buf);
            }

            #[inline]
            fn value_size(&self, _: &Cx) -> usize {
                varint::size(u64::from(*self))
            }
        }
    };
}
impl_uvarint!(u8);
impl_uvarint!(u16);
impl_uvarint!(u32);
impl_uvarint!(u64);

// Two's-complement varint implementation
macro_rules! impl_svarint {
    ($type:ty) => {
        impl<Cx> Field<Cx> for $type {
            const TYP3: Typ3 = Typ3::Varint;

            #[inline]
            fn is_empty_cx(&self, _: &Cx) -> bool {
                *self == 0
            }

            #[inline]
            fn write_value(&self, buf: &mut impl BufMut, _: &Cx) {
                varint::write(i64::from(*self) as u64, buf);
            }

            #[inline]
            fn value_size(&self, _: &Cx) -> usize {
                varint::size(i64::from(*self) as u64)
            }
        }
    };
}
impl_svarint!(i8);
impl_svarint!(i16);
impl_svarint!(i32);
impl_svarint!(i64);

impl<Cx> Field<Cx> for bool {
    const TYP3: Typ3 = Typ3::Varint;

    #[inline]
    fn is_empty_cx(&self, _: &Cx) -> bool {
        !*self
    }

    #[inline]
    fn write_value(&self, buf: &mut impl BufMut, _: &Cx) {
        buf.put_u8(u8::from(*self));
    }

    #[inline]
    fn value_size(&self, _: &Cx) -> usize {
        1
    }
}

/// An integer written as 8 little-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed64<T>(pub T);

/// An integer written as 4 little-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed32<T>(pub T);

// Fixed-width implementation
macro_rules! impl_fixed {
    ($wrapper:ident, $type:ty, $typ3:expr, $write_method:ident) => {
        impl<Cx> Field<Cx> for $wrapper<$type> {
            const TYP3: Typ3 = $typ3;

            #[inline]
            fn is_empty_cx(&self, _: &Cx) -> bool {
                self.0 == 0
            }

            #[inline]
            fn write_value(&self, buf: &mut impl BufMut, _: &Cx) {
                buf.$write_method(self.0);
            }

            #[inline]
            fn value_size(&self, _: &Cx) -> usize {
                std::mem::size_of::<$type>()
            }
        }
    };
}
impl_fixed!(Fixed64, u64, Typ3::Fixed64, put_u64_le);
impl_fixed!(Fixed64, i64, Typ3::Fixed64, put_i64_le);
impl_fixed!(Fixed32, u32, Typ3::Fixed32, put_u32_le);
impl_fixed!(Fixed32, i32, Typ3::Fixed32, put_i32_le);
