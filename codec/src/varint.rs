//! Varints.
//!
//! This module implements Google's Protocol Buffers variable-length integer encoding, which
//! amino uses for field keys, length prefixes, and integer field values. Each byte carries 7 bits
//! of the value, and its top bit is set if another byte follows.
//!
//! Groups are emitted least-significant first and the minimal number of groups is always used.
//!
//! Signed integers written with [write_signed] are first mapped with ZigZag encoding (amino's
//! `EncodeVarint`). Note that amino writes signed struct fields as the unsigned varint of their
//! two's-complement value instead (see [crate::field]).
//!
//! There are no implementations for `usize` or `isize`, whose width depends on the target.

use crate::{EncodeSize, Error, Write};
use bytes::{Buf, BufMut};
use std::ops::{BitOrAssign, Shl, ShrAssign};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt:
    Copy
    + From<u8>
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;
}

macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}
impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);

/// A signed integer with a ZigZag mapping onto the unsigned integer of the same width.
///
/// ZigZag interleaves negative and positive values (`0, -1, 1, -2, 2, ...` map to
/// `0, 1, 2, 3, 4, ...`), so small magnitudes of either sign take few groups.
pub trait SInt: Copy {
    /// The unsigned integer of the same width.
    type Unsigned: UInt;

    /// Maps the value onto its unsigned ZigZag form.
    fn as_zigzag(&self) -> Self::Unsigned;

    /// Inverts [SInt::as_zigzag].
    fn un_zigzag(value: Self::Unsigned) -> Self;
}

macro_rules! impl_sint {
    ($type:ty, $utype:ty) => {
        impl SInt for $type {
            type Unsigned = $utype;

            #[inline]
            fn as_zigzag(&self) -> $utype {
                let shr = std::mem::size_of::<$utype>() * 8 - 1;
                ((self << 1) ^ (self >> shr)) as $utype
            }

            #[inline]
            fn un_zigzag(value: $utype) -> Self {
                ((value >> 1) as $type) ^ (-((value & 1) as $type))
            }
        }
    };
}
impl_sint!(i8, u8);
impl_sint!(i16, u16);
impl_sint!(i32, u32);
impl_sint!(i64, u64);

/// Encodes an unsigned integer as a varint, using the minimal number of groups.
pub fn write<T: UInt>(value: T, buf: &mut impl BufMut) {
    let threshold = T::from(CONTINUATION_BIT_MASK);
    let mut rest = value;
    while rest >= threshold {
        // Truncation to the low byte is intended: only its 7 data bits are kept.
        buf.put_u8(rest.as_u8() | CONTINUATION_BIT_MASK);
        rest >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(rest.as_u8());
}

/// Decodes an unsigned integer from a varint.
///
/// Only the encoding produced by [write] is accepted: input that ends mid-varint, that sets bits
/// beyond the width of `T`, or that ends with a redundant zero group is rejected.
pub fn read<T: UInt>(buf: &mut impl Buf) -> Result<T, Error> {
    let max_bits = std::mem::size_of::<T>() * 8;
    let mut result: T = T::from(0);
    let mut shift = 0;
    loop {
        if !buf.has_remaining() {
            return Err(Error::EndOfBuffer);
        }
        let byte = buf.get_u8();

        // The group that reaches the width of `T` must be the last one and must fit. The
        // continuation bit is the top bit, so a set continuation bit never fits.
        let remaining_bits = max_bits - shift;
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let used_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if used_bits > remaining_bits {
                return Err(Error::InvalidVarint);
            }
        }
        result |= T::from(byte & DATA_BITS_MASK) << shift;

        if byte & CONTINUATION_BIT_MASK == 0 {
            // A zero final group (after the first) is never emitted by `write`.
            if byte == 0 && shift > 0 {
                return Err(Error::InvalidVarint);
            }
            return Ok(result);
        }
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Returns the length of the varint of `value`.
pub fn size<T: UInt>(value: T) -> usize {
    let total_bits = std::mem::size_of::<T>() * 8;
    let leading_zeros = value.leading_zeros() as usize;
    let data_bits = total_bits - leading_zeros;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

/// Encodes a signed integer as a varint using ZigZag encoding.
pub fn write_signed<S: SInt>(value: S, buf: &mut impl BufMut) {
    write(value.as_zigzag(), buf);
}

/// Decodes a ZigZag varint.
pub fn read_signed<S: SInt>(buf: &mut impl Buf) -> Result<S, Error> {
    Ok(S::un_zigzag(read(buf)?))
}

/// Returns the length of the ZigZag varint of `value`.
pub fn size_signed<S: SInt>(value: S) -> usize {
    size(value.as_zigzag())
}

/// An ergonomic wrapper to encode a primitive unsigned integer as a standalone varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UVar<T: UInt>(pub T);

impl<T: UInt> UVar<T> {
    /// Reads a varint as the wrapped integer type.
    pub fn read_into(buf: &mut impl Buf) -> Result<T, Error> {
        read::<T>(buf)
    }
}

impl<T: UInt> Write for UVar<T> {
    fn write_cx(&self, buf: &mut impl BufMut, _: &()) {
        write(self.0, buf);
    }
}

impl<T: UInt> EncodeSize for UVar<T> {
    fn encode_size_cx(&self, _: &()) -> usize {
        size(self.0)
    }
}

/// An ergonomic wrapper to encode a primitive signed integer as a standalone ZigZag varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SVar<S: SInt>(pub S);

impl<S: SInt> SVar<S> {
    /// Reads a ZigZag varint as the wrapped integer type.
    pub fn read_into(buf: &mut impl Buf) -> Result<S, Error> {
        read_signed::<S>(buf)
    }
}

impl<S: SInt> Write for SVar<S> {
    fn write_cx(&self, buf: &mut impl BufMut, _: &()) {
        write_signed(self.0, buf);
    }
}

impl<S: SInt> EncodeSize for SVar<S> {
    fn encode_size_cx(&self, _: &()) -> usize {
        size_signed(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::hex, EncodeExt};
    use bytes::Bytes;

    #[test]
    fn test_read_narrow() {
        let val1 = read::<u8>(&mut &[0x81, 0x01][..]);
        assert_eq!(val1.unwrap(), 0x81);

        let val2 = read::<u8>(&mut &[0x01][..]);
        assert_eq!(val2.unwrap(), 0x01);

        let val3 = read::<u8>(&mut &[0xAC, 0x02][..]);
        assert!(matches!(val3, Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_overlong_varint() {
        // A 6-byte varint cannot fit in a u32
        let mut buf = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert!(matches!(read::<u32>(&mut buf), Err(Error::InvalidVarint)));
    }

    #[test]
    fn test_round_trip() {
        // Every power of two and its neighbors
        for shift in 0..64 {
            let power = 1u64 << shift;
            for value in [power - 1, power, power.wrapping_add(1)] {
                let encoded = UVar(value).encode();
                assert_eq!(encoded.len(), size(value));
                let mut rest = &encoded[..];
                assert_eq!(read::<u64>(&mut rest).unwrap(), value);
                assert!(rest.is_empty());
            }

            let signed = power as i64;
            for value in [signed, signed.wrapping_neg(), signed.wrapping_sub(1)] {
                let encoded = SVar(value).encode();
                assert_eq!(encoded.len(), size_signed(value));
                let mut rest = &encoded[..];
                assert_eq!(read_signed::<i64>(&mut rest).unwrap(), value);
                assert!(rest.is_empty());
            }
        }
    }

    #[test]
    fn test_group_boundaries() {
        // Length only grows when crossing a power of 128
        for groups in 1..10u32 {
            let boundary = 1u64 << (7 * groups);
            assert_eq!(size(boundary - 1), groups as usize);
            assert_eq!(size(boundary), groups as usize + 1);
            assert_eq!(size(boundary + 1), groups as usize + 1);
        }
        assert_eq!(size(u64::MAX), 10);

        // Lengths are monotonic in magnitude
        let mut last = 0;
        for value in (0u64..=70_000).step_by(7) {
            let len = size(value);
            assert!(len >= last);
            last = len;
        }
    }

    #[test]
    fn test_signed_vectors() {
        let vectors: [(i64, &str); 10] = [
            (0, "00"),
            (1, "02"),
            (-1, "01"),
            (63, "7e"),
            (64, "8001"),
            (255, "fe03"),
            (256, "8004"),
            (1234, "a413"),
            (100000, "c09a0c"),
            (i64::MIN, "ffffffffffffffffff01"),
        ];
        for (value, expected) in vectors {
            assert_eq!(hex(&SVar(value).encode()), expected);
        }
    }

    #[test]
    fn test_two_group_continuation() {
        let encoded = SVar(255i64).encode();
        assert_eq!(encoded.len(), 2);
        assert_ne!(encoded[0] & CONTINUATION_BIT_MASK, 0);
        assert_eq!(encoded[1] & CONTINUATION_BIT_MASK, 0);
        assert_eq!(SVar::<i64>::read_into(&mut &encoded[..]).unwrap(), 255);
    }

    #[test]
    fn test_unsigned_wrapper() {
        let encoded = UVar(300u32).encode();
        assert_eq!(encoded.as_ref(), &[0xAC, 0x02]);
        assert_eq!(UVar::<u32>::read_into(&mut &encoded[..]).unwrap(), 300);
    }

    #[test]
    fn test_deterministic() {
        for value in [0i64, -7, 1 << 40, i64::MAX] {
            assert_eq!(SVar(value).encode(), SVar(value).encode());
        }
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let mut buf = Bytes::from_static(&[0x80]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::EndOfBuffer)));
    }

    #[test]
    fn test_varint_non_minimal() {
        let mut buf = Bytes::from_static(&[0x80, 0x00]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::InvalidVarint)));
        let mut buf = Bytes::from_static(&[0x81, 0x80, 0x00]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::InvalidVarint)));
        assert_eq!(read::<u64>(&mut &[0x00][..]).unwrap(), 0);
    }

    #[test]
    fn test_varint_invalid() {
        let mut buf =
            Bytes::from_static(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02]);
        assert!(matches!(read::<u64>(&mut buf), Err(Error::InvalidVarint)));
    }
}
