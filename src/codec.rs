//! Natural and numeric codecs (§4.2): conversions between `Region` and the
//! concrete value kinds the facade accepts.
//!
//! A **natural** region mirrors raw memory layout: the LSB of a source byte
//! lands in slot 0 of its group. A **numeric** region is value-preserving
//! with the convention "LSB on the right" -- it is always the natural
//! region with a full `reverse` applied. Every codec here is built from that
//! one relationship plus the §4.2.9 contract for the optional target width.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::algebra;
use crate::error::{MemError, Result};
use crate::region::{Region, Slot};
use crate::scalar::{F32, F64, I16, I32, I64, I8, U16, U32, U64, U8};

/// Expand little-endian bytes into a natural region: for each byte, bit 0
/// (the LSB) becomes the group's first slot, bit 7 the last (§4.2.1 step 3).
fn natural_region_from_le_bytes(bytes: &[u8]) -> Region {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in 0..8 {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    Region::from_bits(&bits)
}

/// Apply the §4.2.9 contract for a fixed-width scalar's optional target
/// length: natural widening/narrowing is a plain right pad/truncate;
/// numeric widening pads in the natural domain before reversing (so the
/// padding lands at the high end of the value), and numeric narrowing
/// reverses first and keeps the low-order bits (so narrowing behaves like
/// ordinary integer truncation, not a bit-string chop).
fn pad_or_truncate(natural: &Region, native_bits: usize, numeric: bool, target: usize) -> Result<Region> {
    if target == 0 {
        return Ok(Region::null());
    }
    if !numeric {
        return algebra::ensure_bit_length(natural, target);
    }
    if target >= native_bits {
        let padded = algebra::ensure_bit_length(natural, target)?;
        algebra::reverse(&padded)
    } else {
        let numeric_native = algebra::reverse(natural)?;
        algebra::get_bits(&numeric_native, native_bits - target, native_bits)
    }
}

/// Same idea as `pad_or_truncate`, but narrowing below the native width is
/// an error rather than a truncation (§4.2.2).
fn pad_or_truncate_float(natural: &Region, native_bits: usize, numeric: bool, target: usize) -> Result<Region> {
    if target == 0 {
        return Ok(Region::null());
    }
    if target < native_bits {
        return Err(MemError::lossy_float_truncation(native_bits, target));
    }
    if !numeric {
        algebra::ensure_bit_length(natural, target)
    } else {
        let padded = algebra::ensure_bit_length(natural, target)?;
        algebra::reverse(&padded)
    }
}

macro_rules! scalar_codec {
    ($natural_fn:ident, $numeric_fn:ident, $scalar:ty, $native:ty) => {
        #[doc = concat!("Natural encoding of a `", stringify!($native), "` (§4.2.1).")]
        pub fn $natural_fn(v: $native, n: Option<usize>) -> Result<Region> {
            let native_bits = <$scalar>::BITS;
            let natural = natural_region_from_le_bytes(&<$scalar>::new(v).to_le_bytes());
            pad_or_truncate(&natural, native_bits, false, n.unwrap_or(native_bits))
        }

        #[doc = concat!("Numeric encoding of a `", stringify!($native), "` (§4.2.1).")]
        pub fn $numeric_fn(v: $native, n: Option<usize>) -> Result<Region> {
            let native_bits = <$scalar>::BITS;
            let natural = natural_region_from_le_bytes(&<$scalar>::new(v).to_le_bytes());
            pad_or_truncate(&natural, native_bits, true, n.unwrap_or(native_bits))
        }
    };
}

scalar_codec!(from_natural_u8, from_numeric_u8, U8, u8);
scalar_codec!(from_natural_u16, from_numeric_u16, U16, u16);
scalar_codec!(from_natural_u32, from_numeric_u32, U32, u32);
scalar_codec!(from_natural_u64, from_numeric_u64, U64, u64);
scalar_codec!(from_natural_i8, from_numeric_i8, I8, i8);
scalar_codec!(from_natural_i16, from_numeric_i16, I16, i16);
scalar_codec!(from_natural_i32, from_numeric_i32, I32, i32);
scalar_codec!(from_natural_i64, from_numeric_i64, I64, i64);

/// Natural encoding of an `f32` (§4.2.2). Truncation below 32 bits raises
/// `MemError::LossyFloatTruncation`.
pub fn from_natural_f32(v: f32, n: Option<usize>) -> Result<Region> {
    let natural = natural_region_from_le_bytes(&F32::new(v).to_le_bytes());
    pad_or_truncate_float(&natural, F32::BITS, false, n.unwrap_or(F32::BITS))
}

/// Numeric encoding of an `f32` (§4.2.2).
pub fn from_numeric_f32(v: f32, n: Option<usize>) -> Result<Region> {
    let natural = natural_region_from_le_bytes(&F32::new(v).to_le_bytes());
    pad_or_truncate_float(&natural, F32::BITS, true, n.unwrap_or(F32::BITS))
}

/// Natural encoding of an `f64` (§4.2.2).
pub fn from_natural_f64(v: f64, n: Option<usize>) -> Result<Region> {
    let natural = natural_region_from_le_bytes(&F64::new(v).to_le_bytes());
    pad_or_truncate_float(&natural, F64::BITS, false, n.unwrap_or(F64::BITS))
}

/// Numeric encoding of an `f64` (§4.2.2).
pub fn from_numeric_f64(v: f64, n: Option<usize>) -> Result<Region> {
    let natural = natural_region_from_le_bytes(&F64::new(v).to_le_bytes());
    pad_or_truncate_float(&natural, F64::BITS, true, n.unwrap_or(F64::BITS))
}

/// The inclusive range `[0, 2^n - 1]` an unsigned value of width `n` must
/// fall within (§6).
pub fn range_unsigned(n: usize) -> (BigUint, BigUint) {
    if n == 0 {
        return (BigUint::zero(), BigUint::zero());
    }
    (BigUint::zero(), (BigUint::one() << n) - BigUint::one())
}

/// The inclusive range `[-2^(n-1), 2^(n-1) - 1]` a signed value of width
/// `n` must fall within (§6).
pub fn range_signed(n: usize) -> (BigInt, BigInt) {
    if n == 0 {
        return (BigInt::zero(), BigInt::zero());
    }
    let half = BigInt::one() << (n - 1);
    (-half.clone(), half - BigInt::one())
}

/// Whether `v` fits in `range_unsigned(n)`.
pub fn is_in_range_unsigned(v: &BigUint, n: usize) -> bool {
    let (low, high) = range_unsigned(n);
    *v >= low && *v <= high
}

/// Whether `v` fits in `range_signed(n)`.
pub fn is_in_range_signed(v: &BigInt, n: usize) -> bool {
    let (low, high) = range_signed(n);
    *v >= low && *v <= high
}

/// Natural encoding of an arbitrary-precision unsigned integer (§4.2.3).
pub fn from_natural_big_integer_unsigned(v: &BigUint, n: Option<usize>) -> Result<Region> {
    let target = match n {
        None => (v.bits() as usize).max(1),
        Some(0) => return Ok(Region::null()),
        Some(target) => {
            let (low, high) = range_unsigned(target);
            if *v < low || *v > high {
                return Err(MemError::out_of_range(v, target, low, high));
            }
            target
        }
    };
    let bits: Vec<bool> = (0..target as u64).map(|i| v.bit(i)).collect();
    Ok(Region::from_bits(&bits))
}

/// Reverse a region's logical (⊥-free) bit order and repack. Unlike
/// `algebra::reverse`, this only ever touches real bits, so it is safe to
/// use on a region whose bit length is not a multiple of 8 -- exactly the
/// case the big-integer codecs need, since their target width `N` is
/// arbitrary rather than a native scalar width.
fn reverse_logical(region: &Region) -> Region {
    let mut bits = region.logical_bits();
    bits.reverse();
    Region::from_bits(&bits)
}

/// Numeric encoding of an arbitrary-precision unsigned integer (§4.2.3).
pub fn from_numeric_big_integer_unsigned(v: &BigUint, n: Option<usize>) -> Result<Region> {
    Ok(reverse_logical(&from_natural_big_integer_unsigned(v, n)?))
}

/// Natural encoding of an arbitrary-precision signed integer, as a
/// two's-complement bit pattern (§4.2.3).
pub fn from_natural_big_integer_signed(v: &BigInt, n: Option<usize>) -> Result<Region> {
    let target = match n {
        None => (v.magnitude().bits() as usize) + 1,
        Some(0) => return Ok(Region::null()),
        Some(target) => target,
    };
    if n.is_some() {
        let (low, high) = range_signed(target);
        if *v < low || *v > high {
            return Err(MemError::out_of_range(v, target, low, high));
        }
    }
    let modulus = BigInt::one() << target;
    let biased = if v.sign() == Sign::Minus { v + &modulus } else { v.clone() };
    let magnitude = biased
        .to_biguint()
        .expect("biased value is non-negative by construction");
    let bits: Vec<bool> = (0..target as u64).map(|i| magnitude.bit(i)).collect();
    Ok(Region::from_bits(&bits))
}

/// Numeric encoding of an arbitrary-precision signed integer (§4.2.3).
pub fn from_numeric_big_integer_signed(v: &BigInt, n: Option<usize>) -> Result<Region> {
    Ok(reverse_logical(&from_natural_big_integer_signed(v, n)?))
}

/// Interpret `mem`'s logical bits, most-significant slot first, as an
/// unsigned integer (§4.2.8).
pub fn into_natural_big_integer(mem: &Region) -> BigUint {
    let mut value = BigUint::zero();
    for bit in mem.logical_bits() {
        value <<= 1;
        if bit {
            value |= BigUint::one();
        }
    }
    value
}

/// Interpret `mem`'s logical bits as a two's-complement signed integer
/// (§4.2.8): the leading slot is the sign bit.
pub fn into_numeric_big_integer(mem: &Region) -> BigInt {
    let n = mem.bit_length();
    if n == 0 {
        return BigInt::zero();
    }
    let raw = into_natural_big_integer(mem);
    let negative = mem.logical_bits()[0];
    if negative {
        BigInt::from(raw) - (BigInt::one() << n)
    } else {
        BigInt::from(raw)
    }
}

/// Encode each byte with numeric (LSB-on-right) semantics and concatenate,
/// then fit to the requested length (§4.2.4).
pub fn from_bytes(bytes: &[u8], n: Option<usize>) -> Result<Region> {
    let mut region = Region::null();
    for &byte in bytes {
        region = algebra::concatenate(&region, &from_numeric_u8(byte, Some(8))?)?;
    }
    algebra::ensure_bit_length(&region, n.unwrap_or_else(|| region.bit_length()))
}

/// Encode UTF-8 bytes via `from_bytes` (§4.2.7).
pub fn from_bytes_utf8(s: &str, n: Option<usize>) -> Result<Region> {
    from_bytes(s.as_bytes(), n)
}

/// Pack a flat sequence of 0/1 values into a region (§4.2.5).
pub fn from_bit_list(values: &[u8]) -> Result<Region> {
    let mut bits = Vec::with_capacity(values.len());
    for &v in values {
        bits.push(match v {
            0 => false,
            1 => true,
            other => return Err(MemError::invariant(format!("bit list entries must be 0 or 1, got {other}"))),
        });
    }
    Ok(Region::from_bits(&bits))
}

/// Pack a sequence of per-group 0/1 slices into a region, one group per
/// slice, each padded with ⊥ on the right (§4.2.5).
pub fn from_grouped_bits(groups: &[Vec<u8>]) -> Result<Region> {
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        if group.len() > 8 {
            return Err(MemError::invariant(format!(
                "group has {} slots, at most 8 are allowed",
                group.len()
            )));
        }
        let mut slots = [Slot::Bottom; 8];
        for (slot, &v) in slots.iter_mut().zip(group.iter()) {
            *slot = match v {
                0 => Slot::Zero,
                1 => Slot::One,
                other => return Err(MemError::invariant(format!("bit list entries must be 0 or 1, got {other}"))),
            };
        }
        out.push(slots);
    }
    Ok(Region::from_groups(out))
}

/// Produce a 1-bit region from a boolean (§4.2.6).
pub fn from_bool(v: bool, n: Option<usize>) -> Result<Region> {
    algebra::ensure_bit_length(&Region::from_bits(&[v]), n.unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::bit_string;

    #[test]
    fn natural_u8_puts_lsb_first() {
        let r = from_natural_u8(0b0000_0101, None).unwrap();
        assert_eq!(bit_string(&r), "10100000");
    }

    #[test]
    fn numeric_u8_is_value_preserving_big_endian() {
        let r = from_numeric_u8(0b0000_0101, None).unwrap();
        assert_eq!(bit_string(&r), "00000101");
    }

    #[test]
    fn signed_4_bit_boundaries() {
        let neg_one = from_numeric_big_integer_signed(&BigInt::from(-1), Some(4)).unwrap();
        assert_eq!(bit_string(&neg_one), "1111____");
        let min = from_numeric_big_integer_signed(&BigInt::from(-8), Some(4)).unwrap();
        assert_eq!(bit_string(&min), "1000____");
        let max = from_numeric_big_integer_signed(&BigInt::from(7), Some(4)).unwrap();
        assert_eq!(bit_string(&max), "0111____");
        assert!(from_natural_big_integer_signed(&BigInt::from(-9), Some(4)).is_err());
    }

    #[test]
    fn natural_u16_matches_scenario() {
        let r = from_natural_u16(0b1_0001_0011, None).unwrap();
        assert_eq!(bit_string(&r), "11001000 10000000");
    }

    #[test]
    fn numeric_u16_matches_scenario() {
        let r = from_numeric_u16(0b1_0001_0011, None).unwrap();
        assert_eq!(bit_string(&r), "00000001 00010011");
    }

    #[test]
    fn big_integer_round_trips() {
        for v in [0u32, 1, 42, 255, 65535] {
            let encoded = from_natural_big_integer_unsigned(&BigUint::from(v), Some(32)).unwrap();
            assert_eq!(into_natural_big_integer(&encoded), BigUint::from(v));
        }
    }

    #[test]
    fn float_truncation_below_native_errors() {
        assert!(from_natural_f32(1.0, Some(16)).is_err());
        assert!(from_natural_f32(1.0, Some(64)).is_ok());
    }

    #[test]
    fn numeric_scalar_narrowing_keeps_low_bits() {
        // 0x1234u16 numeric at full width, narrowed to 8 bits should keep
        // the low byte (0x34), matching ordinary integer truncation.
        let full = from_numeric_u16(0x1234, None).unwrap();
        let narrowed = from_numeric_u16(0x1234, Some(8)).unwrap();
        let full_tail = algebra::get_bits(&full, 8, 16).unwrap();
        assert_eq!(narrowed, full_tail);
    }

    #[test]
    fn from_bytes_round_trips_through_big_integer() {
        let region = from_bytes(&[0x12, 0x34], None).unwrap();
        assert_eq!(region.bit_length(), 16);
    }

    #[test]
    fn grouped_bits_rejects_oversized_group() {
        assert!(from_grouped_bits(&[vec![0, 1, 1, 0, 1, 0, 1, 0, 1]]).is_err());
    }
}
