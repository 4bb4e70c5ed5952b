//! The idiomatic facade (§4.3): `Mem`, `Unsigned`, `Signed`, built on the
//! `Region`/algebra/codec layers below.
//!
//! Construction goes through one tagged enum, `Initializer`, populated via
//! `From<T>` conversions -- the Rust re-expression of dispatching on input
//! kind, in place of a chain of `isinstance` checks.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::algebra;
use crate::codec;
use crate::error::{MemError, Result};
use crate::order::{Order, Universe};
use crate::region::Region;

/// A sequence of individual 0/1 values, packed one bit per element
/// (§4.2.5's "flat" bit list). A distinct type from `Vec<u8>` so that a
/// plain byte sequence and a bit list dispatch to different codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitList(pub Vec<u8>);

/// A sequence of per-group 0/1 slices (§4.2.5's "grouped" bit list); each
/// inner `Vec` becomes one group, padded with ⊥ on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedBits(pub Vec<Vec<u8>>);

/// Marker for the null/no-value initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

/// Every input kind the facade constructors accept, tagged by variant
/// instead of inspected at runtime (§4.3, §9 "Dynamic multi-type dispatch
/// in the constructor").
#[derive(Debug, Clone)]
pub enum Initializer {
    /// No value: an all-zero (or null, if unsized) region.
    Null,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// An arbitrary-precision non-negative integer.
    BigUint(BigUint),
    /// An arbitrary-precision integer that may be negative.
    BigInt(BigInt),
    /// A raw byte sequence.
    Bytes(Vec<u8>),
    BitList(Vec<u8>),
    GroupedBits(Vec<Vec<u8>>),
    /// UTF-8 text, or (for `Unsigned`/`Signed`) a `0x`/`0b`-prefixed literal.
    Str(String),
    /// A deep copy of an existing region.
    Region(Region),
}

impl From<Null> for Initializer {
    fn from(_: Null) -> Self {
        Initializer::Null
    }
}

impl From<bool> for Initializer {
    fn from(v: bool) -> Self {
        Initializer::Bool(v)
    }
}

macro_rules! initializer_from_native {
    ($variant:ident, $native:ty) => {
        impl From<$native> for Initializer {
            fn from(v: $native) -> Self {
                Initializer::$variant(v)
            }
        }
    };
}

initializer_from_native!(U8, u8);
initializer_from_native!(U16, u16);
initializer_from_native!(U32, u32);
initializer_from_native!(U64, u64);
initializer_from_native!(I8, i8);
initializer_from_native!(I16, i16);
initializer_from_native!(I32, i32);
initializer_from_native!(I64, i64);
initializer_from_native!(F32, f32);
initializer_from_native!(F64, f64);

impl From<BigUint> for Initializer {
    fn from(v: BigUint) -> Self {
        Initializer::BigUint(v)
    }
}

impl From<BigInt> for Initializer {
    fn from(v: BigInt) -> Self {
        Initializer::BigInt(v)
    }
}

impl From<Vec<u8>> for Initializer {
    fn from(v: Vec<u8>) -> Self {
        Initializer::Bytes(v)
    }
}

impl From<BitList> for Initializer {
    fn from(v: BitList) -> Self {
        Initializer::BitList(v.0)
    }
}

impl From<GroupedBits> for Initializer {
    fn from(v: GroupedBits) -> Self {
        Initializer::GroupedBits(v.0)
    }
}

impl From<&str> for Initializer {
    fn from(v: &str) -> Self {
        Initializer::Str(v.to_string())
    }
}

impl From<String> for Initializer {
    fn from(v: String) -> Self {
        Initializer::Str(v)
    }
}

impl From<Region> for Initializer {
    fn from(v: Region) -> Self {
        Initializer::Region(v)
    }
}

fn zero_region(n: Option<usize>) -> Region {
    match n {
        None => Region::null(),
        Some(n) => Region::from_bits(&vec![false; n]),
    }
}

fn reject_negative_big_int(v: &BigInt, n: Option<usize>) -> Result<BigUint> {
    if v.sign() == Sign::Minus {
        return Err(MemError::out_of_range(v, n.unwrap_or(0), "0", "unbounded"));
    }
    Ok(v.to_biguint().expect("already verified non-negative"))
}

fn reject_negative_native(v: i64, bits: usize) -> Result<()> {
    if v < 0 {
        Err(MemError::out_of_range(v, bits, "0", format!("2^{bits}-1")))
    } else {
        Ok(())
    }
}

/// Reject an `i8`/`i16`/`i32`/`i64` input that does not fit in the caller's
/// requested target width `n` (if any), against two's-complement bounds.
fn reject_out_of_signed_range(v: i64, n: Option<usize>) -> Result<()> {
    if let Some(n) = n {
        let value = BigInt::from(v);
        if !codec::is_in_range_signed(&value, n) {
            let (low, high) = codec::range_signed(n);
            return Err(MemError::out_of_range(v, n, low, high));
        }
    }
    Ok(())
}

fn reject_overflow_into_signed(v: u64, bits: usize) -> Result<()> {
    let max: u64 = match bits {
        8 => i8::MAX as u64,
        16 => i16::MAX as u64,
        32 => i32::MAX as u64,
        64 => i64::MAX as u64,
        other => unreachable!("unsupported scalar width {other}"),
    };
    if v > max {
        Err(MemError::out_of_range(v, bits, "0", max))
    } else {
        Ok(())
    }
}

/// `Unsigned`/`Signed` string inputs: a `0x`/`0b`-prefixed literal decodes
/// as a big integer; anything else is treated as UTF-8 bytes (§4.3).
fn string_initializer_numeric(s: &str, n: Option<usize>, signed: bool) -> Result<Region> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(
            BigUint::parse_bytes(hex.as_bytes(), 16)
                .ok_or_else(|| MemError::invalid_initializer(format!("invalid hex literal: {s}")))?,
        )
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        Some(
            BigUint::parse_bytes(bin.as_bytes(), 2)
                .ok_or_else(|| MemError::invalid_initializer(format!("invalid binary literal: {s}")))?,
        )
    } else {
        None
    };
    match parsed {
        Some(v) if signed => codec::from_numeric_big_integer_signed(&BigInt::from(v), n),
        Some(v) => codec::from_numeric_big_integer_unsigned(&v, n),
        None => codec::from_bytes_utf8(s, n),
    }
}

fn bit_list_region(bits: Vec<u8>, n: Option<usize>) -> Result<Region> {
    let natural = codec::from_bit_list(&bits)?;
    algebra::ensure_bit_length(&natural, n.unwrap_or_else(|| natural.bit_length()))
}

fn region_initializer(region: Region, n: Option<usize>) -> Result<Region> {
    match n {
        Some(n) => algebra::ensure_bit_length(&region, n),
        None => Ok(region),
    }
}

fn mem_region_from_initializer(init: Initializer, n: Option<usize>) -> Result<Region> {
    match init {
        Initializer::Null => Ok(zero_region(n)),
        Initializer::Bool(v) => codec::from_bool(v, n),
        Initializer::U8(v) => codec::from_natural_u8(v, n),
        Initializer::U16(v) => codec::from_natural_u16(v, n),
        Initializer::U32(v) => codec::from_natural_u32(v, n),
        Initializer::U64(v) => codec::from_natural_u64(v, n),
        Initializer::I8(v) => codec::from_natural_i8(v, n),
        Initializer::I16(v) => codec::from_natural_i16(v, n),
        Initializer::I32(v) => codec::from_natural_i32(v, n),
        Initializer::I64(v) => codec::from_natural_i64(v, n),
        Initializer::F32(v) => codec::from_natural_f32(v, n),
        Initializer::F64(v) => codec::from_natural_f64(v, n),
        Initializer::BigUint(v) => codec::from_natural_big_integer_unsigned(&v, n),
        Initializer::BigInt(v) => {
            let magnitude = reject_negative_big_int(&v, n)?;
            codec::from_natural_big_integer_unsigned(&magnitude, n)
        }
        Initializer::Bytes(bytes) => codec::from_bytes(&bytes, n),
        Initializer::BitList(bits) => bit_list_region(bits, n),
        Initializer::GroupedBits(groups) => codec::from_grouped_bits(&groups),
        Initializer::Str(s) => codec::from_bytes_utf8(&s, n),
        Initializer::Region(region) => region_initializer(region, n),
    }
}

fn unsigned_region_from_initializer(init: Initializer, n: Option<usize>) -> Result<Region> {
    match init {
        Initializer::Null => Ok(zero_region(n)),
        Initializer::Bool(v) => codec::from_bool(v, n),
        Initializer::U8(v) => codec::from_numeric_u8(v, n),
        Initializer::U16(v) => codec::from_numeric_u16(v, n),
        Initializer::U32(v) => codec::from_numeric_u32(v, n),
        Initializer::U64(v) => codec::from_numeric_u64(v, n),
        Initializer::I8(v) => {
            reject_negative_native(v as i64, 8)?;
            codec::from_numeric_i8(v, n)
        }
        Initializer::I16(v) => {
            reject_negative_native(v as i64, 16)?;
            codec::from_numeric_i16(v, n)
        }
        Initializer::I32(v) => {
            reject_negative_native(v as i64, 32)?;
            codec::from_numeric_i32(v, n)
        }
        Initializer::I64(v) => {
            reject_negative_native(v, 64)?;
            codec::from_numeric_i64(v, n)
        }
        Initializer::F32(v) => codec::from_numeric_f32(v, n),
        Initializer::F64(v) => codec::from_numeric_f64(v, n),
        Initializer::BigUint(v) => codec::from_numeric_big_integer_unsigned(&v, n),
        Initializer::BigInt(v) => {
            let magnitude = reject_negative_big_int(&v, n)?;
            codec::from_numeric_big_integer_unsigned(&magnitude, n)
        }
        Initializer::Bytes(bytes) => codec::from_bytes(&bytes, n),
        Initializer::BitList(bits) => bit_list_region(bits, n),
        Initializer::GroupedBits(groups) => codec::from_grouped_bits(&groups),
        Initializer::Str(s) => string_initializer_numeric(&s, n, false),
        Initializer::Region(region) => region_initializer(region, n),
    }
}

fn signed_region_from_initializer(init: Initializer, n: Option<usize>) -> Result<Region> {
    match init {
        Initializer::Null => Ok(zero_region(n)),
        Initializer::Bool(v) => codec::from_bool(v, n),
        Initializer::U8(v) => {
            reject_overflow_into_signed(v as u64, 8)?;
            codec::from_numeric_u8(v, n)
        }
        Initializer::U16(v) => {
            reject_overflow_into_signed(v as u64, 16)?;
            codec::from_numeric_u16(v, n)
        }
        Initializer::U32(v) => {
            reject_overflow_into_signed(v as u64, 32)?;
            codec::from_numeric_u32(v, n)
        }
        Initializer::U64(v) => {
            reject_overflow_into_signed(v, 64)?;
            codec::from_numeric_u64(v, n)
        }
        Initializer::I8(v) => {
            reject_out_of_signed_range(v as i64, n)?;
            codec::from_numeric_i8(v, n)
        }
        Initializer::I16(v) => {
            reject_out_of_signed_range(v as i64, n)?;
            codec::from_numeric_i16(v, n)
        }
        Initializer::I32(v) => {
            reject_out_of_signed_range(v as i64, n)?;
            codec::from_numeric_i32(v, n)
        }
        Initializer::I64(v) => {
            reject_out_of_signed_range(v, n)?;
            codec::from_numeric_i64(v, n)
        }
        Initializer::F32(v) => codec::from_numeric_f32(v, n),
        Initializer::F64(v) => codec::from_numeric_f64(v, n),
        Initializer::BigUint(v) => codec::from_numeric_big_integer_signed(&BigInt::from(v), n),
        Initializer::BigInt(v) => codec::from_numeric_big_integer_signed(&v, n),
        Initializer::Bytes(bytes) => codec::from_bytes(&bytes, n),
        Initializer::BitList(bits) => bit_list_region(bits, n),
        Initializer::GroupedBits(groups) => codec::from_grouped_bits(&groups),
        Initializer::Str(s) => string_initializer_numeric(&s, n, true),
        Initializer::Region(region) => region_initializer(region, n),
    }
}

macro_rules! facade_type {
    ($name:ident, $from_initializer:ident, $kind:literal) => {
        #[doc = concat!("Facade wrapper with ", $kind, " construction/read semantics (§4.3).")]
        #[derive(Debug, Clone)]
        pub struct $name {
            target_bit_length: Option<usize>,
            region: Region,
        }

        impl $name {
            /// Build from any input convertible to `Initializer`, under the
            /// canonical `(LeftToRight, LeftToRight)` universe.
            pub fn new(init: impl Into<Initializer>, n: Option<usize>) -> Result<Self> {
                Self::with_universe(init, n, Universe::IDENTITY)
            }

            /// Build from any input convertible to `Initializer`, treating
            /// it as encoded in `universe` and normalizing to canonical
            /// form afterward (§4.3).
            pub fn with_universe(init: impl Into<Initializer>, n: Option<usize>, universe: Universe) -> Result<Self> {
                let region = $from_initializer(init.into(), n)?;
                let region = algebra::transform(&region, universe.bit_order, universe.byte_order)?;
                Ok(Self { target_bit_length: n, region })
            }

            fn wrap(&self, region: Region) -> Self {
                Self { target_bit_length: self.target_bit_length, region }
            }

            /// The backing canonical region.
            pub fn region(&self) -> &Region {
                &self.region
            }

            /// The target bit length this value was constructed with, if any.
            pub fn target_bit_length(&self) -> Option<usize> {
                self.target_bit_length
            }

            /// Count of non-⊥ slots.
            pub fn bit_length(&self) -> usize {
                self.region.bit_length()
            }

            /// Number of groups.
            pub fn byte_length(&self) -> usize {
                self.region.byte_length()
            }

            /// The 1-bit value at physical position `i`.
            pub fn bit(&self, i: usize) -> Result<Self> {
                Ok(self.wrap(algebra::get_bit(&self.region, i)?))
            }

            /// The byte at index `i` (possibly short, for the partial last byte).
            pub fn byte(&self, i: usize) -> Result<Self> {
                Ok(self.wrap(algebra::get_byte(&self.region, i)?))
            }

            /// Bits `[start, stop)`.
            pub fn bits(&self, start: usize, stop: usize) -> Result<Self> {
                if start > stop {
                    return Err(MemError::invalid_index(format!("start {start} is after stop {stop}")));
                }
                Ok(self.wrap(algebra::get_bits(&self.region, start, stop)?))
            }

            /// Bytes `[start, stop)`.
            pub fn bytes(&self, start: usize, stop: usize) -> Result<Self> {
                if start > stop {
                    return Err(MemError::invalid_index(format!("start {start} is after stop {stop}")));
                }
                Ok(self.wrap(algebra::get_bytes(&self.region, start, stop)?))
            }

            /// Map this value out of its internal canonical form and into
            /// `(bit_order, byte_order)` (or back into canonical form, if
            /// called symmetrically).
            pub fn transform(&self, bit_order: Order, byte_order: Order) -> Result<Self> {
                Ok(self.wrap(algebra::transform(&self.region, bit_order, byte_order)?))
            }

            /// `transform(LeftToRight, LeftToRight)`.
            pub fn identity(&self) -> Result<Self> {
                Ok(self.wrap(algebra::identity(&self.region)?))
            }

            /// `transform(RightToLeft, RightToLeft)`.
            pub fn reverse(&self) -> Result<Self> {
                Ok(self.wrap(algebra::reverse(&self.region)?))
            }

            /// `transform(RightToLeft, LeftToRight)`.
            pub fn reverse_bits(&self) -> Result<Self> {
                Ok(self.wrap(algebra::reverse_bits(&self.region)?))
            }

            /// `transform(LeftToRight, RightToLeft)`.
            pub fn reverse_bytes(&self) -> Result<Self> {
                Ok(self.wrap(algebra::reverse_bytes(&self.region)?))
            }

            /// Replace the bit at `off` with `payload`'s single bit.
            pub fn set_bit(&self, off: usize, payload: &Self) -> Result<Self> {
                Ok(self.wrap(algebra::set_bit(&self.region, off, &payload.region)?))
            }

            /// Write `payload`'s bits starting at `off`.
            pub fn set_bits(&self, off: usize, payload: &Self) -> Result<Self> {
                Ok(self.wrap(algebra::set_bits(&self.region, off, &payload.region)?))
            }

            /// Replace the byte at `off` with `payload` (at most 8 bits).
            pub fn set_byte(&self, off: usize, payload: &Self) -> Result<Self> {
                Ok(self.wrap(algebra::set_byte(&self.region, off, &payload.region)?))
            }

            /// Write `payload` (a whole number of bytes) starting at byte `off`.
            pub fn set_bytes(&self, off: usize, payload: &Self) -> Result<Self> {
                Ok(self.wrap(algebra::set_bytes(&self.region, off, &payload.region)?))
            }

            /// Discard bits at positions `>= n`.
            pub fn truncate(&self, n: usize) -> Result<Self> {
                Ok(self.wrap(algebra::truncate(&self.region, n)?))
            }

            /// Append `amount` copies of `fill`'s bit.
            pub fn extend(&self, amount: usize, fill: &Self) -> Result<Self> {
                Ok(self.wrap(algebra::extend(&self.region, amount, &fill.region)?))
            }

            /// Pad with zero bits or truncate to exactly `n` bits.
            pub fn ensure_bit_length(&self, n: usize) -> Result<Self> {
                Ok(self.wrap(algebra::ensure_bit_length(&self.region, n)?))
            }

            /// `ensure_bit_length(n * 8)`.
            pub fn ensure_byte_length(&self, n: usize) -> Result<Self> {
                Ok(self.wrap(algebra::ensure_byte_length(&self.region, n)?))
            }

            /// The logical sequence `self ++ other`.
            pub fn concatenate(&self, other: &Self) -> Result<Self> {
                Ok(self.wrap(algebra::concatenate(&self.region, &other.region)?))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.region == other.region
            }
        }

        impl Eq for $name {}
    };
}

facade_type!(Mem, mem_region_from_initializer, "natural (raw-layout)");
facade_type!(Unsigned, unsigned_region_from_initializer, "numeric unsigned");
facade_type!(Signed, signed_region_from_initializer, "numeric signed");

impl Unsigned {
    fn value(&self) -> BigUint {
        codec::into_natural_big_integer(&self.region)
    }

    fn combined_width(&self, other: &Self) -> Option<usize> {
        self.target_bit_length.or(other.target_bit_length)
    }

    /// Checked addition over the integer interpretation (§4.3).
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_unsigned(&(self.value() + other.value()), n)?;
        Ok(Self { target_bit_length: n, region })
    }

    /// Checked subtraction; raises `MemError::OutOfRange` on underflow.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        let (a, b) = (self.value(), other.value());
        if a < b {
            return Err(MemError::out_of_range(
                format!("{a} - {b}"),
                self.target_bit_length.unwrap_or(0),
                "0",
                "unbounded",
            ));
        }
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_unsigned(&(a - b), n)?;
        Ok(Self { target_bit_length: n, region })
    }

    /// Checked multiplication over the integer interpretation (§4.3).
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_unsigned(&(self.value() * other.value()), n)?;
        Ok(Self { target_bit_length: n, region })
    }

    /// Checked (truncating) division; raises `MemError::Invariant` on
    /// division by zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        let divisor = other.value();
        if divisor.is_zero() {
            return Err(MemError::invariant("division by zero"));
        }
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_unsigned(&(self.value() / divisor), n)?;
        Ok(Self { target_bit_length: n, region })
    }
}

impl Signed {
    fn value(&self) -> BigInt {
        codec::into_numeric_big_integer(&self.region)
    }

    fn combined_width(&self, other: &Self) -> Option<usize> {
        self.target_bit_length.or(other.target_bit_length)
    }

    /// Checked addition over the integer interpretation (§4.3).
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_signed(&(self.value() + other.value()), n)?;
        Ok(Self { target_bit_length: n, region })
    }

    /// Checked subtraction over the integer interpretation (§4.3).
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_signed(&(self.value() - other.value()), n)?;
        Ok(Self { target_bit_length: n, region })
    }

    /// Checked multiplication over the integer interpretation (§4.3).
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_signed(&(self.value() * other.value()), n)?;
        Ok(Self { target_bit_length: n, region })
    }

    /// Checked (truncating toward zero) division; raises
    /// `MemError::Invariant` on division by zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        let divisor = other.value();
        if divisor.is_zero() {
            return Err(MemError::invariant("division by zero"));
        }
        let n = self.combined_width(other);
        let region = codec::from_numeric_big_integer_signed(&(self.value() / divisor), n)?;
        Ok(Self { target_bit_length: n, region })
    }
}

/// An erased handle over any of the three facade kinds, used only so
/// `try_eq` has something to compare without a blanket cross-type
/// `PartialEq` impl (§4.3).
#[derive(Debug, Clone)]
pub enum AnyMem {
    Mem(Mem),
    Unsigned(Unsigned),
    Signed(Signed),
}

impl AnyMem {
    fn kind_name(&self) -> &'static str {
        match self {
            AnyMem::Mem(_) => "Mem",
            AnyMem::Unsigned(_) => "Unsigned",
            AnyMem::Signed(_) => "Signed",
        }
    }

    fn region(&self) -> &Region {
        match self {
            AnyMem::Mem(v) => &v.region,
            AnyMem::Unsigned(v) => &v.region,
            AnyMem::Signed(v) => &v.region,
        }
    }
}

/// Compare two facade values that may be of different kinds. Raises
/// `MemError::UnlikeCompare` if they are; otherwise compares regions.
pub fn try_eq(a: &AnyMem, b: &AnyMem) -> Result<bool> {
    if a.kind_name() != b.kind_name() {
        return Err(MemError::unlike_compare(a.kind_name(), b.kind_name()));
    }
    Ok(a.region() == b.region())
}
