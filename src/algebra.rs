//! The natural algebra over `Region` (§4.1): transforms, length metadata,
//! get/set bit and byte ranges, truncate/extend/ensure_length/concatenate.
//!
//! Every function here is pure and total over its documented contract: it
//! takes `&Region` operands and returns a freshly built `Region`, never
//! mutating its arguments. Contract violations are reported eagerly as
//! `MemError::Invariant`.

use tracing::trace;

use crate::error::{MemError, Result};
use crate::order::Order;
use crate::region::{Region, Slot};

/// Map `mem` from the universe `(bit_order, byte_order)` into canonical
/// `(LeftToRight, LeftToRight)` form -- or, applied symmetrically, out of
/// canonical form into that universe (§3.2, §4.1).
pub fn transform(mem: &Region, bit_order: Order, byte_order: Order) -> Result<Region> {
    trace!(bit_length = mem.bit_length(), ?bit_order, ?byte_order, "transform");
    Ok(mem.transform_raw(bit_order, byte_order))
}

/// `transform(mem, LeftToRight, LeftToRight)`.
pub fn identity(mem: &Region) -> Result<Region> {
    transform(mem, Order::LeftToRight, Order::LeftToRight)
}

/// `transform(mem, RightToLeft, RightToLeft)`.
pub fn reverse(mem: &Region) -> Result<Region> {
    transform(mem, Order::RightToLeft, Order::RightToLeft)
}

/// `transform(mem, LeftToRight, RightToLeft)`: reverse group order only.
pub fn reverse_bytes(mem: &Region) -> Result<Region> {
    transform(mem, Order::LeftToRight, Order::RightToLeft)
}

/// `transform(mem, RightToLeft, LeftToRight)`: reverse within-group slot
/// order only. See §3.1 invariant 3 for the partial-byte caveat.
pub fn reverse_bits(mem: &Region) -> Result<Region> {
    transform(mem, Order::RightToLeft, Order::LeftToRight)
}

/// Count of non-⊥ slots (§3.1).
pub fn bit_length(mem: &Region) -> usize {
    mem.bit_length()
}

/// Number of groups (§3.1).
pub fn byte_length(mem: &Region) -> usize {
    mem.byte_length()
}

/// Flatten `mem`'s groups into one contiguous run of physical slots. Unlike
/// `Region::logical_bits`, this keeps ⊥ slots in place -- it is the view
/// every positional accessor below needs, since `get_bit`/`set_bit` address
/// *position*, not "the i-th real bit" (§4.1).
fn physical_slots(mem: &Region) -> Vec<Slot> {
    mem.groups().iter().flatten().copied().collect()
}

/// Pack a slot sequence of length `len % 8 == 0` back into groups.
fn regroup_exact(slots: &[Slot]) -> Region {
    debug_assert_eq!(slots.len() % 8, 0);
    let groups = slots
        .chunks(8)
        .map(|chunk| {
            let mut group = [Slot::Bottom; 8];
            group.copy_from_slice(chunk);
            group
        })
        .collect();
    Region::from_groups(groups)
}

/// Pack a slot sequence of any length into groups, padding the final group
/// with ⊥ as needed.
fn pack_padded(slots: &[Slot]) -> Region {
    if slots.is_empty() {
        return Region::null();
    }
    let groups = slots
        .chunks(8)
        .map(|chunk| {
            let mut group = [Slot::Bottom; 8];
            group[..chunk.len()].copy_from_slice(chunk);
            group
        })
        .collect();
    Region::from_groups(groups)
}

fn require(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(MemError::invariant(message))
    }
}

/// A single-slot region holding `bit`, per the shape `get_bit` returns.
pub fn bit_region(bit: bool) -> Region {
    pack_padded(&[Slot::from_bit(bit)])
}

/// `get_bit(mem, i)`: the 1-bit region at physical position `i`. Contract:
/// `0 <= i < bit_length(mem)`.
pub fn get_bit(mem: &Region, i: usize) -> Result<Region> {
    get_bits(mem, i, i + 1)
}

/// `get_byte(mem, i)`: bits `[i*8, min((i+1)*8, bit_length))`. Contract:
/// `0 <= i < byte_length(mem)`.
pub fn get_byte(mem: &Region, i: usize) -> Result<Region> {
    require(i < mem.byte_length(), format!("byte index {i} out of bounds"))?;
    let start = i * 8;
    let stop = ((i + 1) * 8).min(mem.bit_length());
    get_bits(mem, start, stop)
}

/// `get_bits(mem, start, stop)`: half-open physical slot range. Contract:
/// `0 <= start <= stop <= bit_length(mem)`.
pub fn get_bits(mem: &Region, start: usize, stop: usize) -> Result<Region> {
    require(start <= stop, format!("start {start} is after stop {stop}"))?;
    require(
        stop <= mem.bit_length(),
        format!("stop {stop} exceeds bit length {}", mem.bit_length()),
    )?;
    trace!(start, stop, "get_bits");
    let slots = physical_slots(mem);
    Ok(pack_padded(&slots[start..stop]))
}

/// `get_bytes(mem, start, stop)`: `get_bits(mem, start*8, stop*8)`.
/// Contract: `0 <= start <= stop <= byte_length(mem)`.
pub fn get_bytes(mem: &Region, start: usize, stop: usize) -> Result<Region> {
    require(start <= stop, format!("start {start} is after stop {stop}"))?;
    require(
        stop <= mem.byte_length(),
        format!("stop {stop} exceeds byte length {}", mem.byte_length()),
    )?;
    get_bits(mem, start * 8, (stop * 8).min(mem.bit_length()))
}

/// `set_bit(mem, off, payload)`: replace the bit at `off`. Contract:
/// `payload.bit_length() == 1`, `0 <= off < bit_length(mem)`.
pub fn set_bit(mem: &Region, off: usize, payload: &Region) -> Result<Region> {
    require(payload.bit_length() == 1, "set_bit payload must be exactly 1 bit")?;
    set_bits(mem, off, payload)
}

/// `set_bits(mem, off, payload)`: write `payload`'s logical bits into
/// `[off, off + payload.bit_length())`, preserving the rest of `mem`.
/// Contract: `off + payload.bit_length() <= mem.bit_length()`.
pub fn set_bits(mem: &Region, off: usize, payload: &Region) -> Result<Region> {
    let len = payload.bit_length();
    require(
        off + len <= mem.bit_length(),
        format!("write of {len} bits at offset {off} overruns bit length {}", mem.bit_length()),
    )?;
    trace!(off, len, "set_bits");
    let mut slots = physical_slots(mem);
    let payload_bits = payload.logical_bits();
    for (slot, bit) in slots[off..off + len].iter_mut().zip(payload_bits) {
        *slot = Slot::from_bit(bit);
    }
    Ok(regroup_exact(&slots))
}

/// `set_byte(mem, off, payload)`: `set_bits(mem, off*8, payload)`.
/// Contract: `payload.bit_length() <= 8`.
pub fn set_byte(mem: &Region, off: usize, payload: &Region) -> Result<Region> {
    require(payload.bit_length() <= 8, "set_byte payload must be at most 8 bits")?;
    set_bits(mem, off * 8, payload)
}

/// `set_bytes(mem, off, payload)`: `set_bits(mem, off*8, payload)`.
/// Contract: `payload.bit_length()` is a multiple of 8.
pub fn set_bytes(mem: &Region, off: usize, payload: &Region) -> Result<Region> {
    require(
        payload.bit_length() % 8 == 0,
        "set_bytes payload must be a whole number of bytes",
    )?;
    set_bits(mem, off * 8, payload)
}

/// `truncate(mem, n)`: discard bits at positions `>= n`. Contract:
/// `n <= bit_length(mem)`.
pub fn truncate(mem: &Region, n: usize) -> Result<Region> {
    require(n <= mem.bit_length(), format!("cannot truncate to {n} bits from {}", mem.bit_length()))?;
    let slots = physical_slots(mem);
    Ok(pack_padded(&slots[..n]))
}

/// `extend(mem, amount, fill)`: append `amount` copies of `fill`'s bit on
/// the right. Contract: `fill.bit_length() == 1`.
pub fn extend(mem: &Region, amount: usize, fill: &Region) -> Result<Region> {
    require(fill.bit_length() == 1, "extend fill must be exactly 1 bit")?;
    let fill_bit = fill.logical_bits()[0];
    let mut bits = mem.logical_bits();
    bits.extend(std::iter::repeat(fill_bit).take(amount));
    Ok(Region::from_bits(&bits))
}

/// `ensure_bit_length(mem, n)`: pad with zero bits or truncate so that
/// `bit_length(result) == n`.
pub fn ensure_bit_length(mem: &Region, n: usize) -> Result<Region> {
    let current = mem.bit_length();
    use core::cmp::Ordering;
    match current.cmp(&n) {
        Ordering::Less => extend(mem, n - current, &bit_region(false)),
        Ordering::Greater => truncate(mem, n),
        Ordering::Equal => Ok(mem.clone()),
    }
}

/// `ensure_byte_length(mem, n)`: `ensure_bit_length(mem, n * 8)`.
pub fn ensure_byte_length(mem: &Region, n: usize) -> Result<Region> {
    ensure_bit_length(mem, n * 8)
}

/// `concatenate(left, right)`: the logical sequence `left ++ right`,
/// repacked into canonical groups.
pub fn concatenate(left: &Region, right: &Region) -> Result<Region> {
    trace!(left = left.bit_length(), right = right.bit_length(), "concatenate");
    let mut bits = left.logical_bits();
    bits.extend(right.logical_bits());
    Ok(Region::from_bits(&bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::bit_string;

    fn region_from_str(bits: &str) -> Region {
        Region::from_bits(&bits.chars().map(|c| c == '1').collect::<Vec<_>>())
    }

    #[test]
    fn get_bit_reads_physical_position() {
        let r = region_from_str("101");
        assert_eq!(bit_string(&get_bit(&r, 0).unwrap()), "1_______");
        assert_eq!(bit_string(&get_bit(&r, 1).unwrap()), "0_______");
        assert!(get_bit(&r, 3).is_err());
    }

    #[test]
    fn get_byte_truncates_partial_last_byte() {
        let r = region_from_str("000000001010");
        assert_eq!(get_byte(&r, 0).unwrap().bit_length(), 8);
        let last = get_byte(&r, 1).unwrap();
        assert_eq!(last.bit_length(), 4);
        assert!(get_byte(&r, 2).is_err());
    }

    #[test]
    fn set_bits_preserves_surrounding_bits() {
        let r = region_from_str("00000000");
        let payload = region_from_str("111");
        let updated = set_bits(&r, 2, &payload).unwrap();
        assert_eq!(bit_string(&updated), "00111000");
    }

    #[test]
    fn truncate_then_concatenate_round_trips() {
        let r = region_from_str("1100101101");
        for k in 0..=r.bit_length() {
            let head = truncate(&r, k).unwrap();
            let tail = get_bits(&r, k, r.bit_length()).unwrap();
            let whole = concatenate(&head, &tail).unwrap();
            assert_eq!(whole, r, "k={k}");
        }
    }

    #[test]
    fn ensure_bit_length_pads_and_truncates() {
        let r = region_from_str("101");
        let padded = ensure_bit_length(&r, 8).unwrap();
        assert_eq!(padded.bit_length(), 8);
        assert_eq!(bit_string(&padded), "10100000");

        let shrunk = ensure_bit_length(&padded, 2).unwrap();
        assert_eq!(bit_string(&shrunk), "10______");

        let same = ensure_bit_length(&r, 3).unwrap();
        assert_eq!(same, r);
    }

    #[test]
    fn reverse_is_self_inverse_on_full_bytes() {
        let r = region_from_str("1100101101000011");
        assert_eq!(reverse(&reverse(&r).unwrap()).unwrap(), r);
    }

    #[test]
    fn reverse_bits_on_partial_byte_is_not_contiguous() {
        // 13-bit region: last group only has 5 real slots. Reversing slot
        // order within that group moves the 3 bottom slots to the front of
        // the group instead of leaving them trailing (§3.1 invariant 3,
        // §9 open questions).
        let r = region_from_str("1100101101000");
        assert_eq!(r.bit_length(), 13);
        let flipped = reverse_bits(&r).unwrap();
        assert_eq!(flipped.bit_length(), 13);
        assert!(!flipped.validate().bottom_is_trailing);
        // applying it twice restores the original group structure exactly
        assert_eq!(reverse_bits(&flipped).unwrap(), r);
    }

    #[test]
    fn reverse_bytes_is_always_self_inverse() {
        let r = region_from_str("110010110100001");
        assert_eq!(reverse_bytes(&reverse_bytes(&r).unwrap()).unwrap(), r);
    }
}
