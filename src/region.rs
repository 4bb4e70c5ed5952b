//! The canonical backing store (§3.1) and the handful of primitives every
//! other module is built on: construction from raw slot data, the
//! `validate` predicate, and `bit_length`/`byte_length`.

use crate::error::{MemError, Result};
use crate::order::Order;

/// One position within a group: a concrete bit, or "unused" padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A zero bit.
    Zero,
    /// A one bit.
    One,
    /// Padding. Only valid in the trailing positions of the last group of a
    /// well-formed region (§3.1 invariant 3) -- see `Region::validate`.
    Bottom,
}

impl Slot {
    /// `Some(true)`/`Some(false)` for a concrete bit, `None` for `Bottom`.
    pub const fn as_bit(self) -> Option<bool> {
        match self {
            Slot::Zero => Some(false),
            Slot::One => Some(true),
            Slot::Bottom => None,
        }
    }

    /// The slot holding the given bit value.
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Slot::One
        } else {
            Slot::Zero
        }
    }
}

/// One group of exactly 8 slots.
pub type Group = [Slot; 8];

const EMPTY_GROUP: Group = [Slot::Bottom; 8];

/// The canonical memory region: a sequence of 8-slot groups (§3.1).
///
/// `Region` is deliberately a direct, literal rendering of the spec's data
/// model rather than a packed bit buffer. A packed buffer that derives
/// "which slots are real" purely from a `bit_length` counter cannot
/// represent the region `reverse_bits` produces from a partial-byte input,
/// where ⊥ slots can end up ahead of real ones within the last group
/// (§3.1 invariant 3, §9 design notes). Representing slots explicitly keeps
/// every operation total and keeps `validate` an actual, checkable
/// predicate rather than an invariant assumed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    groups: Vec<Group>,
}

/// The outcome of `Region::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// Every ⊥ slot forms one contiguous run at the very end of the region.
    pub bottom_is_trailing: bool,
}

impl Region {
    /// The canonical null region: zero groups.
    pub fn null() -> Self {
        Region { groups: Vec::new() }
    }

    /// Build a region directly from groups. No reinterpretation is done;
    /// callers that already have canonical (group, slot) data use this.
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Region { groups }
    }

    /// Build a region from a flat sequence of bits, left-to-right, packing
    /// into 8-slot groups and padding the last group with ⊥.
    pub fn from_bits(bits: &[bool]) -> Self {
        if bits.is_empty() {
            return Region::null();
        }
        let mut groups = Vec::with_capacity(bits.len().div_ceil(8));
        for chunk in bits.chunks(8) {
            let mut group = EMPTY_GROUP;
            for (slot, bit) in group.iter_mut().zip(chunk.iter()) {
                *slot = Slot::from_bit(*bit);
            }
            groups.push(group);
        }
        Region { groups }
    }

    /// Direct access to the backing groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of non-⊥ slots (§3.1).
    pub fn bit_length(&self) -> usize {
        self.groups
            .iter()
            .flatten()
            .filter(|s| !matches!(s, Slot::Bottom))
            .count()
    }

    /// Number of groups (`= ceil(bit_length / 8)` when `bit_length > 0`,
    /// else `0` -- which for a well-formed region is exactly `self.groups.len()`).
    pub fn byte_length(&self) -> usize {
        self.groups.len()
    }

    /// Logical bits in canonical left-to-right order, skipping ⊥. This is
    /// the "flatten, drop padding" view used by codecs reading a region back
    /// out (`into_natural_big_integer` and friends).
    pub fn logical_bits(&self) -> Vec<bool> {
        self.groups
            .iter()
            .flatten()
            .filter_map(|s| s.as_bit())
            .collect()
    }

    /// Check §3.1's invariants. Invariants 1, 2 and 4 are enforced by the
    /// type itself (`Group = [Slot; 8]`, the null region has zero groups);
    /// invariant 3 (⊥ trailing-only) is the one thing a `Region` built by
    /// `transform`/`reverse_bits` on a partial-byte input can violate, so it
    /// is reported rather than asserted.
    pub fn validate(&self) -> Validation {
        let mut seen_bottom = false;
        let mut trailing = true;
        for slot in self.groups.iter().flatten() {
            match slot {
                Slot::Bottom => seen_bottom = true,
                Slot::Zero | Slot::One => {
                    if seen_bottom {
                        trailing = false;
                    }
                }
            }
        }
        Validation {
            bottom_is_trailing: trailing,
        }
    }

    /// Same as `validate`, but returns `MemError::Invariant` when the
    /// trailing-⊥ invariant does not hold. Used by algebra operations that
    /// must not accept a scrambled region as an operand.
    pub(crate) fn require_contiguous_bottom(&self) -> Result<()> {
        if self.validate().bottom_is_trailing {
            Ok(())
        } else {
            Err(MemError::invariant(
                "region has non-trailing bottom slots; only identity-shaped regions are valid here",
            ))
        }
    }

    /// Reverse the 8 slots within every group, ⊥ included (§4.1 `transform`).
    pub(crate) fn reversed_within_groups(&self) -> Self {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                let mut reversed = *group;
                reversed.reverse();
                reversed
            })
            .collect();
        Region { groups }
    }

    /// Reverse the order of groups themselves (§4.1 `transform`).
    pub(crate) fn reversed_groups(&self) -> Self {
        let mut groups = self.groups.clone();
        groups.reverse();
        Region { groups }
    }

    pub(crate) fn transform_raw(&self, bit_order: Order, byte_order: Order) -> Self {
        let mut region = self.clone();
        if byte_order.is_reversed() {
            region = region.reversed_groups();
        }
        if bit_order.is_reversed() {
            region = region.reversed_within_groups();
        }
        region
    }
}

#[cfg(test)]
pub(crate) fn bit_string(region: &Region) -> String {
    region
        .groups()
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|slot| match slot {
                    Slot::Zero => '0',
                    Slot::One => '1',
                    Slot::Bottom => '_',
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
