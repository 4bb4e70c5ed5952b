use strum::{Display, EnumString};

/// One axis of a memory universe: the direction bits (or groups, when used
/// as a byte order) are read in.
///
/// The canonical internal order is always `(LeftToRight, LeftToRight)`; any
/// other order only ever exists as an input/output transformation, never as
/// stored state (§3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Read from the first element to the last. The canonical direction.
    LeftToRight,
    /// Read from the last element to the first.
    RightToLeft,
}

impl Order {
    /// Whether this order requires reversal relative to the canonical
    /// `LeftToRight` direction.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Order::RightToLeft)
    }
}

/// A memory universe: the (bit_order, byte_order) pair describing how an
/// external byte sequence should be interpreted (§3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Universe {
    /// Order of slots within a group.
    pub bit_order: Order,
    /// Order of groups within the region.
    pub byte_order: Order,
}

impl Universe {
    /// The canonical `(LeftToRight, LeftToRight)` universe.
    pub const IDENTITY: Universe = Universe {
        bit_order: Order::LeftToRight,
        byte_order: Order::LeftToRight,
    };

    /// The fully-reversed universe: `(RightToLeft, RightToLeft)`.
    pub const REVERSE: Universe = Universe {
        bit_order: Order::RightToLeft,
        byte_order: Order::RightToLeft,
    };

    /// Reversed byte order only: `(LeftToRight, RightToLeft)`.
    pub const REVERSE_BYTES: Universe = Universe {
        bit_order: Order::LeftToRight,
        byte_order: Order::RightToLeft,
    };

    /// Reversed bit order only: `(RightToLeft, LeftToRight)`.
    pub const REVERSE_BITS: Universe = Universe {
        bit_order: Order::RightToLeft,
        byte_order: Order::LeftToRight,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_not_reversed() {
        assert!(!Universe::IDENTITY.bit_order.is_reversed());
        assert!(!Universe::IDENTITY.byte_order.is_reversed());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        use core::str::FromStr;
        assert_eq!(Order::from_str("LeftToRight").unwrap(), Order::LeftToRight);
        assert_eq!(Order::from_str("RightToLeft").unwrap(), Order::RightToLeft);
    }
}
