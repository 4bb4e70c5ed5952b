//! Universe-aware bit and byte manipulation.
//!
//! This crate models memory as a canonical [`Region`](region::Region): a
//! sequence of 8-slot groups where each slot holds a concrete bit or ⊥
//! ("unused") padding. Three layers sit on top of that model:
//!
//! - [`algebra`] — the natural operations on a region: transforms between
//!   bit/byte orders, length queries, bit/byte addressed get/set, and
//!   resizing/concatenation.
//! - [`codec`] — conversions between a region and concrete value kinds
//!   (fixed-width integers, floats, arbitrary-precision integers, byte
//!   sequences, bit lists, strings), each in both a *natural* (raw layout)
//!   and *numeric* (value-preserving) flavor.
//! - [`facade`] — the ergonomic surface ([`Mem`](facade::Mem),
//!   [`Unsigned`](facade::Unsigned), [`Signed`](facade::Signed)) most
//!   callers want, wrapping a region with a target bit length and
//!   dispatching construction across input kinds.
//!
//! [`order`] carries the (bit order, byte order) pair describing how an
//! external byte sequence maps onto the canonical, always-left-to-right
//! internal form.

mod error;
mod order;
mod region;

pub mod algebra;
pub mod codec;
pub mod facade;
pub mod scalar;

pub use error::{MemError, Result};
pub use facade::{AnyMem, BitList, GroupedBits, Initializer, Mem, Null, Signed, Unsigned};
pub use order::{Order, Universe};
pub use region::{Region, Slot, Validation};
