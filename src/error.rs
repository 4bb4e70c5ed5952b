use thiserror::Error;
use tracing::debug;

/// Crate-wide result alias.
pub type Result<T, E = MemError> = core::result::Result<T, E>;

/// The single error type surfaced by every fallible operation in this crate.
///
/// All checks are eager: an operation either returns a fully valid `Region`
/// (or facade value) or fails outright. There is no partial result and no
/// silent clamping beyond the documented zero-padding of `ensure_bit_length`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemError {
    /// A contract was violated: malformed input shape, an index out of
    /// bounds, a length mismatch, or a payload too large for its target.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A numeric value does not fit the requested bit length.
    #[error("value {value} does not fit in {bits} bits (range [{low}, {high}])")]
    OutOfRange {
        /// The value that was rejected, formatted for display.
        value: String,
        /// The bit width it was being fit into.
        bits: usize,
        /// Inclusive lower bound of the valid range.
        low: String,
        /// Inclusive upper bound of the valid range.
        high: String,
    },

    /// A float was requested to be stored in fewer bits than its native
    /// width. Padding above the native width is fine; truncation below it
    /// is not, since it would silently discard mantissa or exponent bits.
    #[error("cannot truncate a {native_bits}-bit float to {requested_bits} bits")]
    LossyFloatTruncation {
        /// Native width of the float type (32 or 64).
        native_bits: usize,
        /// The width that was requested.
        requested_bits: usize,
    },

    /// A slice or index shape the core does not support, e.g. a `start`
    /// past `stop` in a bit or byte range.
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// The facade could not dispatch an input value to any known codec.
    #[error("no initializer for this input: {0}")]
    InvalidInitializer(String),

    /// Equality was requested between facade values of incompatible kinds.
    #[error("cannot compare {left} with {right}")]
    UnlikeCompare {
        /// Name of the left-hand facade kind.
        left: &'static str,
        /// Name of the right-hand facade kind.
        right: &'static str,
    },
}

impl MemError {
    /// Log `self` at `debug` level and return it. Every constructor below
    /// routes through this so no `MemError` return path goes unlogged
    /// (§4.5 ambient logging policy).
    fn logged(self) -> Self {
        debug!(error = %self, "memerror");
        self
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into()).logged()
    }

    pub(crate) fn invalid_index(message: impl Into<String>) -> Self {
        Self::InvalidIndex(message.into()).logged()
    }

    pub(crate) fn invalid_initializer(message: impl Into<String>) -> Self {
        Self::InvalidInitializer(message.into()).logged()
    }

    pub(crate) fn out_of_range(value: impl ToString, bits: usize, low: impl ToString, high: impl ToString) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            bits,
            low: low.to_string(),
            high: high.to_string(),
        }
        .logged()
    }

    pub(crate) fn lossy_float_truncation(native_bits: usize, requested_bits: usize) -> Self {
        Self::LossyFloatTruncation { native_bits, requested_bits }.logged()
    }

    pub(crate) fn unlike_compare(left: &'static str, right: &'static str) -> Self {
        Self::UnlikeCompare { left, right }.logged()
    }
}
