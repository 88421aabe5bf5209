//! Error types for the binary encoders.

use thiserror::Error;

/// Errors raised while writing a value with either encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// An integer is negative or does not fit in the requested width.
    #[error("integer {value} out of range for {bits}-bit unsigned encoding")]
    IntegerOutOfRange {
        /// The rejected value.
        value: i128,
        /// Width the value had to fit in.
        bits: u32,
    },

    /// A slice holds too many elements for the compact length prefix.
    #[error("slice length {0} is out of range (must be less than 2^29)")]
    SliceLengthOutOfRange(usize),

    /// A network address is too long for its one-byte header.
    #[error("network address of {0} bytes is too long (at most 63)")]
    AddressTooLong(usize),
}
