//! # Binary Encoders
//!
//! TFChain speaks two binary dialects, and every ledger value must be able
//! to write itself in both:
//!
//! - **Sia** ([`SiaEncoder`]) is the fixed-width one. Every integer takes
//!   8 bytes and every slice carries a u64 length prefix.
//! - **Rivine** ([`RivineEncoder`]) is the compact one. Integers are
//!   written at the width the caller asks for and slices carry a 1 to 4
//!   byte variable-length prefix.
//!
//! Both encoders expose the same vocabulary (`add`, `add_intN`, `add_byte`,
//! `add_slice`, `add_array`, ...). The generic `add` dispatches through
//! [`SiaEncodable`] / [`RivineEncodable`], so a domain type plugs in by
//! implementing the trait for the dialect(s) it supports. Types that have
//! no encoding (maps, floats) simply don't implement the traits, which
//! turns a runtime type error into a compile error.
//!
//! ```
//! use tfchain_protocol::encoding::{rivine_encode, sia_encode};
//!
//! assert_eq!(sia_encode("a").unwrap(), b"\x01\0\0\0\0\0\0\0a");
//! assert_eq!(rivine_encode("a").unwrap(), b"\x02a");
//! ```

pub mod error;
pub mod rivine;
pub mod sia;

pub use error::EncodingError;
pub use rivine::{RivineEncodable, RivineEncoder};
pub use sia::{SiaEncodable, SiaEncoder};

/// Largest slice the compact length prefix can describe (exclusive).
pub const RIVINE_SLICE_LENGTH_LIMIT: usize = 1 << 29;

/// Encode a single value with a fresh Sia encoder.
pub fn sia_encode<T: SiaEncodable + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    let mut encoder = SiaEncoder::new();
    encoder.add(value)?;
    Ok(encoder.into_bytes())
}

/// Encode a single value with a fresh Rivine encoder.
pub fn rivine_encode<T: RivineEncodable + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    let mut encoder = RivineEncoder::new();
    encoder.add(value)?;
    Ok(encoder.into_bytes())
}

/// Check that `value` is a non-negative integer that fits in `bits` bits.
pub(crate) fn check_unsigned(value: i128, bits: u32) -> Result<u64, EncodingError> {
    let limit = 1i128 << bits;
    if value < 0 || value >= limit {
        return Err(EncodingError::IntegerOutOfRange { value, bits });
    }
    // bits <= 64, so the value always fits.
    Ok(value as u64)
}
