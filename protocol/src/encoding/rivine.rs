//! # Rivine Encoder
//!
//! The compact dialect. Integers are written at exactly the width asked
//! for (`add_int24` writes 3 bytes); the generic [`RivineEncoder::add`]
//! on an integer writes 8. Slices carry a variable-length prefix whose
//! low bits say how many bytes the prefix itself takes:
//!
//! | length         | prefix bytes | value            |
//! |----------------|--------------|------------------|
//! | `< 2^7`        | 1            | `n << 1`         |
//! | `< 2^14`       | 2            | `1 \| n << 2`    |
//! | `< 2^21`       | 3            | `3 \| n << 3`    |
//! | `< 2^29`       | 4            | `7 \| n << 4`    |

use super::{check_unsigned, EncodingError, RIVINE_SLICE_LENGTH_LIMIT};

/// A value that knows how to write itself with a [`RivineEncoder`].
pub trait RivineEncodable {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError>;
}

/// Accumulates the Rivine encoding of a sequence of values.
#[derive(Debug, Clone, Default)]
pub struct RivineEncoder {
    data: Vec<u8>,
}

impl RivineEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Generic write, dispatched on the value's [`RivineEncodable`] impl.
    pub fn add<T: RivineEncodable + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.rivine_binary_encode(self)
    }

    pub fn add_bool(&mut self, value: bool) {
        self.data.push(u8::from(value));
    }

    /// Append a single raw byte.
    pub fn add_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn add_int8<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 1)
    }

    pub fn add_int16<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 2)
    }

    pub fn add_int24<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 3)
    }

    pub fn add_int32<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 4)
    }

    pub fn add_int64<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 8)
    }

    /// Write the compact slice-length prefix for `length`.
    pub fn add_slice_length(&mut self, length: usize) -> Result<(), EncodingError> {
        if length < 1 << 7 {
            self.data.push((length << 1) as u8);
        } else if length < 1 << 14 {
            self.put_le((1 | length << 2) as u64, 2);
        } else if length < 1 << 21 {
            self.put_le((3 | length << 3) as u64, 3);
        } else if length < RIVINE_SLICE_LENGTH_LIMIT {
            self.put_le((7 | length << 4) as u64, 4);
        } else {
            return Err(EncodingError::SliceLengthOutOfRange(length));
        }
        Ok(())
    }

    /// Length-prefixed byte string.
    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodingError> {
        self.add_slice_length(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Bytes appended verbatim, no prefix.
    pub fn add_raw_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Length-prefixed sequence of encodable values.
    pub fn add_slice<T: RivineEncodable>(&mut self, values: &[T]) -> Result<(), EncodingError> {
        self.add_slice_length(values.len())?;
        self.add_array(values)
    }

    /// Sequence of encodable values without a length prefix.
    pub fn add_array<T: RivineEncodable>(&mut self, values: &[T]) -> Result<(), EncodingError> {
        for value in values {
            value.rivine_binary_encode(self)?;
        }
        Ok(())
    }

    fn add_checked(&mut self, value: i128, width: usize) -> Result<(), EncodingError> {
        let value = check_unsigned(value, width as u32 * 8)?;
        self.put_le(value, width);
        Ok(())
    }

    fn put_le(&mut self, value: u64, width: usize) {
        self.data.extend_from_slice(&value.to_le_bytes()[..width]);
    }
}

// ---------------------------------------------------------------------------
// Built-in Impls
// ---------------------------------------------------------------------------

impl RivineEncodable for bool {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_bool(*self);
        Ok(())
    }
}

macro_rules! impl_rivine_int {
    ($($ty:ty),*) => {
        $(
            impl RivineEncodable for $ty {
                fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
                    encoder.add_int64(*self as i128)
                }
            }
        )*
    };
}

impl_rivine_int!(u16, u32, u64, usize, i32, i64, i128);

impl RivineEncodable for str {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(self.as_bytes())
    }
}

impl RivineEncodable for String {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        self.as_str().rivine_binary_encode(encoder)
    }
}

impl<T: RivineEncodable> RivineEncodable for [T] {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_slice(self)
    }
}

impl<T: RivineEncodable> RivineEncodable for Vec<T> {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_slice(self)
    }
}

impl<T: RivineEncodable + ?Sized> RivineEncodable for &T {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        (**self).rivine_binary_encode(encoder)
    }
}

impl<T: RivineEncodable + ?Sized> RivineEncodable for Box<T> {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        (**self).rivine_binary_encode(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(length: usize) -> String {
        let mut e = RivineEncoder::new();
        e.add_slice_length(length).unwrap();
        hex::encode(e.data())
    }

    #[test]
    fn test_slice_length_prefix_boundaries() {
        assert_eq!(prefix(0), "00");
        assert_eq!(prefix(127), "fe");
        assert_eq!(prefix(128), "0102");
        assert_eq!(prefix((1 << 14) - 1), "fdff");
        assert_eq!(prefix(1 << 14), "030002");
        assert_eq!(prefix(1 << 21), "07000002");
    }

    #[test]
    fn test_slice_length_out_of_range() {
        let mut e = RivineEncoder::new();
        assert_eq!(
            e.add_slice_length(1 << 29),
            Err(EncodingError::SliceLengthOutOfRange(1 << 29))
        );
    }

    #[test]
    fn test_exact_width_integers() {
        let mut e = RivineEncoder::new();
        e.add_int24(0x0a0b0cu32).unwrap();
        assert_eq!(e.data(), &[0x0c, 0x0b, 0x0a]);
    }

    #[test]
    fn test_generic_integer_is_eight_bytes() {
        let mut e = RivineEncoder::new();
        e.add(&7u16).unwrap();
        assert_eq!(e.data().len(), 8);
    }
}
