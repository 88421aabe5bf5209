//! # Sia Encoder
//!
//! The fixed-width dialect. Integers are always written as 8 little-endian
//! bytes, no matter which `add_intN` method wrote them (the method still
//! range-checks against N bits). Slices and byte strings carry a u64
//! length prefix.

use super::{check_unsigned, EncodingError};

/// A value that knows how to write itself with a [`SiaEncoder`].
pub trait SiaEncodable {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError>;
}

/// Accumulates the Sia encoding of a sequence of values.
#[derive(Debug, Clone, Default)]
pub struct SiaEncoder {
    data: Vec<u8>,
}

impl SiaEncoder {
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

    /// Generic write, dispatched on the value's [`SiaEncodable`] impl.
    pub fn add<T: SiaEncodable + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.sia_binary_encode(self)
    }

    pub fn add_bool(&mut self, value: bool) {
        self.data.push(u8::from(value));
    }

    /// Append a single raw byte.
    pub fn add_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn add_int8<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 8)
    }

    pub fn add_int16<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 16)
    }

    pub fn add_int24<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 24)
    }

    pub fn add_int32<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 32)
    }

    pub fn add_int64<V: Into<i128>>(&mut self, value: V) -> Result<(), EncodingError> {
        self.add_checked(value.into(), 64)
    }

    /// Write an 8-byte length. Lengths always fit, so this cannot fail.
    pub fn add_length(&mut self, length: usize) {
        self.data.extend_from_slice(&(length as u64).to_le_bytes());
    }

    /// Length-prefixed byte string.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.add_length(bytes.len());
        self.data.extend_from_slice(bytes);
    }

    /// Bytes appended verbatim, no prefix.
    pub fn add_raw_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Length-prefixed sequence of encodable values.
    pub fn add_slice<T: SiaEncodable>(&mut self, values: &[T]) -> Result<(), EncodingError> {
        self.add_length(values.len());
        self.add_array(values)
    }

    /// Sequence of encodable values without a length prefix. Only useful
    /// when both sides agree on the element count up front.
    pub fn add_array<T: SiaEncodable>(&mut self, values: &[T]) -> Result<(), EncodingError> {
        for value in values {
            value.sia_binary_encode(self)?;
        }
        Ok(())
    }

    fn add_checked(&mut self, value: i128, bits: u32) -> Result<(), EncodingError> {
        let value = check_unsigned(value, bits)?;
        self.data.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Built-in Impls
// ---------------------------------------------------------------------------

impl SiaEncodable for bool {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_bool(*self);
        Ok(())
    }
}

macro_rules! impl_sia_int {
    ($($ty:ty),*) => {
        $(
            impl SiaEncodable for $ty {
                fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
                    encoder.add_int64(*self as i128)
                }
            }
        )*
    };
}

impl_sia_int!(u16, u32, u64, usize, i32, i64, i128);

impl SiaEncodable for str {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(self.as_bytes());
        Ok(())
    }
}

impl SiaEncodable for String {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        self.as_str().sia_binary_encode(encoder)
    }
}

impl<T: SiaEncodable> SiaEncodable for [T] {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_slice(self)
    }
}

impl<T: SiaEncodable> SiaEncodable for Vec<T> {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_slice(self)
    }
}

impl<T: SiaEncodable + ?Sized> SiaEncodable for &T {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        (**self).sia_binary_encode(encoder)
    }
}

impl<T: SiaEncodable + ?Sized> SiaEncodable for Box<T> {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        (**self).sia_binary_encode(encoder)
    }
}
