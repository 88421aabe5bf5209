//! # Primitive Value Types
//!
//! The leaves of every TFChain structure:
//!
//! - [`BinaryData`]: a byte string with an optional fixed size and a
//!   preferred string encoding (hex, `0x` hex, base64 or utf8).
//! - [`Hash`]: a 32-byte digest, printed as lowercase hex.
//! - [`Currency`]: an amount of TFT, stored in the smallest unit
//!   (1 TFT = 10^9 units) as an unbounded-enough `U256`.
//! - [`Blockstake`]: a plain count of block stakes.
//!
//! Amounts never go through floating point. Parsing "0.123456789 TFT"
//! splits the string on the decimal point and scales the integer parts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use primitive_types::U256;
use serde_json::Value;

use super::error::TypeError;
use super::json::{as_str, impl_string_serde};
use crate::config::{CURRENCY_PRECISION, CURRENCY_UNIT, CURRENCY_UNITS_PER_COIN, HASH_SIZE};
use crate::encoding::{
    EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder,
};

// ---------------------------------------------------------------------------
// BinaryData
// ---------------------------------------------------------------------------

/// How a [`BinaryData`] value is rendered as a string (and parsed back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrEncoding {
    #[default]
    Hex,
    /// Hex with a leading `0x`. Parsing accepts it with or without.
    HexPrefix,
    Base64,
    Utf8,
}

impl StrEncoding {
    fn decode(self, s: &str) -> Result<Vec<u8>, TypeError> {
        Ok(match self {
            StrEncoding::Hex => hex::decode(s)?,
            StrEncoding::HexPrefix => hex::decode(s.strip_prefix("0x").unwrap_or(s))?,
            StrEncoding::Base64 => BASE64.decode(s)?,
            StrEncoding::Utf8 => s.as_bytes().to_vec(),
        })
    }

    fn encode(self, bytes: &[u8]) -> String {
        match self {
            StrEncoding::Hex => hex::encode(bytes),
            StrEncoding::HexPrefix => format!("0x{}", hex::encode(bytes)),
            StrEncoding::Base64 => BASE64.encode(bytes),
            StrEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// A byte string with an optional fixed size.
///
/// Fixed-size data is written raw by both encoders (both sides know the
/// length). Variable-size data is written as a length-prefixed slice.
#[derive(Debug, Clone, Default)]
pub struct BinaryData {
    value: Vec<u8>,
    /// Required length; `0` means unbounded.
    fixed_size: usize,
    encoding: StrEncoding,
}

impl BinaryData {
    /// Wrap `value`, checking it against `fixed_size` (0 = no constraint).
    pub fn new(value: Vec<u8>, fixed_size: usize, encoding: StrEncoding) -> Result<Self, TypeError> {
        if fixed_size != 0 && value.len() != fixed_size {
            return Err(TypeError::FixedSizeMismatch {
                expected: fixed_size,
                found: value.len(),
            });
        }
        Ok(Self {
            value,
            fixed_size,
            encoding,
        })
    }

    /// Parse a string in the given encoding. An empty string gives an
    /// all-zero value of `fixed_size` bytes (or an empty one if unbounded).
    pub fn from_str_encoded(s: &str, fixed_size: usize, encoding: StrEncoding) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Self::new(vec![0u8; fixed_size], fixed_size, encoding);
        }
        Self::new(encoding.decode(s)?, fixed_size, encoding)
    }

    pub fn from_json(value: &Value, fixed_size: usize, encoding: StrEncoding) -> Result<Self, TypeError> {
        Self::from_str_encoded(as_str(value, "binary data")?, fixed_size, encoding)
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn fixed_size(&self) -> Option<usize> {
        (self.fixed_size != 0).then_some(self.fixed_size)
    }

    pub fn encoding(&self) -> StrEncoding {
        self.encoding
    }
}

impl PartialEq for BinaryData {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BinaryData {}

impl fmt::Display for BinaryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoding.encode(&self.value))
    }
}

impl SiaEncodable for BinaryData {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        if self.fixed_size != 0 {
            encoder.add_raw_bytes(&self.value);
        } else {
            encoder.add_bytes(&self.value);
        }
        Ok(())
    }
}

impl RivineEncodable for BinaryData {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        if self.fixed_size != 0 {
            encoder.add_raw_bytes(&self.value);
            Ok(())
        } else {
            encoder.add_bytes(&self.value)
        }
    }
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// A 32-byte digest: transaction ids, output ids, parent ids, hashed secrets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// The all-zero hash.
    pub fn is_nil(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        as_str(value, field)?.parse()
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = TypeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| TypeError::FixedSizeMismatch {
            expected: HASH_SIZE,
            found: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = TypeError;

    /// Parses 64 hex characters. The empty string is the nil hash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::try_from(hex::decode(s)?.as_slice())
    }
}

impl SiaEncodable for Hash {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.0);
        Ok(())
    }
}

impl RivineEncodable for Hash {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.0);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Big-unsigned helpers shared by Currency and Blockstake
// ---------------------------------------------------------------------------

/// Minimal big-endian bytes of `value`; zero has no bytes at all.
fn minimal_be_bytes(value: &U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let len = (value.bits() + 7) / 8;
    buf[32 - len..].to_vec()
}

fn parse_decimal_u256(s: &str) -> Option<U256> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_dec_str(s).ok()
}

fn big_uint_from_json(value: &Value, field: &str) -> Result<U256, TypeError> {
    let invalid = || TypeError::InvalidJson {
        field: field.to_string(),
        expected: "a decimal integer string",
    };
    match value {
        Value::String(s) => parse_decimal_u256(s).ok_or_else(invalid),
        Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// An amount of TFT, held in the smallest unit.
///
/// - `FromStr` / `Display` speak **TFT**: `"1.5"`, `"1.5 TFT"`, `"100 tft"`.
/// - JSON speaks **units**: `"1500000000"`.
///
/// ```
/// use tfchain_protocol::types::Currency;
///
/// let c: Currency = "0.123456789 TFT".parse().unwrap();
/// assert_eq!(c, Currency::from_units(123_456_789u64));
/// assert_eq!(c.to_string(), "0.123456789");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(U256);

impl Currency {
    pub const fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn from_units<V: Into<U256>>(units: V) -> Self {
        Self(units.into())
    }

    /// Whole TFT.
    pub fn from_tft(tft: u64) -> Self {
        Self(U256::from(tft) * U256::from(CURRENCY_UNITS_PER_COIN))
    }

    pub fn units(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `"100 TFT"`, `"0.5 TFT"`.
    pub fn str_with_unit(&self) -> String {
        format!("{} {}", self, CURRENCY_UNIT)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_mul(self, rhs: u64) -> Option<Self> {
        self.0.checked_mul(U256::from(rhs)).map(Self)
    }

    /// Subtraction that refuses to go negative.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, TypeError> {
        self.0.checked_sub(rhs.0).map(Self).ok_or_else(|| TypeError::CurrencyUnderflow {
            lhs: self.to_string(),
            rhs: rhs.to_string(),
        })
    }

    /// Parse the JSON form: a decimal string (or number) of units.
    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        big_uint_from_json(value, field).map(Self)
    }

    pub fn json(&self) -> Value {
        Value::String(self.0.to_string())
    }

    fn binary_bytes(&self) -> Vec<u8> {
        minimal_be_bytes(&self.0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_coin = U256::from(CURRENCY_UNITS_PER_COIN);
        let whole = self.0 / per_coin;
        let fraction = (self.0 % per_coin).low_u64();
        if fraction == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:0width$}", fraction, width = CURRENCY_PRECISION as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Currency {
    type Err = TypeError;

    /// Parses a human amount in TFT, with an optional case-insensitive
    /// `TFT` suffix: `"1"`, `"1 TFT"`, `"0.123456789"`, `"1.00000 tft"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidCurrency(s.to_string());

        let mut amount = s.trim();
        let unit_start = amount.len().saturating_sub(CURRENCY_UNIT.len());
        if amount
            .get(unit_start..)
            .is_some_and(|unit| unit.eq_ignore_ascii_case(CURRENCY_UNIT))
        {
            amount = amount[..unit_start].trim_end();
        }

        let (whole, raw_fraction) = amount.split_once('.').unwrap_or((amount, ""));
        if whole.is_empty() && raw_fraction.is_empty() {
            return Err(invalid());
        }
        let fraction = raw_fraction.trim_end_matches('0');
        if fraction.len() > CURRENCY_PRECISION as usize
            || !raw_fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole = if whole.is_empty() {
            U256::zero()
        } else {
            parse_decimal_u256(whole).ok_or_else(invalid)?
        };
        let fraction = if fraction.is_empty() {
            U256::zero()
        } else {
            let padded = format!("{:0<width$}", fraction, width = CURRENCY_PRECISION as usize);
            parse_decimal_u256(&padded).ok_or_else(invalid)?
        };

        whole
            .checked_mul(U256::from(CURRENCY_UNITS_PER_COIN))
            .and_then(|units| units.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// `+`, `*` and `sum()` saturate at `2^256 - 1` units instead of wrapping.
/// Use [`Currency::checked_add`] or [`Currency::checked_mul`] where the
/// operands are not bounded.
impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u64> for Currency {
    type Output = Currency;

    fn mul(self, rhs: u64) -> Self::Output {
        Self(self.0.saturating_mul(U256::from(rhs)))
    }
}

impl Div<u64> for Currency {
    type Output = Currency;

    /// Integer division on units. Dividing by zero yields zero.
    fn div(self, rhs: u64) -> Self::Output {
        if rhs == 0 {
            return Self::zero();
        }
        Self(self.0 / U256::from(rhs))
    }
}

impl Sum for Currency {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl SiaEncodable for Currency {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(&self.binary_bytes());
        Ok(())
    }
}

impl RivineEncodable for Currency {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(&self.binary_bytes())
    }
}

impl serde::Serialize for Currency {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Currency {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_json(&value, "currency").map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Blockstake
// ---------------------------------------------------------------------------

/// A number of block stakes. No decimals, no unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Blockstake(U256);

impl Blockstake {
    pub fn new<V: Into<U256>>(value: V) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> U256 {
        self.0
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        big_uint_from_json(value, field).map(Self)
    }

    pub fn json(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl fmt::Display for Blockstake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Blockstake {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal_u256(s.trim())
            .map(Self)
            .ok_or_else(|| TypeError::InvalidCurrency(s.to_string()))
    }
}

impl SiaEncodable for Blockstake {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(&minimal_be_bytes(&self.0));
        Ok(())
    }
}

impl RivineEncodable for Blockstake {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(&minimal_be_bytes(&self.0))
    }
}

impl_string_serde!(Hash, Blockstake);
