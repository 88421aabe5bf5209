//! # ERC20 Bridge Types
//!
//! Ethereum-side identifiers carried by the ERC20 bridge transactions
//! (v208-v210). Both render as `0x`-prefixed lowercase hex and encode as
//! their raw bytes in either dialect.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::error::TypeError;
use super::json::impl_string_serde;
use super::unlockhash::UnlockHash;
use crate::config::{ERC20_ADDRESS_SIZE, ERC20_HASH_SIZE, HASH_SIZE};
use crate::crypto::blake2b;
use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};

fn decode_prefixed<const N: usize>(s: &str) -> Result<[u8; N], TypeError> {
    if s.is_empty() {
        return Ok([0u8; N]);
    }
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits)?;
    let found = bytes.len();
    bytes
        .try_into()
        .map_err(|_| TypeError::FixedSizeMismatch { expected: N, found })
}

fn from_json_str<T: FromStr<Err = TypeError>>(
    value: &Value,
    field: &str,
) -> Result<T, TypeError> {
    match value {
        Value::Null => "".parse(),
        Value::String(s) => s.parse(),
        _ => Err(TypeError::InvalidJson {
            field: field.to_string(),
            expected: "0x-prefixed hex string",
        }),
    }
}

// ---------------------------------------------------------------------------
// ERC20Address
// ---------------------------------------------------------------------------

/// A 20-byte Ethereum wallet or contract address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ERC20Address([u8; ERC20_ADDRESS_SIZE]);

impl ERC20Address {
    pub fn new(bytes: [u8; ERC20_ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ERC20_ADDRESS_SIZE] {
        &self.0
    }

    /// The bridge-side address owned by a TFT address: the last 20 bytes
    /// of `H(uh33)`.
    pub fn from_unlockhash(unlockhash: &UnlockHash) -> Self {
        let digest = blake2b(&unlockhash.to_bytes());
        let mut out = [0u8; ERC20_ADDRESS_SIZE];
        out.copy_from_slice(&digest[HASH_SIZE - ERC20_ADDRESS_SIZE..]);
        Self(out)
    }

    /// Accepts a string (empty or null means the zero address).
    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        from_json_str(value, field)
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for ERC20Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for ERC20Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_prefixed(s).map(Self)
    }
}

impl SiaEncodable for ERC20Address {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.0);
        Ok(())
    }
}

impl RivineEncodable for ERC20Address {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.0);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ERC20Hash
// ---------------------------------------------------------------------------

/// A 32-byte Ethereum block or transaction hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ERC20Hash([u8; ERC20_HASH_SIZE]);

impl ERC20Hash {
    pub fn new(bytes: [u8; ERC20_HASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ERC20_HASH_SIZE] {
        &self.0
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        from_json_str(value, field)
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for ERC20Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for ERC20Hash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_prefixed(s).map(Self)
    }
}

impl SiaEncodable for ERC20Hash {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.0);
        Ok(())
    }
}

impl RivineEncodable for ERC20Hash {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.0);
        Ok(())
    }
}

impl_string_serde!(ERC20Address, ERC20Hash);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{rivine_encode, sia_encode};

    #[test]
    fn test_address_prefix_is_optional() {
        let hex = "828de486adc50aa52dab52a2ec284bcac75be211";
        let a: ERC20Address = hex.parse().unwrap();
        let b: ERC20Address = format!("0x{hex}").parse().unwrap();
        let c: ERC20Address = format!("0X{hex}").parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.to_string(), format!("0x{hex}"));
    }

    #[test]
    fn test_address_wrong_size() {
        assert!(matches!(
            "0xabcd".parse::<ERC20Address>(),
            Err(TypeError::FixedSizeMismatch { expected: 20, found: 2 })
        ));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(ERC20Hash::from_json(&Value::Null, "h").unwrap(), ERC20Hash::default());
        assert_eq!("".parse::<ERC20Address>().unwrap(), ERC20Address::default());
    }

    #[test]
    fn test_raw_encoding() {
        let addr = ERC20Address::new([0x11; 20]);
        assert_eq!(sia_encode(&addr).unwrap(), vec![0x11; 20]);
        assert_eq!(rivine_encode(&addr).unwrap(), vec![0x11; 20]);
    }

    #[test]
    fn test_from_unlockhash_takes_digest_tail() {
        let uh: UnlockHash =
            "01b49da2ff193f46ee0fc684d7a6121a8b8e324144dffc7327471a4da79f1730960edcb2ce737f"
                .parse()
                .unwrap();
        let digest = blake2b(&uh.to_bytes());
        assert_eq!(ERC20Address::from_unlockhash(&uh).as_bytes()[..], digest[12..]);
    }
}
