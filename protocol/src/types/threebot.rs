//! # 3Bot Record Types
//!
//! A 3Bot record holds up to 15 network addresses and up to 15 names.
//! Bots are identified on chain by a sequential [`BotId`].

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde_json::Value;

use super::error::TypeError;
use super::json::{as_str, impl_string_serde};
use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};

/// Sequential identifier assigned by the chain on registration.
pub type BotId = u32;

const NETWORK_ADDRESS_HOSTNAME: u8 = 0;
const NETWORK_ADDRESS_IPV4: u8 = 1;
const NETWORK_ADDRESS_IPV6: u8 = 2;

const HOSTNAME_MAX_LENGTH: usize = 63;
const BOT_NAME_MIN_LENGTH: usize = 5;
const BOT_NAME_MAX_LENGTH: usize = 63;

// ---------------------------------------------------------------------------
// NetworkAddress
// ---------------------------------------------------------------------------

/// Where a bot can be reached. Parsing prefers IP literals over hostnames,
/// and IPv4-mapped IPv6 addresses collapse to IPv4.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkAddress {
    Hostname(String),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl NetworkAddress {
    fn type_tag(&self) -> u8 {
        match self {
            NetworkAddress::Hostname(_) => NETWORK_ADDRESS_HOSTNAME,
            NetworkAddress::Ipv4(_) => NETWORK_ADDRESS_IPV4,
            NetworkAddress::Ipv6(_) => NETWORK_ADDRESS_IPV6,
        }
    }

    fn bytes(&self) -> Vec<u8> {
        match self {
            NetworkAddress::Hostname(host) => host.as_bytes().to_vec(),
            NetworkAddress::Ipv4(ip) => ip.octets().to_vec(),
            NetworkAddress::Ipv6(ip) => ip.octets().to_vec(),
        }
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        as_str(value, field)?.parse()
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

fn is_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > HOSTNAME_MAX_LENGTH {
        return false;
    }
    s.split('.').all(|label| {
        let bytes = label.as_bytes();
        match (bytes.first(), bytes.last()) {
            (Some(first), Some(last)) => {
                first.is_ascii_alphanumeric()
                    && last.is_ascii_alphanumeric()
                    && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
            }
            _ => false,
        }
    })
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkAddress::Hostname(host) => f.write_str(host),
            NetworkAddress::Ipv4(ip) => write!(f, "{ip}"),
            NetworkAddress::Ipv6(ip) => write!(f, "{ip}"),
        }
    }
}

impl FromStr for NetworkAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => Ok(NetworkAddress::Ipv4(ip)),
            Ok(IpAddr::V6(ip)) => Ok(match ip.to_ipv4_mapped() {
                Some(v4) => NetworkAddress::Ipv4(v4),
                None => NetworkAddress::Ipv6(ip),
            }),
            Err(_) if is_hostname(s) => Ok(NetworkAddress::Hostname(s.to_string())),
            Err(_) => Err(TypeError::InvalidNetworkAddress(s.to_string())),
        }
    }
}

impl RivineEncodable for NetworkAddress {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        let bytes = self.bytes();
        // length in the upper six bits, type in the lower two
        let length = u8::try_from(bytes.len())
            .ok()
            .filter(|len| usize::from(*len) <= HOSTNAME_MAX_LENGTH)
            .ok_or(EncodingError::AddressTooLong(bytes.len()))?;
        encoder.add_byte((length << 2) | self.type_tag());
        encoder.add_raw_bytes(&bytes);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BotName
// ---------------------------------------------------------------------------

/// A dot-separated bot name such as `chatbot.example`.
///
/// Each label starts with a letter, ends with a letter or digit, holds
/// only letters, digits and `-` in between and is at least 5 characters.
/// The full name is at most 63 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BotName(String);

impl BotName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        as_str(value, field)?.parse()
    }

    pub fn json(&self) -> Value {
        Value::String(self.0.clone())
    }
}

fn is_bot_name_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() < BOT_NAME_MIN_LENGTH {
        return false;
    }
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphabetic()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

impl fmt::Display for BotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BotName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > BOT_NAME_MAX_LENGTH || !s.split('.').all(is_bot_name_label) {
            return Err(TypeError::InvalidBotName(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl SiaEncodable for BotName {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(self.0.as_bytes());
        Ok(())
    }
}

impl RivineEncodable for BotName {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(self.0.as_bytes())
    }
}

impl_string_serde!(NetworkAddress, BotName);
