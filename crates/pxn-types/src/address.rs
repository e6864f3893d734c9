//! 20-byte account addresses, compared case-insensitively by construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CommandError, keccak256};

/// An account address. Parsed from any-case hex, always rendered lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Derive the address of a secp256k1 public key.
    /// Accepts 65-byte uncompressed SEC1 (`0x04` prefix) or the 64-byte point body.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, CommandError> {
        let body = match public_key.len() {
            64 => public_key,
            65 if public_key[0] == 0x04 => &public_key[1..],
            _ => {
                return Err(CommandError::invalid_signature(
                    "invalid uncompressed public key bytes",
                ));
            }
        };
        let hash = keccak256(body);
        let mut out = [0u8; 20];
        out.copy_from_slice(&hash[12..]);
        Ok(Self(out))
    }
}

impl FromStr for Address {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 40 {
            return Err(CommandError::malformed(format!("invalid address: {s}")));
        }
        let mut out = [0u8; 20];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|_| CommandError::malformed(format!("invalid address: {s}")))?;
        Ok(Self(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        let lower: Address = "0xc4922ddc62c6b67e3f4f26b86a82f515494200f8".parse().unwrap();
        let mixed: Address = "0xC4922DDC62c6B67e3F4f26B86a82F515494200F8".parse().unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(
            mixed.to_string(),
            "0xc4922ddc62c6b67e3f4f26b86a82f515494200f8"
        );
    }

    #[test]
    fn test_parse_without_prefix() {
        let addr: Address = "c4922ddc62c6b67e3f4f26b86a82f515494200f8".parse().unwrap();
        assert_eq!(addr.as_bytes()[0], 0xc4);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "0x", "0x1234", "0xzz922ddc62c6b67e3f4f26b86a82f515494200f8"] {
            assert!(matches!(
                bad.parse::<Address>(),
                Err(CommandError::MalformedCommand(_))
            ));
        }
    }

    #[test]
    fn test_public_key_length_checked() {
        assert!(Address::from_public_key(&[0u8; 64]).is_ok());
        assert!(Address::from_public_key(&[0u8; 33]).is_err());
        // 65 bytes must carry the uncompressed tag.
        assert!(Address::from_public_key(&[0u8; 65]).is_err());
    }

    #[test]
    fn test_serde_lowercases() {
        let addr: Address =
            serde_json::from_str("\"0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA\"").unwrap();
        assert_eq!(
            serde_json::to_string(&addr).unwrap(),
            "\"0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\""
        );
    }
}
