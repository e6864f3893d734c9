//! Keccak-256 and recoverable signature byte extraction.

use sha3::{Digest, Keccak256};

use crate::CommandError;

/// Keccak-256 (the pre-standard SHA-3 padding used by Ethereum).
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Decode a hex signature (optional `0x`) into 65 raw `r ‖ s ‖ v` bytes.
pub fn recoverable_signature_bytes(signature: &str) -> Result<[u8; 65], CommandError> {
    let trimmed = signature.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let raw = hex::decode(digits)
        .map_err(|_| CommandError::invalid_signature("signature is not valid hex"))?;
    raw.as_slice().try_into().map_err(|_| {
        CommandError::invalid_signature(format!(
            "expected 65 signature bytes, got {}",
            raw.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sig_65_bytes() {
        let sig = format!("0x{}", "11".repeat(65));
        assert_eq!(recoverable_signature_bytes(&sig).unwrap(), [0x11; 65]);
    }

    #[test]
    fn test_sig_without_prefix() {
        let sig = "ab".repeat(65);
        assert!(recoverable_signature_bytes(&sig).is_ok());
    }

    #[test]
    fn test_sig_wrong_length() {
        let short = format!("0x{}", "11".repeat(64));
        let long = format!("0x{}", "11".repeat(66));
        assert!(matches!(
            recoverable_signature_bytes(&short),
            Err(CommandError::InvalidSignature(_))
        ));
        assert!(recoverable_signature_bytes(&long).is_err());
    }

    #[test]
    fn test_sig_not_hex() {
        let sig = format!("0x{}", "zz".repeat(65));
        assert!(matches!(
            recoverable_signature_bytes(&sig),
            Err(CommandError::InvalidSignature(_))
        ));
    }
}
