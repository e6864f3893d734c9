//! Client-side typed-data signing for tests and demo tooling.
//!
//! The server never holds keys; this module exists so tests can produce the
//! same signatures a wallet would via `eth_signTypedData_v4`.

use k256::ecdsa::SigningKey;
use pxn_types::{Address, CanonicalMessage, Command, build_message};

/// Deterministic key whose scalar is 32 copies of `seed` (seed must be non-zero).
pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).expect("non-zero seed below the curve order")
}

pub fn address_of(key: &SigningKey) -> Address {
    Address::from_public_key(key.verifying_key().to_encoded_point(false).as_bytes())
        .expect("uncompressed point is 65 bytes")
}

/// Sign the message digest; returns `0x`-hex `r ‖ s ‖ v` with `v` in `{27, 28}`.
pub fn sign_message(key: &SigningKey, message: &CanonicalMessage) -> String {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&message.digest())
        .expect("prehash signing");
    let mut raw = signature.to_bytes().to_vec();
    raw.push(27 + recovery_id.to_byte());
    format!("0x{}", hex::encode(raw))
}

/// Fill in the command's signature with one produced by `key`.
pub fn sign_command(key: &SigningKey, mut command: Command) -> Command {
    let message = build_message(&command).expect("well-formed command");
    let signature = sign_message(key, &message);
    match &mut command {
        Command::Create(c) => c.signature = signature,
        Command::Update(c) => c.signature = signature,
        Command::Delete(c) => c.signature = signature,
        Command::ToggleFavorite(c) => c.signature = signature,
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxn_types::MessageBody;

    #[test]
    fn test_signature_matches_wallet_output() {
        let key = SigningKey::from_slice(
            &hex::decode("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
                .unwrap(),
        )
        .unwrap();
        let message = CanonicalMessage::new(MessageBody::ListingAction {
            id: "l-1".into(),
            msg: "Delete ShogunSamurai".into(),
        });
        assert_eq!(
            sign_message(&key, &message),
            "0x71c429eb1d2af9470f6cb020363eeeac87b47a5d55fbca133d11e0ba77335c042dcb5fdbf4a074c84218ffd053ae6027383d57e275fc0b24cb185935ec1cbc321b"
        );
    }
}
