//! secp256k1 signer recovery over typed-data digests.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use pxn_types::{Address, CanonicalMessage, CommandError, recoverable_signature_bytes};

/// Recover the address that signed `message`.
///
/// `signature` is hex `r ‖ s ‖ v` (65 bytes) with `v` in `{27, 28}` or `{0, 1}`.
/// High-`s` signatures are normalized before recovery. Pure: never consults
/// any store or authorization state.
pub fn recover_signer(message: &CanonicalMessage, signature: &str) -> Result<Address, CommandError> {
    let raw = recoverable_signature_bytes(signature)?;
    let (rs, v) = raw.split_at(64);

    let mut recovery_id = recovery_id(v[0])?;
    let mut signature = Signature::from_slice(rs)
        .map_err(|_| CommandError::invalid_signature("signature scalars out of range"))?;
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let verifying_key =
        VerifyingKey::recover_from_prehash(&message.digest(), &signature, recovery_id)
            .map_err(|_| CommandError::invalid_signature("public key recovery failed"))?;
    Address::from_public_key(verifying_key.to_encoded_point(false).as_bytes())
}

fn recovery_id(v: u8) -> Result<RecoveryId, CommandError> {
    let parity = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => {
            return Err(CommandError::invalid_signature(format!(
                "invalid recovery id {v}"
            )));
        }
    };
    RecoveryId::from_byte(parity)
        .ok_or_else(|| CommandError::invalid_signature(format!("invalid recovery id {v}")))
}
