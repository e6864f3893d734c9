//! Binds a recovered signer to the principal each command kind requires.

use pxn_types::{Address, CommandKind, DenyReason};

use crate::AuthorizationDecision;

/// Decide whether `signer` may perform a command of `kind`.
///
/// | kind | requirement |
/// |---|---|
/// | Create | signer == claimed owner |
/// | Update | signer == claimed owner == stored owner |
/// | Delete | signer == claimed actor == stored owner |
/// | ToggleFavorite | signer == claimed actor |
///
/// `stored_owner` is the current owner of the targeted listing and must be
/// supplied for Update and Delete. All comparisons are byte comparisons of
/// parsed addresses, i.e. case-insensitive on the hex form. The raw
/// signature is never seen here.
pub fn authorize(
    kind: CommandKind,
    signer: &Address,
    claimed: &Address,
    stored_owner: Option<&Address>,
) -> AuthorizationDecision {
    if signer != claimed {
        return AuthorizationDecision::Denied(DenyReason::SignerMismatch {
            required: *claimed,
            signer: *signer,
        });
    }

    if !kind.requires_stored_owner() {
        return AuthorizationDecision::Allowed;
    }

    // signer == claimed here, so matching the owner binds all three.
    match stored_owner {
        None => AuthorizationDecision::Denied(DenyReason::OwnerUnknown),
        Some(owner) if owner != signer => {
            AuthorizationDecision::Denied(DenyReason::SignerMismatch {
                required: *owner,
                signer: *signer,
            })
        }
        Some(_) => AuthorizationDecision::Allowed,
    }
}
