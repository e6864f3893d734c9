//! Auth pipeline: build message, recover signer, then apply the policy.

use pxn_types::{
    Address, CanonicalMessage, Command, CommandError, CommandKind, build_message,
};

use crate::{AuthContext, AuthorizationDecision, authorize, recover_signer};

/// A command whose signature recovered to a concrete signer, not yet authorized.
#[derive(Debug, Clone)]
pub struct VerifiedCommand {
    command: Command,
    message: CanonicalMessage,
    claimed: Address,
    signer: Address,
}

/// Build the canonical message and recover the signer.
///
/// Malformed input (price, ids, claimed address) is rejected before any
/// cryptographic work is attempted.
pub fn verify_command(command: Command) -> Result<VerifiedCommand, CommandError> {
    let message = build_message(&command)?;
    let claimed = command.claimed_principal()?;
    let signer = recover_signer(&message, command.signature())?;
    Ok(VerifiedCommand {
        command,
        message,
        claimed,
        signer,
    })
}

impl VerifiedCommand {
    pub fn kind(&self) -> CommandKind {
        self.command.kind()
    }

    pub fn signer(&self) -> &Address {
        &self.signer
    }

    pub fn claimed(&self) -> &Address {
        &self.claimed
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn message(&self) -> &CanonicalMessage {
        &self.message
    }

    /// Evaluate the policy. `stored_owner` is the targeted listing's owner for
    /// Update and Delete, ignored otherwise.
    pub fn authorize(self, stored_owner: Option<&Address>) -> Result<AuthContext, CommandError> {
        let kind = self.kind();
        match authorize(kind, &self.signer, &self.claimed, stored_owner) {
            AuthorizationDecision::Allowed => Ok(AuthContext {
                signer: self.signer,
                kind,
                command: self.command,
                message: self.message,
            }),
            AuthorizationDecision::Denied(reason) => Err(CommandError::Unauthorized(reason)),
        }
    }
}
