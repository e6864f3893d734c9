//! Shared authorization types.

use pxn_types::{Address, CanonicalMessage, Command, CommandKind, DenyReason};

/// Outcome of the authorization policy. Derived per command, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allowed,
    Denied(DenyReason),
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// A command whose signature verified and whose signer passed the policy.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Recovered signer; equal to the command's claimed principal.
    pub signer: Address,
    pub kind: CommandKind,
    pub command: Command,
    /// The message the signature covers; signed values are read from here.
    pub message: CanonicalMessage,
}
