use thiserror::Error;

use crate::Address;

/// Why the authorization policy refused a verified signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The recovered signer is not the principal the command kind requires.
    SignerMismatch { required: Address, signer: Address },
    /// An owner-bound command was evaluated without the stored owner.
    OwnerUnknown,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignerMismatch { required, signer } => {
                write!(f, "signer {signer} does not match {required}")
            }
            Self::OwnerUnknown => f.write_str("listing owner unknown"),
        }
    }
}

/// Failure of a signed listing command.
///
/// Every variant except `StoreUnavailable` is terminal: retrying the same
/// command cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unauthorized: {0}")]
    Unauthorized(DenyReason),

    #[error("listing not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CommandError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedCommand(msg.into())
    }

    pub fn invalid_signature(msg: impl Into<String>) -> Self {
        Self::InvalidSignature(msg.into())
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedCommand(_) => "malformed_command",
            Self::InvalidSignature(_) => "invalid_signature",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    /// Only store outages are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
