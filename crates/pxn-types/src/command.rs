//! Signed listing commands as decoded from the transport.
//!
//! Fields stay in their raw textual form until the codec builds the signed
//! message, so that parse failures surface before any cryptographic work.

use crate::{Address, CommandError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListing {
    pub name: String,
    pub description: String,
    pub image_ref: String,
    pub price: String,
    pub claimed_owner: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_ref: String,
    pub price: String,
    pub claimed_owner: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteListing {
    pub id: String,
    /// Human-readable text shown to the signer, e.g. `"Delete ShogunSamurai"`.
    pub reason_message: String,
    pub claimed_actor: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFavorite {
    pub id: String,
    /// Human-readable text shown to the signer, e.g. `"Update favorite for ShogunSamurai"`.
    pub reason_message: String,
    pub claimed_actor: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(CreateListing),
    Update(UpdateListing),
    Delete(DeleteListing),
    ToggleFavorite(ToggleFavorite),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Create,
    Update,
    Delete,
    ToggleFavorite,
}

impl CommandKind {
    pub const ALL: [Self; 4] = [Self::Create, Self::Update, Self::Delete, Self::ToggleFavorite];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create_listing",
            Self::Update => "update_listing",
            Self::Delete => "delete_listing",
            Self::ToggleFavorite => "toggle_favorite",
        }
    }

    /// Whether authorization is checked against the stored listing owner.
    pub fn requires_stored_owner(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Create(_) => CommandKind::Create,
            Self::Update(_) => CommandKind::Update,
            Self::Delete(_) => CommandKind::Delete,
            Self::ToggleFavorite(_) => CommandKind::ToggleFavorite,
        }
    }

    pub fn signature(&self) -> &str {
        match self {
            Self::Create(c) => &c.signature,
            Self::Update(c) => &c.signature,
            Self::Delete(c) => &c.signature,
            Self::ToggleFavorite(c) => &c.signature,
        }
    }

    /// Listing targeted by the command; `None` for creation.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::Create(_) => None,
            Self::Update(c) => Some(&c.id),
            Self::Delete(c) => Some(&c.id),
            Self::ToggleFavorite(c) => Some(&c.id),
        }
    }

    /// The owner or actor the caller claims to act as.
    pub fn claimed_principal(&self) -> Result<Address, CommandError> {
        let raw = match self {
            Self::Create(c) => &c.claimed_owner,
            Self::Update(c) => &c.claimed_owner,
            Self::Delete(c) => &c.claimed_actor,
            Self::ToggleFavorite(c) => &c.claimed_actor,
        };
        raw.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(actor: &str) -> Command {
        Command::ToggleFavorite(ToggleFavorite {
            id: "l-1".into(),
            reason_message: "Update favorite for X".into(),
            claimed_actor: actor.into(),
            signature: "0x00".into(),
        })
    }

    #[test]
    fn test_kind_and_target() {
        let cmd = toggle("0xcccccccccccccccccccccccccccccccccccccccc");
        assert_eq!(cmd.kind(), CommandKind::ToggleFavorite);
        assert_eq!(cmd.target_id(), Some("l-1"));
        assert_eq!(cmd.signature(), "0x00");
        assert!(!cmd.kind().requires_stored_owner());
        assert!(CommandKind::Delete.requires_stored_owner());
    }

    #[test]
    fn test_claimed_principal_malformed() {
        assert!(matches!(
            toggle("not-an-address").claimed_principal(),
            Err(CommandError::MalformedCommand(_))
        ));
    }
}
