//! Command pipeline: build message, verify signature, authorize, apply.
//!
//! Each call runs `Received -> MessageBuilt -> SignatureVerified -> Authorized
//! -> Applied` in sequence and short-circuits on the first failure. The
//! processor holds no state besides the injected store, so calls may run
//! concurrently.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use pxn_auth::{verify_command, AuthContext};
use pxn_types::{CanonicalMessage, Command, CommandError, Listing, ListingUpdate, Listings};
use tracing::{debug, info};
use uuid::Uuid;

use crate::store::ListingStore;

#[derive(Clone)]
pub struct CommandProcessor {
    store: Arc<dyn ListingStore>,
}

impl CommandProcessor {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// Current listing collection.
    pub async fn listings(&self) -> Result<Listings, CommandError> {
        Ok(self.store.get_all().await?)
    }

    /// Execute a signed command and return the collection as stored afterwards.
    pub async fn execute(&self, command: Command) -> Result<Listings, CommandError> {
        let kind = command.kind();
        let target = command.target_id().map(str::to_string);

        let verified = verify_command(command)?;
        debug!(command = %kind, signer = %verified.signer(), "Signature verified");

        let stored_owner = match (kind.requires_stored_owner(), target.as_deref()) {
            (true, Some(id)) => Some(self.store.get_by_id(id).await?.owner),
            _ => None,
        };
        let ctx = verified.authorize(stored_owner.as_ref())?;

        self.apply(ctx).await?;
        self.listings().await
    }

    async fn apply(&self, ctx: AuthContext) -> Result<(), CommandError> {
        let AuthContext {
            signer,
            kind,
            command,
            message,
        } = ctx;

        match command {
            Command::Create(c) => {
                let listing = Listing {
                    id: Uuid::new_v4().to_string(),
                    name: c.name,
                    description: c.description,
                    image_ref: c.image_ref,
                    price: signed_price(&message)?,
                    owner: signer,
                    favorited_by: BTreeSet::new(),
                    created_at: Utc::now().timestamp_millis(),
                };
                let id = listing.id.clone();
                self.store.insert(listing).await?;
                info!(command = %kind, id = %id, owner = %signer, "Listing created");
            }
            Command::Update(c) => {
                let update = ListingUpdate::Details {
                    name: c.name,
                    description: c.description,
                    image_ref: c.image_ref,
                    price: signed_price(&message)?,
                };
                self.store.update_fields(&c.id, update).await?;
                info!(command = %kind, id = %c.id, owner = %signer, "Listing updated");
            }
            Command::Delete(c) => {
                self.store.delete(&c.id).await?;
                info!(command = %kind, id = %c.id, owner = %signer, "Listing deleted");
            }
            Command::ToggleFavorite(c) => {
                let listing = self
                    .store
                    .update_fields(&c.id, ListingUpdate::ToggleFavorite(signer))
                    .await?;
                info!(
                    command = %kind,
                    id = %c.id,
                    actor = %signer,
                    favorited = listing.is_favorited_by(&signer),
                    "Favorite toggled"
                );
            }
        }
        Ok(())
    }
}

fn signed_price(message: &CanonicalMessage) -> Result<u64, CommandError> {
    message
        .price()
        .ok_or_else(|| CommandError::malformed("signed message carries no price"))
}
