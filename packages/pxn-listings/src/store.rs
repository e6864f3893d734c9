//! Listing persistence boundary.
//!
//! The processor only talks to [`ListingStore`]; the hosting process owns the
//! concrete store and injects it. [`MemoryStore`] keeps listings in insertion
//! order behind an async lock.

use async_trait::async_trait;
use pxn_types::{CommandError, Listing, ListingUpdate, Listings};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("listing {0} not found")]
    NotFound(String),
    #[error("listing {0} already exists")]
    Duplicate(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CommandError::NotFound(id),
            // A fresh id on retry resolves a collision.
            StoreError::Duplicate(id) => {
                CommandError::StoreUnavailable(format!("duplicate listing id {id}"))
            }
            StoreError::Unavailable(msg) => CommandError::StoreUnavailable(msg),
        }
    }
}

/// Narrow store interface used by the command processor.
///
/// `update_fields` must apply its update atomically with respect to other
/// updates of the same listing: a favorite toggle is a set add/remove, not a
/// read-modify-write by the caller.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn get_all(&self) -> Result<Listings, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Listing, StoreError>;

    async fn insert(&self, listing: Listing) -> Result<(), StoreError>;

    /// Returns the listing as stored after the update.
    async fn update_fields(&self, id: &str, update: ListingUpdate) -> Result<Listing, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// In-process store. Insertion order is preserved for `get_all`.
#[derive(Default)]
pub struct MemoryStore {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }

    /// Load a JSON array of listings (the `GET /listings` format).
    pub fn from_seed_file(path: &str) -> Result<Self, crate::Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read seed file {path}: {e}")))?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)
            .map_err(|e| crate::Error::Config(format!("Invalid seed file {path}: {e}")))?;
        info!(path, count = listings.len(), "Loaded seed listings");
        Ok(Self::from_listings(listings))
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn get_all(&self) -> Result<Listings, StoreError> {
        Ok(Listings::new(self.listings.read().await.clone()))
    }

    async fn get_by_id(&self, id: &str) -> Result<Listing, StoreError> {
        self.listings
            .read()
            .await
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, listing: Listing) -> Result<(), StoreError> {
        let mut listings = self.listings.write().await;
        if listings.iter().any(|l| l.id == listing.id) {
            return Err(StoreError::Duplicate(listing.id));
        }
        listings.push(listing);
        Ok(())
    }

    async fn update_fields(&self, id: &str, update: ListingUpdate) -> Result<Listing, StoreError> {
        let mut listings = self.listings.write().await;
        let listing = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        listing.apply(&update);
        Ok(listing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut listings = self.listings.write().await;
        let idx = listings
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        listings.remove(idx);
        Ok(())
    }
}
