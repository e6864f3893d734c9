//! Marketplace listing model.
//!
//! Field names on the wire follow the browser client (`desc`, `image`,
//! `creator`, `favorites`, `createdAt`).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "image")]
    pub image_ref: String,
    pub price: u64,
    /// Set once at creation.
    #[serde(rename = "creator")]
    pub owner: Address,
    #[serde(rename = "favorites", default)]
    pub favorited_by: BTreeSet<Address>,
    /// Unix milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Listing {
    pub fn is_favorited_by(&self, address: &Address) -> bool {
        self.favorited_by.contains(address)
    }

    /// Apply an update in place. Identity fields (`id`, `owner`, `created_at`)
    /// are never touched.
    pub fn apply(&mut self, update: &ListingUpdate) {
        match update {
            ListingUpdate::Details {
                name,
                description,
                image_ref,
                price,
            } => {
                self.name.clone_from(name);
                self.description.clone_from(description);
                self.image_ref.clone_from(image_ref);
                self.price = *price;
            }
            ListingUpdate::ToggleFavorite(address) => {
                if !self.favorited_by.remove(address) {
                    self.favorited_by.insert(*address);
                }
            }
        }
    }
}

/// Field-level mutation handed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingUpdate {
    Details {
        name: String,
        description: String,
        image_ref: String,
        price: u64,
    },
    /// Add the address to `favorited_by` if absent, remove it otherwise.
    ToggleFavorite(Address),
}

/// Current listing collection returned after every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listings(Vec<Listing>);

impl Listings {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self(listings)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.0.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.0.iter().find(|l| l.id == id)
    }

    pub fn into_inner(self) -> Vec<Listing> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Listings {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
