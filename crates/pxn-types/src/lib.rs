//! Shared types and pure-logic utilities for the PXN listings service.
//! No I/O and no key material: usable by the server and by signing clients.

mod address;
mod command;
mod crypto;
mod error;
mod listing;
mod price;
mod typed_data;

pub use address::Address;
pub use command::{
    Command, CommandKind, CreateListing, DeleteListing, ToggleFavorite, UpdateListing,
};
pub use crypto::{keccak256, recoverable_signature_bytes};
pub use error::{CommandError, DenyReason};
pub use listing::{Listing, ListingUpdate, Listings};
pub use price::parse_price;
pub use typed_data::{
    CanonicalMessage, DOMAIN_NAME, DOMAIN_VERSION, Domain, FieldType, FieldValue, MessageBody,
    PRIMARY_TYPE, build_message,
};
