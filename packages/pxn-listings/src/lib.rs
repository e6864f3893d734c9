//! # PXN Listings
//!
//! Marketplace listings service whose mutations are authorized by typed-data
//! signatures instead of sessions. Every create, update, delete and favorite
//! toggle carries an EIP-712 signature; the server recovers the signer and
//! checks it against the listing owner or acting address.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin pxn-listings
//! ```
//!
//! ## Endpoints
//! - `GET /listings` - All listings
//! - `POST /listings` - Create (signed by the creator)
//! - `PUT /listings` - Update (signed by the owner) or toggle favorite (signed by the actor)
//! - `DELETE /listings` - Delete (signed by the owner)
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics

pub mod config;
mod error;
mod handlers;
pub mod metrics;
mod middleware;
pub mod processor;
mod response;
mod router;
mod state;
pub mod store;
pub mod wire;

pub use config::Config;
pub use error::Error;
pub use processor::CommandProcessor;
pub use router::create as create_router;
pub use state::AppState;
pub use store::{ListingStore, MemoryStore, StoreError};
