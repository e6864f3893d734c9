//! Service configuration.

use serde::Deserialize;

use crate::Error;

/// Base name of the optional config file (`pxn-listings.toml`, `.yaml`, ...).
pub const CONFIG_FILE: &str = "pxn-listings";
/// Prefix of the overriding environment variables.
pub const ENV_PREFIX: &str = "PXN";

/// Configuration for the listings service.
///
/// Loaded from an optional `pxn-listings.toml` and `PXN_*` environment
/// variables (e.g. `PXN_BIND_ADDRESS`, `PXN_SEED_PATH`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// JSON array of listings loaded into the store at startup.
    #[serde(default)]
    pub seed_path: Option<String>,

    #[serde(default = "defaults::cors_permissive")]
    pub cors_permissive: bool,

    /// Upper bound on accepted request bodies.
    #[serde(default = "defaults::max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            seed_path: None,
            cors_permissive: defaults::cors_permissive(),
            max_body_bytes: defaults::max_body_bytes(),
        }
    }
}

impl Config {
    /// Load `pxn-listings.*` from the working directory, then apply `PXN_*`.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(CONFIG_FILE)
    }

    /// Like [`Config::load`] with an explicit file base name. A missing file
    /// yields defaults; an unreadable or mistyped one is an error.
    pub fn load_from(file: &str) -> Result<Self, Error> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::Config(e.to_string()))
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3000".into()
    }

    pub fn cors_permissive() -> bool {
        true
    }

    pub fn max_body_bytes() -> usize {
        64 * 1024
    }
}
