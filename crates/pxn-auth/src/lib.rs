//! Signed-command auth for the PXN listings service: signer recovery from
//! typed-data signatures and the per-command authorization policy.

mod auth_types;
mod authenticate;
mod policy;
mod recover;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth_types::{AuthContext, AuthorizationDecision};
pub use authenticate::{VerifiedCommand, verify_command};
pub use policy::authorize;
pub use recover::recover_signer;
