//! Payment-intent resolution core for the payflow wallet.
//!
//! Turns an externally-supplied payment identifier — an on-chain address
//! URI, a legacy payment-request URL, or a Lightning invoice — into one
//! normalized payment descriptor, joining destination resolution with fee
//! estimation and account lookup, and classifying every failure into the
//! closed taxonomy callers derive recovery actions from.

/// Error classification from raw collaborator failures.
pub mod classify;
/// Service construction from configuration.
pub mod factory;
/// The loading orchestrator.
pub mod loader;
/// Resolution paths from intent to payment descriptor.
pub mod resolve;

pub use classify::{classify, LoadFailure};
pub use factory::{build_loader, FactoryError};
pub use loader::{LoadedPayment, PaymentLoader};
pub use resolve::ResolveError;
