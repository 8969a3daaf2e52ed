//! Resolution paths turning a payment intent into a payment descriptor.
//!
//! Exactly one path runs per attempt, selected by the loader from the
//! intent variant: the address path (with its optional legacy-request
//! fetch) or the submarine-swap path.

pub mod address;
pub mod swap;

use payflow_swap::SwapError;
use thiserror::Error;

/// Failures produced while resolving a destination.
///
/// The first two variants are resolution-local markers with fixed meanings;
/// swap-service failures pass through unclassified because classification
/// happens at the loader boundary, not here.
#[derive(Debug, Error)]
pub enum ResolveError {
	/// The legacy payment request behind the URI has expired.
	#[error("Payment request expired")]
	ExpiredInvoice,
	/// Nothing usable remains to send to.
	#[error("No usable address")]
	InvalidAddress,
	/// The swap service failed or rejected the invoice.
	#[error(transparent)]
	Swap(#[from] SwapError),
}
