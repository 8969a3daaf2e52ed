//! Submarine swap types negotiated with the swap service.

use serde::{Deserialize, Serialize};

/// Identity of the Lightning node receiving the swapped payment.
///
/// Well-formed service responses carry at least one of the two fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceiver {
	/// Public alias advertised by the receiving node.
	pub alias: Option<String>,
	/// Hex-encoded public key of the receiving node.
	pub public_key: Option<String>,
}

/// The on-chain funding side of a negotiated swap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingOutput {
	/// Confirmations the funding output needs before the swap provider
	/// claims it. Zero means the provider accepts it unconfirmed.
	pub confirmations_needed: u32,
}

/// A swap negotiated for a single invoice-resolution attempt.
///
/// Immutable once constructed; a new attempt negotiates a new swap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmarineSwap {
	/// Who receives the Lightning payment.
	pub receiver: SwapReceiver,
	/// The on-chain funding output the wallet will pay into.
	pub funding_output: FundingOutput,
	/// Whether the provider will open a channel to the receiver first.
	pub will_pre_open_channel: bool,
}
