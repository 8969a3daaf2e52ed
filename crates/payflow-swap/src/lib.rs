//! Submarine swap negotiation module for the payflow wallet core.
//!
//! When the wallet cannot pay a Lightning invoice directly it asks a remote
//! swap service to stand in: the service pays the invoice over Lightning
//! and the wallet funds the service's claim on-chain. This module covers
//! the single negotiation exchange; contract construction and broadcast
//! belong to the ledger library.

use async_trait::async_trait;
use payflow_types::{ConfigSchema, ImplementationRegistry, SubmarineSwap};
use std::fmt;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

/// Errors that can occur during swap negotiation.
///
/// These propagate unclassified to the resolution core, which owns the
/// mapping into the reported taxonomy.
#[derive(Debug, Error)]
pub enum SwapError {
	/// Error that occurs when the service rejects the invoice.
	#[error("Swap rejected: {0}")]
	Rejected(SwapRejection),
	/// Error that occurs during network communication with the service.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the service response cannot be decoded.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	/// Error that occurs when the implementation configuration is invalid.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Rejection kinds reported by the swap service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapRejection {
	/// The invoice is structurally invalid.
	InvalidInvoice,
	/// The invoice was already settled or claimed.
	InvoiceAlreadyUsed,
	/// Not enough time remains to complete the swap safely.
	InvoiceExpiresTooSoon,
	/// No route to the receiving node.
	NoPaymentRoute,
	/// The receiving node cannot be reached.
	InvoiceUnreachableNode,
	/// The payment would route back to the paying wallet.
	CyclicalSwap,
	/// The invoice carries no amount and amount-less swaps are unsupported.
	AmountlessInvoicesNotSupported,
	/// A code this client does not recognize.
	Unknown(String),
}

impl SwapRejection {
	/// Maps a service rejection code to its kind.
	pub fn from_code(code: &str) -> Self {
		match code {
			"invalid_invoice" => SwapRejection::InvalidInvoice,
			"invoice_already_used" => SwapRejection::InvoiceAlreadyUsed,
			"invoice_expires_too_soon" => SwapRejection::InvoiceExpiresTooSoon,
			"no_payment_route" => SwapRejection::NoPaymentRoute,
			"invoice_unreachable_node" => SwapRejection::InvoiceUnreachableNode,
			"cyclical_swap" => SwapRejection::CyclicalSwap,
			"amountless_invoices_not_supported" => SwapRejection::AmountlessInvoicesNotSupported,
			other => SwapRejection::Unknown(other.to_string()),
		}
	}
}

impl fmt::Display for SwapRejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SwapRejection::InvalidInvoice => write!(f, "invalid invoice"),
			SwapRejection::InvoiceAlreadyUsed => write!(f, "invoice already used"),
			SwapRejection::InvoiceExpiresTooSoon => write!(f, "invoice expires too soon"),
			SwapRejection::NoPaymentRoute => write!(f, "no payment route"),
			SwapRejection::InvoiceUnreachableNode => write!(f, "receiving node unreachable"),
			SwapRejection::CyclicalSwap => write!(f, "cyclical swap"),
			SwapRejection::AmountlessInvoicesNotSupported => {
				write!(f, "amount-less invoices not supported")
			},
			SwapRejection::Unknown(code) => write!(f, "unrecognized rejection code '{code}'"),
		}
	}
}

/// Trait defining the interface for swap negotiation implementations.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait SwapInterface: Send + Sync {
	/// Returns the configuration schema for this swap implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Negotiates a swap for the raw encoded invoice.
	///
	/// A single exchange against the service; the core never retries.
	async fn create_swap(&self, raw_invoice: &str) -> Result<SubmarineSwap, SwapError>;
}

/// Type alias for swap factory functions.
pub type SwapFactory = fn(&toml::Value) -> Result<Box<dyn SwapInterface>, SwapError>;

/// Registry trait for swap implementations.
pub trait SwapRegistry: ImplementationRegistry<Factory = SwapFactory> {}

/// Get all registered swap implementations.
pub fn get_all_implementations() -> Vec<(&'static str, SwapFactory)> {
	use implementations::http;
	vec![(
		http::HttpSwapRegistry::NAME,
		http::HttpSwapRegistry::factory(),
	)]
}

/// Service that manages swap negotiation for the resolution core.
pub struct SwapService {
	/// The configured swap implementation.
	implementation: Box<dyn SwapInterface>,
}

impl SwapService {
	/// Creates a new SwapService with the specified implementation.
	pub fn new(implementation: Box<dyn SwapInterface>) -> Self {
		Self { implementation }
	}

	/// Negotiates a swap for the raw encoded invoice.
	pub async fn create_swap(&self, raw_invoice: &str) -> Result<SubmarineSwap, SwapError> {
		self.implementation.create_swap(raw_invoice).await
	}
}
