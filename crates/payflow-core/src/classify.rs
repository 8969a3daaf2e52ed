//! Maps raw loading failures into the reported error taxonomy.
//!
//! Pure and total: every failure the join can produce has exactly one
//! reported outcome, and the mapping runs without touching the async
//! machinery so it can be tested directly.

use crate::resolve::ResolveError;
use payflow_account::AccountError;
use payflow_fees::FeeError;
use payflow_swap::{SwapError, SwapRejection};
use payflow_types::PaymentError;

/// One raw failure out of the three joined operations.
#[derive(Debug)]
pub enum LoadFailure {
	/// Fee estimation failed.
	Fee(FeeError),
	/// Destination resolution failed.
	Resolve(ResolveError),
	/// Account lookup failed.
	Account(AccountError),
}

/// Classifies a raw failure into exactly one reported error.
///
/// Priority order: resolution-local markers first, then the swap-service
/// rejection taxonomy, then the unexpected catch-all.
pub fn classify(failure: &LoadFailure) -> PaymentError {
	match failure {
		LoadFailure::Resolve(ResolveError::ExpiredInvoice) => PaymentError::ExpiredInvoice,
		LoadFailure::Resolve(ResolveError::InvalidAddress) => PaymentError::InvalidAddress,
		LoadFailure::Resolve(ResolveError::Swap(SwapError::Rejected(rejection))) => {
			classify_rejection(rejection)
		},
		LoadFailure::Resolve(ResolveError::Swap(e)) => PaymentError::Unexpected(e.to_string()),
		LoadFailure::Fee(e) => PaymentError::Unexpected(e.to_string()),
		LoadFailure::Account(e) => PaymentError::Unexpected(e.to_string()),
	}
}

fn classify_rejection(rejection: &SwapRejection) -> PaymentError {
	match rejection {
		SwapRejection::InvalidInvoice => PaymentError::InvalidInvoice,
		SwapRejection::InvoiceAlreadyUsed => PaymentError::InvoiceAlreadyUsed,
		SwapRejection::InvoiceExpiresTooSoon => PaymentError::InvoiceExpiresTooSoon,
		SwapRejection::NoPaymentRoute => PaymentError::NoPaymentRoute,
		SwapRejection::InvoiceUnreachableNode => PaymentError::InvoiceUnreachableNode,
		SwapRejection::CyclicalSwap => PaymentError::CyclicalSwap,
		SwapRejection::AmountlessInvoicesNotSupported => PaymentError::InvoiceMissingAmount,
		SwapRejection::Unknown(code) => {
			PaymentError::Unexpected(format!("unrecognized swap rejection '{code}'"))
		},
	}
}
