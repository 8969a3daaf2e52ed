//! Submarine-swap resolution for Lightning invoices.

use super::ResolveError;
use payflow_swap::SwapService;
use payflow_types::{DecodedInvoice, PaymentRequest};
use tracing::info;

/// Negotiates a swap for the invoice and pairs the two into the swap-flow
/// descriptor.
///
/// One exchange against the service, no retry. Failures pass through
/// untranslated; the loader classifies them.
pub async fn resolve(
	swaps: &SwapService,
	invoice: &DecodedInvoice,
) -> Result<PaymentRequest, ResolveError> {
	let swap = swaps.create_swap(&invoice.raw).await?;
	info!(
		zero_conf = swap.funding_output.confirmations_needed == 0,
		"submarine swap negotiated"
	);
	Ok(PaymentRequest::submarine_swap(invoice.clone(), swap))
}
