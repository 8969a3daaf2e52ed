//! The closed error taxonomy reported to callers of the resolution core.

use thiserror::Error;

/// Exactly one of these is reported per failed loading attempt.
///
/// Collaborator failures are classified at the core boundary; callers never
/// see a raw network or service error. Each variant maps to one recovery
/// action in the layer above.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
	/// The legacy payment request behind the URI has expired.
	#[error("Payment request expired")]
	ExpiredInvoice,
	/// The input carries no address usable for an on-chain send.
	#[error("Invalid address")]
	InvalidAddress,
	/// The invoice specifies no amount and amount-less swaps are unsupported.
	#[error("Invoice does not specify an amount")]
	InvoiceMissingAmount,
	/// The swap service rejected the invoice as structurally invalid.
	#[error("Invalid invoice")]
	InvalidInvoice,
	/// The invoice was already settled or claimed.
	#[error("Invoice already used")]
	InvoiceAlreadyUsed,
	/// Not enough time remains on the invoice to complete a swap.
	#[error("Invoice expires too soon")]
	InvoiceExpiresTooSoon,
	/// The swap service found no route to the receiving node.
	#[error("No payment route to the receiver")]
	NoPaymentRoute,
	/// The swap service could not reach the receiving node.
	#[error("Receiving node unreachable")]
	InvoiceUnreachableNode,
	/// The payment would route back to the paying wallet.
	#[error("Swap would pay this wallet back to itself")]
	CyclicalSwap,
	/// Any failure not matched by the taxonomy above.
	#[error("Unexpected error: {0}")]
	Unexpected(String),
}
