//! Payment intents and their pre-resolution payloads.
//!
//! A [`PaymentIntent`] is the tagged, immutable description of what the user
//! wants to pay, produced by the scanning/input layer before resolution runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment identifier as supplied by the outside world, before resolution.
///
/// Exactly one variant is active per attempt. The contact, hardware-wallet
/// and LNURL variants are terminal markers: a higher layer routes them to
/// their own flows, and they must never reach the resolution core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentIntent {
	/// Payment to a known contact.
	ToContact,
	/// Payment to an on-chain address described by a parsed URI.
	ToAddress(PaymentUri),
	/// Payment of a Lightning invoice via an on-chain submarine swap.
	SubmarineSwap(DecodedInvoice),
	/// Transfer to an attached hardware wallet.
	ToHardwareWallet,
	/// Transfer from an attached hardware wallet.
	FromHardwareWallet,
	/// LNURL withdraw flow.
	LnurlWithdraw,
}

/// A parsed on-chain payment URI (BIP21-style).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUri {
	/// Destination address. Without it the URI cannot be paid on-chain
	/// directly.
	pub address: Option<String>,
	/// Human label for the destination.
	pub label: Option<String>,
	/// Free-form message attached by the payee.
	pub message: Option<String>,
	/// Requested amount in bitcoin.
	pub amount: Option<Decimal>,
	/// Expiry as a raw numeric string, when the URI carries one.
	pub expires_time: Option<String>,
	/// URL of a legacy payment request to fetch in place of the URI fields.
	pub payment_request_url: Option<String>,
}

impl PaymentUri {
	/// Whether the URI carries an address usable for a direct on-chain send.
	pub fn has_address(&self) -> bool {
		self.address.as_deref().is_some_and(|a| !a.is_empty())
	}

	/// The legacy payment-request URL, when present and non-empty.
	pub fn request_url(&self) -> Option<&str> {
		self.payment_request_url.as_deref().filter(|u| !u.is_empty())
	}
}

/// A Lightning invoice, decoded by the wallet's ledger library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedInvoice {
	/// The raw encoded invoice string, as scanned.
	pub raw: String,
	/// Invoice amount in milli-satoshis, in string form. Empty or
	/// unparseable means the invoice specifies no amount.
	pub milli_sat: String,
	/// Expiry in seconds. Zero means the invoice carries no expiry.
	pub expiry_seconds: i64,
	/// Human description carried by the invoice.
	pub description: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_has_address() {
		let mut uri = PaymentUri::default();
		assert!(!uri.has_address());

		uri.address = Some(String::new());
		assert!(!uri.has_address());

		uri.address = Some("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq".to_string());
		assert!(uri.has_address());
	}

	#[test]
	fn test_request_url_filters_empty() {
		let mut uri = PaymentUri::default();
		assert_eq!(uri.request_url(), None);

		uri.payment_request_url = Some(String::new());
		assert_eq!(uri.request_url(), None);

		uri.payment_request_url = Some("https://pay.example.com/r/abc".to_string());
		assert_eq!(uri.request_url(), Some("https://pay.example.com/r/abc"));
	}
}
