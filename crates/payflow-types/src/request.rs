//! The normalized payment descriptor produced by resolution.
//!
//! Resolution collapses every supported input format into one of exactly two
//! outcomes: a direct on-chain send described by a URI, or a Lightning
//! invoice paid through a submarine swap. Both answer the same five
//! questions (destination, preset amount, expiry, preset description,
//! confirmation target), so the rest of the wallet treats them uniformly.

use crate::amount::Satoshis;
use crate::intent::{DecodedInvoice, PaymentUri};
use crate::swap::SubmarineSwap;
use crate::utils::truncate_destination;

/// Confirmation target used when the swap funding output needs no
/// confirmations. Zero-conf swaps refund instantly, so the far target is
/// always safe there.
const ZERO_CONF_CONFIRMATION_TARGET: u32 = 250;

/// Confirmation target for ordinary sends and confirmed swap funding.
const DEFAULT_CONFIRMATION_TARGET: u32 = 1;

/// A destination-agnostic payment descriptor.
///
/// Closed over exactly its two resolution outcomes so that match sites stay
/// exhaustive when a variant is added. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentRequest {
	/// Direct on-chain send described by a URI.
	ToAddress(FlowToAddress),
	/// Lightning invoice paid through a submarine swap.
	SubmarineSwap(FlowSubmarineSwap),
}

impl PaymentRequest {
	pub fn to_address(uri: PaymentUri) -> Self {
		PaymentRequest::ToAddress(FlowToAddress::new(uri))
	}

	pub fn submarine_swap(invoice: DecodedInvoice, swap: SubmarineSwap) -> Self {
		PaymentRequest::SubmarineSwap(FlowSubmarineSwap::new(invoice, swap))
	}

	/// A human-presentable label for the destination.
	pub fn destination(&self) -> String {
		match self {
			PaymentRequest::ToAddress(flow) => flow.destination(),
			PaymentRequest::SubmarineSwap(flow) => flow.destination(),
		}
	}

	/// The amount preset by the payee, when one is carried.
	pub fn preset_amount(&self) -> Option<Satoshis> {
		match self {
			PaymentRequest::ToAddress(flow) => flow.preset_amount(),
			PaymentRequest::SubmarineSwap(flow) => flow.preset_amount(),
		}
	}

	/// The expiry carried by the source format, as a raw numeric value.
	pub fn expires_time(&self) -> Option<f64> {
		match self {
			PaymentRequest::ToAddress(flow) => flow.expires_time(),
			PaymentRequest::SubmarineSwap(flow) => flow.expires_time(),
		}
	}

	/// The description preset by the payee, when one is carried.
	pub fn preset_description(&self) -> Option<String> {
		match self {
			PaymentRequest::ToAddress(flow) => flow.preset_description(),
			PaymentRequest::SubmarineSwap(flow) => flow.preset_description(),
		}
	}

	/// The confirmation target to preselect for this payment.
	pub fn default_confirmation_target(&self, current_height: u64) -> u32 {
		match self {
			PaymentRequest::ToAddress(flow) => flow.default_confirmation_target(current_height),
			PaymentRequest::SubmarineSwap(flow) => flow.default_confirmation_target(current_height),
		}
	}
}

/// A direct on-chain send, populated from a payment URI.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowToAddress {
	uri: PaymentUri,
}

impl FlowToAddress {
	pub fn new(uri: PaymentUri) -> Self {
		Self { uri }
	}

	/// The destination address, empty when the URI carries none.
	pub fn address(&self) -> String {
		self.uri.address.clone().unwrap_or_default()
	}

	fn destination(&self) -> String {
		match self.uri.label.as_deref().filter(|l| !l.is_empty()) {
			Some(label) => label.to_string(),
			None => truncate_destination(&self.address()),
		}
	}

	fn preset_amount(&self) -> Option<Satoshis> {
		self.uri
			.amount
			.filter(|amount| !amount.is_zero())
			.map(Satoshis::from_btc)
	}

	fn expires_time(&self) -> Option<f64> {
		self.uri
			.expires_time
			.as_deref()
			.and_then(|raw| raw.parse::<f64>().ok())
	}

	fn preset_description(&self) -> Option<String> {
		self.uri
			.message
			.as_deref()
			.filter(|m| !m.is_empty())
			.map(str::to_string)
	}

	fn default_confirmation_target(&self, _current_height: u64) -> u32 {
		DEFAULT_CONFIRMATION_TARGET
	}
}

/// A Lightning invoice paired with the swap negotiated to pay it on-chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSubmarineSwap {
	invoice: DecodedInvoice,
	swap: SubmarineSwap,
}

impl FlowSubmarineSwap {
	pub fn new(invoice: DecodedInvoice, swap: SubmarineSwap) -> Self {
		Self { invoice, swap }
	}

	pub fn invoice(&self) -> &DecodedInvoice {
		&self.invoice
	}

	pub fn swap(&self) -> &SubmarineSwap {
		&self.swap
	}

	/// Whether the swap provider will open a channel to the receiver first.
	pub fn will_pre_open_channel(&self) -> bool {
		self.swap.will_pre_open_channel
	}

	fn destination(&self) -> String {
		if let Some(alias) = &self.swap.receiver.alias {
			return alias.clone();
		}
		if let Some(public_key) = &self.swap.receiver.public_key {
			return truncate_destination(public_key);
		}
		String::new()
	}

	fn preset_amount(&self) -> Option<Satoshis> {
		self.invoice
			.milli_sat
			.parse::<i64>()
			.ok()
			.map(Satoshis::from_milli_sats)
	}

	fn expires_time(&self) -> Option<f64> {
		if self.invoice.expiry_seconds > 0 {
			return Some(self.invoice.expiry_seconds as f64);
		}
		None
	}

	fn preset_description(&self) -> Option<String> {
		if self.invoice.description.is_empty() {
			return None;
		}
		Some(self.invoice.description.clone())
	}

	fn default_confirmation_target(&self, _current_height: u64) -> u32 {
		if self.swap.funding_output.confirmations_needed == 0 {
			return ZERO_CONF_CONFIRMATION_TARGET;
		}
		DEFAULT_CONFIRMATION_TARGET
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::swap::{FundingOutput, SwapReceiver};
	use rust_decimal::Decimal;
	use std::str::FromStr;

	fn create_test_uri() -> PaymentUri {
		PaymentUri {
			address: Some("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq".to_string()),
			..Default::default()
		}
	}

	fn create_test_invoice() -> DecodedInvoice {
		DecodedInvoice {
			raw: "lnbc1500n1pdedryzpp5".to_string(),
			milli_sat: "150000000".to_string(),
			expiry_seconds: 3600,
			description: "coffee".to_string(),
		}
	}

	fn create_test_swap() -> SubmarineSwap {
		SubmarineSwap {
			receiver: SwapReceiver {
				alias: Some("ACINQ".to_string()),
				public_key: Some(
					"03864ef025fde8fb587d989186ce6a4a186895ee44a926bfc370e2c366597a3f8f".to_string(),
				),
			},
			funding_output: FundingOutput {
				confirmations_needed: 1,
			},
			will_pre_open_channel: false,
		}
	}

	#[test]
	fn test_address_destination_prefers_label() {
		let mut uri = create_test_uri();
		uri.label = Some("Coffee shop".to_string());
		let request = PaymentRequest::to_address(uri);
		assert_eq!(request.destination(), "Coffee shop");
	}

	#[test]
	fn test_address_destination_truncates_without_label() {
		let request = PaymentRequest::to_address(create_test_uri());
		assert_eq!(request.destination(), "bc1qa...f5mdq");
	}

	#[test]
	fn test_address_destination_ignores_empty_label() {
		let mut uri = create_test_uri();
		uri.label = Some(String::new());
		let request = PaymentRequest::to_address(uri);
		assert_eq!(request.destination(), "bc1qa...f5mdq");
	}

	#[test]
	fn test_address_preset_amount_skips_zero() {
		let mut uri = create_test_uri();
		uri.amount = Some(Decimal::ZERO);
		assert_eq!(PaymentRequest::to_address(uri).preset_amount(), None);

		let mut uri = create_test_uri();
		uri.amount = Some(Decimal::from_str("0.001").unwrap());
		assert_eq!(
			PaymentRequest::to_address(uri).preset_amount(),
			Some(Satoshis(100_000))
		);
	}

	#[test]
	fn test_address_expires_time_parses_numeric_string() {
		let mut uri = create_test_uri();
		uri.expires_time = Some("1700000000".to_string());
		assert_eq!(
			PaymentRequest::to_address(uri).expires_time(),
			Some(1_700_000_000.0)
		);

		let mut uri = create_test_uri();
		uri.expires_time = Some("not a number".to_string());
		assert_eq!(PaymentRequest::to_address(uri).expires_time(), None);

		assert_eq!(
			PaymentRequest::to_address(create_test_uri()).expires_time(),
			None
		);
	}

	#[test]
	fn test_address_preset_description_skips_empty_message() {
		let mut uri = create_test_uri();
		uri.message = Some(String::new());
		assert_eq!(PaymentRequest::to_address(uri).preset_description(), None);

		let mut uri = create_test_uri();
		uri.message = Some("order #42".to_string());
		assert_eq!(
			PaymentRequest::to_address(uri).preset_description(),
			Some("order #42".to_string())
		);
	}

	#[test]
	fn test_address_confirmation_target_is_always_one() {
		let request = PaymentRequest::to_address(create_test_uri());
		assert_eq!(request.default_confirmation_target(0), 1);
		assert_eq!(request.default_confirmation_target(800_000), 1);
	}

	#[test]
	fn test_swap_destination_prefers_alias() {
		let request = PaymentRequest::submarine_swap(create_test_invoice(), create_test_swap());
		assert_eq!(request.destination(), "ACINQ");
	}

	#[test]
	fn test_swap_destination_truncates_public_key() {
		let mut swap = create_test_swap();
		swap.receiver.alias = None;
		let request = PaymentRequest::submarine_swap(create_test_invoice(), swap);
		assert_eq!(request.destination(), "03864...a3f8f");
	}

	#[test]
	fn test_swap_destination_empty_without_identity() {
		let mut swap = create_test_swap();
		swap.receiver = SwapReceiver::default();
		let request = PaymentRequest::submarine_swap(create_test_invoice(), swap);
		assert_eq!(request.destination(), "");
	}

	#[test]
	fn test_swap_preset_amount_floor_divides_milli_sats() {
		let mut invoice = create_test_invoice();
		invoice.milli_sat = "1999".to_string();
		let request = PaymentRequest::submarine_swap(invoice, create_test_swap());
		assert_eq!(request.preset_amount(), Some(Satoshis(1)));
	}

	#[test]
	fn test_swap_preset_amount_none_for_unparseable() {
		let mut invoice = create_test_invoice();
		invoice.milli_sat = String::new();
		let request = PaymentRequest::submarine_swap(invoice, create_test_swap());
		assert_eq!(request.preset_amount(), None);

		let mut invoice = create_test_invoice();
		invoice.milli_sat = "12.5".to_string();
		let request = PaymentRequest::submarine_swap(invoice, create_test_swap());
		assert_eq!(request.preset_amount(), None);
	}

	#[test]
	fn test_swap_expires_time_requires_positive_expiry() {
		let mut invoice = create_test_invoice();
		invoice.expiry_seconds = 0;
		let request = PaymentRequest::submarine_swap(invoice, create_test_swap());
		assert_eq!(request.expires_time(), None);

		let request = PaymentRequest::submarine_swap(create_test_invoice(), create_test_swap());
		assert_eq!(request.expires_time(), Some(3600.0));
	}

	#[test]
	fn test_swap_preset_description_skips_empty() {
		let mut invoice = create_test_invoice();
		invoice.description = String::new();
		let request = PaymentRequest::submarine_swap(invoice, create_test_swap());
		assert_eq!(request.preset_description(), None);

		let request = PaymentRequest::submarine_swap(create_test_invoice(), create_test_swap());
		assert_eq!(request.preset_description(), Some("coffee".to_string()));
	}

	#[test]
	fn test_swap_confirmation_target_zero_conf() {
		let mut swap = create_test_swap();
		swap.funding_output.confirmations_needed = 0;
		let request = PaymentRequest::submarine_swap(create_test_invoice(), swap);
		assert_eq!(request.default_confirmation_target(800_000), 250);
	}

	#[test]
	fn test_swap_confirmation_target_confirmed_funding() {
		let request = PaymentRequest::submarine_swap(create_test_invoice(), create_test_swap());
		assert_eq!(request.default_confirmation_target(800_000), 1);
	}
}
