//! HTTP payment-request fetch implementation.
//!
//! Performs the single request/response exchange against the URL carried by
//! the URI and unmarshals the payload into URI fields. No retries; the
//! caller decides what a failure means.

use crate::{Bip70Error, Bip70Factory, Bip70Interface, Bip70Registry};
use async_trait::async_trait;
use payflow_types::{
	ConfigSchema, Field, FieldType, ImplementationRegistry, PaymentUri, Schema, ValidationError,
};
use reqwest::header::ACCEPT;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Media type requested from legacy payment-request servers.
const PAYMENT_REQUEST_MIME: &str = "application/bitcoin-paymentrequest";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// HTTP payment-request fetch implementation.
pub struct HttpBip70 {
	client: reqwest::Client,
}

/// The payment-request payload as served by the endpoint.
#[derive(Debug, Deserialize)]
struct PaymentRequestPayload {
	address: Option<String>,
	/// Requested amount in bitcoin.
	amount: Option<Decimal>,
	label: Option<String>,
	memo: Option<String>,
	/// Expiry as a unix timestamp.
	expires: Option<f64>,
}

impl HttpBip70 {
	/// Creates a new HttpBip70 instance with configuration.
	pub fn new(config: &toml::Value) -> Result<Self, Bip70Error> {
		HttpBip70Schema
			.validate(config)
			.map_err(|e| Bip70Error::InvalidConfig(e.to_string()))?;

		let timeout_ms = config
			.get("timeout_ms")
			.and_then(|v| v.as_integer())
			.unwrap_or(DEFAULT_TIMEOUT_MS as i64) as u64;

		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(timeout_ms))
			.build()
			.map_err(|e| Bip70Error::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

		Ok(Self { client })
	}
}

/// Unmarshals a fetched payload into URI fields.
///
/// Failures here mean the request content is unusable, which for live
/// servers almost always means it expired and the server replaced it.
fn unmarshal_payment_request(bytes: &[u8]) -> Result<PaymentUri, Bip70Error> {
	let payload: PaymentRequestPayload =
		serde_json::from_slice(bytes).map_err(|e| Bip70Error::Unmarshal(e.to_string()))?;

	Ok(PaymentUri {
		address: payload.address,
		label: payload.label,
		message: payload.memo,
		amount: payload.amount,
		expires_time: payload.expires.map(|e| e.to_string()),
		payment_request_url: None,
	})
}

#[async_trait]
impl Bip70Interface for HttpBip70 {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(HttpBip70Schema)
	}

	async fn fetch_payment_request(&self, url: &str) -> Result<PaymentUri, Bip70Error> {
		debug!(%url, "fetching legacy payment request");

		let response = self
			.client
			.get(url)
			.header(ACCEPT, PAYMENT_REQUEST_MIME)
			.send()
			.await
			.map_err(|e| Bip70Error::Network(e.to_string()))?;
		if !response.status().is_success() {
			return Err(Bip70Error::Status(response.status().as_u16()));
		}

		let bytes = response
			.bytes()
			.await
			.map_err(|e| Bip70Error::Network(e.to_string()))?;
		unmarshal_payment_request(&bytes)
	}
}

/// Configuration schema for the HTTP payment-request implementation.
pub struct HttpBip70Schema;

impl ConfigSchema for HttpBip70Schema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(vec![], vec![Field::new("timeout_ms", FieldType::Integer)]).validate(config)
	}
}

/// Registry for the HTTP payment-request implementation.
pub struct HttpBip70Registry;

impl ImplementationRegistry for HttpBip70Registry {
	const NAME: &'static str = "http";
	type Factory = Bip70Factory;

	fn factory() -> Self::Factory {
		create_http_bip70
	}
}

impl Bip70Registry for HttpBip70Registry {}

/// Factory function for creating HttpBip70 instances.
pub fn create_http_bip70(config: &toml::Value) -> Result<Box<dyn Bip70Interface>, Bip70Error> {
	Ok(Box::new(HttpBip70::new(config)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::UNMARSHAL_FAILURE_SIGNATURE;
	use std::str::FromStr;

	#[test]
	fn test_unmarshal_well_formed_payload() {
		let payload = br#"{
			"address": "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
			"amount": "0.001",
			"memo": "order #42",
			"expires": 1700000000
		}"#;
		let uri = unmarshal_payment_request(payload).unwrap();
		assert_eq!(
			uri.address.as_deref(),
			Some("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq")
		);
		assert_eq!(uri.amount, Some(Decimal::from_str("0.001").unwrap()));
		assert_eq!(uri.message.as_deref(), Some("order #42"));
		assert_eq!(uri.expires_time.as_deref(), Some("1700000000"));
		assert_eq!(uri.payment_request_url, None);
	}

	#[test]
	fn test_unmarshal_failure_carries_signature() {
		let err = unmarshal_payment_request(b"\x00\x01not json").unwrap_err();
		assert!(err.to_string().contains(UNMARSHAL_FAILURE_SIGNATURE));
	}

	#[test]
	fn test_unmarshal_allows_sparse_payloads() {
		let uri = unmarshal_payment_request(b"{}").unwrap();
		assert!(!uri.has_address());
		assert_eq!(uri.amount, None);
	}
}
