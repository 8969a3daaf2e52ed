//! Legacy payment-request fetch module for the payflow wallet core.
//!
//! Some payment URIs carry a URL pointing at a BIP70-style payment request
//! whose contents supersede the URI's own fields. This module covers only
//! the request-fetch exchange and its failure modes; the rest of the legacy
//! protocol is out of scope.

use async_trait::async_trait;
use payflow_types::{ConfigSchema, ImplementationRegistry, PaymentUri};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

/// Message signature carried by fetch failures whose payload could not be
/// unmarshalled. Address resolution matches on it to detect expired
/// requests, so the wording must stay byte-for-byte stable.
pub const UNMARSHAL_FAILURE_SIGNATURE: &str = "Failed to Unmarshall paymentRequest";

/// Errors that can occur while fetching a legacy payment request.
#[derive(Debug, Error)]
pub enum Bip70Error {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the server answers outside the 2xx range.
	#[error("Request returned status {0}")]
	Status(u16),
	/// Error that occurs when the fetched payload cannot be unmarshalled.
	/// Expired requests surface this way.
	#[error("{UNMARSHAL_FAILURE_SIGNATURE}: {0}")]
	Unmarshal(String),
	/// Error that occurs when the implementation configuration is invalid.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Trait defining the interface for payment-request fetch implementations.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait Bip70Interface: Send + Sync {
	/// Returns the configuration schema for this implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Fetches and unmarshals the payment request behind the URL.
	///
	/// The result carries the same fields as a directly-parsed URI; on
	/// success those fields replace the original URI's payment data.
	async fn fetch_payment_request(&self, url: &str) -> Result<PaymentUri, Bip70Error>;
}

/// Type alias for payment-request fetch factory functions.
pub type Bip70Factory = fn(&toml::Value) -> Result<Box<dyn Bip70Interface>, Bip70Error>;

/// Registry trait for payment-request fetch implementations.
pub trait Bip70Registry: ImplementationRegistry<Factory = Bip70Factory> {}

/// Get all registered payment-request fetch implementations.
pub fn get_all_implementations() -> Vec<(&'static str, Bip70Factory)> {
	use implementations::http;
	vec![(
		http::HttpBip70Registry::NAME,
		http::HttpBip70Registry::factory(),
	)]
}

/// Service that manages legacy payment-request fetches.
pub struct Bip70Service {
	/// The configured fetch implementation.
	implementation: Box<dyn Bip70Interface>,
}

impl Bip70Service {
	/// Creates a new Bip70Service with the specified implementation.
	pub fn new(implementation: Box<dyn Bip70Interface>) -> Self {
		Self { implementation }
	}

	/// Fetches and unmarshals the payment request behind the URL.
	pub async fn fetch_payment_request(&self, url: &str) -> Result<PaymentUri, Bip70Error> {
		self.implementation.fetch_payment_request(url).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unmarshal_error_carries_signature() {
		let err = Bip70Error::Unmarshal("unexpected end of input".to_string());
		assert!(err.to_string().contains(UNMARSHAL_FAILURE_SIGNATURE));
	}
}
