//! Mempool-based fee implementation for production use.
//!
//! Fetches recommended fee rates from a mempool.space-compatible endpoint
//! and maps them onto the wallet's confirmation targets.

use crate::{FeeError, FeeFactory, FeeInterface, FeeRegistry};
use async_trait::async_trait;
use payflow_types::{
	ConfigSchema, FeeInfo, FeeRate, Field, FieldType, ImplementationRegistry, Schema,
	ValidationError,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://mempool.space";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Mempool-based fee implementation.
pub struct MempoolFees {
	client: reqwest::Client,
	base_url: String,
}

/// Recommended fee rates as served by the endpoint, in sat/vB.
#[derive(Debug, Clone, Deserialize)]
struct RecommendedFees {
	#[serde(rename = "fastestFee")]
	fastest_fee: f64,
	#[serde(rename = "halfHourFee")]
	half_hour_fee: f64,
	#[serde(rename = "hourFee")]
	hour_fee: f64,
}

impl MempoolFees {
	/// Creates a new MempoolFees instance with configuration.
	pub fn new(config: &toml::Value) -> Result<Self, FeeError> {
		MempoolFeeSchema
			.validate(config)
			.map_err(|e| FeeError::InvalidConfig(e.to_string()))?;

		let base_url = config
			.get("base_url")
			.and_then(|v| v.as_str())
			.unwrap_or(DEFAULT_BASE_URL)
			.trim_end_matches('/')
			.to_string();
		let timeout_ms = config
			.get("timeout_ms")
			.and_then(|v| v.as_integer())
			.unwrap_or(DEFAULT_TIMEOUT_MS as i64) as u64;

		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(timeout_ms))
			.build()
			.map_err(|e| FeeError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

		Ok(Self { client, base_url })
	}

	async fn fetch_recommended(&self) -> Result<RecommendedFees, FeeError> {
		let url = format!("{}/api/v1/fees/recommended", self.base_url);
		debug!(%url, "fetching recommended fee rates");

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| FeeError::Network(e.to_string()))?;
		if !response.status().is_success() {
			return Err(FeeError::Network(format!(
				"fee endpoint returned status {}",
				response.status()
			)));
		}
		response
			.json::<RecommendedFees>()
			.await
			.map_err(|e| FeeError::InvalidData(e.to_string()))
	}
}

fn fee_options(recommended: &RecommendedFees, is_swap: bool) -> Result<FeeInfo, FeeError> {
	let rate = |target: u32, sat_per_vbyte: f64| -> Result<FeeRate, FeeError> {
		let sat_per_vbyte = Decimal::from_f64(sat_per_vbyte)
			.ok_or_else(|| FeeError::InvalidData(format!("unusable rate {sat_per_vbyte}")))?;
		Ok(FeeRate {
			confirmation_target: target,
			sat_per_vbyte,
		})
	};

	// Swap funding has to confirm before the provider claims it, so only
	// the fastest tier is offered there.
	let options = if is_swap {
		vec![rate(1, recommended.fastest_fee)?]
	} else {
		vec![
			rate(1, recommended.fastest_fee)?,
			rate(3, recommended.half_hour_fee)?,
			rate(6, recommended.hour_fee)?,
		]
	};
	Ok(FeeInfo { options })
}

#[async_trait]
impl FeeInterface for MempoolFees {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MempoolFeeSchema)
	}

	async fn estimate(&self, is_swap: bool) -> Result<FeeInfo, FeeError> {
		let recommended = self.fetch_recommended().await?;
		fee_options(&recommended, is_swap)
	}
}

/// Configuration schema for the mempool fee implementation.
pub struct MempoolFeeSchema;

impl ConfigSchema for MempoolFeeSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(
			vec![],
			vec![
				Field::new("base_url", FieldType::String),
				Field::new("timeout_ms", FieldType::Integer),
			],
		)
		.validate(config)
	}
}

/// Registry for the mempool fee implementation.
pub struct MempoolFeeRegistry;

impl ImplementationRegistry for MempoolFeeRegistry {
	const NAME: &'static str = "mempool";
	type Factory = FeeFactory;

	fn factory() -> Self::Factory {
		create_mempool_fees
	}
}

impl FeeRegistry for MempoolFeeRegistry {}

/// Factory function for creating MempoolFees instances.
pub fn create_mempool_fees(config: &toml::Value) -> Result<Box<dyn FeeInterface>, FeeError> {
	Ok(Box::new(MempoolFees::new(config)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_recommended() -> RecommendedFees {
		serde_json::from_str(
			r#"{"fastestFee": 42.0, "halfHourFee": 21, "hourFee": 10.5, "economyFee": 4, "minimumFee": 1}"#,
		)
		.unwrap()
	}

	#[test]
	fn test_decodes_endpoint_payload() {
		let recommended = create_test_recommended();
		assert_eq!(recommended.fastest_fee, 42.0);
		assert_eq!(recommended.half_hour_fee, 21.0);
		assert_eq!(recommended.hour_fee, 10.5);
	}

	#[test]
	fn test_ordinary_send_gets_three_tiers() {
		let info = fee_options(&create_test_recommended(), false).unwrap();
		let targets: Vec<u32> = info.options.iter().map(|o| o.confirmation_target).collect();
		assert_eq!(targets, vec![1, 3, 6]);
	}

	#[test]
	fn test_swap_gets_only_fastest_tier() {
		let info = fee_options(&create_test_recommended(), true).unwrap();
		assert_eq!(info.options.len(), 1);
		assert_eq!(info.options[0].confirmation_target, 1);
		assert_eq!(info.options[0].sat_per_vbyte, Decimal::from(42));
	}

	#[test]
	fn test_base_url_trailing_slash_is_trimmed() {
		let config: toml::Value = toml::from_str(
			r#"
			base_url = "https://mempool.example.com/"
			"#,
		)
		.unwrap();
		let fees = MempoolFees::new(&config).unwrap();
		assert_eq!(fees.base_url, "https://mempool.example.com");
	}
}
