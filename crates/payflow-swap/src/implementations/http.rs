//! HTTP swap negotiation implementation.
//!
//! Posts the raw invoice to the swap service and decodes either the
//! negotiated swap or the service's rejection code.

use crate::{SwapError, SwapFactory, SwapInterface, SwapRegistry, SwapRejection};
use async_trait::async_trait;
use payflow_types::{
	ConfigSchema, Field, FieldType, FundingOutput, ImplementationRegistry, Schema, SubmarineSwap,
	SwapReceiver, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// HTTP swap negotiation implementation.
#[derive(Debug)]
pub struct HttpSwapClient {
	client: reqwest::Client,
	base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateSwapRequest<'a> {
	invoice: &'a str,
}

/// A negotiated swap as served by the service.
#[derive(Debug, Deserialize)]
struct CreateSwapResponse {
	receiver: ReceiverPayload,
	funding_output: FundingOutputPayload,
	#[serde(default)]
	will_pre_open_channel: bool,
}

#[derive(Debug, Deserialize)]
struct ReceiverPayload {
	alias: Option<String>,
	public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FundingOutputPayload {
	confirmations_needed: u32,
}

/// A rejection as served by the service.
#[derive(Debug, Deserialize)]
struct RejectionPayload {
	code: String,
	#[serde(default)]
	message: Option<String>,
}

impl From<CreateSwapResponse> for SubmarineSwap {
	fn from(response: CreateSwapResponse) -> Self {
		SubmarineSwap {
			receiver: SwapReceiver {
				alias: response.receiver.alias,
				public_key: response.receiver.public_key,
			},
			funding_output: FundingOutput {
				confirmations_needed: response.funding_output.confirmations_needed,
			},
			will_pre_open_channel: response.will_pre_open_channel,
		}
	}
}

impl HttpSwapClient {
	/// Creates a new HttpSwapClient instance with configuration.
	pub fn new(config: &toml::Value) -> Result<Self, SwapError> {
		HttpSwapSchema
			.validate(config)
			.map_err(|e| SwapError::InvalidConfig(e.to_string()))?;

		let base_url = config
			.get("base_url")
			.and_then(|v| v.as_str())
			.ok_or_else(|| SwapError::InvalidConfig("base_url is required".to_string()))?
			.trim_end_matches('/')
			.to_string();
		let timeout_ms = config
			.get("timeout_ms")
			.and_then(|v| v.as_integer())
			.unwrap_or(DEFAULT_TIMEOUT_MS as i64) as u64;

		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(timeout_ms))
			.build()
			.map_err(|e| SwapError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

		Ok(Self { client, base_url })
	}
}

/// Decodes a rejection body into its kind.
///
/// A client-error status with an undecodable body still counts as a
/// response from the service, just one this client cannot interpret.
fn decode_rejection(status: u16, body: &[u8]) -> SwapError {
	match serde_json::from_slice::<RejectionPayload>(body) {
		Ok(rejection) => {
			debug!(
				code = %rejection.code,
				message = rejection.message.as_deref().unwrap_or(""),
				"swap service rejected invoice"
			);
			SwapError::Rejected(SwapRejection::from_code(&rejection.code))
		},
		Err(e) => SwapError::InvalidResponse(format!(
			"undecodable rejection body for status {status}: {e}"
		)),
	}
}

#[async_trait]
impl SwapInterface for HttpSwapClient {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(HttpSwapSchema)
	}

	async fn create_swap(&self, raw_invoice: &str) -> Result<SubmarineSwap, SwapError> {
		let url = format!("{}/swaps", self.base_url);
		debug!(%url, "negotiating submarine swap");

		let response = self
			.client
			.post(&url)
			.json(&CreateSwapRequest {
				invoice: raw_invoice,
			})
			.send()
			.await
			.map_err(|e| SwapError::Network(e.to_string()))?;

		let status = response.status();
		if status.is_client_error() {
			let body = response
				.bytes()
				.await
				.map_err(|e| SwapError::Network(e.to_string()))?;
			return Err(decode_rejection(status.as_u16(), &body));
		}
		if !status.is_success() {
			return Err(SwapError::Network(format!(
				"swap service returned status {status}"
			)));
		}

		let swap = response
			.json::<CreateSwapResponse>()
			.await
			.map_err(|e| SwapError::InvalidResponse(e.to_string()))?;
		Ok(swap.into())
	}
}

/// Configuration schema for the HTTP swap implementation.
pub struct HttpSwapSchema;

impl ConfigSchema for HttpSwapSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(
			vec![Field::new("base_url", FieldType::String)],
			vec![Field::new("timeout_ms", FieldType::Integer)],
		)
		.validate(config)
	}
}

/// Registry for the HTTP swap implementation.
pub struct HttpSwapRegistry;

impl ImplementationRegistry for HttpSwapRegistry {
	const NAME: &'static str = "http";
	type Factory = SwapFactory;

	fn factory() -> Self::Factory {
		create_http_swap_client
	}
}

impl SwapRegistry for HttpSwapRegistry {}

/// Factory function for creating HttpSwapClient instances.
pub fn create_http_swap_client(
	config: &toml::Value,
) -> Result<Box<dyn SwapInterface>, SwapError> {
	Ok(Box::new(HttpSwapClient::new(config)?))
}
