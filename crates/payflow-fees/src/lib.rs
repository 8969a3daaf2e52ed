//! Fee estimation module for the payflow wallet core.
//!
//! This module abstracts the wallet's fee-rate source. Resolution needs a
//! set of fee-rate options before a payment can be presented, and swap
//! funding prices differently from an ordinary send, so the interface is
//! parameterized by the destination kind.

use async_trait::async_trait;
use payflow_types::{ConfigSchema, FeeInfo, ImplementationRegistry};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod fixed;
	pub mod mempool;
}

/// Errors that can occur during fee estimation.
#[derive(Debug, Error)]
pub enum FeeError {
	/// Error that occurs during network communication with the fee source.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the fee source returns unusable data.
	#[error("Invalid fee data: {0}")]
	InvalidData(String),
	/// Error that occurs when the implementation configuration is invalid.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Trait defining the interface for fee estimation implementations.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait FeeInterface: Send + Sync {
	/// Returns the configuration schema for this fee implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Estimates fee-rate options for one payment.
	///
	/// Swap funding must confirm before the provider claims it, so the swap
	/// fee model differs from the ordinary-send model.
	async fn estimate(&self, is_swap: bool) -> Result<FeeInfo, FeeError>;
}

/// Type alias for fee factory functions.
pub type FeeFactory = fn(&toml::Value) -> Result<Box<dyn FeeInterface>, FeeError>;

/// Registry trait for fee implementations.
pub trait FeeRegistry: ImplementationRegistry<Factory = FeeFactory> {}

/// Get all registered fee implementations.
pub fn get_all_implementations() -> Vec<(&'static str, FeeFactory)> {
	use implementations::{fixed, mempool};
	vec![
		(fixed::FixedFeeRegistry::NAME, fixed::FixedFeeRegistry::factory()),
		(
			mempool::MempoolFeeRegistry::NAME,
			mempool::MempoolFeeRegistry::factory(),
		),
	]
}

/// Service that manages fee estimation for the resolution core.
pub struct FeeService {
	/// The configured fee implementation.
	implementation: Box<dyn FeeInterface>,
}

impl FeeService {
	/// Creates a new FeeService with the specified implementation.
	pub fn new(implementation: Box<dyn FeeInterface>) -> Self {
		Self { implementation }
	}

	/// Estimates fee-rate options for one payment.
	pub async fn estimate(&self, is_swap: bool) -> Result<FeeInfo, FeeError> {
		self.implementation.estimate(is_swap).await
	}
}
