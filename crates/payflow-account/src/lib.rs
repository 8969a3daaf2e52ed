//! Account lookup module for the payflow wallet core.
//!
//! Resolution needs the account context alongside the resolved destination
//! before a payment can be presented. Storage and session semantics live in
//! the implementations; the core only ever sees a read-only snapshot.

use async_trait::async_trait;
use payflow_types::{Account, ConfigSchema, ImplementationRegistry};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Errors that can occur during account lookup.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when no account is available.
	#[error("No account available")]
	NotAvailable,
	/// Error that occurs when interacting with the account store.
	#[error("Store error: {0}")]
	Store(String),
	/// Error that occurs when the implementation configuration is invalid.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Trait defining the interface for account implementations.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AccountInterface: Send + Sync {
	/// Returns the configuration schema for this account implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Retrieves the current account snapshot.
	async fn lookup(&self) -> Result<Account, AccountError>;
}

/// Type alias for account factory functions.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Registry trait for account implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {}

/// Get all registered account implementations.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory)> {
	use implementations::memory;
	vec![(
		memory::MemoryAccountRegistry::NAME,
		memory::MemoryAccountRegistry::factory(),
	)]
}

/// Service that manages account lookup for the resolution core.
pub struct AccountService {
	/// The configured account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the current account snapshot.
	pub async fn lookup(&self) -> Result<Account, AccountError> {
		self.implementation.lookup().await
	}
}
