//! In-memory account implementation.
//!
//! Serves a fixed account snapshot from configuration. Useful in tests and
//! in deployments where the session layer injects the profile at startup.

use crate::{AccountError, AccountFactory, AccountInterface, AccountRegistry};
use async_trait::async_trait;
use payflow_types::{
	Account, ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError,
};

/// In-memory account implementation with a configured snapshot.
#[derive(Debug)]
pub struct MemoryAccount {
	account: Account,
}

impl MemoryAccount {
	/// Creates a new MemoryAccount instance with configuration.
	pub fn new(config: &toml::Value) -> Result<Self, AccountError> {
		MemoryAccountSchema
			.validate(config)
			.map_err(|e| AccountError::InvalidConfig(e.to_string()))?;

		let id = config
			.get("id")
			.and_then(|v| v.as_str())
			.ok_or_else(|| AccountError::InvalidConfig("id is required".to_string()))?
			.to_string();
		let email = config
			.get("email")
			.and_then(|v| v.as_str())
			.map(str::to_string);
		let primary_currency = config
			.get("primary_currency")
			.and_then(|v| v.as_str())
			.unwrap_or("BTC")
			.to_string();

		Ok(Self {
			account: Account {
				id,
				email,
				primary_currency,
			},
		})
	}
}

#[async_trait]
impl AccountInterface for MemoryAccount {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryAccountSchema)
	}

	async fn lookup(&self) -> Result<Account, AccountError> {
		Ok(self.account.clone())
	}
}

/// Configuration schema for the in-memory account implementation.
pub struct MemoryAccountSchema;

impl ConfigSchema for MemoryAccountSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(
			vec![Field::new("id", FieldType::String)],
			vec![
				Field::new("email", FieldType::String),
				Field::new("primary_currency", FieldType::String),
			],
		)
		.validate(config)
	}
}

/// Registry for the in-memory account implementation.
pub struct MemoryAccountRegistry;

impl ImplementationRegistry for MemoryAccountRegistry {
	const NAME: &'static str = "memory";
	type Factory = AccountFactory;

	fn factory() -> Self::Factory {
		create_memory_account
	}
}

impl AccountRegistry for MemoryAccountRegistry {}

/// Factory function for creating MemoryAccount instances.
pub fn create_memory_account(
	config: &toml::Value,
) -> Result<Box<dyn AccountInterface>, AccountError> {
	Ok(Box::new(MemoryAccount::new(config)?))
}
