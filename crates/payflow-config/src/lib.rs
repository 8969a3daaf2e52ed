//! Configuration module for the payflow wallet core.
//!
//! A single TOML document selects one implementation per collaborator and
//! carries an opaque settings table for each. The tables are validated by
//! the implementations themselves at construction time; this module only
//! parses the outer shape.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs when the file cannot be read.
	#[error("Failed to read configuration: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when the document cannot be parsed.
	#[error("Failed to parse configuration: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Selects and parameterizes one collaborator implementation.
#[derive(Debug, Clone, Deserialize)]
pub struct ImplementationConfig {
	/// Name the implementation registered under.
	pub implementation: String,
	/// Opaque settings table handed to the implementation factory.
	#[serde(default = "empty_table")]
	pub config: toml::Value,
}

fn empty_table() -> toml::Value {
	toml::Value::Table(toml::map::Map::new())
}

/// Top-level configuration for the resolution core.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// Fee estimation collaborator.
	pub fees: ImplementationConfig,
	/// Account lookup collaborator.
	pub account: ImplementationConfig,
	/// Swap negotiation collaborator.
	pub swaps: ImplementationConfig,
	/// Legacy payment-request fetch collaborator.
	pub payment_requests: ImplementationConfig,
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let raw = fs::read_to_string(path)?;
		Ok(raw.parse()?)
	}
}

impl FromStr for Config {
	type Err = toml::de::Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		toml::from_str(raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"
		[fees]
		implementation = "fixed"

		[account]
		implementation = "memory"
		config = { id = "user-1" }

		[swaps]
		implementation = "http"
		config = { base_url = "https://swaps.example.com" }

		[payment_requests]
		implementation = "http"
	"#;

	#[test]
	fn test_parses_sample_document() {
		let config: Config = SAMPLE.parse().unwrap();
		assert_eq!(config.fees.implementation, "fixed");
		assert_eq!(config.swaps.implementation, "http");
		assert_eq!(
			config.swaps.config.get("base_url").and_then(|v| v.as_str()),
			Some("https://swaps.example.com")
		);
	}

	#[test]
	fn test_settings_table_defaults_to_empty() {
		let config: Config = SAMPLE.parse().unwrap();
		assert!(config
			.fees
			.config
			.as_table()
			.is_some_and(|t| t.is_empty()));
	}

	#[test]
	fn test_missing_section_is_rejected() {
		let err = "[fees]\nimplementation = \"fixed\"".parse::<Config>();
		assert!(err.is_err());
	}
}
