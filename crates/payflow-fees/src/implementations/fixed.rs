//! Fixed fee implementation for development and testing.
//!
//! Serves configured fee-rate tables without touching the network. A
//! separate table applies to swap funding; when none is configured the
//! ordinary table is reused.

use crate::{FeeError, FeeFactory, FeeInterface, FeeRegistry};
use async_trait::async_trait;
use payflow_types::{
	ConfigSchema, FeeInfo, FeeRate, Field, FieldType, ImplementationRegistry, Schema,
	ValidationError,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Fixed fee implementation with configured rate tables.
#[derive(Debug)]
pub struct FixedFees {
	/// Options for ordinary sends.
	rates: Vec<FeeRate>,
	/// Options for swap funding.
	swap_rates: Vec<FeeRate>,
}

impl FixedFees {
	/// Creates a new FixedFees instance with configuration.
	pub fn new(config: &toml::Value) -> Result<Self, FeeError> {
		FixedFeeSchema
			.validate(config)
			.map_err(|e| FeeError::InvalidConfig(e.to_string()))?;

		let rates = match config.get("rates") {
			Some(value) => parse_rates("rates", value)?,
			None => default_rates(),
		};
		let swap_rates = match config.get("swap_rates") {
			Some(value) => parse_rates("swap_rates", value)?,
			None => rates.clone(),
		};

		Ok(Self { rates, swap_rates })
	}
}

fn default_rates() -> Vec<FeeRate> {
	vec![
		FeeRate {
			confirmation_target: 1,
			sat_per_vbyte: Decimal::from(45),
		},
		FeeRate {
			confirmation_target: 6,
			sat_per_vbyte: Decimal::from(10),
		},
		FeeRate {
			confirmation_target: 24,
			sat_per_vbyte: Decimal::from(2),
		},
	]
}

fn parse_rates(field: &str, value: &toml::Value) -> Result<Vec<FeeRate>, FeeError> {
	let entries = value
		.as_array()
		.ok_or_else(|| FeeError::InvalidConfig(format!("{field} must be an array of tables")))?;

	let mut rates = Vec::with_capacity(entries.len());
	for entry in entries {
		let confirmation_target = entry
			.get("confirmation_target")
			.and_then(|v| v.as_integer())
			.ok_or_else(|| {
				FeeError::InvalidConfig(format!("{field} entries need a confirmation_target"))
			})? as u32;
		let sat_per_vbyte = entry
			.get("sat_per_vbyte")
			.and_then(decimal_from_value)
			.ok_or_else(|| {
				FeeError::InvalidConfig(format!("{field} entries need a numeric sat_per_vbyte"))
			})?;
		rates.push(FeeRate {
			confirmation_target,
			sat_per_vbyte,
		});
	}

	if rates.is_empty() {
		return Err(FeeError::InvalidConfig(format!("{field} must not be empty")));
	}
	Ok(rates)
}

fn decimal_from_value(value: &toml::Value) -> Option<Decimal> {
	match value {
		toml::Value::Integer(n) => Some(Decimal::from(*n)),
		toml::Value::Float(f) => Decimal::from_f64(*f),
		_ => None,
	}
}

#[async_trait]
impl FeeInterface for FixedFees {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FixedFeeSchema)
	}

	async fn estimate(&self, is_swap: bool) -> Result<FeeInfo, FeeError> {
		let options = if is_swap {
			self.swap_rates.clone()
		} else {
			self.rates.clone()
		};
		Ok(FeeInfo { options })
	}
}

/// Configuration schema for the fixed fee implementation.
pub struct FixedFeeSchema;

impl ConfigSchema for FixedFeeSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(
			vec![],
			vec![
				Field::new("rates", FieldType::Array),
				Field::new("swap_rates", FieldType::Array),
			],
		)
		.validate(config)
	}
}

/// Registry for the fixed fee implementation.
pub struct FixedFeeRegistry;

impl ImplementationRegistry for FixedFeeRegistry {
	const NAME: &'static str = "fixed";
	type Factory = FeeFactory;

	fn factory() -> Self::Factory {
		create_fixed_fees
	}
}

impl FeeRegistry for FixedFeeRegistry {}

/// Factory function for creating FixedFees instances.
pub fn create_fixed_fees(config: &toml::Value) -> Result<Box<dyn FeeInterface>, FeeError> {
	Ok(Box::new(FixedFees::new(config)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn empty_config() -> toml::Value {
		toml::Value::Table(toml::map::Map::new())
	}

	#[tokio::test]
	async fn test_defaults_when_unconfigured() {
		let fees = FixedFees::new(&empty_config()).unwrap();
		let info = fees.estimate(false).await.unwrap();
		assert_eq!(info.options.len(), 3);
		assert_eq!(info.fastest().unwrap().confirmation_target, 1);

		// Swap table falls back to the ordinary table.
		let swap_info = fees.estimate(true).await.unwrap();
		assert_eq!(swap_info, info);
	}

	#[tokio::test]
	async fn test_configured_swap_table_is_separate() {
		let config: toml::Value = toml::from_str(
			r#"
			[[rates]]
			confirmation_target = 1
			sat_per_vbyte = 40.0

			[[swap_rates]]
			confirmation_target = 1
			sat_per_vbyte = 55.5
			"#,
		)
		.unwrap();
		let fees = FixedFees::new(&config).unwrap();

		let ordinary = fees.estimate(false).await.unwrap();
		let swap = fees.estimate(true).await.unwrap();
		assert_ne!(ordinary, swap);
		assert_eq!(swap.options.len(), 1);
	}

	#[test]
	fn test_rejects_malformed_rate_entry() {
		let config: toml::Value = toml::from_str(
			r#"
			[[rates]]
			confirmation_target = 1
			"#,
		)
		.unwrap();
		let err = FixedFees::new(&config).unwrap_err();
		assert!(matches!(err, FeeError::InvalidConfig(_)));
	}

	#[test]
	fn test_rejects_empty_rate_table() {
		let config: toml::Value = toml::from_str("rates = []").unwrap();
		let err = FixedFees::new(&config).unwrap_err();
		assert!(matches!(err, FeeError::InvalidConfig(_)));
	}
}
