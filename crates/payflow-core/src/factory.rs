//! Service construction from configuration.
//!
//! Looks each configured implementation name up in its crate's registry and
//! invokes the factory with the implementation's settings table. Unknown
//! names and rejected settings both fail here, before any attempt runs.

use crate::loader::PaymentLoader;
use payflow_account::AccountService;
use payflow_bip70::Bip70Service;
use payflow_config::{Config, ImplementationConfig};
use payflow_fees::FeeService;
use payflow_swap::SwapService;
use thiserror::Error;

/// Errors that can occur while building services from configuration.
#[derive(Debug, Error)]
pub enum FactoryError {
	/// Error that occurs when no implementation registers under the name.
	#[error("Unknown {section} implementation '{name}'")]
	UnknownImplementation { section: &'static str, name: String },
	/// Error that occurs when an implementation rejects its settings.
	#[error("Failed to build {section}: {message}")]
	Build { section: &'static str, message: String },
}

fn find_factory<F>(
	section: &'static str,
	implementations: Vec<(&'static str, F)>,
	selection: &ImplementationConfig,
) -> Result<F, FactoryError> {
	implementations
		.into_iter()
		.find(|(name, _)| *name == selection.implementation)
		.map(|(_, factory)| factory)
		.ok_or_else(|| FactoryError::UnknownImplementation {
			section,
			name: selection.implementation.clone(),
		})
}

/// Builds a payment loader wired with the configured implementations.
pub fn build_loader(config: &Config) -> Result<PaymentLoader, FactoryError> {
	let fee_factory = find_factory("fees", payflow_fees::get_all_implementations(), &config.fees)?;
	let fees = fee_factory(&config.fees.config).map_err(|e| FactoryError::Build {
		section: "fees",
		message: e.to_string(),
	})?;

	let account_factory = find_factory(
		"account",
		payflow_account::get_all_implementations(),
		&config.account,
	)?;
	let account = account_factory(&config.account.config).map_err(|e| FactoryError::Build {
		section: "account",
		message: e.to_string(),
	})?;

	let swap_factory = find_factory(
		"swaps",
		payflow_swap::get_all_implementations(),
		&config.swaps,
	)?;
	let swaps = swap_factory(&config.swaps.config).map_err(|e| FactoryError::Build {
		section: "swaps",
		message: e.to_string(),
	})?;

	let bip70_factory = find_factory(
		"payment_requests",
		payflow_bip70::get_all_implementations(),
		&config.payment_requests,
	)?;
	let payment_requests =
		bip70_factory(&config.payment_requests.config).map_err(|e| FactoryError::Build {
			section: "payment_requests",
			message: e.to_string(),
		})?;

	Ok(PaymentLoader::new(
		FeeService::new(fees),
		AccountService::new(account),
		SwapService::new(swaps),
		Bip70Service::new(payment_requests),
	))
}
