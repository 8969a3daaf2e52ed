//! Fee-rate types supplied by the fee estimation collaborator.
//!
//! The resolution core consumes these read-only; how they are produced is
//! the fee implementation's concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single fee-rate choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRate {
	/// Blocks within which the payment is expected to confirm.
	pub confirmation_target: u32,
	/// Fee rate in satoshis per virtual byte.
	pub sat_per_vbyte: Decimal,
}

/// The set of fee-rate options offered for one payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeInfo {
	/// Options ordered however the source provides them.
	pub options: Vec<FeeRate>,
}

impl FeeInfo {
	/// The option with the lowest confirmation target, when any exist.
	pub fn fastest(&self) -> Option<&FeeRate> {
		self.options.iter().min_by_key(|o| o.confirmation_target)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fastest_picks_lowest_target() {
		let info = FeeInfo {
			options: vec![
				FeeRate {
					confirmation_target: 6,
					sat_per_vbyte: Decimal::from(10),
				},
				FeeRate {
					confirmation_target: 1,
					sat_per_vbyte: Decimal::from(45),
				},
			],
		};
		assert_eq!(info.fastest().unwrap().confirmation_target, 1);
		assert_eq!(FeeInfo::default().fastest(), None);
	}
}
