//! Bitcoin amount types.
//!
//! Amounts cross three unit systems on their way through resolution: URIs
//! carry decimal bitcoin, invoices carry milli-satoshis, and everything
//! downstream works in whole satoshis.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of satoshis in one bitcoin.
pub const SATOSHIS_PER_BITCOIN: i64 = 100_000_000;

/// Number of milli-satoshis in one satoshi.
pub const MSATS_PER_SATOSHI: i64 = 1_000;

/// An amount of bitcoin expressed in whole satoshis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Satoshis(pub i64);

impl Satoshis {
	pub const ZERO: Satoshis = Satoshis(0);

	/// Converts a decimal bitcoin amount, truncating sub-satoshi precision.
	pub fn from_btc(btc: Decimal) -> Self {
		let sats = (btc * Decimal::from(SATOSHIS_PER_BITCOIN)).trunc();
		Satoshis(sats.to_i64().unwrap_or(i64::MAX))
	}

	/// Floor-divides a milli-satoshi amount down to whole satoshis.
	pub fn from_milli_sats(msats: i64) -> Self {
		Satoshis(msats / MSATS_PER_SATOSHI)
	}

	pub fn value(&self) -> i64 {
		self.0
	}
}

impl fmt::Display for Satoshis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} sat", self.0)
	}
}
