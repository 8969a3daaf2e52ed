//! Account/profile snapshot consumed by the resolution core.

use serde::{Deserialize, Serialize};

/// The resolved account context for a payment.
///
/// Supplied by the account collaborator and consumed read-only; storage and
/// session semantics live outside the resolution core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	/// Stable account identifier.
	pub id: String,
	/// Verified email, when the account has one.
	pub email: Option<String>,
	/// Currency code the account displays amounts in.
	pub primary_currency: String,
}
