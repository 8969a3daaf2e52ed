//! Common types module for the payflow wallet core.
//!
//! This module defines the core data types and structures shared by the
//! payment resolution components. It provides a centralized location for
//! domain types to ensure consistency across all collaborator crates.

/// Account/profile snapshot consumed by the resolution core.
pub mod account;
/// Bitcoin amount types.
pub mod amount;
/// The closed error taxonomy reported to callers.
pub mod errors;
/// Fee-rate types supplied by the fee estimation collaborator.
pub mod fees;
/// Payment intents and their pre-resolution payloads.
pub mod intent;
/// The normalized payment descriptor produced by resolution.
pub mod request;
/// Submarine swap types negotiated with the swap service.
pub mod swap;
/// String formatting utilities.
pub mod utils;
/// Configuration validation types for type-safe implementation settings.
pub mod validation;

/// Registry trait for self-registering implementations.
pub mod registry;

// Re-export all types for convenient access
pub use account::Account;
pub use amount::{Satoshis, MSATS_PER_SATOSHI, SATOSHIS_PER_BITCOIN};
pub use errors::PaymentError;
pub use fees::{FeeInfo, FeeRate};
pub use intent::{DecodedInvoice, PaymentIntent, PaymentUri};
pub use registry::ImplementationRegistry;
pub use request::{FlowSubmarineSwap, FlowToAddress, PaymentRequest};
pub use swap::{FundingOutput, SubmarineSwap, SwapReceiver};
pub use utils::truncate_destination;
pub use validation::{ConfigSchema, Field, FieldType, Schema, ValidationError};
