//! Configuration validation types for type-safe implementation settings.
//!
//! Every collaborator implementation is parameterized by an opaque TOML
//! table. This module provides the small schema framework implementations
//! use to validate their table before construction, with field-level error
//! reporting.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Represents the type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value.
	Integer,
	/// A floating point value (integers are accepted too).
	Float,
	/// A boolean value.
	Boolean,
	/// An array of values.
	Array,
	/// A nested table.
	Table,
}

impl FieldType {
	fn matches(&self, value: &toml::Value) -> bool {
		match self {
			FieldType::String => value.is_str(),
			FieldType::Integer => value.is_integer(),
			FieldType::Float => value.is_float() || value.is_integer(),
			FieldType::Boolean => value.is_bool(),
			FieldType::Array => value.is_array(),
			FieldType::Table => value.is_table(),
		}
	}

	fn name(&self) -> &'static str {
		match self {
			FieldType::String => "string",
			FieldType::Integer => "integer",
			FieldType::Float => "float",
			FieldType::Boolean => "boolean",
			FieldType::Array => "array",
			FieldType::Table => "table",
		}
	}
}

/// Represents a field in a configuration schema.
#[derive(Debug, Clone)]
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
}

impl Field {
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
		}
	}
}

/// Defines a validation schema for an implementation's settings table.
///
/// A schema consists of required fields that must be present and optional
/// fields that may be present; each field carries an expected type.
#[derive(Debug, Clone)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with required and optional fields.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	///
	/// Checks that the value is a table, that all required fields are
	/// present, and that every known field has the expected type.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			Self::check_type(field, value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				Self::check_type(field, value)?;
			}
		}

		Ok(())
	}

	fn check_type(field: &Field, value: &toml::Value) -> Result<(), ValidationError> {
		if field.field_type.matches(value) {
			return Ok(());
		}
		Err(ValidationError::TypeMismatch {
			field: field.name.clone(),
			expected: field.field_type.name().to_string(),
			actual: value.type_str().to_string(),
		})
	}
}

/// Trait implemented by each implementation to expose its settings schema.
pub trait ConfigSchema: Send + Sync {
	/// Validates a settings table against this implementation's schema.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}
