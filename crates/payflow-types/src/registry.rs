//! Registry trait for self-registering implementations.

/// Implemented by each concrete collaborator implementation so services can
/// be assembled from configuration by name.
///
/// Each implementing crate exposes a `get_all_implementations()` listing of
/// `(NAME, factory)` pairs; the core looks the configured name up there and
/// invokes the factory with the implementation's settings table.
pub trait ImplementationRegistry {
	/// The name this implementation registers under in configuration.
	const NAME: &'static str;

	/// Factory function type producing the boxed implementation.
	type Factory;

	/// Returns the factory for this implementation.
	fn factory() -> Self::Factory;
}
