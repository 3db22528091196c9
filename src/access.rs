//! Typed accessors over a [`Registry`].
//!
//! These take the registry explicitly and name the service by type parameter
//! instead of by [`TypeDesc`].
//!
//! # Examples
//!
//! ```
//! use service_registry::{get, must_get, provide, provide_factory, Registry};
//! use std::sync::Arc;
//!
//! struct Config {
//!     port: u16,
//! }
//!
//! struct Cache {
//!     capacity: usize,
//! }
//!
//! let registry = Registry::new();
//! provide(&registry, Arc::new(Config { port: 8080 })).unwrap();
//! provide_factory(&registry, || Arc::new(Cache { capacity: 64 })).unwrap();
//!
//! assert_eq!(get::<Config>(&registry).unwrap().port, 8080);
//! assert_eq!(must_get::<Cache>(&registry).capacity, 64);
//! ```

use std::any::type_name;
use std::sync::Arc;

use crate::{Function, Registry, RegistryError, Result, TypeDesc, TypeKey, Value};

/// Register `value` as the instance for `T`.
pub fn provide<T: Send + Sync + 'static>(registry: &Registry, value: Arc<T>) -> Result<()> {
    registry.register(Value::shared(value))
}

/// Register a lazily invoked constructor for `T`.
pub fn provide_factory<T, F>(registry: &Registry, factory: F) -> Result<()>
where
    T: Send + Sync + 'static,
    F: Fn() -> Arc<T> + Send + Sync + 'static,
{
    registry.register_factory(Function::nullary(factory).into())
}

/// Retrieve the shared instance of `T`.
///
/// # Errors
///
/// - [`RegistryError::ServiceNotFound`] if `T` is not registered
/// - [`RegistryError::OutputMustBeAPointer`] if the stored instance is not a `T`
pub fn get<T: Send + Sync + 'static>(registry: &Registry) -> Result<Arc<T>> {
    registry
        .resolve(&TypeDesc::shared::<T>())?
        .downcast::<T>()
        .map_err(|_| RegistryError::OutputMustBeAPointer {
            type_name: type_name::<T>(),
        })
}

/// Copy the instance of `T` into `out`.
///
/// See [`Registry::resolve_into`].
pub fn get_value<T: Clone + Send + Sync + 'static>(registry: &Registry, out: &mut T) -> Result<()> {
    registry.resolve_into(out)
}

/// Retrieve the shared instance of `T`, treating its absence as a bug.
///
/// # Panics
///
/// Panics with the resolution error if [`get`] fails.
pub fn must_get<T: Send + Sync + 'static>(registry: &Registry) -> Arc<T> {
    get::<T>(registry).unwrap_or_else(|err| panic!("{err}"))
}

/// Whether an instance or a factory is registered for `T`.
pub fn contains<T: Send + Sync + 'static>(registry: &Registry) -> bool {
    registry.contains(&TypeKey::of::<T>())
}
