//! # Service Registry
//!
//! A thread-safe runtime service locator. Each type maps to either a ready-made
//! shared instance or a factory that builds one on first demand; the factory's
//! result is memoized so every later lookup returns the same `Arc`.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_registry::{get, provide, provide_factory, Registry};
//! use std::sync::Arc;
//!
//! struct Service {
//!     name: String,
//! }
//!
//! struct Other {
//!     name: String,
//! }
//!
//! let registry = Registry::new();
//! provide(&registry, Arc::new(Service { name: "a".into() })).unwrap();
//! provide_factory(&registry, || Arc::new(Other { name: "b".into() })).unwrap();
//!
//! assert_eq!(get::<Service>(&registry).unwrap().name, "a");
//!
//! let first = get::<Other>(&registry).unwrap();
//! let second = get::<Other>(&registry).unwrap();
//! assert_eq!(first.name, "b");
//! assert!(Arc::ptr_eq(&first, &second));
//! ```
//!
//! ## Layers
//!
//! - [`Registry`] works on type-erased [`Value`]s and [`TypeDesc`]s and
//!   validates what may be registered at runtime.
//! - [`get`], [`get_value`], [`must_get`], [`provide`], [`provide_factory`] and
//!   [`contains`] are typed wrappers taking the registry explicitly.
//! - [`define_registry!`] declares a named static registry.
//!
//! Operations log through `tracing` and report [`RegistryEvent`]s to an
//! optional per-registry callback.

mod access;
mod function;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod value;

pub use access::{contains, get, get_value, must_get, provide, provide_factory};
pub use function::{Function, Signature};
pub use registry::{Registry, TraceCallback};
pub use registry_error::{RegistryError, Result};
pub use registry_event::RegistryEvent;
pub use value::{Instance, Shape, TypeDesc, TypeKey, Value};
