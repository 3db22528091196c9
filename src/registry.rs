//! The registry: type-keyed instances and lazily memoized factories.
//!
//! Each type identity can hold one instance and one factory. Resolution prefers
//! the instance; a factory runs only when no instance exists, and its result
//! becomes the instance for every later lookup.
//!
//! # Examples
//!
//! ```
//! use service_registry::{Function, Registry, TypeDesc, Value};
//! use std::sync::Arc;
//!
//! struct Mailer {
//!     host: String,
//! }
//!
//! let registry = Registry::new();
//! registry
//!     .register_factory(Function::nullary(|| Arc::new(Mailer { host: "smtp.local".into() })).into())
//!     .unwrap();
//!
//! let first = registry.resolve(&TypeDesc::shared::<Mailer>()).unwrap();
//! let second = registry.resolve(&TypeDesc::shared::<Mailer>()).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! // Plain values are rejected.
//! assert!(registry.register(Value::owned(42u32)).is_err());
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::value::Instance;
use crate::{RegistryError, RegistryEvent, Result, Shape, TypeDesc, TypeKey, Value};

/// Zero-argument thunk producing the first result of a validated factory.
type Factory = Arc<dyn Fn() -> Option<Value> + Send + Sync>;

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives every [`RegistryEvent`] emitted by the registry it is
/// installed on.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

#[derive(Default)]
struct Slots {
    instances: HashMap<TypeKey, Instance>,
    factories: HashMap<TypeKey, Factory>,
}

/// Thread-safe service locator.
///
/// Both mappings live behind one reader/writer lock. Registration and the
/// factory path of [`resolve`](Registry::resolve) take it exclusively, so a
/// factory runs at most once per type even under contention. Only the
/// instance fast path is shared.
#[derive(Default)]
pub struct Registry {
    slots: RwLock<Slots>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback must not call into this registry: it runs while the
    /// callback slot is locked. Storage locks are already released when it runs.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        *self.trace.lock() = Some(Arc::new(callback));
    }

    pub fn clear_trace_callback(&self) {
        *self.trace.lock() = None;
    }

    fn emit_event(&self, event: &RegistryEvent) {
        let guard = self.trace.lock();
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Store `value` as the instance for its type, replacing any previous one.
    ///
    /// # Errors
    ///
    /// [`RegistryError::OutputMustBeAPointer`] unless `value` is shared.
    pub fn register(&self, value: Value) -> Result<()> {
        let desc = value.desc();
        let instance = value
            .into_shared()
            .ok_or(RegistryError::OutputMustBeAPointer {
                type_name: desc.name(),
            })?;

        self.slots.write().instances.insert(desc.key(), instance);

        debug!(service = desc.name(), "registered instance");
        self.emit_event(&RegistryEvent::Register {
            type_name: desc.name(),
        });

        Ok(())
    }

    /// Store a factory for the type its single result declares.
    ///
    /// Nothing is instantiated until the type is first resolved. A factory
    /// registered for a type that already has an instance is never invoked.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// - [`RegistryError::FactoryMustBeAFunction`] if `factory` is not a function
    /// - [`RegistryError::FactoryMustTakeNoArguments`] if it declares parameters
    /// - [`RegistryError::FactoryMustReturnOneValue`] unless it declares one result
    /// - [`RegistryError::OutputMustBeAPointer`] if that result is not shared
    pub fn register_factory(&self, factory: Value) -> Result<()> {
        let desc = factory.desc();
        let function = factory
            .into_function()
            .ok_or(RegistryError::FactoryMustBeAFunction {
                type_name: desc.name(),
            })?;

        let signature = function.signature();
        if !signature.params().is_empty() {
            return Err(RegistryError::FactoryMustTakeNoArguments {
                count: signature.params().len(),
            });
        }

        let output = match signature.results() {
            [output] => *output,
            results => {
                return Err(RegistryError::FactoryMustReturnOneValue {
                    count: results.len(),
                })
            }
        };

        if output.shape() != Shape::Shared {
            return Err(RegistryError::OutputMustBeAPointer {
                type_name: output.name(),
            });
        }

        let thunk: Factory = Arc::new(move || function.call(Vec::new()).into_iter().next());
        self.slots.write().factories.insert(output.key(), thunk);

        debug!(service = output.name(), "registered factory");
        self.emit_event(&RegistryEvent::RegisterFactory {
            type_name: output.name(),
        });

        Ok(())
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolve the instance for `target`, running and memoizing its factory on
    /// first demand.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::OutputMustBeAPointer`] if `target` is not shared, or
    ///   the factory produced something other than its declared result
    /// - [`RegistryError::ServiceNotFound`] if nothing is registered for it
    pub fn resolve(&self, target: &TypeDesc) -> Result<Instance> {
        if !target.is_shared() {
            return Err(RegistryError::OutputMustBeAPointer {
                type_name: target.name(),
            });
        }

        let key = target.key();
        let cached = self.slots.read().instances.get(&key).cloned();

        let result = match cached {
            Some(instance) => {
                trace!(service = key.name(), "resolved cached instance");
                Ok(instance)
            }
            None => self.instantiate(key),
        };

        self.emit_event(&RegistryEvent::Resolve {
            type_name: key.name(),
            found: result.is_ok(),
        });

        result
    }

    /// Slow path of [`resolve`](Registry::resolve): check, invoke and memoize
    /// under one write guard.
    fn instantiate(&self, key: TypeKey) -> Result<Instance> {
        let mut slots = self.slots.write();

        // Another caller may have won the race for the write guard.
        if let Some(instance) = slots.instances.get(&key) {
            return Ok(instance.clone());
        }

        let factory = slots
            .factories
            .get(&key)
            .cloned()
            .ok_or(RegistryError::ServiceNotFound {
                type_name: key.name(),
            })?;

        let instance = factory()
            .filter(|value| value.desc().key() == key)
            .and_then(Value::into_shared)
            .ok_or(RegistryError::OutputMustBeAPointer {
                type_name: key.name(),
            })?;

        slots.instances.insert(key, instance.clone());
        drop(slots);

        debug!(service = key.name(), "memoized factory instance");
        self.emit_event(&RegistryEvent::Instantiate {
            type_name: key.name(),
        });

        Ok(instance)
    }

    /// Resolve `T` and copy it into `out`.
    ///
    /// `out` receives a clone of the stored instance; later changes to `out`
    /// are not seen by the registry.
    ///
    /// # Errors
    ///
    /// Whatever [`resolve`](Registry::resolve) reports, or
    /// [`RegistryError::OutputMustBeAPointer`] if the stored instance is not a `T`.
    pub fn resolve_into<T: Clone + Send + Sync + 'static>(&self, out: &mut T) -> Result<()> {
        let instance = self
            .resolve(&TypeDesc::shared::<T>())?
            .downcast::<T>()
            .map_err(|_| RegistryError::OutputMustBeAPointer {
                type_name: type_name::<T>(),
            })?;

        out.clone_from(&instance);
        Ok(())
    }

    /// Whether an instance or a factory is registered for `key`.
    pub fn contains(&self, key: &TypeKey) -> bool {
        let slots = self.slots.read();
        slots.instances.contains_key(key) || slots.factories.contains_key(key)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read();
        f.debug_struct("Registry")
            .field("instances", &slots.instances.len())
            .field("factories", &slots.factories.len())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
