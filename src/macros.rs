//! Macro for declaring named static registries.

/// Creates a module holding a lazily constructed static [`Registry`](crate::Registry)
/// and free functions delegating to it.
///
/// Each invocation is an isolated registry. Nothing in this crate requires a
/// static registry; this is for programs that want one.
///
/// # Examples
///
/// ```rust
/// use service_registry::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(services);
///
/// struct Clock {
///     offset: i64,
/// }
///
/// services::provide_factory(|| Arc::new(Clock { offset: 0 })).unwrap();
///
/// let clock = services::must_get::<Clock>();
/// assert_eq!(clock.offset, 0);
/// assert!(Arc::ptr_eq(&clock, &services::get::<Clock>().unwrap()));
/// ```
///
/// # Multiple Registries
///
/// ```rust
/// use service_registry::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(primary);
/// define_registry!(replica);
///
/// primary::provide(Arc::new("primary".to_string())).unwrap();
///
/// assert!(primary::contains::<String>());
/// assert!(!replica::contains::<String>());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// The underlying registry.
            pub fn registry() -> &'static $crate::Registry {
                &REGISTRY
            }

            pub fn provide<T: Send + Sync + 'static>(value: Arc<T>) -> $crate::Result<()> {
                $crate::provide(&REGISTRY, value)
            }

            pub fn provide_factory<T, F>(factory: F) -> $crate::Result<()>
            where
                T: Send + Sync + 'static,
                F: Fn() -> Arc<T> + Send + Sync + 'static,
            {
                $crate::provide_factory(&REGISTRY, factory)
            }

            pub fn get<T: Send + Sync + 'static>() -> $crate::Result<Arc<T>> {
                $crate::get(&REGISTRY)
            }

            pub fn get_value<T: Clone + Send + Sync + 'static>(out: &mut T) -> $crate::Result<()> {
                $crate::get_value(&REGISTRY, out)
            }

            pub fn must_get<T: Send + Sync + 'static>() -> Arc<T> {
                $crate::must_get(&REGISTRY)
            }

            pub fn contains<T: Send + Sync + 'static>() -> bool {
                $crate::contains::<T>(&REGISTRY)
            }

            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                REGISTRY.set_trace_callback(callback)
            }

            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
