/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via
/// [`Registry::set_trace_callback`](crate::Registry::set_trace_callback).
/// Rejected registrations emit nothing.
///
/// # Examples
///
/// ```rust
/// use service_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register { type_name: "app::Db" };
/// assert_eq!(event.to_string(), "register { type_name: app::Db }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An instance was stored.
    Register {
        /// The type name of the registered instance
        type_name: &'static str,
    },

    /// A factory was stored.
    RegisterFactory {
        /// The type name the factory produces
        type_name: &'static str,
    },

    /// A resolution was attempted.
    Resolve {
        /// The type name that was requested
        type_name: &'static str,
        /// Whether an instance was returned
        found: bool,
    },

    /// A factory ran and its result became the instance for its type.
    Instantiate {
        /// The type name that was instantiated
        type_name: &'static str,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { type_name } => {
                write!(f, "register {{ type_name: {type_name} }}")
            }
            RegistryEvent::RegisterFactory { type_name } => {
                write!(f, "register_factory {{ type_name: {type_name} }}")
            }
            RegistryEvent::Resolve { type_name, found } => {
                write!(f, "resolve {{ type_name: {type_name}, found: {found} }}")
            }
            RegistryEvent::Instantiate { type_name } => {
                write!(f, "instantiate {{ type_name: {type_name} }}")
            }
        }
    }
}
