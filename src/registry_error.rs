use thiserror::Error;

/// Failures reported by the registry.
///
/// All variants are local validation or lookup failures; none is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Neither an instance nor a factory is registered for the type.
    #[error("service not found: {type_name}")]
    ServiceNotFound { type_name: &'static str },

    /// A factory registration was handed something that cannot be called.
    #[error("factory must be a function, got {type_name}")]
    FactoryMustBeAFunction { type_name: &'static str },

    /// The factory declares zero or several results.
    #[error("factory must return one value, declares {count}")]
    FactoryMustReturnOneValue { count: usize },

    /// The factory declares one or more parameters.
    #[error("factory must take no arguments, declares {count}")]
    FactoryMustTakeNoArguments { count: usize },

    /// A registered value, a factory result or a resolution target is not
    /// shared behind an `Arc`, or a stored instance failed to downcast.
    #[error("output must be a pointer: {type_name}")]
    OutputMustBeAPointer { type_name: &'static str },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_not_found_display() {
        let err = RegistryError::ServiceNotFound { type_name: "app::Db" };
        assert_eq!(err.to_string(), "service not found: app::Db");
    }

    #[test]
    fn test_factory_errors_display() {
        let err = RegistryError::FactoryMustBeAFunction {
            type_name: "alloc::string::String",
        };
        assert_eq!(
            err.to_string(),
            "factory must be a function, got alloc::string::String"
        );

        let err = RegistryError::FactoryMustReturnOneValue { count: 2 };
        assert_eq!(err.to_string(), "factory must return one value, declares 2");

        let err = RegistryError::FactoryMustTakeNoArguments { count: 1 };
        assert_eq!(err.to_string(), "factory must take no arguments, declares 1");
    }

    #[test]
    fn test_output_must_be_a_pointer_display() {
        let err = RegistryError::OutputMustBeAPointer { type_name: "i32" };
        assert_eq!(err.to_string(), "output must be a pointer: i32");
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            RegistryError::ServiceNotFound { type_name: "a" },
            RegistryError::ServiceNotFound { type_name: "a" }
        );
        assert_ne!(
            RegistryError::ServiceNotFound { type_name: "a" },
            RegistryError::OutputMustBeAPointer { type_name: "a" }
        );
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &RegistryError::FactoryMustReturnOneValue { count: 0 };
        assert_eq!(err.to_string(), "factory must return one value, declares 0");
    }
}
