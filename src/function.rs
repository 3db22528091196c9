//! Type-erased callables with a declared signature.

use std::fmt;
use std::sync::Arc;

use crate::{TypeDesc, Value};

type Invoke = Arc<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>;

/// Declared parameters and results of a [`Function`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<TypeDesc>,
    results: Vec<TypeDesc>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, desc: TypeDesc) -> Self {
        self.params.push(desc);
        self
    }

    pub fn result(mut self, desc: TypeDesc) -> Self {
        self.results.push(desc);
        self
    }

    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    pub fn results(&self) -> &[TypeDesc] {
        &self.results
    }
}

/// A callable whose arity and result types are known at runtime.
///
/// The registry only accepts functions declaring no parameters and a single
/// shared result as factories; [`Function::nullary`] builds exactly that from a
/// closure. [`Function::new`] accepts any signature and leaves validation to
/// whoever consumes the function.
///
/// # Examples
///
/// ```rust
/// use service_registry::{Function, Signature, TypeDesc, Value};
/// use std::sync::Arc;
///
/// struct Greeter(String);
///
/// let factory = Function::nullary(|| Arc::new(Greeter("hi".into())));
/// assert!(factory.signature().params().is_empty());
///
/// // Takes a `String` by value and produces a shared `Greeter`.
/// let with_param = Function::new(
///     Signature::new()
///         .param(TypeDesc::owned::<String>())
///         .result(TypeDesc::shared::<Greeter>()),
///     |_args| vec![Value::shared(Arc::new(Greeter("hello".into())))],
/// );
/// assert_eq!(with_param.signature().params().len(), 1);
/// ```
#[derive(Clone)]
pub struct Function {
    signature: Signature,
    invoke: Invoke,
}

impl Function {
    pub fn new<F>(signature: Signature, invoke: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        Self {
            signature,
            invoke: Arc::new(invoke),
        }
    }

    /// Wrap a zero-argument constructor of a shared `T`.
    pub fn nullary<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Self::new(
            Signature::new().result(TypeDesc::shared::<T>()),
            move |_args| vec![Value::shared(factory())],
        )
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn call(&self, args: Vec<Value>) -> Vec<Value> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
