//! Type identities and type-erased values.
//!
//! The registry never sees concrete types. Everything crosses its boundary as a
//! [`Value`] that remembers its [`TypeDesc`]: which type it holds and whether it
//! is shared behind an `Arc`, held by value, or a callable [`Function`].

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Function;

/// A type-erased instance as stored in the registry.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Identity of a registrable type.
///
/// Two keys are equal iff they denote the same type. The name is carried for
/// diagnostics only.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How a value is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Behind an `Arc`; every holder observes the same object.
    Shared,
    /// A plain value with independent copies.
    Owned,
    /// A callable [`Function`].
    Function,
}

/// A type identity together with its [`Shape`].
///
/// Describes a registry slot, a resolution target, or a parameter or result of
/// a [`Function`] signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDesc {
    key: TypeKey,
    shape: Shape,
}

impl TypeDesc {
    /// `Arc<T>`.
    pub fn shared<T: Send + Sync + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            shape: Shape::Shared,
        }
    }

    /// A plain `T`.
    pub fn owned<T: Send + Sync + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            shape: Shape::Owned,
        }
    }

    pub fn function() -> Self {
        Self {
            key: TypeKey::of::<Function>(),
            shape: Shape::Function,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn name(&self) -> &'static str {
        self.key.name
    }

    pub fn is_shared(&self) -> bool {
        self.shape == Shape::Shared
    }
}

enum Payload {
    Shared(Instance),
    Owned(Box<dyn Any + Send + Sync>),
    Function(Function),
}

/// A type-erased value handed to, or produced by, the registry.
///
/// # Examples
///
/// ```rust
/// use service_registry::{Shape, Value};
/// use std::sync::Arc;
///
/// struct Db;
///
/// assert_eq!(Value::shared(Arc::new(Db)).desc().shape(), Shape::Shared);
/// assert_eq!(Value::owned(42u32).desc().shape(), Shape::Owned);
/// ```
pub struct Value {
    desc: TypeDesc,
    payload: Payload,
}

impl Value {
    pub fn shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            desc: TypeDesc::shared::<T>(),
            payload: Payload::Shared(value),
        }
    }

    pub fn owned<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            desc: TypeDesc::owned::<T>(),
            payload: Payload::Owned(Box::new(value)),
        }
    }

    pub fn function(function: Function) -> Self {
        Self {
            desc: TypeDesc::function(),
            payload: Payload::Function(function),
        }
    }

    pub fn desc(&self) -> TypeDesc {
        self.desc
    }

    /// Borrow the held value, unless it is a function.
    pub fn as_any(&self) -> Option<&(dyn Any + Send + Sync)> {
        match &self.payload {
            Payload::Shared(instance) => Some(instance.as_ref()),
            Payload::Owned(boxed) => Some(boxed.as_ref()),
            Payload::Function(_) => None,
        }
    }

    pub fn into_shared(self) -> Option<Instance> {
        match self.payload {
            Payload::Shared(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn into_function(self) -> Option<Function> {
        match self.payload {
            Payload::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::function(function)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value").field("desc", &self.desc).finish()
    }
}
