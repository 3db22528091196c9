//! Integration tests for lookup, lazy instantiation and copy-out resolution.

use service_registry::{
    get, get_value, must_get, provide, provide_factory, Registry, RegistryError, TypeDesc,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
struct Service {
    name: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Other {
    name: String,
}

#[test]
fn test_instance_and_factory_scenario() {
    let registry = Registry::new();
    provide(&registry, Arc::new(Service { name: "a".into() })).unwrap();

    let service = get::<Service>(&registry).unwrap();
    assert_eq!(service.name, "a");

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    provide_factory(&registry, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Arc::new(Other { name: "b".into() })
    })
    .unwrap();

    let first = get::<Other>(&registry).unwrap();
    assert_eq!(first.name, "b");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let second = get::<Other>(&registry).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The instance registered up front is untouched.
    assert!(Arc::ptr_eq(&service, &get::<Service>(&registry).unwrap()));
}

#[test]
fn test_resolve_returns_registered_arc() {
    let registry = Registry::new();
    let original = Arc::new(Service { name: "a".into() });
    provide(&registry, original.clone()).unwrap();

    for _ in 0..3 {
        assert!(Arc::ptr_eq(&original, &must_get::<Service>(&registry)));
    }
}

#[test]
fn test_resolve_unregistered_type() {
    let registry = Registry::new();
    provide(&registry, Arc::new(Service { name: "a".into() })).unwrap();

    let err = get::<Other>(&registry).unwrap_err();
    assert_eq!(
        err,
        RegistryError::ServiceNotFound {
            type_name: std::any::type_name::<Other>()
        }
    );
    assert_eq!(
        err.to_string(),
        format!("service not found: {}", std::any::type_name::<Other>())
    );
}

#[test]
fn test_resolve_requires_shared_target() {
    let registry = Registry::new();
    provide(&registry, Arc::new(Service { name: "a".into() })).unwrap();

    assert!(matches!(
        registry.resolve(&TypeDesc::owned::<Service>()),
        Err(RegistryError::OutputMustBeAPointer { .. })
    ));
    assert!(matches!(
        registry.resolve(&TypeDesc::function()),
        Err(RegistryError::OutputMustBeAPointer { .. })
    ));
}

#[test]
fn test_get_value_copy_does_not_alias() {
    #[derive(Debug, Clone)]
    struct Settings {
        retries: u32,
        hosts: Vec<String>,
    }

    let registry = Registry::new();
    provide(
        &registry,
        Arc::new(Settings {
            retries: 3,
            hosts: vec!["a".into()],
        }),
    )
    .unwrap();

    let mut copy = Settings {
        retries: 0,
        hosts: Vec::new(),
    };
    get_value(&registry, &mut copy).unwrap();
    assert_eq!(copy.retries, 3);
    assert_eq!(copy.hosts, vec!["a".to_string()]);

    copy.retries = 10;
    copy.hosts.push("b".into());

    let stored = must_get::<Settings>(&registry);
    assert_eq!(stored.retries, 3);
    assert_eq!(stored.hosts, vec!["a".to_string()]);
}

#[test]
fn test_get_value_reflects_state_at_call_time() {
    let registry = Registry::new();
    let shared = Arc::new(Mutex::new(1u32));
    provide(&registry, Arc::new(shared.clone())).unwrap();

    let mut before: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
    get_value(&registry, &mut before).unwrap();

    // Mutations through any holder of a shared instance are visible to all.
    *shared.lock().unwrap() = 2;
    assert_eq!(*before.lock().unwrap(), 2);
}

#[test]
fn test_get_value_on_factory_backed_type_memoizes() {
    let registry = Registry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    provide_factory(&registry, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Arc::new(Other { name: "b".into() })
    })
    .unwrap();

    let mut first = Other {
        name: String::new(),
    };
    let mut second = Other {
        name: String::new(),
    };
    get_value(&registry, &mut first).unwrap();
    get_value(&registry, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "service not found")]
fn test_must_get_aborts_for_unregistered_type() {
    let registry = Registry::new();
    provide(&registry, Arc::new(Service { name: "a".into() })).unwrap();

    let _ = must_get::<Other>(&registry);
}
