//! Registry, key generation and primitive factory behaviour

mod common;

use common::{stub_fingerprint, stub_template, StubKeyManager, OTHER_TYPE_URL, STUB_TYPE_URL};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;
use tessera_common::LoggingTransformer;
use tessera_core::{
    ErrorKind, KeyData, KeyManager, KeyMaterialType, KeyTemplate, Registry, RegistryConfig,
};

fn stub_registry() -> (Registry, Arc<StubKeyManager>) {
    LoggingTransformer::init_test();
    let registry = Registry::new();
    let manager = StubKeyManager::shared(STUB_TYPE_URL, 0xA1);
    registry.register(manager.clone()).unwrap();
    (registry, manager)
}

#[test]
fn test_get_unknown_type_url_fails_not_found() {
    let (registry, _) = stub_registry();
    let err = registry.get("some url").err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!registry.contains("some url"));
}

#[test]
fn test_get_returns_registered_manager() {
    let (registry, _) = stub_registry();
    let manager = registry.get(STUB_TYPE_URL).unwrap();
    assert_eq!(manager.type_url(), STUB_TYPE_URL);
    assert_eq!(registry.type_urls(), vec![STUB_TYPE_URL.to_string()]);
}

#[test]
fn test_reregistration_keeps_first_manager() {
    let (registry, first) = stub_registry();

    // Same type URL, different behaviour
    registry
        .register(StubKeyManager::shared(STUB_TYPE_URL, 0xB2))
        .unwrap();
    // Same instance again
    registry.register(first.clone()).unwrap();

    let primitive = registry
        .primitive(STUB_TYPE_URL, &first.key_bytes(16))
        .unwrap();
    assert_eq!(stub_fingerprint(&primitive).0, 0xA1);
}

#[test]
fn test_strict_registry_rejects_a_different_manager() {
    let registry = Registry::with_config(RegistryConfig::strict());
    let first = StubKeyManager::shared(STUB_TYPE_URL, 0xA1);
    registry.register(first.clone()).unwrap();

    let err = registry
        .register(StubKeyManager::shared(STUB_TYPE_URL, 0xB2))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);

    // Re-registering the same instance is harmless
    registry.register(first).unwrap();
}

#[test]
fn test_manager_without_type_url_is_rejected() {
    let registry = Registry::new();
    let err = registry
        .register(StubKeyManager::shared("", 0x01))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(registry.type_urls().is_empty());
}

#[test]
fn test_new_key_data_matches_template() {
    let (registry, _) = stub_registry();
    let template = stub_template(STUB_TYPE_URL, 32);

    let key_data = registry.new_key_data(&template).unwrap();
    assert_eq!(key_data.type_url, template.type_url);
    assert_eq!(key_data.key_material_type, KeyMaterialType::Symmetric);
    // marker byte plus the requested 32 key bytes
    assert_eq!(key_data.value.len(), 33);

    let key = registry.new_key(&template).unwrap();
    assert_eq!(key.as_bytes().len(), 33);
}

#[test]
fn test_generation_errors() {
    let (registry, _) = stub_registry();

    let absent = KeyTemplate::new("", vec![16]);
    assert_eq!(registry.new_key_data(&absent).unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(registry.new_key(&absent).unwrap_err().kind(), ErrorKind::InvalidArgument);

    let unregistered = KeyTemplate::new("some url", vec![0]);
    assert_eq!(registry.new_key_data(&unregistered).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(registry.new_key(&unregistered).unwrap_err().kind(), ErrorKind::NotFound);

    let malformed = KeyTemplate::new(STUB_TYPE_URL, vec![1, 2, 3]);
    assert_eq!(registry.new_key_data(&malformed).unwrap_err().kind(), ErrorKind::Format);
    assert_eq!(registry.new_key(&malformed).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn test_primitive_from_raw_bytes() {
    let (registry, manager) = stub_registry();

    let primitive = registry
        .primitive(STUB_TYPE_URL, &manager.key_bytes(16))
        .unwrap();
    assert_eq!(stub_fingerprint(&primitive), (0xA1, 16));

    assert_eq!(
        registry.primitive(STUB_TYPE_URL, &[]).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        registry.primitive(STUB_TYPE_URL, &[0]).unwrap_err().kind(),
        ErrorKind::Key
    );
    assert_eq!(
        registry
            .primitive("some url", &manager.key_bytes(16))
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_primitive_from_key_data() {
    let (registry, manager) = stub_registry();
    registry
        .register(StubKeyManager::shared(OTHER_TYPE_URL, 0xC3))
        .unwrap();

    let mut key_data = KeyData::new(STUB_TYPE_URL, manager.key_bytes(8), KeyMaterialType::Symmetric);
    let primitive = registry.primitive_from_key_data(&key_data).unwrap();
    assert_eq!(stub_fingerprint(&primitive), (0xA1, 8));

    // Right type URL for a different manager, foreign payload
    key_data.type_url = OTHER_TYPE_URL.to_string();
    assert_eq!(registry.primitive_from_key_data(&key_data).unwrap_err().kind(), ErrorKind::Key);

    key_data.type_url = "some url".to_string();
    assert_eq!(registry.primitive_from_key_data(&key_data).unwrap_err().kind(), ErrorKind::NotFound);

    key_data.type_url = String::new();
    assert_eq!(
        registry.primitive_from_key_data(&key_data).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn test_default_registry_free_functions() {
    let type_url = "type.tessera.dev/test.DefaultRegistryKey";
    let manager = StubKeyManager::shared(type_url, 0xD4);
    tessera_core::register_key_manager(manager.clone()).unwrap();

    assert_eq!(tessera_core::get_key_manager(type_url).unwrap().type_url(), type_url);
    let key_data = tessera_core::new_key_data(&stub_template(type_url, 4)).unwrap();
    let primitive = tessera_core::primitive_from_key_data(&key_data).unwrap();
    assert_eq!(stub_fingerprint(&primitive), (0xD4, 4));
    assert!(tessera_core::primitive(type_url, &manager.key_bytes(4)).is_ok());
}

#[test]
fn test_concurrent_register_and_get() {
    let registry = Arc::new(Registry::new());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let type_url = format!("type.tessera.dev/test.Concurrent{}", i % 4);
                registry
                    .register(StubKeyManager::shared(&type_url, i))
                    .unwrap();
                let manager = registry.get(&type_url).unwrap();
                assert_eq!(manager.type_url(), type_url);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.type_urls().len(), 4);
}

proptest! {
    #[test]
    fn prop_first_registrant_stays_authoritative(markers in proptest::collection::vec(1u8..=255, 1..12)) {
        let registry = Registry::new();
        for marker in &markers {
            registry.register(StubKeyManager::shared(STUB_TYPE_URL, *marker)).unwrap();
        }

        let first = markers[0];
        let key = StubKeyManager::new(STUB_TYPE_URL, first).key_bytes(4);
        let primitive = registry.primitive(STUB_TYPE_URL, &key).unwrap();
        prop_assert_eq!(stub_fingerprint(&primitive).0, first);
    }
}
