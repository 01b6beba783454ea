use std::sync::Arc;

use autofill_detection::error::{ExtractError, SaveError};
use autofill_detection::service::autofill_service::{AutofillRequest, CancellationSignal};
use autofill_detection::store::{CredentialEntry, CredentialStore, MemoryCredentialStore, SecretHandle};
use autofill_detection::{
    AutofillClassifier, AutofillConfig, AutofillService, FormOrigin, InputKind, Node,
};

use crate::common::{APP, KEYCHAIN, cyclic_tree, login_tree};

mod common;

fn seeded_store() -> MemoryCredentialStore {
    let mut store = MemoryCredentialStore::new();
    store.insert(
        &FormOrigin::App(APP.into()),
        CredentialEntry {
            username: Some("alice".into()),
            secret: SecretHandle("vault/alice".into()),
        },
    );
    store
}

fn service(store: MemoryCredentialStore) -> AutofillService<MemoryCredentialStore> {
    AutofillService::new(AutofillClassifier::default(), store)
}

fn filled_login_tree(username: &str, password: &str) -> Node {
    Node::container(
        "root",
        vec![
            Node::input("child0", InputKind::Text)
                .with_id_name("login_user")
                .with_value(username),
            Node::input("child1", InputKind::Password)
                .with_id_name("login_pass")
                .with_value(password),
        ],
    )
}

// =========================================================================
// Fill requests
// =========================================================================

#[test]
fn fill_request_returns_plan_and_matches() {
    let svc = service(seeded_store());
    let response = svc
        .on_fill_request(&AutofillRequest::new(APP, login_tree()), &CancellationSignal::new())
        .expect("suggestions");

    assert_eq!(response.plan.requested_match_key(), &FormOrigin::App(APP.into()));
    assert_eq!(response.datasets.len(), 1);
    assert_eq!(response.datasets[0].label, "alice");
    assert_eq!(response.save_plan.addresses_to_reread().len(), 2);
}

#[test]
fn fill_request_without_matches_still_returns_plan() {
    let svc = service(MemoryCredentialStore::new());
    let response = svc
        .on_fill_request(&AutofillRequest::new(APP, login_tree()), &CancellationSignal::new())
        .expect("plan");

    assert!(response.datasets.is_empty());
}

#[test]
fn malformed_tree_means_no_suggestions() {
    let svc = service(seeded_store());
    let response = svc.on_fill_request(
        &AutofillRequest::new(APP, cyclic_tree()),
        &CancellationSignal::new(),
    );
    assert!(response.is_none());

    // Later requests are unaffected.
    let response = svc.on_fill_request(
        &AutofillRequest::new(APP, login_tree()),
        &CancellationSignal::new(),
    );
    assert!(response.is_some());
}

#[test]
fn denylisted_fill_request_gets_nothing() {
    let svc = service(seeded_store());
    let response = svc.on_fill_request(
        &AutofillRequest::new(KEYCHAIN, login_tree()),
        &CancellationSignal::new(),
    );
    assert!(response.is_none());
}

#[test]
fn cancelled_request_gets_nothing() {
    let svc = service(seeded_store());
    let cancel = CancellationSignal::new();
    let host_side = cancel.clone();
    host_side.cancel();

    assert!(cancel.is_cancelled());
    assert!(svc.on_fill_request(&AutofillRequest::new(APP, login_tree()), &cancel).is_none());
}

#[test]
fn only_the_last_context_is_classified() {
    let svc = service(seeded_store());
    let request = AutofillRequest {
        package: APP.into(),
        contexts: vec![login_tree(), Node::container("empty", vec![])],
    };
    assert!(svc.on_fill_request(&request, &CancellationSignal::new()).is_none());

    let request = AutofillRequest {
        package: APP.into(),
        contexts: vec![Node::container("empty", vec![]), login_tree()],
    };
    assert!(svc.on_fill_request(&request, &CancellationSignal::new()).is_some());
}

#[test]
fn request_without_contexts_gets_nothing() {
    let svc = service(seeded_store());
    let request = AutofillRequest {
        package: APP.into(),
        contexts: vec![],
    };
    assert!(svc.on_fill_request(&request, &CancellationSignal::new()).is_none());
}

#[test]
fn classifier_is_shareable_across_threads() {
    let classifier = AutofillClassifier::with_shared_config(Arc::new(AutofillConfig::default()));
    let expected = classifier
        .classify_fill_request(&login_tree(), APP)
        .unwrap()
        .unwrap()
        .fingerprint();

    let fingerprints: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = classifier.clone();
                s.spawn(move || {
                    c.classify_fill_request(&login_tree(), APP)
                        .unwrap()
                        .unwrap()
                        .fingerprint()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(fingerprints.iter().all(|f| f == &expected));
}

// =========================================================================
// Save requests
// =========================================================================

#[test]
fn save_request_persists_credentials() {
    let mut svc = service(MemoryCredentialStore::new());
    let saved = svc
        .on_save_request(&AutofillRequest::new(APP, filled_login_tree("bob", "s3cret")))
        .unwrap()
        .expect("credentials");

    assert_eq!(saved.username.as_deref(), Some("bob"));
    assert_eq!(saved.password, "s3cret");

    let entries = svc.store().lookup(&FormOrigin::App(APP.into()));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].username.as_deref(), Some("bob"));
    assert_eq!(svc.store().secret(&entries[0].secret), Some("s3cret"));
}

#[test]
fn saving_twice_replaces_the_entry() {
    let mut svc = service(MemoryCredentialStore::new());
    svc.on_save_request(&AutofillRequest::new(APP, filled_login_tree("bob", "first")))
        .unwrap();
    svc.on_save_request(&AutofillRequest::new(APP, filled_login_tree("bob", "second")))
        .unwrap();

    let entries = svc.store().lookup(&FormOrigin::App(APP.into()));
    assert_eq!(entries.len(), 1);
    assert_eq!(svc.store().secret(&entries[0].secret), Some("second"));
}

#[test]
fn masked_save_is_rejected() {
    let mut svc = service(MemoryCredentialStore::new());
    let result = svc.on_save_request(&AutofillRequest::new(APP, filled_login_tree("bob", "•••")));

    assert!(matches!(
        result,
        Err(SaveError::Extract(ExtractError::MaskedPassword(_)))
    ));
    assert!(svc.store().lookup(&FormOrigin::App(APP.into())).is_empty());
}

#[test]
fn malformed_save_is_an_error() {
    let mut svc = service(MemoryCredentialStore::new());
    let result = svc.on_save_request(&AutofillRequest::new(APP, cyclic_tree()));
    assert!(matches!(result, Err(SaveError::Tree(_))));
}

#[test]
fn denylisted_save_is_ignored() {
    let mut svc = service(MemoryCredentialStore::new());
    let result = svc
        .on_save_request(&AutofillRequest::new(KEYCHAIN, filled_login_tree("bob", "pw")))
        .unwrap();

    assert_eq!(result, None);
}
