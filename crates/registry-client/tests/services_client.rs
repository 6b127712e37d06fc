//! # Services Client Integration Tests
//!
//! Drives `RegistryClient::services()` through the public API against a
//! scripted `MockTransport`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use registry_client::{
    AuthMode, Method, MockTransport, RegistryClient, RegistryError, Request, Response,
    Transport, TransportError,
};
use registry_types::{DerivationError, Envelope, Identity, Org, Project, Service, Unsigned};
use serde_json::{json, Value};
use tokio::time::timeout;

fn org_id() -> Identity {
    Identity::mutable(&Org::new("acme")).unwrap()
}

fn project_id() -> Identity {
    Identity::mutable(&Project::new("web", org_id())).unwrap()
}

fn service_record(name: &str) -> Unsigned {
    Envelope::new(Service::new(name, org_id(), Some(project_id())))
        .unwrap()
        .into()
}

fn listing(records: Vec<Unsigned>) -> Response {
    Response::json(&serde_json::to_value(records).unwrap())
}

fn registry(mock: &Arc<MockTransport>) -> RegistryClient {
    RegistryClient::new(mock.clone())
}

// =============================================================================
// List: filters
// =============================================================================

#[tokio::test]
async fn test_list_without_filters_sends_empty_query() {
    let mock = Arc::new(MockTransport::new());
    let results = registry(&mock).services().list(None, None, None).await.unwrap();

    assert!(results.is_empty());
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, "/services");
    assert_eq!(requests[0].auth, AuthMode::Authenticated);
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn test_list_with_org_only_sends_org_filter() {
    let mock = Arc::new(MockTransport::new());
    let org = org_id();
    registry(&mock)
        .services()
        .list(Some(&org), None, None)
        .await
        .unwrap();

    let requests = mock.requests();
    let query = &requests[0].query;
    assert_eq!(query.len(), 1);
    assert_eq!(query.get("org_id"), Some(org.to_string().as_str()));
}

#[tokio::test]
async fn test_list_drops_zero_project() {
    let mock = Arc::new(MockTransport::new());
    let org = org_id();
    registry(&mock)
        .services()
        .list(Some(&org), Some(&Identity::ZERO), Some("api"))
        .await
        .unwrap();

    let requests = mock.requests();
    let query = &requests[0].query;
    assert!(!query.contains("project_id"));
    assert_eq!(query.get("name"), Some("api"));
    assert_eq!(query.len(), 2);
}

#[tokio::test]
async fn test_list_sends_all_filters() {
    let mock = Arc::new(MockTransport::new());
    let (org, project) = (org_id(), project_id());
    registry(&mock)
        .services()
        .list(Some(&org), Some(&project), Some("api"))
        .await
        .unwrap();

    let requests = mock.requests();
    let query = &requests[0].query;
    assert_eq!(query.get("org_id"), Some(org.to_string().as_str()));
    assert_eq!(query.get("project_id"), Some(project.to_string().as_str()));
    assert_eq!(query.get("name"), Some("api"));
}

// =============================================================================
// List: narrowing
// =============================================================================

#[tokio::test]
async fn test_list_preserves_response_order() {
    let records = vec![service_record("c"), service_record("a"), service_record("b")];
    let expected_ids: Vec<_> = records.iter().map(|r| r.id).collect();
    let mock = Arc::new(MockTransport::new().with_response(Ok(listing(records))));

    let results = registry(&mock).services().list(None, None, None).await.unwrap();

    let names: Vec<_> = results.iter().map(|r| r.body.name.as_str()).collect();
    let ids: Vec<_> = results.iter().map(|r| r.id).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(ids, expected_ids);
    assert!(results.iter().all(|r| r.version == 1));
    assert!(results
        .iter()
        .all(|r| r.body.org_id == org_id() && r.body.project_id == Some(project_id())));
}

#[tokio::test]
async fn test_list_fails_whole_call_on_foreign_record() {
    let foreign: Unsigned = Envelope::new(Project::new("web", org_id())).unwrap().into();
    let records = vec![service_record("a"), foreign, service_record("c")];
    let mock = Arc::new(MockTransport::new().with_response(Ok(listing(records))));

    let err = registry(&mock)
        .services()
        .list(None, None, None)
        .await
        .unwrap_err();

    assert!(err.is_type_mismatch());
    assert_eq!(err.to_string(), "Invalid service body: found project");
}

#[tokio::test]
async fn test_list_rejects_unknown_body_type() {
    let body = json!([{
        "id": service_record("a").id.to_string(),
        "version": 1,
        "body": {"type": "gadget", "name": "x"}
    }]);
    let mock = Arc::new(MockTransport::new().with_response(Ok(Response::json(&body))));

    let err = registry(&mock)
        .services()
        .list(None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Decode(_)));
}

#[tokio::test]
async fn test_list_rejects_record_without_org() {
    let body = json!([{
        "id": service_record("a").id.to_string(),
        "version": 1,
        "body": {"type": "service", "name": "", "org_id": ""}
    }]);
    let mock = Arc::new(MockTransport::new().with_response(Ok(Response::json(&body))));

    let err = registry(&mock)
        .services()
        .list(None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::MalformedEnvelope(_)));
}

#[tokio::test]
async fn test_list_null_body_is_empty() {
    let mock = Arc::new(MockTransport::new().with_response(Ok(Response::json(&Value::Null))));
    let results = registry(&mock).services().list(None, None, None).await.unwrap();
    assert!(results.is_empty());
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_posts_version_one_envelope() {
    let mock = Arc::new(MockTransport::new().with_response(Ok(Response::empty(201))));
    let (org, project) = (org_id(), project_id());

    registry(&mock)
        .services()
        .create(Some(&org), Some(&project), "x")
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/services");
    assert_eq!(request.auth, AuthMode::Authenticated);

    let expected_id = Identity::mutable(&Service::new("x", org, Some(project))).unwrap();
    let body = request.body.as_ref().unwrap();
    assert_eq!(body["version"], 1);
    assert_eq!(body["id"], expected_id.to_string());
    assert_eq!(body["body"]["type"], "service");
    assert_eq!(body["body"]["name"], "x");
    assert_eq!(body["body"]["org_id"], org.to_string());
    assert_eq!(body["body"]["project_id"], project.to_string());
}

#[tokio::test]
async fn test_create_rejects_zero_project() {
    let mock = Arc::new(MockTransport::new());
    let org = org_id();

    let err = registry(&mock)
        .services()
        .create(Some(&org), Some(&Identity::ZERO), "x")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RegistryError::Derivation(DerivationError::MissingField("project_id"))
    ));
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_identity_covers_project_scope() {
    let (org, project) = (org_id(), project_id());

    let scoped = Identity::mutable(&Service::new("x", org, Some(project))).unwrap();
    let unscoped = Identity::mutable(&Service::new("x", org, None)).unwrap();

    assert_eq!(
        scoped,
        Identity::mutable(&Service::new("x", org, Some(project))).unwrap()
    );
    assert_eq!(
        unscoped,
        Identity::mutable(&Service::new("x", org, None)).unwrap()
    );
    assert_ne!(scoped, unscoped);
    // A zero project is the absent project, not a third scope.
    assert_eq!(
        Identity::mutable(&Service::new("x", org, Some(Identity::ZERO))).unwrap(),
        unscoped
    );
}

#[tokio::test]
async fn test_create_identity_is_deterministic() {
    let mock = Arc::new(MockTransport::new());
    let (org, project) = (org_id(), project_id());
    let services = registry(&mock).services();

    services.create(Some(&org), Some(&project), "x").await.unwrap();
    services.create(Some(&org), Some(&project), "x").await.unwrap();
    services.create(Some(&org), Some(&project), "y").await.unwrap();

    let ids: Vec<Value> = mock
        .requests()
        .into_iter()
        .map(|r| r.body.unwrap()["id"].clone())
        .collect();
    assert_eq!(ids[0], ids[1]);
    assert_ne!(ids[0], ids[2]);
}

#[tokio::test]
async fn test_create_requires_org_and_project() {
    let mock = Arc::new(MockTransport::new());
    let (org, project) = (org_id(), project_id());
    let services = registry(&mock).services();

    for (org, project) in [(None, Some(&project)), (Some(&org), None), (None, None)] {
        let err = services.create(org, project, "x").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "invalid org or project");
    }
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_create_surfaces_rejection() {
    let mock = Arc::new(MockTransport::new().with_response(Err(TransportError::Status {
        status: 409,
        message: "already exists".to_string(),
    })));
    let (org, project) = (org_id(), project_id());

    let err = registry(&mock)
        .services()
        .create(Some(&org), Some(&project), "x")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Transport(TransportError::Status { status: 409, .. })
    ));
}

// =============================================================================
// Cancellation and concurrency
// =============================================================================

/// Transport that never answers.
struct StalledTransport;

#[async_trait]
impl Transport for StalledTransport {
    async fn execute(&self, _request: Request) -> Result<Response, TransportError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_cancelled_transport_error_propagates() {
    let mock = Arc::new(MockTransport::new().with_response(Err(TransportError::Cancelled)));
    let err = registry(&mock)
        .services()
        .list(None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Transport(TransportError::Cancelled)
    ));
}

#[tokio::test]
async fn test_deadline_abandons_stalled_call() {
    let registry = RegistryClient::new(Arc::new(StalledTransport));
    let outcome = timeout(
        Duration::from_millis(50),
        registry.services().list(None, None, None),
    )
    .await;
    assert!(outcome.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_share_one_client() {
    let mock = Arc::new(MockTransport::new());
    let services = registry(&mock).services();
    let (org, project) = (org_id(), project_id());

    let mut handles = Vec::new();
    for i in 0..16 {
        let services = services.clone();
        handles.push(tokio::spawn(async move {
            let name = format!("svc-{}", i);
            services.create(Some(&org), Some(&project), &name).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(mock.request_count(), 16);
}
