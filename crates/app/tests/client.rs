//! ApiClient against a mock storage node

use std::time::Duration;

use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::prelude::*;
use eacl_changer::api::v0::eacl::SetEaclResponse;
use eacl_changer::{fetch_policy, submit_policy, ApiClient, ApiError, SubmitError};

fn container() -> ContainerId {
    ContainerId::from([0x42; 32])
}

fn eacl_path() -> String {
    format!("/api/v0/container/{}/eacl", container())
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&Url::parse(&server.uri()).unwrap(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_submit_sends_signed_table() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(SetEaclResponse {
            container_id: container(),
            records: 2,
        }))
        .expect(1)
        .mount(&server)
        .await;

    let owner = SecretKey::generate().unwrap();
    let special = SecretKey::generate().unwrap().public();
    let table = build_policy(container(), special);

    submit_policy(&client_for(&server), &table, &owner, None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let received: SignedTable = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(received.verify().is_ok());
    assert_eq!(received.public_key, owner.public());
    assert_eq!(received.table, table);
}

#[tokio::test]
async fn test_forbidden_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(403).set_body_string("not the container owner"))
        .expect(1)
        .mount(&server)
        .await;

    let owner = SecretKey::generate().unwrap();
    let table = build_policy(container(), SecretKey::generate().unwrap().public());

    let err = submit_policy(&client_for(&server), &table, &owner, None)
        .await
        .unwrap_err();
    match err {
        SubmitError::Store(ApiError::Unauthorized(status, body)) => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(body, "not the container owner");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let owner = SecretKey::generate().unwrap();
    let table = build_policy(container(), SecretKey::generate().unwrap().public());

    let err = submit_policy(&client_for(&server), &table, &owner, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Store(ApiError::HttpStatus(status, _)) if status.as_u16() == 503
    ));
}

#[tokio::test]
async fn test_deadline_elapses() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let owner = SecretKey::generate().unwrap();
    let table = build_policy(container(), SecretKey::generate().unwrap().public());

    let limit = Duration::from_millis(100);
    let err = submit_policy(&client_for(&server), &table, &owner, Some(limit))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::DeadlineElapsed(d) if d == limit));
}

#[tokio::test]
async fn test_transport_error_propagates() {
    // nothing listens on the discard port
    let client = ApiClient::new(
        &Url::parse("http://127.0.0.1:9").unwrap(),
        Duration::from_secs(2),
    )
    .unwrap();

    let owner = SecretKey::generate().unwrap();
    let table = build_policy(container(), SecretKey::generate().unwrap().public());

    let err = submit_policy(&client, &table, &owner, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Store(ApiError::Reqwest(_))));
}

#[tokio::test]
async fn test_fetch_verifies_signature() {
    let owner = SecretKey::generate().unwrap();
    let special = SecretKey::generate().unwrap().public();
    let signed = build_policy(container(), special).sign(&owner).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&signed))
        .mount(&server)
        .await;

    let fetched = fetch_policy(&client_for(&server), &container(), None)
        .await
        .unwrap();
    assert_eq!(fetched, signed);

    let request = AccessRequest::new(Operation::Get, special, Role::Others)
        .with_object_attribute(common::eacl::ATTRIBUTE_FILE_NAME, SECRET_FILE_NAME);
    assert_eq!(fetched.table.evaluate(&request), Some(Action::Allow));
}

#[tokio::test]
async fn test_fetch_rejects_forged_table() {
    let owner = SecretKey::generate().unwrap();
    let mut forged = build_policy(container(), SecretKey::generate().unwrap().public())
        .sign(&owner)
        .unwrap();
    forged.table = build_policy(container(), SecretKey::generate().unwrap().public());

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&forged))
        .mount(&server)
        .await;

    let err = fetch_policy(&client_for(&server), &container(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(EaclError::BadSignature)));
}

#[tokio::test]
async fn test_fetch_missing_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(eacl_path()))
        .respond_with(ResponseTemplate::new(404).set_body_string("eACL not found"))
        .mount(&server)
        .await;

    let err = fetch_policy(&client_for(&server), &container(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Store(ApiError::HttpStatus(status, _)) if status.as_u16() == 404
    ));
}
