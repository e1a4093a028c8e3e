//! Integration tests for the Hiarc SDK against a mock server.

use hiarc_domain::{AccessLevel, EntityKind};
use hiarc_sdk::models::{AccessGrant, CreateEntityRequest, FindRequest, Grantee, UpdateEntityRequest};
use hiarc_sdk::{Auth, EntityOp, HiarcClient, SdkError};
use httpmock::prelude::*;
use serde_json::json;

fn admin_client(server: &MockServer) -> HiarcClient {
    HiarcClient::new(&server.base_url(), Auth::AdminKey("admin-key".into())).unwrap()
}

#[tokio::test]
async fn test_get_sends_admin_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/u1")
                .header("x-hiarc-api-key", "admin-key");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "key": "u1", "name": "Alice" }));
        })
        .await;

    let user = admin_client(&server)
        .send(&EntityOp::get(EntityKind::User, "u1"), None::<&()>)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(user["name"], "Alice");
}

#[tokio::test]
async fn test_bearer_token_replaces_admin_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/current")
                .header("authorization", "Bearer tok")
                .header_missing("x-hiarc-api-key");
            then.status(200).json_body(json!({ "key": "me" }));
        })
        .await;

    let client = HiarcClient::new(&server.base_url(), Auth::Bearer("tok".into())).unwrap();
    let me = client
        .send(&EntityOp::current(EntityKind::User), None::<&()>)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(me["key"], "me");
}

#[tokio::test]
async fn test_as_user_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/collections/c1")
                .header("x-hiarc-user-key", "alice");
            then.status(200).json_body(json!({ "key": "c1" }));
        })
        .await;

    let client = admin_client(&server).with_as_user("alice");
    client
        .send(&EntityOp::get(EntityKind::Collection, "c1"), None::<&()>)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_posts_only_supplied_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/groups")
                .json_body(json!({ "key": "g1", "metadata": { "dept": "legal" } }));
            then.status(200).json_body(json!({ "key": "g1" }));
        })
        .await;

    let mut metadata = serde_json::Map::new();
    metadata.insert("dept".into(), json!("legal"));
    let body = CreateEntityRequest {
        key: "g1".into(),
        metadata: Some(metadata),
        ..Default::default()
    };

    admin_client(&server)
        .send(&EntityOp::create(EntityKind::Group), Some(&body))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_and_find() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/classifications/c1")
                .json_body(json!({ "description": "new" }));
            then.status(200).json_body(json!({ "key": "c1", "description": "new" }));
        })
        .await;
    let find = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/classifications/find")
                .json_body(json!({ "query": [{ "prop": "level", "op": ">", "value": 3 }] }));
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = admin_client(&server);
    let body = UpdateEntityRequest {
        description: Some("new".into()),
        ..Default::default()
    };
    client
        .send(&EntityOp::update(EntityKind::Classification, "c1"), Some(&body))
        .await
        .unwrap();

    let query = json!({ "prop": "level", "op": ">", "value": 3 });
    let body = FindRequest {
        query: vec![query.as_object().cloned().unwrap()],
    };
    let found = client
        .send(&EntityOp::find(EntityKind::Classification), Some(&body))
        .await
        .unwrap();

    update.assert_async().await;
    find.assert_async().await;
    assert_eq!(found, json!([]));
}

#[tokio::test]
async fn test_link_with_access_grant() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/collections/c1/users")
                .json_body(json!({ "userKey": "u1", "accessLevel": "READ_WRITE" }));
            then.status(200);
        })
        .await;

    let grant = AccessGrant {
        grantee: Grantee::User("u1".into()),
        access_level: AccessLevel::ReadWrite,
    };
    admin_client(&server)
        .send_unit(&EntityOp::link(EntityKind::Collection, "c1", "users"), Some(&grant))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/users/u1");
            then.status(204);
        })
        .await;

    let value = admin_client(&server)
        .send(&EntityOp::delete(EntityKind::User, "u1"), None::<&()>)
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/files/missing");
            then.status(404).body(r#"{"message":"File not found"}"#);
        })
        .await;

    let err = admin_client(&server)
        .send(&EntityOp::get(EntityKind::File, "missing"), None::<&()>)
        .await
        .unwrap_err();

    match err {
        SdkError::ApiError { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("File not found"));
        }
        other => panic!("Unexpected error type: {:?}", other),
    }
}

#[tokio::test]
async fn test_send_unit_reports_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/collections/c1");
            then.status(403).body("forbidden");
        })
        .await;

    let err = admin_client(&server)
        .send_unit(&EntityOp::delete(EntityKind::Collection, "c1"), None::<&()>)
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
}

#[tokio::test]
async fn test_connection_failure() {
    let client = HiarcClient::new("http://127.0.0.1:9", Auth::AdminKey("k".into())).unwrap();
    let err = client
        .send(&EntityOp::all(EntityKind::User), None::<&()>)
        .await
        .unwrap_err();

    match err {
        SdkError::ConnectionError(_) | SdkError::RequestError(_) => {}
        other => panic!("Unexpected error type: {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_is_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/files")
                .header_exists("content-type");
            then.status(200).json_body(json!({ "key": "f1", "name": "notes.txt" }));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello").unwrap();

    let request = hiarc_sdk::models::CreateFileRequest {
        key: "f1".into(),
        name: "notes.txt".into(),
        ..Default::default()
    };
    let file = admin_client(&server)
        .upload(&EntityOp::create(EntityKind::File), &request, &path, "notes.txt")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(file["name"], "notes.txt");
}

#[tokio::test]
async fn test_upload_streams_whole_file() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/files/f1/versions")
                .body_includes("\"key\":\"f1\"")
                .body_includes("first-chunk")
                .body_includes("last-chunk");
            then.status(200).json_body(json!({ "key": "f1" }));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    let mut contents = String::from("first-chunk");
    contents.push_str(&"x".repeat(256 * 1024));
    contents.push_str("last-chunk");
    std::fs::write(&path, &contents).unwrap();

    let request = hiarc_sdk::models::AddVersionRequest {
        key: "f1".into(),
        storage_service: None,
    };
    admin_client(&server)
        .upload(
            &EntityOp::action(EntityKind::File, "f1", "versions"),
            &request,
            &path,
            "big.bin",
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_missing_file_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let request = hiarc_sdk::models::CreateFileRequest {
        key: "f1".into(),
        ..Default::default()
    };
    let err = admin_client(&server)
        .upload(
            &EntityOp::create(EntityKind::File),
            &request,
            &dir.path().join("missing.txt"),
            "missing.txt",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::IoError(_)));
    mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_download_streams_to_disk() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/files/f1/download");
            then.status(200).body("file contents");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.txt");
    let written = admin_client(&server)
        .download_to(&EntityOp::related(EntityKind::File, "f1", "download"), &dest)
        .await
        .unwrap();

    assert_eq!(written, 13);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "file contents");
}

#[tokio::test]
async fn test_failed_download_creates_no_file() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/files/f1/download");
            then.status(500).body("boom");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.txt");
    let err = admin_client(&server)
        .download_to(&EntityOp::related(EntityKind::File, "f1", "download"), &dest)
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::ApiError { .. }));
    assert!(!dest.exists());
}
