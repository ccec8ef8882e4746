use acl_viewer::acl::{AclRecord, Operation, PermissionType, ResourceType};
use acl_viewer::server::{AppState, create_router};
use acl_viewer::snapshot;
use acl_viewer::transform::build_graph;
use acl_viewer::visjs::create_network;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn sample_network() -> acl_viewer::visjs::Network {
    create_network(&build_graph(&[AclRecord::new(
        "User:alice",
        "orders",
        ResourceType::Topic,
        Operation::Read,
        PermissionType::Allow,
    )]))
}

#[tokio::test]
async fn before_first_refresh() {
    let (_publisher, reader) = snapshot::channel();
    let app = create_router(AppState { snapshots: reader }, None);

    let (status, _) = get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = get(app.clone(), "/api/network").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("new vis.DataSet([])"));
}

#[tokio::test]
async fn serves_latest_snapshot() {
    let (mut publisher, reader) = snapshot::channel();
    publisher.publish(sample_network());
    let app = create_router(AppState { snapshots: reader }, None);

    let (status, body) = get(app.clone(), "/healthz").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));

    let (status, body) = get(app.clone(), "/api/network").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["generation"], 1);
    assert_eq!(json["edges"][0]["from"], "orders");
    assert_eq!(json["edges"][0]["to"], "alice");
    assert_eq!(json["nodes"].as_array().unwrap().len(), 2);

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""title":"Read""#));
    assert!(body.contains("🤖 alice"));
}

#[tokio::test]
async fn page_follows_new_publishes() {
    let (mut publisher, reader) = snapshot::channel();
    let app = create_router(AppState { snapshots: reader }, None);

    publisher.publish(sample_network());
    publisher.publish(Default::default());

    let (_, body) = get(app, "/api/network").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["generation"], 2);
    assert!(json["edges"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("style.css"), "body { margin: 0 }").unwrap();
    let (_publisher, reader) = snapshot::channel();
    let app = create_router(
        AppState { snapshots: reader },
        Some(dir.path().to_path_buf()),
    );

    let (status, body) = get(app.clone(), "/static/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { margin: 0 }");

    let (status, _) = get(app, "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
