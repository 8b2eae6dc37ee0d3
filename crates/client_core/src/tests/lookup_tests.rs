use super::*;
use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn echo_uv(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "result": {
            "uv": 5.2,
            "lat": query.get("lat"),
            "lng": query.get("lng"),
        }
    }))
}

fn point(lat: f64, lng: f64) -> Point {
    Point::new(lat, lng).expect("point")
}

#[test]
fn endpoint_appends_uv_path() {
    let lookup = HttpUvLookup::new("http://localhost:5000", None).expect("lookup");
    assert_eq!(lookup.endpoint().as_str(), "http://localhost:5000/uv");

    let lookup = HttpUvLookup::new("https://example.org/api/", None).expect("lookup");
    assert_eq!(lookup.endpoint().as_str(), "https://example.org/api/uv");
}

#[test]
fn rejects_unusable_base_addresses() {
    assert!(HttpUvLookup::new("not a url", None).is_err());
    assert!(HttpUvLookup::new("mailto:uv@example.org", None).is_err());
}

#[tokio::test]
async fn unwraps_result_and_sends_coordinates() {
    let base = spawn_server(Router::new().route("/uv", get(echo_uv))).await;
    let lookup = HttpUvLookup::new(&base, None).expect("lookup");

    let raw = lookup
        .lookup(point(-33.9249, 18.4241))
        .await
        .expect("lookup");
    assert_eq!(raw["uv"], json!(5.2));
    assert_eq!(raw["lat"], json!("-33.9249"));
    assert_eq!(raw["lng"], json!("18.4241"));
}

#[tokio::test]
async fn non_success_status_is_bad_status_with_proxy_message() {
    let app = Router::new().route(
        "/uv",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch UV data", "details": "timeout" })),
            )
        }),
    );
    let base = spawn_server(app).await;
    let lookup = HttpUvLookup::new(&base, None).expect("lookup");

    let err = lookup.lookup(point(1.0, 2.0)).await.expect_err("must fail");
    assert_eq!(
        err,
        RetrievalError::BadStatus {
            status: 500,
            message: Some("Failed to fetch UV data".to_string()),
        }
    );
}

#[tokio::test]
async fn truncated_error_body_still_reports_status() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let head = "HTTP/1.1 503 Service Unavailable\r\n\
                    content-type: application/json\r\n\
                    content-length: 200\r\n\r\n";
        socket.write_all(head.as_bytes()).await.expect("write head");
        socket.write_all(b"{\"error\": \"Fail").await.expect("write body");
        socket.flush().await.expect("flush");
    });

    let lookup = HttpUvLookup::new(&format!("http://{addr}"), None).expect("lookup");
    let err = lookup.lookup(point(1.0, 2.0)).await.expect_err("must fail");
    assert_eq!(
        err,
        RetrievalError::BadStatus {
            status: 503,
            message: None,
        }
    );
}

#[tokio::test]
async fn missing_result_is_malformed() {
    let app = Router::new().route(
        "/uv",
        get(|| async { Json(json!({ "error": "upstream quota exceeded" })) }),
    );
    let base = spawn_server(app).await;
    let lookup = HttpUvLookup::new(&base, None).expect("lookup");

    let err = lookup.lookup(point(1.0, 2.0)).await.expect_err("must fail");
    assert_eq!(
        err,
        RetrievalError::MalformedPayload(ProjectionError::MissingField("result"))
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let app = Router::new().route("/uv", get(|| async { "<html>oops</html>" }));
    let base = spawn_server(app).await;
    let lookup = HttpUvLookup::new(&base, None).expect("lookup");

    let err = lookup.lookup(point(1.0, 2.0)).await.expect_err("must fail");
    assert!(matches!(
        err,
        RetrievalError::MalformedPayload(ProjectionError::Undecodable(_))
    ));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let lookup = HttpUvLookup::new(&format!("http://{addr}"), None).expect("lookup");
    let err = lookup.lookup(point(1.0, 2.0)).await.expect_err("must fail");
    assert!(matches!(err, RetrievalError::Transport(_)));
}
