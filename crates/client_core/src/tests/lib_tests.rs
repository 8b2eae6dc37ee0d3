use super::*;
use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug, Deserialize)]
struct UvQuery {
    lat: f64,
    lng: f64,
}

async fn fake_proxy(Query(query): Query<UvQuery>) -> Json<Value> {
    let uv = if query.lat < 0.0 { 5.2 } else { 0.4 };
    let altitude = query.lng / 100.0;
    Json(json!({
        "result": {
            "uv": uv,
            "uv_max": 7.1,
            "uv_max_time": "2024-01-09T11:53:57.603Z",
            "uv_time": "2024-01-09T09:12:00.000Z",
            "ozone": 310,
            "ozone_time": "2024-01-09T06:00:00.000Z",
            "safe_exposure_time": { "st1": 26, "st6": null },
            "sun_info": {
                "sun_position": { "azimuth": 180, "altitude": altitude },
                "sun_times": { "sunrise": "2024-01-09T03:41:12.000Z" }
            }
        }
    }))
}

async fn spawn_fake_proxy() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/uv", get(fake_proxy));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn click_through_http_lookup_renders_report() {
    let base = spawn_fake_proxy().await;
    let settings = ClientSettings {
        lookup_base_url: base,
        ..ClientSettings::default()
    };
    let mut runtime = start(&settings, DetachedMap).expect("start");

    runtime.handle.map_ready().expect("send");
    runtime.handle.click(-33.9249, 18.4241).expect("send");

    let view = runtime
        .view
        .wait_for(|view| !matches!(view.report, ReportView::Absent | ReportView::Pending))
        .await
        .expect("view")
        .clone();

    let report = view.report.report().expect("ready report");
    assert_eq!(report.index, 5.2);
    assert_eq!(report.sun_position.get("azimuth"), Some(&180.0));
    assert_eq!(report.safe_exposure.get("st1"), Some(&Some(26.0)));
    assert_eq!(report.safe_exposure.get("st6"), Some(&None));
    assert!(report.ozone_time.is_some());
    assert_eq!(view.point.map(|p| p.latitude()), Some(-33.9249));
}

#[test]
fn start_rejects_invalid_base_address() {
    let settings = ClientSettings {
        lookup_base_url: "::not-a-url".into(),
        ..ClientSettings::default()
    };
    assert!(start(&settings, DetachedMap).is_err());
}
