use super::*;

fn query(lat: Option<&str>, lng: Option<&str>) -> UvQuery {
    UvQuery {
        lat: lat.map(str::to_string),
        lng: lng.map(str::to_string),
    }
}

fn settings_with_base(base: &str) -> Settings {
    Settings {
        openuv_base_url: base.to_string(),
        ..Settings::default()
    }
}

#[test]
fn missing_or_blank_params_are_missing() {
    for q in [
        query(None, Some("10")),
        query(Some("10"), None),
        query(Some(""), Some("10")),
        query(Some("  "), Some("10")),
    ] {
        assert!(matches!(q.point(), Err(QueryError::Missing)), "{q:?}");
    }
}

#[test]
fn unparseable_or_out_of_range_params_are_invalid() {
    let err = query(Some("abc"), Some("10")).point().expect_err("invalid");
    assert!(matches!(
        err,
        QueryError::Invalid(ValidationError::NotANumber { .. })
    ));

    let err = query(Some("95"), Some("10")).point().expect_err("invalid");
    assert!(matches!(
        err,
        QueryError::Invalid(ValidationError::OutOfRange { .. })
    ));
}

#[test]
fn valid_params_become_a_point() {
    let point = query(Some("-33.9249"), Some("18.4241"))
        .point()
        .expect("point");
    assert_eq!(point.latitude(), -33.9249);
    assert_eq!(point.longitude(), 18.4241);
}

#[test]
fn query_errors_map_to_proxy_bodies() {
    assert_eq!(
        ProxyError::from(QueryError::Missing),
        ProxyError::new("Missing lat/lng")
    );
    let body = ProxyError::from(
        query(Some("95"), Some("0"))
            .point()
            .expect_err("invalid"),
    );
    assert_eq!(body.error, "Invalid lat/lng");
    assert!(body.details.expect("details").contains("out of range"));
}

#[test]
fn uv_url_extends_base_path() {
    let client = UpstreamClient::new(&Settings::default()).expect("client");
    assert_eq!(client.uv_url().as_str(), "https://api.openuv.io/api/v1/uv");

    let client = UpstreamClient::new(&settings_with_base("http://127.0.0.1:9000/")).expect("client");
    assert_eq!(client.uv_url().as_str(), "http://127.0.0.1:9000/uv");
}

#[test]
fn rejects_invalid_base_url() {
    assert!(UpstreamClient::new(&settings_with_base("not a url")).is_err());
}
