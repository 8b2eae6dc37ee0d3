use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use shared::{
    domain::Point,
    error::{ProxyError, ValidationError},
    protocol::{LATITUDE_PARAM, LONGITUDE_PARAM, UV_PATH},
};
use thiserror::Error;
use url::Url;

use crate::config::Settings;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Debug, Deserialize)]
pub struct UvQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Missing lat/lng")]
    Missing,
    #[error("Invalid lat/lng")]
    Invalid(#[source] ValidationError),
}

impl UvQuery {
    pub fn point(&self) -> Result<Point, QueryError> {
        let (Some(lat), Some(lng)) = (present(&self.lat), present(&self.lng)) else {
            return Err(QueryError::Missing);
        };
        Point::parse(lat, lng).map_err(QueryError::Invalid)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl From<QueryError> for ProxyError {
    fn from(value: QueryError) -> Self {
        match &value {
            QueryError::Missing => ProxyError::new(value.to_string()),
            QueryError::Invalid(source) => {
                ProxyError::with_details(value.to_string(), source.to_string())
            }
        }
    }
}

/// Client for the upstream UV provider.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    uv_url: Url,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let base = Url::parse(&settings.openuv_base_url).with_context(|| {
            format!(
                "invalid upstream base url '{}'",
                settings.openuv_base_url
            )
        })?;
        let uv_url = base
            .join(&format!("{}/{UV_PATH}", base.path().trim_end_matches('/')))
            .context("failed to build upstream uv url")?;

        let mut builder = Client::builder();
        if settings.upstream_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.upstream_timeout_secs));
        }
        let http = builder.build().context("failed to build upstream http client")?;

        Ok(Self {
            http,
            uv_url,
            api_key: settings.openuv_api_key.clone(),
        })
    }

    pub fn uv_url(&self) -> &Url {
        &self.uv_url
    }

    /// Returns the upstream status and JSON body unchanged.
    pub async fn fetch_uv(&self, point: Point) -> Result<(StatusCode, Value), reqwest::Error> {
        let mut request = self.http.get(self.uv_url.clone()).query(&[
            (LATITUDE_PARAM, point.latitude()),
            (LONGITUDE_PARAM, point.longitude()),
        ]);
        if let Some(api_key) = &self.api_key {
            request = request.header(ACCESS_TOKEN_HEADER, api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
