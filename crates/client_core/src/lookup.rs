use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::Point,
    error::ProxyError,
    protocol::{UvEnvelope, LATITUDE_PARAM, LONGITUDE_PARAM, UV_PATH},
};
use tracing::debug;
use url::Url;

use crate::{
    config::ClientSettings,
    error::{ProjectionError, RetrievalError},
};

/// The remote UV service as seen by the coordinator: one point in, one raw
/// payload (the `result` member of the response) out.
#[async_trait]
pub trait UvLookup: Send + Sync {
    async fn lookup(&self, point: Point) -> Result<Value, RetrievalError>;
}

pub struct HttpUvLookup {
    http: Client,
    endpoint: Url,
}

impl HttpUvLookup {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid lookup base address '{base_url}'"))?;
        let endpoint = uv_endpoint(&base)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build lookup http client")?;

        Ok(Self { http, endpoint })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::new(&settings.lookup_base_url, settings.lookup_timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn uv_endpoint(base: &Url) -> Result<Url> {
    let mut endpoint = base.clone();
    endpoint
        .path_segments_mut()
        .map_err(|_| anyhow!("lookup base address '{base}' cannot carry a path"))?
        .pop_if_empty()
        .push(UV_PATH);
    endpoint.set_query(None);
    Ok(endpoint)
}

#[async_trait]
impl UvLookup for HttpUvLookup {
    async fn lookup(&self, point: Point) -> Result<Value, RetrievalError> {
        debug!(%point, endpoint = %self.endpoint, "requesting uv data");
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                (LATITUDE_PARAM, point.latitude()),
                (LONGITUDE_PARAM, point.longitude()),
            ])
            .send()
            .await
            .map_err(|err| RetrievalError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ProxyError>(&body).ok())
                .map(|body| body.error);
            return Err(RetrievalError::BadStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| RetrievalError::Transport(err.to_string()))?;

        let envelope: UvEnvelope = serde_json::from_slice(&body)
            .map_err(|err| ProjectionError::Undecodable(err.to_string()))?;
        envelope
            .result
            .ok_or_else(|| ProjectionError::MissingField("result").into())
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
