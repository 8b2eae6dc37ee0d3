use std::fs;

use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "uv_proxy.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub openuv_base_url: String,
    pub openuv_api_key: Option<String>,
    /// Zero disables the upstream timeout.
    pub upstream_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".into(),
            openuv_base_url: "https://api.openuv.io/api/v1".into(),
            openuv_api_key: None,
            upstream_timeout_secs: 10,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(CONFIG_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

fn resolve_settings(file: Option<&str>, var: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match raw.parse::<toml::Table>() {
            Ok(table) => apply_file(&mut settings, &table),
            Err(error) => warn!(%error, file = CONFIG_FILE, "ignoring unparseable config file"),
        }
    }

    if let Some(v) = var("PORT") {
        match v.parse::<u16>() {
            Ok(port) => settings.bind_addr = format!("127.0.0.1:{port}"),
            Err(_) => warn!(value = %v, "ignoring invalid PORT"),
        }
    }
    if let Some(v) = var("UV_PROXY_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = var("OPENUV_BASE_URL") {
        settings.openuv_base_url = v;
    }
    if let Some(v) = var("APP__OPENUV_BASE_URL") {
        settings.openuv_base_url = v;
    }

    if let Some(v) = var("OPENUV_API_KEY") {
        settings.openuv_api_key = non_empty(v);
    }
    if let Some(v) = var("APP__OPENUV_API_KEY") {
        settings.openuv_api_key = non_empty(v);
    }

    if let Some(v) = var("APP__UPSTREAM_TIMEOUT_SECS") {
        set_timeout(&mut settings, &v);
    }

    settings
}

fn apply_file(settings: &mut Settings, table: &toml::Table) {
    for (key, value) in table {
        match (key.as_str(), value) {
            ("bind_addr", toml::Value::String(v)) => settings.bind_addr = v.clone(),
            ("openuv_base_url", toml::Value::String(v)) => settings.openuv_base_url = v.clone(),
            ("openuv_api_key", toml::Value::String(v)) => {
                settings.openuv_api_key = non_empty(v.clone())
            }
            ("upstream_timeout_secs", toml::Value::Integer(secs)) => match u64::try_from(*secs) {
                Ok(secs) => settings.upstream_timeout_secs = secs,
                Err(_) => warn!(value = *secs, "ignoring negative upstream timeout"),
            },
            ("upstream_timeout_secs", toml::Value::String(v)) => set_timeout(settings, v),
            _ => warn!(%key, file = CONFIG_FILE, "ignoring unsupported config entry"),
        }
    }
}

fn set_timeout(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(secs) => settings.upstream_timeout_secs = secs,
        Err(_) => warn!(value = %raw, "ignoring invalid upstream timeout"),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
