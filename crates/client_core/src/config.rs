use std::time::Duration;

use tracing::warn;

use crate::map::DEFAULT_FOCUS_ZOOM;

pub const DEFAULT_LOOKUP_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Base address of the UV proxy; `/uv` is appended.
    pub lookup_base_url: String,
    pub focus_zoom: f64,
    /// `None` leaves lookups unbounded.
    pub lookup_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            lookup_base_url: DEFAULT_LOOKUP_URL.into(),
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            lookup_timeout: None,
        }
    }
}

pub fn load_client_settings() -> ClientSettings {
    settings_from_env(|key| std::env::var(key).ok())
}

fn settings_from_env(var: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(v) = var("UV_LOOKUP_URL") {
        settings.lookup_base_url = v;
    }

    if let Some(v) = var("UV_FOCUS_ZOOM") {
        match v.parse::<f64>() {
            Ok(zoom) if zoom.is_finite() && zoom >= 0.0 => settings.focus_zoom = zoom,
            _ => warn!(value = %v, "ignoring invalid UV_FOCUS_ZOOM"),
        }
    }

    if let Some(v) = var("UV_LOOKUP_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(0) => settings.lookup_timeout = None,
            Ok(secs) => settings.lookup_timeout = Some(Duration::from_secs(secs)),
            Err(_) => warn!(value = %v, "ignoring invalid UV_LOOKUP_TIMEOUT_SECS"),
        }
    }

    settings
}
