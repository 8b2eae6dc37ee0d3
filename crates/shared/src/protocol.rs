use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the UV lookup route, relative to the proxy base address.
pub const UV_PATH: &str = "uv";
pub const LATITUDE_PARAM: &str = "lat";
pub const LONGITUDE_PARAM: &str = "lng";

/// Field names of the upstream UV payload.
pub mod fields {
    pub const UV: &str = "uv";
    pub const UV_MAX: &str = "uv_max";
    pub const UV_MAX_TIME: &str = "uv_max_time";
    pub const UV_TIME: &str = "uv_time";
    pub const OZONE: &str = "ozone";
    pub const OZONE_TIME: &str = "ozone_time";
    pub const SAFE_EXPOSURE_TIME: &str = "safe_exposure_time";
    pub const SUN_INFO: &str = "sun_info";
    pub const SUN_POSITION: &str = "sun_position";
    pub const SUN_TIMES: &str = "sun_times";
}

/// Response body of `GET /uv`. The payload stays untyped until it is projected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UvEnvelope {
    #[serde(default)]
    pub result: Option<Value>,
}
