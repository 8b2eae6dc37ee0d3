//! Maps the nested UV payload onto [`UvReport`].
//!
//! Required scalars must be present. The `sun_info` and `safe_exposure_time`
//! sections keep every key the payload provides and degrade to empty maps
//! when they are absent.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use shared::protocol::fields;

use crate::{error::ProjectionError, types::UvReport};

type Object = Map<String, Value>;

pub fn project(raw: &Value) -> Result<UvReport, ProjectionError> {
    let payload = raw.as_object().ok_or(ProjectionError::NotAnObject)?;
    let index = number(required(payload, fields::UV)?, fields::UV)?;
    let max_index = number(required(payload, fields::UV_MAX)?, fields::UV_MAX)?;
    let max_index_time = instant(required(payload, fields::UV_MAX_TIME)?, fields::UV_MAX_TIME)?;
    let sample_time = instant(required(payload, fields::UV_TIME)?, fields::UV_TIME)?;
    let ozone = number(required(payload, fields::OZONE)?, fields::OZONE)?;

    let sun_info = section(payload, fields::SUN_INFO)?;
    let sun_position = match sun_info {
        Some(info) => section(info, fields::SUN_POSITION)?,
        None => None,
    };
    let sun_times = match sun_info {
        Some(info) => section(info, fields::SUN_TIMES)?,
        None => None,
    };
    let safe_exposure = section(payload, fields::SAFE_EXPOSURE_TIME)?;

    Ok(UvReport {
        index,
        max_index,
        max_index_time,
        sample_time,
        ozone,
        ozone_time: payload
            .get(fields::OZONE_TIME)
            .map(|value| nullable(value, fields::OZONE_TIME, instant))
            .transpose()?
            .flatten(),
        sun_position: entries(sun_position, fields::SUN_POSITION, number)?,
        sun_times: entries(sun_times, fields::SUN_TIMES, |value, field| {
            nullable(value, field, instant)
        })?,
        safe_exposure: entries(safe_exposure, fields::SAFE_EXPOSURE_TIME, |value, field| {
            nullable(value, field, number)
        })?,
    })
}

fn required<'a>(object: &'a Object, field: &'static str) -> Result<&'a Value, ProjectionError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ProjectionError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn section<'a>(
    object: &'a Object,
    field: &'static str,
) -> Result<Option<&'a Object>, ProjectionError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(other) => Err(invalid(field, "an object", other)),
    }
}

fn entries<T>(
    section: Option<&Object>,
    field: &'static str,
    convert: impl Fn(&Value, &'static str) -> Result<T, ProjectionError>,
) -> Result<BTreeMap<String, T>, ProjectionError> {
    section
        .into_iter()
        .flatten()
        .map(|(key, value)| convert(value, field).map(|converted| (key.clone(), converted)))
        .collect()
}

fn nullable<T>(
    value: &Value,
    field: &'static str,
    convert: impl Fn(&Value, &'static str) -> Result<T, ProjectionError>,
) -> Result<Option<T>, ProjectionError> {
    if value.is_null() {
        Ok(None)
    } else {
        convert(value, field).map(Some)
    }
}

fn number(value: &Value, field: &'static str) -> Result<f64, ProjectionError> {
    value
        .as_f64()
        .ok_or_else(|| invalid(field, "a number", value))
}

fn instant(value: &Value, field: &'static str) -> Result<DateTime<Utc>, ProjectionError> {
    let text = value
        .as_str()
        .ok_or_else(|| invalid(field, "an RFC 3339 timestamp", value))?;
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| ProjectionError::InvalidField {
            field,
            reason: format!("`{text}` is not an RFC 3339 timestamp: {err}"),
        })
}

fn invalid(field: &'static str, expected: &str, found: &Value) -> ProjectionError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    ProjectionError::InvalidField {
        field,
        reason: format!("expected {expected}, found {found}"),
    }
}

#[cfg(test)]
#[path = "tests/projector_tests.rs"]
mod tests;
