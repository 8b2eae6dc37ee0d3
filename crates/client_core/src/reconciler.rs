//! Normalizes map clicks and form submissions into one candidate [`Point`].

use shared::{domain::Point, error::ValidationError};

/// Where a candidate point came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Map { latitude: f64, longitude: f64 },
    Form {
        latitude_text: String,
        longitude_text: String,
    },
}

impl RawInput {
    pub fn source(&self) -> &'static str {
        match self {
            RawInput::Map { .. } => "map",
            RawInput::Form { .. } => "form",
        }
    }
}

pub fn reconcile(input: &RawInput) -> Result<Point, ValidationError> {
    match input {
        RawInput::Map {
            latitude,
            longitude,
        } => Point::new(*latitude, *longitude),
        RawInput::Form {
            latitude_text,
            longitude_text,
        } => Point::parse(latitude_text, longitude_text),
    }
}
