use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ValidationError};

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

macro_rules! seq_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

seq_newtype!(RequestSeq);

impl RequestSeq {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated latitude/longitude pair.
///
/// The only constructors check the ranges, so holding a `Point` means the
/// coordinates are finite and on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() {
            return Err(ValidationError::NotANumber {
                axis: Axis::Latitude,
            });
        }
        if !longitude.is_finite() {
            return Err(ValidationError::NotANumber {
                axis: Axis::Longitude,
            });
        }
        if !LATITUDE_RANGE.contains(&latitude) || !LONGITUDE_RANGE.contains(&longitude) {
            return Err(ValidationError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses user-typed decimal text, ignoring surrounding whitespace.
    pub fn parse(latitude_text: &str, longitude_text: &str) -> Result<Self, ValidationError> {
        let latitude = parse_axis(latitude_text, Axis::Latitude)?;
        let longitude = parse_axis(longitude_text, Axis::Longitude)?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

fn parse_axis(text: &str, axis: Axis) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber { axis })
}
