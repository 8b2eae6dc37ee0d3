use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use shared::{
    domain::{Point, RequestSeq},
    error::ValidationError,
};

use crate::error::RetrievalError;

/// Display model of one successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct UvReport {
    pub index: f64,
    pub max_index: f64,
    pub max_index_time: DateTime<Utc>,
    pub sample_time: DateTime<Utc>,
    pub ozone: f64,
    pub ozone_time: Option<DateTime<Utc>>,
    pub sun_position: BTreeMap<String, f64>,
    pub sun_times: BTreeMap<String, Option<DateTime<Utc>>>,
    /// Minutes of safe exposure per skin type; `None` where the service gives no guidance.
    pub safe_exposure: BTreeMap<String, Option<f64>>,
}

/// Text currently typed into the coordinate form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub latitude_text: String,
    pub longitude_text: String,
}

impl FormDraft {
    pub fn clear(&mut self) {
        self.latitude_text.clear();
        self.longitude_text.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReportView {
    /// Nothing has been selected yet.
    #[default]
    Absent,
    Pending,
    Ready(UvReport),
    Failed(RetrievalError),
}

impl ReportView {
    pub fn report(&self) -> Option<&UvReport> {
        match self {
            ReportView::Ready(report) => Some(report),
            _ => None,
        }
    }
}

/// Everything the presentation layer needs, published after every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub point: Option<Point>,
    /// Selection generation that both `point` and `report` belong to.
    pub generation: Option<RequestSeq>,
    pub report: ReportView,
    pub last_validation_error: Option<ValidationError>,
    pub draft: FormDraft,
}
