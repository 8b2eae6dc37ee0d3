//! Single state-transition function over every input the view reacts to.
//!
//! Map clicks, form edits and submissions, and lookup completions all arrive
//! as [`Event`]s. [`Coordinator::handle`] applies one event and returns the
//! [`Effect`]s the runtime must carry out.

use serde_json::Value;
use shared::{
    domain::{Point, RequestSeq},
    error::ValidationError,
};
use tracing::{debug, info, warn};

use crate::{
    error::RetrievalError,
    reconciler::{reconcile, RawInput},
    sequencer::{PendingRequest, RetrievalSequencer},
    types::{FormDraft, ReportView, ViewSnapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MapReady,
    Clicked {
        latitude: f64,
        longitude: f64,
    },
    LatitudeEdited(String),
    LongitudeEdited(String),
    Submitted,
    ResponseArrived {
        seq: RequestSeq,
        outcome: Result<Value, RetrievalError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CenterMap { point: Point, zoom: f64 },
    IssueLookup(PendingRequest),
    Render(ViewSnapshot),
}

pub struct Coordinator {
    focus_zoom: f64,
    map_ready: bool,
    deferred_center: Option<Point>,
    sequencer: RetrievalSequencer,
    selection: Option<Point>,
    report: ReportView,
    last_validation_error: Option<ValidationError>,
    draft: FormDraft,
}

impl Coordinator {
    pub fn new(focus_zoom: f64) -> Self {
        Self {
            focus_zoom,
            map_ready: false,
            deferred_center: None,
            sequencer: RetrievalSequencer::new(),
            selection: None,
            report: ReportView::Absent,
            last_validation_error: None,
            draft: FormDraft::default(),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            point: self.selection,
            generation: self.selection.and(self.sequencer.latest()),
            report: self.report.clone(),
            last_validation_error: self.last_validation_error,
            draft: self.draft.clone(),
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::MapReady => {
                self.map_ready = true;
                if let Some(point) = self.deferred_center.take() {
                    effects.push(self.center(point));
                }
            }
            Event::Clicked {
                latitude,
                longitude,
            } => {
                self.select(
                    RawInput::Map {
                        latitude,
                        longitude,
                    },
                    &mut effects,
                );
            }
            Event::LatitudeEdited(text) => self.draft.latitude_text = text,
            Event::LongitudeEdited(text) => self.draft.longitude_text = text,
            Event::Submitted => {
                let input = RawInput::Form {
                    latitude_text: self.draft.latitude_text.clone(),
                    longitude_text: self.draft.longitude_text.clone(),
                };
                if self.select(input, &mut effects) {
                    self.draft.clear();
                }
            }
            Event::ResponseArrived { seq, outcome } => {
                match self.sequencer.settle(seq, outcome) {
                    Some(Ok(report)) => {
                        info!(%seq, uv = report.index, "uv report ready");
                        self.report = ReportView::Ready(report);
                    }
                    Some(Err(error)) => {
                        warn!(%seq, %error, "uv lookup failed");
                        self.report = ReportView::Failed(error);
                    }
                    // Stale completion: nothing changed, nothing to render.
                    None => return effects,
                }
            }
        }
        effects.push(Effect::Render(self.snapshot()));
        effects
    }

    /// Returns whether the input was accepted as the new selection.
    fn select(&mut self, input: RawInput, effects: &mut Vec<Effect>) -> bool {
        let point = match reconcile(&input) {
            Ok(point) => point,
            Err(error) => {
                debug!(source = input.source(), %error, "rejected candidate point");
                self.last_validation_error = Some(error);
                return false;
            }
        };

        let pending = self.sequencer.issue(point);
        info!(source = input.source(), %point, seq = %pending.seq, "selected point");
        self.selection = Some(point);
        self.report = ReportView::Pending;
        self.last_validation_error = None;

        if self.map_ready {
            effects.push(self.center(point));
        } else {
            self.deferred_center = Some(point);
        }
        effects.push(Effect::IssueLookup(pending));
        true
    }

    fn center(&self, point: Point) -> Effect {
        Effect::CenterMap {
            point,
            zoom: self.focus_zoom,
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
