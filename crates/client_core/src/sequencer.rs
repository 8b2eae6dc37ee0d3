//! Issues lookups and decides which completion may reach the view.

use serde_json::Value;
use shared::domain::{Point, RequestSeq};
use tracing::debug;

use crate::{error::RetrievalError, projector::project, types::UvReport};

/// One in-flight lookup, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRequest {
    pub seq: RequestSeq,
    pub point: Point,
}

#[derive(Debug, Default)]
pub struct RetrievalSequencer {
    latest: Option<RequestSeq>,
    /// Sequence still allowed to commit; cleared once it settles.
    outstanding: Option<RequestSeq>,
}

impl RetrievalSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, point: Point) -> PendingRequest {
        let seq = self.latest.map_or(RequestSeq(1), RequestSeq::next);
        if let Some(superseded) = self.outstanding {
            debug!(%superseded, %seq, "superseding in-flight uv lookup");
        }
        self.latest = Some(seq);
        self.outstanding = Some(seq);
        PendingRequest { seq, point }
    }

    pub fn latest(&self) -> Option<RequestSeq> {
        self.latest
    }

    pub fn is_outstanding(&self, seq: RequestSeq) -> bool {
        self.outstanding == Some(seq)
    }

    /// Returns the outcome to commit, or `None` when `seq` was superseded or
    /// already settled.
    pub fn settle(
        &mut self,
        seq: RequestSeq,
        outcome: Result<Value, RetrievalError>,
    ) -> Option<Result<UvReport, RetrievalError>> {
        if !self.is_outstanding(seq) {
            debug!(%seq, latest = ?self.latest, "discarding stale uv lookup result");
            return None;
        }
        self.outstanding = None;
        Some(outcome.and_then(|raw| project(&raw).map_err(RetrievalError::from)))
    }
}
