//! Point selection and UV retrieval coordinator.
//!
//! A map widget and a coordinate form feed candidate points in; the
//! coordinator validates them, issues one lookup per accepted point against the
//! UV proxy, drops responses that belong to superseded selections, and
//! publishes a [`ViewSnapshot`] after every transition.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub mod config;
pub mod coordinator;
pub mod error;
pub mod lookup;
pub mod map;
pub mod projector;
pub mod reconciler;
pub mod runtime;
pub mod sequencer;
pub mod types;

pub use config::{load_client_settings, ClientSettings};
pub use coordinator::{Coordinator, Effect, Event};
pub use error::{ProjectionError, RetrievalError};
pub use lookup::{HttpUvLookup, UvLookup};
pub use map::{DetachedMap, MapView};
pub use runtime::{CoordinatorClosed, CoordinatorHandle, CoordinatorRuntime};
pub use types::{FormDraft, ReportView, UvReport, ViewSnapshot};

/// Builds the HTTP lookup from `settings` and starts the event loop on the
/// current tokio runtime.
pub fn start<M>(settings: &ClientSettings, map: M) -> Result<CoordinatorRuntime>
where
    M: MapView + 'static,
{
    let lookup = HttpUvLookup::from_settings(settings)?;
    info!(endpoint = %lookup.endpoint(), "starting uv coordinator");
    Ok(runtime::spawn(
        Coordinator::new(settings.focus_zoom),
        Arc::new(lookup),
        map,
    ))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
