//! Event loop that owns the [`Coordinator`] and executes its effects.
//!
//! UI events and lookup completions share one channel and are applied one at a
//! time. Each lookup runs on its own task and reports back through that
//! channel tagged with its sequence number.

use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{
    coordinator::{Coordinator, Effect, Event},
    lookup::UvLookup,
    map::MapView,
    sequencer::PendingRequest,
    types::ViewSnapshot,
};

#[derive(Debug, Error)]
#[error("coordinator event loop has stopped")]
pub struct CoordinatorClosed;

/// Cloneable producer of UI events.
///
/// Lookup completions are only posted by the event loop itself:
///
/// ```compile_fail
/// fn forge(handle: &client_core::CoordinatorHandle) {
///     let _ = handle.send(client_core::Event::MapReady);
/// }
/// ```
#[derive(Clone)]
pub struct CoordinatorHandle {
    events: mpsc::UnboundedSender<Event>,
}

impl CoordinatorHandle {
    fn send(&self, event: Event) -> Result<(), CoordinatorClosed> {
        self.events.send(event).map_err(|_| CoordinatorClosed)
    }

    pub fn map_ready(&self) -> Result<(), CoordinatorClosed> {
        self.send(Event::MapReady)
    }

    pub fn click(&self, latitude: f64, longitude: f64) -> Result<(), CoordinatorClosed> {
        self.send(Event::Clicked {
            latitude,
            longitude,
        })
    }

    pub fn edit_latitude(&self, text: impl Into<String>) -> Result<(), CoordinatorClosed> {
        self.send(Event::LatitudeEdited(text.into()))
    }

    pub fn edit_longitude(&self, text: impl Into<String>) -> Result<(), CoordinatorClosed> {
        self.send(Event::LongitudeEdited(text.into()))
    }

    pub fn submit(&self) -> Result<(), CoordinatorClosed> {
        self.send(Event::Submitted)
    }
}

pub struct CoordinatorRuntime {
    pub handle: CoordinatorHandle,
    /// Latest view; updated after every state transition.
    pub view: watch::Receiver<ViewSnapshot>,
    /// Completes once every handle is dropped and in-flight lookups have reported.
    pub task: JoinHandle<()>,
}

pub fn spawn<M>(coordinator: Coordinator, lookup: Arc<dyn UvLookup>, map: M) -> CoordinatorRuntime
where
    M: MapView + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(coordinator.snapshot());
    let feedback = events_tx.downgrade();

    let task = tokio::spawn(run(coordinator, lookup, map, feedback, events_rx, view_tx));

    CoordinatorRuntime {
        handle: CoordinatorHandle { events: events_tx },
        view: view_rx,
        task,
    }
}

async fn run<M: MapView>(
    mut coordinator: Coordinator,
    lookup: Arc<dyn UvLookup>,
    mut map: M,
    feedback: mpsc::WeakUnboundedSender<Event>,
    mut events: mpsc::UnboundedReceiver<Event>,
    view: watch::Sender<ViewSnapshot>,
) {
    while let Some(event) = events.recv().await {
        for effect in coordinator.handle(event) {
            match effect {
                Effect::CenterMap { point, zoom } => map.center_on(point, zoom),
                Effect::IssueLookup(pending) => {
                    let Some(reply) = feedback.upgrade() else {
                        warn!(seq = %pending.seq, "all coordinator handles dropped; lookup not issued");
                        continue;
                    };
                    spawn_lookup(Arc::clone(&lookup), pending, reply);
                }
                Effect::Render(snapshot) => {
                    view.send_replace(snapshot);
                }
            }
        }
    }
    debug!("coordinator event loop stopped");
}

fn spawn_lookup(
    lookup: Arc<dyn UvLookup>,
    pending: PendingRequest,
    reply: mpsc::UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let outcome = lookup.lookup(pending.point).await;
        let _ = reply.send(Event::ResponseArrived {
            seq: pending.seq,
            outcome,
        });
    });
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
