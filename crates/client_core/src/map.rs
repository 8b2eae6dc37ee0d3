//! Map widget capability consumed by the coordinator.

use shared::domain::Point;

/// Zoom applied when the map is centered on a fresh selection.
pub const DEFAULT_FOCUS_ZOOM: f64 = 8.0;

/// The rendering widget. Clicks flow in as [`crate::coordinator::Event::Clicked`];
/// this is the command direction.
pub trait MapView: Send {
    fn center_on(&mut self, point: Point, zoom: f64);
}

/// Map that ignores commands, for headless use.
pub struct DetachedMap;

impl MapView for DetachedMap {
    fn center_on(&mut self, point: Point, zoom: f64) {
        tracing::trace!(%point, zoom, "no map attached; dropping center command");
    }
}
