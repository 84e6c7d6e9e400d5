//! Map overlay controller.
//!
//! Lazily constructs the map through the [`MapSurface`] capability, replaces
//! the marker set per dataset filter, and rolls the filter control back on
//! empty or failed loads. Every load carries an epoch token so a response
//! that arrives after a newer filter click is discarded instead of mutating
//! the fresh overlay.

use std::sync::Arc;

use smartday_core::backend::MapApi;
use smartday_core::error::Result;
use smartday_core::map::{
    MapDataset, MapSurface, MarkerId, MarkerSet, PointOfInterest, DEFAULT_CENTER, DEFAULT_ZOOM,
};
use tracing::{debug, error, warn};

/// Modal notices the shell must show to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapNotice {
    /// The backend returned an empty result set.
    Empty,
    /// The request failed outright.
    LoadFailed,
}

impl MapNotice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "No data to display.",
            Self::LoadFailed => {
                "Could not load data. Check that the backend server is running."
            }
        }
    }
}

/// What [`MapOverlayController::ensure_initialized`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// First construction succeeded; the caller must start the default
    /// dataset load with the first filter control.
    Constructed,
    /// Already constructed; the existing instance was relayouted.
    Relayout,
    /// Construction failed; the next call retries.
    Failed,
}

/// Token tying a marker response to the load that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    dataset: MapDataset,
    epoch: u64,
}

impl LoadTicket {
    pub fn dataset(&self) -> MapDataset {
        self.dataset
    }
}

pub struct MapOverlayController<S: MapSurface> {
    surface: S,
    api: Arc<dyn MapApi>,
    initialized: bool,
    markers: MarkerSet,
    active_control: Option<MapDataset>,
    epoch: u64,
}

impl<S: MapSurface> MapOverlayController<S> {
    pub fn new(surface: S, api: Arc<dyn MapApi>) -> Self {
        Self {
            surface,
            api,
            initialized: false,
            markers: MarkerSet::new(),
            active_control: None,
            epoch: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// The filter control currently marked active, if any.
    pub fn active_control(&self) -> Option<MapDataset> {
        self.active_control
    }

    /// Constructs the map at most once per process.
    ///
    /// Repeat calls relayout the existing instance instead (the container
    /// may have been hidden and shown since). A construction failure is
    /// logged and leaves the instance unset so re-navigation retries.
    pub fn ensure_initialized(&mut self) -> InitOutcome {
        if self.initialized {
            self.surface.relayout();
            return InitOutcome::Relayout;
        }
        match self.surface.construct(DEFAULT_CENTER, DEFAULT_ZOOM) {
            Ok(()) => {
                self.initialized = true;
                InitOutcome::Constructed
            }
            Err(err) => {
                error!("failed to construct map: {err}");
                InitOutcome::Failed
            }
        }
    }

    /// Starts a marker load: marks the filter control active, clears the
    /// previous marker set, and returns the dispatch ticket. `None` without
    /// an initialized map.
    pub fn begin_load(&mut self, dataset: MapDataset) -> Option<LoadTicket> {
        if !self.initialized {
            return None;
        }
        self.active_control = Some(dataset);
        self.clear_markers();
        self.epoch += 1;
        Some(LoadTicket {
            dataset,
            epoch: self.epoch,
        })
    }

    fn clear_markers(&mut self) {
        for entry in self.markers.drain() {
            self.surface.close_info(entry.id);
            self.surface.remove_marker(entry.id);
        }
    }

    /// Applies a completed load.
    ///
    /// A ticket from a superseded load is dropped without side effects. An
    /// empty result or a failure reverts the triggering control to inactive
    /// (markers stay cleared; the previous set is not restored) and yields
    /// the notice to show.
    pub fn apply_result(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<PointOfInterest>>,
    ) -> Option<MapNotice> {
        if ticket.epoch != self.epoch {
            debug!("discarding stale marker response for {}", ticket.dataset);
            return None;
        }
        match result {
            Ok(points) if points.is_empty() => {
                self.active_control = None;
                Some(MapNotice::Empty)
            }
            Ok(points) => {
                for point in points {
                    let id = self.surface.place_marker(&point);
                    self.markers.push(id, point);
                }
                None
            }
            Err(err) => {
                warn!("marker load failed: {err}");
                self.active_control = None;
                Some(MapNotice::LoadFailed)
            }
        }
    }

    /// Loads a dataset end to end.
    pub async fn load_markers(&mut self, dataset: MapDataset) -> Option<MapNotice> {
        let ticket = self.begin_load(dataset)?;
        let result = self.api.fetch_points(dataset).await;
        self.apply_result(&ticket, result)
    }

    /// Handle for dispatching the fetch from a spawned task.
    pub fn api_handle(&self) -> Arc<dyn MapApi> {
        self.api.clone()
    }

    /// Hovering a marker opens its info window.
    pub fn hover_marker(&mut self, id: MarkerId) {
        self.surface.open_info(id);
    }

    /// Leaving a marker closes its info window.
    pub fn leave_marker(&mut self, id: MarkerId) {
        self.surface.close_info(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{poi, FakeMapApi, FakeSurface};
    use smartday_core::error::SmartdayError;

    fn controller(
        surface: FakeSurface,
        response: Result<Vec<PointOfInterest>>,
    ) -> MapOverlayController<FakeSurface> {
        MapOverlayController::new(surface, Arc::new(FakeMapApi::replying(response)))
    }

    #[test]
    fn ensure_initialized_constructs_exactly_once() {
        let mut map = controller(FakeSurface::default(), Ok(vec![]));

        assert_eq!(map.ensure_initialized(), InitOutcome::Constructed);
        assert_eq!(map.ensure_initialized(), InitOutcome::Relayout);
        assert_eq!(map.ensure_initialized(), InitOutcome::Relayout);

        assert_eq!(map.surface().construct_calls, 1);
        assert_eq!(map.surface().relayout_calls, 2);
    }

    #[test]
    fn failed_construction_is_retried_on_the_next_call() {
        let mut map = controller(FakeSurface::failing(), Ok(vec![]));
        assert_eq!(map.ensure_initialized(), InitOutcome::Failed);
        assert!(!map.is_initialized());

        map.surface_mut().fail_construct = false;
        assert_eq!(map.ensure_initialized(), InitOutcome::Constructed);
        assert!(map.is_initialized());
    }

    #[tokio::test]
    async fn load_before_initialization_is_a_no_op() {
        let mut map = controller(FakeSurface::default(), Ok(vec![poi("a")]));
        assert_eq!(map.load_markers(MapDataset::Parks).await, None);
        assert!(map.markers().is_empty());
        assert_eq!(map.active_control(), None);
    }

    #[tokio::test]
    async fn successful_load_places_one_marker_per_point() {
        let mut map = controller(
            FakeSurface::default(),
            Ok(vec![poi("a"), poi("b"), poi("c")]),
        );
        map.ensure_initialized();

        let notice = map.load_markers(MapDataset::Parks).await;
        assert_eq!(notice, None);
        assert_eq!(map.markers().len(), 3);
        assert_eq!(map.active_control(), Some(MapDataset::Parks));
    }

    #[tokio::test]
    async fn empty_result_reverts_the_control_and_leaves_markers_cleared() {
        let mut map = controller(FakeSurface::default(), Ok(vec![]));
        map.ensure_initialized();

        let notice = map.load_markers(MapDataset::Restaurants).await;
        assert_eq!(notice, Some(MapNotice::Empty));
        assert!(map.markers().is_empty());
        assert_eq!(map.active_control(), None);
    }

    #[tokio::test]
    async fn failed_load_reverts_the_control() {
        let mut map = controller(
            FakeSurface::default(),
            Err(SmartdayError::network("connection refused")),
        );
        map.ensure_initialized();

        let notice = map.load_markers(MapDataset::Parks).await;
        assert_eq!(notice, Some(MapNotice::LoadFailed));
        assert!(map.markers().is_empty());
        assert_eq!(map.active_control(), None);
    }

    #[tokio::test]
    async fn switching_filters_clears_the_previous_overlay_set() {
        let mut map = controller(
            FakeSurface::default(),
            Ok(vec![poi("a"), poi("b")]),
        );
        map.ensure_initialized();
        map.load_markers(MapDataset::Parks).await;
        let first_ids: Vec<MarkerId> =
            map.markers().entries().iter().map(|e| e.id).collect();

        map.load_markers(MapDataset::Restaurants).await;

        // Every previous marker was closed and removed before the new set.
        for id in &first_ids {
            assert!(map.surface().closed.contains(id));
            assert!(map.surface().removed.contains(id));
        }
        assert_eq!(map.markers().len(), 2);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut map = controller(FakeSurface::default(), Ok(vec![]));
        map.ensure_initialized();

        let stale = map.begin_load(MapDataset::Parks).unwrap();
        // A newer click supersedes the first load before its response lands.
        let fresh = map.begin_load(MapDataset::Restaurants).unwrap();

        assert_eq!(map.apply_result(&stale, Ok(vec![poi("late")])), None);
        assert!(map.markers().is_empty());
        assert_eq!(map.active_control(), Some(MapDataset::Restaurants));

        map.apply_result(&fresh, Ok(vec![poi("fresh")]));
        assert_eq!(map.markers().len(), 1);
    }

    #[test]
    fn hover_opens_and_leave_closes_the_info_window() {
        let mut map = controller(FakeSurface::default(), Ok(vec![]));
        map.ensure_initialized();
        map.hover_marker(5);
        map.leave_marker(5);
        assert_eq!(map.surface().opened, vec![5]);
        assert_eq!(map.surface().closed, vec![5]);
    }
}
