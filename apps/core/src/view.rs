use crate::dataset::{DataFetchError, Dataset};
use crate::domain::{Direction, Speed};
use crate::loader::{Applied, FetchTicket, LoadStatus, Loader};
use crate::overlay::{render_overlay, Bounds, ImageAsset, RenderedOverlay};
use crate::selection::{DatasetKey, Selection, SelectionError};

/// Selection, loader and overlay wired into one state→fetch→render pipeline.
///
/// Every selection change returns the [`FetchTicket`] the front end must fetch
/// for; results come back through [`WindOverlayView::apply`].
#[derive(Debug)]
pub struct WindOverlayView {
    selection: Selection,
    loader: Loader,
    bounds: Bounds,
    image: ImageAsset,
}

impl Default for WindOverlayView {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

impl WindOverlayView {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            loader: Loader::new(),
            bounds: Bounds::CAMPUS,
            image: ImageAsset::default(),
        }
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn speed(&self) -> Speed {
        self.selection.speed()
    }

    pub const fn direction(&self) -> Direction {
        self.selection.direction()
    }

    pub const fn dataset(&self) -> &Dataset {
        self.loader.dataset()
    }

    pub const fn status(&self) -> LoadStatus {
        self.loader.status()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.loader.last_error()
    }

    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub const fn image(&self) -> &ImageAsset {
        &self.image
    }

    /// First fetch after start-up.
    pub fn start(&mut self) -> FetchTicket {
        let key = self.selection.touch();
        self.dispatch(key)
    }

    pub fn reload(&mut self) -> FetchTicket {
        self.start()
    }

    /// Starts a fetch when the speed actually changed.
    pub fn set_speed(&mut self, value: &str) -> Result<Option<FetchTicket>, SelectionError> {
        let key = self.selection.set_speed(value)?;
        Ok(key.map(|key| self.dispatch(key)))
    }

    pub fn set_direction(&mut self, value: &str) -> Result<Option<FetchTicket>, SelectionError> {
        let key = self.selection.set_direction(value)?;
        Ok(key.map(|key| self.dispatch(key)))
    }

    pub fn select_speed(&mut self, speed: Speed) -> Option<FetchTicket> {
        let key = self.selection.replace_speed(speed)?;
        Some(self.dispatch(key))
    }

    pub fn next_speed(&mut self) -> FetchTicket {
        let key = self.selection.next_speed();
        self.dispatch(key)
    }

    pub fn prev_speed(&mut self) -> FetchTicket {
        let key = self.selection.prev_speed();
        self.dispatch(key)
    }

    pub fn next_direction(&mut self) -> FetchTicket {
        let key = self.selection.next_direction();
        self.dispatch(key)
    }

    pub fn prev_direction(&mut self) -> FetchTicket {
        let key = self.selection.prev_direction();
        self.dispatch(key)
    }

    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Dataset, DataFetchError>,
    ) -> Applied {
        self.loader.complete(ticket, result)
    }

    pub fn overlay(&self) -> RenderedOverlay {
        render_overlay(self.loader.dataset(), &self.bounds, &self.image)
    }

    fn dispatch(&mut self, key: DatasetKey) -> FetchTicket {
        self.loader.begin(self.selection.generation(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::WindOverlayView;
    use crate::dataset::{DataFetchError, Dataset};
    use crate::domain::Speed;
    use crate::loader::{Applied, LoadStatus};
    use crate::overlay::LabelPlacement;

    #[test]
    fn north_at_five_renders_one_label_at_top_edge() {
        let mut view = WindOverlayView::default();
        view.start();

        view.set_speed("5ms").unwrap();
        let ticket = view.set_direction("North (+y)").unwrap().unwrap();
        assert_eq!(ticket.key.asset_path(), "/data/5ms_y.json");

        let body = br#"{"points":[{"x":10,"y":452,"v":2.0}]}"#;
        view.apply(&ticket, Dataset::from_json(body));

        let overlay = view.overlay();
        assert_eq!(overlay.labels.len(), 1);
        assert_eq!(overlay.labels[0].text, "2.0 m/s");
        assert_eq!(
            overlay.labels[0].placement,
            LabelPlacement {
                left: 10.0,
                top: 0.0
            }
        );
    }

    #[test]
    fn failed_fetch_leaves_background_only() {
        let mut view = WindOverlayView::default();
        let ticket = view.start();

        view.apply(&ticket, Err(DataFetchError::Network("offline".into())));

        assert_eq!(view.dataset(), &Dataset::empty());
        assert_eq!(view.status(), LoadStatus::Failed);
        assert!(view.overlay().is_background_only());
    }

    #[test]
    fn latest_direction_wins_when_responses_arrive_in_order() {
        let mut view = WindOverlayView::default();
        let east = view.start();
        let west = view.next_direction();
        let north = view.next_direction();
        assert_eq!(north.key.as_str(), "1ms_y");

        let east_body = br#"{"points":[{"x":1,"y":1,"v":1.0}]}"#;
        let west_body = br#"{"points":[{"x":2,"y":2,"v":2.0}]}"#;
        let north_body = br#"{"points":[{"x":3,"y":3,"v":3.0}]}"#;

        assert_eq!(view.apply(&east, Dataset::from_json(east_body)), Applied::Stale);
        assert_eq!(view.apply(&west, Dataset::from_json(west_body)), Applied::Stale);
        assert_eq!(view.apply(&north, Dataset::from_json(north_body)), Applied::Loaded);

        assert_eq!(view.overlay().labels[0].text, "3.0 m/s");
    }

    #[test]
    fn reselecting_the_current_speed_keeps_the_pending_fetch() {
        let mut view = WindOverlayView::default();
        let ticket = view.start();

        assert_eq!(view.select_speed(Speed::OneMs), None);
        assert_eq!(view.set_speed("1ms"), Ok(None));

        let applied = view.apply(&ticket, Ok(Dataset::empty()));
        assert_eq!(applied, Applied::Loaded);
    }

    #[test]
    fn rejected_selection_does_not_start_a_fetch() {
        let mut view = WindOverlayView::default();
        let ticket = view.start();

        assert!(view.set_speed("2ms").is_err());
        assert_eq!(view.status(), LoadStatus::Loading);

        // The original fetch is still the one the view waits on.
        let applied = view.apply(&ticket, Ok(Dataset::empty()));
        assert_eq!(applied, Applied::Loaded);
    }
}
