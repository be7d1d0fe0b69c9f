use crate::color::CategoryColors;
use crate::data::axis::Axis;
use crate::data::filter::{self, FilterState};
use crate::data::model::Dataset;
use crate::style::MapStyle;
use crate::view::{FilterExpression, ViewAdapter, ViewMode, make_adapter};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Temporal axis derived from the dataset, immutable after load.
    pub axis: Axis,

    /// Current bound/category selection.
    pub filter: FilterState,

    /// Active rendering strategy.
    pub view: Box<dyn ViewAdapter>,

    /// Marker styling, from the style document or built-in defaults.
    pub style: MapStyle,

    /// Per-category marker colours.
    pub colors: CategoryColors,

    /// Show marker titles permanently. Independent of filtering.
    pub show_labels: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(mode: ViewMode, style: MapStyle) -> Self {
        Self {
            dataset: None,
            axis: Axis::default(),
            filter: FilterState::default(),
            view: make_adapter(mode),
            style,
            colors: CategoryColors::default(),
            show_labels: false,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset: derive the axis, reset the selection
    /// to the full range, and apply the initial filter pass.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.axis = Axis::from_records(&dataset.records);
        self.filter = FilterState::init(&self.axis);
        self.colors = CategoryColors::new(&dataset.categories);
        self.view.reset(dataset.len());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// The filter controller: resolve the current selection into concrete
    /// bounds, evaluate the predicate for every record, and hand the outcome
    /// to the view adapter.
    ///
    /// Runs on bound-selector changes, category changes, and slider commits,
    /// never on intermediate drag ticks. With an empty axis this is an
    /// immediate no-op and no record is touched.
    pub fn refilter(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let Some(bounds) = filter::resolve_bounds(&self.axis, &self.filter) else {
            return;
        };

        let visible = filter::evaluate(&dataset.records, bounds, &self.filter.category);
        let expr = FilterExpression::new(bounds, &self.filter.category);
        self.view.apply(&visible, &expr);
    }

    /// Count of records the renderer currently draws.
    pub fn visible_count(&self) -> usize {
        self.dataset.as_ref().map_or(0, |ds| {
            ds.records
                .iter()
                .enumerate()
                .filter(|(i, r)| self.view.is_visible(*i, r))
                .count()
        })
    }

    // -- Cosmetic slider labels (never affect filtering) --

    pub fn min_label(&self) -> &str {
        self.axis.label(0)
    }

    pub fn current_label(&self) -> &str {
        self.axis.label(self.filter.current_index)
    }

    pub fn max_label(&self) -> &str {
        self.axis.label(self.axis.last_index())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
