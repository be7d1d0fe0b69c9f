use crate::data::filter::Bounds;
use crate::data::model::{Record, YearMonth};

// ---------------------------------------------------------------------------
// Filter expression (declarative mode)
// ---------------------------------------------------------------------------

/// One boolean filter expression: a year-month range clause conjoined with an
/// optional category-equality clause. The declarative backend receives this
/// once per filter change and evaluates it per point at draw time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    pub lower: YearMonth,
    pub upper: YearMonth,
    /// `None` means no category clause.
    pub category: Option<String>,
}

impl FilterExpression {
    pub fn new(bounds: Bounds, category: &str) -> Self {
        FilterExpression {
            lower: bounds.lower,
            upper: bounds.upper,
            category: if category.is_empty() {
                None
            } else {
                Some(category.to_string())
            },
        }
    }

    /// Evaluate the expression against one record. Must agree with the
    /// imperative predicate decision for the same bounds and category.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(ym) = record.year_month else {
            return false;
        };
        if ym < self.lower || ym > self.upper {
            return false;
        }
        match &self.category {
            Some(cat) => record.category == *cat,
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// View adapter: strategy seam towards the rendering backend
// ---------------------------------------------------------------------------

/// Which rendering strategy to run, chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Add/remove individual markers (the raster-tile variant).
    Imperative,
    /// Submit one filter expression per change (the vector-style variant).
    Declarative,
}

/// Translates filter decisions into calls against the active rendering
/// backend. Exactly one strategy is live per session.
pub trait ViewAdapter {
    /// Prepare for a freshly loaded dataset of `len` records, all shown.
    fn reset(&mut self, len: usize);

    /// Push one filter change. `visible` holds the per-record predicate
    /// outcomes, `expr` the equivalent declarative expression; each strategy
    /// consumes one of the two.
    fn apply(&mut self, visible: &[bool], expr: &FilterExpression);

    /// Whether the renderer should draw record `index`.
    fn is_visible(&self, index: usize, record: &Record) -> bool;
}

pub fn make_adapter(mode: ViewMode) -> Box<dyn ViewAdapter> {
    match mode {
        ViewMode::Imperative => Box::new(MarkerView::default()),
        ViewMode::Declarative => Box::new(ExpressionView::default()),
    }
}

// ---------------------------------------------------------------------------
// Imperative strategy
// ---------------------------------------------------------------------------

/// Keeps one displayed-flag per marker and issues add/remove transitions.
/// Applying an unchanged filter is a no-op: a marker already in the desired
/// state is never re-added or re-removed.
#[derive(Debug, Default)]
pub struct MarkerView {
    displayed: Vec<bool>,
    /// Add/remove calls issued by the most recent `apply`.
    last_changes: usize,
}

impl MarkerView {
    pub fn last_changes(&self) -> usize {
        self.last_changes
    }
}

impl ViewAdapter for MarkerView {
    fn reset(&mut self, len: usize) {
        // All markers start on the map, matching the unfiltered initial view.
        self.displayed = vec![true; len];
        self.last_changes = 0;
    }

    fn apply(&mut self, visible: &[bool], _expr: &FilterExpression) {
        let mut changes = 0;
        for (shown, &want) in self.displayed.iter_mut().zip(visible) {
            if *shown != want {
                *shown = want;
                changes += 1;
            }
        }
        self.last_changes = changes;
        log::debug!("Marker view: {changes} add/remove transitions");
    }

    fn is_visible(&self, index: usize, _record: &Record) -> bool {
        self.displayed.get(index).copied().unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Declarative strategy
// ---------------------------------------------------------------------------

/// Holds the last submitted filter expression; the renderer evaluates it per
/// point at draw time. Before the first submission everything is shown.
#[derive(Debug, Default)]
pub struct ExpressionView {
    expr: Option<FilterExpression>,
}

impl ExpressionView {
    pub fn current(&self) -> Option<&FilterExpression> {
        self.expr.as_ref()
    }
}

impl ViewAdapter for ExpressionView {
    fn reset(&mut self, _len: usize) {
        self.expr = None;
    }

    fn apply(&mut self, _visible: &[bool], expr: &FilterExpression) {
        if self.expr.as_ref() != Some(expr) {
            log::debug!("Expression view: submitting {expr:?}");
        }
        self.expr = Some(expr.clone());
    }

    fn is_visible(&self, _index: usize, record: &Record) -> bool {
        match &self.expr {
            Some(expr) => expr.matches(record),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
