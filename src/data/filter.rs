use super::axis::Axis;
use super::model::{Record, YearMonth};

// ---------------------------------------------------------------------------
// Filter state: what the UI currently selects
// ---------------------------------------------------------------------------

/// Explicit UI selection state, recomputed into concrete bounds on every
/// qualifying interaction. Indices address the axis; `current_index` only
/// drives the cosmetic slider label and never affects filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub from_index: usize,
    pub to_index: usize,
    pub current_index: usize,
    /// Exact category to match; empty means "all".
    pub category: String,
}

impl FilterState {
    /// Initial selection spanning the whole axis, slider at the newest key.
    pub fn init(axis: &Axis) -> Self {
        FilterState {
            from_index: 0,
            to_index: axis.last_index(),
            current_index: axis.last_index(),
            category: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds: resolved year-month range, inclusive on both ends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub lower: YearMonth,
    pub upper: YearMonth,
}

/// Resolve the selected indices into concrete axis values. The "from"
/// selector may hold the larger index; the pair is swapped silently.
/// Returns `None` when the axis is empty, which callers treat as a no-op.
pub fn resolve_bounds(axis: &Axis, state: &FilterState) -> Option<Bounds> {
    let lower_index = state.from_index.min(state.to_index);
    let upper_index = state.from_index.max(state.to_index);
    Some(Bounds {
        lower: axis.key(lower_index)?,
        upper: axis.key(upper_index)?,
    })
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Whether a record passes the current bounds and category selection.
///
/// Undated records never pass: the default state spans the whole axis rather
/// than meaning "no bound", so once the axis is non-empty an undated record
/// is always filtered out. Category match is exact and case-sensitive.
pub fn passes(record: &Record, bounds: Bounds, category: &str) -> bool {
    let Some(ym) = record.year_month else {
        return false;
    };
    if ym < bounds.lower || ym > bounds.upper {
        return false;
    }
    if !category.is_empty() && record.category != category {
        return false;
    }
    true
}

/// Evaluate the predicate for every record, in record order.
pub fn evaluate(records: &[Record], bounds: Bounds, category: &str) -> Vec<bool> {
    records
        .iter()
        .map(|r| passes(r, bounds, category))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Position;

    fn rec(ym: Option<u32>, category: &str) -> Record {
        Record {
            position: Position { lat: 0.0, lon: 0.0 },
            title: String::new(),
            raw_date: String::new(),
            year_month: ym.map(YearMonth),
            category: category.to_string(),
            age: String::new(),
            address: String::new(),
            narrative: String::new(),
        }
    }

    fn bounds(lower: u32, upper: u32) -> Bounds {
        Bounds {
            lower: YearMonth(lower),
            upper: YearMonth(upper),
        }
    }

    #[test]
    fn bounds_are_inclusive_on_both_ends() {
        let b = bounds(202101, 202106);
        assert!(passes(&rec(Some(202101), ""), b, ""));
        assert!(passes(&rec(Some(202106), ""), b, ""));
        assert!(!passes(&rec(Some(202012), ""), b, ""));
        assert!(!passes(&rec(Some(202107), ""), b, ""));
    }

    #[test]
    fn category_match_is_exact_and_case_sensitive() {
        let b = bounds(202101, 202201);
        let r = rec(Some(202106), "Brooklyn");
        assert!(passes(&r, b, "Brooklyn"));
        assert!(!passes(&r, b, "brooklyn"));
        assert!(passes(&r, b, ""));
    }

    #[test]
    fn undated_record_never_passes() {
        let b = bounds(190001, 999912);
        assert!(!passes(&rec(None, ""), b, ""));
    }

    #[test]
    fn swapped_indices_resolve_to_same_bounds() {
        let records = vec![rec(Some(202101), ""), rec(Some(202106), "")];
        let axis = Axis::from_records(&records);

        let forward = FilterState {
            from_index: 0,
            to_index: 1,
            ..FilterState::init(&axis)
        };
        let swapped = FilterState {
            from_index: 1,
            to_index: 0,
            ..FilterState::init(&axis)
        };
        assert_eq!(
            resolve_bounds(&axis, &forward),
            resolve_bounds(&axis, &swapped)
        );
    }

    #[test]
    fn empty_axis_resolves_to_none() {
        let axis = Axis::from_records(&[]);
        assert_eq!(resolve_bounds(&axis, &FilterState::init(&axis)), None);
    }

    #[test]
    fn scenario_three_rows_bounds_and_category() {
        let records = vec![
            rec(Some(202101), "A"),
            rec(Some(202106), "B"),
            rec(Some(202201), "A"),
        ];
        let axis = Axis::from_records(&records);
        let state = FilterState {
            from_index: 0,
            to_index: 1,
            ..FilterState::init(&axis)
        };
        let b = resolve_bounds(&axis, &state).unwrap();

        assert_eq!(evaluate(&records, b, ""), vec![true, true, false]);
        assert_eq!(evaluate(&records, b, "A"), vec![true, false, false]);
    }
}
