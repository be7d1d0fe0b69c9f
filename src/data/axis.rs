use super::model::{Record, YearMonth};

// ---------------------------------------------------------------------------
// Axis – distinct sorted year-month keys with display labels
// ---------------------------------------------------------------------------

/// The dataset-derived temporal axis: distinct `YearMonth` keys sorted
/// ascending, paired 1:1 with `YYYY-MM` labels. Built once after ingestion
/// and immutable afterwards; the bound selectors and the slider are all
/// index-valued against it.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    keys: Vec<YearMonth>,
    labels: Vec<String>,
}

impl Axis {
    /// Collect the non-null keys of all retained records, dedupe and sort.
    ///
    /// The sort is numeric on the key, not lexicographic on the label, so
    /// the axis stays correct even if the key encoding changes.
    pub fn from_records(records: &[Record]) -> Self {
        let mut keys: Vec<YearMonth> = records.iter().filter_map(|r| r.year_month).collect();
        keys.sort_unstable();
        keys.dedup();
        let labels = keys.iter().map(|ym| ym.to_string()).collect();
        Axis { keys, labels }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// An empty axis means no record carries a parseable date; all
    /// range-dependent UI degrades to a placeholder no-op state.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key(&self, index: usize) -> Option<YearMonth> {
        self.keys.get(index).copied()
    }

    /// Label at `index`, or the placeholder when out of range or empty.
    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map_or("–", String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the newest key; 0 when the axis is empty.
    pub fn last_index(&self) -> usize {
        self.keys.len().saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Position;

    fn rec(ym: Option<u32>) -> Record {
        Record {
            position: Position { lat: 0.0, lon: 0.0 },
            title: String::new(),
            raw_date: String::new(),
            year_month: ym.map(YearMonth),
            category: String::new(),
            age: String::new(),
            address: String::new(),
            narrative: String::new(),
        }
    }

    #[test]
    fn dedupes_and_sorts_numerically() {
        let records = vec![
            rec(Some(202201)),
            rec(Some(202101)),
            rec(None),
            rec(Some(202106)),
            rec(Some(202101)),
        ];
        let axis = Axis::from_records(&records);
        assert_eq!(axis.len(), 3);
        assert_eq!(axis.key(0), Some(YearMonth(202101)));
        assert_eq!(axis.key(1), Some(YearMonth(202106)));
        assert_eq!(axis.key(2), Some(YearMonth(202201)));
    }

    #[test]
    fn keys_strictly_increasing_and_labels_parallel() {
        let records = vec![rec(Some(202003)), rec(Some(201912)), rec(Some(202003))];
        let axis = Axis::from_records(&records);
        for i in 1..axis.len() {
            assert!(axis.key(i - 1).unwrap() < axis.key(i).unwrap());
        }
        assert_eq!(axis.labels().len(), axis.len());
        assert_eq!(axis.label(0), "2019-12");
        assert_eq!(axis.label(1), "2020-03");
    }

    #[test]
    fn empty_axis_degrades_to_placeholder() {
        let axis = Axis::from_records(&[rec(None)]);
        assert!(axis.is_empty());
        assert_eq!(axis.label(0), "–");
        assert_eq!(axis.last_index(), 0);
        assert_eq!(axis.key(0), None);
    }
}
