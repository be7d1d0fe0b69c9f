use std::fmt;

// ---------------------------------------------------------------------------
// YearMonth – sortable temporal bucket
// ---------------------------------------------------------------------------

/// A year-month bucket encoded as `year * 100 + month` (e.g. 2020-03 →
/// `202003`). Numeric order on the encoding agrees with chronological order,
/// which the axis relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(pub u32);

impl YearMonth {
    /// Parse the leading `YYYY-M` / `YYYY/M` prefix of a date string.
    ///
    /// Anything after the month (day, time, trailing text) is ignored.
    /// Returns `None` when the prefix doesn't match or when year or month
    /// coerce to zero.
    pub fn from_date_str(s: &str) -> Option<YearMonth> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() < 6 || !bytes[..4].iter().all(u8::is_ascii_digit) {
            return None;
        }
        if bytes[4] != b'-' && bytes[4] != b'/' {
            return None;
        }

        let mut month = 0u32;
        let mut month_digits = 0;
        for &b in &bytes[5..] {
            if b.is_ascii_digit() && month_digits < 2 {
                month = month * 10 + u32::from(b - b'0');
                month_digits += 1;
            } else {
                break;
            }
        }

        let year: u32 = s[..4].parse().ok()?;
        if year == 0 || month == 0 || month > 12 {
            return None;
        }
        Some(YearMonth(year * 100 + month))
    }

    pub fn year(self) -> u32 {
        self.0 / 100
    }

    pub fn month(self) -> u32 {
        self.0 % 100
    }
}

/// Displays as the axis label form, `YYYY-MM`.
impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

// ---------------------------------------------------------------------------
// Record – one memorial marker
// ---------------------------------------------------------------------------

/// A (latitude, longitude) pair. Both components are finite for every
/// retained record; the loader drops rows that can't satisfy that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// One memorial marker, normalized from a loosely-typed CSV row. Field
/// aliasing is resolved once at ingestion; nothing downstream looks rows up
/// by column name again.
#[derive(Debug, Clone)]
pub struct Record {
    pub position: Position,
    /// Display name; the loader substitutes a placeholder when absent.
    pub title: String,
    /// Original date string, kept verbatim for popups. Never re-parsed.
    pub raw_date: String,
    /// Temporal bucket derived from `raw_date`, `None` when unparseable.
    /// Undated records are retained but never pass a bounded filter.
    pub year_month: Option<YearMonth>,
    /// Trimmed grouping field (borough); empty means uncategorized.
    pub category: String,
    pub age: String,
    pub address: String,
    pub narrative: String,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All retained records plus the sorted set of distinct categories,
/// pre-computed once at load time. Immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Distinct non-empty categories, sorted, for the category selector.
    pub categories: Vec<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut categories: Vec<String> = records
            .iter()
            .filter(|r| !r.category.is_empty())
            .map(|r| r.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Dataset {
            records,
            categories,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_date() {
        assert_eq!(
            YearMonth::from_date_str("2020-03-15"),
            Some(YearMonth(202003))
        );
    }

    #[test]
    fn parses_slash_separator_and_single_digit_month() {
        assert_eq!(YearMonth::from_date_str("2021/6"), Some(YearMonth(202106)));
        assert_eq!(
            YearMonth::from_date_str("2021-6-02"),
            Some(YearMonth(202106))
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            YearMonth::from_date_str("  2019-11 "),
            Some(YearMonth(201911))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(YearMonth::from_date_str("unknown"), None);
        assert_eq!(YearMonth::from_date_str(""), None);
        assert_eq!(YearMonth::from_date_str("March 2020"), None);
        assert_eq!(YearMonth::from_date_str("20-03-15"), None);
    }

    #[test]
    fn rejects_zero_year_or_month() {
        assert_eq!(YearMonth::from_date_str("0000-03"), None);
        assert_eq!(YearMonth::from_date_str("2020-0"), None);
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert_eq!(YearMonth::from_date_str("2020-13"), None);
    }

    #[test]
    fn label_round_trip() {
        let ym = YearMonth::from_date_str("2020-03-15").unwrap();
        assert_eq!(ym.to_string(), "2020-03");
    }

    #[test]
    fn dataset_collects_sorted_distinct_categories() {
        let rec = |cat: &str| Record {
            position: Position { lat: 0.0, lon: 0.0 },
            title: String::new(),
            raw_date: String::new(),
            year_month: None,
            category: cat.to_string(),
            age: String::new(),
            address: String::new(),
            narrative: String::new(),
        };
        let ds = Dataset::from_records(vec![
            rec("Queens"),
            rec("Brooklyn"),
            rec(""),
            rec("Queens"),
        ]);
        assert_eq!(ds.categories, vec!["Brooklyn", "Queens"]);
        assert_eq!(ds.len(), 4);
    }
}
