use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Dataset, Position, Record, YearMonth};

/// Placeholder title for rows without a name, matching the source dataset.
const DEFAULT_TITLE: &str = "Ghost Bike";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a marker dataset from a file. Dispatch by extension.
///
/// Only CSV sources exist today; the dispatch mirrors how new formats would
/// slot in. A file that reads cleanly but contains no usable rows is an
/// `Ok` empty dataset, distinct from a read failure.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening dataset {}", path.display()))?;
            load_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a CSV source into retained records.
///
/// Header names are matched case-insensitively (`latitude`/`Latitude` both
/// work); the aliasing is resolved once here and nothing downstream touches
/// column names again. Per-row defects never fail the load:
/// * unreadable or ragged row → row dropped
/// * missing or non-finite latitude/longitude → row dropped
/// * unparseable date → record retained with a null temporal key
/// * missing text fields → empty string (or the title placeholder)
pub fn load_csv<R: Read>(source: R) -> Result<Dataset> {
    // Flexible: a row with a deviant field count is data to salvage, not a
    // reason to fail the whole source.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let columns = column_index(reader.headers().context("reading CSV headers")?);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Skipping unreadable CSV row {row_no}: {e}");
                dropped += 1;
                continue;
            }
        };
        let field = |name: &str| -> &str {
            columns
                .get(name)
                .and_then(|&i| row.get(i))
                .unwrap_or("")
        };

        let lat: f64 = field("latitude").trim().parse().unwrap_or(f64::NAN);
        let lon: f64 = field("longitude").trim().parse().unwrap_or(f64::NAN);
        if !lat.is_finite() || !lon.is_finite() {
            dropped += 1;
            continue;
        }

        let raw_date = field("date").to_string();
        let title = match field("name") {
            "" => DEFAULT_TITLE.to_string(),
            name => name.to_string(),
        };

        records.push(Record {
            position: Position { lat, lon },
            title,
            year_month: YearMonth::from_date_str(&raw_date),
            raw_date,
            category: field("borough").trim().to_string(),
            age: field("age").to_string(),
            address: field("full_address").to_string(),
            narrative: field("narrative").to_string(),
        });
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} unusable rows");
    }
    Ok(Dataset::from_records(records))
}

/// Map lowercased header names to column positions. First occurrence wins.
fn column_index(headers: &csv::StringRecord) -> BTreeMap<String, usize> {
    let mut columns = BTreeMap::new();
    for (i, h) in headers.iter().enumerate() {
        columns.entry(h.trim().to_ascii_lowercase()).or_insert(i);
    }
    columns
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv_text: &str) -> Dataset {
        load_csv(csv_text.as_bytes()).unwrap()
    }

    #[test]
    fn parses_valid_rows_with_case_insensitive_headers() {
        let ds = load(
            "Latitude,Longitude,Date,name,Borough,age,full_address,narrative\n\
             40.7,-73.9,2020-03-15,Jane Doe,Brooklyn,34,123 Main St,Struck at dawn\n",
        );
        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(r.position.lat, 40.7);
        assert_eq!(r.position.lon, -73.9);
        assert_eq!(r.title, "Jane Doe");
        assert_eq!(r.year_month, Some(YearMonth(202003)));
        assert_eq!(r.raw_date, "2020-03-15");
        assert_eq!(r.category, "Brooklyn");
        assert_eq!(r.age, "34");
        assert_eq!(r.address, "123 Main St");
        assert_eq!(r.narrative, "Struck at dawn");
    }

    #[test]
    fn drops_rows_without_finite_coordinates() {
        let ds = load(
            "latitude,longitude,date\n\
             ,-73.9,2020-01-01\n\
             NaN,-73.9,2020-01-01\n\
             40.7,not-a-number,2020-01-01\n\
             40.7,-73.9,2020-01-01\n",
        );
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn retains_rows_with_unparseable_dates() {
        let ds = load(
            "latitude,longitude,date\n\
             40.7,-73.9,unknown\n\
             40.8,-73.8,\n",
        );
        assert_eq!(ds.len(), 2);
        assert!(ds.records.iter().all(|r| r.year_month.is_none()));
    }

    #[test]
    fn substitutes_title_placeholder_and_trims_category() {
        let ds = load(
            "latitude,longitude,borough\n\
             40.7,-73.9,  Queens \n",
        );
        assert_eq!(ds.records[0].title, "Ghost Bike");
        assert_eq!(ds.records[0].category, "Queens");
    }

    #[test]
    fn missing_columns_yield_empty_fields() {
        let ds = load("latitude,longitude\n40.7,-73.9\n");
        let r = &ds.records[0];
        assert_eq!(r.raw_date, "");
        assert_eq!(r.year_month, None);
        assert_eq!(r.category, "");
    }

    #[test]
    fn ragged_rows_do_not_fail_the_load() {
        // One row with an extra trailing field, one missing fields entirely.
        let ds = load(
            "latitude,longitude,date\n\
             40.7,-73.9,2020-01-01,EXTRA\n\
             40.8\n\
             40.9,-73.8,2021-06-01\n",
        );
        // The extra-field row is salvaged; the short row has no longitude
        // and is dropped like any other missing-coordinate row.
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year_month, Some(YearMonth(202001)));
        assert_eq!(ds.records[1].year_month, Some(YearMonth(202106)));
    }

    #[test]
    fn empty_source_is_ok_not_error() {
        let ds = load("latitude,longitude,date\n");
        assert!(ds.is_empty());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        assert!(load_file(Path::new("markers.parquet")).is_err());
    }
}
