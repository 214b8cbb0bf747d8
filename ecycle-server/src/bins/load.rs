//! CSV loading and normalization.
//!
//! The source is a UTF-8 (optionally BOM-prefixed) CSV with localized
//! headers. Loading runs the cleaning steps in a fixed order: trim
//! headers and string cells, normalize the metro-area prefix in the
//! address, derive the district, drop rows without coordinates or a
//! district, then collapse exact duplicates keeping the first
//! occurrence. Each step narrows itself to the columns the source
//! actually has, so a malformed file degrades instead of failing.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::error::DataError;
use super::model::PickupPoint;
use super::table::BinTable;

/// Header of the establishment-name column.
pub const NAME_COLUMN: &str = "상호명";

/// Header of the collection-address column.
pub const ADDRESS_COLUMN: &str = "수거장소(주소)";

/// Header of the latitude column.
pub const LATITUDE_COLUMN: &str = "위도";

/// Header of the longitude column.
pub const LONGITUDE_COLUMN: &str = "경도";

/// Long form of the metro-area name as it appears in source addresses.
const METRO_LONG: &str = "대전광역시";

/// Short form used for consistent matching.
const METRO_SHORT: &str = "대전";

/// District pattern: the short metro name, optional whitespace, then a
/// run of non-whitespace ending in the administrative-district suffix.
static DISTRICT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"대전\s?\S+구").expect("district pattern is valid"));

/// Column indices resolved from the header row. A `None` means the
/// source does not have that column.
#[derive(Debug, Default, Clone, Copy)]
struct Columns {
    name: Option<usize>,
    address: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let mut columns = Columns::default();

        for (index, raw) in headers.iter().enumerate() {
            // The first header may carry a UTF-8 BOM
            let header = raw.trim_start_matches('\u{feff}').trim();
            match header {
                NAME_COLUMN if columns.name.is_none() => columns.name = Some(index),
                ADDRESS_COLUMN if columns.address.is_none() => columns.address = Some(index),
                LATITUDE_COLUMN if columns.latitude.is_none() => columns.latitude = Some(index),
                LONGITUDE_COLUMN if columns.longitude.is_none() => {
                    columns.longitude = Some(index);
                }
                _ => {}
            }
        }

        columns
    }

    /// Whether any of the duplicate-identity columns is present.
    fn has_identity(&self) -> bool {
        self.name.is_some()
            || self.address.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
    }
}

/// One row after cleaning, before the drop and dedup steps.
#[derive(Debug, Clone)]
struct RawRow {
    name: Option<String>,
    address: Option<String>,
    district: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Identity key for duplicate detection, restricted to the columns
/// present in the source. Absent columns contribute `None` uniformly
/// and never distinguish rows.
#[derive(Debug, PartialEq, Eq, Hash)]
struct IdentityKey {
    name: Option<String>,
    address: Option<String>,
    latitude: Option<u64>,
    longitude: Option<u64>,
}

impl IdentityKey {
    fn of(row: &RawRow, columns: &Columns) -> Self {
        Self {
            name: columns.name.and(row.name.clone()),
            address: columns.address.and(row.address.clone()),
            latitude: columns.latitude.and(row.latitude).map(f64::to_bits),
            longitude: columns.longitude.and(row.longitude).map(f64::to_bits),
        }
    }
}

/// Fetch and trim a cell; empty cells and absent columns are `None`.
fn cell(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    let raw = record.get(index?)?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Literal substring replacement of the long metro name with its short
/// form (not a pattern).
fn normalize_address(address: &str) -> String {
    address.replace(METRO_LONG, METRO_SHORT)
}

/// Derive the district from a normalized address. First match wins;
/// no match means the row has no district.
fn extract_district(address: &str) -> Option<String> {
    DISTRICT_PATTERN
        .find(address)
        .map(|found| found.as_str().to_string())
}

/// Coordinate cells that fail to parse count as missing.
fn parse_coordinate(cell: Option<String>) -> Option<f64> {
    cell?.parse::<f64>().ok()
}

/// Load and normalize the bin table from a CSV source.
///
/// Row order follows the source, minus dropped and de-duplicated rows.
///
/// # Errors
///
/// Returns [`DataError::Unavailable`] if the path does not exist and
/// [`DataError::Csv`] if the file is not parseable CSV. Missing columns
/// are not an error: each cleaning step operates only on the columns
/// actually present.
pub fn load_table(path: &Path) -> Result<BinTable, DataError> {
    if !path.exists() {
        return Err(DataError::Unavailable(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let columns = Columns::resolve(reader.headers()?);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        let name = cell(&record, columns.name);
        let address = cell(&record, columns.address).map(|raw| normalize_address(&raw));
        let district = address.as_deref().and_then(extract_district);
        let latitude = parse_coordinate(cell(&record, columns.latitude));
        let longitude = parse_coordinate(cell(&record, columns.longitude));

        rows.push(RawRow {
            name,
            address,
            district,
            latitude,
            longitude,
        });
    }

    // Drop rows missing a value in {latitude, longitude, district},
    // narrowed to the columns the source has. The district derives from
    // the address column, so its presence follows it.
    rows.retain(|row| {
        (columns.latitude.is_none() || row.latitude.is_some())
            && (columns.longitude.is_none() || row.longitude.is_some())
            && (columns.address.is_none() || row.district.is_some())
    });

    // Collapse exact duplicates on the identity subset, keeping the
    // first occurrence. With no identity column present, every row
    // passes through.
    if columns.has_identity() {
        let mut seen = HashSet::new();
        rows.retain(|row| seen.insert(IdentityKey::of(row, &columns)));
    }

    let mut points = Vec::with_capacity(rows.len());
    let mut unmaterialized = 0usize;
    for row in rows {
        match (row.latitude, row.longitude, row.district) {
            (Some(latitude), Some(longitude), Some(district)) => points.push(PickupPoint {
                name: row.name.unwrap_or_default(),
                address: row.address.unwrap_or_default(),
                district,
                latitude,
                longitude,
            }),
            _ => unmaterialized += 1,
        }
    }

    if unmaterialized > 0 {
        tracing::warn!(
            rows = unmaterialized,
            "source lacks coordinate or address columns; rows without them were dropped"
        );
    }

    Ok(BinTable::new(points))
}
