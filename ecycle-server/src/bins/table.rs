//! The immutable pickup-point table and its query operations.

use std::collections::BTreeSet;

use super::model::PickupPoint;

/// District restriction for [`BinTable::filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrictFilter {
    /// No restriction.
    All,

    /// Exact match against the derived district.
    Only(String),
}

/// Immutable, ordered table of pickup points.
///
/// Built once per source-file version and treated as read-only for the
/// rest of a session. Order follows the source, minus dropped and
/// de-duplicated rows.
///
/// # Examples
///
/// ```
/// use ecycle_server::bins::{BinTable, DistrictFilter, PickupPoint};
///
/// let table = BinTable::new(vec![PickupPoint {
///     name: "한빛전자".to_string(),
///     address: "대전 유성구 대학로 99".to_string(),
///     district: "대전 유성구".to_string(),
///     latitude: 36.36,
///     longitude: 127.34,
/// }]);
///
/// let hits = table.filter(&DistrictFilter::Only("대전 유성구".to_string()), "대학로");
/// assert_eq!(hits.len(), 1);
///
/// let misses = table.filter(&DistrictFilter::Only("대전 서구".to_string()), "");
/// assert!(misses.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinTable {
    points: Vec<PickupPoint>,
}

impl BinTable {
    /// Create a table from already-normalized points.
    pub fn new(points: Vec<PickupPoint>) -> Self {
        Self { points }
    }

    /// The points, in table order.
    pub fn points(&self) -> &[PickupPoint] {
        &self.points
    }

    /// Number of points in the table.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the table has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return the subsequence matching a district restriction and a
    /// search term, preserving order.
    ///
    /// The search term matches case-insensitively against name OR
    /// address; an empty term matches everything. The input table is
    /// not mutated.
    pub fn filter(&self, district: &DistrictFilter, search: &str) -> BinTable {
        let needle = search.to_lowercase();

        let points = self
            .points
            .iter()
            .filter(|point| match district {
                DistrictFilter::All => true,
                DistrictFilter::Only(wanted) => &point.district == wanted,
            })
            .filter(|point| {
                needle.is_empty()
                    || point.name.to_lowercase().contains(&needle)
                    || point.address.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        BinTable::new(points)
    }

    /// Every district value, deduplicated, in ascending lexical order.
    pub fn districts(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .points
            .iter()
            .map(|point| point.district.as_str())
            .collect();

        unique.into_iter().map(str::to_string).collect()
    }

    /// Arithmetic mean (latitude, longitude) of all points, used to
    /// center the map view. `None` for an empty table; callers must not
    /// render a map in that case.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }

        let count = self.points.len() as f64;
        let (lat_sum, lon_sum) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(lat, lon), point| {
                (lat + point.latitude, lon + point.longitude)
            });

        Some((lat_sum / count, lon_sum / count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, address: &str, district: &str, lat: f64, lon: f64) -> PickupPoint {
        PickupPoint {
            name: name.to_string(),
            address: address.to_string(),
            district: district.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn sample_table() -> BinTable {
        BinTable::new(vec![
            point("한빛전자", "대전 유성구 대학로 99", "대전 유성구", 36.362, 127.345),
            point("GS마트 둔산점", "대전 서구 둔산로 55", "대전 서구", 36.351, 127.378),
            point("으능정이 수거함", "대전 중구 중앙로 121", "대전 중구", 36.329, 127.427),
        ])
    }

    #[test]
    fn filter_all_with_empty_search_keeps_everything() {
        let table = sample_table();
        let filtered = table.filter(&DistrictFilter::All, "");
        assert_eq!(filtered, table);
    }

    #[test]
    fn filter_by_district_is_exact() {
        let table = sample_table();
        let filtered = table.filter(&DistrictFilter::Only("대전 서구".to_string()), "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.points()[0].name, "GS마트 둔산점");

        let none = table.filter(&DistrictFilter::Only("대전 동구".to_string()), "");
        assert!(none.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_address() {
        let table = sample_table();

        let by_name = table.filter(&DistrictFilter::All, "gs마트");
        assert_eq!(by_name.len(), 1);

        let by_address = table.filter(&DistrictFilter::All, "대학로");
        assert_eq!(by_address.len(), 1);
        assert_eq!(by_address.points()[0].name, "한빛전자");
    }

    #[test]
    fn filter_preserves_source_order() {
        let table = sample_table();
        let filtered = table.filter(&DistrictFilter::All, "대전");
        let names: Vec<&str> = filtered.points().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["한빛전자", "GS마트 둔산점", "으능정이 수거함"]);
    }

    #[test]
    fn filter_does_not_mutate_input() {
        let table = sample_table();
        let before = table.clone();
        let _ = table.filter(&DistrictFilter::Only("대전 서구".to_string()), "둔산");
        assert_eq!(table, before);
    }

    #[test]
    fn districts_are_sorted_and_unique() {
        let mut points = sample_table().points().to_vec();
        points.push(point("둔산 수거함 2호", "대전 서구 둔산로 60", "대전 서구", 36.352, 127.379));
        let table = BinTable::new(points);

        assert_eq!(table.districts(), ["대전 서구", "대전 유성구", "대전 중구"]);
    }

    #[test]
    fn centroid_of_empty_table_is_none() {
        assert_eq!(BinTable::default().centroid(), None);
    }

    #[test]
    fn centroid_of_single_row_is_that_row() {
        let table = BinTable::new(vec![point("a", "b", "대전 서구", 36.35, 127.38)]);
        assert_eq!(table.centroid(), Some((36.35, 127.38)));
    }

    #[test]
    fn centroid_is_the_mean() {
        let table = BinTable::new(vec![
            point("a", "", "대전 서구", 36.0, 127.0),
            point("b", "", "대전 서구", 37.0, 128.0),
        ]);
        let (lat, lon) = table.centroid().unwrap();
        assert!((lat - 36.5).abs() < 1e-12);
        assert!((lon - 127.5).abs() < 1e-12);
    }
}
