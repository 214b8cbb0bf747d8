//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::bins::{BinTable, DistrictFilter, PickupPoint};

use super::kakao::kakao_map_url;

/// District value meaning "no restriction" in the UI.
pub const ALL_DISTRICTS: &str = "전체";

/// Query parameters for the bin listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct BinQuery {
    /// District to restrict to; omitted, empty, or "전체" means all.
    pub district: Option<String>,

    /// Case-insensitive search over name and address.
    pub q: Option<String>,
}

impl BinQuery {
    /// The district restriction expressed as a filter.
    pub fn district_filter(&self) -> DistrictFilter {
        match self.district.as_deref() {
            None | Some("") | Some(ALL_DISTRICTS) => DistrictFilter::All,
            Some(district) => DistrictFilter::Only(district.to_string()),
        }
    }

    /// The search term, defaulting to empty.
    pub fn search_term(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// One pickup point as served to the map widget.
#[derive(Debug, Clone, Serialize)]
pub struct BinDto {
    /// Marker label
    pub name: String,

    /// Normalized collection address
    pub address: String,

    /// Derived district
    pub district: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Kakao map deep link for directions
    pub directions_url: String,
}

impl BinDto {
    /// Build the marker payload for one point.
    pub fn from_point(point: &PickupPoint) -> Self {
        Self {
            name: point.name.clone(),
            address: point.address.clone(),
            district: point.district.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
            directions_url: kakao_map_url(&point.name, point.latitude, point.longitude),
        }
    }
}

/// Mean coordinate for centering the map view.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Center {
    pub latitude: f64,
    pub longitude: f64,
}

/// Response for `GET /api/bins`.
#[derive(Debug, Serialize)]
pub struct BinsResponse {
    /// Number of bins after filtering
    pub count: usize,

    /// Centroid of the filtered bins; absent when none match, in which
    /// case no map should be rendered
    pub center: Option<Center>,

    /// Filtered bins in source order
    pub bins: Vec<BinDto>,
}

impl BinsResponse {
    /// Build the response for a (possibly filtered) table.
    pub fn from_table(table: &BinTable) -> Self {
        Self {
            count: table.len(),
            center: table
                .centroid()
                .map(|(latitude, longitude)| Center {
                    latitude,
                    longitude,
                }),
            bins: table.points().iter().map(BinDto::from_point).collect(),
        }
    }
}

/// Response for `GET /api/districts`.
#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    /// "전체" followed by every district in ascending order
    pub districts: Vec<String>,
}

/// Request body for `POST /advice`.
#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    /// Free-text device problem description; may be empty
    #[serde(default)]
    pub query: String,
}

/// Response for `POST /advice`.
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    /// Generated advice, or a localized degraded-mode message
    pub reply: String,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> PickupPoint {
        PickupPoint {
            name: "한빛전자".to_string(),
            address: "대전 유성구 대학로 99".to_string(),
            district: "대전 유성구".to_string(),
            latitude: 36.362,
            longitude: 127.345,
        }
    }

    #[test]
    fn sentinel_and_missing_district_mean_no_restriction() {
        let none = BinQuery::default();
        assert_eq!(none.district_filter(), DistrictFilter::All);

        let sentinel = BinQuery {
            district: Some(ALL_DISTRICTS.to_string()),
            q: None,
        };
        assert_eq!(sentinel.district_filter(), DistrictFilter::All);

        let some = BinQuery {
            district: Some("대전 서구".to_string()),
            q: None,
        };
        assert_eq!(
            some.district_filter(),
            DistrictFilter::Only("대전 서구".to_string())
        );
    }

    #[test]
    fn bin_dto_carries_a_directions_link() {
        let dto = BinDto::from_point(&point());
        assert_eq!(
            dto.directions_url,
            "https://map.kakao.com/link/map/한빛전자,36.362,127.345"
        );
    }

    #[test]
    fn empty_table_has_no_center() {
        let response = BinsResponse::from_table(&BinTable::default());
        assert_eq!(response.count, 0);
        assert!(response.center.is_none());
        assert!(response.bins.is_empty());
    }

    #[test]
    fn response_center_is_the_centroid() {
        let table = BinTable::new(vec![point()]);
        let response = BinsResponse::from_table(&table);
        assert_eq!(response.count, 1);

        let center = response.center.unwrap();
        assert_eq!(center.latitude, 36.362);
        assert_eq!(center.longitude, 127.345);
    }
}
