//! Askama templates for the web frontend.

use askama::Template;

use crate::bins::{BinTable, PickupPoint};

use super::kakao::kakao_map_url;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Main page: filter controls, map, card list, and the chat form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// "전체" plus every district, in display order.
    pub districts: Vec<DistrictOption>,

    /// Currently selected district value (for the map widget).
    pub selected: String,

    /// Current search term, echoed into the input.
    pub search: String,

    /// Number of bins after filtering.
    pub count: usize,

    /// Cards for the filtered bins.
    pub cards: Vec<BinCardView>,

    /// Whether the repair chatbot has a configured credential.
    pub advisor_ready: bool,
}

/// Error page shown when the data source is unavailable.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Card list fragment.
#[derive(Template)]
#[template(path = "bin_list.html")]
pub struct BinListTemplate {
    pub cards: Vec<BinCardView>,
}

/// Repair advice fragment.
#[derive(Template)]
#[template(path = "advice.html")]
pub struct AdviceTemplate {
    pub reply: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One district radio option.
#[derive(Debug, Clone)]
pub struct DistrictOption {
    pub value: String,
    pub checked: bool,
}

impl DistrictOption {
    /// Build the option row: the sentinel first, then every district in
    /// ascending order, with the current selection marked.
    pub fn build(sentinel: &str, districts: Vec<String>, selected: &str) -> Vec<Self> {
        std::iter::once(sentinel.to_string())
            .chain(districts)
            .map(|value| DistrictOption {
                checked: value == selected,
                value,
            })
            .collect()
    }
}

/// Pickup point as shown on a card.
#[derive(Debug, Clone)]
pub struct BinCardView {
    pub name: String,
    pub address: String,
    pub directions_url: String,
}

impl BinCardView {
    /// Create from a pickup point.
    pub fn from_point(point: &PickupPoint) -> Self {
        Self {
            name: point.name.clone(),
            address: point.address.clone(),
            directions_url: kakao_map_url(&point.name, point.latitude, point.longitude),
        }
    }

    /// Cards for every point in a table, in order.
    pub fn from_table(table: &BinTable) -> Vec<Self> {
        table.points().iter().map(Self::from_point).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BinTable {
        BinTable::new(vec![PickupPoint {
            name: "한빛전자".to_string(),
            address: "대전 유성구 대학로 99".to_string(),
            district: "대전 유성구".to_string(),
            latitude: 36.362,
            longitude: 127.345,
        }])
    }

    #[test]
    fn district_options_mark_the_selection() {
        let options = DistrictOption::build(
            "전체",
            vec!["대전 서구".to_string(), "대전 유성구".to_string()],
            "대전 유성구",
        );

        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["전체", "대전 서구", "대전 유성구"]);

        let checked: Vec<bool> = options.iter().map(|o| o.checked).collect();
        assert_eq!(checked, [false, false, true]);
    }

    #[test]
    fn cards_follow_table_order() {
        let cards = BinCardView::from_table(&table());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "한빛전자");
        assert!(cards[0].directions_url.contains("map.kakao.com"));
    }

    #[test]
    fn bin_list_fragment_renders_cards() {
        let template = BinListTemplate {
            cards: BinCardView::from_table(&table()),
        };
        let html = template.render().unwrap();

        assert!(html.contains("한빛전자"));
        assert!(html.contains("대전 유성구 대학로 99"));
        assert!(html.contains("길찾기"));
    }

    #[test]
    fn advice_fragment_renders_the_reply() {
        let template = AdviceTemplate {
            reply: "배터리를 먼저 확인해 보세요.".to_string(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("배터리를 먼저 확인해 보세요."));
    }
}
