//! Kakao Map deep links.
//!
//! Builds "directions" links into the Kakao map service. The path
//! scheme is `/link/map/{label},{latitude},{longitude}`.

/// Generate a Kakao map link for a named location.
pub fn kakao_map_url(name: &str, latitude: f64, longitude: f64) -> String {
    format!("https://map.kakao.com/link/map/{name},{latitude},{longitude}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_url() {
        let url = kakao_map_url("한빛전자", 36.362, 127.345);
        assert_eq!(url, "https://map.kakao.com/link/map/한빛전자,36.362,127.345");
    }

    #[test]
    fn interpolation_order_is_name_lat_lon() {
        let url = kakao_map_url("A", 36.1, 127.3);
        assert!(url.ends_with("/link/map/A,36.1,127.3"));
    }
}
