use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// Coordinates are stored as text; anything that doesn't parse to a valid
    /// point is treated as "no location".
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat = lat.trim().replace(',', ".").parse::<f64>().ok()?;
        let lng = lng.trim().replace(',', ".").parse::<f64>().ok()?;
        Self::new(lat, lng)
    }
}

/// Haversine great-circle distance in kilometres.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp() -> Coordinates {
        Coordinates::new(-23.5505, -46.6333).unwrap()
    }

    fn rio() -> Coordinates {
        Coordinates::new(-22.9068, -43.1729).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(sp(), sp()), 0.0);
        assert_eq!(distance_km(rio(), rio()), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance_km(sp(), rio()), distance_km(rio(), sp()));
    }

    #[test]
    fn sao_paulo_to_rio() {
        let d = distance_km(sp(), rio());
        assert!((d - 361.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn parse_accepts_text_columns() {
        let c = Coordinates::parse(" -23.5505", "-46,6333 ").unwrap();
        assert_eq!(c, sp());
    }

    #[test]
    fn parse_rejects_garbage_and_out_of_range() {
        assert!(Coordinates::parse("", "-46.6").is_none());
        assert!(Coordinates::parse("abc", "-46.6").is_none());
        assert!(Coordinates::parse("NaN", "-46.6").is_none());
        assert!(Coordinates::parse("91", "0").is_none());
        assert!(Coordinates::parse("0", "-181").is_none());
    }
}
