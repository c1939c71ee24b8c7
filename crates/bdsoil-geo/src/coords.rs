//! The `lat, lng` coordinate grammar.
//!
//! Optional sign, digits with an optional fractional part, a comma,
//! optional whitespace and the same again. Input is trimmed first.
//! Range is not checked: `200, 400` is accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::GeoError;

// The pattern is a literal, so construction cannot fail at runtime.
#[allow(clippy::expect_used)]
static GPS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?\d*\.?\d+,\s*[-+]?\d*\.?\d+$").expect("coordinate pattern is valid")
});

/// Whether the text is a well-formed coordinate pair.
pub fn is_valid_gps(text: &str) -> bool {
    GPS_PATTERN.is_match(text.trim())
}

/// Parse a coordinate pair into `(lat, lng)`.
pub fn parse_coords(text: &str) -> Result<(f64, f64), GeoError> {
    let trimmed = text.trim();
    if !is_valid_gps(trimmed) {
        return Err(GeoError::InvalidCoordinates(trimmed.to_owned()));
    }
    let invalid = || GeoError::InvalidCoordinates(trimmed.to_owned());
    let (lat, lng) = trimmed.split_once(',').ok_or_else(invalid)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((lat, lng))
}

/// Format a coordinate pair the way the map picker fills the field.
pub fn format_map_coords(lat: f64, lng: f64) -> String {
    format!("{lat:.6}, {lng:.6}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;

    #[test]
    fn accepts_well_formed_pairs() {
        assert!(is_valid_gps("23.8103, 90.4125"));
        assert!(is_valid_gps("-23.8,90.4"));
        assert!(is_valid_gps("+1,  -2"));
        assert!(is_valid_gps(".5, 1"));
        assert!(is_valid_gps("  23.8103, 90.4125  "));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_valid_gps("23.8"));
        assert!(!is_valid_gps("abc,90"));
        assert!(!is_valid_gps(""));
        assert!(!is_valid_gps("5., 1"));
        assert!(!is_valid_gps("23.8 ,90.4"));
        assert!(!is_valid_gps("1,2,3"));
    }

    #[test]
    fn parses_the_pair() {
        assert_eq!(parse_coords(" -23.8,90.4 ").unwrap(), (-23.8, 90.4));
        assert!(matches!(
            parse_coords("north"),
            Err(GeoError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn map_coords_use_six_decimals() {
        assert_eq!(format_map_coords(23.8, 90.412_512_34), "23.800000, 90.412512");
    }
}
