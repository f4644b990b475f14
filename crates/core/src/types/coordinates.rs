//! Geographic coordinates.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Coordinates`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CoordinatesError {
    /// One or both of the two coordinate inputs is empty.
    #[error("both latitude and longitude are required")]
    Missing,
    /// A coordinate input is not a number.
    #[error("coordinate is not a number: {0}")]
    NotANumber(String),
    /// Latitude outside [-90, 90].
    #[error("latitude {0} is out of range")]
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180].
    #[error("longitude {0} is out of range")]
    LongitudeOutOfRange(f64),
}

/// A validated latitude/longitude pair.
///
/// Both values must be present together - a profile either has a location or
/// it does not. Values are range-checked and must be finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Create coordinates from numeric values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatesError`] if either value is non-finite or out of
    /// range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinatesError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinatesError::LatitudeOutOfRange(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinatesError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Parse coordinates from the two text inputs of the registration form.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatesError::Missing`] if either input is empty (the
    /// both-or-neither invariant), or a parse/range error otherwise.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, CoordinatesError> {
        let lat = lat.trim();
        let lng = lng.trim();

        if lat.is_empty() || lng.is_empty() {
            return Err(CoordinatesError::Missing);
        }

        let lat: f64 = lat
            .parse()
            .map_err(|_| CoordinatesError::NotANumber(lat.to_owned()))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| CoordinatesError::NotANumber(lng.to_owned()))?;

        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let coords = Coordinates::parse("12.9716", "77.5946").unwrap();
        assert!((coords.lat - 12.9716).abs() < f64::EPSILON);
        assert!((coords.lng - 77.5946).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(Coordinates::parse(" 12.9716 ", " 77.5946 ").is_ok());
    }

    #[test]
    fn test_both_or_neither() {
        assert!(matches!(
            Coordinates::parse("12.9716", ""),
            Err(CoordinatesError::Missing)
        ));
        assert!(matches!(
            Coordinates::parse("", "77.5946"),
            Err(CoordinatesError::Missing)
        ));
        assert!(matches!(
            Coordinates::parse("", ""),
            Err(CoordinatesError::Missing)
        ));
    }

    #[test]
    fn test_not_a_number() {
        assert!(matches!(
            Coordinates::parse("north", "77.5946"),
            Err(CoordinatesError::NotANumber(_))
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0),
            Err(CoordinatesError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinates::new(0.0, -181.0),
            Err(CoordinatesError::LongitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinates::new(f64::NAN, 0.0),
            Err(CoordinatesError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_boundaries_accepted() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }
}
