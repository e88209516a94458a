//! Domain types for the business directory.
//!
//! The feed delivers loosely-shaped documents ([`RawBusinessRecord`]); the
//! rest of the system only ever sees validated [`BusinessRecord`] values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A validated latitude/longitude pair in degrees.
///
/// Construction via [`Coordinate::new`] is the only way to obtain one, so
/// downstream code (distance math, ranking) can assume both components are
/// finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validates and wraps a latitude/longitude pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if either component is
    /// non-finite, latitude is outside [-90, 90], or longitude is outside
    /// [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoreError::InvalidCoordinate {
                reason: format!("non-finite components ({latitude}, {longitude})"),
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidCoordinate {
                reason: format!("latitude {latitude} outside [-90, 90]"),
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidCoordinate {
                reason: format!("longitude {longitude} outside [-180, 180]"),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

/// A validated business listing. Identity is `id`; two records with the same
/// id represent the same entity at different points in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRecord {
    /// Document id assigned by the record feed. Unique and stable.
    pub id: String,
    pub name: String,
    pub address: String,
    pub category: String,
    pub contact: String,
    pub image_url: Option<String>,
    /// Absent for listings registered without a geocoded address; such
    /// records can still be searched and filtered but not distance-ranked.
    pub location: Option<Coordinate>,
}

/// A business document as delivered by the record feed, before validation.
///
/// Everything except `id` is tolerated missing: the directory view renders
/// partial records fine. `image_url` accepts the feed's camelCase spelling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBusinessRecord {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TryFrom<RawBusinessRecord> for BusinessRecord {
    type Error = CoreError;

    /// Validates a raw feed document.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingId`] if `id` is absent or blank.
    /// - [`CoreError::InvalidCoordinate`] if a coordinate pair is out of
    ///   range or only one of latitude/longitude was provided.
    fn try_from(raw: RawBusinessRecord) -> Result<Self, CoreError> {
        let id = match raw.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(CoreError::MissingId),
        };

        let location = match (raw.latitude, raw.longitude) {
            (None, None) => None,
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
            _ => {
                return Err(CoreError::InvalidCoordinate {
                    reason: "latitude and longitude must be provided together".to_string(),
                })
            }
        };

        // The original registration form stores an empty string when no logo
        // was uploaded; normalise that to None.
        let image_url = raw.image_url.filter(|url| !url.is_empty());

        Ok(Self {
            id,
            name: raw.name,
            address: raw.address,
            category: raw.category,
            contact: raw.contact,
            image_url,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>) -> RawBusinessRecord {
        RawBusinessRecord {
            id: id.map(str::to_string),
            name: "Joe's Diner".to_string(),
            address: "12 Long Street".to_string(),
            category: "Food".to_string(),
            contact: "021 555 0101".to_string(),
            ..RawBusinessRecord::default()
        }
    }

    #[test]
    fn coordinate_accepts_valid_range() {
        let c = Coordinate::new(-33.92, 18.42).expect("valid coordinate");
        assert!((c.latitude() - -33.92).abs() < f64::EPSILON);
        assert!((c.longitude() - 18.42).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinate_rejects_out_of_range_latitude() {
        let err = Coordinate::new(90.5, 0.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoordinate { .. }));
    }

    #[test]
    fn coordinate_rejects_out_of_range_longitude() {
        let err = Coordinate::new(0.0, -180.1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoordinate { .. }));
    }

    #[test]
    fn coordinate_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn record_requires_id() {
        let err = BusinessRecord::try_from(raw(None)).unwrap_err();
        assert!(matches!(err, CoreError::MissingId));

        let err = BusinessRecord::try_from(raw(Some("  "))).unwrap_err();
        assert!(matches!(err, CoreError::MissingId));
    }

    #[test]
    fn record_without_coordinates_has_no_location() {
        let rec = BusinessRecord::try_from(raw(Some("b1"))).expect("valid record");
        assert_eq!(rec.id, "b1");
        assert!(rec.location.is_none());
    }

    #[test]
    fn record_with_coordinates_gets_location() {
        let mut r = raw(Some("b1"));
        r.latitude = Some(-33.92);
        r.longitude = Some(18.42);
        let rec = BusinessRecord::try_from(r).expect("valid record");
        assert!(rec.location.is_some());
    }

    #[test]
    fn record_with_half_coordinate_pair_is_rejected() {
        let mut r = raw(Some("b1"));
        r.latitude = Some(-33.92);
        let err = BusinessRecord::try_from(r).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoordinate { .. }));
    }

    #[test]
    fn empty_image_url_becomes_none() {
        let mut r = raw(Some("b1"));
        r.image_url = Some(String::new());
        let rec = BusinessRecord::try_from(r).expect("valid record");
        assert!(rec.image_url.is_none());
    }

    #[test]
    fn raw_record_deserializes_feed_camel_case() {
        let doc = serde_json::json!({
            "id": "b9",
            "name": "ACME Store",
            "category": "Retail",
            "imageUrl": "https://example.com/logo.png"
        });
        let r: RawBusinessRecord = serde_json::from_value(doc).expect("deserialize");
        assert_eq!(r.id.as_deref(), Some("b9"));
        assert_eq!(r.image_url.as_deref(), Some("https://example.com/logo.png"));
        assert!(r.latitude.is_none());
    }
}
