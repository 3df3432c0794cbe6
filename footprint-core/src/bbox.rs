//! Geographic bounding boxes in WGS84 degrees.

use std::fmt;

/// A rectangular geographic extent in latitude/longitude degrees.
///
/// The corner order follows the Overpass convention: south, west, north,
/// east, or `(lat_min, lon_min, lat_max, lon_max)`. Construction never
/// fails; callers check [`BoundingBox::is_valid`] before building queries
/// from an extent.
///
/// # Examples
///
/// ```
/// use footprint_core::BoundingBox;
///
/// let bbox = BoundingBox::new(48.81, 2.22, 48.9, 2.47);
/// assert!(bbox.is_valid());
/// assert_eq!(bbox.to_overpass(), "(48.81,2.22,48.9,2.47)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub lat_min: f64,
    /// Western edge in degrees.
    pub lon_min: f64,
    /// Northern edge in degrees.
    pub lat_max: f64,
    /// Eastern edge in degrees.
    pub lon_max: f64,
}

impl BoundingBox {
    /// Construct an extent from its four corners.
    ///
    /// No validation happens here; an inverted or out-of-range extent is
    /// representable and only rejected when a query is built from it.
    #[must_use]
    pub const fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        }
    }

    /// Serialise to the Overpass QL global-bbox clause form,
    /// `(lat_min,lon_min,lat_max,lon_max)`.
    ///
    /// Values use the default `f64` formatting (the shortest representation
    /// that round-trips), so a parsed clause recovers the original corners
    /// exactly.
    #[must_use]
    pub fn to_overpass(&self) -> String {
        format!(
            "({},{},{},{})",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }

    /// Whether the extent is a usable query area.
    ///
    /// Requires `lat_min < lat_max`, `lon_min < lon_max`, latitudes within
    /// `[-90, 90]`, and longitudes within `[-180, 180]`. The boundary
    /// extremes themselves are valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat_min < self.lat_max
            && self.lon_min < self.lon_max
            && (-90.0..=90.0).contains(&self.lat_min)
            && (-90.0..=90.0).contains(&self.lat_max)
            && (-180.0..=180.0).contains(&self.lon_min)
            && (-180.0..=180.0).contains(&self.lon_max)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_overpass())
    }
}
