use super::{DistanceAlgorithm, GeoError, Location, normalize_distance};
use crate::defaults::EARTH_RADIUS;

/// Haversine great-circle distance on a sphere.
///
/// Closed form, no iteration, no failure mode. Used as a reference for
/// [`VincentyInverse`] and as a cheaper approximation of it.
///
/// [Wikipedia Haversine formula](https://en.wikipedia.org/wiki/Haversine_formula)
///
/// [`VincentyInverse`]: super::VincentyInverse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    /// radius of the sphere in meter
    radius: f64,
}

impl Haversine {
    /// Sphere with the WGS-84 equatorial radius.
    ///
    /// ```
    /// use geodist_core::geo::{Haversine, Location};
    ///
    /// let from = Location::new(23.205402, 120.335066);
    /// let to = Location::new(23.202188, 120.339733);
    ///
    /// let meters = Haversine::EARTH.distance_between(from, to);
    /// assert!((meters - 596.671).abs() < 0.01);
    /// ```
    pub const EARTH: Self = Self::new(EARTH_RADIUS);

    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance in meter between `point1` and `point2`.
    pub fn distance_between(&self, point1: Location, point2: Location) -> f64 {
        let (lat1, lon1) = point1.to_radians();
        let (lat2, lon2) = point2.to_radians();

        let d_lat = lat2 - lat1;
        let d_lon = lon2 - lon1;

        let h = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

        2.0 * self.radius * h.sqrt().asin()
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::EARTH
    }
}

impl DistanceAlgorithm for Haversine {
    fn distance(&self, point1: Location, point2: Location) -> Result<f64, GeoError> {
        normalize_distance(self.distance_between(point1, point2))
    }
}
