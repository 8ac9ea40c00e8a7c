pub mod ellipsoid;
pub mod haversine;
pub mod vincenty;

pub use self::{
    ellipsoid::Ellipsoid,
    haversine::Haversine,
    vincenty::{Geodesic, Inverse, VincentyInverse},
};

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error(
        "vincenty inverse formula did not converge after {iterations} iterations (residual {residual:e} rad)"
    )]
    NonConvergent { iterations: usize, residual: f64 },
    #[error("geo computation produced a non-finite value")]
    NonFiniteComputation,
    #[error(
        "invalid ellipsoid: semi major axis must be finite and positive, flattening within [0, 1), got a={semi_major_axis}m f={flattening}"
    )]
    InvalidEllipsoid {
        semi_major_axis: f64,
        flattening: f64,
    },
    #[error("convergence tolerance must be finite and positive, got {value}")]
    InvalidTolerance { value: f64 },
}

/// A point on Earth in decimal degrees.
///
/// Latitude is expected within `[-90, 90]` and longitude within
/// `[-180, 180]`, but nothing is validated: out of range values give a
/// mathematically defined (and probably meaningless) distance.
///
/// # Examples
///
/// ```
/// use geodist_core::geo::Location;
///
/// // Eastern longitude (Paris)
/// let paris = Location::new(48.8566, 2.3522);
/// // Western longitude (San Francisco)
/// let san_francisco = Location::new(37.7749, -122.4194);
///
/// assert!(paris.longitude > 0.0);
/// assert!(san_francisco.longitude < 0.0);
///
/// assert_eq!(paris.to_string(), "48.856600º, 2.352200º");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    /// degrees north of the equator
    pub latitude: f64,
    /// degrees east of the prime meridian
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Location {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}{DEGREE_SUFFIX}, {:.6}{DEGREE_SUFFIX}",
            self.latitude, self.longitude
        )
    }
}

const DEGREE_SUFFIX: char = '\u{00BA}';

/// A way of measuring the distance between two [`Location`]s.
///
/// Implemented by the ellipsoidal [`VincentyInverse`] and the spherical
/// [`Haversine`] so callers can pick a model without changing code.
///
/// ```
/// use geodist_core::geo::{DistanceAlgorithm, Haversine, Location, VincentyInverse};
///
/// let paris = Location::new(48.8566, 2.3522);
/// let london = Location::new(51.5074, -0.1278);
///
/// let models: [&dyn DistanceAlgorithm; 2] = [&VincentyInverse::default(), &Haversine::EARTH];
/// for model in models {
///     let meters = model.distance(paris, london).unwrap();
///     assert!((meters - 343_000.0).abs() < 2_000.0);
/// }
/// ```
pub trait DistanceAlgorithm {
    /// Distance in meter between `point1` and `point2`.
    fn distance(&self, point1: Location, point2: Location) -> Result<f64, GeoError>;
}

fn normalize_distance(distance: f64) -> Result<f64, GeoError> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(GeoError::NonFiniteComputation);
    }

    Ok(distance)
}

/// Geodesic distance between two points on the WGS-84 ellipsoid.
///
/// Coordinates are in degrees. The returned [`Inverse`] tells coincident
/// points (distance `0`) apart from a converged geodesic carrying the
/// distance in meter and the azimuths in radians. Failing to converge is
/// reported as [`GeoError::NonConvergent`].
///
/// # Example
///
/// ```
/// use geodist_core::geo::compute_geodesic_distance;
///
/// let inverse = compute_geodesic_distance(23.205402, 120.335066, 23.202188, 120.339733).unwrap();
///
/// assert!((inverse.distance() - 595.768).abs() < 0.01);
/// assert!((inverse.reverse_azimuth().unwrap() - 2.21113).abs() < 1e-4);
///
/// let same = compute_geodesic_distance(0.0, 0.0, 0.0, 0.0).unwrap();
/// assert!(same.is_coincident());
/// ```
pub fn compute_geodesic_distance(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
) -> Result<Inverse, GeoError> {
    VincentyInverse::default().inverse(Location::new(lat1, lon1), Location::new(lat2, lon2))
}

/// Haversine distance in meter on a sphere of radius [`EARTH_RADIUS`].
///
/// ```
/// use geodist_core::geo::compute_spherical_distance;
///
/// let meters = compute_spherical_distance(23.205402, 120.335066, 23.202188, 120.339733);
/// assert!((meters - 596.671).abs() < 0.01);
/// ```
///
/// [`EARTH_RADIUS`]: crate::defaults::EARTH_RADIUS
pub fn compute_spherical_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine::EARTH.distance_between(Location::new(lat1, lon1), Location::new(lat2, lon2))
}
