/// Default convergence tolerance of the Vincenty inverse iteration
///
/// The iteration stops once the longitude on the auxiliary sphere moves
/// by less than this amount (in radians) between two steps. `1e-12` rad
/// is roughly `0.06mm` on the surface of the Earth.
///
/// See [`VincentyInverse::with_tolerance`] to use a different value.
///
/// ```
/// # use geodist_core::defaults::*;
/// assert_eq!(DEFAULT_CONVERGENCE_TOLERANCE, 1e-12);
/// ```
///
/// [`VincentyInverse::with_tolerance`]: crate::geo::VincentyInverse::with_tolerance
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// Default iteration budget of the Vincenty inverse iteration
///
/// This is the only bound on the worst case cost of a call. Nearly
/// antipodal points may exhaust it, in which case the solver returns
/// [`GeoError::NonConvergent`].
///
/// See [`VincentyInverse::with_max_iterations`] for more details
///
/// [`GeoError::NonConvergent`]: crate::geo::GeoError::NonConvergent
/// [`VincentyInverse::with_max_iterations`]: crate::geo::VincentyInverse::with_max_iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Radius (in meter) of the sphere used by the haversine formula
///
/// This is the WGS-84 equatorial radius.
///
/// ```
/// # use geodist_core::defaults::*;
/// assert_eq!(EARTH_RADIUS, WGS84_SEMI_MAJOR_AXIS);
/// ```
pub const EARTH_RADIUS: f64 = WGS84_SEMI_MAJOR_AXIS;

/// WGS-84 semi major axis in meter (radius at the equator)
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS-84 inverse flattening `1/f`
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;
