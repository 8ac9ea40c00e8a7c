use super::{
    DistanceAlgorithm, GeoError, Location,
    ellipsoid::{Ellipsoid, ReducedLatitude},
    normalize_distance,
};
use crate::defaults::{DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS};

/// Vincenty inverse formula, parametrized with the ellipsoid, the
/// convergence tolerance and the maximum number of iterations.
///
/// Known limitation:
/// this iterative method can fail to converge for nearly antipodal point pairs
/// (including exact antipodes). Hitting the iteration limit maps to
/// [`GeoError::NonConvergent`], which is distinct from the zero distance of
/// [`Inverse::Coincident`].
///
/// [Wikipedia Vincenty formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae)
///
/// # Example
///
/// ```
/// use geodist_core::geo::{Location, VincentyInverse};
///
/// let from = Location::new(23.205402, 120.335066);
/// let to = Location::new(23.202188, 120.339733);
///
/// let inverse = VincentyInverse::default().inverse(from, to).unwrap();
/// assert!((inverse.distance() - 595.768).abs() < 0.01);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VincentyInverse {
    ellipsoid: Ellipsoid,
    tolerance: f64,
    max_iterations: usize,
}

/// Outcome of a successful inverse computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inverse {
    /// Both points reduce to the same position on the auxiliary sphere.
    ///
    /// The distance is `0` and the azimuths are undefined.
    Coincident,
    /// The iteration converged within the tolerance.
    Converged(Geodesic),
}

/// Geodesic between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodesic {
    /// length of the geodesic, in meter
    pub distance: f64,
    /// azimuth at the first point, in radians clockwise from north
    pub forward_azimuth: f64,
    /// azimuth at the second point along the direction of travel, in radians
    /// clockwise from north
    pub reverse_azimuth: f64,
    /// number of iterations it took to converge
    pub iterations: usize,
    /// `|λ - λ'|` of the last iteration
    pub residual: f64,
}

impl Inverse {
    /// Distance in meter, `0.0` for coincident points.
    pub fn distance(&self) -> f64 {
        match self {
            Self::Coincident => 0.0,
            Self::Converged(geodesic) => geodesic.distance,
        }
    }

    pub fn forward_azimuth(&self) -> Option<f64> {
        self.geodesic().map(|geodesic| geodesic.forward_azimuth)
    }

    pub fn reverse_azimuth(&self) -> Option<f64> {
        self.geodesic().map(|geodesic| geodesic.reverse_azimuth)
    }

    pub fn geodesic(&self) -> Option<&Geodesic> {
        match self {
            Self::Coincident => None,
            Self::Converged(geodesic) => Some(geodesic),
        }
    }

    pub fn is_coincident(&self) -> bool {
        matches!(self, Self::Coincident)
    }
}

/// Working set of the fixed point iteration on `λ`.
///
/// Created fresh for every call to [`VincentyInverse::inverse`].
#[derive(Debug, Default)]
struct IterationState {
    lambda: f64,
    sin_lambda: f64,
    cos_lambda: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    sigma: f64,
    cos_sq_alpha: f64,
    cos2_sigma_m: f64,
}

enum Step {
    Coincident,
    Next { residual: f64 },
}

impl IterationState {
    fn new(lambda: f64) -> Self {
        Self {
            lambda,
            ..Self::default()
        }
    }

    /// evaluate the trigonometric quantities for the current `λ` and
    /// compute the next one
    fn step(
        &mut self,
        difference_longitudes: f64,
        f: f64,
        u1: ReducedLatitude,
        u2: ReducedLatitude,
    ) -> Step {
        let (sin_lambda, cos_lambda) = self.lambda.sin_cos();
        let sin_sigma = ((u2.cos * sin_lambda) * (u2.cos * sin_lambda)
            + (u1.cos * u2.sin - u1.sin * u2.cos * cos_lambda)
                * (u1.cos * u2.sin - u1.sin * u2.cos * cos_lambda))
            .sqrt();

        // Points coincide
        if sin_sigma == 0.0 {
            return Step::Coincident;
        }

        let cos_sigma = u1.sin * u2.sin + u1.cos * u2.cos * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = u1.cos * u2.cos * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // equatorial line
        let cos2_sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * u1.sin * u2.sin / cos_sq_alpha
        } else {
            0.0
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prime = self.lambda;
        let lambda = difference_longitudes
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos2_sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)));

        *self = Self {
            lambda,
            sin_lambda,
            cos_lambda,
            sin_sigma,
            cos_sigma,
            sigma,
            cos_sq_alpha,
            cos2_sigma_m,
        };

        Step::Next {
            residual: (lambda - lambda_prime).abs(),
        }
    }
}

impl Default for VincentyInverse {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

impl VincentyInverse {
    /// Solver on the given ellipsoid with the default tolerance and
    /// iteration budget.
    pub const fn new(ellipsoid: Ellipsoid) -> Self {
        Self {
            ellipsoid,
            tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the convergence tolerance (in radians).
    ///
    /// Must be finite and strictly positive.
    ///
    /// ```
    /// # use geodist_core::geo::{GeoError, VincentyInverse};
    /// let coarse = VincentyInverse::default().with_tolerance(1e-9).unwrap();
    /// assert_eq!(coarse.tolerance(), 1e-9);
    ///
    /// assert_eq!(
    ///     VincentyInverse::default().with_tolerance(0.0).unwrap_err(),
    ///     GeoError::InvalidTolerance { value: 0.0 },
    /// );
    /// ```
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, GeoError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(GeoError::InvalidTolerance { value: tolerance });
        }

        self.tolerance = tolerance;
        Ok(self)
    }

    /// Set the maximum number of iterations.
    ///
    /// With `0` no iteration runs and every pair, coincident or not, fails
    /// with [`GeoError::NonConvergent`].
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub const fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Solve the inverse problem between `point1` and `point2`.
    ///
    /// Coordinates are not validated: out of range values give a
    /// mathematically defined but meaningless answer.
    pub fn inverse(&self, point1: Location, point2: Location) -> Result<Inverse, GeoError> {
        let a = self.ellipsoid.semi_major_axis();
        let b = self.ellipsoid.semi_minor_axis();
        let f = self.ellipsoid.flattening();

        let (lat1, lon1) = point1.to_radians();
        let (lat2, lon2) = point2.to_radians();

        let difference_longitudes = lon2 - lon1;

        // u = 'reduced latitude'
        let u1 = self.ellipsoid.reduced_latitude(lat1);
        let u2 = self.ellipsoid.reduced_latitude(lat2);

        let mut state = IterationState::new(difference_longitudes);
        let mut residual = f64::INFINITY;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            match state.step(difference_longitudes, f, u1, u2) {
                Step::Coincident => {
                    log::debug!("{point1} and {point2} are coincident");
                    return Ok(Inverse::Coincident);
                }
                Step::Next { residual: r } => residual = r,
            }

            log::trace!(
                "iteration {iterations}: lambda={lambda}, residual={residual:e}",
                lambda = state.lambda
            );

            if !state.lambda.is_finite() {
                return Err(GeoError::NonFiniteComputation);
            }

            // leave the loop if it has converged
            if residual <= self.tolerance {
                break;
            }
        }

        if residual > self.tolerance {
            return Err(GeoError::NonConvergent {
                iterations,
                residual,
            });
        }

        let IterationState {
            sin_lambda,
            cos_lambda,
            sin_sigma,
            cos_sigma,
            sigma,
            cos_sq_alpha,
            cos2_sigma_m,
            ..
        } = state;

        let u_sq = cos_sq_alpha * self.ellipsoid.second_eccentricity_squared();
        let cap_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let cap_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let delta_sigma = cap_b
            * sin_sigma
            * (cos2_sigma_m
                + cap_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)
                        - cap_b / 6.0
                            * cos2_sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos2_sigma_m * cos2_sigma_m)));
        let distance = normalize_distance(b * cap_a * (sigma - delta_sigma))?;

        let forward_azimuth =
            (u2.cos * sin_lambda).atan2(u1.cos * u2.sin - u1.sin * u2.cos * cos_lambda);
        let reverse_azimuth =
            (u1.cos * sin_lambda).atan2(-u1.sin * u2.cos + u1.cos * u2.sin * cos_lambda);

        log::debug!(
            "{point1} -> {point2}: {distance:.3}m after {iterations} iterations (a={a}, b={b})"
        );

        Ok(Inverse::Converged(Geodesic {
            distance,
            forward_azimuth,
            reverse_azimuth,
            iterations,
            residual,
        }))
    }
}

impl DistanceAlgorithm for VincentyInverse {
    fn distance(&self, point1: Location, point2: Location) -> Result<f64, GeoError> {
        self.inverse(point1, point2).map(|inverse| inverse.distance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Haversine;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::f64::consts::PI;

    fn from() -> Location {
        Location::new(23.205402, 120.335066)
    }

    fn to() -> Location {
        Location::new(23.202188, 120.339733)
    }

    fn dms(degrees: f64, minutes: f64, seconds: f64) -> f64 {
        let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3_600.0;
        magnitude.copysign(degrees)
    }

    fn converged(inverse: Inverse) -> Geodesic {
        match inverse {
            Inverse::Converged(geodesic) => geodesic,
            Inverse::Coincident => panic!("expected a converged geodesic"),
        }
    }

    #[test]
    fn sample_pair_distance_and_reverse_azimuth() {
        let geodesic = converged(VincentyInverse::default().inverse(from(), to()).unwrap());

        assert!((geodesic.distance - 595.768).abs() < 0.01);
        assert!((geodesic.reverse_azimuth - 2.21113).abs() < 1e-4);
        assert!(geodesic.iterations < DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn flinders_peak_to_buninyong() {
        // Vincenty's worked example on GRS-80
        let grs80 = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_222_101).unwrap();
        let flinders_peak = Location::new(dms(-37.0, 57.0, 3.72030), dms(144.0, 25.0, 29.52440));
        let buninyong = Location::new(dms(-37.0, 39.0, 10.15610), dms(143.0, 55.0, 35.38390));

        let geodesic = converged(
            VincentyInverse::new(grs80)
                .inverse(flinders_peak, buninyong)
                .unwrap(),
        );

        assert!((geodesic.distance - 54_972.271).abs() < 0.01);

        let forward = geodesic.forward_azimuth.to_degrees().rem_euclid(360.0);
        assert!((forward - dms(306.0, 52.0, 5.37)).abs() < 1e-4);

        // reverse azimuth 127°10'25.07" points back to Flinders Peak,
        // ours follows the direction of travel
        let reverse = geodesic.reverse_azimuth.to_degrees().rem_euclid(360.0);
        assert!((reverse - (dms(127.0, 10.0, 25.07) + 180.0)).abs() < 1e-4);
    }

    #[test]
    fn coincident_points_are_not_a_failure() {
        let origin = Location::new(0.0, 0.0);
        let inverse = VincentyInverse::default().inverse(origin, origin).unwrap();

        assert_eq!(inverse, Inverse::Coincident);
        assert_eq!(inverse.distance(), 0.0);
        assert_eq!(inverse.reverse_azimuth(), None);

        let inverse = VincentyInverse::default().inverse(from(), from()).unwrap();
        assert!(inverse.is_coincident());
    }

    #[test]
    fn equatorial_line_matches_arc_length() {
        let ellipsoid = Ellipsoid::WGS84;
        let p1 = Location::new(0.0, 10.0);
        let p2 = Location::new(0.0, 30.0);

        let geodesic = converged(VincentyInverse::new(ellipsoid).inverse(p1, p2).unwrap());
        let arc = ellipsoid.semi_major_axis() * 20.0_f64.to_radians();

        assert!(geodesic.distance.is_finite());
        assert!((geodesic.distance - arc).abs() < 1e-3);
        assert!((geodesic.forward_azimuth - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn sigma_beyond_a_quarter_circumference() {
        // New York -> Sydney, the arc spans more than 90º
        let new_york = Location::new(40.7128, -74.0060);
        let sydney = Location::new(-33.8688, 151.2093);

        let distance = VincentyInverse::default()
            .distance(new_york, sydney)
            .unwrap();
        let spherical = Haversine::EARTH.distance_between(new_york, sydney);

        assert!(distance > Ellipsoid::WGS84.semi_major_axis() * PI / 2.0);
        assert!((distance - spherical).abs() / distance < 0.005);
    }

    #[test]
    fn near_antipodal_points_converge() {
        // antipode of (10, 10) is (-10, -170)
        let p1 = Location::new(10.0, 10.0);
        let p2 = Location::new(-10.3, -169.7);

        let geodesic = converged(VincentyInverse::default().inverse(p1, p2).unwrap());
        let spherical = Haversine::EARTH.distance_between(p1, p2);

        assert!(geodesic.distance.is_finite());
        assert!(geodesic.distance < 20_004_000.0);
        assert!((geodesic.distance - spherical).abs() / spherical < 0.01);
        assert!(geodesic.iterations <= DEFAULT_MAX_ITERATIONS);
        assert!(geodesic.residual <= DEFAULT_CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn antipodal_points_fail_to_converge() {
        let p1 = Location::new(0.0, 0.0);
        let p2 = Location::new(0.0, 180.0);

        let error = VincentyInverse::default().inverse(p1, p2).unwrap_err();
        assert!(matches!(
            error,
            GeoError::NonConvergent {
                iterations: DEFAULT_MAX_ITERATIONS,
                ..
            }
        ));
    }

    #[test]
    fn not_enough_iterations() {
        let v = VincentyInverse::default().with_max_iterations(0);
        assert_eq!(
            v.inverse(from(), to()).unwrap_err(),
            GeoError::NonConvergent {
                iterations: 0,
                residual: f64::INFINITY
            }
        );

        let v = VincentyInverse::default().with_max_iterations(1);
        assert!(matches!(
            v.inverse(from(), to()).unwrap_err(),
            GeoError::NonConvergent { iterations: 1, .. }
        ));
    }

    #[test]
    fn coarser_tolerance_needs_fewer_iterations() {
        let fine = converged(VincentyInverse::default().inverse(from(), to()).unwrap());
        let coarse = converged(
            VincentyInverse::default()
                .with_tolerance(1e-6)
                .unwrap()
                .inverse(from(), to())
                .unwrap(),
        );

        // a single step: the series is evaluated with λ = L
        assert_eq!(coarse.iterations, 1);
        assert!(coarse.iterations < fine.iterations);
        assert!((coarse.distance - fine.distance).abs() < 2.0);
    }

    #[test]
    fn nan_coordinates_are_reported() {
        let p1 = Location::new(f64::NAN, 0.0);

        assert_eq!(
            VincentyInverse::default().inverse(p1, to()).unwrap_err(),
            GeoError::NonFiniteComputation
        );
    }

    #[test]
    fn random_pairs_are_symmetric_and_converge() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let vincenty = VincentyInverse::default();

        for _ in 0..1_000 {
            let p1 = Location::new(rng.gen_range(-70.0..70.0), rng.gen_range(-60.0..60.0));
            let p2 = Location::new(rng.gen_range(-70.0..70.0), rng.gen_range(-60.0..60.0));

            let forward = converged(vincenty.inverse(p1, p2).unwrap());
            let backward = converged(vincenty.inverse(p2, p1).unwrap());

            assert!((forward.distance - backward.distance).abs() < 1e-4);
            assert!(forward.iterations < DEFAULT_MAX_ITERATIONS);
            assert!(forward.residual <= DEFAULT_CONVERGENCE_TOLERANCE);
        }
    }

    #[test]
    fn short_distances_agree_with_haversine() {
        let mut rng = StdRng::seed_from_u64(42);
        let vincenty = VincentyInverse::default();

        for _ in 0..1_000 {
            let p1 = Location::new(rng.gen_range(-60.0..60.0), rng.gen_range(-180.0..180.0));
            // up to ~0.005º away, well under a kilometer
            let p2 = Location::new(
                p1.latitude + rng.gen_range(-0.005..0.005),
                p1.longitude + rng.gen_range(-0.005..0.005),
            );

            let ellipsoidal = vincenty.distance(p1, p2).unwrap();
            let spherical = Haversine::EARTH.distance_between(p1, p2);

            assert!(ellipsoidal < 1_000.0);
            assert!((ellipsoidal - spherical).abs() < 5.0);
        }
    }
}
