use super::GeoError;
use crate::defaults::{WGS84_INVERSE_FLATTENING, WGS84_SEMI_MAJOR_AXIS};

/// Oblate ellipsoid of revolution
///
/// for earth, use [`Ellipsoid::WGS84`]
///
/// It always holds that `semi_minor_axis == (1.0 - flattening) * semi_major_axis`.
///
/// # Custom ellipsoid
///
/// ```
/// use geodist_core::geo::Ellipsoid;
///
/// // GRS-80, the ellipsoid of most modern national datums
/// let grs80 = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_222_101).unwrap();
///
/// assert_eq!(grs80.semi_major_axis(), 6_378_137.0);
/// assert!((grs80.semi_minor_axis() - 6_356_752.314_140).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi Major Axis in meter / Radius at equator
    semi_major_axis: f64,
    /// Semi Minor axis in meter / Radius at pole
    semi_minor_axis: f64,
    /// `f = (a - b) / a`
    flattening: f64,
}

/// Sine and cosine of a latitude reduced onto the auxiliary sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ReducedLatitude {
    pub(crate) sin: f64,
    pub(crate) cos: f64,
}

impl Ellipsoid {
    /// WGS-84 geocentric datum parameters
    ///
    /// ```
    /// # use geodist_core::geo::Ellipsoid;
    /// let wgs84 = Ellipsoid::WGS84;
    ///
    /// assert_eq!(wgs84.semi_major_axis(), 6_378_137.0);
    /// assert!((wgs84.semi_minor_axis() - 6_356_752.314_245).abs() < 1e-6);
    /// ```
    pub const WGS84: Self = Self::new_unchecked(
        WGS84_SEMI_MAJOR_AXIS,
        1.0 / WGS84_INVERSE_FLATTENING,
    );

    const fn new_unchecked(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            semi_major_axis,
            semi_minor_axis: (1.0 - flattening) * semi_major_axis,
            flattening,
        }
    }

    /// Creates an ellipsoid from its semi major axis (meter) and flattening.
    ///
    /// The semi major axis must be finite and positive, the flattening must
    /// be within `[0.0, 1.0)`. A flattening of `0.0` is a sphere.
    pub fn new(semi_major_axis: f64, flattening: f64) -> Result<Self, GeoError> {
        let valid_axis = semi_major_axis.is_finite() && semi_major_axis > 0.0;
        let valid_flattening = flattening.is_finite() && (0.0..1.0).contains(&flattening);

        if !valid_axis || !valid_flattening {
            return Err(GeoError::InvalidEllipsoid {
                semi_major_axis,
                flattening,
            });
        }

        Ok(Self::new_unchecked(semi_major_axis, flattening))
    }

    /// Creates an ellipsoid from its semi major axis (meter) and inverse
    /// flattening `1/f`, the way datums are usually published.
    pub fn from_inverse_flattening(
        semi_major_axis: f64,
        inverse_flattening: f64,
    ) -> Result<Self, GeoError> {
        Self::new(semi_major_axis, 1.0 / inverse_flattening)
    }

    pub const fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub const fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    pub const fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Second eccentricity squared: `e'² = (a² - b²) / b²`
    pub fn second_eccentricity_squared(&self) -> f64 {
        let a = self.semi_major_axis;
        let b = self.semi_minor_axis;

        (a * a - b * b) / (b * b)
    }

    /// Reduce a geodetic latitude (in radians) onto the auxiliary sphere:
    /// `U = atan((1 - f) * tan(latitude))`.
    pub(crate) fn reduced_latitude(&self, latitude: f64) -> ReducedLatitude {
        let u = ((1.0 - self.flattening) * latitude.tan()).atan();
        let (sin, cos) = u.sin_cos();

        ReducedLatitude { sin, cos }
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
