//! Geodesic distance between two points on Earth.
//!
//! Two independent models are provided:
//!
//! * [`geo::VincentyInverse`]: Vincenty's iterative inverse solution on an
//!   oblate ellipsoid (WGS-84 by default), accurate to a fraction of a
//!   millimeter;
//! * [`geo::Haversine`]: the closed form great-circle distance on a sphere.
//!
//! ```
//! use geodist_core::geo::{compute_geodesic_distance, compute_spherical_distance};
//!
//! let ellipsoidal = compute_geodesic_distance(23.205402, 120.335066, 23.202188, 120.339733)
//!     .unwrap()
//!     .distance();
//! let spherical = compute_spherical_distance(23.205402, 120.335066, 23.202188, 120.339733);
//!
//! assert!((ellipsoidal - spherical).abs() < 1.0);
//! ```

pub mod defaults;
pub mod geo;

pub use self::geo::{
    DistanceAlgorithm, Ellipsoid, GeoError, Geodesic, Haversine, Inverse, Location,
    VincentyInverse,
};
