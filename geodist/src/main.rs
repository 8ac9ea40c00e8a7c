//! Print the distance between two points on Earth.
//!
//! Run with:
//!   cargo run -p geodist -- --lat1 48.8566 --lon1 2.3522 --lat2 51.5074 --lon2 -0.1278
//!
//! Without arguments the distance of a fixed sample pair is printed.
//! Set `RUST_LOG=geodist_core=trace` to follow the iteration.

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use geodist_core::{
    Ellipsoid, Haversine, Inverse, Location, VincentyInverse,
    defaults::{DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Model {
    /// Vincenty inverse formula on the WGS-84 ellipsoid
    Ellipsoidal,
    /// haversine formula on a sphere of the WGS-84 equatorial radius
    Spherical,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Command {
    /// latitude of the first point, in degrees
    #[arg(long, allow_negative_numbers = true, default_value_t = 23.205402)]
    lat1: f64,

    /// longitude of the first point, in degrees
    #[arg(long, allow_negative_numbers = true, default_value_t = 120.335066)]
    lon1: f64,

    /// latitude of the second point, in degrees
    #[arg(long, allow_negative_numbers = true, default_value_t = 23.202188)]
    lat2: f64,

    /// longitude of the second point, in degrees
    #[arg(long, allow_negative_numbers = true, default_value_t = 120.339733)]
    lon2: f64,

    #[arg(long, value_enum, default_value_t = Model::Ellipsoidal)]
    model: Model,

    /// maximum number of iterations of the ellipsoidal model
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// convergence tolerance of the ellipsoidal model, in radians
    #[arg(long, default_value_t = DEFAULT_CONVERGENCE_TOLERANCE)]
    tolerance: f64,
}

impl Command {
    fn points(&self) -> (Location, Location) {
        (
            Location::new(self.lat1, self.lon1),
            Location::new(self.lat2, self.lon2),
        )
    }

    fn solver(&self) -> Result<VincentyInverse> {
        let solver = VincentyInverse::new(Ellipsoid::WGS84)
            .with_tolerance(self.tolerance)
            .context("Invalid --tolerance")?
            .with_max_iterations(self.max_iterations);

        Ok(solver)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cmd = Command::parse();
    let (from, to) = cmd.points();

    log::debug!("{from} -> {to} using the {:?} model", cmd.model);

    match cmd.model {
        Model::Ellipsoidal => {
            let inverse = cmd
                .solver()?
                .inverse(from, to)
                .with_context(|| format!("Failed to compute the distance {from} -> {to}"))?;

            match inverse {
                Inverse::Coincident => println!("0 m (coincident points)"),
                Inverse::Converged(geodesic) => {
                    println!("{:.3} m", geodesic.distance);
                    println!("reverse azimuth: {:.5} rad", geodesic.reverse_azimuth);
                }
            }
        }
        Model::Spherical => {
            println!("{:.3} m", Haversine::EARTH.distance_between(from, to));
        }
    }

    Ok(())
}
