//! Equatorial → horizon coordinate transform.
//!
//! For one observer and one instant, a catalog (RA, Dec) direction maps to
//! the local (altitude, azimuth) pair through the apparent place of date,
//! the local apparent sidereal time and the hour angle. The transform is a
//! pure function of its inputs: repeated calls with the same body and the
//! same observer return bit-identical positions.

use crate::catalog::CelestialBody;
use crate::constants::{Degree, DPI};
use crate::earth_orientation::{apparent_direction, equation_of_equinoxes};
use crate::observer::Observer;
use crate::startour_errors::StarTourError;
use crate::time::gmst;

/// Observer-relative direction: altitude above the horizon and azimuth
/// measured clockwise from north, both in degrees.
///
/// Derived data; recomputed per body and per instant, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonPosition {
    pub altitude: Degree,
    /// Azimuth in degrees, \[0, 360), clockwise from north
    pub azimuth: Degree,
}

/// Transform a catalog direction into horizon coordinates.
///
/// Algorithm
/// ---------
/// 1. Reduce the catalog J2000 direction to its apparent place of date
///    (precession + nutation).
/// 2. Local apparent sidereal time = GMST + equation of the equinoxes
///    + east longitude.
/// 3. Hour angle = LST − apparent RA, normalized to \[0, 2π).
/// 4. Spherical triangle of pole, zenith and body gives altitude and
///    azimuth (clockwise from north).
///
/// Site height is not applied: it changes the horizon dip, not the pointing
/// direction, and stays below the sub-degree contract of this transform.
///
/// Errors
/// ------
/// * [`StarTourError::InvalidRightAscension`] / [`StarTourError::InvalidDeclination`]
///   when the body's coordinates are outside their domain. No clamping.
pub fn transform(
    body: &CelestialBody,
    observer: &Observer,
) -> Result<HorizonPosition, StarTourError> {
    if !(0.0..360.0).contains(&body.ra) {
        return Err(StarTourError::InvalidRightAscension(body.ra));
    }
    if !(-90.0..=90.0).contains(&body.dec) {
        return Err(StarTourError::InvalidDeclination(body.dec));
    }

    let tjm = observer.mjd_utc();
    let (ra_apparent, dec_apparent) = apparent_direction(body.ra, body.dec, tjm);

    let lst = gmst(tjm) + equation_of_equinoxes(tjm) + observer.longitude().to_radians();
    let hour_angle = (lst - ra_apparent).rem_euclid(DPI);

    let phi = observer.latitude().to_radians();
    let sin_alt =
        phi.sin() * dec_apparent.sin() + phi.cos() * dec_apparent.cos() * hour_angle.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin();

    let azimuth = (-hour_angle.sin() * dec_apparent.cos())
        .atan2(dec_apparent.sin() * phi.cos() - dec_apparent.cos() * phi.sin() * hour_angle.cos())
        .rem_euclid(DPI);

    Ok(HorizonPosition {
        altitude: altitude.to_degrees(),
        azimuth: azimuth.to_degrees(),
    })
}
