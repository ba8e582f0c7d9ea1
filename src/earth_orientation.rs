//! Earth orientation corrections for the horizon pipeline.
//!
//! Catalog coordinates are referred to the mean equator and equinox of
//! J2000; pointing a telescope needs the equator and equinox *of date*.
//! This module provides the reduction chain between the two:
//!
//! - mean obliquity of the ecliptic (IAU 1976 polynomial),
//! - nutation angles from the leading terms of the IAU 1980 series,
//! - the equation of the equinoxes (mean → apparent sidereal time),
//! - the IAU 1976 precession rotation,
//! - [`apparent_direction`], composing precession and nutation into the
//!   apparent place of a catalog direction.
//!
//! Accuracy: the truncated nutation series is complete to about 0.003″,
//! orders of magnitude below the sub-degree contract of the transform.

use nalgebra::{Rotation3, Vector3};

use crate::constants::{Degree, Radian, DPI, JULIAN_CENTURY, MJD, RADSEC, T2000};

/// One row of the truncated IAU 1980 nutation series: integer multipliers of
/// the five fundamental arguments and the in-phase/out-of-phase coefficients
/// in units of 1e-4 arcseconds.
struct NutationTerm {
    l: f64,
    lp: f64,
    f: f64,
    d: f64,
    om: f64,
    psi: f64,
    psi_t: f64,
    eps: f64,
    eps_t: f64,
}

/// Leading terms of the IAU 1980 nutation series, largest amplitudes first.
#[rustfmt::skip]
const IAU1980_LEADING_TERMS: [NutationTerm; 10] = [
    NutationTerm { l:  0.0, lp:  0.0, f: 0.0, d:  0.0, om: 1.0, psi: -171996.0, psi_t: -174.2, eps: 92025.0, eps_t:  8.9 },
    NutationTerm { l:  0.0, lp:  0.0, f: 2.0, d: -2.0, om: 2.0, psi:  -13187.0, psi_t:   -1.6, eps:  5736.0, eps_t: -3.1 },
    NutationTerm { l:  0.0, lp:  0.0, f: 2.0, d:  0.0, om: 2.0, psi:   -2274.0, psi_t:   -0.2, eps:   977.0, eps_t: -0.5 },
    NutationTerm { l:  0.0, lp:  0.0, f: 0.0, d:  0.0, om: 2.0, psi:    2062.0, psi_t:    0.2, eps:  -895.0, eps_t:  0.5 },
    NutationTerm { l:  0.0, lp:  1.0, f: 0.0, d:  0.0, om: 0.0, psi:    1426.0, psi_t:   -3.4, eps:    54.0, eps_t: -0.1 },
    NutationTerm { l:  1.0, lp:  0.0, f: 0.0, d:  0.0, om: 0.0, psi:     712.0, psi_t:    0.1, eps:    -7.0, eps_t:  0.0 },
    NutationTerm { l:  0.0, lp:  1.0, f: 2.0, d: -2.0, om: 2.0, psi:    -517.0, psi_t:    1.2, eps:   224.0, eps_t: -0.6 },
    NutationTerm { l:  0.0, lp:  0.0, f: 2.0, d:  0.0, om: 1.0, psi:    -386.0, psi_t:   -0.4, eps:   200.0, eps_t:  0.0 },
    NutationTerm { l:  1.0, lp:  0.0, f: 2.0, d:  0.0, om: 2.0, psi:    -301.0, psi_t:    0.0, eps:   129.0, eps_t: -0.1 },
    NutationTerm { l:  0.0, lp: -1.0, f: 2.0, d: -2.0, om: 2.0, psi:     217.0, psi_t:   -0.5, eps:   -95.0, eps_t:  0.3 },
];

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date.
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
pub(crate) fn obleq(tjm: MJD) -> Radian {
    // Obliquity coefficients, arcseconds converted to radians
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / JULIAN_CENTURY;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Compute the nutation angles in longitude and obliquity (Δψ, Δε).
///
/// Evaluates the leading terms of the IAU 1980 (Wahr) series on the five
/// fundamental lunar and solar arguments, each a cubic polynomial in Julian
/// centuries since J2000.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date.
///
/// Returns
/// --------
/// * `(Δψ, Δε)`: nutation in longitude and in obliquity, both in radians.
pub(crate) fn nutation_angles(tjm: MJD) -> (Radian, Radian) {
    let t = (tjm - T2000) / JULIAN_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    // Fundamental arguments, arcseconds converted to radians:
    // mean anomaly of the Moon and of the Sun, argument of latitude of the
    // Moon, mean elongation of the Moon from the Sun, longitude of the
    // ascending node of the Moon.
    let l = (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let lp = (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let f = (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let d = (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let om = (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC;

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for term in &IAU1980_LEADING_TERMS {
        let arg = term.l * l + term.lp * lp + term.f * f + term.d * d + term.om * om;
        dpsi += (term.psi + term.psi_t * t) * arg.sin();
        deps += (term.eps + term.eps_t * t) * arg.cos();
    }

    (dpsi * 1.0e-4 * RADSEC, deps * 1.0e-4 * RADSEC)
}

/// Equation of the equinoxes: the correction from mean to apparent sidereal
/// time, `Δψ · cos(ε + Δε)`, in radians.
pub(crate) fn equation_of_equinoxes(tjm: MJD) -> Radian {
    let (dpsi, deps) = nutation_angles(tjm);
    dpsi * (obleq(tjm) + deps).cos()
}

fn rot_x(angle: Radian) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle)
}

fn rot_y(angle: Radian) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle)
}

fn rot_z(angle: Radian) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Rotation taking a mean-J2000 equatorial direction to the mean equator and
/// equinox of date (IAU 1976 precession angles ζ, z, θ).
fn precession_matrix(tjm: MJD) -> Rotation3<f64> {
    let t = (tjm - T2000) / JULIAN_CENTURY;

    let zeta = (2306.2181 * t + 0.30188 * t * t + 0.017998 * t * t * t) * RADSEC;
    let z = (2306.2181 * t + 1.09468 * t * t + 0.018203 * t * t * t) * RADSEC;
    let theta = (2004.3109 * t - 0.42665 * t * t - 0.041833 * t * t * t) * RADSEC;

    rot_z(z) * (rot_y(-theta) * rot_z(zeta))
}

/// Rotation taking a mean-of-date direction to the true equator and equinox
/// of date.
fn nutation_matrix(tjm: MJD) -> Rotation3<f64> {
    let (dpsi, deps) = nutation_angles(tjm);
    let eps = obleq(tjm);

    rot_x(eps + deps) * (rot_z(dpsi) * rot_x(-eps))
}

/// Reduce a catalog (mean J2000) direction to its apparent place of date.
///
/// Arguments
/// ---------
/// * `ra`: catalog right ascension in degrees.
/// * `dec`: catalog declination in degrees.
/// * `tjm`: Modified Julian Date of the observation.
///
/// Returns
/// --------
/// * `(ra, dec)` referred to the true equator and equinox of date, in
///   radians, right ascension normalized to \[0, 2π).
pub(crate) fn apparent_direction(ra: Degree, dec: Degree, tjm: MJD) -> (Radian, Radian) {
    let ra_rad = ra.to_radians();
    let dec_rad = dec.to_radians();

    let unit = Vector3::new(
        dec_rad.cos() * ra_rad.cos(),
        dec_rad.cos() * ra_rad.sin(),
        dec_rad.sin(),
    );

    let mean_of_date = precession_matrix(tjm) * unit;
    let apparent = nutation_matrix(tjm) * mean_of_date;

    let ra_apparent = apparent.y.atan2(apparent.x).rem_euclid(DPI);
    let dec_apparent = apparent.z.clamp(-1.0, 1.0).asin();

    (ra_apparent, dec_apparent)
}
