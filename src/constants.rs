//! # Constants and type definitions for startour
//!
//! This module centralizes the **angular and time conversion constants** used
//! by the sidereal-time and horizon-coordinate pipeline, the tuning knobs of
//! the set-time search, and the scalar type aliases shared across the crate.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric normalization
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Days per Julian century
pub const JULIAN_CENTURY: f64 = 36525.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648_000.0;

/// Ratio of the solar to the sidereal rotation rate of the Earth
pub const SOLAR_TO_SIDEREAL: f64 = 1.00273790934;

// -------------------------------------------------------------------------------------------------
// Set-time search tuning
// -------------------------------------------------------------------------------------------------

/// Coarse step of the forward set-time search, in hours
pub const VISIBILITY_COARSE_STEP: f64 = 0.25;

/// Width of the set-time search window, in hours
pub const VISIBILITY_SEARCH_WINDOW: f64 = 24.0;

/// Bisection convergence tolerance of the set-time search, in hours.
/// Tight enough that reported hours are stable to two decimal places.
pub const VISIBILITY_BISECTION_TOL: f64 = 1.0e-4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Duration in hours
pub type Hour = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
