//! Observing site and instant.
//!
//! [`Observer`] bundles the geodetic coordinates of the site with the
//! absolute epoch of the observation. It is constructed once per run,
//! validated on construction, and shared read-only by every transform call;
//! the set-time search derives time-shifted copies with
//! [`Observer::advanced_by`] instead of mutating it.
//!
//! ## Units
//!
//! - `latitude`: degrees, north positive, \[-90, 90\].
//! - `longitude`: degrees, east positive, \[-180, 180\].
//! - `height`: meters above the reference ellipsoid, ≥ 0. Height only
//!   affects the horizon dip (a second-order effect on visibility, below
//!   the accuracy of this pipeline) and is carried for validation and
//!   reporting, not applied to pointing.

use std::fmt;

use hifitime::{Duration, Epoch};
use ordered_float::NotNan;

use crate::constants::{Degree, Hour, Meter, MJD};
use crate::startour_errors::StarTourError;

/// Geodetic observing site plus observation instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: NotNan<f64>,
    longitude: NotNan<f64>,
    height: NotNan<f64>,
    epoch: Epoch,
}

impl Observer {
    /// Create a validated observer.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: geodetic latitude in degrees, north positive.
    /// * `longitude`: geodetic longitude in degrees, east positive.
    /// * `height`: site height above the ellipsoid in meters.
    /// * `epoch`: absolute observation instant.
    ///
    /// Errors
    /// ----------
    /// * [`StarTourError::InvalidLatitude`], [`StarTourError::InvalidLongitude`]
    ///   or [`StarTourError::InvalidHeight`] on out-of-domain values. NaN is
    ///   rejected, never clamped.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        height: Meter,
        epoch: Epoch,
    ) -> Result<Observer, StarTourError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(StarTourError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(StarTourError::InvalidLongitude(longitude));
        }
        if height < 0.0 {
            return Err(StarTourError::InvalidHeight(height));
        }

        Ok(Observer {
            latitude: NotNan::new(latitude)?,
            longitude: NotNan::new(longitude)?,
            height: NotNan::new(height)?,
            epoch,
        })
    }

    pub fn latitude(&self) -> Degree {
        self.latitude.into_inner()
    }

    pub fn longitude(&self) -> Degree {
        self.longitude.into_inner()
    }

    pub fn height(&self) -> Meter {
        self.height.into_inner()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Observation instant as a Modified Julian Date on the UTC scale.
    pub fn mjd_utc(&self) -> MJD {
        self.epoch.to_mjd_utc_days()
    }

    /// A copy of this observer with the instant advanced by `hours`.
    ///
    /// The site is unchanged; this is the time axis of the set-time search.
    pub fn advanced_by(&self, hours: Hour) -> Observer {
        Observer {
            epoch: self.epoch + Duration::from_hours(hours),
            ..*self
        }
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {}, Lon: {}, Height: {}m at {}",
            self.latitude, self.longitude, self.height, self.epoch
        )
    }
}
