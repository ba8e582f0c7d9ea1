//! Observability and time-until-set estimation.
//!
//! A body is observable when its current altitude exceeds the configured
//! threshold. For observable bodies the altitude curve is sampled forward
//! in time (coarse stepping, then bisection around the first crossing) to
//! estimate how many hours remain before the body sets below the threshold.
//!
//! The three outcomes are deliberately distinct: a body already at or below
//! the threshold ([`SetForecast::BelowThreshold`]) is not the same as one
//! that never crosses it within the search window
//! ([`SetForecast::NeverSets`], circumpolar from this latitude).

use std::fmt;

use crate::catalog::CelestialBody;
use crate::constants::{
    Degree, Hour, VISIBILITY_BISECTION_TOL, VISIBILITY_COARSE_STEP, VISIBILITY_SEARCH_WINDOW,
};
use crate::horizon::{transform, HorizonPosition};
use crate::observer::Observer;
use crate::startour_errors::StarTourError;

/// Outcome of the set-time search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetForecast {
    /// Currently at or below the altitude threshold: already set, or not
    /// yet risen. The two are not distinguished.
    BelowThreshold,
    /// Crosses below the threshold after this many hours.
    SetsIn(Hour),
    /// No crossing within the search window: the body never sets from this
    /// site. A valid terminal state, not an error.
    NeverSets,
}

impl SetForecast {
    /// Hours until the body sets: `0` when below threshold, `+∞` when it
    /// never sets.
    pub fn hours_to_set(&self) -> Hour {
        match self {
            SetForecast::BelowThreshold => 0.0,
            SetForecast::SetsIn(hours) => *hours,
            SetForecast::NeverSets => f64::INFINITY,
        }
    }
}

/// A body annotated with its horizon position and set forecast at the
/// observation instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    pub body: CelestialBody,
    pub position: HorizonPosition,
    pub forecast: SetForecast,
}

impl ObservationRecord {
    /// Whether the body is above the altitude threshold right now.
    pub fn observable(&self) -> bool {
        !matches!(self.forecast, SetForecast::BelowThreshold)
    }

    pub fn hours_to_set(&self) -> Hour {
        self.forecast.hours_to_set()
    }
}

impl fmt::Display for ObservationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {:<12} RA: {:<8.2} Dec: {:<8.2} Altitude: {:<8.2} Azimuth: {:<8.2} Time to set: {:<7.2} Observable: {}",
            self.body.name,
            self.body.ra,
            self.body.dec,
            self.position.altitude,
            self.position.azimuth,
            self.hours_to_set(),
            self.observable(),
        )
    }
}

/// Estimate observability and time-until-set for one body.
///
/// Arguments
/// ---------
/// * `body`: catalog object.
/// * `observer`: site and instant; the instant is advanced internally for
///   the forward search, the caller's observer is untouched.
/// * `min_altitude`: altitude threshold in degrees (0 = geometric horizon).
///
/// Returns
/// --------
/// * An [`ObservationRecord`] with the current position and the set
///   forecast. The search window is bounded
///   ([`VISIBILITY_SEARCH_WINDOW`] hours), so this always terminates.
pub fn estimate(
    body: &CelestialBody,
    observer: &Observer,
    min_altitude: Degree,
) -> Result<ObservationRecord, StarTourError> {
    let position = transform(body, observer)?;

    if position.altitude <= min_altitude {
        return Ok(ObservationRecord {
            body: body.clone(),
            position,
            forecast: SetForecast::BelowThreshold,
        });
    }

    let mut previous = 0.0;
    let mut offset = VISIBILITY_COARSE_STEP;
    while offset <= VISIBILITY_SEARCH_WINDOW + 1e-12 {
        let altitude = transform(body, &observer.advanced_by(offset))?.altitude;
        if altitude <= min_altitude {
            let hours = refine_crossing(body, observer, min_altitude, previous, offset)?;
            return Ok(ObservationRecord {
                body: body.clone(),
                position,
                forecast: SetForecast::SetsIn(hours),
            });
        }
        previous = offset;
        offset += VISIBILITY_COARSE_STEP;
    }

    Ok(ObservationRecord {
        body: body.clone(),
        position,
        forecast: SetForecast::NeverSets,
    })
}

/// Bisect the bracketing interval `[lo, hi]` (hours from the observation
/// instant, above threshold at `lo`, at-or-below at `hi`) down to
/// [`VISIBILITY_BISECTION_TOL`].
fn refine_crossing(
    body: &CelestialBody,
    observer: &Observer,
    min_altitude: Degree,
    mut lo: Hour,
    mut hi: Hour,
) -> Result<Hour, StarTourError> {
    while hi - lo > VISIBILITY_BISECTION_TOL {
        let mid = 0.5 * (lo + hi);
        let altitude = transform(body, &observer.advanced_by(mid))?.altitude;
        if altitude <= min_altitude {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}
