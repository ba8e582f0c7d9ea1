use hifitime::{Duration, Epoch, TimeScale};

use crate::constants::{Radian, DPI, JULIAN_CENTURY, MJD, SECONDS_PER_DAY, SOLAR_TO_SIDEREAL, T2000};
use crate::startour_errors::StarTourError;

/// Build an absolute epoch from a civil date, a civil time and a UTC offset.
///
/// The date and time are interpreted as wall-clock values at the observing
/// site; the offset (hours east of Greenwich, e.g. `+9.0` for JST) is removed
/// to obtain the UTC instant.
///
/// Arguments
/// ---------
/// * `date`: calendar date in the format `YYYY-MM-DD`.
/// * `time`: wall-clock time in the format `HH:MM:SS`.
/// * `utc_offset_hours`: offset of the wall clock from UTC, in hours.
///
/// Return
/// ------
/// * The corresponding [`hifitime::Epoch`] on the UTC time scale.
///
/// Errors
/// ------
/// * [`StarTourError::InvalidDateTime`] when a field is unparseable or out of
///   the calendar domain. No computation starts from a malformed instant.
pub fn civil_to_epoch(date: &str, time: &str, utc_offset_hours: f64) -> Result<Epoch, StarTourError> {
    let (year, month, day) = parse_date(date)?;
    let (hour, minute, second) = parse_time(time)?;
    let local = Epoch::from_gregorian(year, month, day, hour, minute, second, 0, TimeScale::UTC);
    Ok(local - Duration::from_hours(utc_offset_hours))
}

/// Parse a UTC offset string into hours.
///
/// Accepted forms: `+9`, `9`, `-3.5`, `+09:30`, `-05:45`. The result must lie
/// in the real-world offset range \[-12, +14\] hours.
pub fn parse_utc_offset(offset: &str) -> Result<f64, StarTourError> {
    let trimmed = offset.trim();
    let bad = || StarTourError::InvalidUtcOffset(offset.to_string());

    let hours = if let Some((head, tail)) = trimmed.split_once(':') {
        let sign = if head.starts_with('-') { -1.0 } else { 1.0 };
        let whole: f64 = head
            .trim_start_matches(['-', '+'])
            .parse()
            .map_err(|_| bad())?;
        let minutes: f64 = tail.parse().map_err(|_| bad())?;
        if !(0.0..60.0).contains(&minutes) {
            return Err(bad());
        }
        sign * (whole + minutes / 60.0)
    } else {
        trimmed.trim_start_matches('+').parse().map_err(|_| bad())?
    };

    if !(-12.0..=14.0).contains(&hours) {
        return Err(bad());
    }
    Ok(hours)
}

fn parse_date(date: &str) -> Result<(i32, u8, u8), StarTourError> {
    let bad = || StarTourError::InvalidDateTime(date.to_string());
    let mut parts = date.trim().splitn(3, '-');
    // A leading '-' (negative year) is not a supported catalog era.
    let year: i32 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let month: u8 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let day: u8 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return Err(bad());
    }
    Ok((year, month, day))
}

fn parse_time(time: &str) -> Result<(u8, u8, u8), StarTourError> {
    let bad = || StarTourError::InvalidDateTime(time.to_string());
    let mut parts = time.trim().splitn(3, ':');
    let hour: u8 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let minute: u8 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let second: u8 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    if hour > 23 || minute > 59 || second > 59 {
        return Err(bad());
    }
    Ok((hour, minute, second))
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date.
///
/// The value at 0h is given by the IAU 1982 cubic polynomial in Julian
/// centuries since J2000; the elapsed fraction of the day is then added at
/// the sidereal rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (UT1 time scale; UTC is accepted here,
///   since the sub-second UT1-UTC difference is far below the accuracy of
///   the horizon pipeline).
///
/// # Returns
/// * GMST angle in radians, normalized to the interval \[0, 2π).
pub fn gmst(tjm: MJD) -> Radian {
    // IAU 1982 polynomial for GMST at 0h UT1, in seconds of time
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    let day_start = tjm.floor();
    let t = (day_start - T2000) / JULIAN_CENTURY;

    let seconds_at_midnight = ((C3 * t + C2) * t + C1) * t + C0;
    let theta0 = seconds_at_midnight * DPI / SECONDS_PER_DAY;

    // Earth rotation over the elapsed fraction of the day, scaled from the
    // solar to the sidereal rate.
    let theta = theta0 + tjm.fract() * DPI * SOLAR_TO_SIDEREAL;

    theta.rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_civil_to_epoch() {
        let epoch = civil_to_epoch("2025-01-03", "18:00:00", 9.0).unwrap();
        assert!((epoch.to_mjd_utc_days() - 60678.375).abs() < 1e-9);

        let utc = civil_to_epoch("2025-01-03", "09:00:00", 0.0).unwrap();
        assert_eq!(epoch, utc);

        let west = civil_to_epoch("2025-01-02", "23:00:00", -10.0).unwrap();
        assert_eq!(west, utc);
    }

    #[test]
    fn test_civil_to_epoch_rejects_malformed_input() {
        assert!(civil_to_epoch("2025-13-01", "00:00:00", 0.0).is_err());
        assert!(civil_to_epoch("2025-02-30", "00:00:00", 0.0).is_err());
        assert!(civil_to_epoch("2025-01-03", "24:00:00", 0.0).is_err());
        assert!(civil_to_epoch("2025-01-03", "18:00", 0.0).is_err());
        assert!(civil_to_epoch("january 3", "18:00:00", 0.0).is_err());
    }

    #[test]
    fn test_civil_to_epoch_leap_day() {
        assert!(civil_to_epoch("2024-02-29", "12:00:00", 0.0).is_ok());
        assert!(civil_to_epoch("2023-02-29", "12:00:00", 0.0).is_err());
        assert!(civil_to_epoch("2000-02-29", "12:00:00", 0.0).is_ok());
        assert!(civil_to_epoch("1900-02-29", "12:00:00", 0.0).is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+9").unwrap(), 9.0);
        assert_eq!(parse_utc_offset("9").unwrap(), 9.0);
        assert_eq!(parse_utc_offset("-3.5").unwrap(), -3.5);
        assert_eq!(parse_utc_offset("+09:30").unwrap(), 9.5);
        assert_eq!(parse_utc_offset("-05:45").unwrap(), -5.75);
        assert_eq!(parse_utc_offset("0").unwrap(), 0.0);

        assert!(parse_utc_offset("+15").is_err());
        assert!(parse_utc_offset("-13").is_err());
        assert!(parse_utc_offset("+09:75").is_err());
        assert!(parse_utc_offset("JST").is_err());
    }

    #[test]
    fn test_gmst() {
        // Golden instant of the horizon pipeline: 2025-01-03 09:00:00 UTC.
        let theta = gmst(60678.375);
        assert!((theta - 4.158080793980794).abs() < 1e-9);

        // GMST stays in [0, 2pi) over a full day sweep.
        for step in 0..96 {
            let value = gmst(60678.0 + step as f64 / 96.0);
            assert!((0.0..DPI).contains(&value));
        }
    }
}
