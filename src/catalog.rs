//! Target catalog: bodies, file parsing and name-resolution policy.
//!
//! A catalog file carries one target per line in one of three shapes:
//!
//! ```text
//! M31 10.68 41.27              # name + RA/Dec in decimal degrees
//! M31 00 42 44.3 +41 16 09     # name + sexagesimal RA (hours) and Dec
//! M31                          # bare name, resolved via a NameResolver
//! ```
//!
//! Blank lines and `#` comments are skipped. Malformed coordinate values are
//! hard errors; how unresolved bare names are handled is the caller's policy
//! ([`UnresolvedPolicy`]), not this module's.

use camino::Utf8Path;

use crate::constants::Degree;
use crate::resolver::NameResolver;
use crate::startour_errors::StarTourError;

/// A catalog object: name plus equatorial J2000 coordinates in degrees.
///
/// Immutable once built; identity is by name, assumed unique within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    /// Right ascension in degrees, \[0, 360)
    pub ra: Degree,
    /// Declination in degrees, \[-90, 90\]
    pub dec: Degree,
}

impl CelestialBody {
    /// Build a body, rejecting out-of-range coordinates.
    ///
    /// Errors
    /// ----------
    /// * [`StarTourError::InvalidRightAscension`] unless `ra ∈ [0, 360)`.
    /// * [`StarTourError::InvalidDeclination`] unless `dec ∈ [-90, 90]`.
    pub fn new(name: impl Into<String>, ra: Degree, dec: Degree) -> Result<Self, StarTourError> {
        if !(0.0..360.0).contains(&ra) {
            return Err(StarTourError::InvalidRightAscension(ra));
        }
        if !(-90.0..=90.0).contains(&dec) {
            return Err(StarTourError::InvalidDeclination(dec));
        }
        Ok(CelestialBody {
            name: name.into(),
            ra,
            dec,
        })
    }
}

/// One parsed catalog line: either a fully specified body or a bare name
/// still needing an external lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Resolved(CelestialBody),
    Unresolved(String),
}

/// What to do when a bare name cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Abort the whole run on the first failed lookup.
    Fail,
    /// Log a warning and drop the entry.
    SkipWithWarning,
}

/// Parse a single catalog line.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<CatalogEntry>, StarTourError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let n = fields.len();

    // Sexagesimal tail first: a decimal check on the last two fields would
    // otherwise swallow the arcminute/arcsecond columns.
    if n >= 7 {
        if let (Some(ra), Some(dec)) = (
            parse_ra_sexagesimal(&fields[n - 6..n - 3]),
            parse_dec_sexagesimal(&fields[n - 3..]),
        ) {
            let name = fields[..n - 6].join(" ");
            return Ok(Some(CatalogEntry::Resolved(CelestialBody::new(
                name, ra, dec,
            )?)));
        }
    }

    if n >= 3 {
        if let (Ok(ra), Ok(dec)) = (fields[n - 2].parse::<f64>(), fields[n - 1].parse::<f64>()) {
            let name = fields[..n - 2].join(" ");
            return Ok(Some(CatalogEntry::Resolved(CelestialBody::new(
                name, ra, dec,
            )?)));
        }
    }

    Ok(Some(CatalogEntry::Unresolved(trimmed.to_string())))
}

/// Read a whole catalog file.
pub fn read_catalog(path: &Utf8Path) -> Result<Vec<CatalogEntry>, StarTourError> {
    let content = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for line in content.lines() {
        if let Some(entry) = parse_line(line)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Turn parsed entries into bodies, resolving bare names.
///
/// Arguments
/// ---------
/// * `entries`: parsed catalog lines, in file order.
/// * `resolver`: external name lookup for bare names.
/// * `policy`: whether a failed lookup aborts the run or drops the entry
///   with a warning.
pub fn resolve_entries(
    entries: Vec<CatalogEntry>,
    resolver: &dyn NameResolver,
    policy: UnresolvedPolicy,
) -> Result<Vec<CelestialBody>, StarTourError> {
    let mut bodies = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            CatalogEntry::Resolved(body) => bodies.push(body),
            CatalogEntry::Unresolved(name) => match resolver.resolve(&name) {
                Ok(body) => bodies.push(body),
                Err(error) => match policy {
                    UnresolvedPolicy::Fail => return Err(error),
                    UnresolvedPolicy::SkipWithWarning => {
                        log::warn!("skipping {name}: {error}");
                    }
                },
            },
        }
    }
    Ok(bodies)
}

/// Parse `HH MM SS.S` right ascension fields to degrees.
fn parse_ra_sexagesimal(fields: &[&str]) -> Option<Degree> {
    let hours: f64 = fields[0].parse().ok()?;
    let minutes: f64 = fields[1].parse().ok()?;
    let seconds: f64 = fields[2].parse().ok()?;
    if !(0.0..24.0).contains(&hours)
        || !(0.0..60.0).contains(&minutes)
        || !(0.0..60.0).contains(&seconds)
    {
        return None;
    }
    Some((hours + minutes / 60.0 + seconds / 3600.0) * 15.0)
}

/// Parse `±DD MM SS.S` declination fields to degrees.
fn parse_dec_sexagesimal(fields: &[&str]) -> Option<Degree> {
    let lead = fields[0];
    let sign = if lead.starts_with('-') { -1.0 } else { 1.0 };
    let degrees: f64 = lead.trim_start_matches(['-', '+']).parse().ok()?;
    let minutes: f64 = fields[1].parse().ok()?;
    let seconds: f64 = fields[2].parse().ok()?;
    if !(0.0..=90.0).contains(&degrees)
        || !(0.0..60.0).contains(&minutes)
        || !(0.0..60.0).contains(&seconds)
    {
        return None;
    }
    Some(sign * (degrees + minutes / 60.0 + seconds / 3600.0))
}
