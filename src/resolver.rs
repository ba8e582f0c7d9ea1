//! External name resolution against the CDS Sesame service.
//!
//! Bare catalog names ("M31", "NGC 2024") carry no coordinates; Sesame
//! aggregates SIMBAD/NED/VizieR and answers with the J2000 position on a
//! `%J <ra> <dec>` line of its plain-text response.

use std::time::Duration;

use regex::Regex;
use ureq::Agent;

use crate::catalog::CelestialBody;
use crate::startour_errors::StarTourError;

const SESAME_ENDPOINT: &str = "https://cds.unistra.fr/cgi-bin/nph-sesame/-oI/A";

/// External lookup from object name to catalog coordinates.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Result<CelestialBody, StarTourError>;
}

/// Sesame-backed resolver with a persistent HTTP client.
///
/// The agent is built once with a global timeout and reused for every
/// lookup of the run.
pub struct SesameResolver {
    http_client: Agent,
    j2000_line: Regex,
}

impl SesameResolver {
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build();

        SesameResolver {
            http_client: config.into(),
            j2000_line: Regex::new(r"%J\s+([0-9eE.+-]+)\s+([0-9eE.+-]+)")
                .expect("J2000 line pattern is valid"),
        }
    }

    fn parse_response(&self, name: &str, response: &str) -> Result<CelestialBody, StarTourError> {
        let captures =
            self.j2000_line
                .captures(response)
                .ok_or_else(|| StarTourError::ResolutionFailed {
                    name: name.to_string(),
                    reason: "no J2000 coordinates in Sesame response".to_string(),
                })?;

        let ra: f64 = captures[1]
            .parse()
            .map_err(|_| malformed(name, &captures[1]))?;
        let dec: f64 = captures[2]
            .parse()
            .map_err(|_| malformed(name, &captures[2]))?;

        CelestialBody::new(name, ra, dec)
    }
}

fn malformed(name: &str, field: &str) -> StarTourError {
    StarTourError::ResolutionFailed {
        name: name.to_string(),
        reason: format!("malformed coordinate field {field:?}"),
    }
}

impl Default for SesameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver for SesameResolver {
    fn resolve(&self, name: &str) -> Result<CelestialBody, StarTourError> {
        let url = format!("{SESAME_ENDPOINT}?{}", name.replace(' ', "+"));
        let response = self
            .http_client
            .get(&url)
            .call()?
            .body_mut()
            .read_to_string()?;
        self.parse_response(name, &response)
    }
}
