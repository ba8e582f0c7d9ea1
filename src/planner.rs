//! Orchestration of a full planning run.
//!
//! One call to [`plan_observation_order`] takes the parsed body set and the
//! observer, annotates every body with its horizon position and set
//! forecast, builds the distance graph, solves the tour and returns the
//! records reordered along it. The planner holds no state between runs.

use std::collections::HashMap;
use std::io;

use serde::Serialize;

use crate::catalog::CelestialBody;
use crate::constants::Degree;
use crate::distance::DistanceGraph;
use crate::observer::Observer;
use crate::startour_errors::StarTourError;
use crate::tour;
use crate::visibility::{estimate, ObservationRecord};

/// Per-run planning options.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Altitude threshold in degrees below which a body counts as not
    /// observable.
    pub min_altitude: Degree,
    /// Name of the body the tour must start from. `None` lets the solver
    /// pick its own deterministic start.
    pub start: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            min_altitude: 0.0,
            start: None,
        }
    }
}

/// The ordered, annotated result of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationPlan {
    /// One record per input body, in visiting order.
    pub records: Vec<ObservationRecord>,
    /// Total slew cost of the visiting order, in degrees.
    pub total_slew: Degree,
}

/// Run the full pipeline over a body set.
///
/// Sequences the per-body horizon/visibility pass, the distance graph
/// build, the tour solve and the final reordering. An empty body set is a
/// valid input and yields an empty plan.
///
/// Errors
/// ------
/// * [`StarTourError::UnknownStartBody`] when `config.start` names a body
///   absent from `bodies`.
/// * Any transform error from invalid body coordinates.
pub fn plan_observation_order(
    bodies: &[CelestialBody],
    observer: &Observer,
    config: &PlannerConfig,
) -> Result<ObservationPlan, StarTourError> {
    let start = match &config.start {
        Some(name) => Some(
            bodies
                .iter()
                .position(|body| &body.name == name)
                .ok_or_else(|| StarTourError::UnknownStartBody(name.clone()))?,
        ),
        None => None,
    };

    let mut records = Vec::with_capacity(bodies.len());
    for body in bodies {
        records.push(estimate(body, observer, config.min_altitude)?);
    }

    let graph = DistanceGraph::new(bodies);
    let tour = tour::solve(bodies, &graph, start);

    let by_name: HashMap<&str, usize> = bodies
        .iter()
        .enumerate()
        .map(|(index, body)| (body.name.as_str(), index))
        .collect();

    let ordered = tour
        .order
        .iter()
        .map(|name| records[by_name[name.as_str()]].clone())
        .collect();

    Ok(ObservationPlan {
        records: ordered,
        total_slew: tour.cost,
    })
}

/// Write the human-readable report: one record per line, tour order.
pub fn write_report<W: io::Write>(plan: &ObservationPlan, mut out: W) -> Result<(), StarTourError> {
    for record in &plan.records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ReportRow<'a> {
    name: &'a str,
    ra: f64,
    dec: f64,
    altitude: f64,
    azimuth: f64,
    hours_to_set: f64,
    observable: bool,
}

/// Write the same report as CSV, one row per record, tour order preserved.
pub fn write_csv_report<W: io::Write>(
    plan: &ObservationPlan,
    out: W,
) -> Result<(), StarTourError> {
    let mut writer = csv::Writer::from_writer(out);
    for record in &plan.records {
        writer.serialize(ReportRow {
            name: &record.body.name,
            ra: record.body.ra,
            dec: record.body.dec,
            altitude: record.position.altitude,
            azimuth: record.position.azimuth,
            hours_to_set: record.hours_to_set(),
            observable: record.observable(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
