use startour::catalog::CelestialBody;
use startour::observer::Observer;
use startour::planner::{plan_observation_order, write_report, PlannerConfig};
use startour::time::civil_to_epoch;

/// Shizuoka-area site of the published reference values.
fn golden_observer() -> Observer {
    let epoch = civil_to_epoch("2025-01-03", "18:00:00", 9.0).unwrap();
    Observer::new(34.863, 138.843, 1000.0, epoch).unwrap()
}

fn winter_sky() -> Vec<CelestialBody> {
    vec![
        CelestialBody::new("Sirius", 101.287, -16.716).unwrap(),
        CelestialBody::new("Betelgeuse", 88.793, 7.407).unwrap(),
        CelestialBody::new("Rigel", 78.634, -8.202).unwrap(),
        CelestialBody::new("Aldebaran", 68.980, 16.509).unwrap(),
        CelestialBody::new("Pollux", 116.329, 28.026).unwrap(),
        CelestialBody::new("Capella", 79.172, 45.998).unwrap(),
    ]
}

fn order(records: &[startour::visibility::ObservationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.body.name.as_str()).collect()
}

#[test]
fn default_start_plans_the_winter_sky() {
    let bodies = winter_sky();
    let plan =
        plan_observation_order(&bodies, &golden_observer(), &PlannerConfig::default()).unwrap();

    assert_eq!(
        order(&plan.records),
        ["Sirius", "Rigel", "Aldebaran", "Betelgeuse", "Pollux", "Capella"]
    );
    assert!((plan.total_slew - 138.99083822804508).abs() < 1e-6);

    // Every input body appears exactly once.
    let mut visited: Vec<&str> = order(&plan.records);
    visited.sort_unstable();
    assert_eq!(
        visited,
        ["Aldebaran", "Betelgeuse", "Capella", "Pollux", "Rigel", "Sirius"]
    );
}

#[test]
fn fixed_start_plans_from_the_requested_body() {
    let bodies = winter_sky();
    let config = PlannerConfig {
        min_altitude: 0.0,
        start: Some("Sirius".to_string()),
    };
    let plan = plan_observation_order(&bodies, &golden_observer(), &config).unwrap();

    assert_eq!(
        order(&plan.records),
        ["Sirius", "Rigel", "Betelgeuse", "Aldebaran", "Capella", "Pollux"]
    );
    assert!((plan.total_slew - 128.59628689797603).abs() < 1e-6);
}

#[test]
fn records_carry_positions_and_forecasts() {
    let bodies = winter_sky();
    let plan =
        plan_observation_order(&bodies, &golden_observer(), &PlannerConfig::default()).unwrap();

    let record = |name: &str| {
        plan.records
            .iter()
            .find(|r| r.body.name == name)
            .unwrap_or_else(|| panic!("{name} missing from plan"))
    };

    // Sirius has not risen yet at 18:00 local time.
    let sirius = record("Sirius");
    assert!(!sirius.observable());
    assert_eq!(sirius.hours_to_set(), 0.0);
    assert!((sirius.position.altitude - -5.1123).abs() < 1e-3);

    let capella = record("Capella");
    assert!(capella.observable());
    assert!((capella.position.altitude - 42.3755).abs() < 1e-3);
    assert!((capella.position.azimuth - 56.5188).abs() < 1e-3);
    assert!((capella.hours_to_set() - 13.2155).abs() < 0.01);

    let aldebaran = record("Aldebaran");
    assert!((aldebaran.position.altitude - 40.1185).abs() < 1e-3);
    assert!((aldebaran.hours_to_set() - 10.2527).abs() < 0.01);
}

#[test]
fn solved_plan_never_exceeds_input_order_cost() {
    let bodies = winter_sky();
    let mut identity = 0.0;
    for pair in bodies.windows(2) {
        identity += startour::distance::angular_separation(&pair[0], &pair[1]);
    }
    let plan =
        plan_observation_order(&bodies, &golden_observer(), &PlannerConfig::default()).unwrap();
    assert!(plan.total_slew <= identity + 1e-9);
}

#[test]
fn identical_inputs_produce_byte_identical_reports() {
    let bodies = winter_sky();
    let observer = golden_observer();
    let config = PlannerConfig {
        min_altitude: 0.0,
        start: Some("Sirius".to_string()),
    };

    let mut first = Vec::new();
    let mut second = Vec::new();
    let plan = plan_observation_order(&bodies, &observer, &config).unwrap();
    write_report(&plan, &mut first).unwrap();
    let plan = plan_observation_order(&bodies, &observer, &config).unwrap();
    write_report(&plan, &mut second).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}
