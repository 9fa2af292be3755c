//! End-to-end drift scenarios: LKP and readings in, datum and search area out

use approx::assert_relative_eq;
use poisk_core::drift::{survival_time, PersonInWater};
use poisk_core::{
    bearing, estimate_drift, vector_mean, Degrees, DriftConfig, DriftEstimator, Hours, Knots,
    Meters, MetersPerSecond, NauticalMiles, Position, ProbableError, SarError, SearchObject,
    VectorReading,
};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn lkp() -> Position {
    Position::new(60.0, 30.0).unwrap()
}

#[test]
fn test_reference_scenario_moves_northeast() {
    // 6 m/s wind toward 45°, no current, 2 hours
    let wind = VectorReading::new(Degrees::new(45.0), MetersPerSecond::new(6.0));
    let result = estimate_drift(lkp(), &wind, &VectorReading::CALM, Hours::new(2.0)).unwrap();

    let dlat = result.drifted.lat() - 60.0;
    let dlon = result.drifted.lon() - 30.0;
    assert!(dlat > 0.0 && dlat < 0.02, "dlat {dlat}");
    assert!(dlon > 0.0 && dlon < 0.02, "dlon {dlon}");
    // Longitude degrees are half as long at 60°N
    assert_relative_eq!(dlon / dlat, 2.0, max_relative = 1e-9);

    let b = bearing(&lkp(), &result.drifted);
    assert!(*b > 0.0 && *b < 90.0, "bearing {b}");
}

#[test]
fn test_zero_speed_never_moves() {
    for direction in [0.0, 45.0, 180.0, 359.9, 720.0] {
        let calm = VectorReading::new(Degrees::new(direction), MetersPerSecond::ZERO);
        for origin in [lkp(), Position::new(-33.9, 151.2).unwrap(), Position::new(0.0, -180.0).unwrap()] {
            let result = estimate_drift(origin, &calm, &calm, Hours::new(12.0)).unwrap();
            assert_eq!(result.drifted, origin);
        }
    }
}

#[test]
fn test_pole_and_bad_time_are_errors() {
    let wind = VectorReading::new(Degrees::new(0.0), Knots::new(20.0));
    let pole = Position::new(-90.0, 0.0).unwrap();
    assert!(matches!(
        estimate_drift(pole, &wind, &VectorReading::CALM, Hours::new(1.0)),
        Err(SarError::Drift { .. })
    ));
    assert!(matches!(
        estimate_drift(lkp(), &wind, &VectorReading::CALM, Hours::new(-1.0)),
        Err(SarError::InvalidInput { .. })
    ));
}

#[test]
fn test_knots_and_mps_agree() {
    let in_knots = VectorReading::new(Degrees::new(200.0), Knots::new(1.5));
    let in_mps = VectorReading::new(Degrees::new(200.0), MetersPerSecond::new(1.5 * 1852.0 / 3600.0));
    let a = estimate_drift(lkp(), &VectorReading::CALM, &in_knots, Hours::new(3.0)).unwrap();
    let b = estimate_drift(lkp(), &VectorReading::CALM, &in_mps, Hours::new(3.0)).unwrap();
    assert_relative_eq!(a.drifted.lat(), b.drifted.lat(), epsilon = 1e-12);
    assert_relative_eq!(*a.distance(), *NauticalMiles::new(4.5).to_meters(), epsilon = 1e-6);
}

#[test]
fn test_vector_mean_properties() {
    let mean = vector_mean(&[]);
    assert_eq!((*mean.speed, *mean.direction), (0.0, 0.0));

    let single = VectorReading::new(Degrees::new(-30.0), MetersPerSecond::new(3.0));
    let mean = vector_mean(&[single]);
    assert_eq!(*mean.speed, 3.0);
    assert_eq!(*mean.direction, 330.0);
}

#[test]
fn test_life_raft_case_end_to_end() {
    let object = SearchObject::LifeRaft;
    let estimator = DriftEstimator::new(DriftConfig::for_object(object)).unwrap();
    let wind = VectorReading::new(Degrees::new(90.0), Knots::new(25.0));
    let current = VectorReading::new(Degrees::new(180.0), Knots::new(0.8));

    let envelope = estimator
        .estimate_envelope(lkp(), &wind, &current, Hours::new(6.0), object.divergence())
        .unwrap();
    let center = envelope.center;
    assert!(center.drifted.lon() > 30.0);
    assert!(center.drifted.lat() < 60.0);

    let error = ProbableError::new(&center, NauticalMiles::new(1.0).into(), object.divergence())
        .unwrap();
    assert!(error.search_radius > Meters::new(1852.0));
    assert_relative_eq!(*error.search_radius, *error.total * 1.5, max_relative = 1e-12);

    let track = estimator
        .drift_track(lkp(), &wind, &current, Hours::new(6.0), 6)
        .unwrap();
    assert_eq!(track.last().copied(), Some(center.drifted));
}

#[test]
fn test_survival_time_lookup() {
    let cold = survival_time(PersonInWater::NoLifejacket, 2.5).unwrap();
    let warm = survival_time(PersonInWater::NoLifejacket, 22.0).unwrap();
    assert!(cold < warm);
    assert_relative_eq!(*cold, 0.375, epsilon = 1e-12);
}
