use clap::Parser;
use poisk_core::drift::{survival_time, PersonInWater};
use poisk_core::{
    bearing, Degrees, DriftConfig, DriftEstimator, Hours, Knots, Meters, NauticalMiles, Position,
    ProbabilityGrid, ProbableError, SampledField, SarConfig, SarError, SearchGenerator,
    SearchObject, SearchParams, VectorReading,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drift and search-area calculator with configurable scenario
#[derive(Parser, Debug)]
#[command(name = "poisk-demo")]
#[command(about = "Search and rescue drift and search pattern demo", long_about = None)]
struct Args {
    /// Last known position, latitude in degrees
    #[arg(long, default_value_t = 60.0, allow_negative_numbers = true)]
    lat: f64,

    /// Last known position, longitude in degrees
    #[arg(long, default_value_t = 28.0, allow_negative_numbers = true)]
    lon: f64,

    /// Wind speed in knots
    #[arg(short, long, default_value_t = 15.0)]
    wind_speed: f64,

    /// Direction the wind blows toward, degrees (0=North, 90=East)
    #[arg(long, default_value_t = 45.0)]
    wind_direction: f64,

    /// Surface current speed in knots
    #[arg(short, long, default_value_t = 0.5)]
    current_speed: f64,

    /// Direction the current sets toward, degrees
    #[arg(long, default_value_t = 90.0)]
    current_direction: f64,

    /// Hours since the last known position
    #[arg(short = 't', long, default_value_t = 6.0)]
    hours: f64,

    /// Search object (life_raft, person_in_water, small_vessel, ...)
    #[arg(short, long, default_value = "person_in_water")]
    object: SearchObject,

    /// Initial position error in nautical miles
    #[arg(long, default_value_t = 0.5)]
    initial_error: f64,

    /// Search method (expanding_square, sector, parallel_sweep, convex_hull)
    #[arg(short, long, default_value = "expanding_square")]
    method: String,

    /// Pattern radius or leg increment in nautical miles
    #[arg(long, default_value_t = 1.0)]
    radius: f64,

    /// Expanding square ring count
    #[arg(long, default_value_t = 4)]
    legs: u32,

    /// Sector count
    #[arg(long, default_value_t = 6)]
    sectors: u32,

    /// Probability grid resolution in metres
    #[arg(long, default_value_t = 250.0)]
    resolution: f64,

    /// Sampled probability points
    #[arg(long, default_value_t = 200)]
    samples: usize,

    /// Seed for the sampled field (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Water temperature in °C for a survival estimate
    #[arg(long, allow_negative_numbers = true)]
    water_temp: Option<f64>,

    /// Drift line steps to print
    #[arg(long, default_value_t = 6)]
    track_steps: u32,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), SarError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SarConfig::load(path)?,
        None => SarConfig::default(),
    };
    info!(object = %args.object, method = %args.method, "Starting scenario");

    println!("=== Poisk-More Drift Demo ===\n");

    let lkp = Position::new(args.lat, args.lon)?;
    let wind = VectorReading::new(Degrees::new(args.wind_direction), Knots::new(args.wind_speed));
    let current = VectorReading::new(
        Degrees::new(args.current_direction),
        Knots::new(args.current_speed),
    );
    let elapsed = Hours::new(args.hours);

    println!("LKP:      {lkp}");
    println!("Wind:     {wind}");
    println!("Current:  {current}");
    println!("Elapsed:  {elapsed}");
    println!(
        "Object:   {} (leeway {:.1}%, divergence {})\n",
        args.object,
        args.object.leeway_factor() * 100.0,
        args.object.divergence()
    );

    // Object leeway on top of the loaded frame constants
    let estimator = DriftEstimator::new(DriftConfig {
        leeway_factor: args.object.leeway_factor(),
        ..config.drift
    })?;

    let envelope =
        estimator.estimate_envelope(lkp, &wind, &current, elapsed, args.object.divergence())?;
    let drift = envelope.center;
    println!("Datum:    {}", drift.drifted);
    println!(
        "Drift:    {:.2} NM toward {} ({:.0} m E, {:.0} m N)",
        *drift.distance().to_nautical_miles(),
        drift.set(),
        *drift.east,
        *drift.north
    );
    println!("Left:     {}", envelope.left);
    println!("Right:    {}", envelope.right);

    let error = ProbableError::new(
        &drift,
        NauticalMiles::new(args.initial_error).to_meters(),
        args.object.divergence(),
    )?;
    println!(
        "Error:    {:.2} NM total, search radius {:.2} NM, area {:.1} NM²\n",
        *error.total.to_nautical_miles(),
        *error.search_radius_nm(),
        error.area_nm2()
    );

    println!("Step | Time (h) | Position               | Bearing from LKP");
    println!("-----|----------|------------------------|-----------------");
    let track = estimator.drift_track(lkp, &wind, &current, elapsed, args.track_steps)?;
    for (step, position) in track.iter().enumerate() {
        let t = *elapsed * step as f64 / f64::from(args.track_steps);
        let shown = position.to_string();
        println!(
            "{:4} | {:8.2} | {:22} | {}",
            step,
            t,
            shown,
            bearing(&lkp, position)
        );
    }

    let params = SearchParams {
        radius: NauticalMiles::new(args.radius).into(),
        legs: args.legs,
        sectors: args.sectors,
        orientation: drift.set(),
        sweep_bearing: drift.set(),
        points: envelope.datums().to_vec(),
        ..SearchParams::default()
    };
    let geometry = SearchGenerator::new(config.drift)?.generate_by_name(
        &args.method,
        drift.drifted,
        &params,
    )?;
    let vertices = geometry.vertices();
    println!(
        "\nSearch pattern: {} ({} vertices, closed: {})",
        args.method,
        vertices.len(),
        geometry.is_closed()
    );
    if let Some(bbox) = geometry.bounding_box() {
        println!(
            "Bounding box: lat [{:.4}, {:.4}], lon [{:.4}, {:.4}]",
            bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
        );
    }

    let grid = ProbabilityGrid::generate_with(
        drift.drifted,
        error.search_radius,
        Meters::new(args.resolution),
        &config,
    )?;
    let covered = grid.values().iter().filter(|v| **v > 0.0).count();
    println!(
        "\nProbability grid: {}x{} cells at {}, {} cells inside the radius",
        grid.size(),
        grid.size(),
        grid.resolution(),
        covered
    );

    let field = SampledField::generate_with(
        drift.drifted,
        error.search_radius,
        args.samples,
        args.seed,
        &config,
    )?;
    let mean_weight = if field.is_empty() {
        0.0
    } else {
        field.points().iter().map(|p| *p.weight).sum::<f64>() / field.len() as f64
    };
    println!(
        "Sampled field: {} points, seed {}, mean weight {:.3}",
        field.len(),
        field.seed(),
        mean_weight
    );

    if let Some(temp) = args.water_temp {
        println!("\nSurvival estimate at {temp:.1} °C:");
        for person in [
            PersonInWater::NoLifejacket,
            PersonInWater::Lifejacket,
            PersonInWater::ImmersionSuit,
        ] {
            let hours = survival_time(person, temp)?;
            let status = if hours > elapsed { "within" } else { "beyond" };
            println!("  {person:?}: {hours} ({status} expected survival)");
        }
    }

    println!("\n=== Scenario Complete ===");
    Ok(())
}
