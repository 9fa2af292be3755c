//! Core types and units

pub mod drift_result;
pub mod position;
pub mod reading;
pub mod units;

pub use drift_result::DriftResult;
pub use position::Position;
pub use reading::VectorReading;
pub use units::{
    Degrees, Fraction, Hours, Kilometers, KilometersPerHour, Knots, Meters, MetersPerSecond,
    NauticalMiles,
};
