//! Vector and bearing math
//!
//! Bearings and distances between positions, averaging of wind/current
//! readings, and the local frame that turns metres into degrees.

pub mod bearing;
pub mod frame;

pub use bearing::{bearing, haversine_distance, initial_bearing, vector_mean, EARTH_RADIUS_M};
pub use frame::LocalFrame;
