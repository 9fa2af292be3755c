//! Unit-tagged quantities for drift and search computations
//!
//! Host forms deliver wind in knots, currents in m/s and radii in nautical
//! miles or kilometres. Every quantity gets its own newtype, so a raw number
//! only reaches the math after an explicit conversion into the internal units:
//! metres, metres per second and hours.
//!
//! # Design
//! - All types wrap `f64`; positions are geodetic degrees and need the precision
//! - Boundary units (`Knots`, `NauticalMiles`, `Kilometers`, `KilometersPerHour`)
//!   convert into the internal ones through `From`
//! - Total ordering via `Ord` (NaN sorts above every other value)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use poisk_core::core_types::units::{Knots, Meters, MetersPerSecond, NauticalMiles};
//!
//! let wind: MetersPerSecond = Knots::new(10.0).into();
//! assert!((*wind - 5.1444).abs() < 1e-3);
//!
//! let radius: Meters = NauticalMiles::new(2.0).into();
//! assert_eq!(*radius, 3704.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul, Sub};

/// Metres in one international nautical mile
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ============================================================================
// SHARED NEWTYPE PLUMBING
// ============================================================================

/// Ordering, deref, raw conversions, linear arithmetic and display for a
/// `f64` quantity newtype. Constructors and unit conversions are written per
/// type below.
macro_rules! quantity {
    ($name:ident, $display:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl $name {
            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub fn value(self) -> f64 {
                self.0
            }

            /// True when the wrapped value is neither NaN nor infinite
            #[inline]
            #[must_use]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $display, self.0)
            }
        }
    };
}

// ============================================================================
// DISTANCE TYPES
// ============================================================================

/// Distance in metres (internal distance unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

quantity!(Meters, "{:.1} m");

impl Meters {
    /// Create a distance in metres. Sign is not checked here; operations that
    /// need a non-negative distance validate it and return an error.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Convert to kilometres
    #[inline]
    #[must_use]
    pub fn to_kilometers(self) -> Kilometers {
        Kilometers(self.0 / 1000.0)
    }

    /// Convert to nautical miles
    #[inline]
    #[must_use]
    pub fn to_nautical_miles(self) -> NauticalMiles {
        NauticalMiles(self.0 / METERS_PER_NAUTICAL_MILE)
    }
}

/// Distance in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilometers(f64);

quantity!(Kilometers, "{:.3} km");

impl Kilometers {
    /// Create a distance in kilometres
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilometers(value)
    }

    /// Convert to metres
    #[inline]
    #[must_use]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * 1000.0)
    }
}

impl From<Kilometers> for Meters {
    fn from(k: Kilometers) -> Meters {
        k.to_meters()
    }
}

/// Distance in nautical miles, the unit SAR forms use for radii and errors
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NauticalMiles(f64);

quantity!(NauticalMiles, "{:.2} NM");

impl NauticalMiles {
    /// Create a distance in nautical miles
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        NauticalMiles(value)
    }

    /// Convert to metres
    #[inline]
    #[must_use]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * METERS_PER_NAUTICAL_MILE)
    }
}

impl From<NauticalMiles> for Meters {
    fn from(nm: NauticalMiles) -> Meters {
        nm.to_meters()
    }
}

// ============================================================================
// TIME TYPES
// ============================================================================

/// Elapsed time in hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hours(f64);

quantity!(Hours, "{:.2} h");

impl Hours {
    /// Create a duration in hours
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hours(value)
    }

    /// Convert to seconds
    #[inline]
    #[must_use]
    pub fn to_seconds(self) -> f64 {
        self.0 * SECONDS_PER_HOUR
    }
}

// ============================================================================
// VELOCITY TYPES
// ============================================================================

/// Speed in metres per second (internal speed unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

quantity!(MetersPerSecond, "{:.2} m/s");

impl MetersPerSecond {
    /// Zero speed
    pub const ZERO: MetersPerSecond = MetersPerSecond(0.0);

    /// Create a speed in metres per second
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Convert to knots
    #[inline]
    #[must_use]
    pub fn to_knots(self) -> Knots {
        Knots(self.0 * SECONDS_PER_HOUR / METERS_PER_NAUTICAL_MILE)
    }

    /// Convert to km/h
    #[inline]
    #[must_use]
    pub fn to_kmh(self) -> KilometersPerHour {
        KilometersPerHour(self.0 * 3.6)
    }
}

// Cross-type operation: velocity * time = distance
impl Mul<Hours> for MetersPerSecond {
    type Output = Meters;
    fn mul(self, rhs: Hours) -> Meters {
        Meters(self.0 * rhs.to_seconds())
    }
}

/// Speed in knots (nautical miles per hour)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Knots(f64);

quantity!(Knots, "{:.1} kn");

impl Knots {
    /// Create a speed in knots
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Knots(value)
    }

    /// Convert to metres per second
    #[inline]
    #[must_use]
    pub fn to_mps(self) -> MetersPerSecond {
        MetersPerSecond(self.0 * METERS_PER_NAUTICAL_MILE / SECONDS_PER_HOUR)
    }
}

impl From<Knots> for MetersPerSecond {
    fn from(k: Knots) -> MetersPerSecond {
        k.to_mps()
    }
}

/// Speed in kilometres per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilometersPerHour(f64);

quantity!(KilometersPerHour, "{:.1} km/h");

impl KilometersPerHour {
    /// Create a speed in km/h
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KilometersPerHour(value)
    }

    /// Convert to metres per second
    #[inline]
    #[must_use]
    pub fn to_mps(self) -> MetersPerSecond {
        MetersPerSecond(self.0 / 3.6)
    }
}

impl From<KilometersPerHour> for MetersPerSecond {
    fn from(k: KilometersPerHour) -> MetersPerSecond {
        k.to_mps()
    }
}

// ============================================================================
// ANGLE AND RATIO TYPES
// ============================================================================

/// Compass angle in degrees (0 = north, clockwise positive)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

quantity!(Degrees, "{:.1}°");

impl Degrees {
    /// North
    pub const NORTH: Degrees = Degrees(0.0);

    /// Create an angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Wrap into [0, 360)
    #[must_use]
    pub fn normalized(self) -> Degrees {
        let wrapped = self.0.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        if wrapped >= 360.0 {
            Degrees(0.0)
        } else {
            Degrees(wrapped)
        }
    }
}

/// Dimensionless fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f64);

quantity!(Fraction, "{:.3}");

impl Fraction {
    /// Create a fraction. Asserts value is in [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&value),
            "Fraction::new: value not in [0, 1]"
        );
        Fraction(value)
    }

    /// Create a fraction, clamping out-of-range values into [0, 1].
    /// NaN becomes 0.
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Fraction(0.0)
        } else {
            Fraction(value.clamp(0.0, 1.0))
        }
    }
}
