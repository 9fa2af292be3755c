//! Search object catalogue and survival estimates
//!
//! Leeway rates are percent of wind speed; divergence is the angle either side
//! of the downwind drift within which the object is expected to stay.

use crate::config::DriftConfig;
use crate::core_types::{Degrees, Hours};
use crate::error::{ensure_finite, Result, SarError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of object being searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchObject {
    LifeRaft,
    Lifeboat,
    EmptyLifeboat,
    PersonInWater,
    PersonInLifejacket,
    SmallVessel,
    MediumVessel,
    LargeVessel,
    Debris,
}

impl SearchObject {
    /// Every catalogued object, in display order
    pub const ALL: [SearchObject; 9] = [
        SearchObject::LifeRaft,
        SearchObject::Lifeboat,
        SearchObject::EmptyLifeboat,
        SearchObject::PersonInWater,
        SearchObject::PersonInLifejacket,
        SearchObject::SmallVessel,
        SearchObject::MediumVessel,
        SearchObject::LargeVessel,
        SearchObject::Debris,
    ];

    /// Leeway rate range `(min, max)` in percent of wind speed
    pub fn leeway_range(self) -> (f64, f64) {
        match self {
            SearchObject::LifeRaft | SearchObject::MediumVessel => (2.0, 4.0),
            SearchObject::Lifeboat => (1.5, 3.0),
            SearchObject::EmptyLifeboat => (4.0, 7.0),
            SearchObject::PersonInWater => (1.0, 2.0),
            SearchObject::PersonInLifejacket => (2.0, 3.0),
            SearchObject::SmallVessel | SearchObject::Debris => (3.0, 5.0),
            SearchObject::LargeVessel => (1.0, 2.5),
        }
    }

    /// Divergence angle either side of the drift direction
    pub fn divergence(self) -> Degrees {
        let degrees = match self {
            SearchObject::PersonInWater | SearchObject::LargeVessel => 15.0,
            SearchObject::Lifeboat
            | SearchObject::PersonInLifejacket
            | SearchObject::MediumVessel => 20.0,
            SearchObject::SmallVessel => 25.0,
            SearchObject::LifeRaft | SearchObject::EmptyLifeboat => 30.0,
            SearchObject::Debris => 35.0,
        };
        Degrees::new(degrees)
    }

    /// Mean leeway rate as a fraction of wind speed
    pub fn leeway_factor(self) -> f64 {
        let (min, max) = self.leeway_range();
        (min + max) / 2.0 / 100.0
    }

    /// Stable `snake_case` name
    pub fn name(self) -> &'static str {
        match self {
            SearchObject::LifeRaft => "life_raft",
            SearchObject::Lifeboat => "lifeboat",
            SearchObject::EmptyLifeboat => "empty_lifeboat",
            SearchObject::PersonInWater => "person_in_water",
            SearchObject::PersonInLifejacket => "person_in_lifejacket",
            SearchObject::SmallVessel => "small_vessel",
            SearchObject::MediumVessel => "medium_vessel",
            SearchObject::LargeVessel => "large_vessel",
            SearchObject::Debris => "debris",
        }
    }
}

impl fmt::Display for SearchObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchObject {
    type Err = SarError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        SearchObject::ALL
            .into_iter()
            .find(|obj| obj.name() == key)
            .ok_or_else(|| SarError::invalid("search_object", format!("unknown object '{s}'")))
    }
}

impl DriftConfig {
    /// Default configuration with the leeway factor of `object`
    pub fn for_object(object: SearchObject) -> Self {
        Self {
            leeway_factor: object.leeway_factor(),
            ..Self::default()
        }
    }
}

/// Thermal protection of a person in the water
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonInWater {
    NoLifejacket,
    Lifejacket,
    ImmersionSuit,
}

impl PersonInWater {
    /// Survival table: (water temperature °C, expected survival hours)
    fn table(self) -> &'static [(f64, f64)] {
        match self {
            PersonInWater::NoLifejacket => &[
                (-2.0, 0.08),
                (0.0, 0.25),
                (5.0, 0.5),
                (10.0, 1.0),
                (15.0, 2.0),
                (20.0, 6.0),
                (25.0, 12.0),
                (30.0, 24.0),
            ],
            PersonInWater::Lifejacket => &[
                (-2.0, 0.25),
                (0.0, 0.5),
                (5.0, 1.0),
                (10.0, 2.0),
                (15.0, 6.0),
                (20.0, 12.0),
                (25.0, 24.0),
                (30.0, 48.0),
            ],
            PersonInWater::ImmersionSuit => &[
                (-2.0, 2.0),
                (0.0, 6.0),
                (5.0, 12.0),
                (10.0, 24.0),
                (15.0, 48.0),
                (20.0, 72.0),
                (25.0, 96.0),
                (30.0, 120.0),
            ],
        }
    }
}

/// Expected survival time in water at `water_temp_c`.
///
/// Linear interpolation between table rows, clamped to the first and last
/// rows outside -2..=30 °C.
///
/// # Errors
/// Returns [`SarError::InvalidInput`] if the temperature is not finite.
pub fn survival_time(person: PersonInWater, water_temp_c: f64) -> Result<Hours> {
    let temp = ensure_finite("water_temp_c", water_temp_c)?;
    let table = person.table();

    let (first_t, first_h) = table[0];
    let (last_t, last_h) = table[table.len() - 1];
    if temp <= first_t {
        return Ok(Hours::new(first_h));
    }
    if temp >= last_t {
        return Ok(Hours::new(last_h));
    }

    let hours = table
        .windows(2)
        .find(|w| temp <= w[1].0)
        .map_or(last_h, |w| {
            let (t0, h0) = w[0];
            let (t1, h1) = w[1];
            h0 + (h1 - h0) * (temp - t0) / (t1 - t0)
        });
    Ok(Hours::new(hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_leeway_factor_is_mean_of_range() {
        assert_relative_eq!(SearchObject::LifeRaft.leeway_factor(), 0.03);
        assert_relative_eq!(SearchObject::EmptyLifeboat.leeway_factor(), 0.055);
        assert_relative_eq!(SearchObject::PersonInWater.leeway_factor(), 0.015);
    }

    #[test]
    fn test_all_objects_have_sane_parameters() {
        for obj in SearchObject::ALL {
            let (min, max) = obj.leeway_range();
            assert!(min > 0.0 && min < max, "{obj}");
            assert!(*obj.divergence() > 0.0 && *obj.divergence() < 90.0, "{obj}");
            assert_eq!(obj.name().parse::<SearchObject>().unwrap(), obj);
        }
    }

    #[test]
    fn test_parse_accepts_spaced_names() {
        assert_eq!(
            "Person in Water".parse::<SearchObject>().unwrap(),
            SearchObject::PersonInWater
        );
        assert!("submarine".parse::<SearchObject>().is_err());
    }

    #[test]
    fn test_config_for_object() {
        let cfg = DriftConfig::for_object(SearchObject::Debris);
        assert_relative_eq!(cfg.leeway_factor, 0.04);
        assert_eq!(cfg.km_per_degree, 111.0);
    }

    #[test]
    fn test_survival_table_points() {
        assert_eq!(
            *survival_time(PersonInWater::Lifejacket, 10.0).unwrap(),
            2.0
        );
        assert_eq!(
            *survival_time(PersonInWater::ImmersionSuit, 0.0).unwrap(),
            6.0
        );
    }

    #[test]
    fn test_survival_interpolates() {
        let h = survival_time(PersonInWater::NoLifejacket, 12.5).unwrap();
        assert_relative_eq!(*h, 1.5);
    }

    #[test]
    fn test_survival_clamps_at_table_ends() {
        assert_eq!(*survival_time(PersonInWater::Lifejacket, -10.0).unwrap(), 0.25);
        assert_eq!(*survival_time(PersonInWater::Lifejacket, 35.0).unwrap(), 48.0);
        assert!(survival_time(PersonInWater::Lifejacket, f64::NAN).is_err());
    }
}
