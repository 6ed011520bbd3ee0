//! Orbital radiation environment model.
//!
//! Maps an orbit (altitude, inclination, mission length) to the physical
//! error rate the noise model is built from:
//!
//! ```text
//!   overall = min(0.33, base_rate(altitude, inclination) × years)
//!   bit     = 0.6 × overall   (single-event upsets)
//!   phase   = 0.4 × overall   (total ionising dose)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{QecError, QecResult};

/// Upper bound on the overall error rate.
pub const SATURATION_RATE: f64 = 0.33;

/// Share of the overall rate attributed to bit flips.
pub const BIT_FLIP_FRACTION: f64 = 0.6;

/// Share of the overall rate attributed to phase flips.
pub const PHASE_FLIP_FRACTION: f64 = 0.4;

/// An orbit and mission length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitProfile {
    altitude_km: u32,
    inclination: String,
    mission_duration_years: f64,
}

impl OrbitProfile {
    /// Describe an orbit. Nothing is validated until rates are computed.
    pub fn new(altitude_km: u32, inclination: impl Into<String>, mission_duration_years: f64) -> Self {
        Self {
            altitude_km,
            inclination: inclination.into(),
            mission_duration_years,
        }
    }

    /// Altitude in kilometres.
    pub fn altitude_km(&self) -> u32 {
        self.altitude_km
    }

    /// Inclination label (`"SSO"`, `"45"`).
    pub fn inclination(&self) -> &str {
        &self.inclination
    }

    /// Mission length in years.
    pub fn mission_duration_years(&self) -> f64 {
        self.mission_duration_years
    }
}

impl fmt::Display for OrbitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}km {} orbit, {} year mission",
            self.altitude_km, self.inclination, self.mission_duration_years
        )
    }
}

/// Per-year error rates keyed by altitude, then inclination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseRateTable {
    rates: BTreeMap<u32, BTreeMap<String, f64>>,
}

impl BaseRateTable {
    /// The built-in low-Earth-orbit table.
    ///
    /// | altitude | SSO | 45 |
    /// |---|---|---|
    /// | 600 | 0.010 | 0.008 |
    /// | 700 | 0.015 | 0.010 |
    /// | 800 | 0.020 | 0.012 |
    pub fn standard() -> Self {
        let mut rates = BTreeMap::new();
        for (altitude, sso, deg45) in [(600, 0.010, 0.008), (700, 0.015, 0.010), (800, 0.020, 0.012)] {
            rates.insert(
                altitude,
                BTreeMap::from([("SSO".to_string(), sso), ("45".to_string(), deg45)]),
            );
        }
        Self { rates }
    }

    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Add or replace one entry.
    pub fn insert(
        &mut self,
        altitude_km: u32,
        inclination: impl Into<String>,
        base_rate: f64,
    ) -> QecResult<()> {
        let inclination = inclination.into();
        check_base_rate(altitude_km, &inclination, base_rate)?;
        self.rates
            .entry(altitude_km)
            .or_default()
            .insert(inclination, base_rate);
        Ok(())
    }

    /// Check every entry is a finite, non-negative rate.
    pub fn validate(&self) -> QecResult<()> {
        if self.rates.is_empty() {
            return Err(QecError::Config("base-rate table is empty".into()));
        }
        for (altitude, inclination, rate) in self.entries() {
            check_base_rate(altitude, inclination, rate)?;
        }
        Ok(())
    }

    /// Base rate for an orbit. Inclination matching ignores ASCII case.
    pub fn base_rate(&self, altitude_km: u32, inclination: &str) -> QecResult<f64> {
        let by_inclination = self
            .rates
            .get(&altitude_km)
            .ok_or(QecError::UnsupportedAltitude { altitude_km })?;

        by_inclination
            .get(inclination)
            .or_else(|| {
                by_inclination
                    .iter()
                    .find(|(label, _)| label.eq_ignore_ascii_case(inclination))
                    .map(|(_, rate)| rate)
            })
            .copied()
            .ok_or_else(|| QecError::UnsupportedInclination {
                altitude_km,
                inclination: inclination.to_string(),
            })
    }

    /// Error rates for an orbit.
    ///
    /// Checks run in order: altitude, inclination, then duration.
    pub fn error_rates(&self, orbit: &OrbitProfile) -> QecResult<ErrorRateProfile> {
        let base = self.base_rate(orbit.altitude_km, &orbit.inclination)?;
        let years = orbit.mission_duration_years;
        if !years.is_finite() || years <= 0.0 {
            return Err(QecError::InvalidParameter(format!(
                "mission duration must be a positive number of years, got {years}"
            )));
        }

        let rates = ErrorRateProfile::from_overall((base * years).min(SATURATION_RATE));
        info!(
            "Space radiation for {}: {:.4} (overall), {:.4} (bit flip), {:.4} (phase flip)",
            orbit, rates.overall_rate, rates.bit_flip_rate, rates.phase_flip_rate
        );
        Ok(rates)
    }

    /// Altitudes in ascending order.
    pub fn altitudes(&self) -> impl Iterator<Item = u32> + '_ {
        self.rates.keys().copied()
    }

    /// Inclination labels available at an altitude.
    pub fn inclinations(&self, altitude_km: u32) -> impl Iterator<Item = &str> + '_ {
        self.rates
            .get(&altitude_km)
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    /// Every `(altitude, inclination, base_rate)` entry.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str, f64)> + '_ {
        self.rates.iter().flat_map(|(&altitude, by_inclination)| {
            by_inclination
                .iter()
                .map(move |(inclination, &rate)| (altitude, inclination.as_str(), rate))
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BaseRateTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_base_rate(altitude_km: u32, inclination: &str, rate: f64) -> QecResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(QecError::Config(format!(
            "base rate for {altitude_km}km {inclination} must be a non-negative number, got {rate}"
        )));
    }
    Ok(())
}

/// Error rates derived from an orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorRateProfile {
    /// Overall physical error rate, capped at [`SATURATION_RATE`].
    pub overall_rate: f64,
    /// Bit-flip share of the overall rate.
    pub bit_flip_rate: f64,
    /// Phase-flip share of the overall rate.
    pub phase_flip_rate: f64,
}

impl ErrorRateProfile {
    /// Split an overall rate into its bit- and phase-flip parts.
    pub fn from_overall(overall_rate: f64) -> Self {
        Self {
            overall_rate,
            bit_flip_rate: overall_rate * BIT_FLIP_FRACTION,
            phase_flip_rate: overall_rate * PHASE_FLIP_FRACTION,
        }
    }

    /// Whether the overall rate hit the cap.
    pub fn is_saturated(&self) -> bool {
        self.overall_rate >= SATURATION_RATE
    }
}

/// Error rates for an orbit using the standard table.
pub fn compute_error_rates(
    altitude_km: u32,
    inclination: &str,
    mission_duration_years: f64,
) -> QecResult<ErrorRateProfile> {
    BaseRateTable::standard().error_rates(&OrbitProfile::new(
        altitude_km,
        inclination,
        mission_duration_years,
    ))
}
