use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DWELL_TIME_NORMAL_SEC, DEFAULT_DWELL_TIME_TRANSFER_SEC, DEFAULT_TRANSFER_TIME_SEC,
    DEFAULT_VELOCITY_KMH, SECONDS_PER_HOUR,
};

/// What a route search minimises
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Fewest hops, ignoring lines and distances
    #[default]
    MinStops,
    /// Fewest line changes, then fewest hops
    MinTransfers,
    /// Shortest door-to-door time including dwell and transfer time
    MinTime,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::MinStops => "min_stops",
            Strategy::MinTransfers => "min_transfers",
            Strategy::MinTime => "min_time",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min_stops" => Ok(Strategy::MinStops),
            "min_transfers" => Ok(Strategy::MinTransfers),
            "min_time" => Ok(Strategy::MinTime),
            other => Err(format!("Unknown routing strategy: {other}")),
        }
    }
}

/// Parameters of a route search
///
/// Deserializes from the camelCase keys used by the search form
/// (`velocityKmH`, `dwellTimeNormalSec`, ...); missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteConfig {
    pub strategy: Strategy,
    /// Use connection distances; otherwise every hop counts as 1 km
    pub use_real_distance: bool,
    #[serde(rename = "velocityKmH", alias = "velocityKmh")]
    pub velocity_kmh: f64,
    /// Dwell at a single-line station when staying on the train
    pub dwell_time_normal_sec: f64,
    /// Dwell at a transfer station when staying on the train
    pub dwell_time_transfer_sec: f64,
    /// Cost of changing line
    pub transfer_time_sec: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            use_real_distance: true,
            velocity_kmh: DEFAULT_VELOCITY_KMH,
            dwell_time_normal_sec: DEFAULT_DWELL_TIME_NORMAL_SEC,
            dwell_time_transfer_sec: DEFAULT_DWELL_TIME_TRANSFER_SEC,
            transfer_time_sec: DEFAULT_TRANSFER_TIME_SEC,
        }
    }
}

impl RouteConfig {
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Parse a configuration from JSON, filling in defaults and validating the result
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are out of range
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse route config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the physical parameters make sense
    ///
    /// # Errors
    ///
    /// Returns an error if the velocity is not positive or a duration is negative
    pub fn validate(&self) -> Result<(), String> {
        if !self.velocity_kmh.is_finite() || self.velocity_kmh <= 0.0 {
            return Err(format!("Velocity must be positive, got {}", self.velocity_kmh));
        }

        let durations = [
            ("dwellTimeNormalSec", self.dwell_time_normal_sec),
            ("dwellTimeTransferSec", self.dwell_time_transfer_sec),
            ("transferTimeSec", self.transfer_time_sec),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        Ok(())
    }

    /// Distance charged for a hop of `distance_km`
    #[must_use]
    pub fn hop_distance(&self, distance_km: f64) -> f64 {
        if self.use_real_distance {
            distance_km
        } else {
            1.0
        }
    }

    /// Running time of a hop of `distance_km`, in seconds
    #[must_use]
    pub fn hop_time_sec(&self, distance_km: f64) -> f64 {
        let hours = self.hop_distance(distance_km) / self.velocity_kmh;
        hours * SECONDS_PER_HOUR
    }

    /// Time spent at an intermediate station when staying on the same line
    #[must_use]
    pub fn dwell_time_sec(&self, at_transfer_station: bool) -> f64 {
        if at_transfer_station {
            self.dwell_time_transfer_sec
        } else {
            self.dwell_time_normal_sec
        }
    }
}
