use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a route's itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteStep {
    /// Boarding at the first station
    Start { station_id: String, line_id: String },
    /// Riding into an intermediate station
    Move {
        station_id: String,
        line_id: String,
        distance_km: f64,
        duration_sec: f64,
    },
    /// Changing onto `line_id` at `station_id`
    Transfer {
        station_id: String,
        line_id: String,
        duration_sec: f64,
    },
    /// Riding into the final station
    End {
        station_id: String,
        line_id: String,
        distance_km: f64,
        duration_sec: f64,
    },
}

impl RouteStep {
    #[must_use]
    pub fn station_id(&self) -> &str {
        match self {
            RouteStep::Start { station_id, .. }
            | RouteStep::Move { station_id, .. }
            | RouteStep::Transfer { station_id, .. }
            | RouteStep::End { station_id, .. } => station_id,
        }
    }

    #[must_use]
    pub fn line_id(&self) -> &str {
        match self {
            RouteStep::Start { line_id, .. }
            | RouteStep::Move { line_id, .. }
            | RouteStep::Transfer { line_id, .. }
            | RouteStep::End { line_id, .. } => line_id,
        }
    }

    #[must_use]
    pub fn distance_km(&self) -> f64 {
        match self {
            RouteStep::Move { distance_km, .. } | RouteStep::End { distance_km, .. } => *distance_km,
            RouteStep::Start { .. } | RouteStep::Transfer { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn duration_sec(&self) -> f64 {
        match self {
            RouteStep::Move { duration_sec, .. }
            | RouteStep::Transfer { duration_sec, .. }
            | RouteStep::End { duration_sec, .. } => *duration_sec,
            RouteStep::Start { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn is_transfer(&self) -> bool {
        matches!(self, RouteStep::Transfer { .. })
    }
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStep::Start { station_id, line_id } => {
                write!(f, "Board line {line_id} at {station_id}")
            }
            RouteStep::Move { station_id, line_id, distance_km, duration_sec } => {
                write!(f, "Ride line {line_id} to {station_id} ({distance_km:.1} km, {duration_sec:.0} s)")
            }
            RouteStep::Transfer { station_id, line_id, duration_sec } => {
                write!(f, "Transfer at {station_id} to line {line_id} ({duration_sec:.0} s)")
            }
            RouteStep::End { station_id, line_id, distance_km, duration_sec } => {
                write!(f, "Arrive at {station_id} on line {line_id} ({distance_km:.1} km, {duration_sec:.0} s)")
            }
        }
    }
}

/// A run of consecutive hops on one line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub line_id: String,
    pub from: String,
    pub to: String,
    /// Number of hops ridden on this leg
    pub stops: usize,
    pub distance_km: f64,
    /// Running time of the hops; dwell and transfer time are not included
    pub duration_sec: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub path: Vec<String>,
    pub steps: Vec<RouteStep>,
    /// Whole seconds
    pub total_time_sec: f64,
    /// Kilometres, two decimals
    pub total_distance_km: f64,
    pub total_transfers: usize,
    pub total_stops: usize,
}

impl RouteResult {
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Group the itinerary into per-line legs for timeline display
    #[must_use]
    pub fn legs(&self) -> Vec<RouteLeg> {
        let mut legs: Vec<RouteLeg> = Vec::new();

        for step in &self.steps {
            match step {
                RouteStep::Start { station_id, line_id } | RouteStep::Transfer { station_id, line_id, .. } => {
                    legs.push(RouteLeg {
                        line_id: line_id.clone(),
                        from: station_id.clone(),
                        to: station_id.clone(),
                        stops: 0,
                        distance_km: 0.0,
                        duration_sec: 0.0,
                    });
                }
                RouteStep::Move { station_id, distance_km, duration_sec, .. }
                | RouteStep::End { station_id, distance_km, duration_sec, .. } => {
                    let Some(leg) = legs.last_mut() else {
                        continue;
                    };
                    leg.to.clone_from(station_id);
                    leg.stops += 1;
                    leg.distance_km += distance_km;
                    leg.duration_sec += duration_sec;
                }
            }
        }

        legs
    }
}
