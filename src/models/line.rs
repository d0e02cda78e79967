use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Canonical station order along the line
    pub stations: Vec<String>,
}

impl Line {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>, stations: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            stations,
        }
    }

    /// Position of a station in the line's canonical order
    #[must_use]
    pub fn station_position(&self, station_id: &str) -> Option<usize> {
        self.stations.iter().position(|id| id == station_id)
    }
}
