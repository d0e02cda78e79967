use serde::{Deserialize, Serialize};

/// Undirected, line-tagged link between two adjacent stations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub line: String,
    pub distance_km: f64,
}

impl Connection {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, line: impl Into<String>, distance_km: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            line: line.into(),
            distance_km,
        }
    }

    /// Endpoint on the other side of `station_id`, if the connection touches it
    #[must_use]
    pub fn other_end(&self, station_id: &str) -> Option<&str> {
        if self.from == station_id {
            Some(&self.to)
        } else if self.to == station_id {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// One outgoing adjacency entry, borrowed from the graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub to: &'a str,
    pub line: &'a str,
    pub distance_km: f64,
}
