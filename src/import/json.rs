//! JSON loading of network data
//!
//! Two shapes are accepted: a fully resolved `NetworkData` document
//! (`stations`, `connections`, `lines`) and a `RawNetwork` document (`lines`
//! with station names plus sparse `keyCoordinates`) that still needs to go
//! through the generator.

use super::generator::{generate_network, RawNetwork};
use crate::models::{NetworkData, NetworkGraph, Stations};

impl NetworkData {
    /// Parse a resolved network document
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a connection references a
    /// station missing from `stations`
    pub fn from_json(json: &str) -> Result<Self, String> {
        let data: Self = serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;

        for connection in &data.connections {
            for endpoint in [&connection.from, &connection.to] {
                if !data.stations.iter().any(|station| &station.id == endpoint) {
                    return Err(format!(
                        "Connection {} - {} on line {} references unknown station {endpoint}",
                        connection.from, connection.to, connection.line
                    ));
                }
            }
        }

        Ok(data)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize network: {e}"))
    }
}

impl RawNetwork {
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))
    }
}

/// Parse a raw network document, generate the missing data and build the graph
///
/// # Errors
///
/// Returns an error if the JSON is malformed or describes no stations
pub fn load_raw_network(json: &str) -> Result<NetworkGraph, String> {
    let raw = RawNetwork::from_json(json)?;
    let graph = NetworkGraph::from_data(generate_network(&raw));
    if graph.station_count() == 0 {
        return Err("Network contains no stations".to_string());
    }
    Ok(graph)
}

/// Parse a resolved network document and build the graph
///
/// # Errors
///
/// Returns an error if the document does not parse or is inconsistent
pub fn load_network(json: &str) -> Result<NetworkGraph, String> {
    NetworkData::from_json(json).map(NetworkGraph::from_data)
}
