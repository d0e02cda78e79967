use petgraph::stable_graph::NodeIndex;

use super::NetworkGraph;
use crate::models::{Position, Station};

/// Extension trait for station-related operations on `NetworkGraph`
pub trait Stations {
    /// Insert a station, or update the existing record with the same id
    ///
    /// Updating keeps every connection attached to the station. The transfer
    /// flag is recomputed from the line membership.
    fn add_station(&mut self, station: Station) -> NodeIndex;

    /// Delete a station together with every connection touching it
    fn remove_station(&mut self, id: &str) -> Option<Station>;

    fn station(&self, id: &str) -> Option<&Station>;

    /// All stations in insertion order
    fn stations(&self) -> impl Iterator<Item = &Station>;

    fn station_count(&self) -> usize;

    fn contains_station(&self, id: &str) -> bool;

    /// Overwrite a station's position; returns false for unknown ids
    fn set_station_position(&mut self, id: &str, position: Position) -> bool;

    /// Get `NodeIndex` by station id
    fn station_index(&self, id: &str) -> Option<NodeIndex>;
}

impl Stations for NetworkGraph {
    fn add_station(&mut self, mut station: Station) -> NodeIndex {
        let is_transfer = station.lines.len() > 1;
        if station.is_transfer != is_transfer {
            crate::debug_log!(
                "Station {} transfer flag corrected to {} ({} lines)",
                station.id,
                is_transfer,
                station.lines.len()
            );
            station.is_transfer = is_transfer;
        }

        if let Some(&index) = self.station_id_to_index.get(&station.id) {
            if let Some(existing) = self.graph.node_weight_mut(index) {
                *existing = station;
            }
            index
        } else {
            let id = station.id.clone();
            let index = self.graph.add_node(station);
            self.station_id_to_index.insert(id, index);
            index
        }
    }

    fn remove_station(&mut self, id: &str) -> Option<Station> {
        let index = self.station_id_to_index.shift_remove(id)?;
        // Removing the node also drops every incident edge
        self.graph.remove_node(index)
    }

    fn station(&self, id: &str) -> Option<&Station> {
        self.station_index(id)
            .and_then(|index| self.graph.node_weight(index))
    }

    fn stations(&self) -> impl Iterator<Item = &Station> {
        self.station_id_to_index
            .values()
            .filter_map(|&index| self.graph.node_weight(index))
    }

    fn station_count(&self) -> usize {
        self.station_id_to_index.len()
    }

    fn contains_station(&self, id: &str) -> bool {
        self.station_id_to_index.contains_key(id)
    }

    fn set_station_position(&mut self, id: &str, position: Position) -> bool {
        let Some(index) = self.station_index(id) else {
            return false;
        };
        let Some(station) = self.graph.node_weight_mut(index) else {
            return false;
        };
        station.position = position;
        true
    }

    fn station_index(&self, id: &str) -> Option<NodeIndex> {
        self.station_id_to_index.get(id).copied()
    }
}
