use petgraph::visit::EdgeRef;

use super::stations::Stations;
use super::NetworkGraph;
use crate::models::{Connection, Neighbor};

/// Extension trait for connection-related operations on `NetworkGraph`
pub trait Connections {
    /// Add an undirected connection, visible from both endpoints
    ///
    /// Returns false, leaving the graph untouched, when an endpoint does not
    /// exist, the distance is not a positive number, the connection would be a
    /// self-loop, or the pair is already linked on the same line.
    fn add_edge(&mut self, connection: Connection) -> bool;

    /// Remove every connection between two stations, on every line
    /// Returns the number of removed connections
    fn remove_edge(&mut self, from: &str, to: &str) -> usize;

    /// Outgoing adjacency of a station, ordered by destination id then line id
    ///
    /// Unknown stations have no neighbors.
    fn neighbors(&self, id: &str) -> Vec<Neighbor<'_>>;

    /// All connections between two stations
    fn connections_between(&self, from: &str, to: &str) -> Vec<&Connection>;

    /// All connections in insertion order
    fn connections(&self) -> impl Iterator<Item = &Connection>;

    fn connection_count(&self) -> usize;
}

impl Connections for NetworkGraph {
    fn add_edge(&mut self, connection: Connection) -> bool {
        let (Some(from), Some(to)) = (
            self.station_id_to_index.get(&connection.from).copied(),
            self.station_id_to_index.get(&connection.to).copied(),
        ) else {
            log::warn!(
                "Cannot add edge: station {} or {} does not exist",
                connection.from,
                connection.to
            );
            return false;
        };

        if from == to {
            log::warn!("Cannot add edge: {} connects to itself", connection.from);
            return false;
        }

        if !connection.distance_km.is_finite() || connection.distance_km <= 0.0 {
            log::warn!(
                "Cannot add edge {} - {}: distance {} is not positive",
                connection.from,
                connection.to,
                connection.distance_km
            );
            return false;
        }

        let duplicate = self
            .graph
            .edges(from)
            .any(|edge| self.opposite(from, edge) == to && edge.weight().line == connection.line);
        if duplicate {
            crate::debug_log!(
                "Skipping duplicate edge {} - {} on line {}",
                connection.from,
                connection.to,
                connection.line
            );
            return false;
        }

        self.graph.add_edge(from, to, connection);
        true
    }

    fn remove_edge(&mut self, from: &str, to: &str) -> usize {
        let (Some(from), Some(to)) = (self.station_index(from), self.station_index(to)) else {
            return 0;
        };

        let doomed: Vec<_> = self
            .graph
            .edges(from)
            .filter(|edge| self.opposite(from, *edge) == to)
            .map(|edge| edge.id())
            .collect();

        for edge in &doomed {
            self.graph.remove_edge(*edge);
        }
        doomed.len()
    }

    fn neighbors(&self, id: &str) -> Vec<Neighbor<'_>> {
        let Some(index) = self.station_index(id) else {
            return Vec::new();
        };

        let mut neighbors: Vec<Neighbor<'_>> = self
            .graph
            .edges(index)
            .filter_map(|edge| {
                let station = self.graph.node_weight(self.opposite(index, edge))?;
                let connection = edge.weight();
                Some(Neighbor {
                    to: station.id.as_str(),
                    line: connection.line.as_str(),
                    distance_km: connection.distance_km,
                })
            })
            .collect();

        neighbors.sort_by(|a, b| a.to.cmp(b.to).then_with(|| a.line.cmp(b.line)));
        neighbors
    }

    fn connections_between(&self, from: &str, to: &str) -> Vec<&Connection> {
        let (Some(from), Some(to)) = (self.station_index(from), self.station_index(to)) else {
            return Vec::new();
        };

        self.graph
            .edges(from)
            .filter(|edge| self.opposite(from, *edge) == to)
            .map(|edge| edge.weight())
            .collect()
    }

    fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_weight(edge))
    }

    fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }
}
