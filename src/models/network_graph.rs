use indexmap::IndexMap;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Connection, Diagram, DiagramLink, DiagramNode, Line, Station};

mod connections;
mod lines;
mod stations;

pub use connections::Connections;
pub use lines::Lines;
pub use stations::Stations;

/// The three input collections a network is built from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NetworkData {
    pub stations: Vec<Station>,
    pub connections: Vec<Connection>,
    pub lines: Vec<Line>,
}

/// Transit network: stations as nodes, one undirected edge per (station pair, line)
///
/// Stations and lines keep their insertion order, which fixes the node order of
/// the derived `Diagram` and therefore the layout output.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    pub(crate) graph: StableUnGraph<Station, Connection>,
    pub(crate) station_id_to_index: IndexMap<String, NodeIndex>,
    pub(crate) lines: IndexMap<String, Line>,
}

impl NetworkGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the three input collections
    #[must_use]
    pub fn from_data(data: NetworkData) -> Self {
        let mut graph = Self::new();
        graph.init(data.stations, data.connections, data.lines);
        graph
    }

    /// Rebuild every internal map from scratch
    ///
    /// Connections referencing unknown stations are dropped with a warning; the
    /// rest of the network is still loaded.
    pub fn init(&mut self, stations: Vec<Station>, connections: Vec<Connection>, lines: Vec<Line>) {
        self.clear();

        for line in lines {
            self.add_line(line);
        }
        for station in stations {
            self.add_station(station);
        }

        let total = connections.len();
        let rejected = connections
            .into_iter()
            .filter(|connection| !self.add_edge(connection.clone()))
            .count();

        log::debug!(
            "Network initialised: {} stations, {} lines, {} of {} connections accepted",
            self.station_count(),
            self.lines.len(),
            total - rejected,
            total
        );
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.station_id_to_index.clear();
        self.lines.clear();
    }

    /// Snapshot of the network in its input form
    #[must_use]
    pub fn to_data(&self) -> NetworkData {
        NetworkData {
            stations: self.stations().cloned().collect(),
            connections: self.connections().cloned().collect(),
            lines: self.lines().cloned().collect(),
        }
    }

    /// Derive the node/link structure consumed by the schematic layout
    ///
    /// Nodes follow station insertion order. Links are deduplicated per
    /// unordered station pair: when several lines share a pair, the first one in
    /// neighbor order colors the link.
    #[must_use]
    pub fn diagram(&self) -> Diagram {
        let nodes = self
            .stations()
            .map(|station| {
                let primary = station.primary_line();
                let line_color = primary.map_or(crate::constants::DEFAULT_LINE_COLOR, |id| self.line_color(id));
                let station_index = primary
                    .and_then(|id| self.line(id))
                    .and_then(|line| line.station_position(&station.id));

                DiagramNode {
                    id: station.id.clone(),
                    name: station.name.clone(),
                    x: station.position.x,
                    y: station.position.y,
                    is_transfer: station.is_transfer,
                    line_color: line_color.to_string(),
                    station_index,
                }
            })
            .collect();

        let mut processed: HashSet<(&str, &str)> = HashSet::new();
        let mut links = Vec::new();

        for station in self.stations() {
            for neighbor in self.neighbors(&station.id) {
                let key = if station.id.as_str() < neighbor.to {
                    (station.id.as_str(), neighbor.to)
                } else {
                    (neighbor.to, station.id.as_str())
                };
                if !processed.insert(key) {
                    continue;
                }

                links.push(DiagramLink {
                    source: station.id.clone(),
                    target: neighbor.to.to_string(),
                    color: self.line_color(neighbor.line).to_string(),
                    distance_km: neighbor.distance_km,
                });
            }
        }

        Diagram { nodes, links }
    }

    /// Node index of the station on the other side of `edge` from `index`
    pub(crate) fn opposite(&self, index: NodeIndex, edge: petgraph::stable_graph::EdgeReference<'_, Connection>) -> NodeIndex {
        if edge.source() == index {
            edge.target()
        } else {
            edge.source()
        }
    }
}

impl From<NetworkData> for NetworkGraph {
    fn from(data: NetworkData) -> Self {
        Self::from_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn two_line_network() -> NetworkGraph {
        let lines = vec![
            Line::new("1", "Line 1", "#E4002B", vec!["A".into(), "B".into(), "C".into()]),
            Line::new("2", "Line 2", "#0072CE", vec!["D".into(), "B".into(), "C".into()]),
        ];
        let stations = vec![
            Station::new("A", "Alpha", vec!["1".into()], Position::new(0.0, 0.0)),
            Station::new("B", "Bravo", vec!["1".into(), "2".into()], Position::new(10.0, 0.0)),
            Station::new("C", "Charlie", vec!["1".into(), "2".into()], Position::new(20.0, 0.0)),
            Station::new("D", "Delta", vec!["2".into()], Position::new(10.0, 10.0)),
        ];
        let connections = vec![
            Connection::new("A", "B", "1", 1.0),
            Connection::new("B", "C", "1", 2.0),
            Connection::new("D", "B", "2", 1.5),
            Connection::new("B", "C", "2", 2.0),
        ];
        NetworkGraph::from_data(NetworkData { stations, connections, lines })
    }

    #[test]
    fn test_init_builds_all_maps() {
        let graph = two_line_network();
        assert_eq!(graph.station_count(), 4);
        assert_eq!(graph.connection_count(), 4);
        assert_eq!(graph.lines().count(), 2);
    }

    #[test]
    fn test_init_resets_previous_content() {
        let mut graph = two_line_network();
        graph.init(
            vec![Station::new("X", "X-ray", vec!["9".into()], Position::default())],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(graph.station_count(), 1);
        assert_eq!(graph.connection_count(), 0);
        assert!(graph.station("A").is_none());
    }

    #[test]
    fn test_init_drops_dangling_connections() {
        let graph = NetworkGraph::from_data(NetworkData {
            stations: vec![Station::new("A", "Alpha", vec!["1".into()], Position::default())],
            connections: vec![Connection::new("A", "Ghost", "1", 1.0)],
            lines: Vec::new(),
        });
        assert_eq!(graph.station_count(), 1);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_diagram_deduplicates_shared_corridor() {
        let graph = two_line_network();
        let diagram = graph.diagram();

        assert_eq!(diagram.nodes.len(), 4);
        // B-C is served by both lines but drawn once
        assert_eq!(diagram.links.len(), 3);
        let bc = diagram
            .links
            .iter()
            .find(|link| (link.source == "B" && link.target == "C") || (link.source == "C" && link.target == "B"))
            .expect("B-C link should exist");
        assert_eq!(bc.color, "#E4002B");
    }

    #[test]
    fn test_diagram_node_fields() {
        let graph = two_line_network();
        let diagram = graph.diagram();

        let b = diagram.node("B").expect("B should be in diagram");
        assert!(b.is_transfer);
        assert_eq!(b.line_color, "#E4002B");
        assert_eq!(b.station_index, Some(1));
        assert_eq!((b.x, b.y), (10.0, 0.0));

        let d = diagram.node("D").expect("D should be in diagram");
        assert_eq!(d.line_color, "#0072CE");
        assert_eq!(d.station_index, Some(0));
    }

    #[test]
    fn test_diagram_marks_station_missing_from_its_line() {
        let mut graph = two_line_network();
        // Serves line 1 but is not in line 1's station list
        graph.add_station(Station::new("E", "Echo", vec!["1".into()], Position::new(30.0, 0.0)));
        // Serves a line the graph does not know
        graph.add_station(Station::new("F", "Foxtrot", vec!["9".into()], Position::new(40.0, 0.0)));

        let diagram = graph.diagram();
        let e = diagram.node("E").expect("E should be in diagram");
        assert_eq!(e.station_index, None);
        assert_eq!(e.line_color, "#E4002B");
        let f = diagram.node("F").expect("F should be in diagram");
        assert_eq!(f.station_index, None);
        assert_eq!(f.line_color, "#999");

        let a = diagram.node("A").expect("A should be in diagram");
        assert_eq!(a.station_index, Some(0));
    }

    #[test]
    fn test_to_data_round_trips_through_init() {
        let graph = two_line_network();
        let rebuilt = NetworkGraph::from(graph.to_data());
        assert_eq!(rebuilt.station_count(), graph.station_count());
        assert_eq!(rebuilt.connection_count(), graph.connection_count());
        assert_eq!(rebuilt.diagram(), graph.diagram());
    }

    #[test]
    fn test_graph_is_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<NetworkGraph>();
    }
}
