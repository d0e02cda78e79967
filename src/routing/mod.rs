mod bfs;
mod config;
mod dijkstra;
mod replay;
mod types;

pub use config::{RouteConfig, Strategy};
pub use types::{RouteLeg, RouteResult, RouteStep};

#[allow(unused_imports)]
use crate::logging::debug_log;
use crate::models::{NetworkGraph, Stations};

/// Route search over a borrowed network
///
/// The engine holds no state of its own; every call reads the graph as it is.
#[derive(Debug, Clone, Copy)]
pub struct RouteSearchEngine<'a> {
    graph: &'a NetworkGraph,
}

impl<'a> RouteSearchEngine<'a> {
    #[must_use]
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    /// Find a route from `start` to `end` passing through `via` in order
    ///
    /// Each consecutive pair of waypoints is solved on its own with the configured
    /// strategy and the segments are joined at their shared station. The joined
    /// path is then replayed to produce steps and totals.
    ///
    /// Returns `None` if the config fails validation, any waypoint is unknown or
    /// any segment is unreachable.
    #[must_use]
    pub fn calculate<S: AsRef<str>>(&self, start: &str, end: &str, via: &[S], config: &RouteConfig) -> Option<RouteResult> {
        if !accepts(config) {
            return None;
        }

        let mut waypoints = Vec::with_capacity(via.len() + 2);
        for id in std::iter::once(start)
            .chain(via.iter().map(AsRef::as_ref))
            .chain(std::iter::once(end))
        {
            let Some(station) = self.graph.station(id) else {
                log::debug!("Route request references unknown station {id}");
                return None;
            };
            waypoints.push(station.id.as_str());
        }

        let mut path: Vec<&'a str> = Vec::new();
        for segment in waypoints.windows(2) {
            let Some(leg) = self.find_path(segment[0], segment[1], config) else {
                log::debug!("No {} route between {} and {}", config.strategy, segment[0], segment[1]);
                return None;
            };
            let skip = usize::from(!path.is_empty());
            path.extend(leg.into_iter().skip(skip));
        }

        let result = self.replay(&path, config)?;
        debug_log!(
            "Route {start} -> {end} ({}): {} stops, {} transfers, {} s",
            config.strategy,
            result.total_stops,
            result.total_transfers,
            result.total_time_sec
        );
        Some(result)
    }

    /// Station sequence for a single segment, without metrics
    #[must_use]
    pub fn find_path(&self, start: &str, end: &str, config: &RouteConfig) -> Option<Vec<&'a str>> {
        if !accepts(config) {
            return None;
        }
        let start = self.graph.station(start)?.id.as_str();
        if !self.graph.contains_station(end) {
            return None;
        }

        match config.strategy {
            Strategy::MinStops => bfs::fewest_stops(self.graph, start, end),
            Strategy::MinTransfers | Strategy::MinTime => {
                dijkstra::cheapest_path(self.graph, start, end, config).map(|(path, _)| path)
            }
        }
    }

    /// Compute steps and totals for an explicit station sequence
    #[must_use]
    pub fn replay<S: AsRef<str>>(&self, path: &[S], config: &RouteConfig) -> Option<RouteResult> {
        if !accepts(config) {
            return None;
        }
        replay::replay(self.graph, path, config)
    }
}

/// Configs built by hand bypass `RouteConfig::from_json`; the costs need positive
/// speed and non-negative durations for the cheapest-path search to be exact
fn accepts(config: &RouteConfig) -> bool {
    match config.validate() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Rejecting route request: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Connection, Connections, Line, NetworkData, Position, Station};
    use approx::assert_relative_eq;

    const NO_VIA: [&str; 0] = [];

    fn station(id: &str, lines: &[&str]) -> Station {
        Station::new(id, id, lines.iter().map(|l| (*l).to_string()).collect(), Position::default())
    }

    fn three_station_line() -> NetworkGraph {
        NetworkGraph::from_data(NetworkData {
            stations: vec![station("S1", &["L1"]), station("S2", &["L1"]), station("S3", &["L1"])],
            connections: vec![
                Connection::new("S1", "S2", "L1", 2.0),
                Connection::new("S2", "S3", "L1", 3.0),
            ],
            lines: vec![Line::new("L1", "Line 1", "#E4002B", vec!["S1".into(), "S2".into(), "S3".into()])],
        })
    }

    /// Two lines crossing at T, with a slow loop line R serving every station
    ///
    /// ```text
    ///        N
    ///        |  (line V)
    ///  W --- T --- E   (line H)
    ///        |
    ///        S
    /// ```
    fn crossing() -> NetworkGraph {
        NetworkGraph::from_data(NetworkData {
            stations: vec![
                station("W", &["H", "R"]),
                station("T", &["H", "V"]),
                station("E", &["H"]),
                station("N", &["V", "R"]),
                station("S", &["V"]),
            ],
            connections: vec![
                Connection::new("W", "T", "H", 1.0),
                Connection::new("T", "E", "H", 1.0),
                Connection::new("N", "T", "V", 1.0),
                Connection::new("T", "S", "V", 1.0),
                Connection::new("W", "N", "R", 5.0),
            ],
            lines: vec![
                Line::new("H", "Horizontal", "#f00", vec!["W".into(), "T".into(), "E".into()]),
                Line::new("V", "Vertical", "#0f0", vec!["N".into(), "T".into(), "S".into()]),
                Line::new("R", "Ring", "#00f", vec!["W".into(), "N".into()]),
            ],
        })
    }

    #[test_log::test]
    fn test_min_time_single_line_scenario() {
        let graph = three_station_line();
        let engine = RouteSearchEngine::new(&graph);
        let config = RouteConfig {
            strategy: Strategy::MinTime,
            velocity_kmh: 60.0,
            ..RouteConfig::default()
        };

        let result = engine.calculate("S1", "S3", &NO_VIA, &config).expect("route should exist");
        assert_eq!(result.path, vec!["S1", "S2", "S3"]);
        assert_relative_eq!(result.total_distance_km, 5.0);
        assert_eq!(result.total_stops, 2);
        assert_eq!(result.total_transfers, 0);
        assert_eq!(result.total_time_sec, 330.0);
    }

    #[test]
    fn test_removed_station_breaks_route() {
        let mut graph = three_station_line();
        assert!(graph.remove_station("S2").is_some());
        assert_eq!(graph.connection_count(), 0);

        let engine = RouteSearchEngine::new(&graph);
        assert!(engine.calculate("S1", "S3", &NO_VIA, &RouteConfig::default()).is_none());
    }

    #[test]
    fn test_unknown_stations() {
        let graph = three_station_line();
        let engine = RouteSearchEngine::new(&graph);
        let config = RouteConfig::default();
        assert!(engine.calculate("S1", "Nowhere", &NO_VIA, &config).is_none());
        assert!(engine.calculate("Nowhere", "S1", &NO_VIA, &config).is_none());
        assert!(engine.calculate("S1", "S3", &["Nowhere"], &config).is_none());
    }

    #[test]
    fn test_start_equals_end() {
        let graph = three_station_line();
        let engine = RouteSearchEngine::new(&graph);
        for strategy in [Strategy::MinStops, Strategy::MinTransfers, Strategy::MinTime] {
            let config = RouteConfig::default().with_strategy(strategy);
            let result = engine.calculate("S2", "S2", &NO_VIA, &config).expect("trivial route should exist");
            assert_eq!(result.path, vec!["S2"]);
            assert_eq!(result.total_stops, 0);
            assert_eq!(result.total_time_sec, 0.0);
            assert_eq!(result.total_distance_km, 0.0);
            assert!(result.steps.is_empty());
        }
    }

    #[test]
    fn test_min_stops_uses_fewest_hops() {
        let graph = crossing();
        let engine = RouteSearchEngine::new(&graph);
        let result = engine
            .calculate("W", "N", &NO_VIA, &RouteConfig::default())
            .expect("route should exist");
        // The ring link is one hop even though it is the longest
        assert_eq!(result.path, vec!["W", "N"]);
        assert_eq!(result.total_stops, 1);
    }

    #[test]
    fn test_min_transfers_avoids_changing() {
        let graph = crossing();
        let engine = RouteSearchEngine::new(&graph);
        let config = RouteConfig::default().with_strategy(Strategy::MinTransfers);
        let result = engine.calculate("E", "S", &NO_VIA, &config).expect("route should exist");
        assert_eq!(result.path, vec!["E", "T", "S"]);
        assert_eq!(result.total_transfers, 1);
        assert!(result.steps.iter().any(RouteStep::is_transfer));
    }

    #[test]
    fn test_min_time_is_optimal_among_alternatives() {
        let graph = crossing();
        let engine = RouteSearchEngine::new(&graph);
        let config = RouteConfig::default().with_strategy(Strategy::MinTime);

        let best = engine.calculate("W", "N", &NO_VIA, &config).expect("route should exist");
        let alternatives: [&[&str]; 2] = [&["W", "N"], &["W", "T", "N"]];
        for alternative in alternatives {
            let replayed = engine.replay(alternative, &config).expect("alternative should replay");
            assert!(best.total_time_sec <= replayed.total_time_sec);
        }
        // 5 km at 80 km/h beats 2 km plus a 300 s change at T
        assert_eq!(best.path, vec!["W", "N"]);
        assert_eq!(best.total_time_sec, 225.0);
    }

    #[test]
    fn test_via_matches_concatenated_segments() {
        let graph = crossing();
        let engine = RouteSearchEngine::new(&graph);
        let requests: [(&str, &[&str], &str); 2] = [("E", &["S"], "N"), ("E", &["S", "W"], "N")];

        for strategy in [Strategy::MinStops, Strategy::MinTransfers, Strategy::MinTime] {
            let config = RouteConfig::default().with_strategy(strategy);
            for (start, via, end) in requests {
                let routed = engine.calculate(start, end, via, &config).expect("route should exist");

                let waypoints: Vec<&str> = std::iter::once(start).chain(via.iter().copied()).chain(std::iter::once(end)).collect();
                let mut joined: Vec<&str> = Vec::new();
                for segment in waypoints.windows(2) {
                    let leg = engine.find_path(segment[0], segment[1], &config).expect("segment should exist");
                    let skip = usize::from(!joined.is_empty());
                    joined.extend(leg.into_iter().skip(skip));
                }

                assert_eq!(routed.path, joined, "{strategy} via {via:?}");
                assert_eq!(routed.total_stops, routed.path.len() - 1);
                assert_eq!(routed, engine.replay(&joined, &config).expect("joined path should replay"));
            }
        }

        let routed = engine.calculate("E", "N", &["S"], &RouteConfig::default()).expect("route should exist");
        assert_eq!(routed.path, vec!["E", "T", "S", "T", "N"]);
    }

    #[test]
    fn test_invalid_config_yields_no_route() {
        let graph = three_station_line();
        let engine = RouteSearchEngine::new(&graph);

        let stopped = RouteConfig {
            strategy: Strategy::MinTime,
            velocity_kmh: 0.0,
            ..RouteConfig::default()
        };
        assert!(engine.calculate("S1", "S3", &NO_VIA, &stopped).is_none());
        assert!(engine.find_path("S1", "S3", &stopped).is_none());

        let rewinding = RouteConfig {
            strategy: Strategy::MinTime,
            transfer_time_sec: -300.0,
            ..RouteConfig::default()
        };
        assert!(engine.calculate("S1", "S3", &NO_VIA, &rewinding).is_none());
        assert!(engine.replay(&["S1", "S2"], &rewinding).is_none());
    }

    #[test]
    fn test_unreachable_via_fails_whole_route() {
        let mut graph = crossing();
        graph.add_station(station("Island", &["Z"]));
        let engine = RouteSearchEngine::new(&graph);
        assert!(engine.calculate("W", "E", &["Island"], &RouteConfig::default()).is_none());
    }

    #[test]
    fn test_min_stops_matches_bfs_distance_on_every_pair() {
        let graph = crossing();
        let engine = RouteSearchEngine::new(&graph);
        let config = RouteConfig::default();
        let expected = |a: &str, b: &str| -> usize {
            match (a, b) {
                _ if a == b => 0,
                ("W", "T" | "N") | ("T", "W" | "E" | "N" | "S") | ("E", "T") | ("N", "T" | "W") | ("S", "T") => 1,
                _ => 2,
            }
        };

        let ids = ["W", "T", "E", "N", "S"];
        for a in ids {
            for b in ids {
                let result = engine.calculate(a, b, &NO_VIA, &config).expect("network is connected");
                assert_eq!(result.total_stops, expected(a, b), "{a} -> {b}");
            }
        }
    }

    #[test]
    fn test_parallel_searches_share_one_graph() {
        let graph = crossing();
        let engine = RouteSearchEngine::new(&graph);
        let config = RouteConfig::default().with_strategy(Strategy::MinTime);
        let expected = engine.calculate("E", "N", &NO_VIA, &config);

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| engine.calculate("E", "N", &NO_VIA, &config)))
                .collect();
            handles.into_iter().map(|handle| handle.join().expect("search thread")).collect()
        });

        assert!(expected.is_some());
        assert!(results.iter().all(|result| *result == expected));
    }
}
