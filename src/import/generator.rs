//! Network generator
//!
//! Builds a complete `NetworkData` from line definitions (ordered station
//! names) and a sparse set of known station coordinates. Missing coordinates
//! are filled in along each line; connection distances are derived from a
//! seeded generator so the same input always yields the same network.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
use crate::logging::debug_log;
use crate::geometry::round_half_up;
use crate::models::{Connection, Line, NetworkData, Position, Station};

/// Position used for the first station of a line with no known coordinate
const FALLBACK_POSITION: Position = Position { x: 500.0, y: 500.0 };
/// Spacing used to extrapolate before the only known station of a line
const EXTRAPOLATE_START_STEP: (f64, f64) = (20.0, 20.0);
/// Spacing used to extrapolate after the only known station of a line
const EXTRAPOLATE_END_STEP: (f64, f64) = (20.0, -20.0);
const MIN_DISTANCE_KM: f64 = 1.5;
const MAX_DISTANCE_KM: f64 = 4.0;

/// A line as listed in the source data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawLine {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Station names in running order; names double as station ids
    pub stations: Vec<String>,
}

/// Known drawing coordinate of one station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyCoordinate {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawNetwork {
    pub lines: Vec<RawLine>,
    #[serde(default)]
    pub key_coordinates: Vec<KeyCoordinate>,
}

/// Deterministic pseudo-random sequence in [0, 1) driven by `sin`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: f64,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: f64) -> Self {
        Self { seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        let x = self.seed.sin() * 10_000.0;
        self.seed += 1.0;
        x - x.floor()
    }

    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Seed for the distance between two adjacent stations
///
/// Lengths and leading characters are counted in UTF-16 code units so station
/// names in any script produce the same distances as the published data.
fn distance_seed(from: &str, to: &str) -> f64 {
    let units = |s: &str| s.encode_utf16().count();
    let first = |s: &str| s.encode_utf16().next().map_or(0, u32::from);
    (units(from) + units(to)) as f64 + f64::from(first(from) + first(to))
}

/// Distance in km between two adjacent stations, one decimal
#[must_use]
pub fn connection_distance(from: &str, to: &str) -> f64 {
    let value = SeededRandom::new(distance_seed(from, to)).range(MIN_DISTANCE_KM, MAX_DISTANCE_KM);
    round_half_up(value * 10.0) / 10.0
}

/// Build stations, lines and connections from raw line definitions
///
/// Stations keep the order in which they are first seen; a station listed by
/// more than one line becomes a transfer station. Coordinates are resolved per
/// line in order, and a coordinate resolved by an earlier line is never moved
/// by a later one.
#[must_use]
pub fn generate_network(raw: &RawNetwork) -> NetworkData {
    let mut coordinates: IndexMap<String, Position> = raw
        .key_coordinates
        .iter()
        .map(|key| (key.id.clone(), Position::new(key.x, key.y)))
        .collect();
    debug_log!("Loaded {} key coordinates", coordinates.len());

    let mut stations: IndexMap<String, Station> = IndexMap::new();
    let mut lines = Vec::with_capacity(raw.lines.len());

    for raw_line in &raw.lines {
        resolve_line_coordinates(raw_line, &mut coordinates);

        for name in &raw_line.stations {
            if let Some(existing) = stations.get_mut(name) {
                existing.add_line(&raw_line.id);
                continue;
            }

            let position = coordinates.get(name).copied().unwrap_or_else(|| {
                log::warn!("No coordinate resolved for station {name}");
                Position::default()
            });
            stations.insert(
                name.clone(),
                Station::new(name.clone(), name.clone(), vec![raw_line.id.clone()], position),
            );
        }

        lines.push(Line::new(
            raw_line.id.clone(),
            raw_line.name.clone(),
            raw_line.color.clone(),
            raw_line.stations.clone(),
        ));
    }

    let connections = generate_connections(&lines);
    debug_log!(
        "Generated {} stations, {} lines and {} connections",
        stations.len(),
        lines.len(),
        connections.len()
    );

    NetworkData {
        stations: stations.into_values().collect(),
        connections,
        lines,
    }
}

/// One connection per consecutive station pair of every line
#[must_use]
pub fn generate_connections(lines: &[Line]) -> Vec<Connection> {
    lines
        .iter()
        .flat_map(|line| {
            line.stations
                .windows(2)
                .map(|pair| Connection::new(&pair[0], &pair[1], &line.id, connection_distance(&pair[0], &pair[1])))
        })
        .collect()
}

/// Fill in every missing coordinate along one line
fn resolve_line_coordinates(line: &RawLine, coordinates: &mut IndexMap<String, Position>) {
    let stations = &line.stations;
    let Some(last) = stations.len().checked_sub(1) else {
        return;
    };

    let mut known: Vec<usize> = stations
        .iter()
        .enumerate()
        .filter(|(_, name)| coordinates.contains_key(name.as_str()))
        .map(|(i, _)| i)
        .collect();

    if known.is_empty() {
        log::warn!("Line {} has no known coordinates, starting at {FALLBACK_POSITION:?}", line.id);
        coordinates.insert(stations[0].clone(), FALLBACK_POSITION);
        known.push(0);
    }

    let position_at = |coordinates: &IndexMap<String, Position>, index: usize| {
        coordinates.get(stations[index].as_str()).copied().unwrap_or_default()
    };

    // Before the first known station
    let first_known = known[0];
    if first_known > 0 {
        let anchor = position_at(coordinates, first_known);
        let (dx, dy) = match known.get(1) {
            Some(&second) => {
                let next = position_at(coordinates, second);
                let span = (second - first_known) as f64;
                ((anchor.x - next.x) / span, (anchor.y - next.y) / span)
            }
            None => EXTRAPOLATE_START_STEP,
        };

        for i in (0..first_known).rev() {
            let steps = (first_known - i) as f64;
            coordinates
                .entry(stations[i].clone())
                .or_insert(Position::new(anchor.x + dx * steps, anchor.y + dy * steps));
        }
        known.insert(0, 0);
    }

    // After the last known station
    let last_known = known[known.len() - 1];
    if last_known < last {
        let anchor = position_at(coordinates, last_known);
        let (dx, dy) = match known.len().checked_sub(2).map(|i| known[i]) {
            Some(previous) => {
                let prev = position_at(coordinates, previous);
                let span = (last_known - previous) as f64;
                ((anchor.x - prev.x) / span, (anchor.y - prev.y) / span)
            }
            None => EXTRAPOLATE_END_STEP,
        };

        for i in (last_known + 1)..=last {
            let steps = (i - last_known) as f64;
            coordinates
                .entry(stations[i].clone())
                .or_insert(Position::new(anchor.x + dx * steps, anchor.y + dy * steps));
        }
        known.push(last);
    }

    // Between consecutive known stations
    for pair in known.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let start = position_at(coordinates, from);
        let end = position_at(coordinates, to);
        let steps = (to - from) as f64;

        for j in 1..(to - from) {
            let ratio = j as f64 / steps;
            coordinates.entry(stations[from + j].clone()).or_insert(Position::new(
                start.x + (end.x - start.x) * ratio,
                start.y + (end.y - start.y) * ratio,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_line(id: &str, stations: &[&str]) -> RawLine {
        RawLine {
            id: id.into(),
            name: format!("Line {id}"),
            color: "#123456".into(),
            stations: stations.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn key(id: &str, x: f64, y: f64) -> KeyCoordinate {
        KeyCoordinate { id: id.into(), x, y }
    }

    fn position_of(data: &NetworkData, id: &str) -> Position {
        data.stations
            .iter()
            .find(|station| station.id == id)
            .map(|station| station.position)
            .expect("station should exist")
    }

    #[test]
    fn test_interpolates_between_known_points() {
        let raw = RawNetwork {
            lines: vec![raw_line("1", &["A", "B", "C", "D", "E"])],
            key_coordinates: vec![key("A", 0.0, 0.0), key("E", 100.0, 200.0)],
        };
        let data = generate_network(&raw);
        assert_eq!(position_of(&data, "B"), Position::new(25.0, 50.0));
        assert_eq!(position_of(&data, "C"), Position::new(50.0, 100.0));
        assert_eq!(position_of(&data, "D"), Position::new(75.0, 150.0));
    }

    #[test]
    fn test_extrapolates_with_known_spacing() {
        let raw = RawNetwork {
            lines: vec![raw_line("1", &["A", "B", "C", "D", "E"])],
            key_coordinates: vec![key("B", 100.0, 100.0), key("D", 140.0, 80.0)],
        };
        let data = generate_network(&raw);
        // Spacing is (20, -10) per station
        assert_eq!(position_of(&data, "A"), Position::new(80.0, 110.0));
        assert_eq!(position_of(&data, "C"), Position::new(120.0, 90.0));
        assert_eq!(position_of(&data, "E"), Position::new(160.0, 70.0));
    }

    #[test]
    fn test_extrapolates_single_known_point_with_fixed_step() {
        let raw = RawNetwork {
            lines: vec![raw_line("1", &["A", "B", "C"])],
            key_coordinates: vec![key("B", 100.0, 100.0)],
        };
        let data = generate_network(&raw);
        assert_eq!(position_of(&data, "A"), Position::new(120.0, 120.0));
        // The extrapolated head now sets the spacing for the tail
        assert_eq!(position_of(&data, "C"), Position::new(80.0, 80.0));
    }

    #[test]
    fn test_line_without_key_points_starts_at_fallback() {
        let raw = RawNetwork {
            lines: vec![raw_line("1", &["A", "B"])],
            key_coordinates: Vec::new(),
        };
        let data = generate_network(&raw);
        assert_eq!(position_of(&data, "A"), FALLBACK_POSITION);
        assert_eq!(position_of(&data, "B"), Position::new(520.0, 480.0));
    }

    #[test]
    fn test_shared_station_becomes_transfer() {
        let raw = RawNetwork {
            lines: vec![raw_line("1", &["A", "B", "C"]), raw_line("2", &["D", "B", "E"])],
            key_coordinates: vec![key("A", 0.0, 0.0), key("C", 100.0, 0.0)],
        };
        let data = generate_network(&raw);

        let ids: Vec<&str> = data.stations.iter().map(|station| station.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);

        let b = data.stations.iter().find(|station| station.id == "B").expect("B");
        assert!(b.is_transfer);
        assert_eq!(b.lines, vec!["1".to_string(), "2".to_string()]);
        // Line 2 reuses B's coordinate from line 1
        assert_eq!(position_of(&data, "B"), Position::new(50.0, 0.0));
        assert_eq!(position_of(&data, "D"), Position::new(70.0, 20.0));
        assert_eq!(position_of(&data, "E"), Position::new(30.0, -20.0));

        assert_eq!(data.connections.len(), 4);
        assert_eq!(data.lines.len(), 2);
    }

    #[test]
    fn test_connection_distance_is_deterministic_and_bounded() {
        let first = connection_distance("Alpha", "Bravo");
        assert_eq!(first, connection_distance("Alpha", "Bravo"));
        assert!((MIN_DISTANCE_KM..=MAX_DISTANCE_KM).contains(&first));
        assert!((first * 10.0 - (first * 10.0).round()).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_random_sequence() {
        let mut rng = SeededRandom::new(1.0);
        let expected = (1.0f64.sin() * 10_000.0).fract();
        assert!((rng.next_f64() - expected).abs() < 1e-9);
        let value = rng.range(2.0, 3.0);
        assert!((2.0..3.0).contains(&value));
    }

    #[test]
    fn test_distance_seed_counts_utf16_units() {
        assert_eq!(distance_seed("A", "B"), 2.0 + 65.0 + 66.0);
        assert_eq!(distance_seed("南京站", "新街口"), 6.0 + f64::from(0x5357_u32) + f64::from(0x65B0_u32));
    }
}
