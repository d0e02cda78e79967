use serde::{Deserialize, Serialize};

/// Planar position of a station, in whatever coordinate space the input data uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (f64, f64) {
    fn from(position: Position) -> Self {
        (position.x, position.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    /// Ids of every line serving this station; the first one is its primary line
    pub lines: Vec<String>,
    #[serde(default)]
    pub position: Position,
    /// True iff the station is served by more than one line
    #[serde(default)]
    pub is_transfer: bool,
}

impl Station {
    /// Create a station, deriving the transfer flag from its line membership
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, lines: Vec<String>, position: Position) -> Self {
        let is_transfer = lines.len() > 1;
        Self {
            id: id.into(),
            name: name.into(),
            lines,
            position,
            is_transfer,
        }
    }

    /// Primary line, used for coloring and label placement
    #[must_use]
    pub fn primary_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    #[must_use]
    pub fn serves_line(&self, line_id: &str) -> bool {
        self.lines.iter().any(|line| line == line_id)
    }

    /// Add a line to this station's membership, updating the transfer flag
    pub fn add_line(&mut self, line_id: &str) {
        if !self.serves_line(line_id) {
            self.lines.push(line_id.to_string());
        }
        self.is_transfer = self.lines.len() > 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_flag_derived_from_lines() {
        let single = Station::new("A", "Alpha", vec!["1".to_string()], Position::default());
        assert!(!single.is_transfer);

        let shared = Station::new("B", "Beta", vec!["1".to_string(), "2".to_string()], Position::default());
        assert!(shared.is_transfer);
    }

    #[test]
    fn test_add_line_promotes_to_transfer() {
        let mut station = Station::new("A", "Alpha", vec!["1".to_string()], Position::new(1.0, 2.0));
        station.add_line("1");
        assert!(!station.is_transfer);
        assert_eq!(station.lines.len(), 1);

        station.add_line("2");
        assert!(station.is_transfer);
        assert_eq!(station.primary_line(), Some("1"));
        assert!(station.serves_line("2"));
    }

    #[test]
    fn test_station_deserializes_camel_case() {
        let json = r#"{"id":"S1","name":"Central","lines":["1","2"],"position":{"x":3.0,"y":4.0},"isTransfer":true}"#;
        let station: Station = serde_json::from_str(json).expect("station should parse");
        assert_eq!(station.id, "S1");
        assert!(station.is_transfer);
        assert_eq!(station.position, Position::new(3.0, 4.0));
    }
}
