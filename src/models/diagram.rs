use serde::{Deserialize, Serialize};

/// A station as seen by the schematic layout and the renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub is_transfer: bool,
    /// Color of the station's primary line
    pub line_color: String,
    /// Index of the station along its primary line, used to stagger labels;
    /// `None` when the station is not listed in that line's sequence
    pub station_index: Option<usize>,
}

/// One drawn link between two stations; parallel lines on the same pair collapse into one
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLink {
    pub source: String,
    pub target: String,
    pub color: String,
    pub distance_km: f64,
}

/// Node/link structure derived from a `NetworkGraph`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    pub links: Vec<DiagramLink>,
}

impl Diagram {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
