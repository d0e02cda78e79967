mod connection;
mod diagram;
mod line;
mod network_graph;
mod station;

pub use connection::{Connection, Neighbor};
pub use diagram::{Diagram, DiagramLink, DiagramNode};
pub use line::Line;
pub use network_graph::{Connections, Lines, NetworkData, NetworkGraph, Stations};
pub use station::{Position, Station};
