pub mod generator;
pub mod json;

// Re-export commonly used items
pub use generator::{connection_distance, generate_connections, generate_network, KeyCoordinate, RawLine, RawNetwork, SeededRandom};
pub use json::{load_network, load_raw_network};
