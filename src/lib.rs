#![allow(clippy::implicit_hasher)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod geometry;
pub mod import;
pub mod layout;
pub mod logging;
pub mod models;
pub mod routing;

pub use layout::{LayoutConfig, LayoutResult, LayoutWorker, SchematicLayoutEngine, Viewport};
pub use models::{Connection, Line, NetworkData, NetworkGraph, Position, Station};
pub use routing::{RouteConfig, RouteResult, RouteSearchEngine, RouteStep, Strategy};
