mod config;
mod simulation;
mod viewport;
mod worker;

pub use config::LayoutConfig;
pub use viewport::{ViewTransform, Viewport};
pub use worker::{LayoutResponse, LayoutWorker};

use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;

#[allow(unused_imports)]
use crate::logging::debug_log;
use crate::models::{Diagram, DiagramLink, DiagramNode, NetworkGraph, Position};
use simulation::Simulation;

/// Laid-out diagram ready to draw
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutResult {
    /// Diagram nodes with `x`/`y` replaced by their laid-out, view-fitted coordinates
    pub nodes: Vec<DiagramNode>,
    pub links: Vec<DiagramLink>,
    /// `false` when the simulation was cancelled and `nodes` carry their input positions
    pub complete: bool,
}

impl LayoutResult {
    #[must_use]
    pub fn position(&self, id: &str) -> Option<Position> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| Position::new(node.x, node.y))
    }
}

/// Schematic (octolinear) layout of a network diagram
///
/// The force simulation runs once per engine and its output is cached; later
/// calls to [`SchematicLayoutEngine::layout`] only refit the cached coordinates
/// to the new viewport.
#[derive(Debug, Clone)]
pub struct SchematicLayoutEngine {
    diagram: Diagram,
    config: LayoutConfig,
    relaxed: Option<Vec<(f64, f64)>>,
}

impl SchematicLayoutEngine {
    #[must_use]
    pub fn new(graph: &NetworkGraph) -> Self {
        Self::from_diagram(graph.diagram(), LayoutConfig::default())
    }

    #[must_use]
    pub fn with_config(graph: &NetworkGraph, config: LayoutConfig) -> Self {
        Self::from_diagram(graph.diagram(), config)
    }

    #[must_use]
    pub fn from_diagram(diagram: Diagram, config: LayoutConfig) -> Self {
        Self {
            diagram,
            config,
            relaxed: None,
        }
    }

    #[must_use]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    #[must_use]
    pub fn is_relaxed(&self) -> bool {
        self.relaxed.is_some()
    }

    /// Run the simulation if it has not run yet
    ///
    /// Returns `false` if `cancel` was raised before it finished; nothing is cached then.
    pub fn relax(&mut self, cancel: Option<&AtomicBool>) -> bool {
        if self.relaxed.is_some() {
            return true;
        }

        let mut simulation = Simulation::new(&self.diagram, &self.config);
        if !simulation.run(cancel) {
            return false;
        }

        self.relaxed = Some(simulation.bodies().iter().map(|body| (body.x, body.y)).collect());
        debug_log!("Relaxed layout of {} nodes", self.diagram.nodes.len());
        true
    }

    /// Lay out the diagram and fit it into `viewport`
    ///
    /// An empty diagram comes back unchanged. An empty viewport yields
    /// simulation-space coordinates.
    pub fn layout(&mut self, viewport: Viewport) -> LayoutResult {
        self.layout_with_cancel(viewport, None)
    }

    pub fn layout_with_cancel(&mut self, viewport: Viewport, cancel: Option<&AtomicBool>) -> LayoutResult {
        if self.diagram.is_empty() {
            return self.result_from(None, true);
        }

        if !self.relax(cancel) {
            return self.result_from(None, false);
        }

        let Some(relaxed) = self.relaxed.as_deref() else {
            return self.result_from(None, false);
        };
        let transform = ViewTransform::fit(relaxed.iter().copied(), viewport, self.config.padding);
        let positions: Vec<(f64, f64)> = match transform {
            Some(transform) => relaxed.iter().map(|&(x, y)| transform.apply(x, y)).collect(),
            None => relaxed.to_vec(),
        };
        self.result_from(Some(&positions), true)
    }

    fn result_from(&self, positions: Option<&[(f64, f64)]>, complete: bool) -> LayoutResult {
        let mut nodes = self.diagram.nodes.clone();
        if let Some(positions) = positions {
            for (node, &(x, y)) in nodes.iter_mut().zip(positions) {
                node.x = x;
                node.y = y;
            }
        }

        LayoutResult {
            nodes,
            links: self.diagram.links.clone(),
            complete,
        }
    }
}
