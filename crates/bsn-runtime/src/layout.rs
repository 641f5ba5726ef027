//! Deterministic circular layout.
//!
//! The center sits in the middle of the canvas; every other node is spaced
//! evenly on one circle in discovery order. The pass also tallies each
//! node's connection count and the tag types seen on its edges.

use crate::relationship::RelationshipGraph;
use bsn_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 800.0;
pub const DEFAULT_RADIUS_RATIO: f64 = 0.35;

/// Canvas geometry for [`CircularLayout::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularLayout {
    pub width: f64,
    pub height: f64,
    /// Circle radius as a fraction of the shorter canvas side.
    pub radius_ratio: f64,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            radius_ratio: DEFAULT_RADIUS_RATIO,
        }
    }
}

impl CircularLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn center_point(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn radius(&self) -> f64 {
        self.width.min(self.height) * self.radius_ratio
    }

    /// Position every node and recount connections.
    ///
    /// Running it twice gives the same result as running it once.
    pub fn apply(&self, graph: &mut RelationshipGraph, center: &str) {
        let origin = self.center_point();
        let radius = self.radius();
        let inner = graph.inner_mut();

        let others = inner
            .node_weights()
            .filter(|node| node.address != center)
            .count();
        let step = 2.0 * PI / others.max(1) as f64;

        let mut slot = 0usize;
        for node in inner.node_weights_mut() {
            if node.address == center {
                node.position = origin;
            } else {
                let angle = slot as f64 * step;
                node.position = Position::new(
                    origin.x + radius * angle.cos(),
                    origin.y + radius * angle.sin(),
                );
                slot += 1;
            }
            node.connections = 0;
            node.tag_types.clear();
        }

        let incidences: Vec<_> = inner
            .raw_edges()
            .iter()
            .map(|edge| (edge.source(), edge.target(), edge.weight.types.clone()))
            .collect();
        for (source, target, types) in incidences {
            for idx in [source, target] {
                let node = &mut inner[idx];
                node.connections += 1;
                node.tag_types.extend(types.iter().cloned());
            }
        }
    }
}

/// Lay out `graph` around `center` on a `width` x `height` canvas.
pub fn layout(graph: &mut RelationshipGraph, center: &str, width: f64, height: f64) {
    CircularLayout::new(width, height).apply(graph, center);
}
