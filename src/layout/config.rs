// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::graph::{EdgeKind, Position};

/// Force simulation tuning parameters.
///
/// Defaults follow the d3-force conventions: alpha cools
/// multiplicatively each tick and the simulation converges once it
/// drops below `alpha_min`.
#[derive(Clone, Debug)]
pub struct SimConfig {
    // Cooling schedule
    /// Starting temperature when a run begins.
    pub alpha: f64,
    /// Temperature below which the simulation counts as converged.
    pub alpha_min: f64,
    /// Multiplicative cooling applied each tick: `alpha *= 1 - alpha_decay`.
    pub alpha_decay: f64,
    /// Velocity damping factor applied during integration.
    pub velocity_decay: f64,

    // Spring attraction along edges
    /// Rest length for ordinary property edges.
    pub link_distance: f64,
    /// Shorter rest length for subclass/equivalence edges, pulling
    /// hierarchies into tighter clusters.
    pub hierarchy_distance: f64,
    /// Scale factor on the spring force.
    pub link_strength: f64,

    // Charge repulsion between all node pairs
    /// Per-node charge; negative values repel.
    pub charge_strength: f64,

    // Centering pull
    /// Strength of the linear pull toward `center`.
    pub center_strength: f64,
    /// Point every node is pulled toward.
    pub center: Position,

    /// Barnes-Hut opening angle for approximate repulsion; `None`
    /// keeps the exact pairwise pass.
    pub barnes_hut: Option<f64>,
}

impl SimConfig {
    /// Spring rest length for an edge of the given kind.
    pub fn rest_length(&self, kind: EdgeKind) -> f64 {
        if kind.is_hierarchical() {
            self.hierarchy_distance
        } else {
            self.link_distance
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            alpha_min: 0.005,
            alpha_decay: 0.0228,
            velocity_decay: 0.6,
            link_distance: 30.0,
            hierarchy_distance: 15.0,
            link_strength: 1.0,
            charge_strength: -30.0,
            center_strength: 0.1,
            center: Position::new(0.0, 0.0),
            barnes_hut: None,
        }
    }
}
