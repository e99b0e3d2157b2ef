// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::builder;
use crate::graph::{Graph, Position};
use crate::layout::config::SimConfig;
use crate::layout::forces;
use crate::layout::quadtree::QuadTree;

/// Lifecycle of the annealing loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not started, or halted by the host.
    Idle,
    /// Actively ticking; alpha decays toward `alpha_min`.
    Running,
    /// Alpha dropped below `alpha_min`; positions are final until the next
    /// `init` or `reset`.
    Converged,
}

/// Force-directed simulation over a [`Graph`], following the d3-force
/// annealing model: per-tick forces are scaled by a temperature `alpha`
/// that decays multiplicatively until it falls below `alpha_min`.
///
/// The simulation owns its configuration and lifecycle but borrows the
/// graph per call; node positions and velocities are the only state it
/// mutates.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    alpha: f64,
    phase: Phase,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            alpha: 0.0,
            phase: Phase::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable access for mid-run retuning. Changes take effect on the
    /// next tick; alpha and phase are untouched.
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Converged
    }

    /// Start (or restart) annealing at full temperature. Positions are
    /// left wherever they are.
    pub fn init(&mut self) {
        self.alpha = self.config.alpha;
        self.phase = Phase::Running;
    }

    /// Halt the loop. Positions stay where the last tick left them.
    pub fn stop(&mut self) {
        self.alpha = 0.0;
        self.phase = Phase::Idle;
    }

    /// Scatter every node to a fresh random position, zero all
    /// velocities, and restart annealing. Valid from any phase.
    pub fn reset(&mut self, graph: &mut Graph) {
        for node in graph.nodes_mut() {
            node.position = builder::random_position(&mut self.rng);
            node.velocity = Position::default();
        }
        self.init();
    }

    /// Advance the simulation by one step. Returns false without touching
    /// the graph when the simulation is not running.
    pub fn tick(&mut self, graph: &mut Graph) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        let forces = self.accumulate_forces(graph);
        let alpha = self.alpha;
        let velocity_decay = self.config.velocity_decay;
        for node in graph.nodes_mut() {
            let force = forces::clamp_force(forces.get(&node.id).copied().unwrap_or_default());
            node.velocity = (node.velocity + force * alpha) * velocity_decay;
            node.position = node.position + node.velocity;
        }

        self.alpha *= 1.0 - self.config.alpha_decay;
        if self.alpha < self.config.alpha_min {
            self.phase = Phase::Converged;
            debug!(alpha = self.alpha; "layout converged");
        }
        true
    }

    /// Tick up to `iterations` times, stopping early on convergence.
    /// Returns the number of ticks actually performed.
    pub fn run(&mut self, graph: &mut Graph, iterations: usize) -> usize {
        let mut ticks = 0;
        for _ in 0..iterations {
            if !self.tick(graph) {
                break;
            }
            ticks += 1;
        }
        ticks
    }

    fn accumulate_forces(&self, graph: &Graph) -> BTreeMap<String, Position> {
        let mut forces: BTreeMap<String, Position> = graph
            .nodes()
            .map(|node| (node.id.clone(), Position::default()))
            .collect();

        let ids: Vec<&str> = graph.nodes().map(|node| node.id.as_str()).collect();
        let positions: Vec<Position> = graph.nodes().map(|node| node.position).collect();

        // Repulsion between all node pairs, approximated through the
        // quadtree when configured.
        let charge = self.config.charge_strength;
        match self.config.barnes_hut {
            Some(theta) => {
                if let Some(tree) = QuadTree::build(&positions) {
                    for (i, id) in ids.iter().enumerate() {
                        let f = tree.force_on(i, &positions, theta, charge);
                        if let Some(entry) = forces.get_mut(*id) {
                            *entry = *entry + f;
                        }
                    }
                }
            }
            None => {
                for i in 0..positions.len() {
                    for j in (i + 1)..positions.len() {
                        let f = forces::repulsion(positions[i], positions[j], charge);
                        if let Some(entry) = forces.get_mut(ids[i]) {
                            *entry = *entry + f;
                        }
                        if let Some(entry) = forces.get_mut(ids[j]) {
                            *entry = *entry - f;
                        }
                    }
                }
            }
        }

        // Spring attraction along edges toward the per-kind rest length,
        // applied to both endpoints.
        for edge in graph.edges() {
            let (Some(source), Some(target)) =
                (graph.node(&edge.source), graph.node(&edge.target))
            else {
                continue;
            };
            let f = forces::attraction(
                source.position,
                target.position,
                self.config.rest_length(edge.kind),
                self.config.link_strength,
            );
            if let Some(entry) = forces.get_mut(&edge.source) {
                *entry = *entry + f;
            }
            if let Some(entry) = forces.get_mut(&edge.target) {
                *entry = *entry - f;
            }
        }

        for node in graph.nodes() {
            let f = forces::centering(
                node.position,
                self.config.center,
                self.config.center_strength,
            );
            if let Some(entry) = forces.get_mut(&node.id) {
                *entry = *entry + f;
            }
        }

        forces
    }
}
