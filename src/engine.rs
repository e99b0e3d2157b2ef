// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Host-facing facade over the pipeline: parse, build, simulate, and
//! snapshot. The host owns rendering and interaction; the engine owns
//! the graph and the simulation lifecycle and expects to be confined to
//! a single thread.

use log::info;
use serde::{Deserialize, Serialize};

use crate::builder::{self, BuildReport};
use crate::common::Result;
use crate::graph::{EdgeKind, Graph, NodeKind, Position};
use crate::layout::{Phase, SimConfig, Simulation};
use crate::parser::{self, ParserConfig};
use crate::sim_err;
use crate::stats::GraphStatistics;

/// Seed for initial node placement when the host does not supply one.
const DEFAULT_SEED: u64 = 0;

/// Serializable snapshot of the current graph for the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub edges: Vec<EdgeData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub id: String,
    pub label: String,
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
}

impl GraphData {
    fn from_graph(graph: &Graph) -> GraphData {
        let nodes = graph
            .nodes()
            .map(|node| NodeData {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: node.kind,
                x: node.position.x,
                y: node.position.y,
            })
            .collect();
        let edges = graph
            .edges()
            .map(|edge| EdgeData {
                id: edge.id.clone(),
                label: edge.label.clone(),
                kind: edge.kind,
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect();
        GraphData { nodes, edges }
    }
}

fn no_graph<T>() -> Result<T> {
    sim_err!(NoGraph, "no ontology loaded".to_string())
}

/// The engine value a host owns. Holds at most one graph at a time;
/// loading a new ontology atomically replaces the previous one.
pub struct Engine {
    graph: Option<Graph>,
    simulation: Simulation,
    build_report: BuildReport,
    parser_config: ParserConfig,
    seed: u64,
}

impl Engine {
    pub fn new() -> Engine {
        Engine::with_config(ParserConfig::default(), SimConfig::default(), DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Engine {
        Engine::with_config(ParserConfig::default(), SimConfig::default(), seed)
    }

    pub fn with_config(parser_config: ParserConfig, sim_config: SimConfig, seed: u64) -> Engine {
        Engine {
            graph: None,
            simulation: Simulation::new(sim_config, seed),
            build_report: BuildReport::default(),
            parser_config,
            seed,
        }
    }

    /// Parse `raw` and replace the current graph with the result. The
    /// simulation returns to idle. On a parse error nothing changes: the
    /// previous graph, report, and simulation state all stay in place.
    pub fn load_ontology(&mut self, raw: &str) -> Result<()> {
        let doc = parser::parse(raw, &self.parser_config)?;
        let (graph, report) = builder::build(&doc, self.seed);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped = report.dropped_count();
            "loaded ontology"
        );

        self.graph = Some(graph);
        self.build_report = report;
        self.simulation.stop();
        Ok(())
    }

    pub fn init_simulation(&mut self) -> Result<()> {
        if self.graph.is_none() {
            return no_graph();
        }
        self.simulation.init();
        Ok(())
    }

    pub fn tick(&mut self) -> Result<()> {
        match &mut self.graph {
            Some(graph) => {
                self.simulation.tick(graph);
                Ok(())
            }
            None => no_graph(),
        }
    }

    /// Tick up to `iterations` times, stopping early on convergence.
    pub fn run_simulation(&mut self, iterations: usize) -> Result<()> {
        match &mut self.graph {
            Some(graph) => {
                self.simulation.run(graph, iterations);
                Ok(())
            }
            None => no_graph(),
        }
    }

    pub fn stop(&mut self) {
        self.simulation.stop();
    }

    /// Re-randomize node positions and restart annealing from alpha 1.
    pub fn reset(&mut self) -> Result<()> {
        match &mut self.graph {
            Some(graph) => {
                self.simulation.reset(graph);
                Ok(())
            }
            None => no_graph(),
        }
    }

    /// True when the layout has converged, or when there is nothing to
    /// lay out.
    pub fn is_finished(&self) -> bool {
        self.graph.is_none() || self.simulation.phase() == Phase::Converged
    }

    pub fn alpha(&self) -> f64 {
        self.simulation.alpha()
    }

    // setters take effect on the next tick

    pub fn set_center(&mut self, x: f64, y: f64) {
        self.simulation.config_mut().center = Position::new(x, y);
    }

    pub fn set_link_distance(&mut self, distance: f64) {
        self.simulation.config_mut().link_distance = distance;
    }

    pub fn set_charge_strength(&mut self, strength: f64) {
        self.simulation.config_mut().charge_strength = strength;
    }

    pub fn set_center_strength(&mut self, strength: f64) {
        self.simulation.config_mut().center_strength = strength;
    }

    pub fn set_velocity_decay(&mut self, decay: f64) {
        self.simulation.config_mut().velocity_decay = decay;
    }

    pub fn sim_config(&self) -> &SimConfig {
        self.simulation.config()
    }

    pub fn graph_data(&self) -> Result<GraphData> {
        match &self.graph {
            Some(graph) => Ok(GraphData::from_graph(graph)),
            None => no_graph(),
        }
    }

    pub fn statistics(&self) -> Result<GraphStatistics> {
        match &self.graph {
            Some(graph) => Ok(GraphStatistics::compute(graph)),
            None => no_graph(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.as_ref().map(Graph::node_count).unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.as_ref().map(Graph::edge_count).unwrap_or(0)
    }

    /// Diagnostics from the most recent build: dropped edges and
    /// synthesized literal counts.
    pub fn build_report(&self) -> &BuildReport {
        &self.build_report
    }

    /// The loaded graph, if any. Degree and neighbor queries go through
    /// this; positions move only through the simulation calls.
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::common::ErrorCode;

    const TWO_CLASSES: &str = r#"{
        "class": [{"id": "person"}, {"id": "dog"}],
        "property": [{"id": "owns", "domain": "person", "range": "dog"}]
    }"#;

    #[test]
    fn everything_is_empty_before_a_load() {
        let engine = Engine::new();
        assert_eq!(0, engine.node_count());
        assert_eq!(0, engine.edge_count());
        assert!(engine.is_finished());
        assert!(approx_eq!(f64, engine.alpha(), 0.0));
        assert_eq!(0, engine.build_report().dropped_count());
    }

    #[test]
    fn simulation_calls_require_a_graph() {
        let mut engine = Engine::new();

        assert_eq!(
            ErrorCode::NoGraph,
            engine.init_simulation().unwrap_err().code
        );
        assert_eq!(ErrorCode::NoGraph, engine.tick().unwrap_err().code);
        assert_eq!(
            ErrorCode::NoGraph,
            engine.run_simulation(10).unwrap_err().code
        );
        assert_eq!(ErrorCode::NoGraph, engine.reset().unwrap_err().code);
        assert_eq!(ErrorCode::NoGraph, engine.graph_data().unwrap_err().code);
        assert_eq!(ErrorCode::NoGraph, engine.statistics().unwrap_err().code);
    }

    #[test]
    fn load_replaces_the_graph_and_idles_the_simulation() {
        let mut engine = Engine::new();
        engine.load_ontology(TWO_CLASSES).unwrap();
        assert_eq!(2, engine.node_count());
        assert_eq!(1, engine.edge_count());

        engine.init_simulation().unwrap();
        engine.tick().unwrap();
        assert!(engine.alpha() > 0.0);

        engine.load_ontology(r#"{"class": [{"id": "cat"}]}"#).unwrap();
        assert_eq!(1, engine.node_count());
        assert_eq!(0, engine.edge_count());
        assert!(approx_eq!(f64, engine.alpha(), 0.0));
        assert!(!engine.is_finished());
    }

    #[test]
    fn failed_load_preserves_the_previous_graph() {
        let mut engine = Engine::new();
        engine.load_ontology(TWO_CLASSES).unwrap();
        engine.init_simulation().unwrap();
        engine.tick().unwrap();
        let alpha = engine.alpha();

        let err = engine.load_ontology("{not json").unwrap_err();
        assert_eq!(ErrorCode::JsonDeserialization, err.code);
        assert_eq!(2, engine.node_count());
        assert!(approx_eq!(f64, engine.alpha(), alpha));

        let err = engine
            .load_ontology(r#"{"class": [{"id": "a"}, {"id": "a"}]}"#)
            .unwrap_err();
        assert_eq!(ErrorCode::DuplicateId, err.code);
        assert_eq!(2, engine.node_count());
    }

    #[test]
    fn graph_data_populates_edge_endpoints() {
        let mut engine = Engine::new();
        engine.load_ontology(TWO_CLASSES).unwrap();

        let data = engine.graph_data().unwrap();
        assert_eq!(2, data.nodes.len());
        assert_eq!(1, data.edges.len());

        let edge = &data.edges[0];
        assert_eq!("owns", edge.id);
        assert_eq!("person", edge.source);
        assert_eq!("dog", edge.target);
        assert_eq!(EdgeKind::ObjectProperty, edge.kind);
    }

    #[test]
    fn graph_data_serializes_with_snake_case_kinds() {
        let mut engine = Engine::new();
        engine.load_ontology(TWO_CLASSES).unwrap();

        let value = serde_json::to_value(engine.graph_data().unwrap()).unwrap();
        assert_eq!("class", value["nodes"][0]["kind"]);
        assert_eq!("object_property", value["edges"][0]["kind"]);
        assert!(value["nodes"][0]["x"].is_number());
    }

    #[test]
    fn setters_retune_the_simulation() {
        let mut engine = Engine::new();
        engine.set_center(10.0, -4.0);
        engine.set_link_distance(75.0);
        engine.set_charge_strength(-500.0);
        engine.set_center_strength(0.3);
        engine.set_velocity_decay(0.4);

        let config = engine.sim_config();
        assert!(approx_eq!(f64, config.center.x, 10.0));
        assert!(approx_eq!(f64, config.center.y, -4.0));
        assert!(approx_eq!(f64, config.link_distance, 75.0));
        assert!(approx_eq!(f64, config.charge_strength, -500.0));
        assert!(approx_eq!(f64, config.center_strength, 0.3));
        assert!(approx_eq!(f64, config.velocity_decay, 0.4));
    }

    #[test]
    fn seeded_engines_agree() {
        let mut first = Engine::with_seed(17);
        let mut second = Engine::with_seed(17);
        first.load_ontology(TWO_CLASSES).unwrap();
        second.load_ontology(TWO_CLASSES).unwrap();

        first.init_simulation().unwrap();
        second.init_simulation().unwrap();
        first.run_simulation(40).unwrap();
        second.run_simulation(40).unwrap();

        assert_eq!(first.graph_data().unwrap(), second.graph_data().unwrap());
    }

    #[test]
    fn empty_ontology_is_loadable() {
        let mut engine = Engine::new();
        engine.load_ontology("{}").unwrap();
        assert_eq!(0, engine.node_count());
        assert_eq!(0, engine.edge_count());

        let stats = engine.statistics().unwrap();
        assert_eq!(0, stats.node_count);
        assert_eq!(0, stats.max_degree);

        // an empty graph still converges on schedule
        engine.init_simulation().unwrap();
        engine.run_simulation(1000).unwrap();
        assert!(engine.is_finished());
    }
}
