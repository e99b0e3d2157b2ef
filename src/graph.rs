// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Typed graph model shared by the builder, the layout simulation,
//! and the statistics pass.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::build_err;
use crate::common::Result;
use crate::ontology::Cardinality;

/// 2D position/vector used throughout the layout pipeline.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Position {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Class,
    Datatype,
    Literal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    ObjectProperty,
    DatatypeProperty,
    SubclassOf,
    EquivalentClass,
    DisjointWith,
}

impl EdgeKind {
    /// Hierarchy-shaping edges use the shorter rest length in the
    /// spring force.
    pub fn is_hierarchical(self) -> bool {
        matches!(self, EdgeKind::SubclassOf | EdgeKind::EquivalentClass)
    }
}

/// Presentation metadata carried on a node. Feeds statistics and host
/// rendering, never the physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeAttributes {
    pub external: bool,
    pub deprecated: bool,
    pub individuals: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub position: Position,
    pub velocity: Position,
    pub attributes: NodeAttributes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub id: String,
    pub label: String,
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
    pub functional: bool,
    pub cardinality: Option<Cardinality>,
}

#[derive(Clone, Debug, Default)]
struct AdjacencyView {
    /// Sorted, distinct neighbor ids per node.
    neighbors: BTreeMap<String, SmallVec<[String; 4]>>,
    /// Incident edge endpoint counts per node; self-loops count twice.
    degrees: BTreeMap<String, usize>,
}

/// An ontology graph: nodes and edges keyed by id, plus a lazily
/// computed adjacency view.
///
/// Invariants: node ids are unique, edge ids are unique, and both
/// endpoints of every edge are present. The adjacency view is rebuilt
/// on first read after any node/edge mutation.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: BTreeMap<String, GraphNode>,
    edges: BTreeMap<String, GraphEdge>,
    adjacency: OnceCell<AdjacencyView>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: GraphNode) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return build_err!(DuplicateId, node.id);
        }
        self.adjacency.take();
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<()> {
        if self.edges.contains_key(&edge.id) {
            return build_err!(DuplicateId, edge.id);
        }
        if !self.nodes.contains_key(&edge.source) {
            return build_err!(DoesNotExist, edge.source);
        }
        if !self.nodes.contains_key(&edge.target) {
            return build_err!(DoesNotExist, edge.target);
        }
        self.adjacency.take();
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Mutable access for the simulation; only positions and
    /// velocities should change through this.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut GraphNode> {
        self.nodes.values_mut()
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sorted distinct neighbor ids; empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.adjacency()
            .neighbors
            .get(id)
            .into_iter()
            .flat_map(|ids| ids.iter().map(|id| id.as_str()))
    }

    /// Number of incident edge endpoints; 0 for unknown ids.
    pub fn degree(&self, id: &str) -> usize {
        self.adjacency().degrees.get(id).copied().unwrap_or(0)
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency().degrees.values().copied().max().unwrap_or(0)
    }

    fn adjacency(&self) -> &AdjacencyView {
        self.adjacency.get_or_init(|| {
            let mut view = AdjacencyView::default();
            for id in self.nodes.keys() {
                view.neighbors.insert(id.clone(), SmallVec::new());
                view.degrees.insert(id.clone(), 0);
            }
            for edge in self.edges.values() {
                if let Some(ids) = view.neighbors.get_mut(&edge.source) {
                    ids.push(edge.target.clone());
                }
                if let Some(ids) = view.neighbors.get_mut(&edge.target) {
                    ids.push(edge.source.clone());
                }
                if let Some(count) = view.degrees.get_mut(&edge.source) {
                    *count += 1;
                }
                if let Some(count) = view.degrees.get_mut(&edge.target) {
                    *count += 1;
                }
            }
            for ids in view.neighbors.values_mut() {
                ids.sort_unstable();
                ids.dedup();
            }
            view
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorCode;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Class,
            position: Position::default(),
            velocity: Position::default(),
            attributes: NodeAttributes::default(),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: id.to_string(),
            label: id.to_string(),
            kind: EdgeKind::ObjectProperty,
            source: source.to_string(),
            target: target.to_string(),
            functional: false,
            cardinality: None,
        }
    }

    #[test]
    fn position_debug_format() {
        let pos = Position::new(1.5, -2.25);
        assert_eq!("(1.50, -2.25)", format!("{pos:?}"));
    }

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1.0, 2.0);
        let b = Position::new(3.0, -1.0);
        assert_eq!(Position::new(4.0, 1.0), a + b);
        assert_eq!(Position::new(-2.0, 3.0), a - b);
        assert_eq!(Position::new(2.0, 4.0), a * 2.0);
        assert_eq!(5.0, Position::new(3.0, 4.0).length());
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut graph = Graph::new();
        graph.add_node(node("a")).unwrap();
        let err = graph.add_node(node("a")).unwrap_err();
        assert_eq!(ErrorCode::DuplicateId, err.code);
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let mut graph = Graph::new();
        graph.add_node(node("a")).unwrap();
        let err = graph.add_edge(edge("e", "a", "missing")).unwrap_err();
        assert_eq!(ErrorCode::DoesNotExist, err.code);
        assert_eq!(Some("missing".to_string()), err.details);
        assert_eq!(0, graph.edge_count());
    }

    #[test]
    fn duplicate_edge_rejected() {
        let mut graph = Graph::new();
        graph.add_node(node("a")).unwrap();
        graph.add_node(node("b")).unwrap();
        graph.add_edge(edge("e", "a", "b")).unwrap();
        let err = graph.add_edge(edge("e", "b", "a")).unwrap_err();
        assert_eq!(ErrorCode::DuplicateId, err.code);
    }

    #[test]
    fn neighbors_sorted_and_distinct() {
        let mut graph = Graph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(node(id)).unwrap();
        }
        graph.add_edge(edge("e1", "a", "c")).unwrap();
        graph.add_edge(edge("e2", "a", "b")).unwrap();
        graph.add_edge(edge("e3", "b", "a")).unwrap();

        let neighbors: Vec<&str> = graph.neighbors("a").collect();
        assert_eq!(vec!["b", "c"], neighbors);
        assert_eq!(0, graph.neighbors("unknown").count());
    }

    #[test]
    fn degree_counts_endpoints() {
        let mut graph = Graph::new();
        graph.add_node(node("a")).unwrap();
        graph.add_node(node("b")).unwrap();
        graph.add_edge(edge("e1", "a", "b")).unwrap();
        graph.add_edge(edge("loop", "a", "a")).unwrap();

        // the self-loop contributes two endpoints
        assert_eq!(3, graph.degree("a"));
        assert_eq!(1, graph.degree("b"));
        assert_eq!(0, graph.degree("unknown"));
        assert_eq!(3, graph.max_degree());
    }

    #[test]
    fn adjacency_rebuilt_after_mutation() {
        let mut graph = Graph::new();
        graph.add_node(node("a")).unwrap();
        graph.add_node(node("b")).unwrap();
        assert_eq!(0, graph.neighbors("a").count());

        graph.add_edge(edge("e", "a", "b")).unwrap();
        assert_eq!(vec!["b"], graph.neighbors("a").collect::<Vec<_>>());

        graph.add_node(node("c")).unwrap();
        graph.add_edge(edge("e2", "c", "a")).unwrap();
        assert_eq!(
            vec!["b", "c"],
            graph.neighbors("a").collect::<Vec<_>>()
        );
    }
}
