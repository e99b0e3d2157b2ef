// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use serde::Serialize;

use crate::graph::{EdgeKind, Graph, NodeKind};

/// Aggregate counts and degree measures for a [`Graph`].
///
/// Recomputed from the current graph on every call; nothing is cached, so
/// two computations without an intervening mutation are identical.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub class_count: usize,
    pub datatype_count: usize,
    pub literal_count: usize,
    pub edge_count: usize,
    pub object_property_count: usize,
    pub datatype_property_count: usize,
    pub subclass_count: usize,
    pub equivalent_count: usize,
    pub disjoint_count: usize,
    pub max_degree: usize,
    /// Mean incident edge endpoints per node; self-loops count twice.
    pub avg_degree: f64,
    /// Edges over the `n * (n - 1)` possible ordered pairs; 0 for graphs
    /// with fewer than two nodes.
    pub density: f64,
}

impl GraphStatistics {
    pub fn compute(graph: &Graph) -> GraphStatistics {
        let mut stats = GraphStatistics {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            ..GraphStatistics::default()
        };

        for node in graph.nodes() {
            match node.kind {
                NodeKind::Class => stats.class_count += 1,
                NodeKind::Datatype => stats.datatype_count += 1,
                NodeKind::Literal => stats.literal_count += 1,
            }
        }

        for edge in graph.edges() {
            match edge.kind {
                EdgeKind::ObjectProperty => stats.object_property_count += 1,
                EdgeKind::DatatypeProperty => stats.datatype_property_count += 1,
                EdgeKind::SubclassOf => stats.subclass_count += 1,
                EdgeKind::EquivalentClass => stats.equivalent_count += 1,
                EdgeKind::DisjointWith => stats.disjoint_count += 1,
            }
        }

        stats.max_degree = graph.max_degree();
        if stats.node_count > 0 {
            let total: usize = graph.nodes().map(|node| graph.degree(&node.id)).sum();
            stats.avg_degree = total as f64 / stats.node_count as f64;
        }
        if stats.node_count > 1 {
            let possible = (stats.node_count * (stats.node_count - 1)) as f64;
            stats.density = stats.edge_count as f64 / possible;
        }

        stats
    }
}
