// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

#![forbid(unsafe_code)]

pub mod builder;
pub mod common;
pub mod engine;
pub mod graph;
pub mod json;
pub mod layout;
pub mod ontology;
pub mod parser;
pub mod stats;

pub use self::builder::{BuildReport, DroppedEdge, ReferenceEnd, build};
pub use self::common::{Error, ErrorCode, ErrorKind, Result};
pub use self::engine::{EdgeData, Engine, GraphData, NodeData};
pub use self::graph::{
    EdgeKind, Graph, GraphEdge, GraphNode, NodeAttributes, NodeKind, Position,
};
pub use self::layout::{Phase, SimConfig, Simulation};
pub use self::ontology::OntologyDocument;
pub use self::parser::{ParserConfig, parse};
pub use self::stats::GraphStatistics;

/// The crate version baked in at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
