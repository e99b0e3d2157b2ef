// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Ontology-to-graph translation.
//!
//! Every class and datatype record becomes a node with a seeded random
//! initial position. Properties with both references resolved become
//! edges; datatype properties whose range names a well-known XSD type
//! get a synthesized literal node instead. Everything else is dropped
//! and recorded in the [`BuildReport`], never surfaced as an error.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{EdgeKind, Graph, GraphEdge, GraphNode, NodeAttributes, NodeKind, Position};
use crate::ontology::{ClassRecord, OntologyDocument, PropertyKind, PropertyRecord, Reference};

/// Half-width of the square region initial positions are drawn from.
pub(crate) const INITIAL_RADIUS: f64 = 100.0;

lazy_static! {
    static ref WELL_KNOWN_DATATYPES: BTreeSet<&'static str> = [
        "rdfs:Literal",
        "xsd:anyURI",
        "xsd:boolean",
        "xsd:byte",
        "xsd:date",
        "xsd:dateTime",
        "xsd:decimal",
        "xsd:double",
        "xsd:duration",
        "xsd:float",
        "xsd:gDay",
        "xsd:gMonth",
        "xsd:gYear",
        "xsd:int",
        "xsd:integer",
        "xsd:language",
        "xsd:long",
        "xsd:negativeInteger",
        "xsd:nonNegativeInteger",
        "xsd:nonPositiveInteger",
        "xsd:positiveInteger",
        "xsd:short",
        "xsd:string",
        "xsd:time",
        "xsd:unsignedByte",
        "xsd:unsignedInt",
        "xsd:unsignedLong",
        "xsd:unsignedShort",
    ]
    .into_iter()
    .collect();
}

/// Which end of a property an unresolved reference sat on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceEnd {
    Domain,
    Range,
}

impl std::fmt::Display for ReferenceEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceEnd::Domain => write!(f, "domain"),
            ReferenceEnd::Range => write!(f, "range"),
        }
    }
}

/// One edge the builder could not attach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedEdge {
    /// Id of the property (or class, for axiom lists) the edge came from.
    pub property_id: String,
    /// The identifier that did not resolve.
    pub reference: String,
    pub end: ReferenceEnd,
}

/// Diagnostics from a single build pass.
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    pub dropped: Vec<DroppedEdge>,
    pub synthesized_literals: usize,
}

impl BuildReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    fn record_drop(&mut self, property_id: &str, reference: &str, end: ReferenceEnd) {
        warn!(property = property_id, reference = reference; "dropping edge, unresolved {end}");
        self.dropped.push(DroppedEdge {
            property_id: property_id.to_string(),
            reference: reference.to_string(),
            end,
        });
    }
}

/// Builds a graph from a parsed document. Positions are drawn from
/// `StdRng` seeded with `seed`, so layouts are reproducible.
pub fn build(doc: &OntologyDocument, seed: u64) -> (Graph, BuildReport) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    let mut report = BuildReport::default();

    for class in &doc.classes {
        let node = GraphNode {
            id: class.id.clone(),
            label: class.label.clone(),
            kind: NodeKind::Class,
            position: random_position(&mut rng),
            velocity: Position::default(),
            attributes: NodeAttributes {
                external: class.external,
                deprecated: class.deprecated,
                individuals: class.individuals,
            },
        };
        if let Err(err) = graph.add_node(node) {
            warn!("skipping class {}: {err}", class.id);
        }
    }

    for datatype in &doc.datatypes {
        let node = GraphNode {
            id: datatype.id.clone(),
            label: datatype.label.clone(),
            kind: NodeKind::Datatype,
            position: random_position(&mut rng),
            velocity: Position::default(),
            attributes: NodeAttributes::default(),
        };
        if let Err(err) = graph.add_node(node) {
            warn!("skipping datatype {}: {err}", datatype.id);
        }
    }

    for property in &doc.properties {
        add_property_edge(&mut graph, &mut report, &mut rng, property);
    }

    for class in &doc.classes {
        add_axiom_edges(&mut graph, &mut report, class);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dropped = report.dropped.len();
        "built graph"
    );

    (graph, report)
}

pub(crate) fn random_position(rng: &mut StdRng) -> Position {
    Position::new(
        (rng.random::<f64>() * 2.0 - 1.0) * INITIAL_RADIUS,
        (rng.random::<f64>() * 2.0 - 1.0) * INITIAL_RADIUS,
    )
}

fn edge_kind_of(kind: PropertyKind) -> EdgeKind {
    match kind {
        PropertyKind::Object => EdgeKind::ObjectProperty,
        PropertyKind::Datatype => EdgeKind::DatatypeProperty,
        PropertyKind::SubclassOf => EdgeKind::SubclassOf,
        PropertyKind::EquivalentClass => EdgeKind::EquivalentClass,
        PropertyKind::DisjointWith => EdgeKind::DisjointWith,
    }
}

fn add_property_edge(
    graph: &mut Graph,
    report: &mut BuildReport,
    rng: &mut StdRng,
    property: &PropertyRecord,
) {
    if !property.domain.is_resolved() {
        report.record_drop(&property.id, property.domain.id(), ReferenceEnd::Domain);
        return;
    }

    let target = match &property.range {
        Reference::Resolved(id) => id.clone(),
        Reference::Unresolved(range_id) => {
            let known_datatype = property.kind == PropertyKind::Datatype
                && WELL_KNOWN_DATATYPES.contains(range_id.as_str());
            let synthesized = if known_datatype {
                synthesize_literal(graph, rng, &property.id, range_id)
            } else {
                None
            };
            match synthesized {
                Some(node_id) => {
                    report.synthesized_literals += 1;
                    node_id
                }
                None => {
                    report.record_drop(&property.id, range_id, ReferenceEnd::Range);
                    return;
                }
            }
        }
    };

    let edge = GraphEdge {
        id: property.id.clone(),
        label: property.label.clone(),
        kind: edge_kind_of(property.kind),
        source: property.domain.id().to_string(),
        target,
        functional: property.characteristics.functional,
        cardinality: property.characteristics.cardinality,
    };
    if let Err(err) = graph.add_edge(edge) {
        warn!("skipping property {}: {err}", property.id);
    }
}

/// Stands in a literal node for a well-known datatype range, labeled
/// with the local part of the datatype name.
fn synthesize_literal(
    graph: &mut Graph,
    rng: &mut StdRng,
    property_id: &str,
    range_id: &str,
) -> Option<String> {
    let node_id = format!("{property_id}:literal");
    if graph.contains_node(&node_id) {
        return None;
    }
    let label = range_id
        .split_once(':')
        .map(|(_, local)| local)
        .unwrap_or(range_id)
        .to_string();
    let node = GraphNode {
        id: node_id.clone(),
        label,
        kind: NodeKind::Literal,
        position: random_position(rng),
        velocity: Position::default(),
        attributes: NodeAttributes::default(),
    };
    match graph.add_node(node) {
        Ok(()) => Some(node_id),
        Err(err) => {
            warn!("skipping literal for {property_id}: {err}");
            None
        }
    }
}

fn add_axiom_edges(graph: &mut Graph, report: &mut BuildReport, class: &ClassRecord) {
    let groups = [
        (&class.subclass_of, EdgeKind::SubclassOf, "subclass_of"),
        (&class.equivalent, EdgeKind::EquivalentClass, "equivalent"),
        (&class.disjoint_with, EdgeKind::DisjointWith, "disjoint_with"),
    ];
    for (references, kind, tag) in groups {
        for reference in references {
            let Reference::Resolved(target) = reference else {
                report.record_drop(&class.id, reference.id(), ReferenceEnd::Range);
                continue;
            };
            // Symmetric axioms declared on both classes collapse to a
            // single edge via canonical endpoint order. Subclass edges
            // keep their child-to-parent direction.
            let (source, target) = if kind == EdgeKind::SubclassOf || class.id <= *target {
                (class.id.as_str(), target.as_str())
            } else {
                (target.as_str(), class.id.as_str())
            };
            let edge_id = format!("{source}:{tag}:{target}");
            if graph.edge(&edge_id).is_some() {
                continue;
            }
            let edge = GraphEdge {
                id: edge_id,
                label: axiom_label(kind).to_string(),
                kind,
                source: source.to_string(),
                target: target.to_string(),
                functional: false,
                cardinality: None,
            };
            if let Err(err) = graph.add_edge(edge) {
                warn!("skipping axiom edge for {}: {err}", class.id);
            }
        }
    }
}

fn axiom_label(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::SubclassOf => "subclass of",
        EdgeKind::EquivalentClass => "equivalent class",
        EdgeKind::DisjointWith => "disjoint with",
        EdgeKind::ObjectProperty | EdgeKind::DatatypeProperty => "",
    }
}
