// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Normalized ontology document model.
//!
//! This is the parser's output: records with mandatory fields filled
//! in, labels already selected for display, and domain/range
//! references resolved against the declared identifiers. Unresolvable
//! references are kept and marked so the builder can decide what to do
//! with them.

/// Document-level metadata, defaulted from the `header` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OntologyMetadata {
    pub iri: String,
    pub version: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub iri: String,
}

/// A reference to another record by identifier. `Unresolved` means no
/// class or datatype with that id was declared in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    Resolved(String),
    Unresolved(String),
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Reference::Resolved(id) | Reference::Unresolved(id) => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cardinality {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub exact: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyCharacteristics {
    pub functional: bool,
    pub inverse_functional: bool,
    pub transitive: bool,
    pub symmetric: bool,
    pub cardinality: Option<Cardinality>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Object,
    Datatype,
    SubclassOf,
    EquivalentClass,
    DisjointWith,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRecord {
    pub id: String,
    pub iri: String,
    pub label: String,
    pub external: bool,
    pub deprecated: bool,
    pub individuals: Option<usize>,
    pub subclass_of: Vec<Reference>,
    pub equivalent: Vec<Reference>,
    pub disjoint_with: Vec<Reference>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatatypeRecord {
    pub id: String,
    pub iri: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRecord {
    pub id: String,
    pub iri: String,
    pub label: String,
    pub kind: PropertyKind,
    pub domain: Reference,
    pub range: Reference,
    pub characteristics: PropertyCharacteristics,
}

/// A fully parsed and normalized ontology. Immutable once built; the
/// graph builder reads it without mutating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OntologyDocument {
    pub metadata: OntologyMetadata,
    pub namespaces: Vec<Namespace>,
    pub classes: Vec<ClassRecord>,
    pub datatypes: Vec<DatatypeRecord>,
    pub properties: Vec<PropertyRecord>,
}

impl OntologyDocument {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.datatypes.is_empty() && self.properties.is_empty()
    }
}
