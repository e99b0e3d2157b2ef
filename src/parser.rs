// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Validation and normalization of ontology JSON into an
//! [`OntologyDocument`].
//!
//! Parsing is pure: it either returns a complete document or an error
//! naming the offending record, never a partial result. Domain and
//! range references are resolved against the declared class and
//! datatype identifiers; references to undeclared ids are kept as
//! [`Reference::Unresolved`] for the builder to handle.

use std::collections::BTreeSet;
use std::mem;

use log::debug;

use crate::common::Result;
use crate::json;
use crate::ontology::{
    Cardinality, ClassRecord, DatatypeRecord, Namespace, OntologyDocument, OntologyMetadata,
    PropertyCharacteristics, PropertyKind, PropertyRecord, Reference,
};
use crate::parse_err;

const DEFAULT_ONTOLOGY_IRI: &str = "http://example.org/ontology";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Preferred language tag for label selection.
    pub language: String,
    /// Accept records whose label is explicitly the empty string.
    pub allow_empty_labels: bool,
    /// Maximum number of class records to parse; 0 means unlimited.
    pub max_classes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            language: "en".to_string(),
            allow_empty_labels: false,
            max_classes: 0,
        }
    }
}

/// Parses and validates an ontology document.
pub fn parse(raw: &str, config: &ParserConfig) -> Result<OntologyDocument> {
    let doc: json::Ontology = serde_json::from_str(raw)?;

    let metadata = metadata_from(doc.header.as_ref());
    let namespaces = doc
        .namespace
        .iter()
        .map(|(prefix, iri)| Namespace {
            prefix: prefix.clone(),
            iri: iri.clone(),
        })
        .collect();

    let mut classes = Vec::with_capacity(doc.class.len());
    for (idx, record) in doc.class.iter().enumerate() {
        if config.max_classes > 0 && idx >= config.max_classes {
            debug!(limit = config.max_classes; "class limit reached, truncating");
            break;
        }
        classes.push(parse_class(record, idx, config)?);
    }

    let mut datatypes = Vec::with_capacity(doc.datatype.len());
    for (idx, record) in doc.datatype.iter().enumerate() {
        datatypes.push(parse_datatype(record, idx, config)?);
    }

    let mut properties = Vec::with_capacity(doc.property.len());
    for (idx, record) in doc.property.iter().enumerate() {
        properties.push(parse_property(record, idx, config)?);
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for id in classes
        .iter()
        .map(|c| c.id.as_str())
        .chain(datatypes.iter().map(|d| d.id.as_str()))
        .chain(properties.iter().map(|p| p.id.as_str()))
    {
        if !seen.insert(id) {
            return parse_err!(DuplicateId, id.to_string());
        }
    }

    // References resolve against declared classes and datatypes, by
    // identifier, never by array position.
    let node_ids: BTreeSet<String> = classes
        .iter()
        .map(|c| c.id.clone())
        .chain(datatypes.iter().map(|d| d.id.clone()))
        .collect();

    for class in &mut classes {
        for reference in class
            .subclass_of
            .iter_mut()
            .chain(class.equivalent.iter_mut())
            .chain(class.disjoint_with.iter_mut())
        {
            resolve(&node_ids, reference);
        }
    }
    for property in &mut properties {
        resolve(&node_ids, &mut property.domain);
        resolve(&node_ids, &mut property.range);
    }

    debug!(
        classes = classes.len(),
        datatypes = datatypes.len(),
        properties = properties.len();
        "parsed ontology document"
    );

    Ok(OntologyDocument {
        metadata,
        namespaces,
        classes,
        datatypes,
        properties,
    })
}

fn resolve(ids: &BTreeSet<String>, reference: &mut Reference) {
    if let Reference::Unresolved(id) = reference
        && ids.contains(id.as_str())
    {
        *reference = Reference::Resolved(mem::take(id));
    }
}

fn metadata_from(header: Option<&json::Header>) -> OntologyMetadata {
    OntologyMetadata {
        iri: header
            .and_then(|h| h.iri.clone())
            .unwrap_or_else(|| DEFAULT_ONTOLOGY_IRI.to_string()),
        version: header.and_then(|h| h.version.clone()),
        title: header.and_then(|h| h.title.clone()),
        description: header.and_then(|h| h.description.clone()),
    }
}

fn require_id(id: Option<&str>, record_kind: &str, idx: usize) -> Result<String> {
    match id {
        Some(id) => Ok(id.to_string()),
        None => parse_err!(MissingField, format!("id for {record_kind} at index {idx}")),
    }
}

fn select_label(label: Option<&json::Label>, id: &str, config: &ParserConfig) -> Result<String> {
    let selected = match label {
        None => id.to_string(),
        Some(json::Label::Text(text)) => text.clone(),
        Some(json::Label::ByLanguage(langs)) => langs
            .get(config.language.as_str())
            .or_else(|| langs.get("default"))
            .cloned()
            .unwrap_or_else(|| id.to_string()),
    };
    if selected.is_empty() && !config.allow_empty_labels {
        return parse_err!(EmptyLabel, id.to_string());
    }
    Ok(selected)
}

fn parse_class(record: &json::ClassRecord, idx: usize, config: &ParserConfig) -> Result<ClassRecord> {
    let id = require_id(record.id.as_deref(), "class", idx)?;
    let deprecated = match record.kind.as_deref().unwrap_or("owl:Class") {
        "owl:Class" | "rdfs:Class" | "owl:Thing" | "owl:Nothing" => record.deprecated,
        "owl:DeprecatedClass" => true,
        other => return parse_err!(UnknownRecordKind, format!("{other} for class {id}")),
    };
    let label = select_label(record.label.as_ref(), &id, config)?;
    let iri = record.iri.clone().unwrap_or_else(|| id.clone());

    Ok(ClassRecord {
        id,
        iri,
        label,
        external: record.external,
        deprecated,
        individuals: record.individuals,
        subclass_of: unresolved_refs(&record.subclass_of),
        equivalent: unresolved_refs(&record.equivalent),
        disjoint_with: unresolved_refs(&record.disjoint_with),
    })
}

fn unresolved_refs(ids: &[String]) -> Vec<Reference> {
    ids.iter().cloned().map(Reference::Unresolved).collect()
}

fn parse_datatype(
    record: &json::DatatypeRecord,
    idx: usize,
    config: &ParserConfig,
) -> Result<DatatypeRecord> {
    let id = require_id(record.id.as_deref(), "datatype", idx)?;
    match record.kind.as_deref().unwrap_or("rdfs:Datatype") {
        "rdfs:Datatype" | "rdfs:Literal" => {}
        other => return parse_err!(UnknownRecordKind, format!("{other} for datatype {id}")),
    }
    let label = select_label(record.label.as_ref(), &id, config)?;
    let iri = record.iri.clone().unwrap_or_else(|| id.clone());

    Ok(DatatypeRecord { id, iri, label })
}

fn parse_property(
    record: &json::PropertyRecord,
    idx: usize,
    config: &ParserConfig,
) -> Result<PropertyRecord> {
    let id = require_id(record.id.as_deref(), "property", idx)?;
    let kind = match record.kind.as_deref().unwrap_or("owl:ObjectProperty") {
        "owl:ObjectProperty" => PropertyKind::Object,
        "owl:DatatypeProperty" => PropertyKind::Datatype,
        "rdfs:subClassOf" => PropertyKind::SubclassOf,
        "owl:equivalentClass" => PropertyKind::EquivalentClass,
        "owl:disjointWith" => PropertyKind::DisjointWith,
        other => return parse_err!(UnknownRecordKind, format!("{other} for property {id}")),
    };
    let label = select_label(record.label.as_ref(), &id, config)?;
    let iri = record.iri.clone().unwrap_or_else(|| id.clone());

    let Some(domain) = record.domain.clone() else {
        return parse_err!(MissingField, format!("domain for property {id}"));
    };
    let Some(range) = record.range.clone() else {
        return parse_err!(MissingField, format!("range for property {id}"));
    };

    Ok(PropertyRecord {
        id,
        iri,
        label,
        kind,
        domain: Reference::Unresolved(domain),
        range: Reference::Unresolved(range),
        characteristics: characteristics_of(record),
    })
}

fn characteristics_of(record: &json::PropertyRecord) -> PropertyCharacteristics {
    let cardinality = if record.min_cardinality.is_some()
        || record.max_cardinality.is_some()
        || record.cardinality.is_some()
    {
        Some(Cardinality {
            min: record.min_cardinality,
            max: record.max_cardinality,
            exact: record.cardinality,
        })
    } else {
        None
    };

    PropertyCharacteristics {
        functional: record.functional,
        inverse_functional: record.inverse_functional,
        transitive: record.transitive,
        symmetric: record.symmetric,
        cardinality,
    }
}
