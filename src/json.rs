// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! JSON wire format for ontology documents.
//!
//! Mirrors the interchange shape produced by OWL-to-JSON converters:
//! a `header` block, a `namespace` prefix map, and separate record
//! arrays for classes, datatypes, and properties. Fields that the
//! format treats as optional are optional here too; presence checks
//! that should name the offending record live in [`crate::parser`],
//! not in serde.
//!
//! # Example
//! ```no_run
//! use ontoview_engine::json;
//!
//! let json_str = r#"{"header": {...}, "class": [...], "property": [...]}"#;
//! let doc: json::Ontology = serde_json::from_str(json_str)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Helper functions for serde skip_serializing_if

fn is_false(val: &bool) -> bool {
    !*val
}

fn is_empty_vec<T>(val: &[T]) -> bool {
    val.is_empty()
}

fn is_empty_map(val: &BTreeMap<String, String>) -> bool {
    val.is_empty()
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Document-level metadata from the `header` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// A display label: either a bare string or a map keyed by language
/// tag (`"en"`, `"de"`, plus the conventional `"default"` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    ByLanguage(BTreeMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "is_false", default)]
    pub external: bool,
    #[serde(skip_serializing_if = "is_false", default)]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub individuals: Option<usize>,
    #[serde(
        rename = "subClassOf",
        skip_serializing_if = "is_empty_vec",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub subclass_of: Vec<String>,
    #[serde(
        skip_serializing_if = "is_empty_vec",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub equivalent: Vec<String>,
    #[serde(
        rename = "disjointWith",
        skip_serializing_if = "is_empty_vec",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub disjoint_with: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatatypeRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "is_false", default)]
    pub functional: bool,
    #[serde(
        rename = "inverseFunctional",
        skip_serializing_if = "is_false",
        default
    )]
    pub inverse_functional: bool,
    #[serde(skip_serializing_if = "is_false", default)]
    pub transitive: bool,
    #[serde(skip_serializing_if = "is_false", default)]
    pub symmetric: bool,
    #[serde(
        rename = "minCardinality",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub min_cardinality: Option<u32>,
    #[serde(
        rename = "maxCardinality",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub max_cardinality: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cardinality: Option<u32>,
}

/// Root of an ontology document. Missing collections deserialize as
/// empty so the empty ontology stays valid input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ontology {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub header: Option<Header>,
    #[serde(
        alias = "namespaces",
        skip_serializing_if = "is_empty_map",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub namespace: BTreeMap<String, String>,
    #[serde(
        alias = "classes",
        skip_serializing_if = "is_empty_vec",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub class: Vec<ClassRecord>,
    #[serde(
        alias = "datatypes",
        skip_serializing_if = "is_empty_vec",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub datatype: Vec<DatatypeRecord>,
    #[serde(
        alias = "properties",
        skip_serializing_if = "is_empty_vec",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub property: Vec<PropertyRecord>,
}
