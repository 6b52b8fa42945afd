//! Serialised form of a schema.
//!
//! Group references are written `@name` in attribute and child lists and are
//! resolved when the definition is compiled into a
//! [`Schema`](super::Schema).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    /// Display name, used in logs.
    pub name: String,
    /// Namespace every element must belong to.
    pub namespace: String,
    /// Required document element.
    pub root: String,
    /// Named attribute lists.
    #[serde(default)]
    pub attribute_groups: BTreeMap<String, Vec<String>>,
    /// Named element lists.
    #[serde(default)]
    pub content_groups: BTreeMap<String, Vec<String>>,
    /// Declared elements.
    pub elements: BTreeMap<String, ElementDefinition>,
}

/// Declaration of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDefinition {
    /// Allowed attributes (names or `@group` references).
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Attributes that must be present.
    #[serde(default)]
    pub required_attributes: Vec<String>,
    /// Enumerated values for attributes.
    #[serde(default)]
    pub attribute_values: BTreeMap<String, Vec<String>>,
    /// Content model.
    #[serde(default)]
    pub content: ContentDefinition,
}

/// Content model of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentDefinition {
    /// No children and no character content.
    #[default]
    Empty,
    /// Character content only.
    Text,
    /// Character content interleaved with the listed elements.
    Mixed {
        /// Allowed child elements (names or `@group` references).
        children: Vec<String>,
    },
    /// Listed elements only; whitespace between them is ignored.
    Elements {
        /// Allowed child elements (names or `@group` references).
        children: Vec<String>,
        /// Children that must appear at least once.
        #[serde(default)]
        required: Vec<String>,
        /// Children that may appear at most once.
        #[serde(default)]
        unique: Vec<String>,
        /// Minimum number of child elements.
        #[serde(default)]
        min: usize,
    },
    /// Exactly these children in this order.
    Sequence {
        /// Child element names.
        children: Vec<String>,
    },
}
