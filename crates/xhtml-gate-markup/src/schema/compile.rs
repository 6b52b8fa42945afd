//! Compilation of a [`SchemaDefinition`] into an immutable [`Schema`].
//!
//! Compilation expands `@group` references, checks that every referenced
//! element is declared and rejects cyclic groups. The result is never
//! mutated, so one compiled schema can be shared across threads behind an
//! `Arc`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use super::definition::{ContentDefinition, ElementDefinition, SchemaDefinition};
use crate::error::MarkupError;

/// Bundled strict XHTML schema.
const XHTML_SCHEMA_JSON: &str = include_str!("../../schema/xhtml-strict.json");

const GROUP_PREFIX: char = '@';

/// A compiled, read-only schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    namespace: String,
    root: String,
    elements: HashMap<String, ElementRule>,
}

/// Resolved constraints for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ElementRule {
    pub(crate) attributes: BTreeSet<String>,
    pub(crate) required_attributes: Vec<String>,
    pub(crate) attribute_values: BTreeMap<String, BTreeSet<String>>,
    pub(crate) content: ContentModel,
}

/// Resolved content model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentModel {
    Empty,
    Text,
    Mixed {
        allowed: BTreeSet<String>,
    },
    Elements {
        allowed: BTreeSet<String>,
        required: Vec<String>,
        unique: Vec<String>,
        min: usize,
    },
    Sequence(Vec<String>),
}

impl ContentModel {
    pub(crate) const fn allows_text(&self) -> bool {
        matches!(self, Self::Text | Self::Mixed { .. })
    }

    pub(crate) fn allows_child(&self, name: &str) -> bool {
        match self {
            Self::Empty | Self::Text => false,
            Self::Mixed { allowed } | Self::Elements { allowed, .. } => allowed.contains(name),
            Self::Sequence(children) => children.iter().any(|child| child == name),
        }
    }
}

impl Schema {
    /// Compiles a definition.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::SchemaDefinition`] for unknown or cyclic
    /// groups, references to undeclared elements, constraints naming
    /// attributes or children that are not allowed, or an undeclared root.
    pub fn compile(definition: &SchemaDefinition) -> Result<Self, MarkupError> {
        let resolver = GroupResolver {
            attribute_groups: &definition.attribute_groups,
            content_groups: &definition.content_groups,
        };

        let mut elements = HashMap::with_capacity(definition.elements.len());
        for (name, element) in &definition.elements {
            let rule = compile_element(name, element, &resolver)?;
            elements.insert(name.clone(), rule);
        }

        if !elements.contains_key(&definition.root) {
            return Err(MarkupError::schema_definition(format!(
                "root element '{}' is not declared",
                definition.root
            )));
        }

        for (name, rule) in &elements {
            let children: Vec<&String> = match &rule.content {
                ContentModel::Empty | ContentModel::Text => Vec::new(),
                ContentModel::Mixed { allowed } | ContentModel::Elements { allowed, .. } => {
                    allowed.iter().collect()
                }
                ContentModel::Sequence(children) => children.iter().collect(),
            };
            if let Some(missing) = children.iter().find(|child| !elements.contains_key(**child)) {
                return Err(MarkupError::schema_definition(format!(
                    "element '{name}' allows undeclared child '{missing}'"
                )));
            }
        }

        Ok(Self {
            name: definition.name.clone(),
            namespace: definition.namespace.clone(),
            root: definition.root.clone(),
            elements,
        })
    }

    /// Parses and compiles a JSON schema definition.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or compilation fails.
    pub fn from_json(json: &str) -> Result<Self, MarkupError> {
        let definition: SchemaDefinition = serde_json::from_str(json)
            .map_err(|e| MarkupError::schema_definition(e.to_string()))?;
        Self::compile(&definition)
    }

    /// Reads, parses and compiles a JSON schema definition file.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::SchemaRead`] when the file cannot be read and
    /// a definition error when it does not compile.
    pub fn from_path(path: &Path) -> Result<Self, MarkupError> {
        let json = fs::read_to_string(path)
            .map_err(|source| MarkupError::schema_read(path.to_path_buf(), source))?;
        Self::from_json(&json)
    }

    /// Compiles the bundled strict XHTML schema.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled definition is inconsistent.
    pub fn xhtml() -> Result<Self, MarkupError> {
        Self::from_json(XHTML_SCHEMA_JSON)
    }

    /// Display name of the schema.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace all elements must belong to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Required document element name.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns whether an element is declared.
    #[must_use]
    pub fn declares(&self, element: &str) -> bool {
        self.elements.contains_key(element)
    }

    /// Number of declared elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn element(&self, name: &str) -> Option<&ElementRule> {
        self.elements.get(name)
    }
}

struct GroupResolver<'a> {
    attribute_groups: &'a BTreeMap<String, Vec<String>>,
    content_groups: &'a BTreeMap<String, Vec<String>>,
}

impl GroupResolver<'_> {
    fn attributes(&self, items: &[String]) -> Result<BTreeSet<String>, MarkupError> {
        let mut out = BTreeSet::new();
        expand(items, self.attribute_groups, "attribute", &mut Vec::new(), &mut out)?;
        Ok(out)
    }

    fn children(&self, items: &[String]) -> Result<BTreeSet<String>, MarkupError> {
        let mut out = BTreeSet::new();
        expand(items, self.content_groups, "content", &mut Vec::new(), &mut out)?;
        Ok(out)
    }
}

fn expand<'a>(
    items: &'a [String],
    groups: &'a BTreeMap<String, Vec<String>>,
    kind: &str,
    stack: &mut Vec<&'a str>,
    out: &mut BTreeSet<String>,
) -> Result<(), MarkupError> {
    for item in items {
        let Some(group) = item.strip_prefix(GROUP_PREFIX) else {
            out.insert(item.clone());
            continue;
        };

        if stack.contains(&group) {
            return Err(MarkupError::schema_definition(format!(
                "{kind} group '{group}' refers to itself"
            )));
        }
        let members = groups.get(group).ok_or_else(|| {
            MarkupError::schema_definition(format!("unknown {kind} group '{group}'"))
        })?;

        stack.push(group);
        expand(members, groups, kind, stack, out)?;
        stack.pop();
    }
    Ok(())
}

fn compile_element(
    name: &str,
    element: &ElementDefinition,
    resolver: &GroupResolver<'_>,
) -> Result<ElementRule, MarkupError> {
    let attributes = resolver.attributes(&element.attributes)?;

    let undeclared_attribute = element
        .required_attributes
        .iter()
        .chain(element.attribute_values.keys())
        .find(|attribute| !attributes.contains(*attribute));
    if let Some(attribute) = undeclared_attribute {
        return Err(MarkupError::schema_definition(format!(
            "element '{name}' constrains attribute '{attribute}' it does not allow"
        )));
    }

    let attribute_values: BTreeMap<String, BTreeSet<String>> = element
        .attribute_values
        .iter()
        .map(|(attribute, values)| {
            (
                attribute.clone(),
                values.iter().cloned().collect::<BTreeSet<_>>(),
            )
        })
        .collect();

    let content = match &element.content {
        ContentDefinition::Empty => ContentModel::Empty,
        ContentDefinition::Text => ContentModel::Text,
        ContentDefinition::Mixed { children } => ContentModel::Mixed {
            allowed: resolver.children(children)?,
        },
        ContentDefinition::Elements {
            children,
            required,
            unique,
            min,
        } => {
            let allowed = resolver.children(children)?;
            if let Some(child) = required
                .iter()
                .chain(unique)
                .find(|child| !allowed.contains(*child))
            {
                return Err(MarkupError::schema_definition(format!(
                    "element '{name}' constrains child '{child}' it does not allow"
                )));
            }
            ContentModel::Elements {
                allowed,
                required: required.clone(),
                unique: unique.clone(),
                min: *min,
            }
        }
        ContentDefinition::Sequence { children } => {
            if children.iter().any(|child| child.starts_with(GROUP_PREFIX)) {
                return Err(MarkupError::schema_definition(format!(
                    "element '{name}' uses a group inside a sequence"
                )));
            }
            ContentModel::Sequence(children.clone())
        }
    };

    Ok(ElementRule {
        attributes,
        required_attributes: element.required_attributes.clone(),
        attribute_values,
        content,
    })
}
