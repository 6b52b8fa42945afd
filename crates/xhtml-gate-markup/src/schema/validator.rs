//! Validation of parsed documents against a compiled [`Schema`].
//!
//! Every violation is collected; nothing short-circuits. Errors are
//! reported in document order at the start tag of the offending element.

use std::collections::HashMap;
use std::sync::Arc;

use roxmltree::{Node, NodeType};

use super::compile::{ContentModel, ElementRule, Schema};
use crate::located::LocatedError;
use crate::parser::ParsedDocument;
use crate::position::node_line_column;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Validates documents against a shared schema.
///
/// The validator holds an `Arc` to a schema compiled once at start-up and
/// can be cloned freely across threads.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Arc<Schema>,
}

impl SchemaValidator {
    /// Creates a validator for `schema`.
    #[must_use]
    pub const fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    /// Returns the schema in use.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates a parsed document, returning violations in document order.
    ///
    /// An empty list means the document is valid.
    #[must_use]
    pub fn validate(&self, parsed: &ParsedDocument<'_>) -> Vec<LocatedError> {
        let mut errors = Vec::new();
        let root = parsed.root_element();

        if root.tag_name().name() != self.schema.root() {
            push(
                &mut errors,
                root,
                format!(
                    "root element '{}' is not the expected '{}'",
                    root.tag_name().name(),
                    self.schema.root()
                ),
            );
        }

        for node in root.descendants().filter(Node::is_element) {
            self.validate_element(node, &mut errors);
        }

        errors.sort_by(LocatedError::cmp_position);
        errors
    }

    fn validate_element(&self, node: Node<'_, '_>, errors: &mut Vec<LocatedError>) {
        let name = node.tag_name().name();

        if node.tag_name().namespace() != Some(self.schema.namespace()) {
            push(
                errors,
                node,
                format!(
                    "element '{name}' is not in the namespace '{}'",
                    self.schema.namespace()
                ),
            );
            return;
        }

        let Some(rule) = self.schema.element(name) else {
            push(errors, node, format!("element '{name}' is not declared"));
            return;
        };

        if let Some(parent) = node.parent_element() {
            let parent_name = parent.tag_name().name();
            if let Some(parent_rule) = self.schema.element(parent_name)
                && !parent_rule.content.allows_child(name)
                && in_schema_namespace(parent, &self.schema)
            {
                push(
                    errors,
                    node,
                    format!("element '{name}' is not allowed inside '{parent_name}'"),
                );
            }
        }

        check_attributes(node, name, rule, errors);
        check_content(node, name, &rule.content, errors);
    }
}

fn in_schema_namespace(node: Node<'_, '_>, schema: &Schema) -> bool {
    node.tag_name().namespace() == Some(schema.namespace())
}

fn push(errors: &mut Vec<LocatedError>, node: Node<'_, '_>, message: String) {
    let (line, column) = node_line_column(node);
    errors.push(LocatedError::schema(line, column, message));
}

fn qualified_attribute_name(attribute: &roxmltree::Attribute<'_, '_>) -> String {
    match attribute.namespace() {
        None => attribute.name().to_owned(),
        Some(XML_NAMESPACE) => format!("xml:{}", attribute.name()),
        Some(namespace) => format!("{{{namespace}}}{}", attribute.name()),
    }
}

fn check_attributes(
    node: Node<'_, '_>,
    element: &str,
    rule: &ElementRule,
    errors: &mut Vec<LocatedError>,
) {
    for attribute in node.attributes() {
        let qualified = qualified_attribute_name(&attribute);
        if !rule.attributes.contains(&qualified) {
            push(
                errors,
                node,
                format!("attribute '{qualified}' is not allowed on element '{element}'"),
            );
            continue;
        }

        if let Some(values) = rule.attribute_values.get(&qualified)
            && !values.contains(attribute.value())
        {
            let expected: Vec<&str> = values.iter().map(String::as_str).collect();
            push(
                errors,
                node,
                format!(
                    "attribute '{qualified}' on element '{element}' has value '{}', expected one of {{{}}}",
                    attribute.value(),
                    expected.join(", ")
                ),
            );
        }
    }

    for required in &rule.required_attributes {
        let present = node
            .attributes()
            .any(|attribute| &qualified_attribute_name(&attribute) == required);
        if !present {
            push(
                errors,
                node,
                format!("element '{element}' is missing required attribute '{required}'"),
            );
        }
    }
}

fn check_content(
    node: Node<'_, '_>,
    element: &str,
    content: &ContentModel,
    errors: &mut Vec<LocatedError>,
) {
    let has_text = node.children().any(|child| {
        child.node_type() == NodeType::Text && child.text().is_some_and(|t| !t.trim().is_empty())
    });
    if has_text && !content.allows_text() {
        push(
            errors,
            node,
            format!("element '{element}' does not allow character content"),
        );
    }

    let children: Vec<&str> = node
        .children()
        .filter(Node::is_element)
        .map(|child| child.tag_name().name())
        .collect();

    match content {
        ContentModel::Empty => {
            if !children.is_empty() {
                push(
                    errors,
                    node,
                    format!("element '{element}' must be empty"),
                );
            }
        }
        ContentModel::Text | ContentModel::Mixed { .. } => {}
        ContentModel::Elements {
            required,
            unique,
            min,
            ..
        } => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for &child in &children {
                *counts.entry(child).or_default() += 1;
            }
            for name in required {
                if !counts.contains_key(name.as_str()) {
                    push(
                        errors,
                        node,
                        format!("element '{element}' is missing required child '{name}'"),
                    );
                }
            }
            for name in unique {
                if counts.get(name.as_str()).is_some_and(|count| *count > 1) {
                    push(
                        errors,
                        node,
                        format!("element '{element}' allows at most one '{name}'"),
                    );
                }
            }
            if children.len() < *min {
                push(
                    errors,
                    node,
                    format!(
                        "element '{element}' needs at least {min} child element(s), found {}",
                        children.len()
                    ),
                );
            }
        }
        ContentModel::Sequence(expected) => {
            let matches = children.len() == expected.len()
                && children.iter().zip(expected).all(|(found, want)| found == want);
            if !matches {
                push(
                    errors,
                    node,
                    format!(
                        "element '{element}' must contain exactly ({}), found ({})",
                        expected.join(", "),
                        children.join(", ")
                    ),
                );
            }
        }
    }
}
