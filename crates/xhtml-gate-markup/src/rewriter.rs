//! Ordered text rewrite engine.
//!
//! A [`RewriteRule`] pairs a regular expression with a replacement template.
//! Templates may reference capture groups using the `regex` crate's syntax
//! (`$1`, `${name}`); `$$` is a literal dollar sign. The [`Rewriter`] applies
//! its rules in order, each to the output of the previous one.

use std::collections::HashSet;

use regex::Regex;

use crate::error::MarkupError;

/// A named text rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Creates a new rewrite rule.
    ///
    /// # Arguments
    ///
    /// * `name` - Identifier used in errors and logs
    /// * `pattern` - Regular expression to match
    /// * `replacement` - Replacement template (may contain `$N`/`${name}`)
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not compile or the replacement
    /// references a capture group the pattern does not define.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, MarkupError> {
        let name = name.into();
        let replacement = replacement.into();
        let pattern =
            Regex::new(pattern).map_err(|e| MarkupError::invalid_pattern(&name, e.to_string()))?;

        let group_names: HashSet<&str> = pattern.capture_names().flatten().collect();
        for reference in extract_group_references(&replacement) {
            let defined = match reference.parse::<usize>() {
                Ok(index) => index < pattern.captures_len(),
                Err(_) => group_names.contains(reference.as_str()),
            };
            if !defined {
                return Err(MarkupError::invalid_replacement(
                    &name,
                    format!("replacement references undefined capture group: ${reference}"),
                ));
            }
        }

        Ok(Self {
            name,
            pattern,
            replacement,
        })
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the matcher.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Applies this rule alone.
    #[must_use]
    pub fn apply(&self, source: &str) -> RewriteResult {
        let num_replacements = self.pattern.find_iter(source).count();
        if num_replacements == 0 {
            return RewriteResult {
                output: source.to_owned(),
                num_replacements,
            };
        }

        let output = self
            .pattern
            .replace_all(source, self.replacement.as_str())
            .into_owned();
        RewriteResult {
            output,
            num_replacements,
        }
    }
}

/// Engine applying an ordered list of rewrite rules.
///
/// Rewriting is total: once constructed, a rewriter never fails.
#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
}

impl Rewriter {
    /// Creates a rewriter applying `rules` in the given order.
    #[must_use]
    pub const fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Applies every rule in sequence.
    ///
    /// Each rule is applied to the result of the previous rule; rules that
    /// match nothing leave the text unchanged.
    #[must_use]
    pub fn rewrite(&self, source: &str) -> RewriteResult {
        let mut current = source.to_owned();
        let mut total_replacements: usize = 0;

        for rule in &self.rules {
            let result = rule.apply(&current);
            total_replacements = total_replacements.saturating_add(result.num_replacements);
            current = result.output;
        }

        RewriteResult {
            output: current,
            num_replacements: total_replacements,
        }
    }
}

/// Result of a rewrite operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// The transformed text.
    output: String,
    /// Number of replacements made.
    num_replacements: usize,
}

impl RewriteResult {
    /// Returns the transformed text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the result, returning the transformed text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the number of replacements made.
    #[must_use]
    pub const fn num_replacements(&self) -> usize {
        self.num_replacements
    }

    /// Returns whether any replacements were made.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.num_replacements > 0
    }
}

/// Extracts capture group references from a replacement template.
///
/// Follows the `regex` expansion rules: `$$` is an escaped dollar, `${...}`
/// is a braced reference and `$` otherwise takes the longest run of
/// `[_0-9A-Za-z]`.
fn extract_group_references(template: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed && !name.is_empty() {
                    references.push(name);
                }
            }
            _ => {
                let mut name = String::new();
                while let Some(c) = chars.next_if(|c| c.is_ascii_alphanumeric() || *c == '_') {
                    name.push(c);
                }
                if !name.is_empty() {
                    references.push(name);
                }
            }
        }
    }

    references
}
