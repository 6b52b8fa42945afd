//! Declarative schemas for validating parsed markup.
//!
//! A schema is written as JSON ([`SchemaDefinition`]), compiled once into a
//! [`Schema`] and then shared by any number of [`SchemaValidator`]s.

mod compile;
mod definition;
mod validator;

pub use compile::Schema;
pub use definition::{ContentDefinition, ElementDefinition, SchemaDefinition};
pub use validator::SchemaValidator;
