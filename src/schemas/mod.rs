//! JSON schema handles and payload validation

pub mod schema;
pub(crate) mod validation;

pub use schema::{CompletionSchema, SchemaHandle};
