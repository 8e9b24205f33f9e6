//! # shapecheck validator
//!
//! Validation engine for shapecheck schemas. This crate checks candidate
//! objects against a [`Schema`] and reports every nonconformance at once:
//!
//! - Field checks (types, lengths, options, numeric bounds, date patterns, IPv4)
//! - Required keys and closed-schema key whitelisting
//! - Recursive nested objects and per-element array checks
//! - Up-front well-formedness checks of schema definitions
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use shapecheck_core::{DataValue, SchemaBuilder, email, number, object, string};
//!
//! let schema = SchemaBuilder::new()
//!     .field("email", email().required())
//!     .field("age", number().range(17.0, 99.0))
//!     .field(
//!         "addr",
//!         object().schema(SchemaBuilder::new().field("city", string().required()).build()),
//!     )
//!     .build();
//!
//! let object = DataValue::from(json!({ "email": "ada@example.com", "addr": {} }));
//!
//! match shapecheck_validator::validate(&object, &schema) {
//!     Ok(()) => println!("Validation passed!"),
//!     Err(err) => {
//!         // "The property addr requires property city"
//!         for violation in err.violations() {
//!             println!("{}", violation);
//!         }
//!     }
//! }
//! ```

mod definition;
mod engine;
mod error;
pub mod fields;
mod violation;

pub use definition::*;
pub use engine::*;
pub use error::*;
pub use violation::*;

use shapecheck_core::{DataValue, Schema};

/// Validates an object against a schema in closed-schema mode.
///
/// Shorthand for [`ObjectValidator::validate`].
pub fn validate(object: &DataValue, schema: &Schema) -> ValidationResult {
    ObjectValidator::new().validate(object, schema)
}
