//! # shapecheck core
//!
//! Core data structures for the shapecheck validation engine.
//!
//! This crate defines what a schema is and what a candidate value is. It does
//! not validate anything itself; see `shapecheck_validator` for the engine.
//!
//! ## Key Concepts
//!
//! - **Schema**: An ordered mapping of field name to [`SchemaNode`]
//! - **SchemaNode**: The required flag plus a [`FieldKind`] carrying type-specific constraints
//! - **DataValue**: The read-only candidate value being judged
//! - **ConfigurationError**: A schema that cannot be evaluated
//!
//! ## Example
//!
//! ```rust
//! use shapecheck_core::{array, email, id, object, string, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .field("id", id().required())
//!     .field("email", email().required())
//!     .field("tags", array().items(string()))
//!     .field(
//!         "address",
//!         object().schema(SchemaBuilder::new().field("city", string().required()).build()),
//!     )
//!     .build();
//!
//! assert_eq!(schema.len(), 4);
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod schema;
pub mod value;

pub use builder::*;
pub use context::*;
pub use error::*;
pub use schema::*;
pub use value::*;
