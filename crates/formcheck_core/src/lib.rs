//! # formcheck core
//!
//! Core data structures and types for the formcheck validation engine.
//!
//! formcheck validates array-shaped form data: named lists of records, each
//! record a set of named fields. This crate holds the shared vocabulary: the
//! data snapshot, the declarative schema, the options of a validation pass,
//! and the path-addressed error report a pass produces.
//!
//! ## Key Concepts
//!
//! - **FormData**: a snapshot of named `RecordList`s
//! - **FormSchema**: per-field rules plus cross-record uniqueness constraints
//! - **ErrorReport**: violations keyed by `list -> index -> field`
//! - **SchemaFault**: the schema itself is broken (as opposed to invalid data)
//!
//! ## Example
//!
//! ```rust
//! use formcheck_core::{FieldBuilder, FormData, ListBuilder, Record, RecordList, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("people")
//!     .list(
//!         ListBuilder::new("test")
//!             .field(FieldBuilder::new("firstName").required("form.required_message").build())
//!             .unique("firstName")
//!             .build(),
//!     )
//!     .build();
//!
//! let data = FormData::new().with_list(
//!     "test",
//!     RecordList::from_records(vec![
//!         Record::new().with("firstName", "Alice"),
//!         Record::new().with("firstName", "Bob"),
//!     ]),
//! );
//!
//! assert_eq!(schema.lists[0].required_fields().len(), 1);
//! assert_eq!(data.total_records(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod schema;
pub mod validator;
pub mod value;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use schema::*;
pub use validator::*;
pub use value::*;
