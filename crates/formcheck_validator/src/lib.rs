//! # formcheck validator
//!
//! Validation engine for array-shaped form data. This crate provides:
//!
//! - Schema compilation (name, reference and pattern checks up front)
//! - Per-field rules (required, type coercion, length, pattern, allowed values, bounds)
//! - Cross-record duplicate detection
//! - Normalization of every violation into a path-addressed error report
//!
//! ## Example
//!
//! ```rust
//! use formcheck_core::{
//!     FieldBuilder, FormData, ListBuilder, Record, RecordList, RuleKind, SchemaBuilder,
//!     ValidationOptions,
//! };
//! use formcheck_validator::validate;
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
//!         Record::new().with("firstName", None::<&str>),
//!         Record::new().with("firstName", "Bob"),
//!     ]),
//! );
//!
//! let options = ValidationOptions::new().with_collect_all_criteria(true);
//! match validate(&data, &schema, &options).expect("schema is well-formed").into_result() {
//!     Ok(values) => println!("valid: {values:?}"),
//!     Err(report) => {
//!         let entry = report.get("test", 0, "firstName").unwrap();
//!         assert_eq!(entry.kind, RuleKind::Required);
//!     }
//! }
//! ```

mod compiled;
mod duplicates;
mod normalize;
mod resolver;
mod rules;

pub use compiled::*;
pub use duplicates::*;
pub use normalize::*;
pub use resolver::*;
