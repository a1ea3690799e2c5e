//! Pure data types for grush: values, records, command schemas.
//!
//! This crate is a leaf dependency with no parser, no I/O, and no store
//! access. It exists so that embedders and tests can work with grush's
//! type system without pulling in the kernel.

pub mod schema;
pub mod value;

// Flat re-exports for convenience
pub use schema::*;
pub use value::*;
