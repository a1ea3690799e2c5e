//! grush kernel: everything between a raw input line and its rendered
//! result.
//!
//! The pipeline through this crate is lexer → parser → executor, with the
//! executor binding arguments against registered command schemas,
//! resolving them through the evaluator, invoking handlers against the
//! graph store, and committing session state once the whole line has
//! succeeded. The presenter turns the final value into display text; the
//! REPL crate owns only the terminal loop.

pub mod ast;
pub mod commands;
pub mod error;
pub mod eval;
pub mod executor;
pub mod help;
pub mod lexer;
pub mod parser;
pub mod present;
pub mod registry;
pub mod session;
pub mod store;

pub use error::ShellError;
pub use executor::Shell;
pub use present::render;
pub use session::Session;
pub use store::{GraphStore, MemoryStore, StoreError};
