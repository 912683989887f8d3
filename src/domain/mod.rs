//! Domain layer: records, nodes, validation and tree construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod validator;

pub use builder::{build, TreeBuilder};
pub use entities::{Node, NodeIter, Record};
pub use error::{TreeResult, ValidationError};
pub use validator::validate;
