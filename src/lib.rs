//! Build validated rooted trees from flat parent-pointer records.
//!
//! The [`domain`] layer is the pure core: [`domain::build`] turns an unordered
//! slice of [`domain::Record`]s into an owned [`domain::Node`] tree, or reports
//! the first structural violation as a [`domain::ValidationError`]. The other
//! modules read records from files, load settings and drive the `rectree`
//! binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod parser;
pub mod render;
pub mod util;
