//! Grade records and the rules for accepting them.
//!
//! Validates submitted field maps for create and update, and turns the
//! accepted fields of an update into bind-only column assignments.

pub mod schema;
pub mod validate;
pub mod patch;

pub use schema::*;
pub use validate::*;
pub use patch::*;
