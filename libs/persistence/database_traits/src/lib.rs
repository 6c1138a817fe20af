//! Storage seams shared by every backend.
//!
//! A backend implements [`dao::DocumentDao`] when it stores schema-less
//! documents addressed by id, and [`dao::RelationalDao`] when it only exposes
//! a table scan. Handlers hold these as trait objects so the concrete client
//! is chosen once at startup.

pub mod dao;

pub use dao::{DocumentDao, RelationalDao};
