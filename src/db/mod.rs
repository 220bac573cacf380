//! SQLite metadata index.
//!
//! Holds the case/session rows and the flat system config table. The file
//! tree under the data root is the source of truth for artifact content;
//! this database only indexes it.

mod database;
pub mod schema;

pub use database::Database;
