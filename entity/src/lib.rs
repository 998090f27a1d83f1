//! SeaORM entity models for the sosnet database.
//!
//! Pure data definitions only; all queries live in the repository layer of the
//! root crate. The `prelude` module re-exports the entity types under their
//! conventional names for use in queries and test schema setup.

pub mod prelude;

pub mod server_listing;
pub mod sos_record;
pub mod user_stat;
