//! Entity structs and their insert DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and a `Create*` DTO for inserts (no id; the store assigns one).

pub mod anime;
pub mod user;
