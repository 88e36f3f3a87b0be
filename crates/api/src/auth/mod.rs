//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`basic`] -- HTTP Basic `Authorization` header parsing.
//! - [`user_details`] -- The authenticated principal and where it came from.
//! - [`provider`] -- Username lookups (in-memory, database) and the ordered
//!   [`ProviderManager`](provider::ProviderManager) that checks credentials.

pub mod basic;
pub mod password;
pub mod provider;
pub mod user_details;
