//! Authentication and authorization middleware and extractors.
//!
//! - [`security::enforce`] -- Per-request Basic authentication plus
//!   URL-pattern authorization, layered over the whole router.
//! - [`auth::AuthUser`] -- The principal the security layer authenticated.
//! - [`rbac::RequireAdmin`] -- Requires the `ROLE_ADMIN` authority.

pub mod auth;
pub mod rbac;
pub mod security;
