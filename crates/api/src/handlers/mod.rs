pub mod anime;
pub mod fallback;
pub mod user;
