pub mod error;
pub mod pagination;
pub mod roles;
pub mod time;
pub mod types;
