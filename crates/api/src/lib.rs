//! Anime catalogue API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! security) so integration tests and the binary entrypoint can both
//! access them.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod query;
pub mod requests;
pub mod routes;
pub mod services;
pub mod state;
