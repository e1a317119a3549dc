//! In-memory user store served over HTTP.

pub mod app;
pub mod config;
pub mod errors;
pub mod routes;
pub mod services;
pub mod state;
