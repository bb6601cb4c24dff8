//! ProductFlow catalog server
//!
//! REST backend for the dashboard: token/password login, products with
//! typed parameters, and named value rows recorded against those parameters.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod state;

pub use state::AppState;
