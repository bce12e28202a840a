//! Axum-based HTTP server for the opensheet gateway.
//!
//! Every request on the gateway listener goes to a single dispatcher that
//! parses the path, consults the response cache, and on a miss fetches the
//! named range from Google Sheets and translates it into plain JSON rows.
//!
//! # Components
//!
//! - `handlers`: The request dispatcher and background cache population.
//! - `response`: JSON success bodies, error envelopes, and the root redirect.
//! - `middleware`: Request ID tracking.
//! - `routes`: Router construction and shared state.
//! - `admin`: Optional metrics/health listener on a separate address.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod admin;
mod handlers;
mod middleware;
pub mod response;
mod routes;

pub use admin::create_admin_router;
pub use handlers::schedule_store;
pub use routes::{create_router, AppState};
