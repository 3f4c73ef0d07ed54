//! Intake server
//!
//! Backend for a small consultancy site: contact, service request and
//! internship application forms persisted to a flat JSON document, plus a
//! TF-IDF FAQ search index served over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod search;
pub mod state;

pub use error::{AppError, Result};
