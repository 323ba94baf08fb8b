//! Serverless-style HTTP functions for Linea Voyager.
//!
//! Provides endpoints for:
//! - `/activations`: current campaign activations from the CMS
//! - `/registration`: signature-verified address registration
//! - `/global`: every lookup for one address, aggregated
//! - `/health` and `/metrics`
//!
//! Every function answers `OPTIONS` with a 204 preflight and any other
//! unsupported method with a 405.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod server;
pub mod state;

pub use error::FunctionError;
pub use metrics::FunctionMetrics;
pub use server::{router, FunctionsServer};
pub use state::{FunctionsState, Secrets};
