//! Shared utilities for Linea Voyager.

pub mod logging;
pub mod time;

pub use logging::{init_logging, init_tracing, LogFormat};
pub use time::{Clock, SystemClock};
