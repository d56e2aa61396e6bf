//! fxsignal - streaming technical-analysis signal engine for currency pairs

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
