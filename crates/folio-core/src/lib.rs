//! Folio Core - Core types and data model for the folder import pipeline.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;
