//! Single-page web extraction
//!
//! Fetches one page, parses it leniently and extracts rows for one mode:
//! - Text content
//! - Links and images
//! - Elements matching a CSS selector
//! - Prices and email addresses picked out by keywords in a description
//!
//! Results export to CSV.

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extractors;
pub mod fetch;
pub mod runner;
pub mod validate;

pub use config::*;
pub use document::Document;
pub use error::*;
pub use export::*;
pub use extractors::*;
pub use fetch::{fetch, Page};
pub use runner::*;
