//! HTTP client for the remote text-to-image service.
//!
//! Builds the generation payload from a caller prompt, submits it, decodes
//! the first returned image and stores it as a PNG under the configured
//! output directory.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use client::{GenerationClient, GenerationRequest, ImageGenerator};
pub use config::GenerationConfig;
pub use error::GenerationError;
