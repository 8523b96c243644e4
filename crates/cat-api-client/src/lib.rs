//! Cat API Client
//!
//! Fetches a random fact from a catfact.ninja-style endpoint and a random
//! image from a thecatapi.com-style search endpoint.

mod client;
mod error;
mod types;

pub use client::{CatApiClient, DEFAULT_FACT_URL, DEFAULT_IMAGE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{CatApiError, Result};
pub use types::{Fact, ImageRef};
