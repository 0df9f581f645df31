//! HTTP client for the company-research API.

mod client;
mod provider;

pub use client::ApiClient;
pub use provider::HttpProvider;
