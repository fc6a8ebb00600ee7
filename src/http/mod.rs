//! HTTP client module
//!
//! Thin reqwest wrapper used by the GitHub clients.
//!
//! # Features
//!
//! - **Base URL resolution**: relative paths are joined onto a configured base
//! - **Default headers**: applied to every request (accept, auth, API version)
//! - **Status classification**: non-success responses become `Error::HttpStatus`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
