//! Shrimpy REST API client.
//!
//! Every endpoint is authenticated: requests carry the API key, a nonce and
//! an HMAC-SHA256 signature over `path + method + nonce + body`.
//!
//! # Trait-based API
//!
//! The [`ShrimpyClient`] trait abstracts all REST operations; callers can be
//! written against it and tested with their own implementation.

pub mod accounts;
mod client;
pub mod endpoints;
pub mod market;
mod traits;

pub use client::{Acknowledgement, ShrimpyRestClient, ShrimpyRestClientBuilder};
pub use traits::ShrimpyClient;
