//! REST API client for the yprompt account store
//!
//! Every endpoint returns a `{code, message?, data?}` envelope with
//! `code == 200` signaling success. The [`RemoteApi`] trait is the seam the
//! stores depend on; [`HttpApi`] is the reqwest-backed production
//! implementation.

mod client;
mod error;
mod http;
mod types;

pub use client::RemoteApi;
pub use error::ApiError;
pub use http::HttpApi;
pub use types::{AuthProviders, Envelope, LoginData, RemoteRules, TokenData, User};

#[cfg(test)]
pub use client::mock;
