//! Transport seam between the client and the gateway HTTP API.
//!
//! The client talks to the gateway exclusively through the [`Transport`]
//! trait, so tests and alternative HTTP stacks plug in without touching the
//! payload logic. A reqwest-backed [`HttpTransport`] ships behind the
//! `http-transport` feature.

mod config;
mod traits;

#[cfg(feature = "http-transport")]
mod http;

pub use config::GatewayConfig;
pub use traits::Transport;

#[cfg(feature = "http-transport")]
pub use http::HttpTransport;
