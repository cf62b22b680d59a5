// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `GlmProbe` Fetch
//!
//! Network plumbing for `glmprobe`: the HTTP client and the candidate
//! probe loop.
//!
//! The probe walks an ordered list of (endpoint, model) candidates, issues
//! one minimal chat-completion request per candidate with the signed bearer
//! token, and stops at the first 2xx. Requests go through the
//! [`ChatTransport`] trait so tests can script responses without a server;
//! [`HttpTransport`] is the real implementation over reqwest.
//!
//! ## Example
//!
//! ```ignore
//! use glmprobe_fetch::{HttpTransport, PayloadTemplate, ProbeClient, run_probe};
//!
//! let client = ProbeClient::new(Duration::from_secs(10))?;
//! let transport = HttpTransport::new(client);
//! let outcome = run_probe(&transport, &token, &candidates, &PayloadTemplate::default()).await?;
//! ```

pub mod client;
pub mod error;
pub mod probe;

// Re-export key types at crate root
pub use client::ProbeClient;
pub use error::ProbeError;
pub use probe::{
    ChatRequest, ChatTransport, HttpTransport, PayloadTemplate, PingResponse, run_probe,
};
