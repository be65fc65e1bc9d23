//! # hcloudctl-core
//!
//! Shared engine layer for the `hcloudctl` CLI:
//!
//! - [`client`] - authenticated HTTP client for the Hetzner Cloud REST API
//! - [`api`] - one thin handler per resource type (servers, volumes, ...)
//! - [`poll`] - polling of asynchronous provider actions until they reach
//!   a terminal state, with optional progress callbacks for UI updates
//! - [`config`] - TOML profile store with environment overrides
//!
//! Resource payloads are passed through as raw [`serde_json::Value`]; only
//! [`Action`](api::actions::Action) is typed, because the poller has to
//! inspect its status and error fields.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod poll;

pub use client::CloudClient;
pub use config::{Config, Profile};
pub use error::{CoreError, Result};
pub use poll::{
    DEFAULT_ACTION_TIMEOUT, DEFAULT_POLL_INTERVAL, MultiProgressCallback, ProgressCallback,
    ProgressEvent, poll_action, poll_actions,
};

/// Public API base URL of the provider.
pub const DEFAULT_API_URL: &str = "https://api.hetzner.cloud/v1";
