//! National generation-mix summaries and clean-energy charging windows.

/// HTTP surface: router, handlers, and server lifecycle.
pub mod api;
pub mod config;
pub mod error;
pub mod io;
/// Averaging, day bucketing, and window search over generation-mix records.
pub mod mix;
pub mod service;
/// Upstream and synthetic generation-mix data sources.
pub mod source;
