//! # Vigil - user activity watcher
//!
//! Classifies a stream of raw input events (pointer motion, button presses,
//! wheel ticks, key presses) into a coarse activity state — idle, noise,
//! active or suspended — for break-aware tooling.
//!
//! ## Features
//!
//! - **Activity State Machine**: Debounced, threshold-driven transitions
//!   with lazy idle detection and administrative overrides
//! - **Pluggable Input**: Capability-negotiated input backend behind a
//!   factory; a fake backend keeps the core testable
//! - **State Publication**: Observer-based publication of every transition
//! - **Listener Protocol**: Single activity listener with one-shot
//!   unsubscription via its continuation flag
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
