//! `tubeside` — a live transcript side-panel synchronization engine.
//!
//! This crate provides:
//! - Navigation detection for single-page hosts (address changes, no reload)
//! - A best-effort, timing-tolerant panel open sequence
//! - Structured segment extraction from semi-structured transcript markup
//! - Passive subtree watching that keeps a rendered panel eventually consistent
//! - User actions on top (copy transcript, summarize via a configured assistant)
//!
//! The host page, panel surface, settings store, and clipboard are all trait
//! boundaries, so the engine runs unchanged against a real browser bridge or
//! the bundled in-memory scripted host.

// High-level API (most consumers should start here).
pub mod engine;

// The trait boundaries to the uncontrolled outside world.
pub mod host;
pub mod render;
pub mod store;

// Synchronization primitives, leaves first.
pub mod wait;
pub mod extract;
pub mod opener;
pub mod watch;
pub mod nav;

// Data model and persisted settings.
pub mod segment;
pub mod settings;

// User-initiated panel actions.
pub mod actions;

// Crate-wide error type.
pub mod error;

// Logging configuration for binaries and long-running embedders.
#[cfg(feature = "logging")]
pub mod logging;

pub use engine::{EngineConfig, SyncEngine, SyncState};
pub use error::{Error, Result};
pub use segment::{Snapshot, TranscriptSegment};
