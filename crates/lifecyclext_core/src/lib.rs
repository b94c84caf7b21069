//! lifecyclext_core: single-threaded lifecycle state registry.
//!
//! Design goals:
//! - Pure, testable logic (no runtime, no threads).
//! - Observers may add/remove observers, or drive new transitions, from inside
//!   their own callbacks.
//! - Small, stable public API surface.

pub mod error;

/// Tracing helpers for `CoreError`.
pub mod logging;

/// Lifecycle state registry + reentrant observer list.
pub mod lifecycle;
