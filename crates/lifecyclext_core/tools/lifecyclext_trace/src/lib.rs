//! lifecyclext_trace
//!
//! Host-side driver for `lifecyclext_core`: parses a replay plan from
//! args/environment and pushes it through a `LifecycleRegistry`.

pub mod config;
pub mod replay;
