//! # Engine Module
//!
//! Orchestration shared by every workflow: how a run is configured, how failures are
//! classified, how progress is reported, and how a list of molecules is processed so
//! that one molecule's failure never stops the others.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Reader options, resolution settings, radii
//!   settings and the `{mol}` naming convention used by batch runs
//! - **Error Handling** ([`error`]) - Per-molecule error taxonomy with the offending path
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Cancellation** ([`cancel`]) - A shared flag checked before each molecule starts
//! - **Batch Execution** ([`batch`]) - Independent per-molecule execution, in parallel
//!   when the `parallel` feature is enabled, with results kept in input order

pub mod batch;
pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
