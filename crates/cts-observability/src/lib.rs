// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # cts-observability
//!
//! Logging setup shared by the CTS telemetry tools.
//!
//! Every crate logs through `tracing`; this crate installs the subscriber and turns per-crate
//! debug flags into an `EnvFilter`.
//!
//! ## Features
//! - `file-logging`: daily-rolling JSON log files next to console output

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known CTS crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "cts-structures",
    "cts-serialization",
    "cts-hal",
    "cts-config",
    "cts-observability",
    "cts-telemetry",
    "cts-player",
];
