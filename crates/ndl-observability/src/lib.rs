// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # ndl-observability
//!
//! Logging setup shared by the NDL crates and tools.
//!
//! Provides per-crate debug flags (`--debug-ndl-activation`, `NDL_DEBUG=...`)
//! and a single entry point that installs a text or JSON console subscriber.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use init::*;

/// Known NDL crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "ndl",
    "ndl-activation",
    "ndl-config",
    "ndl-io",
    "ndl-observability",
];
