//! Shellguard core library.
//!
//! This crate exposes programmatic APIs for auditing shell helper scripts
//! with a fixed table of conservative line-based heuristics, and for scanning
//! whole repositories (local directories or shallow-cloned remotes) into
//! aggregate reports.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Data models for severities, findings, and reports.
//! - `rules`: Built-in rule table, validated once at startup.
//! - `analyze`: Pure line-based analyzer producing ordered findings.
//! - `acquire`: Repository acquisition with owned temporary checkouts.
//! - `discover`: Glob-based candidate file discovery (symlinks not followed).
//! - `scan`: Scan orchestration with per-file failure containment.
//! - `output`: Human/JSON printers and report serialization.
pub mod acquire;
pub mod analyze;
pub mod cli;
pub mod config;
pub mod discover;
pub mod models;
pub mod output;
pub mod rules;
pub mod scan;
