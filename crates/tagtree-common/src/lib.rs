//! Common utilities for the tagtree parser.
//!
//! This crate provides shared infrastructure used by the tree and parser crates:
//! - **Warning System** - colored, deduplicated terminal output for parse failures
//! - **Trace Output** - per-step diagnostics for the `parse-trace` feature

pub mod warning;
