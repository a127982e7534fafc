//! # nsattach-common
//!
//! Shared error definitions, configuration models, and constants used
//! across the nsattach workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that the core
//! protocol and CLI crates build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
