//! # ToolsHub Shared Library
//!
//! This crate contains the data layer and authentication primitives shared by
//! the ToolsHub API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their queries (tools, votes, users, contact messages)
//! - `auth`: Password hashing, JWT tokens, request authentication and role guards
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the ToolsHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
