//! # ToolsHub API Server Library
//!
//! HTTP surface of the ToolsHub directory: public tool listing, voting,
//! submissions, the contact form, and the administration endpoints.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Json/Path/Query extractors that reject with `ApiError`
//! - `middleware`: Authentication layers and the admin guard
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
