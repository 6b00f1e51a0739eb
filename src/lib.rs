//! Genie console: a terminal browser for a job-orchestration catalog.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod view;
