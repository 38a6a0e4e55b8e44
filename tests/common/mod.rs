//! Common test utilities and fixtures for texindex integration tests
//!
//! This module provides:
//! - `TestManuscript` builder for creating LaTeX projects on disk
//! - Helpers for writing concept tables and reading annotated output

pub mod manuscript;

pub use manuscript::TestManuscript;
