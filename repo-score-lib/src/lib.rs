#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for repo-score
//!
//! This library holds all functionality for the repo-score tool, which fetches a
//! handful of metadata fields for a GitHub repository and reduces them to a single
//! weighted quality score.
//!
//! # Module Organization
//!
//! - [`scoring`]: The pure scoring function and its normalization curves
//! - [`facts`]: Repository specs and the GitHub data provider
//! - [`cache`]: Time-bounded store of previously computed scores
//! - [`reports`]: Console and JSON output
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod cache;
pub mod commands;
pub mod facts;
pub mod reports;
pub mod scoring;

pub use crate::commands::{Host, run};
