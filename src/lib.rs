#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! repo-analyzer - AI-powered repository health checks and project summaries
//!
//! This library clones an external code repository into an ephemeral
//! workspace, derives a minimal health report (README present, build
//! succeeds, tests exist and pass), extracts a bounded slice of source text,
//! and asks a text-generation backend for a structured JSON project summary.
//! A second operation analyzes an incremental diff against a prior summary.
//!
//! Whatever the model answers, every result this library produces is
//! well-shaped JSON: free-form model text is normalized with a deterministic
//! fallback when it cannot be parsed.

/// Request and response payload types
pub mod api;
/// Bounded aggregation of repository source text
pub mod collect;
/// External command execution inside a workspace
pub mod command;
/// Configuration loading and defaults
pub mod config;
/// Error handling types and utilities
pub mod error;
/// Client for the text-generation backend
pub mod gateway;
/// Normalization of model text into guaranteed-shape JSON
pub mod normalize;
/// Orchestration of the analysis pipeline
pub mod pipeline;
/// Toolchain classification and test detection
pub mod probe;
/// Instruction templates sent to the model
pub mod prompt;
/// Ephemeral per-request workspaces
pub mod workspace;

// Re-export common types
pub use api::{AnalyzeRequest, DiffRequest, HealthReport, RepositoryAnalysis};
pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use gateway::{ModelGateway, OllamaClient};
pub use pipeline::Analyzer;
