//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate provider, model, renderers and sinks into report runs.
//! - Keep the CLI free of model and rendering details.

pub mod report_service;
