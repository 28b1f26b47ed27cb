//! Composable report builders.
//!
//! # Responsibility
//! - Provide the text (`Indenter`) and markup (`HtmlWriter`) accumulators every
//!   report renderer is written against.
//!
//! # Invariants
//! - Builders are single-owner values; each renderer owns a private instance.

pub mod html_writer;
pub mod indenter;
