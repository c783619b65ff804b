//! Common types and utilities for the mlc semantic analysis core.
//!
//! This crate provides foundational types used by every downstream crate:
//! - Source spans (`Span`, `Spanned`)
//! - Structured diagnostics (`Diagnostic`, `DiagnosticCategory`, codes/messages)
//! - Analysis-wide configuration (`AnalysisOptions`)
//! - Centralized limits and thresholds

pub mod span;
pub use span::{Span, Spanned};

pub mod diag;
pub use diag::{Diagnostic, DiagnosticCategory};

pub mod options;
pub use options::AnalysisOptions;

pub mod limits;
