//! Side-channel for advisory diagnostics emitted while processing records.
//!
//! The processor reports the "no input" case and validation failures here in
//! addition to its return value. What a sink does with a report never feeds back
//! into the processing result.

use std::sync::{Arc, Mutex};
use tracing::error;

/// A single diagnostic report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `process` was called without a record
    NoInput,
    /// The record failed one or more validation rules
    ValidationFailed(Vec<String>),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::NoInput => write!(f, "No user data provided"),
            Diagnostic::ValidationFailed(errors) => {
                write!(f, "Validation errors: {}", errors.join(", "))
            }
        }
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Emits each diagnostic as an ERROR-level tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::NoInput => error!("{}", diagnostic),
            Diagnostic::ValidationFailed(errors) => {
                error!(error_count = errors.len(), "{}", diagnostic)
            }
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every report in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.reports().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(diagnostic);
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}
