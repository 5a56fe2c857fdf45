//! Rich diagnostic error types for the vaidya engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the vaidya engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum VaidyaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Errors raised while loading a knowledge directory.
///
/// All of these are fatal: a partially loaded graph is never returned, since
/// diagnosing against incomplete knowledge silently produces wrong answers.
#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("failed to read {path}")]
    #[diagnostic(
        code(vaidya::ingest::io),
        help(
            "Check that the data directory exists, is readable, and that no \
             file was removed while the load was in progress."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported data file: {path}")]
    #[diagnostic(
        code(vaidya::ingest::extension),
        help(
            "Knowledge directories may only contain subdirectories and `.json` \
             data files. Remove the offending file or convert it to JSON."
        )
    )]
    UnsupportedExtension { path: String },

    #[error("malformed JSON in {path}: {message}")]
    #[diagnostic(
        code(vaidya::ingest::parse),
        help(
            "Data files must map head names to an object of relation names, \
             each holding a tail name or a list of tail names. \
             See the data format reference in the README."
        )
    )]
    Parse { path: String, message: String },

    #[error("empty name in {path}: {context}")]
    #[diagnostic(
        code(vaidya::ingest::empty_name),
        help("Every head, relation, and tail in a data file must be non-empty text.")
    )]
    EmptyName { path: String, context: String },

    #[error("file name is not valid UTF-8: {path}")]
    #[diagnostic(
        code(vaidya::ingest::file_name),
        help("Category directories and data files must have UTF-8 names.")
    )]
    FileName { path: String },
}

// ---------------------------------------------------------------------------
// Anomaly scorer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ScoreError {
    #[error("negative score {score} passed to the anomaly scorer")]
    #[diagnostic(
        code(vaidya::anomaly::negative_score),
        help(
            "Scores are non-negative accumulations by construction. A negative \
             value means the caller's accumulation logic is broken; fix the \
             upstream code, this is not recoverable here."
        )
    )]
    NegativeScore { score: f64 },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(vaidya::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {path}")]
    #[diagnostic(
        code(vaidya::config::parse),
        help(
            "Check the TOML syntax. Valid keys: similarity_threshold, \
             anomaly_threshold, max_symptom_prompts."
        )
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for functions returning vaidya results.
pub type VaidyaResult<T> = std::result::Result<T, VaidyaError>;
