//! Error types for SideNav.
//!
//! Library crates use [`SidenavError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::fmt;
use std::path::PathBuf;

use crate::types::{NodePath, Violation};

/// Top-level error type for all SideNav operations.
#[derive(Debug, thiserror::Error)]
pub enum SidenavError {
    /// A raw node does not have the recognized shape.
    #[error("schema error at {path}: {reason}")]
    Schema { path: NodePath, reason: String },

    /// The parsed tree breaks one or more cross-tree invariants.
    #[error("{}", ViolationList(.violations))]
    Validation { violations: Vec<Violation> },

    /// A queried doc id or group is not in the tree.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Sidebar source text is not valid JSON/TOML.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SidenavError>;

impl SidenavError {
    /// Create a schema error for the node at `path`.
    pub fn schema(path: &NodePath, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error for a doc id or group name.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Violations carried by a validation failure, empty for other kinds.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation { violations } => violations,
            _ => &[],
        }
    }
}

struct ViolationList<'a>(&'a [Violation]);

impl fmt::Display for ViolationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.len();
        write!(
            f,
            "validation failed with {n} violation{}",
            if n == 1 { "" } else { "s" }
        )?;
        for violation in self.0 {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}
