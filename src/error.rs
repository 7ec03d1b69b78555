//! Error types for the path resolution core.

use crate::sun::SourceUnitName;
use std::{io, path::PathBuf};

/// Alias for the result type returned by the resolution core.
pub type Result<T, E = ResolverError> = std::result::Result<T, E>;

/// All failure modes produced by the VFS, remapping engine, resolver, dispatcher and Host
/// Filesystem Loader (spec §7).
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// A remapping rule failed to parse (empty prefix, malformed syntax).
    #[error("invalid remapping {raw:?}: {reason}")]
    InvalidRemapping {
        /// The raw `[context:]prefix=[target]` string that failed to parse.
        raw: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Insert of differing bytes under an already-occupied source unit name.
    #[error("duplicate source unit {sun}: existing content differs from the new insert")]
    DuplicateSourceUnit {
        /// The source unit name that was already present.
        sun: SourceUnitName,
    },

    /// No callback (and no Host Filesystem Loader) produced bytes for a source unit name.
    #[error("file not found: {sun}")]
    FileNotFound {
        /// The source unit name that could not be loaded.
        sun: SourceUnitName,
    },

    /// A loader located the file but reading it failed.
    #[error("io error resolving {path}: {source}")]
    IoError {
        /// The path the loader attempted to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The Host Filesystem Loader refused to read a path outside the allow-list.
    #[error("{path} is outside the allow-list")]
    Forbidden {
        /// The disk path that was rejected.
        path: PathBuf,
    },

    /// An import statement carried an empty literal.
    #[error("import path is empty (importer: {importer})")]
    ImportPathEmpty {
        /// The SUN of the file that contained the empty import.
        importer: SourceUnitName,
    },

    /// A registered loader callback reported an application-level error rather than
    /// `not_found`; this aborts the dispatcher's fallback iteration immediately (spec §4.E).
    #[error("loader callback failed for {sun}: {message}")]
    CallbackError {
        /// The source unit name the callback was asked to load.
        sun: SourceUnitName,
        /// The callback-supplied error message.
        message: String,
    },
}

impl ResolverError {
    /// Builds an [`IoError`](ResolverError::IoError), attaching the path that was being read.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoError { path: path.into(), source }
    }
}
