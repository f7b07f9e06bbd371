//! Content pipeline errors
//!
//! Every build-time violation is fatal and carries the offending file
//! path so the failing document can be identified from the build output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and validating content files
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{path:?}: missing required front-matter field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{path:?}: front-matter field `{field}` must be a non-empty string")]
    InvalidField { path: PathBuf, field: &'static str },

    #[error("{path:?}: cannot parse `publishedAt` date `{value}`")]
    MalformedDate { path: PathBuf, value: String },

    #[error("{path:?}: no front-matter block found")]
    MissingFrontMatter { path: PathBuf },

    #[error("{path:?}: invalid front-matter: {source}")]
    InvalidFrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate slug `{slug}`: {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{path:?}: failed to render body: {source}")]
    Render { path: PathBuf, source: anyhow::Error },

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
