use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Render,
    Measure,
    Composite,
    Metadata,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Render => "render",
            Stage::Measure => "measure",
            Stage::Composite => "composite",
            Stage::Metadata => "metadata",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrientationError {
    #[error("invalid orientation '{value}': expected <vertical>-<horizontal>-<direction>")]
    TokenCount { value: String },
    #[error("invalid vertical anchor '{token}' in orientation '{value}' (expected top/t, bottom/b or middle/m)")]
    Vertical { token: String, value: String },
    #[error("invalid horizontal anchor '{token}' in orientation '{value}' (expected left/l, right/r or middle/m)")]
    Horizontal { token: String, value: String },
    #[error("invalid direction '{token}' in orientation '{value}' (expected horizontal/h or vertical/v)")]
    Direction { token: String, value: String },
}

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("{0}")]
    Argument(String),
    #[error("cannot read image {}: {}", .path.display(), .message)]
    Probe { path: PathBuf, message: String },
    #[error(transparent)]
    Orientation(#[from] OrientationError),
    #[error("{stage} failed: {message}")]
    Collaborator { stage: Stage, message: String },
    #[error("settings error: {0:#}")]
    Settings(anyhow::Error),
}

impl AnnotateError {
    pub(crate) fn collaborator(stage: Stage, message: impl Into<String>) -> Self {
        AnnotateError::Collaborator {
            stage,
            message: message.into(),
        }
    }

    pub(crate) fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AnnotateError::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            AnnotateError::Collaborator { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
