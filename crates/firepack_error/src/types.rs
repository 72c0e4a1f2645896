//! Main error types and the shared Result alias

use crate::kinds::*;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the firepack toolkit
pub type Result<T> = std::result::Result<T, FirepackError>;

/// Unified error type for all firepack operations
///
/// Errors are organized by domain and carry contextual information
/// (file paths, record handles, operation names) where available.
#[derive(Error, Debug, Clone)]
pub enum FirepackError {
    #[error("I/O error: {message}{}", file_path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Io {
        message: String,
        file_path: Option<PathBuf>,
    },

    #[error("Document error ({kind}): {message}{}", handle.map(|h| format!(" [record {h}]")).unwrap_or_default())]
    Document {
        message: String,
        file_path: Option<PathBuf>,
        handle: Option<u32>,
        kind: DocumentErrorKind,
    },

    #[error("Conversion error ({kind}): {message}{}", handle.map(|h| format!(" [record {h}]")).unwrap_or_default())]
    Convert {
        message: String,
        file_path: Option<PathBuf>,
        handle: Option<u32>,
        kind: ConvertErrorKind,
    },

    #[error("Asset error ({kind}): {message}{}", uuid.as_ref().map(|u| format!(" [uuid {u}]")).unwrap_or_default())]
    Asset {
        message: String,
        uuid: Option<String>,
        kind: AssetErrorKind,
    },

    #[error("CLI error ({kind}): {message}")]
    Cli {
        message: String,
        command: Option<String>,
        kind: CliErrorKind,
    },
}

impl FirepackError {
    /// A user-facing one-line summary suitable for CLI output
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { message, file_path } => match file_path {
                Some(p) => format!("I/O failed on {}: {message}", p.display()),
                None => format!("I/O failed: {message}"),
            },
            Self::Document {
                message, file_path, ..
            } => match file_path {
                Some(p) => format!("Document {} is not convertible: {message}", p.display()),
                None => format!("Document is not convertible: {message}"),
            },
            Self::Convert {
                message, file_path, ..
            } => match file_path {
                Some(p) => format!("Conversion of {} failed: {message}", p.display()),
                None => format!("Conversion failed: {message}"),
            },
            Self::Asset { message, uuid, .. } => match uuid {
                Some(u) => format!("Asset {u} could not be resolved: {message}"),
                None => format!("Asset resolution failed: {message}"),
            },
            Self::Cli { message, .. } => format!("Command failed: {message}"),
        }
    }
}
