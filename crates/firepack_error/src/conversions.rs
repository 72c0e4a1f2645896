//! Error conversion implementations and contextual methods
//!
//! Conversions from standard library errors into FirepackError,
//! plus builder-style methods for attaching context and predicates for
//! checking error domains.

use crate::kinds::AssetErrorKind;
use crate::types::FirepackError;
use std::path::PathBuf;

// === From implementations ===

impl From<std::io::Error> for FirepackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
        }
    }
}

// === Contextual builder methods ===

impl FirepackError {
    /// Add file path context to any error type that carries one
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path.into()),
            Self::Document { file_path, .. } => *file_path = Some(path.into()),
            Self::Convert { file_path, .. } => *file_path = Some(path.into()),
            // Asset and CLI errors don't carry file paths
            Self::Asset { .. } | Self::Cli { .. } => {}
        }
        self
    }

    /// Add record handle context to supported error types
    pub fn with_handle(mut self, h: u32) -> Self {
        match &mut self {
            Self::Document { handle, .. } => *handle = Some(h),
            Self::Convert { handle, .. } => *handle = Some(h),
            _ => {}
        }
        self
    }

    /// Add asset identifier context to asset errors
    pub fn with_uuid<U: Into<String>>(mut self, id: U) -> Self {
        if let Self::Asset { uuid, .. } = &mut self {
            *uuid = Some(id.into());
        }
        self
    }

    /// Add command context to CLI errors
    pub fn with_command<C: Into<String>>(mut self, cmd: C) -> Self {
        if let Self::Cli { command, .. } = &mut self {
            *command = Some(cmd.into());
        }
        self
    }
}

// === Type checking methods ===

impl FirepackError {
    /// Check if this error is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this error is a document error
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document { .. })
    }

    /// Check if this error is a conversion error
    pub fn is_convert(&self) -> bool {
        matches!(self, Self::Convert { .. })
    }

    /// Check if this error is an asset error
    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset { .. })
    }

    /// Check if this error is specifically an unresolved asset identifier,
    /// the one failure animation keyframe resolution treats as skippable
    pub fn is_asset_not_found(&self) -> bool {
        matches!(
            self,
            Self::Asset {
                kind: AssetErrorKind::NotFound,
                ..
            }
        )
    }

    /// Check if this error is a CLI error
    pub fn is_cli(&self) -> bool {
        matches!(self, Self::Cli { .. })
    }
}

// === Context accessor methods ===

impl FirepackError {
    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Document { file_path, .. } => file_path.as_ref(),
            Self::Convert { file_path, .. } => file_path.as_ref(),
            Self::Asset { .. } | Self::Cli { .. } => None,
        }
    }

    /// Get the record handle associated with this error, if any
    pub fn handle(&self) -> Option<u32> {
        match self {
            Self::Document { handle, .. } => *handle,
            Self::Convert { handle, .. } => *handle,
            _ => None,
        }
    }
}
