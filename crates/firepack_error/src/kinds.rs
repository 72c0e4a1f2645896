//! Error kind enums for different operation domains
//!
//! This module contains the specific error kind enums that categorize
//! errors within each domain (Document, Convert, Asset, Cli). These provide
//! fine-grained error classification for programmatic handling.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Specific kinds of document errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DocumentErrorKind {
    #[error("Invalid document structure")]
    InvalidDocument,
    #[error("Handle does not resolve to a record")]
    DanglingReference,
    #[error("Record has an unexpected shape")]
    InvalidRecord,
    #[error("Required field is missing")]
    MissingField,
    #[error("No scene or prefab root found")]
    NoRootFound,
}

/// Specific kinds of conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConvertErrorKind {
    #[error("Required component is missing")]
    MissingComponent,
    #[error("Font asset has no usable technology")]
    MissingFontAsset,
    #[error("Animation curve data is malformed")]
    MalformedCurveData,
    #[error("Animation clip source not found")]
    ClipNotFound,
    #[error("Enumerated index out of range")]
    InvalidEnumIndex,
}

/// Specific kinds of asset resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssetErrorKind {
    #[error("Asset identifier not found in metadata table")]
    NotFound,
    #[error("Asset metadata is invalid")]
    InvalidMetadata,
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Invalid command arguments")]
    InvalidArguments,
    #[error("Missing required argument")]
    MissingArgument,
    #[error("Command execution failed")]
    ExecutionFailed,
}
