//! Helper functions for creating standardized errors
//!
//! Convenient constructors that keep error creation uniform across the
//! firepack crates instead of building enum variants by hand at every site.

use crate::kinds::*;
use crate::types::FirepackError;
use std::path::PathBuf;

impl FirepackError {
    /// Create a new I/O error
    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io {
            message: message.into(),
            file_path: None,
        }
    }

    /// Create a new I/O error with file path context
    pub fn io_with_path<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::Io {
            message: message.into(),
            file_path: Some(path.into()),
        }
    }

    /// Create a new document error
    pub fn document<M: Into<String>>(message: M, kind: DocumentErrorKind) -> Self {
        Self::Document {
            message: message.into(),
            file_path: None,
            handle: None,
            kind,
        }
    }

    /// Create a new conversion error
    pub fn convert<M: Into<String>>(message: M, kind: ConvertErrorKind) -> Self {
        Self::Convert {
            message: message.into(),
            file_path: None,
            handle: None,
            kind,
        }
    }

    /// Create a new asset error
    pub fn asset<M: Into<String>>(message: M, kind: AssetErrorKind) -> Self {
        Self::Asset {
            message: message.into(),
            uuid: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            command: None,
            kind,
        }
    }

    // === Document domain helpers ===

    /// Create a document error for handles that resolve to nothing
    pub fn document_dangling_reference<M: Into<String>>(message: M) -> Self {
        Self::document(message, DocumentErrorKind::DanglingReference)
    }

    /// Create a document error for records with unexpected shapes
    pub fn document_invalid_record<M: Into<String>>(message: M) -> Self {
        Self::document(message, DocumentErrorKind::InvalidRecord)
    }

    /// Create a document error for missing scene/prefab roots
    pub fn document_no_root<M: Into<String>>(message: M) -> Self {
        Self::document(message, DocumentErrorKind::NoRootFound)
    }

    // === Convert domain helpers ===

    /// Create a conversion error for missing required components
    pub fn convert_missing_component<M: Into<String>>(message: M) -> Self {
        Self::convert(message, ConvertErrorKind::MissingComponent)
    }

    /// Create a conversion error for fonts with no usable technology
    pub fn convert_missing_font_asset<M: Into<String>>(message: M) -> Self {
        Self::convert(message, ConvertErrorKind::MissingFontAsset)
    }

    /// Create a conversion error for malformed animation curve data
    pub fn convert_malformed_curve<M: Into<String>>(message: M) -> Self {
        Self::convert(message, ConvertErrorKind::MalformedCurveData)
    }

    // === Asset domain helpers ===

    /// Create an asset error for identifiers missing from the metadata table
    pub fn asset_not_found<M: Into<String>>(message: M) -> Self {
        Self::asset(message, AssetErrorKind::NotFound)
    }
}
