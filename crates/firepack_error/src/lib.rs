//! # firepack_error - Unified Error Handling
//!
//! This crate provides a unified error system for the firepack toolkit, offering:
//! - Consistent error types across all crates
//! - Rich contextual information (file paths, record handles, asset identifiers)
//! - User-friendly messages for the CLI and detailed variants for debugging
//!
//! ## Design Principles
//!
//! - **Hierarchical**: Errors are organized by domain (Document, Convert, Asset, Cli)
//! - **Contextual**: Errors carry operation context like file paths and handles
//! - **Convertible**: Seamless conversion from std error types
//!
//! ## Module Organization
//!
//! - [`types`] - Main error types and Result type alias
//! - [`kinds`] - Error kind enums for fine-grained categorization
//! - [`helpers`] - Convenient functions for creating standardized errors
//! - [`conversions`] - Type conversions and contextual methods

pub use kinds::*;
pub use types::*;

pub mod conversions;
pub mod helpers;
pub mod kinds;
pub mod types;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_creation() {
        let err = FirepackError::document("Handle 42 out of range", DocumentErrorKind::DanglingReference);
        assert!(err.is_document());
        assert_eq!(err.handle(), None);
    }

    #[test]
    fn test_error_context() {
        let err = FirepackError::convert("Sprite frame missing", ConvertErrorKind::MissingComponent)
            .with_file_path("/path/to/menu.fire")
            .with_handle(7);

        assert_eq!(err.file_path(), Some(&PathBuf::from("/path/to/menu.fire")));
        assert_eq!(err.handle(), Some(7));
    }

    #[test]
    fn test_user_message() {
        let err = FirepackError::convert_missing_font_asset("no .ttf or .fnt extension")
            .with_file_path("/path/to/hud.fire");

        let msg = err.user_message();
        assert!(msg.contains("Conversion"));
        assert!(msg.contains("hud.fire"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FirepackError = io_err.into();
        assert!(err.is_io());
    }

    #[test]
    fn test_helper_functions() {
        let err = FirepackError::document_dangling_reference("record 99 missing");
        assert!(err.is_document());

        let err = FirepackError::asset_not_found("uuid absent").with_uuid("ab12");
        assert!(err.is_asset());
        assert!(err.is_asset_not_found());

        let err = FirepackError::convert_missing_font_asset("bad extension");
        assert!(err.is_convert());
        assert!(!err.is_asset_not_found());
    }
}
