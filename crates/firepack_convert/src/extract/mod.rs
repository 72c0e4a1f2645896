//! Per-type property extraction
//!
//! Each classified node type has an extractor that turns the node record plus
//! its resolved components into the normalized property object. Every
//! extractor first runs the generic node extraction and nests it under a
//! `node` key, then adds its own fields as siblings. Extractors are
//! registered in a per-builder table keyed by [`NodeKind`].

use crate::classify::NodeKind;
use crate::context::ConvertContext;
use crate::tree::TreeBuilder;
use firepack_document::{Document, Handle, Record};
use firepack_error::{ConvertErrorKind, FirepackError, Result};
use serde_json::Value;

mod button;
mod editbox;
mod label;
mod layout;
mod node;
mod progress_bar;
mod sprite;

pub use button::ButtonExtractor;
pub use editbox::EditBoxExtractor;
pub use label::LabelExtractor;
pub use layout::LayoutExtractor;
pub use node::{NodeExtractor, generic_props};
pub use progress_bar::ProgressBarExtractor;
pub use sprite::SpriteExtractor;

/// How the tree builder should treat the node's children after extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildPolicy {
    /// Descend into every child handle
    Recurse,
    /// Do not descend at all; the children are internal decoration
    Suppress,
    /// Descend, but leave out the named children
    Skip(Vec<Handle>),
}

/// Result of extracting one node
#[derive(Debug, Clone)]
pub struct Extraction {
    pub object: Value,
    pub children: ChildPolicy,
}

impl Extraction {
    pub fn new(object: Value) -> Self {
        Extraction {
            object,
            children: ChildPolicy::Recurse,
        }
    }

    pub fn with_children(mut self, children: ChildPolicy) -> Self {
        self.children = children;
        self
    }
}

/// A per-type property extractor
pub trait PropertyExtractor {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn extract(
        &self,
        node: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Extraction>;
}

/// Register all standard extractors on a tree builder
pub fn register_default_extractors(builder: &mut TreeBuilder) {
    builder.register_extractor(NodeKind::Node, Box::new(NodeExtractor));
    builder.register_extractor(NodeKind::Sprite, Box::new(SpriteExtractor));
    builder.register_extractor(NodeKind::Button, Box::new(ButtonExtractor));
    builder.register_extractor(NodeKind::Label, Box::new(LabelExtractor));
    builder.register_extractor(NodeKind::EditBox, Box::new(EditBoxExtractor));
    builder.register_extractor(NodeKind::Layout, Box::new(LayoutExtractor));
    builder.register_extractor(NodeKind::ProgressBar, Box::new(ProgressBarExtractor));
}

/// Translate a stored enum ordinal through a name table
pub(crate) fn lookup_enum(table: &[&'static str], index: i64, what: &str) -> Result<&'static str> {
    usize::try_from(index)
        .ok()
        .and_then(|i| table.get(i).copied())
        .ok_or_else(|| {
            FirepackError::convert(
                format!("{what} index {index} out of range (0..{})", table.len()),
                ConvertErrorKind::InvalidEnumIndex,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_enum_in_and_out_of_range() {
        const TABLE: &[&str] = &["Simple", "Sliced"];
        assert_eq!(lookup_enum(TABLE, 1, "sprite type").unwrap(), "Sliced");
        assert!(lookup_enum(TABLE, 2, "sprite type").is_err());
        assert!(lookup_enum(TABLE, -1, "sprite type").is_err());
    }
}
