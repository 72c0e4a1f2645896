//! The read-only document view: parsing, handle resolution, component access

use crate::index::{TypeIndex, build_type_index};
use crate::record::{Handle, Record};
use firepack_error::{DocumentErrorKind, FirepackError, Result};
use log::{debug, trace};
use serde_json::Value;
use std::path::Path;

/// A fully parsed scene/prefab document
///
/// Wraps the flattened record array and resolves integer handles to records.
/// The document is immutable for its whole lifetime; every accessor takes
/// `&self` and conversion never mutates it.
pub struct Document {
    records: Vec<Record>,
    type_index: TypeIndex,
}

impl Document {
    /// Parse a document from an already-deserialized JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(FirepackError::document(
                "expected a top-level record array",
                DocumentErrorKind::InvalidDocument,
            ));
        };

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let Value::Object(mut fields) = item else {
                return Err(FirepackError::document_invalid_record(format!(
                    "record {i} is not an object"
                ))
                .with_handle(i as u32));
            };
            let type_tag = match fields.remove("__type__") {
                Some(Value::String(tag)) => tag,
                _ => {
                    return Err(FirepackError::document_invalid_record(format!(
                        "record {i} has no __type__ tag"
                    ))
                    .with_handle(i as u32));
                }
            };
            trace!("record {i}: {type_tag}");
            records.push(Record::new(type_tag, fields));
        }

        let type_index = build_type_index(&records);
        debug!(
            "parsed document: {} records, {} distinct types",
            records.len(),
            type_index.len()
        );

        Ok(Document {
            records,
            type_index,
        })
    }

    pub fn from_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            FirepackError::document(e.to_string(), DocumentErrorKind::InvalidDocument)
        })?;
        Self::from_value(value)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            FirepackError::document(e.to_string(), DocumentErrorKind::InvalidDocument)
        })?;
        Self::from_value(value)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FirepackError::io_with_path(e.to_string(), path))?;
        Self::from_str(&text).map_err(|e| e.with_file_path(path))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a handle to its record, failing on out-of-range handles
    pub fn resolve(&self, handle: Handle) -> Result<&Record> {
        self.records.get(handle.index()).ok_or_else(|| {
            FirepackError::document_dangling_reference(format!(
                "handle {handle} out of range (document has {} records)",
                self.records.len()
            ))
            .with_handle(handle.0)
        })
    }

    /// All handles of records carrying the given type tag, in document order
    pub fn records_of_type(&self, tag: &str) -> Vec<Handle> {
        self.type_index
            .get(tag)
            .map(|idxs| idxs.iter().map(|&i| Handle(i as u32)).collect())
            .unwrap_or_default()
    }

    /// Per-type record counts, for diagnostics
    pub fn type_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .type_index
            .iter()
            .map(|(tag, idxs)| (tag.as_str(), idxs.len()))
            .collect();
        counts.sort();
        counts
    }

    /// A node's attached components in their stored order
    pub fn components_of(&self, node: &Record) -> Result<Vec<&Record>> {
        node.handle_list_field("_components")
            .into_iter()
            .map(|h| self.resolve(h))
            .collect()
    }

    /// Attached components filtered by type tag, preserving order
    ///
    /// Matches either the record's own tag or its `componentType` field, the
    /// latter covering custom script components.
    pub fn components_of_type<'a>(&'a self, node: &Record, tag: &str) -> Result<Vec<&'a Record>> {
        Ok(self
            .components_of(node)?
            .into_iter()
            .filter(|c| c.is_type(tag) || c.str_field("componentType") == Some(tag))
            .collect())
    }

    /// First attached component with the given tag, or `None`
    pub fn first_component_of_type<'a>(
        &'a self,
        node: &Record,
        tag: &str,
    ) -> Result<Option<&'a Record>> {
        Ok(self.components_of_type(node, tag)?.into_iter().next())
    }

    /// A node's ordered child handles
    pub fn children_of(&self, node: &Record) -> Vec<Handle> {
        node.handle_list_field("_children")
    }

    /// The scene root node handle of a full scene document
    ///
    /// Scene documents start with a `cc.SceneAsset` record whose `scene`
    /// field references the `cc.Scene` node; older exports may lack the
    /// asset wrapper, so the first `cc.Scene` record is the fallback.
    pub fn scene_root(&self) -> Result<Handle> {
        if let Some(&asset_idx) = self.type_index.get("cc.SceneAsset").and_then(|v| v.first()) {
            let asset = &self.records[asset_idx];
            if let Some(scene) = asset.handle_field("scene") {
                return Ok(scene);
            }
        }
        self.records_of_type("cc.Scene")
            .first()
            .copied()
            .ok_or_else(|| FirepackError::document_no_root("document contains no cc.Scene record"))
    }

    /// The embedded fragment root of a prefab document
    pub fn prefab_root(&self) -> Result<Handle> {
        let prefab_handle = self
            .records_of_type("cc.Prefab")
            .first()
            .copied()
            .ok_or_else(|| {
                FirepackError::document_no_root("document contains no cc.Prefab record")
            })?;
        let prefab = self.resolve(prefab_handle)?;
        prefab.handle_field("data").ok_or_else(|| {
            FirepackError::document(
                "cc.Prefab record has no data reference",
                DocumentErrorKind::MissingField,
            )
            .with_handle(prefab_handle.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        Document::from_value(v).expect("fixture must parse")
    }

    #[test]
    fn test_resolve_and_dangling() {
        let d = doc(json!([
            {"__type__": "cc.SceneAsset", "scene": {"__id__": 1}},
            {"__type__": "cc.Scene", "_children": []},
        ]));

        assert_eq!(d.len(), 2);
        assert!(d.resolve(Handle(1)).is_ok());

        let err = d.resolve(Handle(9)).unwrap_err();
        assert!(err.is_document());
        assert_eq!(err.handle(), Some(9));
    }

    #[test]
    fn test_component_access_preserves_order() {
        let d = doc(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}, {"__id__": 2}, {"__id__": 3}]},
            {"__type__": "cc.Sprite"},
            {"__type__": "cc.Button"},
            {"__type__": "cc.Sprite"},
        ]));

        let node = d.resolve(Handle(0)).unwrap();
        let comps = d.components_of(node).unwrap();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].type_tag(), "cc.Sprite");
        assert_eq!(comps[1].type_tag(), "cc.Button");

        let sprites = d.components_of_type(node, "cc.Sprite").unwrap();
        assert_eq!(sprites.len(), 2);

        let first = d.first_component_of_type(node, "cc.Button").unwrap();
        assert!(first.is_some());
        assert!(
            d.first_component_of_type(node, "cc.Label")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_custom_component_type_match() {
        let d = doc(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            {"__type__": "ab123script", "componentType": "DynamicScrollView"},
        ]));

        let node = d.resolve(Handle(0)).unwrap();
        let found = d
            .first_component_of_type(node, "DynamicScrollView")
            .unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn test_scene_root_discovery() {
        let d = doc(json!([
            {"__type__": "cc.SceneAsset", "scene": {"__id__": 1}},
            {"__type__": "cc.Scene", "_children": []},
        ]));
        assert_eq!(d.scene_root().unwrap(), Handle(1));

        // no asset wrapper: first cc.Scene wins
        let d = doc(json!([{"__type__": "cc.Scene", "_children": []}]));
        assert_eq!(d.scene_root().unwrap(), Handle(0));

        let d = doc(json!([{"__type__": "cc.Node"}]));
        assert!(d.scene_root().is_err());
    }

    #[test]
    fn test_prefab_root_discovery() {
        let d = doc(json!([
            {"__type__": "cc.Prefab", "data": {"__id__": 1}},
            {"__type__": "cc.Node", "_name": "fragment"},
        ]));
        assert_eq!(d.prefab_root().unwrap(), Handle(1));
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(Document::from_value(json!({"not": "an array"})).is_err());
        assert!(Document::from_value(json!([{"no_type_tag": 1}])).is_err());
        assert!(Document::from_str("not json at all").is_err());
    }
}
