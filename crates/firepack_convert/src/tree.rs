//! Tree builder
//!
//! Recursive descent over the document: classify each node, run the matching
//! extractor, then descend into the children the extractor's policy allows.
//! The builder owns the extractor table the way the tracer in a dependency
//! walker owns its expanders; kinds without a dedicated extractor fall back
//! to the generic node record.

use crate::assets::SpriteFrameInfo;
use crate::classify::{NodeKind, classify};
use crate::context::ConvertContext;
use crate::extract::{
    ChildPolicy, NodeExtractor, PropertyExtractor, generic_props, register_default_extractors,
};
use ahash::AHashMap;
use firepack_document::{Document, Record};
use firepack_error::Result;
use log::{debug, trace, warn};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Version marker stamped on every produced tree
pub const SCHEMA_VERSION: &str = "1.0";

/// One node of the normalized output tree
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedNode {
    pub object_type: String,
    pub object: Value,
    pub children: Vec<NormalizedNode>,
}

/// The completed conversion of one document
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedTree {
    pub version: String,
    pub root: NormalizedNode,
    /// Standalone frames first resolved during this conversion, for
    /// manifest assembly by the serialization collaborator
    #[serde(rename = "spriteFrames")]
    pub sprite_frames: Vec<SpriteFrameInfo>,
}

/// Recursive scene/prefab converter with a pluggable extractor table
pub struct TreeBuilder {
    extractors: AHashMap<NodeKind, Box<dyn PropertyExtractor>>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new().with_default_extractors()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            extractors: AHashMap::new(),
        }
    }

    /// Register an extractor for a node kind, replacing any previous one
    pub fn register_extractor(&mut self, kind: NodeKind, extractor: Box<dyn PropertyExtractor>) {
        self.extractors.insert(kind, extractor);
    }

    /// Register the standard extractor set
    pub fn with_default_extractors(mut self) -> Self {
        register_default_extractors(&mut self);
        debug!("registered {} property extractors", self.extractors.len());
        self
    }

    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    /// Convert a full scene document
    pub fn convert_scene(&self, doc: &Document, ctx: &mut ConvertContext) -> Result<NormalizedTree> {
        let root_record = doc.resolve(doc.scene_root()?)?;
        let root = self.build_root(root_record, doc, ctx, "Scene")?;
        Ok(self.finish(root, ctx))
    }

    /// Convert a prefab document
    ///
    /// A prefab stores a bare fragment, so the fragment is wrapped in a
    /// synthetic container with a deterministic default transform. Downstream
    /// consumers then see the same shape for scenes and prefabs.
    pub fn convert_prefab(
        &self,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<NormalizedTree> {
        let fragment_handle = doc.prefab_root()?;
        let fragment = doc.resolve(fragment_handle)?;

        let mut fields = Map::new();
        fields.insert("_children".into(), json!([{"__id__": fragment_handle.0}]));
        fields.insert("_opacity".into(), json!(255));
        fields.insert("_color".into(), json!({"r": 255, "g": 255, "b": 255, "a": 255}));
        if let Some(size) = fragment.size_field("_contentSize") {
            fields.insert(
                "_contentSize".into(),
                json!({"width": size.w, "height": size.h}),
            );
        }
        fields.insert("_anchorPoint".into(), json!({"x": 0.5, "y": 0.5}));
        fields.insert("_position".into(), json!({"x": 0.0, "y": 0.0, "z": 0.0}));
        fields.insert("_scale".into(), json!({"x": 1.0, "y": 1.0, "z": 1.0}));
        let wrapper = Record::new("cc.Node", fields);

        let root = self.build_root(&wrapper, doc, ctx, "Prefab")?;
        Ok(self.finish(root, ctx))
    }

    fn finish(&self, root: NormalizedNode, ctx: &mut ConvertContext) -> NormalizedTree {
        NormalizedTree {
            version: SCHEMA_VERSION.to_string(),
            root,
            sprite_frames: ctx.assets.drain_new_frames(),
        }
    }

    /// Build the root node: roots bypass classification because scene and
    /// wrapper records carry no components of their own
    fn build_root(
        &self,
        record: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
        type_name: &str,
    ) -> Result<NormalizedNode> {
        let object = json!(generic_props(record, doc, ctx)?);
        let mut root = NormalizedNode {
            object_type: type_name.to_string(),
            object,
            children: Vec::new(),
        };
        self.descend(record, doc, ctx, &ChildPolicy::Recurse, &mut root.children)?;
        Ok(root)
    }

    fn build_node(
        &self,
        record: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Option<NormalizedNode>> {
        let Some(kind) = classify(record, doc)? else {
            return Ok(None);
        };

        let extractor = self
            .extractors
            .get(&kind)
            .or_else(|| self.extractors.get(&NodeKind::Node));
        let Some(extractor) = extractor else {
            warn!("no extractor registered for {kind:?} and no generic fallback");
            return Ok(None);
        };
        trace!("extracting {} node", extractor.name());

        let extraction = extractor.extract(record, doc, ctx)?;
        let mut out = NormalizedNode {
            object_type: kind.export_name().to_string(),
            object: extraction.object,
            children: Vec::new(),
        };
        self.descend(record, doc, ctx, &extraction.children, &mut out.children)?;
        Ok(Some(out))
    }

    fn descend(
        &self,
        record: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
        policy: &ChildPolicy,
        out: &mut Vec<NormalizedNode>,
    ) -> Result<()> {
        let skipped: &[firepack_document::Handle] = match policy {
            ChildPolicy::Suppress => return Ok(()),
            ChildPolicy::Recurse => &[],
            ChildPolicy::Skip(handles) => handles,
        };

        for handle in doc.children_of(record) {
            if skipped.contains(&handle) {
                continue;
            }
            let child = doc.resolve(handle)?;
            if !child.is_type("cc.Node") {
                continue;
            }
            if let Some(node) = self.build_node(child, doc, ctx)? {
                out.push(node);
                // a motion streak shares its node with another renderable
                // type, so it surfaces as an extra sibling child
                if doc.first_component_of_type(child, "cc.MotionStreak")?.is_some() {
                    out.push(NormalizedNode {
                        object_type: "MotionStreak".to_string(),
                        object: json!(generic_props(child, doc, ctx)?),
                        children: Vec::new(),
                    });
                }
            }
        }
        Ok(())
    }
}
