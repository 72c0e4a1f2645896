//! Sprite extraction

use crate::context::ConvertContext;
use crate::extract::{Extraction, PropertyExtractor, generic_props, lookup_enum};
use firepack_document::{Document, Record};
use firepack_error::Result;
use serde_json::{Map, Value, json};

pub(crate) const SPRITE_TYPES: &[&str] = &["Simple", "Sliced", "Tiled", "Filled"];
const SIZE_MODES: &[&str] = &["Custom", "Trimmed", "Raw"];
const FILL_TYPES: &[&str] = &["Horizontal", "Vertical", "Radial"];

/// Extractor for nodes rendered as sprites
///
/// A sprite component without a frame reference still yields the nested
/// `node` record, but no sprite-specific fields at all.
pub struct SpriteExtractor;

impl PropertyExtractor for SpriteExtractor {
    fn name(&self) -> &'static str {
        "Sprite"
    }

    fn extract(
        &self,
        node: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Extraction> {
        let mut object = Map::new();
        object.insert("node".into(), json!(generic_props(node, doc, ctx)?));

        let frame = doc
            .first_component_of_type(node, "cc.Sprite")?
            .and_then(|c| c.uuid_field("_spriteFrame").map(|uuid| (c, uuid)));
        if let Some((component, uuid)) = frame {
            let frame_name = ctx.assets.resolve_sprite_frame(uuid)?.name.clone();
            object.insert("spriteFrameName".into(), json!(frame_name));

            let sprite_type =
                lookup_enum(SPRITE_TYPES, component.i64_field("_type").unwrap_or(0), "sprite type")?;
            object.insert("spriteType".into(), json!(sprite_type));

            if let Some(src) = component.i64_field("_srcBlendFactor") {
                object.insert("srcBlend".into(), json!(src));
            }
            if let Some(dst) = component.i64_field("_dstBlendFactor") {
                object.insert("dstBlend".into(), json!(dst));
            }
            if let Some(trim) = component.bool_field("_isTrimmedMode") {
                object.insert("trimEnabled".into(), json!(trim));
            }
            let size_mode = lookup_enum(
                SIZE_MODES,
                component.i64_field("_sizeMode").unwrap_or(0),
                "size mode",
            )?;
            object.insert("sizeMode".into(), json!(size_mode));

            if sprite_type == "Filled" {
                let fill_type = lookup_enum(
                    FILL_TYPES,
                    component.i64_field("_fillType").unwrap_or(0),
                    "fill type",
                )?;
                object.insert("fillType".into(), json!(fill_type));
                if let Some(center) = component.vec2_field("_fillCenter") {
                    object.insert("fillCenter".into(), json!(center));
                }
                if let Some(start) = component.f64_field("_fillStart") {
                    object.insert("fillStart".into(), json!(start));
                }
                if let Some(range) = component.f64_field("_fillRange") {
                    object.insert("fillRange".into(), json!(range));
                }
            }
        }

        Ok(Extraction::new(Value::Object(object)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetTable, SpriteFrameMeta};
    use crate::context::ConvertContext;
    use firepack_document::Document;

    fn ctx_with_frame(uuid: &str, name: &str) -> ConvertContext {
        let mut table = AssetTable::default();
        table.sprite_frames.insert(
            uuid.into(),
            SpriteFrameMeta {
                name: name.into(),
                ..Default::default()
            },
        );
        ConvertContext::new(table, Default::default(), "creator/", Default::default())
    }

    fn sprite_doc(component: Value) -> Document {
        Document::from_value(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            component,
        ]))
        .unwrap()
    }

    #[test]
    fn test_filled_sprite_emits_fill_fields() {
        let doc = sprite_doc(json!({
            "__type__": "cc.Sprite",
            "_spriteFrame": {"__uuid__": "uuid-1"},
            "_type": 3,
            "_sizeMode": 1,
            "_fillType": 2,
            "_fillCenter": {"x": 0.5, "y": 0.5},
            "_fillStart": 0.0,
            "_fillRange": 1.0,
        }));
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frame("uuid-1", "ui/gauge");

        let out = SpriteExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert_eq!(out.object["spriteFrameName"], json!("ui/gauge"));
        assert_eq!(out.object["spriteType"], json!("Filled"));
        assert_eq!(out.object["sizeMode"], json!("Trimmed"));
        assert_eq!(out.object["fillType"], json!("Radial"));
        assert_eq!(out.object["fillRange"], json!(1.0));
    }

    #[test]
    fn test_simple_sprite_omits_fill_fields() {
        let doc = sprite_doc(json!({
            "__type__": "cc.Sprite",
            "_spriteFrame": {"__uuid__": "uuid-1"},
            "_type": 0,
            "_sizeMode": 0,
        }));
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frame("uuid-1", "ui/icon");

        let out = SpriteExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert_eq!(out.object["spriteType"], json!("Simple"));
        assert!(out.object.get("fillType").is_none());
    }

    #[test]
    fn test_frameless_sprite_keeps_only_node_record() {
        let doc = sprite_doc(json!({"__type__": "cc.Sprite", "_type": 0}));
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frame("unused", "unused");

        let out = SpriteExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert!(out.object.get("node").is_some());
        assert!(out.object.get("spriteFrameName").is_none());
        assert!(out.object.get("spriteType").is_none());
        assert!(out.object.get("sizeMode").is_none());
    }
}
