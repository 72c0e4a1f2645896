//! Button extraction

use crate::context::ConvertContext;
use crate::extract::sprite::SPRITE_TYPES;
use crate::extract::{Extraction, PropertyExtractor, generic_props, lookup_enum};
use firepack_document::{Document, Record};
use firepack_error::{FirepackError, Result};
use serde_json::{Map, Value, json};

const TRANSITION_COLOR: i64 = 1;
const TRANSITION_SPRITE: i64 = 2;
const TRANSITION_SCALE: i64 = 3;

/// Extractor for button nodes
///
/// A button's resting frame comes from a sprite component attached to the
/// same node. The editor can instead point the button at a separate
/// background target node; that path never executed in the source exporter
/// and stays unimplemented here.
pub struct ButtonExtractor;

impl PropertyExtractor for ButtonExtractor {
    fn name(&self) -> &'static str {
        "Button"
    }

    fn extract(
        &self,
        node: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Extraction> {
        let mut object = Map::new();
        object.insert("node".into(), json!(generic_props(node, doc, ctx)?));

        let button = doc
            .first_component_of_type(node, "cc.Button")?
            .ok_or_else(|| {
                FirepackError::convert_missing_component(
                    "button node without a cc.Button component",
                )
            })?;

        if let Some(duration) = button.f64_field("duration") {
            object.insert("duration".into(), json!(duration));
        }
        object.insert("ignoreContentAdaptWithSize".into(), json!(false));

        let sprite = doc.first_component_of_type(node, "cc.Sprite")?;
        let frame_uuid = sprite.and_then(|s| s.uuid_field("_spriteFrame"));
        if let (Some(sprite), Some(uuid)) = (sprite, frame_uuid) {
            let name = ctx.assets.resolve_sprite_frame(uuid)?.name.clone();
            object.insert("spriteFrameName".into(), json!(name));
            if let Some(trim) = sprite.bool_field("_isTrimmedMode") {
                object.insert("trimEnabled".into(), json!(trim));
            }
            let sprite_type =
                lookup_enum(SPRITE_TYPES, sprite.i64_field("_type").unwrap_or(0), "sprite type")?;
            object.insert("spriteType".into(), json!(sprite_type));
        }

        let transition = button.i64_field("transition").unwrap_or(0);
        object.insert("transition".into(), json!(transition));
        match transition {
            TRANSITION_COLOR => {
                if let Some(c) = button.rgba_field("_N$normalColor") {
                    object.insert("normalColor".into(), json!(c));
                }
                if let Some(c) = button.rgba_field("pressedColor") {
                    object.insert("pressedColor".into(), json!(c));
                }
                if let Some(c) = button.rgba_field("_N$disabledColor") {
                    object.insert("disabledColor".into(), json!(c));
                }
            }
            TRANSITION_SPRITE => {
                // pressed and disabled frames are each independently optional
                if let Some(uuid) = button.uuid_field("pressedSprite") {
                    let name = ctx.assets.resolve_sprite_frame(uuid)?.name.clone();
                    object.insert("pressedSpriteFrameName".into(), json!(name));
                }
                if let Some(uuid) = button.uuid_field("_N$disabledSprite") {
                    let name = ctx.assets.resolve_sprite_frame(uuid)?.name.clone();
                    object.insert("disabledSpriteFrameName".into(), json!(name));
                }
            }
            TRANSITION_SCALE => {
                if let Some(zoom) = button.f64_field("zoomScale") {
                    object.insert("zoomScale".into(), json!(zoom));
                }
            }
            _ => {}
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

    fn ctx_with_frames(frames: &[(&str, &str)]) -> ConvertContext {
        let mut table = AssetTable::default();
        for (uuid, name) in frames {
            table.sprite_frames.insert(
                (*uuid).into(),
                SpriteFrameMeta {
                    name: (*name).into(),
                    ..Default::default()
                },
            );
        }
        ConvertContext::new(table, Default::default(), "creator/", Default::default())
    }

    #[test]
    fn test_frame_comes_from_attached_sprite() {
        let doc = Document::from_value(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}, {"__id__": 2}]},
            {
                "__type__": "cc.Sprite",
                "_spriteFrame": {"__uuid__": "u-normal"},
                "_isTrimmedMode": true,
                "_type": 1,
            },
            {"__type__": "cc.Button", "transition": 0},
        ]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frames(&[("u-normal", "ui/btn")]);

        let out = ButtonExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert_eq!(out.object["spriteFrameName"], json!("ui/btn"));
        assert_eq!(out.object["spriteType"], json!("Sliced"));
        assert_eq!(out.object["trimEnabled"], json!(true));
        assert_eq!(out.object["ignoreContentAdaptWithSize"], json!(false));
    }

    #[test]
    fn test_color_transition_emits_state_colors() {
        let doc = Document::from_value(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            {
                "__type__": "cc.Button",
                "transition": 1,
                "_N$normalColor": {"r": 255, "g": 255, "b": 255, "a": 255},
                "pressedColor": {"r": 200, "g": 200, "b": 200, "a": 255},
                "_N$disabledColor": {"r": 120, "g": 120, "b": 120, "a": 255},
                "zoomScale": 1.2,
            },
        ]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frames(&[]);

        let out = ButtonExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert_eq!(out.object["transition"], json!(1));
        assert_eq!(out.object["pressedColor"]["r"], json!(200));
        // scale fields gated out by the transition kind
        assert!(out.object.get("zoomScale").is_none());
    }

    #[test]
    fn test_sprite_transition_frames_independently_optional() {
        let doc = Document::from_value(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            {
                "__type__": "cc.Button",
                "transition": 2,
                "pressedSprite": {"__uuid__": "u-pressed"},
            },
        ]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frames(&[("u-pressed", "ui/btn_pressed")]);

        let out = ButtonExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert_eq!(out.object["pressedSpriteFrameName"], json!("ui/btn_pressed"));
        assert!(out.object.get("disabledSpriteFrameName").is_none());
    }

    #[test]
    fn test_scale_transition_emits_zoom() {
        let doc = Document::from_value(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            {"__type__": "cc.Button", "transition": 3, "zoomScale": 1.1},
        ]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();
        let mut ctx = ctx_with_frames(&[]);

        let out = ButtonExtractor.extract(node, &doc, &mut ctx).unwrap();
        assert_eq!(out.object["zoomScale"], json!(1.1));
        assert!(out.object.get("spriteFrameName").is_none());
    }
}
