//! ProgressBar extraction
//!
//! A progress bar has two visual layers: a background sprite on the node
//! itself and a fill sprite living on a child node. The fill child's
//! transform, size, and anchor are captured into bar-specific fields and the
//! child itself is dropped from recursion, so it never appears twice.
//!
//! Frame paths here are root-prefixed only for standalone images; an
//! atlas-packed frame keeps its logical name because the runtime resolves it
//! through its own atlas index.

use crate::context::ConvertContext;
use crate::extract::{ChildPolicy, Extraction, PropertyExtractor, generic_props};
use firepack_document::{Document, Record, Size, Vec2};
use firepack_error::{FirepackError, Result};
use serde_json::{Map, Value, json};

pub struct ProgressBarExtractor;

impl PropertyExtractor for ProgressBarExtractor {
    fn name(&self) -> &'static str {
        "ProgressBar"
    }

    fn extract(
        &self,
        node: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Extraction> {
        let mut object = Map::new();
        object.insert("node".into(), json!(generic_props(node, doc, ctx)?));

        if let Some(background) = doc.first_component_of_type(node, "cc.Sprite")? {
            if let Some(uuid) = background.uuid_field("_spriteFrame") {
                let path = ctx.assets.resolve_sprite_frame(uuid)?.path.clone();
                object.insert("backgroundSpriteFrameName".into(), json!(path));
            }
        }

        let bar = doc
            .first_component_of_type(node, "cc.ProgressBar")?
            .ok_or_else(|| {
                FirepackError::convert_missing_component(
                    "progress bar node without a cc.ProgressBar component",
                )
            })?;

        object.insert(
            "percent".into(),
            json!(bar.f64_field("_N$progress").unwrap_or(0.0) * 100.0),
        );

        let mut children = ChildPolicy::Recurse;
        if let Some(sprite_handle) = bar.handle_field("_N$barSprite") {
            let bar_sprite = doc.resolve(sprite_handle)?;
            let uuid = bar_sprite.uuid_field("_spriteFrame").ok_or_else(|| {
                FirepackError::convert_missing_component("bar sprite carries no frame reference")
            })?;
            let bar_node_handle = bar_sprite.handle_field("node").ok_or_else(|| {
                FirepackError::convert_missing_component("bar sprite names no owning node")
            })?;
            let bar_node = doc.resolve(bar_node_handle)?;

            let path = ctx.assets.resolve_sprite_frame(uuid)?.path.clone();
            object.insert("barSpriteFrameName".into(), json!(path));
            object.insert(
                "barPosition".into(),
                json!(bar_node.vec2_field("_position").unwrap_or(Vec2::ZERO)),
            );
            let bar_height = bar_node
                .size_field("_contentSize")
                .map(|s| s.h)
                .unwrap_or(0.0);
            object.insert(
                "barContentSize".into(),
                json!(Size::new(
                    bar.f64_field("_N$totalLength").unwrap_or(0.0),
                    bar_height,
                )),
            );
            object.insert(
                "barAnchorPoint".into(),
                json!(bar_node.vec2_field("_anchorPoint").unwrap_or(Vec2::ZERO)),
            );
            object.insert(
                "barSpriteType".into(),
                json!(bar_sprite.i64_field("_type").unwrap_or(0)),
            );

            // the fill visual lives on in the bar fields, not as a child
            children = ChildPolicy::Skip(vec![bar_node_handle]);
        }

        if let Some(reverse) = bar.bool_field("_N$reverse") {
            object.insert("reverse".into(), json!(reverse));
        }

        Ok(Extraction::new(Value::Object(object)).with_children(children))
    }
}
