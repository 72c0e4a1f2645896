//! Label extraction

use crate::assets::FontTechnology;
use crate::context::ConvertContext;
use crate::extract::{Extraction, PropertyExtractor, generic_props, lookup_enum};
use firepack_document::{Document, Record};
use firepack_error::{FirepackError, Result};
use serde_json::{Map, Value, json};

pub(crate) const H_ALIGNMENTS: &[&str] = &["Left", "Center", "Right"];
pub(crate) const V_ALIGNMENTS: &[&str] = &["Top", "Center", "Bottom"];
const OVERFLOW_TYPES: &[&str] = &["None", "Clamp", "Shrink", "ResizeHeight"];

/// Extractor for text labels
///
/// Font technology comes from the resolved file extension. Bitmap fonts
/// carry explicit glyph metrics, so they also emit the point size and line
/// height; TrueType rendering derives both from the face itself.
pub struct LabelExtractor;

impl PropertyExtractor for LabelExtractor {
    fn name(&self) -> &'static str {
        "Label"
    }

    fn extract(
        &self,
        node: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Extraction> {
        let mut object = Map::new();
        object.insert("node".into(), json!(generic_props(node, doc, ctx)?));

        let component = doc
            .first_component_of_type(node, "cc.Label")?
            .ok_or_else(|| {
                FirepackError::convert_missing_component("label node without a cc.Label component")
            })?;

        if let Some(size) = component.f64_field("_fontSize") {
            object.insert("fontSize".into(), json!(size));
        }
        if let Some(text) = component.str_field("_N$string") {
            object.insert("labelText".into(), json!(text));
        }

        if let Some(outline) = doc.first_component_of_type(node, "cc.LabelOutline")? {
            object.insert(
                "outline".into(),
                json!({
                    "color": outline.rgba_field("_color"),
                    "width": outline.f64_field("_width"),
                }),
            );
        }
        if let Some(shadow) = doc.first_component_of_type(node, "cc.LabelShadow")? {
            object.insert(
                "shadow".into(),
                json!({
                    "color": shadow.rgba_field("_color"),
                    "offset": shadow.vec2_field("_offset"),
                    "blurRadius": shadow.f64_field("_blur"),
                }),
            );
        }

        let h_align = component.i64_field("_N$horizontalAlign").unwrap_or(0);
        let v_align = component.i64_field("_N$verticalAlign").unwrap_or(0);
        let overflow = component.i64_field("_N$overflow").unwrap_or(0);
        object.insert(
            "horizontalAlignment".into(),
            json!(lookup_enum(H_ALIGNMENTS, h_align, "horizontal alignment")?),
        );
        object.insert(
            "verticalAlignment".into(),
            json!(lookup_enum(V_ALIGNMENTS, v_align, "vertical alignment")?),
        );
        object.insert(
            "overflowType".into(),
            json!(lookup_enum(OVERFLOW_TYPES, overflow, "overflow type")?),
        );
        if let Some(wrap) = component.bool_field("_enableWrapText") {
            object.insert("enableWrap".into(), json!(wrap));
        }

        if component.bool_field("_isSystemFontUsed").unwrap_or(false) {
            object.insert("fontType".into(), json!("System"));
            object.insert("fontName".into(), json!("arial"));
        } else {
            let uuid = component.uuid_field("_N$file").ok_or_else(|| {
                FirepackError::convert_missing_component("label uses a file font but names none")
            })?;
            let font = ctx.assets.resolve_font(uuid)?;
            object.insert(
                "fontName".into(),
                json!(format!("{}{}", ctx.asset_root, font.path)),
            );
            match font.technology {
                FontTechnology::Ttf => {
                    object.insert("fontType".into(), json!("TTF"));
                }
                FontTechnology::Bitmap => {
                    object.insert("fontType".into(), json!("BMFont"));
                    if let Some(height) = component.f64_field("_lineHeight") {
                        object.insert("lineHeight".into(), json!(height));
                    }
                }
            }
        }

        Ok(Extraction::new(Value::Object(object)))
    }
}
