//! EditBox extraction
//!
//! The editor materializes an edit box as a parent plus reserved children
//! named `TEXT_LABEL` and `PLACEHOLDER_LABEL`. Those children exist only to
//! carry font and placeholder state, so this extractor folds their fields
//! into the edit box record and suppresses child recursion entirely.

use crate::context::ConvertContext;
use crate::extract::label::{H_ALIGNMENTS, V_ALIGNMENTS};
use crate::extract::{ChildPolicy, Extraction, PropertyExtractor, generic_props, lookup_enum};
use firepack_document::{Document, Record};
use firepack_error::{FirepackError, Result};
use log::warn;
use serde_json::{Map, Value, json};

const INPUT_MODES: &[&str] = &[
    "Any",
    "EmailAddress",
    "Numeric",
    "PhoneNumber",
    "URL",
    "Decime",
    "SingleLine",
];
const INPUT_FLAGS: &[&str] = &[
    "Password",
    "Sensitive",
    "InitialCapsWord",
    "InitialCapsSentence",
    "InitialCapsAllCharacters",
    "LowercaseAllCharacters",
];
const RETURN_TYPES: &[&str] = &["Default", "Done", "Send", "Search", "Go"];

const TEXT_LABEL: &str = "TEXT_LABEL";
const PLACEHOLDER_LABEL: &str = "PLACEHOLDER_LABEL";

pub struct EditBoxExtractor;

impl PropertyExtractor for EditBoxExtractor {
    fn name(&self) -> &'static str {
        "EditBox"
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
            .first_component_of_type(node, "cc.EditBox")?
            .ok_or_else(|| {
                FirepackError::convert_missing_component(
                    "edit box node without a cc.EditBox component",
                )
            })?;

        // the runtime cannot render an edit box without a background image;
        // an empty string is emitted rather than omitting the field
        match component.uuid_field("_N$backgroundImage") {
            Some(uuid) => {
                let name = ctx.assets.resolve_sprite_frame(uuid)?.name.clone();
                object.insert("backgroundImage".into(), json!(name));
            }
            None => {
                warn!("edit box has no background image; the runtime requires one");
                object.insert("backgroundImage".into(), json!(""));
            }
        }

        for handle in doc.children_of(node) {
            let child = doc.resolve(handle)?;
            match child.str_field("_name") {
                Some(TEXT_LABEL) => {
                    if let Some(label) = doc.first_component_of_type(child, "cc.Label")? {
                        let h = label.i64_field("_N$horizontalAlign").unwrap_or(0);
                        let v = label.i64_field("_N$verticalAlign").unwrap_or(0);
                        object.insert(
                            "horizontalAlignment".into(),
                            json!(lookup_enum(H_ALIGNMENTS, h, "horizontal alignment")?),
                        );
                        object.insert(
                            "verticalAlignment".into(),
                            json!(lookup_enum(V_ALIGNMENTS, v, "vertical alignment")?),
                        );
                        if let Some(size) = label.f64_field("_fontSize") {
                            object.insert("fontSize".into(), json!(size));
                        }
                    }
                    if let Some(color) = child.rgb_field("_color") {
                        object.insert("fontColor".into(), json!(color));
                    }
                }
                Some(PLACEHOLDER_LABEL) => {
                    if let Some(label) = doc.first_component_of_type(child, "cc.Label")? {
                        if let Some(text) = label.str_field("_string") {
                            object.insert("placeholder".into(), json!(text));
                        }
                        if let Some(size) = label.f64_field("_fontSize") {
                            object.insert("placeholderFontSize".into(), json!(size));
                        }
                    }
                    if let Some(color) = child.rgb_field("_color") {
                        object.insert("placeholderFontColor".into(), json!(color));
                    }
                }
                _ => {}
            }
        }

        let return_type = component.i64_field("returnType").unwrap_or(0);
        let input_flag = component.i64_field("_N$inputFlag").unwrap_or(0);
        let input_mode = component.i64_field("_N$inputMode").unwrap_or(0);
        object.insert(
            "returnType".into(),
            json!(lookup_enum(RETURN_TYPES, return_type, "return type")?),
        );
        object.insert(
            "inputFlag".into(),
            json!(lookup_enum(INPUT_FLAGS, input_flag, "input flag")?),
        );
        object.insert(
            "inputMode".into(),
            json!(lookup_enum(INPUT_MODES, input_mode, "input mode")?),
        );
        if let Some(max) = component.i64_field("maxLength") {
            object.insert("maxLength".into(), json!(max));
        }
        if let Some(text) = component.str_field("_string") {
            object.insert("text".into(), json!(text));
        }

        Ok(Extraction::new(Value::Object(object)).with_children(ChildPolicy::Suppress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetTable, SpriteFrameMeta};
    use crate::context::ConvertContext;
    use firepack_document::Document;

    fn editbox_doc() -> Document {
        Document::from_value(json!([
            {
                "__type__": "cc.Node",
                "_components": [{"__id__": 1}],
                "_children": [{"__id__": 2}, {"__id__": 4}],
            },
            {
                "__type__": "cc.EditBox",
                "_N$backgroundImage": {"__uuid__": "u-bg"},
                "returnType": 1,
                "_N$inputFlag": 1,
                "_N$inputMode": 6,
                "maxLength": 12,
                "_string": "typed",
            },
            {
                "__type__": "cc.Node",
                "_name": "TEXT_LABEL",
                "_color": {"r": 10, "g": 20, "b": 30},
                "_components": [{"__id__": 3}],
            },
            {
                "__type__": "cc.Label",
                "_N$horizontalAlign": 0,
                "_N$verticalAlign": 1,
                "_fontSize": 20.0,
            },
            {
                "__type__": "cc.Node",
                "_name": "PLACEHOLDER_LABEL",
                "_color": {"r": 90, "g": 90, "b": 90},
                "_components": [{"__id__": 5}],
            },
            {
                "__type__": "cc.Label",
                "_string": "enter name",
                "_fontSize": 18.0,
            },
        ]))
        .unwrap()
    }

    fn ctx() -> ConvertContext {
        let mut table = AssetTable::default();
        table.sprite_frames.insert(
            "u-bg".into(),
            SpriteFrameMeta {
                name: "ui/editbox_bg".into(),
                ..Default::default()
            },
        );
        ConvertContext::new(table, Default::default(), "creator/", Default::default())
    }

    #[test]
    fn test_reserved_children_fold_into_fields() {
        let doc = editbox_doc();
        let node = doc.resolve(0.into()).unwrap();

        let out = EditBoxExtractor.extract(node, &doc, &mut ctx()).unwrap();
        assert_eq!(out.object["backgroundImage"], json!("ui/editbox_bg"));
        assert_eq!(out.object["fontSize"], json!(20.0));
        assert_eq!(out.object["fontColor"]["b"], json!(30));
        assert_eq!(out.object["placeholder"], json!("enter name"));
        assert_eq!(out.object["placeholderFontSize"], json!(18.0));
        assert_eq!(out.object["placeholderFontColor"]["r"], json!(90));
        assert_eq!(out.object["returnType"], json!("Done"));
        assert_eq!(out.object["inputFlag"], json!("Sensitive"));
        assert_eq!(out.object["inputMode"], json!("SingleLine"));
        assert_eq!(out.object["text"], json!("typed"));
    }

    #[test]
    fn test_children_are_suppressed() {
        let doc = editbox_doc();
        let node = doc.resolve(0.into()).unwrap();

        let out = EditBoxExtractor.extract(node, &doc, &mut ctx()).unwrap();
        assert_eq!(out.children, ChildPolicy::Suppress);
    }

    #[test]
    fn test_missing_background_emits_empty_string() {
        let doc = Document::from_value(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            {
                "__type__": "cc.EditBox",
                "returnType": 0,
                "_N$inputFlag": 0,
                "_N$inputMode": 0,
            },
        ]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();

        let out = EditBoxExtractor.extract(node, &doc, &mut ctx()).unwrap();
        assert_eq!(out.object["backgroundImage"], json!(""));
    }
}
