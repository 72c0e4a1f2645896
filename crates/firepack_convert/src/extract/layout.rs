//! Layout extraction
//!
//! Layout fields stay as raw enum ordinals. The runtime consumer indexes its
//! own tables with them, so translating to names here would only be undone.

use crate::context::ConvertContext;
use crate::extract::{Extraction, PropertyExtractor, generic_props};
use firepack_document::{Document, Record};
use firepack_error::{FirepackError, Result};
use serde_json::{Map, Value, json};

pub struct LayoutExtractor;

impl PropertyExtractor for LayoutExtractor {
    fn name(&self) -> &'static str {
        "Layout"
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
            .first_component_of_type(node, "cc.Layout")?
            .ok_or_else(|| {
                FirepackError::convert_missing_component(
                    "layout node without a cc.Layout component",
                )
            })?;

        let int = |name: &str| component.i64_field(name).unwrap_or(0);
        let num = |name: &str| component.f64_field(name).unwrap_or(0.0);

        object.insert("layoutType".into(), json!(int("_N$layoutType")));
        object.insert("resizeMode".into(), json!(int("_resize")));
        object.insert("spacingX".into(), json!(num("_N$spacingX")));
        object.insert("spacingY".into(), json!(num("_N$spacingY")));
        object.insert(
            "affectedByScale".into(),
            json!(component.bool_field("_N$affectedByScale").unwrap_or(false)),
        );

        object.insert("axisDirection".into(), json!(int("_N$startAxis")));
        object.insert("paddingLeft".into(), json!(num("_N$paddingLeft")));
        object.insert("paddingRight".into(), json!(num("_N$paddingRight")));
        object.insert("paddingTop".into(), json!(num("_N$paddingTop")));
        object.insert("paddingBottom".into(), json!(num("_N$paddingBottom")));
        if let Some(cell) = component.size_field("_N$cellSize") {
            object.insert("cellSize".into(), json!(cell));
        }

        object.insert("verticalDirection".into(), json!(int("_N$verticalDirection")));
        object.insert(
            "horizontalDirection".into(),
            json!(int("_N$horizontalDirection")),
        );

        Ok(Extraction::new(Value::Object(object)))
    }
}
