//! Generic node extraction
//!
//! Every node, whatever its classified type, carries the same transform,
//! visibility, tint, and ordering state. [`generic_props`] pulls those into
//! a [`NodeProps`] record, together with attached colliders, the optional
//! layout widget, and the animation block. Typed extractors nest this record
//! under a `node` key and add their own fields next to it.

use crate::animation::{AnimationBlock, extract_animation};
use crate::context::ConvertContext;
use crate::extract::{Extraction, PropertyExtractor};
use firepack_document::{Document, Record, Rgb, Size, Vec2, Vec3};
use firepack_error::Result;
use serde::Serialize;
use serde_json::json;

/// Properties shared by every node type
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_point: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade_opacity_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_z_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_z_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_modify_rgb: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_skew_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_skew_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_index: Option<i64>,
    pub colliders: Vec<ColliderInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anim: Option<AnimationBlock>,
}

/// A collider attached to a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ColliderInfo {
    Box { offset: Vec2, size: Size },
    Circle { offset: Vec2, radius: f64 },
    Polygon { offset: Vec2, points: Vec<Vec2> },
}

/// Layout-widget alignment state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInfo {
    pub align_flags: i64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub vertical_center: f64,
    pub horizontal_center: f64,
}

const COLLIDER_TAGS: &[&str] = &["cc.BoxCollider", "cc.CircleCollider", "cc.PolygonCollider"];

/// Extract the generic property record of one node
pub fn generic_props(
    node: &Record,
    doc: &Document,
    ctx: &mut ConvertContext,
) -> Result<NodeProps> {
    let mut props = NodeProps::default();

    // editor 2.2+ packs the transform into a flat ten-element array;
    // synthesized wrapper records still carry the older split fields
    if let Some(trs) = node.trs_array().filter(|a| a.len() >= 10) {
        props.position = Some(Vec3::new(trs[0], trs[1], trs[2]));
        props.scale_x = Some(trs[7]);
        props.scale_y = Some(trs[8]);
    } else {
        props.position = node.vec3_field("_position");
        if let Some(scale) = node.vec3_field("_scale") {
            props.scale_x = Some(scale.x);
            props.scale_y = Some(scale.y);
        }
    }

    props.content_size = node.size_field("_contentSize");
    props.enabled = node.bool_field("_active");
    props.name = node.str_field("_name").map(str::to_string);
    props.anchor_point = node.vec2_field("_anchorPoint");
    props.cascade_opacity_enabled = node.bool_field("_cascadeOpacityEnabled");
    props.color = node.rgb_field("_color");
    props.global_z_order = node.i64_field("_globalZOrder");
    props.local_z_order = node.i64_field("_localZOrder");
    props.opacity = node.i64_field("_opacity");
    props.opacity_modify_rgb = node.bool_field("_opacityModifyRGB");
    props.skew_x = node.f64_field("_skewX");
    props.skew_y = node.f64_field("_skewY");
    props.tag = node.i64_field("_tag");
    props.group_index = node.i64_field("groupIndex");

    // z rotation decomposed into the two skew angles of a 2D runtime
    if let Some(euler) = node.vec3_field("_eulerAngles") {
        props.rotation_skew_x = Some(-euler.z);
        props.rotation_skew_y = Some(-euler.z);
    }

    props.colliders = extract_colliders(node, doc)?;
    props.widget = extract_widget(node, doc)?;

    if let Some(anim) = doc.first_component_of_type(node, "cc.Animation")? {
        props.anim = Some(extract_animation(anim, ctx)?);
    }

    Ok(props)
}

fn extract_colliders(node: &Record, doc: &Document) -> Result<Vec<ColliderInfo>> {
    let mut colliders = Vec::new();
    for tag in COLLIDER_TAGS {
        for component in doc.components_of_type(node, tag)? {
            let offset = component.vec2_field("_offset").unwrap_or(Vec2::ZERO);
            let info = match *tag {
                "cc.BoxCollider" => ColliderInfo::Box {
                    offset,
                    size: component.size_field("_size").unwrap_or(Size::new(0.0, 0.0)),
                },
                "cc.CircleCollider" => ColliderInfo::Circle {
                    offset,
                    radius: component.f64_field("_radius").unwrap_or(0.0),
                },
                _ => ColliderInfo::Polygon {
                    offset,
                    points: polygon_points(component),
                },
            };
            colliders.push(info);
        }
    }
    Ok(colliders)
}

fn polygon_points(component: &Record) -> Vec<Vec2> {
    component
        .raw("points")
        .and_then(serde_json::Value::as_array)
        .map(|points| {
            points
                .iter()
                .filter_map(|p| {
                    Some(Vec2::new(p.get("x")?.as_f64()?, p.get("y")?.as_f64()?))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn extract_widget(node: &Record, doc: &Document) -> Result<Option<WidgetInfo>> {
    let components = doc.components_of_type(node, "cc.Widget")?;
    // a node carries at most one meaningful widget
    let [component] = components.as_slice() else {
        return Ok(None);
    };
    let f = |name: &str| component.f64_field(name).unwrap_or(0.0);
    Ok(Some(WidgetInfo {
        align_flags: component.i64_field("_alignFlags").unwrap_or(0),
        left: f("_left"),
        right: f("_right"),
        top: f("_top"),
        bottom: f("_bottom"),
        vertical_center: f("_verticalCenter"),
        horizontal_center: f("_horizontalCenter"),
    }))
}

/// Extractor for plain container nodes
///
/// Unlike the typed extractors, the generic record stays flat: it is not
/// nested under a `node` key.
pub struct NodeExtractor;

impl PropertyExtractor for NodeExtractor {
    fn name(&self) -> &'static str {
        "Node"
    }

    fn extract(
        &self,
        node: &Record,
        doc: &Document,
        ctx: &mut ConvertContext,
    ) -> Result<Extraction> {
        Ok(Extraction::new(json!(generic_props(node, doc, ctx)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetTable;
    use crate::context::ConvertContext;
    use firepack_document::Document;
    use serde_json::json;

    fn ctx() -> ConvertContext {
        ConvertContext::new(
            AssetTable::default(),
            Default::default(),
            "creator/",
            Default::default(),
        )
    }

    #[test]
    fn test_transform_from_trs_array() {
        let doc = Document::from_value(json!([{
            "__type__": "cc.Node",
            "_trs": {"array": [10.0, 20.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 1.0]},
        }]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();

        let props = generic_props(node, &doc, &mut ctx()).unwrap();
        assert_eq!(props.position, Some(Vec3::new(10.0, 20.0, 0.0)));
        assert_eq!(props.scale_x, Some(2.0));
        assert_eq!(props.scale_y, Some(3.0));
    }

    #[test]
    fn test_transform_falls_back_to_split_fields() {
        let doc = Document::from_value(json!([{
            "__type__": "cc.Node",
            "_position": {"x": 1.0, "y": 2.0, "z": 0.0},
            "_scale": {"x": 4.0, "y": 5.0, "z": 1.0},
        }]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();

        let props = generic_props(node, &doc, &mut ctx()).unwrap();
        assert_eq!(props.position, Some(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(props.scale_x, Some(4.0));
        assert_eq!(props.scale_y, Some(5.0));
    }

    #[test]
    fn test_euler_z_becomes_negated_skew_pair() {
        let doc = Document::from_value(json!([{
            "__type__": "cc.Node",
            "_eulerAngles": {"x": 0.0, "y": 0.0, "z": 45.0},
        }]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();

        let props = generic_props(node, &doc, &mut ctx()).unwrap();
        assert_eq!(props.rotation_skew_x, Some(-45.0));
        assert_eq!(props.rotation_skew_y, Some(-45.0));
    }

    #[test]
    fn test_colliders_collected_in_tag_order() {
        let doc = Document::from_value(json!([
            {
                "__type__": "cc.Node",
                "_components": [{"__id__": 1}, {"__id__": 2}],
            },
            {
                "__type__": "cc.CircleCollider",
                "_offset": {"x": 0.0, "y": 0.0},
                "_radius": 8.0,
            },
            {
                "__type__": "cc.BoxCollider",
                "_offset": {"x": 1.0, "y": 2.0},
                "_size": {"width": 30.0, "height": 40.0},
            },
        ]))
        .unwrap();
        let node = doc.resolve(0.into()).unwrap();

        let props = generic_props(node, &doc, &mut ctx()).unwrap();
        // box colliders come first regardless of attachment order
        assert_eq!(
            props.colliders,
            vec![
                ColliderInfo::Box {
                    offset: Vec2::new(1.0, 2.0),
                    size: Size::new(30.0, 40.0),
                },
                ColliderInfo::Circle {
                    offset: Vec2::ZERO,
                    radius: 8.0,
                },
            ]
        );
    }

    #[test]
    fn test_optional_fields_stay_absent() {
        let doc = Document::from_value(json!([{"__type__": "cc.Node"}])).unwrap();
        let node = doc.resolve(0.into()).unwrap();

        let props = generic_props(node, &doc, &mut ctx()).unwrap();
        let value = json!(props);
        assert!(value.get("name").is_none());
        assert!(value.get("opacity").is_none());
        assert!(value.get("widget").is_none());
        // colliders always serialize, even when empty
        assert_eq!(value.get("colliders"), Some(&json!([])));
    }
}
