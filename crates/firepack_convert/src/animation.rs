//! Animation curve reshaping
//!
//! The editor stores keyframe animation in a columnar, property-major
//! encoding: per clip, per relative child path, a map from property name to
//! an array of keyframes. This module reshapes that into the per-path,
//! per-property row-major [`AnimationClip`] the runtime consumes, and
//! memoizes converted clips process-wide so identical clip identifiers
//! reused by many nodes resolve to one shared structure.

use crate::context::{ConvertContext, Quirks};
use crate::assets::AssetResolver;
use firepack_document::{Record, Rgba, Vec2};
use firepack_error::{ConvertErrorKind, FirepackError, Result};
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// The `anim` block attached to a node's generic properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_on_load: Option<bool>,
    pub clips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_clip: Option<String>,
}

/// A normalized clip: name, timing, and per-path property curves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClip {
    pub name: String,
    pub duration: f64,
    pub sample: f64,
    pub speed: f64,
    pub wrap_mode: i64,
    pub curve_data: Vec<CurveGroup>,
}

/// Curves bound to one relative path; no path key means the node itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub props: CurveProps,
}

/// Row-major property curves; only populated properties serialize
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite_frame: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<Keyframe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Keyframe>>,
}

/// One keyframe: frame index, value, optional easing descriptor
///
/// Easing is a tagged union: a named preset (`curveType`) or explicit
/// control-point data (`curveData`), never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub frame: f64,
    pub value: CurveValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_data: Option<Vec<Value>>,
}

/// Keyframe value shapes across all recognized properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CurveValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Vec2(Vec2),
    Color(Rgba),
}

/// Extract the animation block of a node's `cc.Animation` component
///
/// Converts every referenced clip that is not already cached; the cache
/// lives for the whole run, so clips shared across nodes and documents
/// convert once.
pub fn extract_animation(component: &Record, ctx: &mut ConvertContext) -> Result<AnimationBlock> {
    let mut clips = Vec::new();

    if let Some(Value::Array(refs)) = component.raw("_clips") {
        for clip_ref in refs {
            let Some(uuid) = clip_ref.get("__uuid__").and_then(Value::as_str) else {
                continue;
            };
            if let Some(clip) = ctx.clips.get(uuid) {
                clips.push(clip.name.clone());
                continue;
            }
            let source = ctx.clip_source(uuid).cloned().ok_or_else(|| {
                FirepackError::convert(
                    format!("no clip source for uuid {uuid}"),
                    ConvertErrorKind::ClipNotFound,
                )
            })?;
            let clip = convert_clip(&source, &mut ctx.assets, ctx.quirks)?;
            clips.push(clip.name.clone());
            ctx.clips.insert(uuid.to_string(), clip);
        }
    }

    let default_clip = component.uuid_field("_defaultClip").and_then(|uuid| {
        let name = ctx.clips.get(uuid).map(|c| c.name.clone());
        if name.is_none() {
            warn!("default clip {uuid} is not among the component's clips");
        }
        name
    });

    Ok(AnimationBlock {
        play_on_load: component.bool_field("playOnLoad"),
        clips,
        default_clip,
    })
}

/// Convert one clip's raw JSON into its normalized form
pub fn convert_clip(
    source: &Value,
    assets: &mut AssetResolver,
    quirks: Quirks,
) -> Result<AnimationClip> {
    let name = source
        .get("_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let mut clip = AnimationClip {
        name,
        duration: source.get("_duration").and_then(Value::as_f64).unwrap_or(0.0),
        sample: source.get("sample").and_then(Value::as_f64).unwrap_or(60.0),
        speed: source.get("speed").and_then(Value::as_f64).unwrap_or(1.0),
        wrap_mode: source.get("wrapMode").and_then(Value::as_i64).unwrap_or(1),
        curve_data: Vec::new(),
    };

    let Some(curve_data) = source.get("curveData") else {
        return Ok(clip);
    };

    if let Some(Value::Object(paths)) = curve_data.get("paths") {
        // curves scoped to child nodes by relative path
        for (path, sub) in paths {
            if let Some(props) = sub.get("props") {
                clip.curve_data.push(CurveGroup {
                    path: Some(path.clone()),
                    props: reshape_props(props, assets, quirks)?,
                });
            }
            if let Some(comps) = sub.get("comps") {
                clip.curve_data.push(CurveGroup {
                    path: Some(path.clone()),
                    props: reshape_props(comps, assets, quirks)?,
                });
            }
        }
    } else if let Some(comps) = curve_data.get("comps") {
        clip.curve_data.push(CurveGroup {
            path: Some(String::new()),
            props: reshape_props(comps, assets, quirks)?,
        });
    }

    // curves applying to the animated node itself carry no path key
    if let Some(props) = curve_data.get("props") {
        clip.curve_data.push(CurveGroup {
            path: None,
            props: reshape_props(props, assets, quirks)?,
        });
    }

    Ok(clip)
}

/// Scalar property renames applied during reshaping; `angle` is the legacy
/// spelling of `rotation` and wins when both are present
const SCALAR_PROPS: &[(&str, ScalarTarget)] = &[
    ("rotation", ScalarTarget::Rotation),
    ("angle", ScalarTarget::Rotation),
    ("x", ScalarTarget::PositionX),
    ("y", ScalarTarget::PositionY),
    ("anchorX", ScalarTarget::AnchorX),
    ("anchorY", ScalarTarget::AnchorY),
    ("scaleX", ScalarTarget::ScaleX),
    ("scaleY", ScalarTarget::ScaleY),
    ("skewX", ScalarTarget::SkewX),
    ("skewY", ScalarTarget::SkewY),
    ("opacity", ScalarTarget::Opacity),
    ("active", ScalarTarget::Active),
    ("width", ScalarTarget::Width),
    ("height", ScalarTarget::Height),
];

#[derive(Clone, Copy)]
enum ScalarTarget {
    Rotation,
    PositionX,
    PositionY,
    AnchorX,
    AnchorY,
    ScaleX,
    ScaleY,
    SkewX,
    SkewY,
    Opacity,
    Active,
    Width,
    Height,
}

fn reshape_props(props: &Value, assets: &mut AssetResolver, quirks: Quirks) -> Result<CurveProps> {
    let mut out = CurveProps::default();

    for &(source_key, target) in SCALAR_PROPS {
        if let Some(Value::Array(frames)) = props.get(source_key) {
            let keyframes = frames.iter().map(scalar_keyframe).collect::<Result<_>>()?;
            let slot = match target {
                ScalarTarget::Rotation => &mut out.rotation,
                ScalarTarget::PositionX => &mut out.position_x,
                ScalarTarget::PositionY => &mut out.position_y,
                ScalarTarget::AnchorX => &mut out.anchor_x,
                ScalarTarget::AnchorY => &mut out.anchor_y,
                ScalarTarget::ScaleX => &mut out.scale_x,
                ScalarTarget::ScaleY => &mut out.scale_y,
                ScalarTarget::SkewX => &mut out.skew_x,
                ScalarTarget::SkewY => &mut out.skew_y,
                ScalarTarget::Opacity => &mut out.opacity,
                ScalarTarget::Active => &mut out.active,
                ScalarTarget::Width => &mut out.width,
                ScalarTarget::Height => &mut out.height,
            };
            *slot = Some(keyframes);
        }
    }

    // a combined vector scale curve splits into independent X/Y lists
    // sharing frame indices and easing
    if let Some(Value::Array(frames)) = props.get("scale") {
        let mut xs = Vec::with_capacity(frames.len());
        let mut ys = Vec::with_capacity(frames.len());
        for kf in frames {
            let frame = frame_of(kf)?;
            let (curve_type, curve_data) = easing_of(kf);
            let x = kf.pointer("/value/x").and_then(Value::as_f64).unwrap_or(0.0);
            let y = kf.pointer("/value/y").and_then(Value::as_f64).unwrap_or(0.0);
            xs.push(Keyframe {
                frame,
                value: CurveValue::Number(x),
                curve_type: curve_type.clone(),
                curve_data: curve_data.clone(),
            });
            ys.push(Keyframe {
                frame,
                value: CurveValue::Number(y),
                curve_type,
                curve_data,
            });
        }
        out.scale_x = Some(xs);
        out.scale_y = Some(ys);
    }

    // sprite frame swaps live under the Sprite component scope; an
    // unresolvable uuid skips that single keyframe, not the clip
    if let Some(frames) = props.pointer("/cc.Sprite/spriteFrame").and_then(Value::as_array) {
        let mut keyframes = Vec::with_capacity(frames.len());
        for kf in frames {
            let Some(uuid) = kf.pointer("/value/__uuid__").and_then(Value::as_str) else {
                warn!("spriteFrame keyframe without uuid, skipped");
                continue;
            };
            match assets.resolve_sprite_frame(uuid) {
                Ok(info) => {
                    let (curve_type, curve_data) = easing_of(kf);
                    keyframes.push(Keyframe {
                        frame: frame_of(kf)?,
                        value: CurveValue::Text(info.name.clone()),
                        curve_type,
                        curve_data,
                    });
                }
                Err(e) if e.is_asset_not_found() => {
                    warn!("spriteFrame not found for keyframe uuid {uuid}, skipped");
                }
                Err(e) => return Err(e),
            }
        }
        out.sprite_frame = Some(keyframes);
    }

    // custom events fired during playback
    if let Some(frames) = props.pointer("/AnimationEvents/eventName").and_then(Value::as_array) {
        let keyframes = frames
            .iter()
            .map(|kf| {
                let (curve_type, curve_data) = easing_of(kf);
                Ok(Keyframe {
                    frame: frame_of(kf)?,
                    value: CurveValue::Text(
                        kf.get("value").and_then(Value::as_str).unwrap_or_default().to_string(),
                    ),
                    curve_type,
                    curve_data,
                })
            })
            .collect::<Result<_>>()?;
        out.events = Some(keyframes);
    }

    // a combined position curve keeps one list of {x,y} values, unlike scale
    if let Some(Value::Array(frames)) = props.get("position") {
        let keyframes = frames
            .iter()
            .map(|kf| {
                let arr = kf.get("value").and_then(Value::as_array);
                let x = arr.and_then(|a| a.first()).and_then(Value::as_f64).unwrap_or(0.0);
                let y = arr.and_then(|a| a.get(1)).and_then(Value::as_f64).unwrap_or(0.0);
                let (curve_type, curve_data) = easing_of(kf);
                Ok(Keyframe {
                    frame: frame_of(kf)?,
                    value: CurveValue::Vec2(Vec2::new(x, y)),
                    curve_type,
                    curve_data,
                })
            })
            .collect::<Result<_>>()?;
        out.position = Some(keyframes);
    }

    if let Some(Value::Array(frames)) = props.get("color") {
        let keyframes = frames
            .iter()
            .map(|kf| {
                let channel = |c: &str| {
                    kf.pointer(&format!("/value/{c}"))
                        .and_then(Value::as_u64)
                        .unwrap_or(0) as u8
                };
                // legacy behavior reads blue from the green source field
                let b = if quirks.legacy_color_curve {
                    channel("g")
                } else {
                    channel("b")
                };
                let (curve_type, curve_data) = easing_of(kf);
                Ok(Keyframe {
                    frame: frame_of(kf)?,
                    value: CurveValue::Color(Rgba {
                        r: channel("r"),
                        g: channel("g"),
                        b,
                        a: channel("a"),
                    }),
                    curve_type,
                    curve_data,
                })
            })
            .collect::<Result<_>>()?;
        out.color = Some(keyframes);
    }

    Ok(out)
}

fn frame_of(kf: &Value) -> Result<f64> {
    kf.get("frame").and_then(Value::as_f64).ok_or_else(|| {
        FirepackError::convert_malformed_curve("keyframe without a frame index")
    })
}

/// Easing descriptor of a raw keyframe: named preset or control points
fn easing_of(kf: &Value) -> (Option<String>, Option<Vec<Value>>) {
    match kf.get("curve") {
        Some(Value::String(name)) => (Some(name.clone()), None),
        Some(Value::Array(points)) => (None, Some(points.clone())),
        _ => (None, None),
    }
}

fn scalar_keyframe(kf: &Value) -> Result<Keyframe> {
    let value = match kf.get("value") {
        Some(Value::Bool(b)) => CurveValue::Bool(*b),
        Some(Value::Number(n)) => CurveValue::Number(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => CurveValue::Text(s.clone()),
        _ => {
            return Err(FirepackError::convert_malformed_curve(
                "scalar keyframe with non-scalar value",
            ));
        }
    };
    let (curve_type, curve_data) = easing_of(kf);
    Ok(Keyframe {
        frame: frame_of(kf)?,
        value,
        curve_type,
        curve_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetTable;
    use serde_json::json;

    fn empty_assets() -> AssetResolver {
        AssetResolver::new(AssetTable::default(), "creator/")
    }

    fn reshape(props: serde_json::Value) -> CurveProps {
        reshape_props(&props, &mut empty_assets(), Quirks::default()).unwrap()
    }

    #[test]
    fn test_scale_splits_into_x_and_y() {
        let out = reshape(json!({
            "scale": [
                {"frame": 0.0, "value": {"x": 1.0, "y": 2.0}},
                {"frame": 10.0, "value": {"x": 2.0, "y": 4.0}},
            ]
        }));

        let xs = out.scale_x.unwrap();
        let ys = out.scale_y.unwrap();
        assert_eq!(xs[0].value, CurveValue::Number(1.0));
        assert_eq!(xs[1].value, CurveValue::Number(2.0));
        assert_eq!(ys[0].value, CurveValue::Number(2.0));
        assert_eq!(ys[1].value, CurveValue::Number(4.0));
        assert_eq!(xs[0].frame, 0.0);
        assert_eq!(ys[1].frame, 10.0);
    }

    #[test]
    fn test_angle_aliases_to_rotation() {
        let out = reshape(json!({
            "angle": [{"frame": 0.0, "value": 90.0}]
        }));
        let rot = out.rotation.unwrap();
        assert_eq!(rot[0].value, CurveValue::Number(90.0));
        // no separate angle field exists on the output at all
    }

    #[test]
    fn test_position_stays_a_single_vector_list() {
        let out = reshape(json!({
            "position": [{"frame": 2.0, "value": [3.0, 4.0]}]
        }));
        let pos = out.position.unwrap();
        assert_eq!(pos[0].value, CurveValue::Vec2(Vec2::new(3.0, 4.0)));
        assert!(out.position_x.is_none());
        assert!(out.position_y.is_none());
    }

    #[test]
    fn test_color_blue_reads_green_under_legacy_quirk() {
        let props = json!({
            "color": [{"frame": 0.0, "value": {"r": 10, "g": 20, "b": 30, "a": 40}}]
        });

        let legacy = reshape_props(&props, &mut empty_assets(), Quirks::default()).unwrap();
        let CurveValue::Color(c) = legacy.color.unwrap()[0].value else {
            panic!("expected a color value")
        };
        assert_eq!(c, Rgba { r: 10, g: 20, b: 20, a: 40 });

        let fixed_quirks = Quirks {
            legacy_color_curve: false,
            ..Quirks::default()
        };
        let fixed = reshape_props(&props, &mut empty_assets(), fixed_quirks).unwrap();
        let CurveValue::Color(c) = fixed.color.unwrap()[0].value else {
            panic!("expected a color value")
        };
        assert_eq!(c, Rgba { r: 10, g: 20, b: 30, a: 40 });
    }

    #[test]
    fn test_easing_tagged_union() {
        let out = reshape(json!({
            "opacity": [
                {"frame": 0.0, "value": 255, "curve": "sineOut"},
                {"frame": 5.0, "value": 0, "curve": [0.5, 0.0, 0.5, 1.0]},
                {"frame": 9.0, "value": 128},
            ]
        }));
        let kfs = out.opacity.unwrap();
        assert_eq!(kfs[0].curve_type.as_deref(), Some("sineOut"));
        assert!(kfs[0].curve_data.is_none());
        assert!(kfs[1].curve_type.is_none());
        assert_eq!(kfs[1].curve_data.as_ref().unwrap().len(), 4);
        assert!(kfs[2].curve_type.is_none() && kfs[2].curve_data.is_none());
    }

    #[test]
    fn test_unresolvable_sprite_frame_keyframe_is_skipped() {
        use crate::assets::SpriteFrameMeta;

        let mut table = AssetTable::default();
        table.sprite_frames.insert(
            "known".into(),
            SpriteFrameMeta {
                name: "hero/idle".into(),
                ..Default::default()
            },
        );
        let mut assets = AssetResolver::new(table, "creator/");

        let props = json!({
            "cc.Sprite": {"spriteFrame": [
                {"frame": 0.0, "value": {"__uuid__": "known"}},
                {"frame": 1.0, "value": {"__uuid__": "missing"}},
            ]}
        });
        let out = reshape_props(&props, &mut assets, Quirks::default()).unwrap();
        let kfs = out.sprite_frame.unwrap();
        assert_eq!(kfs.len(), 1);
        assert_eq!(kfs[0].value, CurveValue::Text("hero/idle".into()));
    }

    #[test]
    fn test_clip_paths_and_self_groups() {
        let clip = json!({
            "_name": "bounce",
            "_duration": 0.5,
            "sample": 60.0,
            "speed": 1.0,
            "wrapMode": 2,
            "curveData": {
                "paths": {
                    "body/arm": {"props": {"x": [{"frame": 0.0, "value": 1.0}]}}
                },
                "props": {"opacity": [{"frame": 0.0, "value": 128}]}
            }
        });
        let clip = convert_clip(&clip, &mut empty_assets(), Quirks::default()).unwrap();
        assert_eq!(clip.name, "bounce");
        assert_eq!(clip.wrap_mode, 2);
        assert_eq!(clip.curve_data.len(), 2);
        assert_eq!(clip.curve_data[0].path.as_deref(), Some("body/arm"));
        assert!(clip.curve_data[0].props.position_x.is_some());
        // the node's own group carries no path key
        assert!(clip.curve_data[1].path.is_none());
    }
}
