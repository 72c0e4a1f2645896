//! Tagged records and the typed handle wrapper
//!
//! A document is a flattened array of heterogeneous records cross-referenced
//! by integer handles. Resolution is always an explicit call on the
//! [`Document`](crate::Document) so dangling references surface as errors
//! instead of panics.

use crate::values::{Rgb, Rgba, Size, Vec2, Vec3};
use serde_json::{Map, Value};
use std::fmt;

/// 0-based index identifying a record within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

impl Handle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Handle {
    fn from(v: u32) -> Self {
        Handle(v)
    }
}

/// One entry of the flattened record array: a type tag plus raw fields
///
/// Field accessors return `Option` because the editor omits fields that
/// hold their default value; absence is normal, not an error.
#[derive(Debug, Clone)]
pub struct Record {
    type_tag: String,
    fields: Map<String, Value>,
}

impl Record {
    /// Construct a record directly; used for synthesized wrapper records
    /// that never came from a parsed document
    pub fn new(type_tag: impl Into<String>, fields: Map<String, Value>) -> Self {
        Record {
            type_tag: type_tag.into(),
            fields,
        }
    }

    /// The record's `__type__` tag, e.g. `"cc.Node"` or `"cc.Sprite"`
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn is_type(&self, tag: &str) -> bool {
        self.type_tag == tag
    }

    /// Raw field value, for shapes the typed accessors don't cover
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.as_str()
    }

    pub fn f64_field(&self, name: &str) -> Option<f64> {
        self.fields.get(name)?.as_f64()
    }

    pub fn i64_field(&self, name: &str) -> Option<i64> {
        self.fields.get(name)?.as_i64()
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name)?.as_bool()
    }

    /// Read an intra-document reference field of the form `{"__id__": n}`
    pub fn handle_field(&self, name: &str) -> Option<Handle> {
        handle_of(self.fields.get(name)?)
    }

    /// Read an asset reference field of the form `{"__uuid__": "..."}`
    pub fn uuid_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.get("__uuid__")?.as_str()
    }

    /// Read an ordered list of `{"__id__": n}` references
    pub fn handle_list_field(&self, name: &str) -> Vec<Handle> {
        self.fields
            .get(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(handle_of).collect())
            .unwrap_or_default()
    }

    pub fn vec2_field(&self, name: &str) -> Option<Vec2> {
        let v = self.fields.get(name)?;
        Some(Vec2::new(v.get("x")?.as_f64()?, v.get("y")?.as_f64()?))
    }

    pub fn vec3_field(&self, name: &str) -> Option<Vec3> {
        let v = self.fields.get(name)?;
        Some(Vec3::new(
            v.get("x")?.as_f64()?,
            v.get("y")?.as_f64()?,
            v.get("z")?.as_f64()?,
        ))
    }

    pub fn size_field(&self, name: &str) -> Option<Size> {
        let v = self.fields.get(name)?;
        Some(Size::new(
            v.get("width")?.as_f64()?,
            v.get("height")?.as_f64()?,
        ))
    }

    pub fn rgb_field(&self, name: &str) -> Option<Rgb> {
        let v = self.fields.get(name)?;
        Some(Rgb {
            r: v.get("r")?.as_u64()? as u8,
            g: v.get("g")?.as_u64()? as u8,
            b: v.get("b")?.as_u64()? as u8,
        })
    }

    pub fn rgba_field(&self, name: &str) -> Option<Rgba> {
        let v = self.fields.get(name)?;
        Some(Rgba {
            r: v.get("r")?.as_u64()? as u8,
            g: v.get("g")?.as_u64()? as u8,
            b: v.get("b")?.as_u64()? as u8,
            a: v.get("a")?.as_u64()? as u8,
        })
    }

    /// Read the packed transform array of a 2.2+ node (`_trs.array`)
    pub fn trs_array(&self) -> Option<Vec<f64>> {
        let arr = self.fields.get("_trs")?.get("array")?.as_array()?;
        arr.iter().map(Value::as_f64).collect()
    }
}

/// Extract a handle from a `{"__id__": n}` reference value
pub fn handle_of(value: &Value) -> Option<Handle> {
    Some(Handle(value.get("__id__")?.as_u64()? as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        let Value::Object(mut fields) = v else {
            panic!("fixture must be an object")
        };
        let tag = fields
            .remove("__type__")
            .and_then(|t| t.as_str().map(String::from))
            .unwrap_or_default();
        Record::new(tag, fields)
    }

    #[test]
    fn test_typed_accessors() {
        let r = record(json!({
            "__type__": "cc.Node",
            "_name": "root",
            "_opacity": 255,
            "_active": true,
            "_anchorPoint": {"__type__": "cc.Vec2", "x": 0.5, "y": 0.5},
            "_contentSize": {"__type__": "cc.Size", "width": 640.0, "height": 960.0},
            "_color": {"__type__": "cc.Color", "r": 255, "g": 128, "b": 0, "a": 255},
        }));

        assert!(r.is_type("cc.Node"));
        assert_eq!(r.str_field("_name"), Some("root"));
        assert_eq!(r.i64_field("_opacity"), Some(255));
        assert_eq!(r.bool_field("_active"), Some(true));
        assert_eq!(r.vec2_field("_anchorPoint"), Some(Vec2::new(0.5, 0.5)));
        assert_eq!(r.size_field("_contentSize"), Some(Size::new(640.0, 960.0)));
        assert_eq!(r.rgb_field("_color"), Some(Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(r.str_field("_missing"), None);
    }

    #[test]
    fn test_reference_accessors() {
        let r = record(json!({
            "__type__": "cc.Node",
            "_components": [{"__id__": 3}, {"__id__": 4}],
            "_parent": {"__id__": 1},
            "_spriteFrame": {"__uuid__": "ab-12-cd"},
        }));

        assert_eq!(r.handle_field("_parent"), Some(Handle(1)));
        assert_eq!(
            r.handle_list_field("_components"),
            vec![Handle(3), Handle(4)]
        );
        assert_eq!(r.uuid_field("_spriteFrame"), Some("ab-12-cd"));
        assert!(r.handle_list_field("_children").is_empty());
    }

    #[test]
    fn test_trs_array() {
        let r = record(json!({
            "__type__": "cc.Node",
            "_trs": {
                "__type__": "TypedArray",
                "ctor": "Float64Array",
                "array": [10.0, 20.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 1.0]
            },
        }));

        let trs = r.trs_array().unwrap();
        assert_eq!(trs[0], 10.0);
        assert_eq!(trs[7], 2.0);
    }
}
