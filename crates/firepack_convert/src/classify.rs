//! Component-driven node classification
//!
//! A node's rendered type is a pure function of the *set* of component type
//! tags attached to it, decided by a fixed priority list. Button, ProgressBar
//! and ScrollView must come before Sprite: a clickable image carries both a
//! Sprite and a Button component and must classify as Button.

use firepack_document::{Document, Record};
use firepack_error::Result;
use log::{debug, warn};

/// Closed set of node variants the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Button,
    ProgressBar,
    ScrollView,
    EditBox,
    Label,
    Skeleton,
    Sprite,
    ParticleSystem,
    TiledMap,
    Canvas,
    RichText,
    VideoPlayer,
    WebView,
    Slider,
    Toggle,
    ToggleGroup,
    PageView,
    Mask,
    ArmatureDisplay,
    Layout,
    /// Generic container: no components, or only unrecognized ones
    Node,
    /// Embedded reusable fragment placeholder, resolved elsewhere
    Prefab,
}

/// Classification priority, walked in order against the component tag set
pub const PRIORITY: &[NodeKind] = &[
    NodeKind::Button,
    NodeKind::ProgressBar,
    NodeKind::ScrollView,
    NodeKind::EditBox,
    NodeKind::Label,
    NodeKind::Skeleton,
    NodeKind::Sprite,
    NodeKind::ParticleSystem,
    NodeKind::TiledMap,
    NodeKind::Canvas,
    NodeKind::RichText,
    NodeKind::VideoPlayer,
    NodeKind::WebView,
    NodeKind::Slider,
    NodeKind::Toggle,
    NodeKind::ToggleGroup,
    NodeKind::PageView,
    NodeKind::Mask,
    NodeKind::ArmatureDisplay,
    NodeKind::Layout,
];

impl NodeKind {
    /// The editor component tag that selects this kind
    pub fn component_tag(self) -> &'static str {
        match self {
            NodeKind::Button => "cc.Button",
            NodeKind::ProgressBar => "cc.ProgressBar",
            NodeKind::ScrollView => "cc.ScrollView",
            NodeKind::EditBox => "cc.EditBox",
            NodeKind::Label => "cc.Label",
            NodeKind::Skeleton => "sp.Skeleton",
            NodeKind::Sprite => "cc.Sprite",
            NodeKind::ParticleSystem => "cc.ParticleSystem",
            NodeKind::TiledMap => "cc.TiledMap",
            NodeKind::Canvas => "cc.Canvas",
            NodeKind::RichText => "cc.RichText",
            NodeKind::VideoPlayer => "cc.VideoPlayer",
            NodeKind::WebView => "cc.WebView",
            NodeKind::Slider => "cc.Slider",
            NodeKind::Toggle => "cc.Toggle",
            NodeKind::ToggleGroup => "cc.ToggleGroup",
            NodeKind::PageView => "cc.PageView",
            NodeKind::Mask => "cc.Mask",
            NodeKind::ArmatureDisplay => "dragonBones.ArmatureDisplay",
            NodeKind::Layout => "cc.Layout",
            NodeKind::Node => "cc.Node",
            NodeKind::Prefab => "cc.Prefab",
        }
    }

    /// The type discriminator emitted on normalized nodes
    pub fn export_name(self) -> &'static str {
        match self {
            NodeKind::Button => "Button",
            NodeKind::ProgressBar => "ProgressBar",
            NodeKind::ScrollView => "ScrollView",
            NodeKind::EditBox => "EditBox",
            NodeKind::Label => "Label",
            NodeKind::Skeleton => "Skeleton",
            NodeKind::Sprite => "Sprite",
            NodeKind::ParticleSystem => "ParticleSystem",
            NodeKind::TiledMap => "TiledMap",
            NodeKind::Canvas => "Canvas",
            NodeKind::RichText => "RichText",
            NodeKind::VideoPlayer => "VideoPlayer",
            NodeKind::WebView => "WebView",
            NodeKind::Slider => "Slider",
            NodeKind::Toggle => "Toggle",
            NodeKind::ToggleGroup => "ToggleGroup",
            NodeKind::PageView => "PageView",
            NodeKind::Mask => "Mask",
            NodeKind::ArmatureDisplay => "ArmatureDisplay",
            NodeKind::Layout => "Layout",
            NodeKind::Node => "Node",
            NodeKind::Prefab => "Prefab",
        }
    }
}

/// Classify a node by its attached components
///
/// Returns `None` when the node carries no `_components` field and no
/// embedded-fragment marker; such records are not scene nodes and the tree
/// builder skips them entirely. A present-but-empty component list, or a
/// list of only unrecognized tags, classifies as the generic container.
pub fn classify(node: &Record, doc: &Document) -> Result<Option<NodeKind>> {
    if !node.has_field("_components") {
        if node.has_field("_prefab") {
            return Ok(Some(NodeKind::Prefab));
        }
        return Ok(None);
    }

    let components = doc.components_of(node)?;
    if components.is_empty() {
        return Ok(Some(NodeKind::Node));
    }

    let tags: Vec<&str> = components.iter().map(|c| c.type_tag()).collect();
    for &kind in PRIORITY {
        if tags.contains(&kind.component_tag()) {
            debug!("choose {} from {tags:?}", kind.component_tag());
            return Ok(Some(kind));
        }
    }

    warn!("unknown components {tags:?}, treating node as generic container");
    Ok(Some(NodeKind::Node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use firepack_document::Handle;
    use serde_json::json;

    fn doc(v: serde_json::Value) -> Document {
        Document::from_value(v).expect("fixture must parse")
    }

    #[test]
    fn test_button_wins_over_sprite() {
        // declaration order must not matter: Sprite is stored first
        let d = doc(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}, {"__id__": 2}]},
            {"__type__": "cc.Sprite"},
            {"__type__": "cc.Button"},
        ]));
        let node = d.resolve(Handle(0)).unwrap();
        assert_eq!(classify(node, &d).unwrap(), Some(NodeKind::Button));
    }

    #[test]
    fn test_progress_bar_wins_over_sprite() {
        let d = doc(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}, {"__id__": 2}]},
            {"__type__": "cc.Sprite"},
            {"__type__": "cc.ProgressBar"},
        ]));
        let node = d.resolve(Handle(0)).unwrap();
        assert_eq!(classify(node, &d).unwrap(), Some(NodeKind::ProgressBar));
    }

    #[test]
    fn test_empty_component_list_is_generic() {
        let d = doc(json!([{"__type__": "cc.Node", "_components": []}]));
        let node = d.resolve(Handle(0)).unwrap();
        assert_eq!(classify(node, &d).unwrap(), Some(NodeKind::Node));
    }

    #[test]
    fn test_unrecognized_components_fall_through() {
        let d = doc(json!([
            {"__type__": "cc.Node", "_components": [{"__id__": 1}]},
            {"__type__": "cc.MotionStreak"},
        ]));
        let node = d.resolve(Handle(0)).unwrap();
        assert_eq!(classify(node, &d).unwrap(), Some(NodeKind::Node));
    }

    #[test]
    fn test_prefab_marker_without_components() {
        let d = doc(json!([
            {"__type__": "cc.Node", "_prefab": {"__id__": 1}},
            {"__type__": "cc.PrefabInfo"},
        ]));
        let node = d.resolve(Handle(0)).unwrap();
        assert_eq!(classify(node, &d).unwrap(), Some(NodeKind::Prefab));
    }

    #[test]
    fn test_bare_record_is_not_a_node() {
        let d = doc(json!([{"__type__": "cc.Node"}]));
        let node = d.resolve(Handle(0)).unwrap();
        assert_eq!(classify(node, &d).unwrap(), None);
    }
}
