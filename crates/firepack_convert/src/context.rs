//! Per-run conversion context
//!
//! The asset resolver and the animation clip cache are process-wide state
//! within one batch run: every node of every document in the run shares
//! them, so a clip referenced by many nodes is converted exactly once.
//! They are never implicit globals; the context is threaded explicitly
//! through every extractor call and reset in full between independent runs.

use crate::animation::AnimationClip;
use crate::assets::{AssetResolver, AssetTable};
use ahash::AHashMap;
use serde_json::Value;

/// Behavior flags preserving observed quirks of the original exporter
///
/// Both default to the faithful (legacy) behavior; regression tests pin it
/// until product intent is confirmed.
#[derive(Debug, Clone, Copy)]
pub struct Quirks {
    /// Color curve keyframes read the blue channel from the green source field
    pub legacy_color_curve: bool,
    /// Nine-slice detection is unconditionally satisfied, so every
    /// standalone frame carries a center rect
    pub legacy_border_probe: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            legacy_color_curve: true,
            legacy_border_probe: true,
        }
    }
}

/// Memoized animation clips, keyed by uuid, in first-conversion order
#[derive(Default)]
pub struct ClipCache {
    clips: AHashMap<String, AnimationClip>,
    order: Vec<String>,
}

impl ClipCache {
    pub fn contains(&self, uuid: &str) -> bool {
        self.clips.contains_key(uuid)
    }

    pub fn get(&self, uuid: &str) -> Option<&AnimationClip> {
        self.clips.get(uuid)
    }

    pub fn insert(&mut self, uuid: String, clip: AnimationClip) {
        if !self.clips.contains_key(&uuid) {
            self.order.push(uuid.clone());
        }
        self.clips.insert(uuid, clip);
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// All converted clips in first-conversion order
    pub fn clips_in_order(&self) -> Vec<&AnimationClip> {
        self.order.iter().map(|u| &self.clips[u]).collect()
    }

    pub fn clear(&mut self) {
        self.clips.clear();
        self.order.clear();
    }
}

/// Everything a conversion run needs besides the document itself
pub struct ConvertContext {
    pub assets: AssetResolver,
    pub clips: ClipCache,
    /// uuid → raw clip JSON, prebuilt by the collaborator
    clip_sources: AHashMap<String, Value>,
    pub asset_root: String,
    pub quirks: Quirks,
}

impl ConvertContext {
    pub fn new(
        assets: AssetTable,
        clip_sources: AHashMap<String, Value>,
        asset_root: impl Into<String>,
        quirks: Quirks,
    ) -> Self {
        let asset_root = asset_root.into();
        ConvertContext {
            assets: AssetResolver::new(assets, asset_root.clone())
                .with_legacy_border_probe(quirks.legacy_border_probe),
            clips: ClipCache::default(),
            clip_sources,
            asset_root,
            quirks,
        }
    }

    /// The raw clip JSON for a uuid, if the collaborator provided one
    pub fn clip_source(&self, uuid: &str) -> Option<&Value> {
        self.clip_sources.get(uuid)
    }

    /// Clear all caches for an independent run; no entry from a previous
    /// file's conversion may leak into the next
    pub fn reset(&mut self, assets: AssetTable, clip_sources: AHashMap<String, Value>) {
        self.assets.reset(assets);
        self.clips.clear();
        self.clip_sources = clip_sources;
    }
}
