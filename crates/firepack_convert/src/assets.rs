//! Indirect asset reference resolution
//!
//! Assets are content-addressed: nodes reference sprite frames and fonts by
//! opaque uuid, and a separate asset-scanning pass hands this resolver a
//! prebuilt uuid → metadata table at the start of each run. Resolution is
//! memoized and idempotent; the table and both caches are cleared in full
//! between independent runs.

use ahash::AHashMap;
use firepack_document::{Rect, Size, Vec2};
use firepack_error::{FirepackError, Result};
use serde::{Deserialize, Serialize};

/// Raw sprite-frame metadata as produced by the asset-scanning pass
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteFrameMeta {
    pub name: String,
    #[serde(default)]
    pub texture_path: String,
    #[serde(default)]
    pub trim_x: f64,
    #[serde(default)]
    pub trim_y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub raw_width: f64,
    #[serde(default)]
    pub raw_height: f64,
    #[serde(default)]
    pub border_top: f64,
    #[serde(default)]
    pub border_bottom: f64,
    #[serde(default)]
    pub border_left: f64,
    #[serde(default)]
    pub border_right: f64,
    /// Packed into a shared texture page rather than its own file
    #[serde(default)]
    pub is_texture_packer: bool,
}

/// uuid → metadata table handed over by the asset-scanning collaborator
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTable {
    #[serde(default)]
    pub sprite_frames: AHashMap<String, SpriteFrameMeta>,
    /// uuid → project-relative font file path
    #[serde(default)]
    pub fonts: AHashMap<String, String>,
}

/// A resolved sprite frame, cached per uuid and emitted to the manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteFrameInfo {
    /// Logical frame name, how atlas-aware runtimes address the frame
    pub name: String,
    /// Resolution-root–prefixed texture path (standalone frames only)
    pub texture_path: String,
    pub rect: Rect,
    pub offset: Vec2,
    pub rotated: bool,
    pub original_size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_rect: Option<Rect>,
    pub atlas: bool,
    /// Path the runtime should load: the logical name for atlas-packed
    /// frames, the root-prefixed name for standalone files
    #[serde(skip)]
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTechnology {
    /// TrueType, rendered from the font file directly
    Ttf,
    /// Bitmap font with explicit glyph metrics
    Bitmap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    /// Project-relative path, prefixed with the resource root by callers
    pub path: String,
    pub technology: FontTechnology,
}

/// Memoizing resolver over the prebuilt asset table
pub struct AssetResolver {
    table: AssetTable,
    asset_root: String,
    /// When set, the "has any border?" probe is unconditionally satisfied,
    /// reproducing a misspelled field access in the original exporter whose
    /// loose comparison against an absent field always held
    legacy_border_probe: bool,
    frames: AHashMap<String, SpriteFrameInfo>,
    fonts: AHashMap<String, FontInfo>,
    /// Standalone frames in first-resolution order, drained into the manifest
    new_frames: Vec<String>,
}

impl AssetResolver {
    pub fn new(table: AssetTable, asset_root: impl Into<String>) -> Self {
        AssetResolver {
            table,
            asset_root: asset_root.into(),
            legacy_border_probe: true,
            frames: AHashMap::new(),
            fonts: AHashMap::new(),
            new_frames: Vec::new(),
        }
    }

    pub fn with_legacy_border_probe(mut self, enabled: bool) -> Self {
        self.legacy_border_probe = enabled;
        self
    }

    /// Number of memoized frame resolutions (cache growth is observable)
    pub fn cached_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Replace the table for a new run and drop every cached resolution
    pub fn reset(&mut self, table: AssetTable) {
        self.table = table;
        self.frames.clear();
        self.fonts.clear();
        self.new_frames.clear();
    }

    /// Resolve a sprite frame uuid, memoized
    pub fn resolve_sprite_frame(&mut self, uuid: &str) -> Result<&SpriteFrameInfo> {
        if !self.frames.contains_key(uuid) {
            let meta = self.table.sprite_frames.get(uuid).ok_or_else(|| {
                FirepackError::asset_not_found("sprite frame uuid not in metadata table")
                    .with_uuid(uuid)
            })?;
            let info = build_frame_info(meta, &self.asset_root, self.legacy_border_probe);
            if !info.atlas {
                self.new_frames.push(uuid.to_string());
            }
            self.frames.insert(uuid.to_string(), info);
        }
        Ok(&self.frames[uuid])
    }

    /// Resolve a font uuid to its path and technology, memoized
    ///
    /// A resolved path with neither a `.ttf` nor a `.fnt` extension is a
    /// fatal conversion error: the runtime has no way to load it.
    pub fn resolve_font(&mut self, uuid: &str) -> Result<&FontInfo> {
        if !self.fonts.contains_key(uuid) {
            let path = self.table.fonts.get(uuid).ok_or_else(|| {
                FirepackError::asset_not_found("font uuid not in metadata table").with_uuid(uuid)
            })?;
            let technology = if path.ends_with(".ttf") {
                FontTechnology::Ttf
            } else if path.ends_with(".fnt") {
                FontTechnology::Bitmap
            } else {
                return Err(FirepackError::convert_missing_font_asset(format!(
                    "font file {path} is neither .ttf nor .fnt"
                )));
            };
            self.fonts.insert(
                uuid.to_string(),
                FontInfo {
                    path: path.clone(),
                    technology,
                },
            );
        }
        Ok(&self.fonts[uuid])
    }

    /// Hand the standalone-frame manifest entries to the tree builder,
    /// in first-resolution order; a second call yields nothing new
    pub fn drain_new_frames(&mut self) -> Vec<SpriteFrameInfo> {
        let uuids = std::mem::take(&mut self.new_frames);
        uuids.into_iter().map(|u| self.frames[&u].clone()).collect()
    }
}

fn build_frame_info(meta: &SpriteFrameMeta, asset_root: &str, legacy_probe: bool) -> SpriteFrameInfo {
    // The original exporter probed a misspelled right-border field here;
    // the loose `!= 0` against the absent field always held, so every frame
    // got a center rect. The flag preserves that behavior.
    let has_border = if legacy_probe {
        true
    } else {
        meta.border_top != 0.0
            || meta.border_bottom != 0.0
            || meta.border_left != 0.0
            || meta.border_right != 0.0
    };
    let center_rect = has_border.then(|| {
        Rect::new(
            meta.border_left,
            meta.border_top,
            meta.width - meta.border_right - meta.border_left,
            meta.height - meta.border_bottom - meta.border_top,
        )
    });

    let path = if meta.is_texture_packer {
        meta.name.clone()
    } else {
        format!("{asset_root}{}", meta.name)
    };

    SpriteFrameInfo {
        name: meta.name.clone(),
        texture_path: format!("{asset_root}{}", meta.texture_path),
        rect: Rect::new(meta.trim_x, meta.trim_y, meta.width, meta.height),
        offset: Vec2::new(meta.offset_x, meta.offset_y),
        rotated: meta.rotated,
        original_size: Size::new(meta.raw_width, meta.raw_height),
        center_rect,
        atlas: meta.is_texture_packer,
        path,
    }
}
