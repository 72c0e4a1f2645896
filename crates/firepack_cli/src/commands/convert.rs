//! `firepack convert`
//!
//! Converts each input document independently: a bad document is reported
//! and skipped, the rest of the batch proceeds. The conversion context is
//! reset between files so no cached resolution leaks from one document into
//! the next.

use ahash::AHashMap;
use clap::Args;
use firepack_convert::{AssetTable, ConvertContext, NormalizedTree, Quirks, TreeBuilder};
use firepack_document::Document;
use firepack_error::{CliErrorKind, FirepackError, Result};
use log::{error, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Scene (.fire) or prefab (.prefab) documents
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// uuid → sprite-frame/font metadata table (JSON)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// uuid → raw animation clip sources (JSON)
    #[arg(long)]
    pub clips: Option<PathBuf>,

    /// Resource root prefixed onto standalone asset paths
    #[arg(long, default_value = "creator/")]
    pub asset_root: String,

    /// Output directory for trees, clips and manifests
    #[arg(short, long, default_value = "out")]
    pub out: PathBuf,

    /// Pretty-print the emitted JSON
    #[arg(long)]
    pub pretty: bool,

    /// Read the color-curve blue channel from its own source field
    /// instead of reproducing the legacy green-channel read
    #[arg(long)]
    pub fixed_color_curves: bool,
}

pub fn cmd_convert(args: &ConvertArgs) -> Result<()> {
    let table = match &args.assets {
        Some(path) => load_asset_table(path)?,
        None => AssetTable::default(),
    };
    let clip_sources = match &args.clips {
        Some(path) => load_clip_sources(path)?,
        None => AHashMap::new(),
    };

    let quirks = Quirks {
        legacy_color_curve: !args.fixed_color_curves,
        ..Quirks::default()
    };
    let builder = TreeBuilder::default();
    let mut ctx = ConvertContext::new(
        table.clone(),
        clip_sources.clone(),
        args.asset_root.clone(),
        quirks,
    );

    let mut failures = 0usize;
    for file in &args.files {
        ctx.reset(table.clone(), clip_sources.clone());
        match convert_one(&builder, &mut ctx, file, args) {
            Ok(()) => info!("converted {}", file.display()),
            Err(e) => {
                error!("skipping {}: {}", file.display(), e.user_message());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(FirepackError::cli(
            format!("{failures} of {} documents failed", args.files.len()),
            CliErrorKind::ExecutionFailed,
        ));
    }
    Ok(())
}

fn convert_one(
    builder: &TreeBuilder,
    ctx: &mut ConvertContext,
    file: &Path,
    args: &ConvertArgs,
) -> Result<()> {
    let doc = Document::from_path(file)?;

    // prefab documents embed a cc.Prefab record, scenes never do
    let tree = if doc.records_of_type("cc.Prefab").is_empty() {
        builder.convert_scene(&doc, ctx)?
    } else {
        builder.convert_prefab(&doc, ctx)?
    };

    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    write_tree(&tree, &args.out.join(format!("{stem}.json")), args.pretty)?;
    write_clips(ctx, &args.out.join("animations"), args.pretty)?;
    Ok(())
}

fn write_tree(tree: &NormalizedTree, path: &Path, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    }
    .map_err(|e| FirepackError::cli(e.to_string(), CliErrorKind::ExecutionFailed))?;
    write_file(path, &text)
}

/// Each clip converted during the file goes to its own side file, named
/// after the clip itself so many documents can share one clip on disk
fn write_clips(ctx: &mut ConvertContext, dir: &Path, pretty: bool) -> Result<()> {
    for clip in ctx.clips.clips_in_order() {
        let text = if pretty {
            serde_json::to_string_pretty(clip)
        } else {
            serde_json::to_string(clip)
        }
        .map_err(|e| FirepackError::cli(e.to_string(), CliErrorKind::ExecutionFailed))?;
        write_file(&dir.join(format!("{}.animation.json", clip.name)), &text)?;
        info!("wrote animation clip {}", clip.name);
    }
    Ok(())
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| FirepackError::io_with_path(e.to_string(), parent))?;
    }
    fs::write(path, text).map_err(|e| FirepackError::io_with_path(e.to_string(), path))
}

fn load_asset_table(path: &Path) -> Result<AssetTable> {
    let text =
        fs::read_to_string(path).map_err(|e| FirepackError::io_with_path(e.to_string(), path))?;
    serde_json::from_str(&text).map_err(|e| {
        FirepackError::asset(
            format!("asset table {} is malformed: {e}", path.display()),
            firepack_error::AssetErrorKind::InvalidMetadata,
        )
    })
}

fn load_clip_sources(path: &Path) -> Result<AHashMap<String, Value>> {
    let text =
        fs::read_to_string(path).map_err(|e| FirepackError::io_with_path(e.to_string(), path))?;
    serde_json::from_str(&text).map_err(|e| {
        FirepackError::cli(
            format!("clip table {} is malformed: {e}", path.display()),
            CliErrorKind::InvalidArguments,
        )
    })
}
