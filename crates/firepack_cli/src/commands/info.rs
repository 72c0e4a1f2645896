//! `firepack info`

use clap::Args;
use firepack_document::Document;
use firepack_error::Result;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Document to summarize
    pub file: PathBuf,
}

pub fn cmd_info(args: &InfoArgs) -> Result<()> {
    let doc = Document::from_path(&args.file)?;

    let flavor = if doc.records_of_type("cc.Prefab").is_empty() {
        "scene"
    } else {
        "prefab"
    };
    println!("{}: {} document, {} records", args.file.display(), flavor, doc.len());

    for (tag, count) in doc.type_counts() {
        println!("  {count:>5}  {tag}");
    }
    Ok(())
}
