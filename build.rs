use anyhow::*;
use fs_extra::dir::{CopyOptions, copy};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    // Stage the bundled assets next to the build output so demos and render
    // tests can also run from the target directory.
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets = manifest_dir.join("assets");
    if assets.exists() {
        let out_dir = PathBuf::from(env::var("OUT_DIR")?);
        let mut options = CopyOptions::new();
        options.overwrite = true;
        copy(&assets, &out_dir, &options)?;
    }

    Ok(())
}
