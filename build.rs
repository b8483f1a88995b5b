// Build script that stages the static site (page, styles, assets, and the
// wasm pkg produced by `cargo run`) into `dist/`.
use std::{fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    // Copy static/ to dist/
    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let mut options = CopyOptions::new();
        options.content_only = true;
        options.overwrite = true;
        if let Err(e) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=failed to stage static site: {e}");
        }
    }
}
