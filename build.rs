use std::path::Path;

const BUNDLE: &str = "js/out/index.js";

fn main() {
    println!("cargo:rustc-check-cfg=cfg(embedded_bundle)");
    println!("cargo:rerun-if-changed={BUNDLE}");
    println!("cargo:rerun-if-changed=build.rs");

    // Run `npm ci && npm run build` in js/ to produce the bundle.
    if Path::new(BUNDLE).is_file() {
        println!("cargo:rustc-cfg=embedded_bundle");
    } else {
        println!("cargo:warning={BUNDLE} not found; pass --bundle or TEX2SVG_BUNDLE at runtime");
    }
}
