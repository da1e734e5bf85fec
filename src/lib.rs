//! TeX to SVG conversion using MathJax hosted in an embedded V8 isolate.
//!
//! ```no_run
//! use tex2svg::{convert_to_svg, RenderOptions};
//!
//! let options = RenderOptions::new().with_extensions(["base"]).with_inline(true);
//! let svg = convert_to_svg("x^2", &options, None).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

use std::path::Path;

pub mod bundle;
pub mod engine;
pub mod error;
pub mod options;

pub use bundle::Bundle;
pub use engine::Engine;
pub use error::{Error, Result};
pub use options::{parse_inline_flag, split_extensions, RenderOptions};

/// One-shot conversion: resolve the bundle, set up an engine, convert once.
pub fn convert_to_svg(
    tex: impl AsRef<str>,
    options: &RenderOptions,
    bundle: Option<&Path>,
) -> Result<String> {
    let bundle = Bundle::resolve(bundle)?;
    log::debug!(
        "using {} bundle {}",
        if bundle.is_embedded() { "embedded" } else { "external" },
        bundle.name()
    );
    let mut engine = Engine::new(&bundle)?;
    engine.convert(tex, options)
}
