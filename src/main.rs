//! tex2svg CLI
//!
//! Usage:
//!   tex2svg --tex <TEX> --extensions <EXTENSIONS> [--inline [<INLINE>]] [--bundle <PATH>]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tex2svg::{convert_to_svg, RenderOptions};

#[derive(Parser)]
#[command(name = "tex2svg")]
#[command(about = "Typeset a TeX math expression to SVG with MathJax")]
struct Cli {
    /// TeX source to typeset
    #[arg(long, allow_hyphen_values = true)]
    tex: String,

    /// Space-separated TeX packages (empty for the MathJax defaults)
    #[arg(long, allow_hyphen_values = true)]
    extensions: String,

    /// Inline layout when exactly "True", display layout otherwise
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    inline: Option<String>,

    /// MathJax adapter bundle, overriding the one built into the binary
    #[arg(long, env = "TEX2SVG_BUNDLE")]
    bundle: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = RenderOptions::from_cli_values(&cli.extensions, cli.inline.as_deref());
    log::debug!("rendering with {options:?}");

    let svg = convert_to_svg(&cli.tex, &options, cli.bundle.as_deref())
        .with_context(|| format!("failed to convert {:?}", cli.tex))?;
    println!("{}", svg);
    Ok(())
}
