//! Render options passed through to the TeX input jax.

/// Only this exact value selects inline mode.
pub const INLINE_TRUE: &str = "True";

/// Per-conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// TeX packages to enable, in order. Empty means the engine defaults.
    pub extensions: Vec<String>,
    /// Inline layout when set, display layout otherwise.
    pub inline: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Builds options from the raw command-line strings.
    pub fn from_cli_values(extensions: &str, inline: Option<&str>) -> Self {
        Self {
            extensions: split_extensions(extensions),
            inline: inline.map_or(false, parse_inline_flag),
        }
    }
}

/// `"True"` is inline, anything else is display. No other value is rejected.
pub fn parse_inline_flag(value: &str) -> bool {
    value == INLINE_TRUE
}

/// Splits a space-separated package list, dropping empty items.
pub fn split_extensions(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_owned).collect()
}
