//! Locating the JavaScript adapter that wraps MathJax.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[cfg(embedded_bundle)]
const EMBEDDED: Option<&str> = Some(include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/js/out/index.js"
)));
#[cfg(not(embedded_bundle))]
const EMBEDDED: Option<&str> = None;

/// ES module source whose default export is `(tex, packages, inline) => svg`.
#[derive(Debug, Clone)]
pub struct Bundle {
    name: Cow<'static, str>,
    source: Cow<'static, str>,
}

impl Bundle {
    /// An explicit path wins over the bundle embedded at build time.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        Self::embedded().ok_or(Error::BundleUnavailable)
    }

    pub fn embedded() -> Option<Self> {
        EMBEDDED.map(|source| Self {
            name: Cow::Borrowed("index.js"),
            source: Cow::Borrowed(source),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::BundleRead {
            path: PathBuf::from(path),
            source,
        })?;
        log::debug!("loaded bundle {} ({} bytes)", path.display(), source.len());
        Ok(Self {
            name: Cow::Owned(path.display().to_string()),
            source: Cow::Owned(source),
        })
    }

    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            source: Cow::Owned(source.into()),
        }
    }

    /// Script origin reported in JavaScript stack traces.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.source, Cow::Borrowed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "export default () => '<svg/>';").unwrap();

        let bundle = Bundle::resolve(Some(file.path())).unwrap();
        assert_eq!(bundle.source(), "export default () => '<svg/>';");
        assert_eq!(bundle.name(), file.path().display().to_string());
        assert!(!bundle.is_embedded());
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.js");

        match Bundle::resolve(Some(&path)) {
            Err(Error::BundleRead { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected BundleRead, got {other:?}"),
        }
    }

    #[test]
    fn fallback_matches_build() {
        match Bundle::resolve(None) {
            Ok(bundle) => {
                assert!(EMBEDDED.is_some());
                assert!(bundle.is_embedded());
            }
            Err(Error::BundleUnavailable) => assert!(EMBEDDED.is_none()),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn in_memory_source() {
        let bundle = Bundle::from_source("fake.js", "export default 1;");
        assert_eq!(bundle.name(), "fake.js");
        assert_eq!(bundle.source(), "export default 1;");
    }
}
