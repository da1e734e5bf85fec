use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the MathJax bundle or converting with it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no MathJax bundle available: build js/out/index.js or pass --bundle <PATH>")]
    BundleUnavailable,

    #[error("failed to read bundle {}: {source}", path.display())]
    BundleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// V8 refused to allocate a string (input too large).
    #[error("failed to allocate a V8 string")]
    StringAlloc,

    #[error("failed to compile bundle: {0}")]
    Compile(String),

    #[error("failed to instantiate bundle: {0}")]
    Instantiate(String),

    #[error("failed to evaluate bundle: {0}")]
    Evaluate(String),

    #[error("bundle has no callable default export")]
    MissingExport,

    /// The engine rejected the TeX source or package list.
    #[error("{0}")]
    Conversion(String),

    #[error("conversion returned a non-string value: {0}")]
    UnexpectedResult(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
