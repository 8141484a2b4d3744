use thiserror::Error;

use crate::cache::CacheError;
use crate::config::ConfigError;
use crate::remote::RemoteError;

/// Crate-level convenience error.
///
/// Not a "god error": it is a thin wrapper over capability errors. Resolution
/// failures (`core::ResolveError`) never appear here — they are rendered as
/// diagnostic strings in place of a title, not propagated upward.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Output encoding for `--json` rendering.
    #[error("failed to encode output: {0}")]
    Render(#[from] serde_json::Error),
}
