#![forbid(unsafe_code)]

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
mod paths;
pub mod remote;
pub mod sync;
pub mod telemetry;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::cache::ActivityCache;
pub use crate::core::{
    Activity, Block, Collection, CollectionView, Comment, Discussion, Edit, Node, Page,
    Permission, RecordId, RecordMap, ResolveError, Space, SpaceId, TextSpan, User, UserRef,
};
pub use crate::remote::{ActivityLog, ActivityPage};
pub use crate::sync::SyncReport;
