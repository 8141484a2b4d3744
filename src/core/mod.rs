//! Core domain types and algorithms.
//!
//! Module order follows type dependency order:
//! - identity: RecordId, SpaceId
//! - text: rich-text spans
//! - record: the eight kind payloads
//! - record_map: partitioned store with overwrite merge
//! - resolve: parent-chain walks (title, path, visibility)
//! - project: activity ids -> feed pages

pub mod identity;
pub mod project;
pub mod record;
pub mod record_map;
pub mod resolve;
pub mod text;

pub use identity::{RecordId, SpaceId};
pub use project::{Page, project};
pub use record::{
    Activity, Block, Collection, CollectionView, Comment, Discussion, Edit, Permission,
    SPACE_PERMISSION, Space, User, UserRef,
};
pub use record_map::{Node, RecordMap};
pub use resolve::{ResolveError, is_permitted, resolve_path, resolve_title};
pub use text::{TextSpan, plain_text};
