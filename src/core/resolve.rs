//! Parent-chain resolution: title, breadcrumb path, visibility.
//!
//! A block's parent may be another block, a collection, a collection view, or
//! the space root, so every step is a prioritized lookup across those four
//! partitions (`RecordMap::node`). Chains in well-formed data are short and
//! acyclic; a visited set guards the walk against malformed cycles instead of
//! spinning forever.

use std::collections::HashSet;

use thiserror::Error;

use super::identity::RecordId;
use super::record_map::{Node, RecordMap};
use super::text::plain_text;

/// Why a title could not be resolved.
///
/// Callers surface these as display strings in place of a title, so each kind
/// renders distinctly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No record exists for the id the walk ended on (root reached or
    /// dangling parent reference).
    #[error("no record for `{id}`")]
    NoRecord { id: RecordId },

    /// A record exists but its kind cannot carry a title.
    #[error("record `{id}` cannot carry a title")]
    NotTitleable { id: RecordId },

    /// A titleable record was found but its title renders empty.
    #[error("record `{id}` has an empty title")]
    EmptyTitle { id: RecordId },

    /// The parent chain loops back on itself (malformed data).
    #[error("parent chain at `{id}` loops back on itself")]
    ParentCycle { id: RecordId },
}

/// Nearest title at or above `id`.
///
/// Climbs past nodes with no title content; stops at the first node that has
/// any, failing with `EmptyTitle` if what it has renders empty.
pub fn resolve_title(records: &RecordMap, id: &RecordId) -> Result<String, ResolveError> {
    let mut seen: HashSet<&RecordId> = HashSet::new();
    let mut cur = id;
    loop {
        if !seen.insert(cur) {
            return Err(ResolveError::ParentCycle { id: cur.clone() });
        }
        match records.node(cur) {
            None => return Err(ResolveError::NoRecord { id: cur.clone() }),
            Some(Node::Block(b)) => match &b.title {
                Some(spans) => return rendered(spans, cur),
                None => cur = &b.parent_id,
            },
            Some(Node::Collection(c)) => match &c.name {
                Some(spans) => return rendered(spans, cur),
                None => cur = &c.parent_id,
            },
            Some(Node::View(v)) => cur = &v.parent_id,
            Some(Node::Space(_)) => {
                return Err(ResolveError::NotTitleable { id: cur.clone() });
            }
        }
    }
}

fn rendered(spans: &[super::text::TextSpan], id: &RecordId) -> Result<String, ResolveError> {
    let title = plain_text(spans);
    if title.is_empty() {
        Err(ResolveError::EmptyTitle { id: id.clone() })
    } else {
        Ok(title)
    }
}

/// Every title on the chain from `id` up to the root, nearest first.
///
/// Unlike [`resolve_title`] this keeps climbing past titled nodes, skipping
/// any that render empty; it fails only when the whole climb produced
/// nothing, classified by how the chain ended.
pub fn resolve_path(records: &RecordMap, id: &RecordId) -> Result<Vec<String>, ResolveError> {
    let mut titles = Vec::new();
    let mut seen: HashSet<&RecordId> = HashSet::new();
    let mut cur = id;
    let terminal = loop {
        if !seen.insert(cur) {
            break ResolveError::ParentCycle { id: cur.clone() };
        }
        match records.node(cur) {
            None => break ResolveError::NoRecord { id: cur.clone() },
            Some(Node::Block(b)) => {
                if let Some(spans) = &b.title {
                    let title = plain_text(spans);
                    if !title.is_empty() {
                        titles.push(title);
                    }
                }
                cur = &b.parent_id;
            }
            Some(Node::Collection(c)) => {
                if let Some(spans) = &c.name {
                    let name = plain_text(spans);
                    if !name.is_empty() {
                        titles.push(name);
                    }
                }
                cur = &c.parent_id;
            }
            Some(Node::View(v)) => cur = &v.parent_id,
            Some(Node::Space(_)) => break ResolveError::NotTitleable { id: cur.clone() },
        }
    };

    if titles.is_empty() { Err(terminal) } else { Ok(titles) }
}

/// Is the subtree at `id` visible to the whole workspace?
///
/// Climbs the parent chain: a soft-deleted block or collection anywhere on
/// the way denies immediately, the first block carrying a space-wide
/// permission grants immediately, and a chain that ends without either
/// denies. The default is deny, not allow.
pub fn is_permitted(records: &RecordMap, id: &RecordId) -> bool {
    let mut seen: HashSet<&RecordId> = HashSet::new();
    let mut cur = id;
    loop {
        if !seen.insert(cur) {
            return false;
        }
        match records.node(cur) {
            None => return false,
            Some(Node::Block(b)) => {
                if !b.alive {
                    return false;
                }
                if b.permissions
                    .iter()
                    .flatten()
                    .any(|p| p.is_space_wide())
                {
                    return true;
                }
                cur = &b.parent_id;
            }
            Some(Node::Collection(c)) => {
                if !c.alive {
                    return false;
                }
                cur = &c.parent_id;
            }
            Some(Node::View(v)) => cur = &v.parent_id,
            Some(Node::Space(_)) => return false,
        }
    }
}
