//! The record store: eight kind-partitions with overwrite-merge semantics.
//!
//! Partitions are typed maps, so an id can never cross kinds. Records are
//! never evicted once learned; remote deletion shows up as `alive == false`,
//! not as absence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::identity::RecordId;
use super::record::{
    Activity, Block, Collection, CollectionView, Comment, Discussion, Space, User,
};

/// All known records, partitioned by kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordMap {
    pub activities: BTreeMap<RecordId, Activity>,
    pub blocks: BTreeMap<RecordId, Block>,
    pub collections: BTreeMap<RecordId, Collection>,
    pub collection_views: BTreeMap<RecordId, CollectionView>,
    pub spaces: BTreeMap<RecordId, Space>,
    pub users: BTreeMap<RecordId, User>,
    pub comments: BTreeMap<RecordId, Comment>,
    pub discussions: BTreeMap<RecordId, Discussion>,
}

/// A node on the polymorphic parent chain.
///
/// The four kinds a parent reference can land on. Lookup priority is fixed:
/// blocks, then collections, then collection views, then spaces. Ids should
/// never collide across partitions; if one ever does, that order is the
/// tie-break.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Block(&'a Block),
    Collection(&'a Collection),
    View(&'a CollectionView),
    Space(&'a Space),
}

impl RecordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `from` into `self`, partition by partition. An id already present
    /// is overwritten wholesale with the incoming record; nothing is removed.
    pub fn merge(&mut self, from: RecordMap) {
        self.activities.extend(from.activities);
        self.blocks.extend(from.blocks);
        self.collections.extend(from.collections);
        self.collection_views.extend(from.collection_views);
        self.spaces.extend(from.spaces);
        self.users.extend(from.users);
        self.comments.extend(from.comments);
        self.discussions.extend(from.discussions);
    }

    /// Prioritized lookup across the four parentable partitions.
    pub fn node(&self, id: &RecordId) -> Option<Node<'_>> {
        if let Some(b) = self.blocks.get(id) {
            return Some(Node::Block(b));
        }
        if let Some(c) = self.collections.get(id) {
            return Some(Node::Collection(c));
        }
        if let Some(v) = self.collection_views.get(id) {
            return Some(Node::View(v));
        }
        if let Some(s) = self.spaces.get(id) {
            return Some(Node::Space(s));
        }
        None
    }

    /// Total records across all partitions.
    pub fn len(&self) -> usize {
        self.activities.len()
            + self.blocks.len()
            + self.collections.len()
            + self.collection_views.len()
            + self.spaces.len()
            + self.users.len()
            + self.comments.len()
            + self.discussions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
