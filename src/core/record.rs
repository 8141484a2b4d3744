//! Record payloads, one struct per kind-partition.
//!
//! A record is only ever replaced wholesale by a newer fetch of the same id;
//! there are no partial field updates, so every payload is plain owned data.

use serde::{Deserialize, Serialize};

use super::identity::RecordId;
use super::text::TextSpan;

/// Permission type granting workspace-wide visibility.
pub const SPACE_PERMISSION: &str = "space_permission";

/// A permission entry on a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Permission {
    /// Does this entry make the subtree visible to the whole workspace?
    pub fn is_space_wide(&self) -> bool {
        self.kind == SPACE_PERMISSION
    }
}

/// A content block. May parent other blocks, or hang off a collection,
/// collection view, or the space root.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<TextSpan>>,
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub parent_id: RecordId,
    /// Soft-delete marker: a dead block stays in the store forever.
    pub alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

/// A database-like collection. Its name plays the role a title plays on a
/// block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<TextSpan>>,
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub parent_id: RecordId,
    pub alive: bool,
}

/// A saved view over a collection. Carries no titleable content of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionView {
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub parent_id: RecordId,
}

/// The workspace root. Parent chains end here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {}

/// A workspace member.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub email: String,
}

impl User {
    /// Short display handle: the local part before `@`. Empty email yields
    /// an empty handle.
    pub fn handle(&self) -> &str {
        self.email.split('@').next().unwrap_or("")
    }
}

/// Reference to a user from an edit's author list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: RecordId,
}

/// One timestamped edit within an activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edit {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub authors: Vec<UserRef>,
}

/// A logged edit event. The id-valued fields use the wire's empty-string
/// sentinel for "not present".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub parent_id: RecordId,
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub navigable_block_id: RecordId,
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub collection_row_id: RecordId,
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub collection_id: RecordId,
    /// Event kind string, e.g. "block-edited".
    #[serde(rename = "type")]
    pub kind: String,
    pub edits: Vec<Edit>,
}

/// An inline comment. Stored and merged; the feed does not consume it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub parent_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<TextSpan>>,
    pub alive: bool,
}

/// A comment thread. Stored and merged; the feed does not consume it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Discussion {
    #[serde(skip_serializing_if = "RecordId::is_empty")]
    pub parent_id: RecordId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comment_ids: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_local_part_of_email() {
        let u = User {
            email: "ada@example.com".to_string(),
        };
        assert_eq!(u.handle(), "ada");
    }

    #[test]
    fn handle_of_empty_email_is_empty() {
        assert_eq!(User::default().handle(), "");
    }

    #[test]
    fn space_wide_permission_detection() {
        let space = Permission {
            kind: SPACE_PERMISSION.to_string(),
            role: Some("reader".to_string()),
        };
        let user = Permission {
            kind: "user_permission".to_string(),
            role: None,
        };
        assert!(space.is_space_wide());
        assert!(!user.is_space_wide());
    }
}
