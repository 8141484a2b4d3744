//! Feed projection: the raw activity-id sequence becomes page-level entries.
//!
//! Input order is newest-first and the output keeps it; deduplication by
//! navigation key keeps the first (newest) occurrence. Everything here is a
//! pure in-memory traversal — data-quality gaps are logged and skipped, never
//! fatal.

use serde::Serialize;

use super::identity::RecordId;
use super::record::Activity;
use super::record_map::RecordMap;
use super::resolve::{is_permitted, resolve_path, resolve_title};

/// One displayed feed entry. Derived and ephemeral: rebuilt on every
/// projection pass, never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct Page {
    /// The surviving activity's id.
    pub id: RecordId,
    /// Navigation key the entry was deduplicated by (may be empty).
    pub nav_id: RecordId,
    /// Last edit, epoch milliseconds.
    pub when_ms: i64,
    /// Short handle of the last editor ("" when unresolvable).
    pub who: String,
    /// Activity kind string.
    pub event: String,
    /// Workspace-wide visibility of the page.
    pub permitted: bool,
    /// Resolved title, or a resolution diagnostic in its place.
    pub title: String,
    /// Breadcrumb titles, nearest first (empty when unresolvable).
    pub path: Vec<String>,
}

/// Where an activity navigates to, for dedup purposes.
///
/// Activities with none of the three target fields all share the empty key
/// and therefore collapse into one entry. That overlap is inherited behavior;
/// see `empty_navigation_keys_collide`.
fn navigation_key(activity: &Activity) -> RecordId {
    if !activity.navigable_block_id.is_empty() {
        activity.navigable_block_id.clone()
    } else if !activity.collection_row_id.is_empty() {
        activity.collection_row_id.clone()
    } else if !activity.collection_id.is_empty() {
        activity.parent_id.clone()
    } else {
        RecordId::default()
    }
}

/// Last editor of an activity: scans for the max-timestamp edit (first one
/// reaching the maximum wins ties) and takes the first author on it whose
/// user record has a non-empty email.
fn last_editor(records: &RecordMap, activity: &Activity) -> (String, i64) {
    let mut best: Option<&super::record::Edit> = None;
    for edit in &activity.edits {
        if best.is_none_or(|b| edit.timestamp > b.timestamp) {
            best = Some(edit);
        }
    }
    let Some(edit) = best else {
        return (String::new(), 0);
    };

    let who = edit
        .authors
        .iter()
        .find_map(|author| {
            records
                .users
                .get(&author.id)
                .map(|u| u.handle())
                .filter(|h| !h.is_empty())
        })
        .unwrap_or("")
        .to_string();
    (who, edit.timestamp)
}

/// Project the activity-id sequence into deduplicated, resolved feed pages.
pub fn project(records: &RecordMap, activity_ids: &[RecordId]) -> Vec<Page> {
    // First pass: dedup by navigation key, newest occurrence wins.
    let mut seen: std::collections::HashSet<RecordId> = std::collections::HashSet::new();
    let mut survivors: Vec<(&RecordId, &Activity, RecordId)> = Vec::new();
    for aid in activity_ids {
        let Some(activity) = records.activities.get(aid) else {
            tracing::warn!(activity = %aid, "activity record missing, skipping");
            continue;
        };
        let nav = navigation_key(activity);
        if !seen.insert(nav.clone()) {
            continue;
        }
        survivors.push((aid, activity, nav));
    }

    // Second pass: resolve context. Title and visibility walk from the
    // activity's semantic parent, not from the navigation key.
    survivors
        .into_iter()
        .map(|(aid, activity, nav)| {
            let (who, when_ms) = last_editor(records, activity);
            let title = resolve_title(records, &activity.parent_id)
                .unwrap_or_else(|e| format!("({e})"));
            let path = resolve_path(records, &activity.parent_id).unwrap_or_default();
            Page {
                id: aid.clone(),
                nav_id: nav,
                when_ms,
                who,
                event: activity.kind.clone(),
                permitted: is_permitted(records, &activity.parent_id),
                title,
                path,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Block, Edit, User, UserRef};
    use crate::core::text::TextSpan;

    fn id(s: &str) -> RecordId {
        RecordId::new(s)
    }

    fn activity(nav_block: &str, parent: &str) -> Activity {
        Activity {
            parent_id: id(parent),
            navigable_block_id: id(nav_block),
            kind: "block-edited".to_string(),
            ..Activity::default()
        }
    }

    fn store_with_activities(entries: Vec<(&str, Activity)>) -> (RecordMap, Vec<RecordId>) {
        let mut records = RecordMap::new();
        let mut ids = Vec::new();
        for (aid, act) in entries {
            records.activities.insert(id(aid), act);
            ids.push(id(aid));
        }
        (records, ids)
    }

    #[test]
    fn dedup_keeps_first_occurrence_per_key() {
        let (records, ids) = store_with_activities(vec![
            ("a1", activity("k1", "p")),
            ("a2", activity("k2", "p")),
            ("a3", activity("k1", "p")),
            ("a4", activity("k3", "p")),
        ]);

        let pages = project(&records, &ids);
        let keys: Vec<&str> = pages.iter().map(|p| p.nav_id.as_str()).collect();
        let survivors: Vec<&str> = pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(keys, vec!["k1", "k2", "k3"]);
        assert_eq!(survivors, vec!["a1", "a2", "a4"]);
    }

    #[test]
    fn empty_navigation_keys_collide() {
        // Known edge case: activities with no navigable target all share the
        // empty dedup key and merge into a single entry.
        let (records, ids) = store_with_activities(vec![
            ("a1", activity("", "p1")),
            ("a2", activity("", "p2")),
        ]);

        let pages = project(&records, &ids);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id.as_str(), "a1");
        assert!(pages[0].nav_id.is_empty());
    }

    #[test]
    fn collection_activity_navigates_to_its_parent() {
        let mut act = Activity {
            parent_id: id("parent"),
            collection_id: id("col"),
            kind: "collection-edited".to_string(),
            ..Activity::default()
        };
        act.collection_row_id = id("");
        let (records, ids) = store_with_activities(vec![("a1", act)]);

        let pages = project(&records, &ids);
        assert_eq!(pages[0].nav_id.as_str(), "parent");
    }

    #[test]
    fn missing_activity_is_skipped() {
        let (records, mut ids) = store_with_activities(vec![("a1", activity("k1", "p"))]);
        ids.insert(0, id("ghost"));

        let pages = project(&records, &ids);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id.as_str(), "a1");
    }

    #[test]
    fn last_editor_takes_max_timestamp_edit() {
        let mut records = RecordMap::new();
        records.users.insert(
            id("u-early"),
            User {
                email: "early@example.com".to_string(),
            },
        );
        records.users.insert(
            id("u-late"),
            User {
                email: "late@example.com".to_string(),
            },
        );
        let act = Activity {
            edits: vec![
                Edit {
                    timestamp: 2_000,
                    authors: vec![UserRef { id: id("u-late") }],
                },
                Edit {
                    timestamp: 1_000,
                    authors: vec![UserRef { id: id("u-early") }],
                },
            ],
            ..Activity::default()
        };

        let (who, when) = last_editor(&records, &act);
        assert_eq!(who, "late");
        assert_eq!(when, 2_000);
    }

    #[test]
    fn last_editor_skips_authors_without_email() {
        let mut records = RecordMap::new();
        records.users.insert(id("u-blank"), User::default());
        records.users.insert(
            id("u-ada"),
            User {
                email: "ada@example.com".to_string(),
            },
        );
        let act = Activity {
            edits: vec![Edit {
                timestamp: 5_000,
                authors: vec![
                    UserRef { id: id("u-ghost") },
                    UserRef { id: id("u-blank") },
                    UserRef { id: id("u-ada") },
                ],
            }],
            ..Activity::default()
        };

        let (who, _) = last_editor(&records, &act);
        assert_eq!(who, "ada");
    }

    #[test]
    fn pages_resolve_title_from_the_activity_parent() {
        let mut records = RecordMap::new();
        records.blocks.insert(
            id("page"),
            Block {
                title: Some(vec![TextSpan::new("Plans")]),
                alive: true,
                ..Block::default()
            },
        );
        records
            .activities
            .insert(id("a1"), activity("elsewhere", "page"));

        let pages = project(&records, &[id("a1")]);
        assert_eq!(pages[0].title, "Plans");
        assert_eq!(pages[0].path, vec!["Plans".to_string()]);
    }

    #[test]
    fn unresolvable_title_becomes_diagnostic_text() {
        let (records, ids) = store_with_activities(vec![("a1", activity("k", "gone"))]);

        let pages = project(&records, &ids);
        assert_eq!(pages[0].title, "(no record for `gone`)");
        assert!(pages[0].path.is_empty());
        assert!(!pages[0].permitted);
    }
}
