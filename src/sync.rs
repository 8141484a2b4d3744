//! Incremental activity-log synchronization.
//!
//! Pages backward through the remote log until it reaches history it already
//! knows, merging record fragments as it goes and reconciling the cached
//! id sequence with the newly fetched ids. One invocation is one cycle; the
//! caller owns the cache exclusively for its duration and persists it
//! afterwards if anything changed.

use crate::cache::ActivityCache;
use crate::core::SpaceId;
use crate::remote::{ActivityLog, ActivityPage};

/// Hard cap on ids processed per cycle, against runaway pagination. Hitting
/// it leaves the local sequence behind remote truth until the next cycle
/// catches up further.
pub const FETCH_SAFETY_CAP: usize = 1000;

/// The first page is a cheap peek: one id is enough to detect the
/// no-new-activity case before committing to larger fetches.
const FIRST_PAGE_LIMIT: usize = 1;
const PAGE_LIMIT: usize = 20;

/// What one sync cycle did.
#[derive(Clone, Copy, Debug)]
pub struct SyncReport {
    /// Ids processed off the remote log this cycle.
    pub fetched: usize,
    /// Pages requested.
    pub pages: usize,
}

impl SyncReport {
    /// Did the cycle learn anything that needs persisting?
    pub fn changed(&self) -> bool {
        self.fetched > 0
    }
}

/// Run one sync cycle against the remote log.
///
/// Fetch errors are logged and degrade to an empty page — a transient remote
/// failure ends the cycle early with whatever was already merged, it never
/// fails the sync. The reconciled sequence keeps remote chronological order
/// (newest first) for all newly fetched ids, followed by the untouched
/// previously known suffix, with no id appearing twice.
pub fn sync(log: &dyn ActivityLog, space: &SpaceId, cache: &mut ActivityCache) -> SyncReport {
    let mut cursor = String::new();
    let mut fetched = 0usize;
    let mut pages = 0usize;
    let mut collected = Vec::new();

    let old = std::mem::take(&mut cache.activity_ids);
    // The newest previously known id. Once the backward walk reaches it, the
    // rest of the remote log is history we already have.
    let looking_for = old.first().cloned();

    let mut limit = FIRST_PAGE_LIMIT;
    'retrieve: while fetched < FETCH_SAFETY_CAP {
        tracing::debug!(limit, cursor = %cursor, "fetching activity page");
        let page = match log.fetch_page(space, &cursor, limit) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("activity fetch failed: {e}");
                ActivityPage::default()
            }
        };
        pages += 1;

        cache.records.merge(page.records);

        for aid in page.activity_ids {
            fetched += 1;
            if looking_for.as_ref() == Some(&aid) {
                // Caught up to previously known history: keep all of it,
                // starting with the matched id itself.
                collected.extend(old.iter().cloned());
                break 'retrieve;
            }
            collected.push(aid);
        }

        cursor = page.next_cursor;
        if cursor.is_empty() {
            break;
        }
        limit = PAGE_LIMIT;
    }

    cache.activity_ids = collected;
    SyncReport { fetched, pages }
}
