//! Human and JSON renderers for CLI outputs.
//!
//! Pure formatting; handlers gather the data. The text feed prints
//! fixed-width columns: navigation id (dashless), date, editor, event,
//! title.

use std::path::Path;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::cache::ActivityCache;
use crate::core::Page;
use crate::sync::SyncReport;

pub fn render_feed(pages: &[Page]) -> String {
    let mut out = String::new();
    for page in pages {
        let nav = page.nav_id.as_str().replace('-', "");
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            nav,
            fmt_date(page.when_ms),
            pad_truncate(&page.who, 10),
            pad_truncate(&page.event, 17),
            page.title,
        ));
    }
    out
}

pub fn render_feed_json(pages: &[Page]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(pages)
}

pub fn render_sync(report: &SyncReport) -> String {
    if report.changed() {
        format!(
            "fetched {} activity ids over {} pages",
            report.fetched, report.pages
        )
    } else {
        "no new activity".to_string()
    }
}

pub fn render_sync_json(report: &SyncReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "fetched": report.fetched,
        "pages": report.pages,
        "changed": report.changed(),
    }))
}

pub fn render_status(path: &Path, cache: &ActivityCache) -> String {
    let r = &cache.records;
    let mut out = String::new();
    out.push_str(&format!("cache: {}\n", path.display()));
    out.push_str(&format!("activity ids: {}\n", cache.activity_ids.len()));
    out.push_str(&format!(
        "records: {} ({} activities, {} blocks, {} collections, {} views, {} spaces, {} users, {} comments, {} discussions)\n",
        r.len(),
        r.activities.len(),
        r.blocks.len(),
        r.collections.len(),
        r.collection_views.len(),
        r.spaces.len(),
        r.users.len(),
        r.comments.len(),
        r.discussions.len(),
    ));
    out
}

pub fn render_status_json(path: &Path, cache: &ActivityCache) -> serde_json::Result<String> {
    let r = &cache.records;
    serde_json::to_string_pretty(&serde_json::json!({
        "cache": path.display().to_string(),
        "activity_ids": cache.activity_ids.len(),
        "records": {
            "activities": r.activities.len(),
            "blocks": r.blocks.len(),
            "collections": r.collections.len(),
            "collection_views": r.collection_views.len(),
            "spaces": r.spaces.len(),
            "users": r.users.len(),
            "comments": r.comments.len(),
            "discussions": r.discussions.len(),
        },
    }))
}

/// Fixed-width column: truncate over-long values, pad short ones.
fn pad_truncate(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    format!("{truncated:<width$}")
}

fn fmt_date(epoch_ms: i64) -> String {
    let format = format_description!("[year]-[month]-[day]");
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(epoch_ms) * 1_000_000)
        .ok()
        .and_then(|dt| dt.format(format).ok())
        .unwrap_or_else(|| "????-??-??".to_string())
}
