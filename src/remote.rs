//! Remote activity-log fetch capability.
//!
//! The sync engine depends only on the [`ActivityLog`] trait; the blocking
//! HTTP client here is one implementation of it. Pagination is cursor-based
//! and walks backward through time, one page per request.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{RecordId, RecordMap, SpaceId};

/// One page of remote activity history.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityPage {
    /// Activity ids, newest first.
    pub activity_ids: Vec<RecordId>,
    /// Record fragment backing those activities.
    pub records: RecordMap,
    /// Cursor for the next (older) page; empty when the log is exhausted.
    pub next_cursor: String,
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("activity log request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),

    #[error("activity log response malformed: {0}")]
    Decode(#[from] std::io::Error),
}

/// Paginated access to a workspace's activity log, newest first.
pub trait ActivityLog {
    /// Fetch one page. An empty `cursor` starts from the newest activity;
    /// `limit` is the requested page size.
    fn fetch_page(
        &self,
        space: &SpaceId,
        cursor: &str,
        limit: usize,
    ) -> Result<ActivityPage, RemoteError>;
}

/// Blocking HTTP client for the remote workspace API.
pub struct HttpActivityLog {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl HttpActivityLog {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v3/getActivityLog",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl ActivityLog for HttpActivityLog {
    fn fetch_page(
        &self,
        space: &SpaceId,
        cursor: &str,
        limit: usize,
    ) -> Result<ActivityPage, RemoteError> {
        let response = self
            .agent
            .post(&self.endpoint())
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(serde_json::json!({
                "space_id": space,
                "cursor": cursor,
                "limit": limit,
            }))
            .map_err(Box::new)?;
        let page: ActivityPage = response.into_json()?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let log = HttpActivityLog::new(
            "https://workspace.example.com/",
            "tok",
            Duration::from_secs(5),
        );
        assert_eq!(
            log.endpoint(),
            "https://workspace.example.com/api/v3/getActivityLog"
        );
    }

    #[test]
    fn page_decodes_with_missing_fields() {
        let page: ActivityPage = serde_json::from_str(r#"{"activity_ids": ["a1"]}"#).unwrap();
        assert_eq!(page.activity_ids, vec![RecordId::new("a1")]);
        assert!(page.records.is_empty());
        assert!(page.next_cursor.is_empty());
    }
}
