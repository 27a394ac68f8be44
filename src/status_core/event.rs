//! Event types consumed and produced by the status engine

use serde::{Deserialize, Serialize};

/// Error messages are truncated to this many characters at write time.
pub const MAX_ERROR_MESSAGE_LEN: usize = 300;

/// One tracked navigational request
///
/// `visitor_id` is a pseudo-session key: `user-<id>` for authenticated
/// visitors, otherwise a hash of (client address, user agent). Two people
/// behind one NAT with the same browser share an id, and logging in mid-browse
/// changes it. That is accepted behavior, not a bug to fix here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub path: String,
    pub visitor_id: String,
    pub user_id: Option<i64>,
    /// Unix seconds, UTC
    pub created_at: i64,
}

impl PageView {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// One unhandled request failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub path: String,
    pub message: Option<String>,
    /// Unix seconds, UTC
    pub created_at: i64,
}

/// Counts from the post/like dataset, owned by the content side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementFacts {
    /// Posts currently published (`status = 'active'`)
    pub published_posts: u64,
    /// Like-edges across all posts
    pub post_likes: u64,
}
