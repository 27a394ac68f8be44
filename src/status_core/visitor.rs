//! Visitor identifier derivation
//!
//! Authenticated visitors get a stable `user-<id>` key. Anonymous visitors get
//! a SHA-256 of (client address, user agent), which is deliberately a
//! heuristic: distinct people behind one NAT with the same browser collide,
//! and a visitor who logs in mid-browse splits into two ids. Documented
//! behavior; do not strengthen without product guidance.

use sha2::{Digest, Sha256};

/// Derive the pseudo-session visitor id for one request
pub fn build_visitor_id(user_id: Option<i64>, remote_addr: &str, user_agent: &str) -> String {
    match user_id {
        Some(id) => format!("user-{}", id),
        None => {
            let mut hasher = Sha256::new();
            hasher.update(remote_addr.as_bytes());
            hasher.update(b"-");
            hasher.update(user_agent.as_bytes());
            hex::encode(hasher.finalize())
        }
    }
}
