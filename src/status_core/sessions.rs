//! Per-visitor session reconstruction over the recent window
//!
//! Groups windowed page views by visitor id. A visitor with exactly one view
//! is a bounce; a visitor with two or more contributes one session duration
//! (last view minus first view, in seconds).

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SessionStats {
    visitor_times: HashMap<String, Vec<i64>>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            visitor_times: HashMap::new(),
        }
    }

    /// Build stats from (visitor_id, created_at) rows
    pub fn from_rows(rows: &[(String, i64)]) -> Self {
        let mut stats = Self::new();
        for (visitor_id, created_at) in rows {
            stats.add_view(visitor_id, *created_at);
        }
        stats
    }

    pub fn add_view(&mut self, visitor_id: &str, created_at: i64) {
        self.visitor_times
            .entry(visitor_id.to_string())
            .or_default()
            .push(created_at);
    }

    /// Distinct visitors seen in the window
    pub fn visitor_count(&self) -> usize {
        self.visitor_times.len()
    }

    /// Visitors with exactly one view
    pub fn bounce_count(&self) -> usize {
        self.visitor_times
            .values()
            .filter(|times| times.len() == 1)
            .count()
    }

    /// Session durations in seconds, one per multi-view visitor
    pub fn session_durations(&self) -> Vec<i64> {
        self.visitor_times
            .values()
            .filter(|times| times.len() >= 2)
            .map(|times| {
                let first = times.iter().min().copied().unwrap_or(0);
                let last = times.iter().max().copied().unwrap_or(0);
                last - first
            })
            .collect()
    }

    /// Integer mean of session durations; 0 when no multi-view visitors exist
    pub fn avg_session_secs(&self) -> i64 {
        let durations = self.session_durations();
        if durations.is_empty() {
            return 0;
        }
        durations.iter().sum::<i64>() / durations.len() as i64
    }

    /// Bounce percentage over distinct visitors; 0 when the window is empty
    pub fn bounce_rate(&self) -> f64 {
        if self.visitor_times.is_empty() {
            return 0.0;
        }
        self.bounce_count() as f64 / self.visitor_times.len() as f64 * 100.0
    }
}
