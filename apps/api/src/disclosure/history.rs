//! In-memory generation log, newest first.
//!
//! Lives for the lifetime of the process: no persistence, no eviction, no reset.
//! Ids start at 1 and are never reused.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};

use crate::models::disclosure::{DisclosureRequest, HistoryEntry};

/// Characters of disclosure text kept in a history preview.
pub const PREVIEW_CHARS: usize = 200;

struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

/// Cloneable handle to a shared history log. Each `HistoryStore::new()`
/// is an independent log.
#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<Mutex<HistoryLog>>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryLog {
                entries: VecDeque::new(),
                next_id: 1,
            })),
        }
    }

    /// Allocates the next id and inserts a new entry at the front.
    /// Returns a copy of the stored entry.
    pub fn record(&self, request: &DisclosureRequest, disclosure_text: &str) -> HistoryEntry {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let disclosure_preview = disclosure_preview(disclosure_text);

        let mut log = self.lock();
        let entry = HistoryEntry {
            id: log.next_id,
            company_name: request.company_name.clone(),
            year: request.year,
            frameworks: request.frameworks.clone(),
            created_at,
            disclosure_preview,
        };
        log.next_id += 1;
        log.entries.push_front(entry.clone());
        entry
    }

    /// Up to `limit` most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.lock().entries.iter().take(limit).cloned().collect()
    }

    /// Every entry except the `count` oldest, newest first. This is what a
    /// negative `limit` selects on `/api/history`.
    pub fn all_but_oldest(&self, count: usize) -> Vec<HistoryEntry> {
        let log = self.lock();
        let keep = log.entries.len().saturating_sub(count);
        log.entries.iter().take(keep).cloned().collect()
    }

    // A panic while holding the lock cannot leave the log half-written, so a
    // poisoned mutex is still safe to read.
    fn lock(&self) -> MutexGuard<'_, HistoryLog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// First `PREVIEW_CHARS` characters of `text`, with `...` appended only when
/// something was cut off.
pub fn disclosure_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::disclosure::{Framework, Tone};

    fn request(company: &str, year: i32) -> DisclosureRequest {
        DisclosureRequest {
            company_name: company.to_string(),
            sector: "Utilities".to_string(),
            year,
            frameworks: vec![Framework::Cdp, Framework::Gri],
            metrics: vec![],
            initiatives: String::new(),
            tone: Tone::Regulatory,
        }
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "a".repeat(250);
        let preview = disclosure_preview(&text);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..200], &text[..200]);
    }

    #[test]
    fn test_preview_keeps_exactly_200_chars() {
        let text = "b".repeat(200);
        assert_eq!(disclosure_preview(&text), text);
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "é".repeat(201);
        let preview = disclosure_preview(&text);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.starts_with(&"é".repeat(200)));

        let short = "ø".repeat(150);
        assert_eq!(disclosure_preview(&short), short);
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = HistoryStore::new();
        let first = store.record(&request("Alpha", 2023), "one");
        let second = store.record(&request("Beta", 2024), "two");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let store = HistoryStore::new();
        for i in 0..5 {
            store.record(&request(&format!("Company {i}"), 2020 + i), "text");
        }

        let ids: Vec<u64> = store.recent(10).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);

        let latest = store.recent(1);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].company_name, "Company 4");

        assert!(store.recent(0).is_empty());
        assert_eq!(store.recent(usize::MAX).len(), 5);
    }

    #[test]
    fn test_entry_copies_request_fields() {
        let store = HistoryStore::new();
        let entry = store.record(&request("Gamma Energy", 2025), "Short disclosure.");

        assert_eq!(entry.company_name, "Gamma Energy");
        assert_eq!(entry.year, 2025);
        assert_eq!(entry.frameworks, vec![Framework::Cdp, Framework::Gri]);
        assert_eq!(entry.disclosure_preview, "Short disclosure.");
        assert!(entry.created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.created_at).is_ok());
    }

    #[test]
    fn test_separate_stores_are_isolated() {
        let a = HistoryStore::new();
        let b = HistoryStore::new();
        a.record(&request("Only in A", 2024), "x");

        assert_eq!(a.recent(10).len(), 1);
        assert!(b.recent(10).is_empty());
        assert_eq!(b.record(&request("B", 2024), "y").id, 1);
    }

    #[test]
    fn test_clones_share_the_same_log() {
        let store = HistoryStore::new();
        let handle = store.clone();
        handle.record(&request("Shared", 2024), "x");
        assert_eq!(store.recent(10)[0].company_name, "Shared");
    }

    #[test]
    fn test_all_but_oldest_drops_from_the_tail() {
        let store = HistoryStore::new();
        for i in 0..4 {
            store.record(&request(&format!("Company {i}"), 2024), "text");
        }

        let ids: Vec<u64> = store.all_but_oldest(1).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
        assert!(store.all_but_oldest(4).is_empty());
        assert!(store.all_but_oldest(10).is_empty());
    }

    #[test]
    fn test_poisoned_lock_still_serves_records() {
        let store = HistoryStore::new();
        store.record(&request("Before", 2024), "x");

        let poisoner = store.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("panic while holding the history lock");
        })
        .join();
        assert!(outcome.is_err());
        assert!(store.inner.is_poisoned());

        let entry = store.record(&request("After", 2024), "y");
        assert_eq!(entry.id, 2);
        let names: Vec<String> = store
            .recent(10)
            .into_iter()
            .map(|e| e.company_name)
            .collect();
        assert_eq!(names, vec!["After", "Before"]);
    }

    #[test]
    fn test_concurrent_records_get_unique_ids() {
        let store = HistoryStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.record(&request(&format!("T{t}"), 2024), "x");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let ids: Vec<u64> = store.recent(usize::MAX).iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 200);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(ids[0], 200);
    }
}
