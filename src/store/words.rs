// File: src/store/words.rs
use rusqlite::{Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WordArtError};
use crate::store::db::Database;

const COLUMNS: &str = "id, text, rendering, usage_count, created_at, last_accessed_at";
const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ','now')";

/// A persisted word with its rendering and usage bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: i64,
    pub text: String,
    pub rendering: String,
    pub usage_count: i64,
    pub created_at: String,
    pub last_accessed_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of records plus the pagination envelope; `filter` echoes the
/// search substring when the page came from a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPage {
    pub words: Vec<WordRecord>,
    pub pagination: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Recognized fields for an explicit edit. Anything else a caller sends is
/// dropped before it gets here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordUpdate {
    pub text: Option<String>,
    pub rendering: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_words: u64,
    pub total_usages: i64,
    pub top_by_usage: Vec<WordRecord>,
    pub most_recently_accessed: Vec<WordRecord>,
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<WordRecord> {
    Ok(WordRecord {
        id: row.get(0)?,
        text: row.get(1)?,
        rendering: row.get(2)?,
        usage_count: row.get(3)?,
        created_at: row.get(4)?,
        last_accessed_at: row.get(5)?,
    })
}

/// Escapes LIKE wildcards so a search substring always matches literally.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn page_info(page: u32, page_size: u32, total: u64) -> PageInfo {
    PageInfo {
        page,
        page_size,
        total,
        total_pages: total.div_ceil(page_size as u64),
    }
}

/// Durable bookkeeping of words: create-or-increment on render, usage
/// tracking on fetch, pagination, substring search and aggregates.
///
/// Every operation is a single statement against the store, so concurrent
/// callers serialize inside SQLite rather than racing a read-then-write
/// sequence in here.
#[derive(Clone)]
pub struct WordStore {
    db: Database,
}

impl WordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates the record on first sight of `text`, otherwise bumps its
    /// usage counter and access timestamp. The increment path leaves `text`
    /// and `rendering` exactly as they were; only an explicit edit changes
    /// them. Returns the post-operation record.
    ///
    /// Concurrent first submissions of the same text all funnel through the
    /// conflict clause: one insert wins, the rest increment, and N calls end
    /// with `usage_count == N` on a single row.
    pub fn upsert_by_render(&self, text: &str, rendering: &str) -> Result<WordRecord> {
        let sql = format!(
            "INSERT INTO words (text, rendering) VALUES (?1, ?2)
             ON CONFLICT(text) DO UPDATE SET
                 usage_count = usage_count + 1,
                 last_accessed_at = {NOW}
             RETURNING {COLUMNS}"
        );
        let record = self
            .db
            .query_one("upsert", &sql, &[&text, &rendering], record_from_row)?
            .ok_or(WordArtError::Unavailable { operation: "upsert" })?;
        log::debug!("upserted '{}' (usage {})", record.text, record.usage_count);
        Ok(record)
    }

    /// Fetches a record by id. Fetching is a usage event: the counter and
    /// access timestamp move before the record is returned.
    pub fn get_by_id(&self, id: i64) -> Result<WordRecord> {
        let sql = format!(
            "UPDATE words SET
                 usage_count = usage_count + 1,
                 last_accessed_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        self.db
            .query_one("get", &sql, &[&id], record_from_row)?
            .ok_or(WordArtError::NotFound(id))
    }

    /// Records in ascending-id order, one page at a time. Pages are
    /// 1-based; the total page count comes from an exact row count.
    pub fn list(&self, page: u32, page_size: u32) -> Result<WordPage> {
        let sql = format!("SELECT {COLUMNS} FROM words ORDER BY id ASC LIMIT ?1 OFFSET ?2");
        let limit = page_size as i64;
        let offset = (page as i64 - 1) * page_size as i64;
        let words = self
            .db
            .query_all("list", &sql, &[&limit, &offset], record_from_row)?;
        let total = self.db.count("list", "SELECT COUNT(*) FROM words", &[])? as u64;
        Ok(WordPage {
            words,
            pagination: page_info(page, page_size, total),
            filter: None,
        })
    }

    /// Same contract as `list`, restricted to records whose text contains
    /// `substring` (matched literally; case-sensitivity follows the store's
    /// LIKE collation). The total is an exact count over the filtered set,
    /// not a guess from the page length.
    pub fn search(&self, substring: &str, page: u32, page_size: u32) -> Result<WordPage> {
        let pattern = escape_like(substring);
        let sql = format!(
            "SELECT {COLUMNS} FROM words
             WHERE text LIKE '%' || ?1 || '%' ESCAPE '\\'
             ORDER BY id ASC LIMIT ?2 OFFSET ?3"
        );
        let limit = page_size as i64;
        let offset = (page as i64 - 1) * page_size as i64;
        let words = self.db.query_all(
            "search",
            &sql,
            &[&pattern, &limit, &offset],
            record_from_row,
        )?;
        let total = self.db.count(
            "search",
            "SELECT COUNT(*) FROM words WHERE text LIKE '%' || ?1 || '%' ESCAPE '\\'",
            &[&pattern],
        )? as u64;
        Ok(WordPage {
            words,
            pagination: page_info(page, page_size, total),
            filter: Some(substring.to_string()),
        })
    }

    /// Applies an explicit edit. Only the recognized fields are written and
    /// the access timestamp always moves. A text change that collides with
    /// another record's text is reported as `DuplicateText`.
    pub fn update(&self, id: i64, update: &WordUpdate) -> Result<WordRecord> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut params: Vec<&dyn ToSql> = Vec::new();
        if let Some(text) = &update.text {
            assignments.push("text = ?");
            params.push(text);
        }
        if let Some(rendering) = &update.rendering {
            assignments.push("rendering = ?");
            params.push(rendering);
        }
        if assignments.is_empty() {
            return Err(WordArtError::NoFields(id));
        }
        let now_assignment = format!("last_accessed_at = {NOW}");
        let sets: Vec<&str> = assignments
            .iter()
            .copied()
            .chain(std::iter::once(now_assignment.as_str()))
            .collect();
        let sql = format!(
            "UPDATE words SET {} WHERE id = ? RETURNING {COLUMNS}",
            sets.join(", ")
        );
        params.push(&id);
        match self.db.query_one("update", &sql, &params, record_from_row) {
            Ok(Some(record)) => {
                log::debug!("updated word {}", id);
                Ok(record)
            }
            Ok(None) => Err(WordArtError::NotFound(id)),
            Err(WordArtError::Conflict { .. }) => Err(WordArtError::DuplicateText(
                update.text.clone().unwrap_or_default(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Removes a record. A missing id is not an error here; the caller
    /// decides whether `false` should become a NotFound-style signal.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self
            .db
            .execute("delete", "DELETE FROM words WHERE id = ?1", &[&id])?;
        if affected > 0 {
            log::debug!("deleted word {}", id);
        }
        Ok(affected > 0)
    }

    /// Aggregates over the whole table: row count, summed usage and two
    /// top-5 views. Ordering ties break by the store's natural row order.
    pub fn statistics(&self) -> Result<Statistics> {
        let total_words = self
            .db
            .count("statistics", "SELECT COUNT(*) FROM words", &[])? as u64;
        let total_usages = self.db.count(
            "statistics",
            "SELECT COALESCE(SUM(usage_count), 0) FROM words",
            &[],
        )?;
        let top_sql =
            format!("SELECT {COLUMNS} FROM words ORDER BY usage_count DESC LIMIT 5");
        let top_by_usage = self
            .db
            .query_all("statistics", &top_sql, &[], record_from_row)?;
        let recent_sql =
            format!("SELECT {COLUMNS} FROM words ORDER BY last_accessed_at DESC LIMIT 5");
        let most_recently_accessed =
            self.db
                .query_all("statistics", &recent_sql, &[], record_from_row)?;
        Ok(Statistics {
            total_words,
            total_usages,
            top_by_usage,
            most_recently_accessed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store() -> WordStore {
        WordStore::new(Database::open_in_memory().unwrap())
    }

    fn seed(store: &WordStore, texts: &[&str]) {
        for text in texts {
            store.upsert_by_render(text, "art").unwrap();
        }
    }

    #[test]
    fn upsert_creates_then_increments() {
        let store = store();
        let first = store.upsert_by_render("HELLO", "first art").unwrap();
        assert_eq!(first.usage_count, 1);
        assert_eq!(first.text, "HELLO");

        let second = store.upsert_by_render("HELLO", "second art").unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.usage_count, 2);
        // The increment path never touches the stored rendering.
        assert_eq!(second.rendering, "first art");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.last_accessed_at >= first.last_accessed_at);
    }

    #[test]
    fn upsert_is_keyed_by_exact_text() {
        let store = store();
        store.upsert_by_render("Hola", "a").unwrap();
        store.upsert_by_render("HOLA", "b").unwrap();
        let page = store.list(1, 10).unwrap();
        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn concurrent_first_submissions_collapse_to_one_row() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.upsert_by_render("CONCURRENT-X", "art").unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let page = store.list(1, 10).unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.words[0].usage_count, 10);
    }

    #[test]
    fn get_by_id_counts_as_usage() {
        let store = store();
        let created = store.upsert_by_render("WORD", "art").unwrap();
        let fetched = store.get_by_id(created.id).unwrap();
        assert_eq!(fetched.usage_count, 2);
        assert!(fetched.last_accessed_at >= created.last_accessed_at);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[test]
    fn get_by_id_missing_is_not_found() {
        let err = store().get_by_id(99).unwrap_err();
        assert!(matches!(err, WordArtError::NotFound(99)));
    }

    #[test]
    fn list_pages_in_ascending_id_order() {
        let store = store();
        seed(&store, &["A", "B", "C", "D", "E"]);

        let page = store.list(2, 2).unwrap();
        let texts: Vec<&str> = page.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["C", "D"]);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.filter.is_none());
    }

    #[test]
    fn list_past_the_end_is_empty_not_an_error() {
        let store = store();
        seed(&store, &["A", "B"]);
        let page = store.list(5, 10).unwrap();
        assert!(page.words.is_empty());
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn search_matches_substring_with_exact_total() {
        let store = store();
        seed(&store, &["HOLA", "HOLANDA", "MUNDO"]);

        let page = store.search("OLA", 1, 10).unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.words.len(), 2);
        assert_eq!(page.filter.as_deref(), Some("OLA"));
    }

    #[test]
    fn search_total_is_counted_beyond_the_page() {
        let store = store();
        seed(&store, &["SOL", "SOLAR", "SOLSTICE", "GIRASOL"]);
        let page = store.search("SOL", 1, 2).unwrap();
        assert_eq!(page.words.len(), 2);
        assert_eq!(page.pagination.total, 4);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn search_follows_stores_case_insensitive_like() {
        let store = store();
        seed(&store, &["Hola", "HOLANDA"]);
        let page = store.search("hola", 1, 10).unwrap();
        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let store = store();
        seed(&store, &["100%", "PLAIN"]);
        let page = store.search("0%", 1, 10).unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.words[0].text, "100%");

        let underscore = store.search("_", 1, 10).unwrap();
        assert_eq!(underscore.pagination.total, 0);
    }

    #[test]
    fn update_rewrites_only_recognized_fields() {
        let store = store();
        let created = store.upsert_by_render("OLD", "old art").unwrap();

        let updated = store
            .update(
                created.id,
                &WordUpdate {
                    text: Some("NEW".to_string()),
                    rendering: Some("new art".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.text, "NEW");
        assert_eq!(updated.rendering, "new art");
        assert_eq!(updated.usage_count, 1);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_without_fields_is_rejected() {
        let store = store();
        let created = store.upsert_by_render("WORD", "art").unwrap();
        let err = store.update(created.id, &WordUpdate::default()).unwrap_err();
        assert!(matches!(err, WordArtError::NoFields(_)));
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let err = store()
            .update(
                42,
                &WordUpdate {
                    rendering: Some("art".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, WordArtError::NotFound(42)));
    }

    #[test]
    fn update_to_an_existing_text_is_a_duplicate() {
        let store = store();
        store.upsert_by_render("FIRST", "a").unwrap();
        let second = store.upsert_by_render("SECOND", "b").unwrap();
        let err = store
            .update(
                second.id,
                &WordUpdate {
                    text: Some("FIRST".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, WordArtError::DuplicateText(t) if t == "FIRST"));
    }

    #[test]
    fn delete_reports_whether_a_row_went_away() {
        let store = store();
        let created = store.upsert_by_render("GONE", "art").unwrap();
        assert!(store.delete(created.id).unwrap());
        assert!(!store.delete(created.id).unwrap());
        let err = store.get_by_id(created.id).unwrap_err();
        assert!(matches!(err, WordArtError::NotFound(_)));
    }

    #[test]
    fn statistics_aggregate_counts_and_rankings() {
        let store = store();
        let counts = [("TEN", 10), ("FIVE", 5), ("THREE", 3), ("ONE", 1), ("UNO", 1)];
        for (text, n) in counts {
            for _ in 0..n {
                store.upsert_by_render(text, "art").unwrap();
            }
        }

        let stats = store.statistics().unwrap();
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.total_usages, 20);
        assert_eq!(stats.top_by_usage[0].text, "TEN");
        assert_eq!(stats.top_by_usage[0].usage_count, 10);
        assert_eq!(stats.top_by_usage.len(), 5);
        assert_eq!(stats.most_recently_accessed.len(), 5);
    }

    #[test]
    fn statistics_over_an_empty_store() {
        let stats = store().statistics().unwrap();
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.total_usages, 0);
        assert!(stats.top_by_usage.is_empty());
    }

    #[test]
    fn records_survive_reopening_a_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.db");

        {
            let store = WordStore::new(Database::open(&path).unwrap());
            store.upsert_by_render("DURABLE", "art").unwrap();
        }

        let store = WordStore::new(Database::open(&path).unwrap());
        let page = store.list(1, 10).unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.words[0].text, "DURABLE");
    }
}
