// File: src/service.rs
use crate::core::renderer::RenderingEngine;
use crate::error::{Result, WordArtError};
use crate::store::words::{Statistics, WordPage, WordRecord, WordStore, WordUpdate};

/// Listing and search pages cannot exceed this many records.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Orchestrates the rendering engine and the word store; the only place the
/// two meet. Constructed explicitly and handed to whatever front end owns
/// the process (CLI here), instead of living as a module-level singleton.
///
/// Input validation sits at this layer so the library stays safe to call
/// without any front end at all.
pub struct RenderingService {
    engine: RenderingEngine,
    store: WordStore,
}

impl RenderingService {
    pub fn new(engine: RenderingEngine, store: WordStore) -> Self {
        Self { engine, store }
    }

    /// Renders `word` and persists it: a new record on first sight,
    /// otherwise a usage increment on the existing one. The submitted text
    /// is stored verbatim; only glyph lookup is case-insensitive.
    pub fn render_and_store(&self, word: &str) -> Result<WordRecord> {
        if word.trim().is_empty() {
            return Err(WordArtError::InvalidInput("a word is required".to_string()));
        }
        let rendering = self.engine.render(word);
        self.store.upsert_by_render(word, &rendering)
    }

    /// Fetches a word by id, counting the fetch as a usage event.
    pub fn get_word(&self, id: i64) -> Result<WordRecord> {
        Self::check_id(id)?;
        self.store.get_by_id(id)
    }

    pub fn list_words(&self, page: u32, page_size: u32) -> Result<WordPage> {
        Self::check_pagination(page, page_size)?;
        self.store.list(page, page_size)
    }

    /// Substring search over stored texts. An empty or absent filter falls
    /// back to a plain listing.
    pub fn search_words(
        &self,
        filter: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<WordPage> {
        Self::check_pagination(page, page_size)?;
        match filter {
            Some(substring) if !substring.is_empty() => {
                self.store.search(substring, page, page_size)
            }
            _ => self.store.list(page, page_size),
        }
    }

    /// Applies an explicit edit. When the text changes, the rendering is
    /// recomputed from the new text and overwrites whatever the caller sent
    /// for it; a rendering on its own is patched through as given.
    pub fn update_word(&self, id: i64, mut update: WordUpdate) -> Result<WordRecord> {
        Self::check_id(id)?;
        if update.text.is_none() && update.rendering.is_none() {
            return Err(WordArtError::NoFields(id));
        }
        if let Some(text) = &update.text {
            if text.trim().is_empty() {
                return Err(WordArtError::InvalidInput(
                    "the replacement text must not be empty".to_string(),
                ));
            }
            update.rendering = Some(self.engine.render(text));
        }
        self.store.update(id, &update)
    }

    /// Removes a word; `false` means there was nothing to remove.
    pub fn delete_word(&self, id: i64) -> Result<bool> {
        Self::check_id(id)?;
        self.store.delete(id)
    }

    pub fn statistics(&self) -> Result<Statistics> {
        self.store.statistics()
    }

    fn check_id(id: i64) -> Result<()> {
        if id <= 0 {
            return Err(WordArtError::InvalidInput(
                "the id must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    fn check_pagination(page: u32, page_size: u32) -> Result<()> {
        if page == 0 {
            return Err(WordArtError::InvalidInput(
                "the page must be a positive number".to_string(),
            ));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(WordArtError::InvalidInput(format!(
                "the page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }
}
