// File: src/core/renderer.rs
use crate::core::alphabet::GlyphCatalog;

/// Every rendering is exactly this many lines tall, regardless of input.
pub const GLYPH_HEIGHT: usize = 7;

/// Fixed gap appended after every character column.
const SEPARATOR: &str = "  ";

/// Stand-in row for characters without a glyph, and for glyphs shorter than
/// `GLYPH_HEIGHT`. Same width as the built-in glyph rows so columns stay
/// vertically aligned.
const BLANK_ROW: &str = "       ";

/// Turns a word into one multi-line block of letter art.
///
/// Pure and infallible: characters outside the catalog render as blank
/// columns rather than failing, so every input maps to some block. Rejecting
/// empty words is the service layer's job, not this one's.
pub struct RenderingEngine {
    catalog: GlyphCatalog,
}

impl RenderingEngine {
    pub fn new(catalog: GlyphCatalog) -> Self {
        Self { catalog }
    }

    /// Renders `word` as `GLYPH_HEIGHT` newline-joined lines.
    ///
    /// Glyph lookup uppercases each character; the word itself is not
    /// modified. Row `i` of each glyph lands on accumulator line `i`,
    /// followed by the separator; absent or empty rows become a blank
    /// placeholder so shorter glyphs cannot shift the columns after them.
    pub fn render(&self, word: &str) -> String {
        let mut lines = vec![String::new(); GLYPH_HEIGHT];

        for c in word.chars() {
            let glyph = self.catalog.get(c);
            for (i, line) in lines.iter_mut().enumerate() {
                let row = glyph
                    .and_then(|g| g.get(i))
                    .copied()
                    .filter(|r| !r.is_empty())
                    .unwrap_or(BLANK_ROW);
                line.push_str(row);
                line.push_str(SEPARATOR);
            }
        }

        lines.join("\n")
    }
}
