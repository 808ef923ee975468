// File: src/core/alphabet.rs
use std::collections::HashMap;

/// Rows of block-letter art for one character, top to bottom. Every row in
/// the built-in set is 7 characters wide and draws the letter with its own
/// character as ink; a glyph may carry fewer than the renderer's fixed
/// height, in which case the renderer pads the missing rows.
pub type Glyph = &'static [&'static str];

#[rustfmt::skip]
const GLYPHS: &[(char, Glyph)] = &[
    ('A', &[
        "   A   ",
        "  A A  ",
        " A   A ",
        "AAAAAAA",
        "A     A",
        "A     A",
        "A     A",
    ]),
    ('B', &[
        "BBBBBB ",
        "B     B",
        "B     B",
        "BBBBBB ",
        "B     B",
        "B     B",
        "BBBBBB ",
    ]),
    ('C', &[
        " CCCCC ",
        "C     C",
        "C      ",
        "C      ",
        "C      ",
        "C     C",
        " CCCCC ",
    ]),
    ('D', &[
        "DDDDDD ",
        "D     D",
        "D     D",
        "D     D",
        "D     D",
        "D     D",
        "DDDDDD ",
    ]),
    ('E', &[
        "EEEEEEE",
        "E      ",
        "E      ",
        "EEEEE  ",
        "E      ",
        "E      ",
        "EEEEEEE",
    ]),
    ('F', &[
        "FFFFFFF",
        "F      ",
        "F      ",
        "FFFFF  ",
        "F      ",
        "F      ",
        "F      ",
    ]),
    ('G', &[
        " GGGGG ",
        "G     G",
        "G      ",
        "G  GGGG",
        "G     G",
        "G     G",
        " GGGGG ",
    ]),
    ('H', &[
        "H     H",
        "H     H",
        "H     H",
        "HHHHHHH",
        "H     H",
        "H     H",
        "H     H",
    ]),
    ('I', &[
        "IIIIIII",
        "   I   ",
        "   I   ",
        "   I   ",
        "   I   ",
        "   I   ",
        "IIIIIII",
    ]),
    ('J', &[
        "JJJJJJJ",
        "     J ",
        "     J ",
        "     J ",
        "J    J ",
        "J    J ",
        " JJJJ  ",
    ]),
    ('K', &[
        "K    K ",
        "K   K  ",
        "K  K   ",
        "KKK    ",
        "K  K   ",
        "K   K  ",
        "K    K ",
    ]),
    ('L', &[
        "L      ",
        "L      ",
        "L      ",
        "L      ",
        "L      ",
        "L      ",
        "LLLLLLL",
    ]),
    ('M', &[
        "M     M",
        "MM   MM",
        "M M M M",
        "M  M  M",
        "M     M",
        "M     M",
        "M     M",
    ]),
    ('N', &[
        "N     N",
        "NN    N",
        "N N   N",
        "N  N  N",
        "N   N N",
        "N    NN",
        "N     N",
    ]),
    ('O', &[
        " OOOOO ",
        "O     O",
        "O     O",
        "O     O",
        "O     O",
        "O     O",
        " OOOOO ",
    ]),
    ('P', &[
        "PPPPPP ",
        "P     P",
        "P     P",
        "PPPPPP ",
        "P      ",
        "P      ",
        "P      ",
    ]),
    ('Q', &[
        " QQQQQ ",
        "Q     Q",
        "Q     Q",
        "Q     Q",
        "Q   Q Q",
        "Q    Q ",
        " QQQQ Q",
    ]),
    ('R', &[
        "RRRRRR ",
        "R     R",
        "R     R",
        "RRRRRR ",
        "R  R   ",
        "R   R  ",
        "R    R ",
    ]),
    ('S', &[
        " SSSSS ",
        "S     S",
        "S      ",
        " SSSSS ",
        "      S",
        "S     S",
        " SSSSS ",
    ]),
    ('T', &[
        "TTTTTTT",
        "   T   ",
        "   T   ",
        "   T   ",
        "   T   ",
        "   T   ",
        "   T   ",
    ]),
    ('U', &[
        "U     U",
        "U     U",
        "U     U",
        "U     U",
        "U     U",
        "U     U",
        " UUUUU ",
    ]),
    ('V', &[
        "V     V",
        "V     V",
        "V     V",
        "V     V",
        " V   V ",
        "  V V  ",
        "   V   ",
    ]),
    ('W', &[
        "W     W",
        "W     W",
        "W     W",
        "W  W  W",
        "W W W W",
        "WW   WW",
        "W     W",
    ]),
    ('X', &[
        "X     X",
        " X   X ",
        "  X X  ",
        "   X   ",
        "  X X  ",
        " X   X ",
        "X     X",
    ]),
    ('Y', &[
        "Y     Y",
        " Y   Y ",
        "  Y Y  ",
        "   Y   ",
        "   Y   ",
        "   Y   ",
        "   Y   ",
    ]),
    ('Z', &[
        "ZZZZZZZ",
        "     Z ",
        "    Z  ",
        "   Z   ",
        "  Z    ",
        " Z     ",
        "ZZZZZZZ",
    ]),
    ('0', &[
        " 00000 ",
        "0     0",
        "0    00",
        "0  0  0",
        "00    0",
        "0     0",
        " 00000 ",
    ]),
    ('1', &[
        "   1   ",
        "  11   ",
        " 1 1   ",
        "   1   ",
        "   1   ",
        "   1   ",
        "1111111",
    ]),
    ('2', &[
        " 22222 ",
        "2     2",
        "      2",
        "    22 ",
        "  22   ",
        "22     ",
        "2222222",
    ]),
    ('3', &[
        " 33333 ",
        "3     3",
        "      3",
        "   333 ",
        "      3",
        "3     3",
        " 33333 ",
    ]),
    ('4', &[
        "4    4 ",
        "4    4 ",
        "4    4 ",
        "4444444",
        "     4 ",
        "     4 ",
        "     4 ",
    ]),
    ('5', &[
        "5555555",
        "5      ",
        "555555 ",
        "      5",
        "      5",
        "5     5",
        " 55555 ",
    ]),
    ('6', &[
        " 66666 ",
        "6      ",
        "6      ",
        "666666 ",
        "6     6",
        "6     6",
        " 66666 ",
    ]),
    ('7', &[
        "7777777",
        "     7 ",
        "    7  ",
        "   7   ",
        "  7    ",
        " 7     ",
        "7      ",
    ]),
    ('8', &[
        " 88888 ",
        "8     8",
        "8     8",
        " 88888 ",
        "8     8",
        "8     8",
        " 88888 ",
    ]),
    ('9', &[
        " 99999 ",
        "9     9",
        "9     9",
        " 999999",
        "      9",
        "      9",
        " 99999 ",
    ]),
];

/// The static character-to-glyph mapping. Built once at construction and
/// immutable afterwards; lookup is case-insensitive.
pub struct GlyphCatalog {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphCatalog {
    pub fn new() -> Self {
        Self {
            glyphs: GLYPHS.iter().copied().collect(),
        }
    }

    /// Resolves the glyph for a character, uppercasing for the lookup.
    /// `None` means the character is outside the supported alphabet; the
    /// renderer substitutes blank columns in that case.
    pub fn get(&self, c: char) -> Option<Glyph> {
        self.glyphs.get(&c.to_ascii_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for GlyphCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::renderer::GLYPH_HEIGHT;

    #[test]
    fn catalog_covers_letters_and_digits() {
        let catalog = GlyphCatalog::new();
        assert_eq!(catalog.len(), 36);
        for c in ('A'..='Z').chain('0'..='9') {
            assert!(catalog.get(c).is_some(), "missing glyph for '{}'", c);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = GlyphCatalog::new();
        assert_eq!(catalog.get('a'), catalog.get('A'));
        assert_eq!(catalog.get('z'), catalog.get('Z'));
    }

    #[test]
    fn unknown_characters_have_no_entry() {
        let catalog = GlyphCatalog::new();
        assert!(catalog.get('@').is_none());
        assert!(catalog.get(' ').is_none());
        assert!(catalog.get('ñ').is_none());
    }

    #[test]
    fn every_glyph_row_is_seven_wide() {
        let catalog = GlyphCatalog::new();
        for c in ('A'..='Z').chain('0'..='9') {
            let glyph = catalog.get(c).unwrap();
            assert_eq!(glyph.len(), GLYPH_HEIGHT, "glyph '{}' height", c);
            for (i, row) in glyph.iter().enumerate() {
                assert_eq!(row.len(), 7, "glyph '{}' row {} width", c, i);
            }
        }
    }
}
