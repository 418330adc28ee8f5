// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! GB 2312, the legacy simplified Chinese charset.

use std::sync::OnceLock;

use index_simpchinese::gb18030 as index;

use crate::codec::{self, Alphabet, CharsetDef, EncodedUnit, Unit};
use crate::types::{Category, Charset, CharsetError, DecodeError, EncodeError};

/**
 * GB 2312-80.
 *
 * This is the original mainland Chinese charset: a 94×94 grid addressed
 * by EUC row/column coordinates (`[A1-FE] [A1-FE]` after the 0xA0
 * offset). Rows 1-9 carry symbols, kana, Greek, Cyrillic, pinyin and box
 * drawing; rows 16-55 the pinyin-ordered "level 1" hanzi; rows 56-87 the
 * radical-ordered "level 2" hanzi.
 *
 * The underlying index table is the GB 18030 two-byte area, which fills
 * many cells GB 2312-80 leaves vacant (GBK gap fillers such as ⅰ-ⅹ and
 * the euro sign, and private-use placeholders). This codec consults the
 * table only through the exact GB 2312-80 cell assignment, so those later
 * additions are rejected in both directions.
 */
#[derive(Clone, Copy)]
pub struct GB2312Encoding;

/// The three blocks of the GB 2312 repertoire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GB2312Category {
    /// Non-hanzi rows 1-9.
    Other,
    /// Level 1 hanzi, rows 16-55.
    Level1,
    /// Level 2 hanzi, rows 56-87.
    Level2,
}

impl Category for GB2312Category {
    fn name(self) -> &'static str {
        match self {
            GB2312Category::Other => "other",
            GB2312Category::Level1 => "level-1",
            GB2312Category::Level2 => "level-2",
        }
    }
}

/// The row span of each category, in category order.
const BLOCKS: &[(GB2312Category, u8, u8)] = &[
    (GB2312Category::Other, 1, 9),
    (GB2312Category::Level1, 16, 55),
    (GB2312Category::Level2, 56, 87),
];

/// The exact GB 2312-80 cell assignment. Everything the GB 18030 table
/// adds on top of it (GBK gap fillers, private-use placeholders, rows
/// 88-94) lies outside these spans.
fn cell_assigned(row: u8, col: u8) -> bool {
    match row {
        1 | 3 => true,
        2 => matches!(col, 17..=66 | 69..=78 | 81..=92),
        4 => col <= 83,
        5 => col <= 86,
        6 => matches!(col, 1..=24 | 33..=56),
        7 => matches!(col, 1..=33 | 49..=81),
        8 => matches!(col, 1..=26 | 37..=73),
        9 => matches!(col, 4..=79),
        16..=54 => true,
        55 => col <= 89,
        56..=87 => true,
        _ => false,
    }
}

fn row_category(row: u8) -> Option<GB2312Category> {
    BLOCKS
        .iter()
        .find(|&&(_, start, end)| (start..=end).contains(&row))
        .map(|&(category, _, _)| category)
}

impl CharsetDef for GB2312Encoding {
    const NAME: &'static str = "gb2312";

    type Category = GB2312Category;
    const CATEGORIES: &'static [GB2312Category] =
        &[GB2312Category::Other, GB2312Category::Level1, GB2312Category::Level2];

    fn scan_unit(input: &[u8], at: usize) -> Unit {
        codec::scan_wide(input, at, |b| b < 0x80)
    }

    fn decode_unit(unit: &[u8]) -> Option<char> {
        match *unit {
            [b] if b < 0x80 => Some(b as char),
            [_] => None,
            [lead @ 0xA1..=0xFE, trail @ 0xA1..=0xFE]
                if cell_assigned(lead - codec::EUC_OFFSET, trail - codec::EUC_OFFSET) =>
            {
                let ptr = (lead as u16 - 0x81) * 190 + (trail as u16 - 0x41);
                match index::forward(ptr) {
                    0xFFFF => None,
                    ch => char::from_u32(ch as u32),
                }
            }
            _ => None,
        }
    }

    fn encode_char(ch: char) -> Result<EncodedUnit, &'static str> {
        if (ch as u32) < 0x80 {
            return Ok(EncodedUnit::single(ch as u8));
        }
        let ptr = index::backward(ch as u32);
        if ptr == 0xFFFF {
            return Err(codec::ILLEGAL_SEQUENCE);
        }
        let lead = (ptr / 190) as u8 + 0x81;
        let trail = ptr % 190;
        let trail = trail as u8 + if trail < 0x3F { 0x40 } else { 0x41 };
        if lead < 0xA1 || trail < 0xA1 {
            // assigned in GBK only
            return Err(codec::ILLEGAL_SEQUENCE);
        }
        if !cell_assigned(lead - codec::EUC_OFFSET, trail - codec::EUC_OFFSET) {
            return Err(codec::ILLEGAL_SEQUENCE);
        }
        Ok(EncodedUnit::double(lead, trail))
    }

    fn classify(unit: &[u8]) -> Option<GB2312Category> {
        match *unit {
            [lead, _] if lead > codec::EUC_OFFSET => row_category(lead - codec::EUC_OFFSET),
            _ => None,
        }
    }
}

/// The lazily derived, process-wide repertoire: every coordinate in the
/// category rows that the codec itself resolves to a character.
fn alphabet() -> &'static Alphabet<GB2312Category> {
    static ALPHABET: OnceLock<Alphabet<GB2312Category>> = OnceLock::new();
    ALPHABET.get_or_init(|| {
        let buckets = BLOCKS
            .iter()
            .map(|&(category, start, end)| {
                let mut chars = Vec::new();
                for row in start..=end {
                    for col in 1..=94 {
                        if let Ok(ch) =
                            codec::chr_of_coord::<GB2312Encoding>(row as i32, col as i32)
                        {
                            chars.push(ch);
                        }
                    }
                }
                (category, chars)
            })
            .collect();
        Alphabet::collect(GB2312Encoding::NAME, buckets)
    })
}

impl Charset for GB2312Encoding {
    type Category = GB2312Category;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, input: &str) -> Result<Vec<u8>, EncodeError> {
        codec::encode::<GB2312Encoding>(input)
    }

    fn decode(&self, input: &[u8]) -> Result<String, DecodeError> {
        codec::decode::<GB2312Encoding>(input)
    }

    fn categories(&self) -> &'static [GB2312Category] {
        Self::CATEGORIES
    }

    fn category_of(&self, ch: char) -> Option<GB2312Category> {
        codec::category_of::<GB2312Encoding>(ch)
    }

    fn alphabet(&self) -> &'static [char] {
        alphabet().full()
    }

    fn alphabet_of(&self, category: GB2312Category) -> &'static [char] {
        alphabet().block(category)
    }

    fn count(&self) -> usize {
        alphabet().full().len()
    }

    fn count_of(&self, category: GB2312Category) -> usize {
        alphabet().block(category).len()
    }
}

impl GB2312Encoding {
    /// The EUC (row, col) coordinate of `ch`, both axes 1-94.
    pub fn coord(&self, ch: char) -> Result<(u8, u8), CharsetError> {
        codec::coord_of::<GB2312Encoding>(ch)
    }

    /// The character at an EUC (row, col) coordinate. Out-of-grid
    /// coordinates are rejected before any table lookup.
    pub fn chr(&self, row: i32, col: i32) -> Result<char, CharsetError> {
        codec::chr_of_coord::<GB2312Encoding>(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ILLEGAL_SEQUENCE, INCOMPLETE_SEQUENCE};

    static GB2312: GB2312Encoding = GB2312Encoding;

    #[test]
    fn test_codec() {
        assert_eq!(GB2312.encode("abc汉字").unwrap(), [0x61, 0x62, 0x63, 0xBA, 0xBA, 0xD7, 0xD6]);
        assert_eq!(GB2312.decode(&[0x61, 0x62, 0x63, 0xBA, 0xBA, 0xD7, 0xD6]).unwrap(), "abc汉字");
    }

    #[test]
    fn test_encode_error_position() {
        let err = GB2312.encode("abc가").unwrap_err();
        assert_eq!(err.character, '가');
        assert_eq!(err.position, 3);
        assert_eq!(err.reason, ILLEGAL_SEQUENCE);
    }

    #[test]
    fn test_decode_dangling_lead() {
        let err = GB2312.decode(&[0x61, 0x62, 0x63, 0xBA, 0xBA, 0xD7]).unwrap_err();
        assert_eq!(err.bytes, [0xD7]);
        assert_eq!(err.position, 5);
        assert_eq!(err.reason, INCOMPLETE_SEQUENCE);
    }

    #[test]
    fn test_decode_invalid_unit() {
        let err = GB2312.decode(&[0x85, 0xA1]).unwrap_err();
        assert_eq!(err.bytes, [0x85, 0xA1]);
        assert_eq!(err.position, 0);
        assert_eq!(err.reason, ILLEGAL_SEQUENCE);
    }

    #[test]
    fn test_query_chr() {
        assert_eq!(GB2312.chr(1, 79).unwrap(), '★');
        assert_eq!(GB2312.chr(16, 1).unwrap(), '啊');
        assert_eq!(GB2312.chr(26, 26).unwrap(), '汉');
        assert_eq!(GB2312.chr(55, 54).unwrap(), '字');
        assert_eq!(GB2312.chr(87, 94).unwrap(), '齄');

        assert!(matches!(GB2312.chr(-1, 50), Err(CharsetError::CoordOutOfRange { .. })));
        assert!(matches!(GB2312.chr(20, 500), Err(CharsetError::CoordOutOfRange { .. })));
        assert!(matches!(GB2312.chr(0, 0), Err(CharsetError::CoordOutOfRange { .. })));

        // row 94 is inside the grid but carries no assignment
        let err = GB2312.chr(94, 94).unwrap_err();
        assert!(matches!(err, CharsetError::UndefinedCoord { source: _, .. }));
    }

    #[test]
    fn test_query_coord() {
        assert_eq!(GB2312.coord('★').unwrap(), (1, 79));
        assert_eq!(GB2312.coord('啊').unwrap(), (16, 1));
        assert_eq!(GB2312.coord('拿').unwrap(), (36, 35));
        assert_eq!(GB2312.coord('齄').unwrap(), (87, 94));

        assert!(matches!(GB2312.coord('d'), Err(CharsetError::Ascii { .. })));
        let err = GB2312.coord('가').unwrap_err();
        assert!(matches!(err, CharsetError::NotInCharset { source: Some(_), .. }));
    }

    #[test]
    fn test_gbk_additions_rejected() {
        // GBK fills the vacant cells 2-1..2-10 with ⅰ-ⅹ and puts the euro
        // sign at 2-67; GB 2312-80 has neither
        assert!(GB2312.encode("ⅰ").is_err());
        assert!(GB2312.encode("€").is_err());
        assert!(GB2312.decode(&[0xA2, 0xA1]).is_err());
        assert!(GB2312.decode(&[0xA2, 0xE3]).is_err());
        // private-use placeholders at the tail of row 55
        assert!(GB2312.decode(&[0xD7, 0xFA]).is_err());
    }

    #[test]
    fn test_query_category() {
        let categories = GB2312.categories();
        assert_eq!(categories.len(), 3);
        assert_eq!(
            categories.iter().map(|c| c.name()).collect::<Vec<_>>(),
            ["other", "level-1", "level-2"]
        );

        assert_eq!(GB2312.category_of('★'), Some(GB2312Category::Other));
        assert_eq!(GB2312.category_of('啊'), Some(GB2312Category::Level1));
        assert_eq!(GB2312.category_of('齄'), Some(GB2312Category::Level2));
        assert_eq!(GB2312.category_of('A'), None);
        assert_eq!(GB2312.category_of('가'), None);
    }

    #[test]
    fn test_alphabet() {
        assert_eq!(GB2312.count_of(GB2312Category::Other), 682);
        assert_eq!(GB2312.count_of(GB2312Category::Level1), 3755);
        assert_eq!(GB2312.count_of(GB2312Category::Level2), 3008);
        assert_eq!(GB2312.count(), 7445);
        assert_eq!(GB2312.alphabet().len(), 7445);
    }

    #[test]
    fn test_alphabet_roundtrip() {
        for &category in GB2312.categories() {
            for &ch in GB2312.alphabet_of(category) {
                let (row, col) = GB2312.coord(ch).unwrap();
                assert_eq!(GB2312.chr(row as i32, col as i32).unwrap(), ch);
                assert_eq!(GB2312.category_of(ch), Some(category));
            }
        }
    }

    #[test]
    fn test_full_unicode_scan_matches_alphabet() {
        let mut counts = [0usize; 3];
        let mut total = 0;
        for ch in (0..=0x10FFFF).filter_map(char::from_u32) {
            if let Some(category) = GB2312.category_of(ch) {
                let slot = GB2312.categories().iter().position(|&c| c == category).unwrap();
                counts[slot] += 1;
                total += 1;
            }
        }
        assert_eq!(counts[0], GB2312.count_of(GB2312Category::Other));
        assert_eq!(counts[1], GB2312.count_of(GB2312Category::Level1));
        assert_eq!(counts[2], GB2312.count_of(GB2312Category::Level2));
        assert_eq!(total, GB2312.count());
    }
}
