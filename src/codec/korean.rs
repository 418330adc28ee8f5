// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! KS X 1001, the legacy Korean charset, in its EUC-KR byte form.

use std::sync::OnceLock;

use index_korean::euc_kr as index;

use crate::codec::{self, Alphabet, CharsetDef, EncodedUnit, Unit};
use crate::types::{Category, Charset, CharsetError, DecodeError, EncodeError};

/**
 * KS X 1001 (formerly KS C 5601), encoded as EUC-KR.
 *
 * A 94×94 grid addressed by EUC row/column coordinates: rows 1-12 carry
 * symbols and jamo, rows 16-40 the 2,350 common Hangul syllables in
 * dictionary order, rows 42-93 hanja in reading order (duplicated
 * readings map to distinct compatibility ideographs, so the grid stays
 * round-trippable).
 *
 * The underlying index table is the Unified Hangul Code (Windows code
 * page 949); this codec windows it down to the KS X 1001 rows. The 8,822
 * syllables the UHC extension adds are still fully representable, but
 * through the charset's own mechanism: the KS X 1001:1998 Annex 3
 * composed form, `A4 D4` (Hangul Filler) followed by three jamo pairs
 * naming the initial, medial and final of the syllable. Both directions
 * understand that form, so every one of the 11,172 modern syllables
 * round-trips. A bare `A4 D4` that is *not* followed by three jamo pairs
 * stays the Hangul Filler itself.
 */
#[derive(Clone, Copy)]
pub struct KSX1001Encoding;

/// The three blocks of the KS X 1001 repertoire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KSX1001Category {
    /// Symbols and jamo, rows 1-12.
    Other,
    /// The common Hangul syllables, rows 16-40.
    Syllable,
    /// Hanja, rows 42-93.
    Hanja,
}

impl Category for KSX1001Category {
    fn name(self) -> &'static str {
        match self {
            KSX1001Category::Other => "other",
            KSX1001Category::Syllable => "syllable",
            KSX1001Category::Hanja => "hanja",
        }
    }
}

/// The row span of each category, in category order.
const BLOCKS: &[(KSX1001Category, u8, u8)] = &[
    (KSX1001Category::Other, 1, 12),
    (KSX1001Category::Syllable, 16, 40),
    (KSX1001Category::Hanja, 42, 93),
];

/// Rows 13-15, 41 and 94 carry no KS X 1001 assignment (the UHC table
/// puts private-use placeholders in 41 and 94).
fn row_assigned(row: u8) -> bool {
    matches!(row, 1..=12 | 16..=40 | 42..=93)
}

fn row_category(row: u8) -> Option<KSX1001Category> {
    BLOCKS
        .iter()
        .find(|&&(_, start, end)| (start..=end).contains(&row))
        .map(|&(category, _, _)| category)
}

/// Row 4 trail bytes of the 19 initial consonants, in choseong order.
const CHOSEONG: [u8; 19] = [
    0xA1, 0xA2, 0xA4, 0xA7, 0xA8, 0xA9, 0xB1, 0xB2, 0xB3, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA,
    0xBB, 0xBC, 0xBD, 0xBE,
];

/// Row 4 trail bytes of the 28 finals, in jongseong order; index 0 (no
/// final) is the Hangul Filler byte itself.
const JONGSEONG: [u8; 28] = [
    0xD4, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA9, 0xAA, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF,
    0xB0, 0xB1, 0xB2, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xBA, 0xBB, 0xBC, 0xBD, 0xBE,
];

/// The 21 medials occupy the contiguous trail range `BF`-`D3`.
const JUNGSEONG_FIRST: u8 = 0xBF;

/// True when the six bytes at `at` look like the three jamo pairs of a
/// composed syllable, i.e. `A4 x A4 y A4 z` with each of `x`, `y`, `z`
/// inside the jamo/filler span `A1`-`D4`. Jamo validity per role is
/// checked later, by [`compose_syllable`].
fn composed_tail(input: &[u8], at: usize) -> bool {
    input.len() >= at + 6
        && input[at] == 0xA4
        && input[at + 2] == 0xA4
        && input[at + 4] == 0xA4
        && (0xA1..=0xD4).contains(&input[at + 1])
        && (0xA1..=0xD4).contains(&input[at + 3])
        && (0xA1..=0xD4).contains(&input[at + 5])
}

/// Combines three row-4 jamo bytes into the syllable they spell.
fn compose_syllable(cho: u8, jung: u8, jong: u8) -> Option<char> {
    let l = CHOSEONG.iter().position(|&b| b == cho)? as u32;
    if !(JUNGSEONG_FIRST..JUNGSEONG_FIRST + 21).contains(&jung) {
        return None;
    }
    let v = (jung - JUNGSEONG_FIRST) as u32;
    let t = JONGSEONG.iter().position(|&b| b == jong)? as u32;
    char::from_u32(0xAC00 + (l * 21 + v) * 28 + t)
}

/// The Annex 3 composed form of a syllable outside the KS X 1001 grid.
fn composed_unit(ch: char) -> EncodedUnit {
    let s = ch as u32 - 0xAC00;
    let l = (s / (21 * 28)) as usize;
    let v = ((s / 28) % 21) as u8;
    let t = (s % 28) as usize;
    EncodedUnit::composed([
        0xA4,
        0xD4,
        0xA4,
        CHOSEONG[l],
        0xA4,
        JUNGSEONG_FIRST + v,
        0xA4,
        JONGSEONG[t],
    ])
}

impl CharsetDef for KSX1001Encoding {
    const NAME: &'static str = "ksx1001";

    type Category = KSX1001Category;
    const CATEGORIES: &'static [KSX1001Category] =
        &[KSX1001Category::Other, KSX1001Category::Syllable, KSX1001Category::Hanja];

    fn scan_unit(input: &[u8], at: usize) -> Unit {
        let unit = codec::scan_wide(input, at, |b| b < 0x80);
        if unit.len == 2
            && input[at] == 0xA4
            && input[at + 1] == 0xD4
            && composed_tail(input, at + 2)
        {
            return Unit { len: 8, truncated: false };
        }
        unit
    }

    fn decode_unit(unit: &[u8]) -> Option<char> {
        match *unit {
            [b] if b < 0x80 => Some(b as char),
            [_] => None,
            [0xA4, 0xD4] => Some('\u{3164}'),
            [lead @ 0xA1..=0xFE, trail @ 0xA1..=0xFE]
                if row_assigned(lead - codec::EUC_OFFSET) =>
            {
                let ptr = (lead as u16 - 0x81) * 190 + (trail as u16 - 0x41);
                match index::forward(ptr) {
                    0xFFFF => None,
                    ch => char::from_u32(ch as u32),
                }
            }
            [0xA4, 0xD4, 0xA4, cho, 0xA4, jung, 0xA4, jong] => compose_syllable(cho, jung, jong),
            _ => None,
        }
    }

    fn encode_char(ch: char) -> Result<EncodedUnit, &'static str> {
        if (ch as u32) < 0x80 {
            return Ok(EncodedUnit::single(ch as u8));
        }
        if ch == '\u{3164}' {
            return Ok(EncodedUnit::double(0xA4, 0xD4));
        }
        let ptr = index::backward(ch as u32);
        if ptr != 0xFFFF {
            let lead = (ptr / 190) as u8 + 0x81;
            let trail = (ptr % 190) as u8 + 0x41;
            if lead >= 0xA1 && trail >= 0xA1 && row_assigned(lead - codec::EUC_OFFSET) {
                return Ok(EncodedUnit::double(lead, trail));
            }
        }
        if ('\u{AC00}'..='\u{D7A3}').contains(&ch) {
            // in the UHC extension only; spell it out as jamo
            return Ok(composed_unit(ch));
        }
        Err(codec::ILLEGAL_SEQUENCE)
    }

    fn classify(unit: &[u8]) -> Option<KSX1001Category> {
        match *unit {
            [lead, _] if lead > codec::EUC_OFFSET => row_category(lead - codec::EUC_OFFSET),
            _ => None,
        }
    }
}

/// The lazily derived, process-wide repertoire: every coordinate in the
/// category rows that the codec itself resolves to a character.
fn alphabet() -> &'static Alphabet<KSX1001Category> {
    static ALPHABET: OnceLock<Alphabet<KSX1001Category>> = OnceLock::new();
    ALPHABET.get_or_init(|| {
        let buckets = BLOCKS
            .iter()
            .map(|&(category, start, end)| {
                let mut chars = Vec::new();
                for row in start..=end {
                    for col in 1..=94 {
                        if let Ok(ch) =
                            codec::chr_of_coord::<KSX1001Encoding>(row as i32, col as i32)
                        {
                            chars.push(ch);
                        }
                    }
                }
                (category, chars)
            })
            .collect();
        Alphabet::collect(KSX1001Encoding::NAME, buckets)
    })
}

impl Charset for KSX1001Encoding {
    type Category = KSX1001Category;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, input: &str) -> Result<Vec<u8>, EncodeError> {
        codec::encode::<KSX1001Encoding>(input)
    }

    fn decode(&self, input: &[u8]) -> Result<String, DecodeError> {
        codec::decode::<KSX1001Encoding>(input)
    }

    fn categories(&self) -> &'static [KSX1001Category] {
        Self::CATEGORIES
    }

    fn category_of(&self, ch: char) -> Option<KSX1001Category> {
        codec::category_of::<KSX1001Encoding>(ch)
    }

    fn alphabet(&self) -> &'static [char] {
        alphabet().full()
    }

    fn alphabet_of(&self, category: KSX1001Category) -> &'static [char] {
        alphabet().block(category)
    }

    fn count(&self) -> usize {
        alphabet().full().len()
    }

    fn count_of(&self, category: KSX1001Category) -> usize {
        alphabet().block(category).len()
    }
}

impl KSX1001Encoding {
    /// The EUC (row, col) coordinate of `ch`, both axes 1-94.
    ///
    /// Characters that only exist through the composed form have no
    /// coordinate and are rejected like unrepresentable ones.
    pub fn coord(&self, ch: char) -> Result<(u8, u8), CharsetError> {
        codec::coord_of::<KSX1001Encoding>(ch)
    }

    /// The character at an EUC (row, col) coordinate. Out-of-grid
    /// coordinates are rejected before any table lookup.
    pub fn chr(&self, row: i32, col: i32) -> Result<char, CharsetError> {
        codec::chr_of_coord::<KSX1001Encoding>(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ILLEGAL_SEQUENCE, INCOMPLETE_SEQUENCE};

    static KSX1001: KSX1001Encoding = KSX1001Encoding;

    #[test]
    fn test_codec() {
        assert_eq!(KSX1001.encode("abc가").unwrap(), [0x61, 0x62, 0x63, 0xB0, 0xA1]);
        assert_eq!(KSX1001.decode(&[0x61, 0x62, 0x63, 0xB0, 0xA1]).unwrap(), "abc가");
    }

    #[test]
    fn test_encode_error_position() {
        let err = KSX1001.encode("abc😈").unwrap_err();
        assert_eq!(err.character, '😈');
        assert_eq!(err.position, 3);
        assert_eq!(err.reason, ILLEGAL_SEQUENCE);
    }

    #[test]
    fn test_decode_dangling_lead() {
        let err = KSX1001.decode(&[0x61, 0x62, 0x63, 0xB0, 0xA1, 0xC3]).unwrap_err();
        assert_eq!(err.bytes, [0xC3]);
        assert_eq!(err.position, 5);
        assert_eq!(err.reason, INCOMPLETE_SEQUENCE);
    }

    #[test]
    fn test_hangul_filler_alone() {
        assert_eq!(KSX1001.encode("\u{3164}").unwrap(), [0xA4, 0xD4]);
        assert_eq!(KSX1001.decode(&[0xA4, 0xD4]).unwrap(), "\u{3164}");
        // a filler followed by anything but three jamo pairs stays a filler
        assert_eq!(KSX1001.decode(&[0xA4, 0xD4, 0x41]).unwrap(), "\u{3164}A");
        assert_eq!(
            KSX1001.decode(&[0xA4, 0xD4, 0xA4, 0xA1]).unwrap(),
            "\u{3164}\u{3131}"
        );
    }

    #[test]
    fn test_composed_syllable() {
        // 갂 is not one of the 2,350 grid syllables; it is spelled out as
        // filler + ㄱ + ㅏ + ㄲ
        let composed = [0xA4, 0xD4, 0xA4, 0xA1, 0xA4, 0xBF, 0xA4, 0xA2];
        assert_eq!(KSX1001.encode("갂").unwrap(), composed);
        assert_eq!(KSX1001.decode(&composed).unwrap(), "갂");

        // consuming the full 8 bytes as one unit keeps the byte positions
        // of anything that follows correct
        let mut stream = composed.to_vec();
        stream.extend_from_slice(&[0xB0, 0xA1, 0xFF]);
        let err = KSX1001.decode(&stream).unwrap_err();
        assert_eq!(err.position, 10);
    }

    #[test]
    fn test_composed_syllable_invalid_jamo() {
        // three fillers pass the shape check but spell no syllable
        let bytes = [0xA4, 0xD4, 0xA4, 0xD4, 0xA4, 0xD4, 0xA4, 0xD4];
        let err = KSX1001.decode(&bytes).unwrap_err();
        assert_eq!(err.bytes, bytes);
        assert_eq!(err.position, 0);
        assert_eq!(err.reason, ILLEGAL_SEQUENCE);
    }

    #[test]
    fn test_all_modern_syllables_roundtrip() {
        for cp in 0xAC00..=0xD7A3u32 {
            let ch = char::from_u32(cp).unwrap();
            let text = ch.to_string();
            let bytes = KSX1001.encode(&text).unwrap();
            assert_eq!(KSX1001.decode(&bytes).unwrap(), text);
        }
    }

    #[test]
    fn test_query_chr() {
        assert_eq!(KSX1001.chr(3, 1).unwrap(), '！');
        assert_eq!(KSX1001.chr(4, 1).unwrap(), 'ㄱ');
        assert_eq!(KSX1001.chr(4, 52).unwrap(), '\u{3164}');
        assert_eq!(KSX1001.chr(4, 92).unwrap(), '\u{318C}');
        assert_eq!(KSX1001.chr(5, 85).unwrap(), 'φ');
        assert_eq!(KSX1001.chr(16, 1).unwrap(), '가');
        assert_eq!(KSX1001.chr(42, 1).unwrap(), '伽');
        assert_eq!(KSX1001.chr(50, 54).unwrap(), '\u{F942}');

        assert!(matches!(KSX1001.chr(-1, 50), Err(CharsetError::CoordOutOfRange { .. })));
        assert!(matches!(KSX1001.chr(20, 500), Err(CharsetError::CoordOutOfRange { .. })));

        // row 94 is inside the grid but carries no KS X 1001 assignment
        let err = KSX1001.chr(94, 94).unwrap_err();
        assert!(matches!(err, CharsetError::UndefinedCoord { source: _, .. }));
    }

    #[test]
    fn test_query_coord() {
        assert_eq!(KSX1001.coord('\u{3164}').unwrap(), (4, 52));
        assert_eq!(KSX1001.coord('가').unwrap(), (16, 1));
        assert_eq!(KSX1001.coord('伽').unwrap(), (42, 1));

        assert!(matches!(KSX1001.coord('d'), Err(CharsetError::Ascii { .. })));
        let err = KSX1001.coord('😈').unwrap_err();
        assert!(matches!(err, CharsetError::NotInCharset { source: Some(_), .. }));
        // a composed-only syllable encodes fine but has no coordinate
        let err = KSX1001.coord('갂').unwrap_err();
        assert!(matches!(err, CharsetError::NotInCharset { source: None, .. }));
    }

    #[test]
    fn test_query_category() {
        let categories = KSX1001.categories();
        assert_eq!(categories.len(), 3);
        assert_eq!(
            categories.iter().map(|c| c.name()).collect::<Vec<_>>(),
            ["other", "syllable", "hanja"]
        );

        assert_eq!(KSX1001.category_of('ㄱ'), Some(KSX1001Category::Other));
        assert_eq!(KSX1001.category_of('가'), Some(KSX1001Category::Syllable));
        assert_eq!(KSX1001.category_of('伽'), Some(KSX1001Category::Hanja));
        assert_eq!(KSX1001.category_of('A'), None);
        assert_eq!(KSX1001.category_of('갂'), None);
        assert_eq!(KSX1001.category_of('😈'), None);
    }

    #[test]
    fn test_alphabet() {
        assert_eq!(KSX1001.count_of(KSX1001Category::Other), 988);
        assert_eq!(KSX1001.count_of(KSX1001Category::Syllable), 2350);
        assert_eq!(KSX1001.count_of(KSX1001Category::Hanja), 4888);
        assert_eq!(KSX1001.count(), 8226);
        assert_eq!(KSX1001.alphabet().len(), 8226);
    }

    #[test]
    fn test_alphabet_roundtrip() {
        for &category in KSX1001.categories() {
            for &ch in KSX1001.alphabet_of(category) {
                let (row, col) = KSX1001.coord(ch).unwrap();
                assert_eq!(KSX1001.chr(row as i32, col as i32).unwrap(), ch);
                assert_eq!(KSX1001.category_of(ch), Some(category));
            }
        }
    }

    #[test]
    fn test_full_unicode_scan_matches_alphabet() {
        let mut counts = [0usize; 3];
        let mut total = 0;
        for ch in (0..=0x10FFFF).filter_map(char::from_u32) {
            if let Some(category) = KSX1001.category_of(ch) {
                let slot = KSX1001.categories().iter().position(|&c| c == category).unwrap();
                counts[slot] += 1;
                total += 1;
            }
        }
        assert_eq!(counts[0], KSX1001.count_of(KSX1001Category::Other));
        assert_eq!(counts[1], KSX1001.count_of(KSX1001Category::Syllable));
        assert_eq!(counts[2], KSX1001.count_of(KSX1001Category::Hanja));
        assert_eq!(total, KSX1001.count());
    }

    mod composed_scan {
        use super::super::*;

        #[test]
        fn test_tail_shape_accepted() {
            let bytes = [0xA4, 0xA1, 0xA4, 0xBF, 0xA4, 0xA2];
            assert!(composed_tail(&bytes, 0));
        }

        #[test]
        fn test_tail_shape_rejected() {
            // too short
            assert!(!composed_tail(&[0xA4, 0xA1, 0xA4, 0xBF, 0xA4], 0));
            // wrong lead in the middle pair
            assert!(!composed_tail(&[0xA4, 0xA1, 0xA5, 0xBF, 0xA4, 0xA2], 0));
            // trail outside the jamo span
            assert!(!composed_tail(&[0xA4, 0xA1, 0xA4, 0xD5, 0xA4, 0xA2], 0));
        }

        #[test]
        fn test_scan_takes_eight_bytes() {
            let bytes = [0xA4, 0xD4, 0xA4, 0xA1, 0xA4, 0xBF, 0xA4, 0xA2];
            assert_eq!(KSX1001Encoding::scan_unit(&bytes, 0),
                       Unit { len: 8, truncated: false });
            // without the tail the filler is an ordinary two-byte unit
            assert_eq!(KSX1001Encoding::scan_unit(&bytes[..2], 0),
                       Unit { len: 2, truncated: false });
        }

        #[test]
        fn test_compose_roles() {
            assert_eq!(compose_syllable(0xA1, 0xBF, 0xD4), Some('가'));
            assert_eq!(compose_syllable(0xA1, 0xBF, 0xA2), Some('갂'));
            // ㄳ can end a syllable but never start one
            assert_eq!(compose_syllable(0xA3, 0xBF, 0xD4), None);
            // a consonant is no medial
            assert_eq!(compose_syllable(0xA1, 0xA1, 0xD4), None);
        }
    }
}
