// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! Shift_JIS, the legacy Japanese charset.

use std::sync::OnceLock;

use index_japanese::jis0208 as index;

use crate::codec::{self, Alphabet, CharsetDef, EncodedUnit, Unit};
use crate::types::{Category, Charset, CharsetError, DecodeError, EncodeError};

/**
 * Shift_JIS, covering JIS X 0201 and JIS X 0208.
 *
 * The single-byte half is JIS X 0201: ISO 646:JP (US-ASCII with the yen
 * sign at `5C` and the overline at `7E`) plus half-width katakana at
 * `A1`-`DF`. The 94×94 grid of JIS X 0208 is "shifted" around the
 * single-byte area, two rows per lead byte, into
 * `[81-9F E0-EF] [40-7E 80-FC]`: rows 1-8 hold the non-kanji (symbols,
 * alphabets, kana, box drawing), rows 16-47 the level 1 kanji and rows
 * 48-84 the level 2 kanji.
 *
 * The underlying index table is Windows code page 932; this codec windows
 * it down to the strict JIS X 0208 rows, so the NEC and IBM extension
 * rows and the end-user-defined area are rejected in both directions.
 *
 * Because the JIS X 0201 roman half deviates from ASCII in exactly two
 * cells, `\` and `~` are unencodable by design: a terminal fed their byte
 * values would display ¥ and ‾. Encoding either fails with a reason
 * naming the substitute, and bytes `5C`/`7E` always decode to ¥ and ‾.
 */
#[derive(Clone, Copy)]
pub struct ShiftJISEncoding;

/// The five blocks of the Shift_JIS repertoire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftJISCategory {
    /// ASCII control characters, bytes `00`-`1F` and `7F`.
    AsciiControl,
    /// Printable JIS X 0201 roman, bytes `20`-`7E` (with ¥ and ‾ in
    /// place of `\` and `~`).
    AsciiPrintable,
    /// Half-width katakana, bytes `A1`-`DF`.
    HalfwidthKatakana,
    /// JIS X 0208 non-kanji, lead `81`-`87` or `88` with trail up to `9E`.
    DoubleOther,
    /// JIS X 0208 kanji, lead `88` from trail `9F` through lead `EF`.
    DoubleKanji,
}

impl Category for ShiftJISCategory {
    fn name(self) -> &'static str {
        match self {
            ShiftJISCategory::AsciiControl => "single-byte-ascii-control",
            ShiftJISCategory::AsciiPrintable => "single-byte-ascii-printable",
            ShiftJISCategory::HalfwidthKatakana => "single-byte-half-width-katakana",
            ShiftJISCategory::DoubleOther => "double-byte-other",
            ShiftJISCategory::DoubleKanji => "double-byte-kanji",
        }
    }
}

const BACKSLASH_SUBSTITUTED: &str = r"'\' is displayed as '¥'";
const TILDE_SUBSTITUTED: &str = "'~' is displayed as '‾'";

fn single_byte(b: u8) -> bool {
    b < 0x80 || (0xA1..=0xDF).contains(&b)
}

/// JIS X 0208 proper assigns the non-kanji rows 1-8 and the kanji rows
/// 16-84; everything else in the code page 932 table is an extension.
fn strict_row(ptr: u16) -> bool {
    matches!(ptr / 94, 0..=7 | 15..=83)
}

fn index_pointer(lead: u8, trail: u8) -> Option<u16> {
    let (lead, trail) = (lead as u16, trail as u16);
    let lead_offset = if lead < 0xA0 { 0x81 } else { 0xC1 };
    let trail_offset = if trail < 0x7F { 0x40 } else { 0x41 };
    let ptr = match (lead, trail) {
        (0x81..=0x9F | 0xE0..=0xFC, 0x40..=0x7E | 0x80..=0xFC) => {
            (lead - lead_offset) * 188 + (trail - trail_offset)
        }
        _ => return None,
    };
    strict_row(ptr).then_some(ptr)
}

impl CharsetDef for ShiftJISEncoding {
    const NAME: &'static str = "shift-jis";

    type Category = ShiftJISCategory;
    const CATEGORIES: &'static [ShiftJISCategory] = &[
        ShiftJISCategory::AsciiControl,
        ShiftJISCategory::AsciiPrintable,
        ShiftJISCategory::HalfwidthKatakana,
        ShiftJISCategory::DoubleOther,
        ShiftJISCategory::DoubleKanji,
    ];

    fn scan_unit(input: &[u8], at: usize) -> Unit {
        codec::scan_wide(input, at, single_byte)
    }

    fn decode_unit(unit: &[u8]) -> Option<char> {
        match *unit {
            [0x5C] => Some('\u{A5}'),
            [0x7E] => Some('\u{203E}'),
            [b] if b < 0x80 => Some(b as char),
            [b @ 0xA1..=0xDF] => char::from_u32(0xFF61 + (b - 0xA1) as u32),
            [_] => None,
            [lead, trail] => match index::forward(index_pointer(lead, trail)?) {
                0xFFFF => None,
                ch => char::from_u32(ch as u32),
            },
            _ => None,
        }
    }

    fn encode_char(ch: char) -> Result<EncodedUnit, &'static str> {
        match ch {
            '\\' => Err(BACKSLASH_SUBSTITUTED),
            '~' => Err(TILDE_SUBSTITUTED),
            '\u{0}'..='\u{7F}' => Ok(EncodedUnit::single(ch as u8)),
            '\u{A5}' => Ok(EncodedUnit::single(0x5C)),
            '\u{203E}' => Ok(EncodedUnit::single(0x7E)),
            '\u{FF61}'..='\u{FF9F}' => {
                Ok(EncodedUnit::single((ch as u32 - 0xFF61 + 0xA1) as u8))
            }
            _ => {
                let ptr = index::backward(ch as u32);
                if ptr == 0xFFFF || !strict_row(ptr) {
                    return Err(codec::ILLEGAL_SEQUENCE);
                }
                let lead = ptr / 188;
                let lead = (lead + if lead < 0x1F { 0x81 } else { 0xC1 }) as u8;
                let trail = ptr % 188;
                let trail = (trail + if trail < 0x3F { 0x40 } else { 0x41 }) as u8;
                Ok(EncodedUnit::double(lead, trail))
            }
        }
    }

    fn classify(unit: &[u8]) -> Option<ShiftJISCategory> {
        match *unit {
            [b] => match b {
                0x00..=0x1F | 0x7F => Some(ShiftJISCategory::AsciiControl),
                0x20..=0x7E => Some(ShiftJISCategory::AsciiPrintable),
                0xA1..=0xDF => Some(ShiftJISCategory::HalfwidthKatakana),
                _ => None,
            },
            [0x81..=0x87, _] => Some(ShiftJISCategory::DoubleOther),
            [0x88, trail] => Some(if trail <= 0x9E {
                ShiftJISCategory::DoubleOther
            } else {
                ShiftJISCategory::DoubleKanji
            }),
            [0x89..=0x9F | 0xE0..=0xEF, _] => Some(ShiftJISCategory::DoubleKanji),
            _ => None,
        }
    }

}

/// The lazily derived, process-wide repertoire: every byte pattern in the
/// category blocks that the codec itself resolves to a character.
fn alphabet() -> &'static Alphabet<ShiftJISCategory> {
    static ALPHABET: OnceLock<Alphabet<ShiftJISCategory>> = OnceLock::new();
    ALPHABET.get_or_init(|| {
        Alphabet::collect(
            ShiftJISEncoding::NAME,
            vec![
                (
                    ShiftJISCategory::AsciiControl,
                    single_byte_block((0x00..=0x1F).chain(std::iter::once(0x7F))),
                ),
                (ShiftJISCategory::AsciiPrintable, single_byte_block(0x20..=0x7E)),
                (ShiftJISCategory::HalfwidthKatakana, single_byte_block(0xA1..=0xDF)),
                (ShiftJISCategory::DoubleOther, double_other_block()),
                (ShiftJISCategory::DoubleKanji, double_kanji_block()),
            ],
        )
    })
}

fn push_decoded(chars: &mut Vec<char>, lead: u8, trail: u8) {
    if let Ok(text) = codec::decode::<ShiftJISEncoding>(&[lead, trail]) {
        chars.extend(text.chars());
    }
}

fn single_byte_block(bytes: impl Iterator<Item = u8>) -> Vec<char> {
    bytes
        .filter_map(|b| codec::decode::<ShiftJISEncoding>(&[b]).ok()?.chars().next())
        .collect()
}

/// Lead `81`-`87` across the full trail span `40`-`7E`, `80`-`FC`;
/// lead `88` stops at trail `9E` where the level 1 kanji begin.
fn double_other_block() -> Vec<char> {
    let mut chars = Vec::new();
    for lead in 0x81..=0x88u8 {
        let trail_end = if lead == 0x88 { 0x9E } else { 0xFC };
        for trail in (0x40..=0x7E).chain(0x80..=trail_end) {
            push_decoded(&mut chars, lead, trail);
        }
    }
    chars
}

/// Lead `88` from trail `9F`, then leads `89`-`9F` and `E0`-`EF` across
/// the full trail span.
fn double_kanji_block() -> Vec<char> {
    let mut chars = Vec::new();
    for lead in (0x88..=0x9Fu8).chain(0xE0..=0xEF) {
        if lead != 0x88 {
            for trail in 0x40..=0x7E {
                push_decoded(&mut chars, lead, trail);
            }
        }
        let trail_start = if lead == 0x88 { 0x9F } else { 0x80 };
        for trail in trail_start..=0xFC {
            push_decoded(&mut chars, lead, trail);
        }
    }
    chars
}

impl Charset for ShiftJISEncoding {
    type Category = ShiftJISCategory;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, input: &str) -> Result<Vec<u8>, EncodeError> {
        codec::encode::<ShiftJISEncoding>(input)
    }

    fn decode(&self, input: &[u8]) -> Result<String, DecodeError> {
        codec::decode::<ShiftJISEncoding>(input)
    }

    fn categories(&self) -> &'static [ShiftJISCategory] {
        Self::CATEGORIES
    }

    fn category_of(&self, ch: char) -> Option<ShiftJISCategory> {
        codec::category_of::<ShiftJISEncoding>(ch)
    }

    fn alphabet(&self) -> &'static [char] {
        alphabet().full()
    }

    fn alphabet_of(&self, category: ShiftJISCategory) -> &'static [char] {
        alphabet().block(category)
    }

    fn count(&self) -> usize {
        alphabet().full().len()
    }

    fn count_of(&self, category: ShiftJISCategory) -> usize {
        alphabet().block(category).len()
    }
}

impl ShiftJISEncoding {
    /// The packed 16-bit code of a double-byte character, e.g. `0x93FA`
    /// for 日.
    pub fn code(&self, ch: char) -> Result<u16, CharsetError> {
        codec::code_of::<ShiftJISEncoding>(ch)
    }

    /// The character at a packed 16-bit code.
    pub fn chr(&self, code: u16) -> Result<char, CharsetError> {
        codec::chr_of_code::<ShiftJISEncoding>(code)
    }
}
