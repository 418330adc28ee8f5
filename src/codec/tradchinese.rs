// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! Big5, the legacy traditional Chinese charset.

use std::sync::OnceLock;

use index_tradchinese::big5 as index;

use crate::codec::{self, Alphabet, CharsetDef, EncodedUnit, Unit};
use crate::types::{Category, Charset, CharsetError, DecodeError, EncodeError};

/**
 * Big5, in its original 1984 repertoire.
 *
 * This is a traditional Chinese charset spanning `[A1-F9] [40-7E A1-FE]`,
 * originally devised by a consortium of five companies (hence the name).
 * The repertoire has three blocks: symbols (`A140`-`A3BF`), the frequently
 * used "level 1" hanzi (`A440`-`C67E`) and the less frequent "level 2"
 * hanzi (`C940`-`F9D5`). The underlying index table covers the much larger
 * Big5-HKSCS; this codec deliberately windows it down to the three
 * original blocks, so the widespread ETEN and Hong Kong extensions are
 * *not* representable.
 *
 * Two symbol cells carry overrides. `A2CC` and `A2CE` nominally map to 十
 * and 卅, which also live in level 1 (`A451`, `A4B0`); that duplication
 * would break round-tripping, so this codec maps the two symbol cells to
 * the Hangzhou numerals 〸 (U+3038) and 〺 (U+303A) instead. The cell in
 * between is *not* treated the same way: `A2CD` stays 卄 (U+5344), and the
 * Hangzhou numeral 〹 (U+3039) stays unencodable on purpose.
 */
#[derive(Clone, Copy)]
pub struct Big5Encoding;

/// The three blocks of the Big5 repertoire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Big5Category {
    /// Symbols, `A140`-`A3BF`.
    Other,
    /// Frequently used hanzi, `A440`-`C67E`.
    Level1,
    /// Less frequently used hanzi, `C940`-`F9D5`.
    Level2,
}

impl Category for Big5Category {
    fn name(self) -> &'static str {
        match self {
            Big5Category::Other => "other",
            Big5Category::Level1 => "level-1",
            Big5Category::Level2 => "level-2",
        }
    }
}

/// The code window of each category, in category order.
const BLOCKS: &[(Big5Category, u16, u16)] = &[
    (Big5Category::Other, 0xA140, 0xA3BF),
    (Big5Category::Level1, 0xA440, 0xC67E),
    (Big5Category::Level2, 0xC940, 0xF9D5),
];

fn code_category(code: u16) -> Option<Big5Category> {
    BLOCKS
        .iter()
        .find(|&&(_, start, end)| (start..=end).contains(&code))
        .map(|&(category, _, _)| category)
}

fn index_pointer(lead: u8, trail: u8) -> Option<u16> {
    let trail_offset = match trail {
        0x40..=0x7E => 0x40,
        0xA1..=0xFE => 0x62,
        _ => return None,
    };
    Some((lead as u16 - 0x81) * 157 + (trail as u16 - trail_offset))
}

impl CharsetDef for Big5Encoding {
    const NAME: &'static str = "big5";

    type Category = Big5Category;
    const CATEGORIES: &'static [Big5Category] =
        &[Big5Category::Other, Big5Category::Level1, Big5Category::Level2];

    fn scan_unit(input: &[u8], at: usize) -> Unit {
        codec::scan_wide(input, at, |b| b < 0x80)
    }

    fn decode_unit(unit: &[u8]) -> Option<char> {
        match *unit {
            [b] if b < 0x80 => Some(b as char),
            [_] => None,
            [0xA2, 0xCC] => Some('\u{3038}'),
            [0xA2, 0xCE] => Some('\u{303A}'),
            [lead, trail] => {
                code_category(u16::from_be_bytes([lead, trail]))?;
                match index::forward(index_pointer(lead, trail)?) {
                    0xFFFF => None,
                    ch => char::from_u32(ch as u32),
                }
            }
            _ => None,
        }
    }

    fn encode_char(ch: char) -> Result<EncodedUnit, &'static str> {
        match ch {
            '\u{0}'..='\u{7F}' => return Ok(EncodedUnit::single(ch as u8)),
            '\u{3038}' => return Ok(EncodedUnit::double(0xA2, 0xCC)),
            '\u{303A}' => return Ok(EncodedUnit::double(0xA2, 0xCE)),
            _ => {}
        }
        let ptr = index::backward(ch as u32);
        if ptr == 0xFFFF {
            return Err(codec::ILLEGAL_SEQUENCE);
        }
        let lead = (ptr / 157) as u8 + 0x81;
        let trail = ptr % 157;
        let trail = trail as u8 + if trail < 0x3F { 0x40 } else { 0x62 };
        if code_category(u16::from_be_bytes([lead, trail])).is_none() {
            // HKSCS and ETEN assignments fall outside the three blocks
            return Err(codec::ILLEGAL_SEQUENCE);
        }
        Ok(EncodedUnit::double(lead, trail))
    }

    fn classify(unit: &[u8]) -> Option<Big5Category> {
        match *unit {
            [lead, trail] => code_category(u16::from_be_bytes([lead, trail])),
            _ => None,
        }
    }
}

/// The lazily derived, process-wide repertoire: every code in the three
/// blocks that the codec itself resolves to a character.
fn alphabet() -> &'static Alphabet<Big5Category> {
    static ALPHABET: OnceLock<Alphabet<Big5Category>> = OnceLock::new();
    ALPHABET.get_or_init(|| {
        let buckets = BLOCKS
            .iter()
            .map(|&(category, start, end)| {
                let chars = (start..=end)
                    .filter_map(|code| codec::chr_of_code::<Big5Encoding>(code).ok())
                    .collect();
                (category, chars)
            })
            .collect();
        Alphabet::collect(Big5Encoding::NAME, buckets)
    })
}

impl Charset for Big5Encoding {
    type Category = Big5Category;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, input: &str) -> Result<Vec<u8>, EncodeError> {
        codec::encode::<Big5Encoding>(input)
    }

    fn decode(&self, input: &[u8]) -> Result<String, DecodeError> {
        codec::decode::<Big5Encoding>(input)
    }

    fn categories(&self) -> &'static [Big5Category] {
        Self::CATEGORIES
    }

    fn category_of(&self, ch: char) -> Option<Big5Category> {
        codec::category_of::<Big5Encoding>(ch)
    }

    fn alphabet(&self) -> &'static [char] {
        alphabet().full()
    }

    fn alphabet_of(&self, category: Big5Category) -> &'static [char] {
        alphabet().block(category)
    }

    fn count(&self) -> usize {
        alphabet().full().len()
    }

    fn count_of(&self, category: Big5Category) -> usize {
        alphabet().block(category).len()
    }
}

impl Big5Encoding {
    /// The packed 16-bit Big5 code of `ch`, e.g. `0xA440` for 一.
    pub fn code(&self, ch: char) -> Result<u16, CharsetError> {
        codec::code_of::<Big5Encoding>(ch)
    }

    /// The character at a packed 16-bit Big5 code.
    pub fn chr(&self, code: u16) -> Result<char, CharsetError> {
        codec::chr_of_code::<Big5Encoding>(code)
    }
}
