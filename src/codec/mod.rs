// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! The charset implementations.
//!
//! Each submodule hosts one charset family in the region naming scheme of
//! the index tables: `tradchinese` (Big5), `simpchinese` (GB 2312),
//! `korean` (KS X 1001) and `japanese` (Shift_JIS). The submodules are
//! deliberately thin: they define the lead byte rule, the override table,
//! the window onto the base index table and the category ranges, while the
//! conversion loops, the numeric addressing and the alphabet cache below
//! are shared. Keeping a single copy of the loops is what guarantees the
//! four charsets cannot drift apart in position tracking or error
//! reporting.

use std::ops::Range;

use snafu::{ensure, ResultExt};

use crate::types::{
    AsciiSnafu, Category, CharsetError, CoordOutOfRangeSnafu, DecodeError, EncodeError,
    NotInCharsetSnafu, UndefinedCodeSnafu, UndefinedCoordSnafu,
};

pub mod japanese;
pub mod korean;
pub mod simpchinese;
pub mod tradchinese;

/// Reason reported when a character or code unit has no mapping.
pub(crate) const ILLEGAL_SEQUENCE: &str = "illegal multibyte sequence";

/// Reason reported when the stream ends inside a multibyte code unit.
pub(crate) const INCOMPLETE_SEQUENCE: &str = "incomplete multibyte sequence";

/// EUC row/column values are the raw bytes minus this offset.
pub(crate) const EUC_OFFSET: u8 = 0xA0;

/// One scanned code unit: how many bytes it spans and whether the charset
/// wanted more bytes than the stream had left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Unit {
    pub len: usize,
    pub truncated: bool,
}

/// Scans one code unit under the common "one lead byte, maybe one trail
/// byte" rule. `single` decides whether a byte is a complete unit on its
/// own; a lead byte at the very end of the stream yields a truncated
/// one-byte unit that will fail to convert.
pub(crate) fn scan_wide(input: &[u8], at: usize, single: fn(u8) -> bool) -> Unit {
    if single(input[at]) {
        Unit { len: 1, truncated: false }
    } else if at + 1 < input.len() {
        Unit { len: 2, truncated: false }
    } else {
        Unit { len: 1, truncated: true }
    }
}

/// The byte sequence of one encoded character. At most eight bytes: the
/// longest unit in any of the charsets is the KS X 1001 composed syllable.
pub(crate) struct EncodedUnit {
    bytes: [u8; 8],
    len: usize,
}

impl EncodedUnit {
    pub(crate) fn single(byte: u8) -> EncodedUnit {
        EncodedUnit { bytes: [byte, 0, 0, 0, 0, 0, 0, 0], len: 1 }
    }

    pub(crate) fn double(lead: u8, trail: u8) -> EncodedUnit {
        EncodedUnit { bytes: [lead, trail, 0, 0, 0, 0, 0, 0], len: 2 }
    }

    pub(crate) fn composed(bytes: [u8; 8]) -> EncodedUnit {
        EncodedUnit { bytes, len: 8 }
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// What a charset submodule must provide: its name, its category
/// vocabulary, the unit scanner, the two unit-level conversions (override
/// table first, then the windowed base table) and the byte pattern
/// classifier. Everything else is derived.
pub(crate) trait CharsetDef {
    const NAME: &'static str;

    type Category: Category;
    const CATEGORIES: &'static [Self::Category];

    /// Delimits the code unit starting at `input[at]`. Must be pure and
    /// may look ahead past the unit itself (KS X 1001 does).
    fn scan_unit(input: &[u8], at: usize) -> Unit;

    /// Converts one scanned unit into a character, or `None` when the
    /// unit is unassigned, malformed or truncated.
    fn decode_unit(unit: &[u8]) -> Option<char>;

    /// Converts one character into its unit, or the reason it has none.
    fn encode_char(ch: char) -> Result<EncodedUnit, &'static str>;

    /// Classifies an encoded byte pattern. `None` for patterns outside
    /// every category range (single bytes for the EUC charsets, units
    /// beyond the category windows otherwise).
    fn classify(unit: &[u8]) -> Option<Self::Category>;
}

pub(crate) fn encode<D: CharsetDef>(input: &str) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(input.len());
    for (position, ch) in input.chars().enumerate() {
        match D::encode_char(ch) {
            Ok(unit) => out.extend_from_slice(unit.bytes()),
            Err(reason) => {
                return Err(EncodeError { charset: D::NAME, character: ch, position, reason })
            }
        }
    }
    Ok(out)
}

pub(crate) fn decode<D: CharsetDef>(input: &[u8]) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(input.len());
    let mut at = 0;
    while at < input.len() {
        let unit = D::scan_unit(input, at);
        let bytes = &input[at..at + unit.len];
        match D::decode_unit(bytes) {
            Some(ch) => out.push(ch),
            None => {
                let reason = if unit.truncated { INCOMPLETE_SEQUENCE } else { ILLEGAL_SEQUENCE };
                return Err(DecodeError {
                    charset: D::NAME,
                    bytes: bytes.to_vec(),
                    position: at,
                    reason,
                });
            }
        }
        at += unit.len;
    }
    Ok(out)
}

pub(crate) fn category_of<D: CharsetDef>(ch: char) -> Option<D::Category> {
    let unit = D::encode_char(ch).ok()?;
    D::classify(unit.bytes())
}

fn encode_one<D: CharsetDef>(ch: char) -> Result<EncodedUnit, EncodeError> {
    D::encode_char(ch)
        .map_err(|reason| EncodeError { charset: D::NAME, character: ch, position: 0, reason })
}

/// The packed 16-bit code of a character, for the code-addressed charsets
/// (Big5 and Shift_JIS).
pub(crate) fn code_of<D: CharsetDef>(ch: char) -> Result<u16, CharsetError> {
    let unit = encode_one::<D>(ch).context(NotInCharsetSnafu { charset: D::NAME, character: ch })?;
    match *unit.bytes() {
        [_] => AsciiSnafu { character: ch }.fail(),
        [lead, trail] => Ok(u16::from_be_bytes([lead, trail])),
        // the composed KS X 1001 form has no single code
        _ => Err(CharsetError::NotInCharset { charset: D::NAME, character: ch, source: None }),
    }
}

/// The EUC (row, col) coordinate of a character, for the
/// coordinate-addressed charsets (GB 2312 and KS X 1001).
pub(crate) fn coord_of<D: CharsetDef>(ch: char) -> Result<(u8, u8), CharsetError> {
    let unit = encode_one::<D>(ch).context(NotInCharsetSnafu { charset: D::NAME, character: ch })?;
    match *unit.bytes() {
        [_] => AsciiSnafu { character: ch }.fail(),
        [lead, trail] => Ok((lead - EUC_OFFSET, trail - EUC_OFFSET)),
        _ => Err(CharsetError::NotInCharset { charset: D::NAME, character: ch, source: None }),
    }
}

/// The inverse of [`code_of`]. Codes up to 0xFF address one-byte units,
/// anything larger the corresponding big-endian byte pair.
pub(crate) fn chr_of_code<D: CharsetDef>(code: u16) -> Result<char, CharsetError> {
    let buf = code.to_be_bytes();
    let bytes: &[u8] = if code <= 0xFF { &buf[1..] } else { &buf };
    let text = decode::<D>(bytes).context(UndefinedCodeSnafu { charset: D::NAME, code })?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        // a pair of one-byte units is not addressable as one code
        _ => Err(CharsetError::UndefinedCode { charset: D::NAME, code, source: None }),
    }
}

/// The inverse of [`coord_of`]. Rejects out-of-grid coordinates before
/// touching any table.
pub(crate) fn chr_of_coord<D: CharsetDef>(row: i32, col: i32) -> Result<char, CharsetError> {
    ensure!(
        (1..=94).contains(&row) && (1..=94).contains(&col),
        CoordOutOfRangeSnafu { row, col }
    );
    let (row, col) = (row as u8, col as u8);
    let bytes = [row + EUC_OFFSET, col + EUC_OFFSET];
    let text = decode::<D>(&bytes)
        .context(UndefinedCoordSnafu { charset: D::NAME, row, col })?;
    let mut chars = text.chars();
    let ch = chars.next().expect("a two-byte EUC unit decodes to one character");
    debug_assert!(chars.next().is_none());
    Ok(ch)
}

/// The derived repertoire of one charset: every representable character,
/// grouped into contiguous category blocks in declaration order.
///
/// Built once per process by brute-forcing the codec over the charset's
/// coordinate or byte space, then kept immutable; callers only ever see
/// shared slices of it.
pub(crate) struct Alphabet<C: 'static> {
    chars: Vec<char>,
    blocks: Vec<(C, Range<usize>)>,
}

impl<C: Category> Alphabet<C> {
    pub(crate) fn collect(name: &'static str, buckets: Vec<(C, Vec<char>)>) -> Alphabet<C> {
        let mut chars = Vec::new();
        let mut blocks = Vec::with_capacity(buckets.len());
        for (category, members) in buckets {
            let start = chars.len();
            chars.extend(members);
            blocks.push((category, start..chars.len()));
        }
        tracing::debug!(charset = name, count = chars.len(), "derived charset alphabet");
        Alphabet { chars, blocks }
    }

    pub(crate) fn full(&self) -> &[char] {
        &self.chars
    }

    pub(crate) fn block(&self, category: C) -> &[char] {
        self.blocks
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(&[][..], |(_, span)| &self.chars[span.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_single(b: u8) -> bool {
        b < 0x80
    }

    #[test]
    fn test_scan_wide_single() {
        assert_eq!(scan_wide(b"ab", 0, ascii_single), Unit { len: 1, truncated: false });
        assert_eq!(scan_wide(b"ab", 1, ascii_single), Unit { len: 1, truncated: false });
    }

    #[test]
    fn test_scan_wide_double() {
        assert_eq!(scan_wide(&[0xb0, 0xa1], 0, ascii_single), Unit { len: 2, truncated: false });
        assert_eq!(scan_wide(&[0x61, 0xb0, 0xa1], 1, ascii_single),
                   Unit { len: 2, truncated: false });
    }

    #[test]
    fn test_scan_wide_dangling_lead() {
        assert_eq!(scan_wide(&[0xb0], 0, ascii_single), Unit { len: 1, truncated: true });
        assert_eq!(scan_wide(&[0x61, 0xb0], 1, ascii_single), Unit { len: 1, truncated: true });
    }

    #[test]
    fn test_encoded_unit_spans() {
        assert_eq!(EncodedUnit::single(0x41).bytes(), [0x41]);
        assert_eq!(EncodedUnit::double(0xb0, 0xa1).bytes(), [0xb0, 0xa1]);
        let composed = [0xa4, 0xd4, 0xa4, 0xa1, 0xa4, 0xbf, 0xa4, 0xd4];
        assert_eq!(EncodedUnit::composed(composed).bytes(), composed);
    }
}
