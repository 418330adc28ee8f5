// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! Public interface to the charsets: the `Charset` trait and error types.

use std::fmt;

use snafu::Snafu;

/// A category label within one charset's repertoire.
///
/// Categories partition the full repertoire of a charset into the blocks
/// conventionally used to talk about it (e.g. Big5 level 1 versus level 2
/// hanzi). Every representable character belongs to exactly one category.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// The conventional name of the category, e.g. `"level-1"`.
    fn name(self) -> &'static str;
}

/// The uniform surface shared by all four charsets.
///
/// The charsets differ only in their tables, lead byte rules and category
/// vocabulary; every operation below behaves identically across them.
/// Numeric addressing (`code`/`coord` and `chr`) is not part of this trait
/// since Big5 and Shift_JIS address characters by a packed 16-bit code
/// while GB 2312 and KS X 1001 use EUC row/column coordinates; see the
/// inherent methods of each encoding type.
pub trait Charset {
    /// The category vocabulary of this charset.
    type Category: Category;

    /// The canonical lowercase name of the charset, e.g. `"big5"`.
    fn name(&self) -> &'static str;

    /// Converts a string into a byte sequence in this charset.
    ///
    /// The conversion is all-or-nothing: either every character converts
    /// and the full output is returned, or the first unconvertible
    /// character is reported with its character index.
    fn encode(&self, input: &str) -> Result<Vec<u8>, EncodeError>;

    /// Converts a byte sequence in this charset into a string.
    ///
    /// The conversion is all-or-nothing: the first invalid code unit is
    /// reported with its exact byte span and starting byte offset.
    fn decode(&self, input: &[u8]) -> Result<String, DecodeError>;

    /// All categories of this charset, in their conventional order.
    fn categories(&self) -> &'static [Self::Category];

    /// The category of `ch`, or `None` when `ch` is not representable.
    ///
    /// This never fails; it is the intended way to test membership.
    fn category_of(&self, ch: char) -> Option<Self::Category>;

    /// Every representable character, ordered by category block and by
    /// ascending code within each block.
    fn alphabet(&self) -> &'static [char];

    /// The members of one category, in ascending code order.
    fn alphabet_of(&self, category: Self::Category) -> &'static [char];

    /// The total number of representable characters.
    fn count(&self) -> usize;

    /// The number of characters in one category.
    fn count_of(&self, category: Self::Category) -> usize;
}

/// A character could not be converted into the charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    /// The charset that rejected the character.
    pub charset: &'static str,
    /// The offending character.
    pub character: char,
    /// The character index of the offending character in the input.
    pub position: usize,
    /// Why the character has no byte sequence in this charset.
    pub reason: &'static str,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' codec can't encode character '\\u{:x}' in position {}: {}",
            self.charset, self.character as u32, self.position, self.reason
        )
    }
}

impl std::error::Error for EncodeError {}

/// A byte sequence could not be converted out of the charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// The charset that rejected the code unit.
    pub charset: &'static str,
    /// The exact bytes of the failing code unit.
    pub bytes: Vec<u8>,
    /// The byte offset at which the failing code unit begins.
    pub position: usize,
    /// Why the code unit maps to no character.
    pub reason: &'static str,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bytes.as_slice() {
            [byte] => write!(
                f,
                "'{}' codec can't decode byte {:#04x} in position {}: {}",
                self.charset, byte, self.position, self.reason
            ),
            bytes => write!(
                f,
                "'{}' codec can't decode bytes in position {}-{}: {}",
                self.charset,
                self.position,
                self.position + bytes.len().max(1) - 1,
                self.reason
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Failure of a numeric addressing operation (`code`, `coord` or `chr`).
///
/// Precondition violations are reported directly; failures of the
/// underlying conversion keep the codec error as the source.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum CharsetError {
    /// The character has no two-byte code in the charset.
    #[snafu(display("'{character}' is not a '{charset}' character"))]
    NotInCharset {
        /// The charset name.
        charset: &'static str,
        /// The rejected character.
        character: char,
        /// The conversion failure underneath, if the character is not
        /// representable at all.
        #[snafu(source(from(EncodeError, Some)))]
        source: Option<EncodeError>,
    },

    /// The character converts to a single byte and is therefore not
    /// addressable by a two-byte code or coordinate.
    #[snafu(display("'{character}' is an ascii character"))]
    Ascii {
        /// The rejected character.
        character: char,
    },

    /// A row or column lies outside the 94×94 grid.
    #[snafu(display("'row' and 'col' must be between 1 and 94"))]
    CoordOutOfRange {
        /// The requested row.
        row: i32,
        /// The requested column.
        col: i32,
    },

    /// The code addresses no assigned character.
    #[snafu(display("'{charset}' code 0x{code:04X} is undefined"))]
    UndefinedCode {
        /// The charset name.
        charset: &'static str,
        /// The rejected code.
        code: u16,
        /// The decode failure underneath, when the code does not form a
        /// valid code unit.
        #[snafu(source(from(DecodeError, Some)))]
        source: Option<DecodeError>,
    },

    /// The coordinate addresses no assigned character.
    #[snafu(display("'{charset}' coord at ({row}, {col}) is undefined"))]
    UndefinedCoord {
        /// The charset name.
        charset: &'static str,
        /// The requested row.
        row: u8,
        /// The requested column.
        col: u8,
        /// The decode failure underneath.
        source: DecodeError,
    },
}
