// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

/*!

# dbcs

Exact, round-trippable conversion between Unicode text and the four legacy
East-Asian double-byte charsets: Big5, GB 2312, KS X 1001 (EUC-KR) and
Shift_JIS.

Unlike converters tuned for the web, every codec here targets the *strict*
historical charset, reproduces the handful of special-case overrides that
diverge from the textbook tables, reports failures with byte- and
character-accurate positions, and can enumerate the complete repertoire of
each charset, partitioned into its conventional category blocks.

## Converting

~~~~ rust
use dbcs::Charset;
use dbcs::all::{GB2312, SHIFT_JIS};

assert_eq!(GB2312.encode("汉字").unwrap(), [0xBA, 0xBA, 0xD7, 0xD6]);
assert_eq!(GB2312.decode(&[0xBA, 0xBA, 0xD7, 0xD6]).unwrap(), "汉字");
assert_eq!(SHIFT_JIS.encode("日本").unwrap(), [0x93, 0xFA, 0x96, 0x7B]);
~~~~

Failures carry the exact position and the offending input:

~~~~ rust
use dbcs::Charset;
use dbcs::all::BIG5;

let err = BIG5.encode("abc가").unwrap_err();
assert_eq!(err.position, 3);
assert_eq!(err.reason, "illegal multibyte sequence");

let err = BIG5.decode(&[0x61, 0x62, 0x63, 0xA4, 0xA4, 0xB0]).unwrap_err();
assert_eq!(err.position, 5);
assert_eq!(err.reason, "incomplete multibyte sequence");
~~~~

## Addressing characters numerically

Big5 and Shift_JIS address characters by the packed 16-bit value of their
two bytes; GB 2312 and KS X 1001 by EUC (row, col) coordinates:

~~~~ rust
use dbcs::all::{BIG5, GB2312};

assert_eq!(BIG5.code('一').unwrap(), 0xA440);
assert_eq!(BIG5.chr(0xA440).unwrap(), '一');
assert_eq!(GB2312.coord('汉').unwrap(), (26, 26));
assert_eq!(GB2312.chr(26, 26).unwrap(), '汉');
~~~~

## Categories and alphabets

Every representable character belongs to exactly one category, and the
full repertoire can be enumerated per category. Membership is queried with
`category_of`, which never fails:

~~~~ rust
use dbcs::Charset;
use dbcs::all::GB2312;
use dbcs::codec::simpchinese::GB2312Category;

assert_eq!(GB2312.category_of('汉'), Some(GB2312Category::Level1));
assert_eq!(GB2312.category_of('A'), None);
assert_eq!(GB2312.count(), 7445);
assert_eq!(GB2312.alphabet_of(GB2312Category::Level2).len(), 3008);
~~~~

The alphabet is derived once per process by brute-forcing the codec over
the charset's coordinate space, so it cannot disagree with the codec; it
is cached and handed out as read-only slices.

*/

#![deny(missing_docs)]

pub use crate::types::{Category, Charset, CharsetError, DecodeError, EncodeError};

pub mod all;
pub mod codec;
pub mod types;
