// This is a part of dbcs.
// See README.md and LICENSE.txt for details.

//! A list of all supported charsets, as static instances.

use crate::codec;

/// A static instance of the Big5 codec.
pub static BIG5: &codec::tradchinese::Big5Encoding = &codec::tradchinese::Big5Encoding;

/// A static instance of the GB 2312 codec.
pub static GB2312: &codec::simpchinese::GB2312Encoding = &codec::simpchinese::GB2312Encoding;

/// A static instance of the KS X 1001 codec.
pub static KSX1001: &codec::korean::KSX1001Encoding = &codec::korean::KSX1001Encoding;

/// A static instance of the Shift_JIS codec.
pub static SHIFT_JIS: &codec::japanese::ShiftJISEncoding = &codec::japanese::ShiftJISEncoding;
