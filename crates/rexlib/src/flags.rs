// Compile-time and execution-time option bitmasks
//
// Values match the GRegexCompileFlags / GRegexMatchFlags numbering, so a
// numeric mask built by a caller against those constants means the same here.

use bitflags::bitflags;

use crate::error_codes::ERROR_NAMES;

/// Options fixed when a pattern is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CompileFlags(u32);

bitflags! {
    impl CompileFlags: u32 {
        const CASELESS = 1 << 0;
        const MULTILINE = 1 << 1;
        const DOTALL = 1 << 2;
        const EXTENDED = 1 << 3;
        const ANCHORED = 1 << 4;
        const DOLLAR_ENDONLY = 1 << 5;
        const UNGREEDY = 1 << 9;
        /// Treat subjects as raw bytes instead of UTF-8.
        const RAW = 1 << 11;
        const NO_AUTO_CAPTURE = 1 << 12;
        const OPTIMIZE = 1 << 13;
        const FIRSTLINE = 1 << 18;
        const DUPNAMES = 1 << 19;
        const NEWLINE_CR = 1 << 20;
        const NEWLINE_LF = 1 << 21;
        const NEWLINE_CRLF = (1 << 20) | (1 << 21);
    }
}

/// Options for a single match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExecFlags(u32);

bitflags! {
    impl ExecFlags: u32 {
        const ANCHORED = 1 << 4;
        const NOTBOL = 1 << 7;
        const NOTEOL = 1 << 8;
        const NOTEMPTY = 1 << 10;
        const PARTIAL = 1 << 15;
        const NEWLINE_CR = 1 << 20;
        const NEWLINE_LF = 1 << 21;
        const NEWLINE_CRLF = (1 << 20) | (1 << 21);
        const NEWLINE_ANY = 1 << 22;
        const NEWLINE_ANYCRLF = (1 << 20) | (1 << 22);
        const BSR_ANYCRLF = 1 << 23;
        const BSR_ANY = 1 << 24;
        const PARTIAL_HARD = 1 << 27;
        const NOTEMPTY_ATSTART = 1 << 28;
    }
}

// Numeric masks are taken as-is; bits without a name are kept so the engine
// can reject them.
impl From<u32> for CompileFlags {
    fn from(bits: u32) -> Self {
        CompileFlags::from_bits_retain(bits)
    }
}

impl From<u32> for ExecFlags {
    fn from(bits: u32) -> Self {
        ExecFlags::from_bits_retain(bits)
    }
}

impl CompileFlags {
    /// Parse single-character shorthand: `i` caseless, `m` multiline,
    /// `s` dotall, `x` extended, `U` ungreedy. Other characters are ignored.
    pub fn parse(shorthand: &str) -> Self {
        let mut res = CompileFlags::empty();
        for ch in shorthand.bytes() {
            match ch {
                b'i' => res |= CompileFlags::CASELESS,
                b'm' => res |= CompileFlags::MULTILINE,
                b's' => res |= CompileFlags::DOTALL,
                b'x' => res |= CompileFlags::EXTENDED,
                b'U' => res |= CompileFlags::UNGREEDY,
                _ => {}
            }
        }
        res
    }
}

impl From<&str> for CompileFlags {
    fn from(shorthand: &str) -> Self {
        CompileFlags::parse(shorthand)
    }
}

pub static COMPILE_FLAG_NAMES: &[(&str, u32)] = &[
    ("CASELESS", CompileFlags::CASELESS.bits()),
    ("MULTILINE", CompileFlags::MULTILINE.bits()),
    ("DOTALL", CompileFlags::DOTALL.bits()),
    ("EXTENDED", CompileFlags::EXTENDED.bits()),
    ("ANCHORED", CompileFlags::ANCHORED.bits()),
    ("DOLLAR_ENDONLY", CompileFlags::DOLLAR_ENDONLY.bits()),
    ("UNGREEDY", CompileFlags::UNGREEDY.bits()),
    ("RAW", CompileFlags::RAW.bits()),
    ("NO_AUTO_CAPTURE", CompileFlags::NO_AUTO_CAPTURE.bits()),
    ("OPTIMIZE", CompileFlags::OPTIMIZE.bits()),
    ("FIRSTLINE", CompileFlags::FIRSTLINE.bits()),
    ("DUPNAMES", CompileFlags::DUPNAMES.bits()),
    ("NEWLINE_CR", CompileFlags::NEWLINE_CR.bits()),
    ("NEWLINE_LF", CompileFlags::NEWLINE_LF.bits()),
    ("NEWLINE_CRLF", CompileFlags::NEWLINE_CRLF.bits()),
];

pub static MATCH_FLAG_NAMES: &[(&str, u32)] = &[
    ("ANCHORED", ExecFlags::ANCHORED.bits()),
    ("NOTBOL", ExecFlags::NOTBOL.bits()),
    ("NOTEOL", ExecFlags::NOTEOL.bits()),
    ("NOTEMPTY", ExecFlags::NOTEMPTY.bits()),
    ("PARTIAL", ExecFlags::PARTIAL.bits()),
    ("NEWLINE_CR", ExecFlags::NEWLINE_CR.bits()),
    ("NEWLINE_LF", ExecFlags::NEWLINE_LF.bits()),
    ("NEWLINE_CRLF", ExecFlags::NEWLINE_CRLF.bits()),
    ("NEWLINE_ANY", ExecFlags::NEWLINE_ANY.bits()),
    ("NEWLINE_ANYCRLF", ExecFlags::NEWLINE_ANYCRLF.bits()),
    ("BSR_ANYCRLF", ExecFlags::BSR_ANYCRLF.bits()),
    ("BSR_ANY", ExecFlags::BSR_ANY.bits()),
    ("PARTIAL_SOFT", ExecFlags::PARTIAL.bits()),
    ("PARTIAL_HARD", ExecFlags::PARTIAL_HARD.bits()),
    ("NOTEMPTY_ATSTART", ExecFlags::NOTEMPTY_ATSTART.bits()),
];

/// Compile flag names and values.
pub fn compile_flags() -> &'static [(&'static str, u32)] {
    COMPILE_FLAG_NAMES
}

/// Match flag names and values.
pub fn match_flags() -> &'static [(&'static str, u32)] {
    MATCH_FLAG_NAMES
}

/// Every known name: compile flags, match flags and `ERROR_*` codes.
/// Names shared by both flag sets (ANCHORED, NEWLINE_*) carry the same value
/// and appear once.
pub fn flags() -> Vec<(&'static str, i64)> {
    let mut all: Vec<(&'static str, i64)> = Vec::with_capacity(
        COMPILE_FLAG_NAMES.len() + MATCH_FLAG_NAMES.len() + ERROR_NAMES.len(),
    );
    for &(name, value) in COMPILE_FLAG_NAMES.iter().chain(MATCH_FLAG_NAMES) {
        if !all.iter().any(|(n, _)| *n == name) {
            all.push((name, value as i64));
        }
    }
    all.extend(ERROR_NAMES.iter().map(|&(name, code)| (name, code as i64)));
    all
}
