// Engine error codes and their symbolic names
//
// Numbering follows the GRegexError enumeration so codes stay stable for
// callers that compare against numbers.

use std::collections::HashMap;
use std::sync::OnceLock;

use ahash::RandomState;

pub const ERROR_COMPILE: i32 = 0;
pub const ERROR_OPTIMIZE: i32 = 1;
pub const ERROR_REPLACE: i32 = 2;
pub const ERROR_MATCH: i32 = 3;
pub const ERROR_INTERNAL: i32 = 4;
pub const ERROR_STRAY_BACKSLASH: i32 = 101;
pub const ERROR_UNRECOGNIZED_ESCAPE: i32 = 103;
pub const ERROR_QUANTIFIERS_OUT_OF_ORDER: i32 = 104;
pub const ERROR_QUANTIFIER_TOO_BIG: i32 = 105;
pub const ERROR_UNTERMINATED_CHARACTER_CLASS: i32 = 106;
pub const ERROR_INVALID_ESCAPE_IN_CHARACTER_CLASS: i32 = 107;
pub const ERROR_RANGE_OUT_OF_ORDER: i32 = 108;
pub const ERROR_NOTHING_TO_REPEAT: i32 = 109;
pub const ERROR_UNRECOGNIZED_CHARACTER: i32 = 112;
pub const ERROR_UNMATCHED_PARENTHESIS: i32 = 114;
pub const ERROR_INEXISTENT_SUBPATTERN_REFERENCE: i32 = 115;
pub const ERROR_EXPRESSION_TOO_LARGE: i32 = 120;
pub const ERROR_MEMORY_ERROR: i32 = 121;
pub const ERROR_ASSERTION_EXPECTED: i32 = 128;
pub const ERROR_DUPLICATE_SUBPATTERN_NAME: i32 = 143;
pub const ERROR_UNKNOWN_PROPERTY: i32 = 147;
pub const ERROR_TOO_MANY_SUBPATTERNS: i32 = 149;

pub static ERROR_NAMES: &[(&str, i32)] = &[
    ("ERROR_COMPILE", ERROR_COMPILE),
    ("ERROR_OPTIMIZE", ERROR_OPTIMIZE),
    ("ERROR_REPLACE", ERROR_REPLACE),
    ("ERROR_MATCH", ERROR_MATCH),
    ("ERROR_INTERNAL", ERROR_INTERNAL),
    ("ERROR_STRAY_BACKSLASH", ERROR_STRAY_BACKSLASH),
    ("ERROR_MISSING_CONTROL_CHAR", 102),
    ("ERROR_UNRECOGNIZED_ESCAPE", ERROR_UNRECOGNIZED_ESCAPE),
    ("ERROR_QUANTIFIERS_OUT_OF_ORDER", ERROR_QUANTIFIERS_OUT_OF_ORDER),
    ("ERROR_QUANTIFIER_TOO_BIG", ERROR_QUANTIFIER_TOO_BIG),
    ("ERROR_UNTERMINATED_CHARACTER_CLASS", ERROR_UNTERMINATED_CHARACTER_CLASS),
    (
        "ERROR_INVALID_ESCAPE_IN_CHARACTER_CLASS",
        ERROR_INVALID_ESCAPE_IN_CHARACTER_CLASS,
    ),
    ("ERROR_RANGE_OUT_OF_ORDER", ERROR_RANGE_OUT_OF_ORDER),
    ("ERROR_NOTHING_TO_REPEAT", ERROR_NOTHING_TO_REPEAT),
    ("ERROR_UNRECOGNIZED_CHARACTER", ERROR_UNRECOGNIZED_CHARACTER),
    ("ERROR_POSIX_NAMED_CLASS_OUTSIDE_CLASS", 113),
    ("ERROR_UNMATCHED_PARENTHESIS", ERROR_UNMATCHED_PARENTHESIS),
    (
        "ERROR_INEXISTENT_SUBPATTERN_REFERENCE",
        ERROR_INEXISTENT_SUBPATTERN_REFERENCE,
    ),
    ("ERROR_UNTERMINATED_COMMENT", 118),
    ("ERROR_EXPRESSION_TOO_LARGE", ERROR_EXPRESSION_TOO_LARGE),
    ("ERROR_MEMORY_ERROR", ERROR_MEMORY_ERROR),
    ("ERROR_VARIABLE_LENGTH_LOOKBEHIND", 125),
    ("ERROR_MALFORMED_CONDITION", 126),
    ("ERROR_TOO_MANY_CONDITIONAL_BRANCHES", 127),
    ("ERROR_ASSERTION_EXPECTED", ERROR_ASSERTION_EXPECTED),
    ("ERROR_UNKNOWN_POSIX_CLASS_NAME", 130),
    ("ERROR_POSIX_COLLATING_ELEMENTS_NOT_SUPPORTED", 131),
    ("ERROR_HEX_CODE_TOO_LARGE", 134),
    ("ERROR_INVALID_CONDITION", 135),
    ("ERROR_SINGLE_BYTE_MATCH_IN_LOOKBEHIND", 136),
    ("ERROR_INFINITE_LOOP", 140),
    ("ERROR_MISSING_SUBPATTERN_NAME_TERMINATOR", 142),
    ("ERROR_DUPLICATE_SUBPATTERN_NAME", ERROR_DUPLICATE_SUBPATTERN_NAME),
    ("ERROR_MALFORMED_PROPERTY", 146),
    ("ERROR_UNKNOWN_PROPERTY", ERROR_UNKNOWN_PROPERTY),
    ("ERROR_SUBPATTERN_NAME_TOO_LONG", 148),
    ("ERROR_TOO_MANY_SUBPATTERNS", ERROR_TOO_MANY_SUBPATTERNS),
    ("ERROR_INVALID_OCTAL_VALUE", 151),
    ("ERROR_TOO_MANY_BRANCHES_IN_DEFINE", 154),
    ("ERROR_DEFINE_REPETION", 155),
    ("ERROR_INCONSISTENT_NEWLINE_OPTIONS", 156),
    ("ERROR_MISSING_BACK_REFERENCE", 157),
];

fn table() -> &'static HashMap<i32, &'static str, RandomState> {
    static TABLE: OnceLock<HashMap<i32, &'static str, RandomState>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::with_capacity_and_hasher(ERROR_NAMES.len(), RandomState::new());
        for &(name, code) in ERROR_NAMES {
            map.insert(code, name);
        }
        map
    })
}

/// Symbolic name for an engine error code, `None` if unknown.
pub fn lookup(code: i32) -> Option<&'static str> {
    table().get(&code).copied()
}
