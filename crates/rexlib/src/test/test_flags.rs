// Tests for flag parsing and the flag/error name tables
use crate::error_codes;
use crate::*;

#[test]
fn test_parse_shorthand() {
    let all = CompileFlags::CASELESS
        | CompileFlags::MULTILINE
        | CompileFlags::DOTALL
        | CompileFlags::EXTENDED
        | CompileFlags::UNGREEDY;
    assert_eq!(CompileFlags::parse("imsxU"), all);
    assert_eq!(CompileFlags::parse(""), CompileFlags::empty());
    // unknown characters are ignored
    assert_eq!(CompileFlags::parse("iq!u"), CompileFlags::CASELESS);
    assert_eq!(CompileFlags::from("m"), CompileFlags::MULTILINE);
}

#[test]
fn test_numeric_flags() {
    let flags = CompileFlags::from(CompileFlags::CASELESS.bits());
    assert!(flags.contains(CompileFlags::CASELESS));
    assert!(Rex::new("A", CompileFlags::CASELESS.bits())
        .unwrap()
        .find("a", 1, ExecFlags::empty())
        .unwrap()
        .is_some());

    let mut eflags = ExecFlags::ANCHORED;
    eflags |= ExecFlags::NOTEMPTY;
    assert_eq!(eflags.bits(), (1 << 4) | (1 << 10));
    assert_eq!(eflags.difference(ExecFlags::ANCHORED), ExecFlags::NOTEMPTY);
}

#[test]
fn test_unnamed_bits_are_kept() {
    let cflags = CompileFlags::from(1 << 30);
    assert_eq!(cflags.bits(), 1 << 30);
    let err = Rex::new("a", cflags).unwrap_err();
    assert_eq!(err.engine_error().unwrap().code, error_codes::ERROR_COMPILE);

    let eflags = ExecFlags::from((1 << 30) | ExecFlags::ANCHORED.bits());
    assert!(eflags.contains(ExecFlags::ANCHORED));
    let mut rex = Rex::new("a", "").unwrap();
    let err = rex.find("a", 1, eflags).unwrap_err();
    assert_eq!(err.engine_error().unwrap().code, error_codes::ERROR_MATCH);
}

#[test]
fn test_flag_tables() {
    assert!(compile_flags().contains(&("CASELESS", 1)));
    assert!(compile_flags().contains(&("RAW", 1 << 11)));
    assert!(match_flags().contains(&("NOTEMPTY", 1 << 10)));
    assert!(match_flags().contains(&("PARTIAL", 1 << 15)));
}

#[test]
fn test_all_flags() {
    let all = flags();
    assert_eq!(all.iter().filter(|(name, _)| *name == "ANCHORED").count(), 1);
    assert!(all.contains(&("EXTENDED", 1 << 3)));
    assert!(all.contains(&("NOTEMPTY_ATSTART", 1 << 28)));
    assert!(all.contains(&("ERROR_UNMATCHED_PARENTHESIS", 114)));
}

#[test]
fn test_error_lookup() {
    assert_eq!(error_codes::lookup(114), Some("ERROR_UNMATCHED_PARENTHESIS"));
    assert_eq!(error_codes::lookup(error_codes::ERROR_MATCH), Some("ERROR_MATCH"));
    assert_eq!(error_codes::lookup(9999), None);
}
