// Tests for find / match / exec / tfind
use crate::*;

#[test]
fn test_find_with_groups() {
    let found = find(r"(\d+)-(\d+)", "12-34", 1, "", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!(found.start, 1);
    assert_eq!(found.end, 5);
    assert_eq!(
        found.captures,
        vec![Some(&b"12"[..]), Some(&b"34"[..])]
    );
}

#[test]
fn test_find_no_match() {
    let found = find("z", "abc", 1, "", ExecFlags::empty()).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_find_init() {
    let mut rex = Rex::new("a", "").unwrap();
    assert_eq!(rex.find("abcabc", 2, ExecFlags::empty()).unwrap().unwrap().start, 4);
    // negative init counts from the end
    assert_eq!(rex.find("abcabc", -3, ExecFlags::empty()).unwrap().unwrap().start, 4);
    assert_eq!(rex.find("abcabc", -100, ExecFlags::empty()).unwrap().unwrap().start, 1);
    assert!(rex.find("abcabc", 8, ExecFlags::empty()).unwrap().is_none());
}

#[test]
fn test_find_empty_match_at_end() {
    let mut rex = Rex::new("x*", "").unwrap();
    let found = rex.find("abc", 4, ExecFlags::empty()).unwrap().unwrap();
    // empty match: inclusive end is start - 1
    assert_eq!(found.start, 4);
    assert_eq!(found.end, 3);
}

#[test]
fn test_tfind_same_as_find() {
    let mut rex = Rex::new(r"(\w+)@(\w+)", "").unwrap();
    let a = rex.find("mail me@host now", 1, ExecFlags::empty()).unwrap();
    let b = rex.tfind("mail me@host now", 1, ExecFlags::empty()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.unwrap().start, 6);
}

#[test]
fn test_match_values() {
    // no groups: whole match
    let values = r#match(r"\d+", "ab 123 cd", 1, "", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!(values, vec![Some(&b"123"[..])]);

    let values = r#match(r"(\w+)=(\w+)", "key=value", 1, "", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!(values, vec![Some(&b"key"[..]), Some(&b"value"[..])]);
}

#[test]
fn test_exec_offsets() {
    let mut rex = Rex::new("(a)|(b)", "").unwrap();
    let exec = rex.exec("xb", 1, ExecFlags::empty()).unwrap().unwrap();
    assert_eq!(exec.start, 2);
    assert_eq!(exec.end, 2);
    assert_eq!(exec.offsets, vec![None, Some((2, 2))]);
}

#[test]
fn test_unset_group_is_none() {
    let found = find("(a)|(b)", "b", 1, "", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!(found.captures, vec![None, Some(&b"b"[..])]);
}

#[test]
fn test_anchored_exec_flag() {
    let mut rex = Rex::new("b", "").unwrap();
    assert!(rex.find("ab", 1, ExecFlags::ANCHORED).unwrap().is_none());
    let found = rex.find("ab", 2, ExecFlags::ANCHORED).unwrap().unwrap();
    assert_eq!((found.start, found.end), (2, 2));
}

#[test]
fn test_notempty_exec_flag() {
    let mut rex = Rex::new("a*", "").unwrap();
    let exec = rex.exec("baaab", 1, ExecFlags::NOTEMPTY).unwrap().unwrap();
    assert_eq!((exec.start, exec.end), (2, 4));
}

#[test]
fn test_notempty_prefers_longer_alternative() {
    // "x*" wins at offset 0 but is empty; "a" also matches there
    let mut rex = Rex::new("x*|a", "").unwrap();
    let exec = rex.exec("a", 1, ExecFlags::NOTEMPTY).unwrap().unwrap();
    assert_eq!((exec.start, exec.end), (1, 1));

    let flags = ExecFlags::NOTEMPTY | ExecFlags::ANCHORED;
    let exec = rex.exec("a", 1, flags).unwrap().unwrap();
    assert_eq!((exec.start, exec.end), (1, 1));

    assert!(rex.exec("b", 1, flags).unwrap().is_none());
}

#[test]
fn test_caseless_shorthand() {
    let found = find("HELLO", "say hello", 1, "i", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!((found.start, found.end), (5, 9));
    assert!(find("HELLO", "say hello", 1, "", ExecFlags::empty())
        .unwrap()
        .is_none());
}

#[test]
fn test_multiline_and_dotall() {
    assert!(find("^b", "a\nb", 1, "m", ExecFlags::empty()).unwrap().is_some());
    assert!(find("^b", "a\nb", 1, "", ExecFlags::empty()).unwrap().is_none());
    assert!(find("a.b", "a\nb", 1, "s", ExecFlags::empty()).unwrap().is_some());
    assert!(find("a.b", "a\nb", 1, "", ExecFlags::empty()).unwrap().is_none());
}

#[test]
fn test_ungreedy_shorthand() {
    let found = find("a+", "aaa", 1, "U", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!((found.start, found.end), (1, 1));
}

#[test]
fn test_match_state_after_find() {
    let mut rex = Rex::new("(b)", "").unwrap();
    assert_eq!(rex.match_state().unwrap_err(), RexError::NoMatchState);

    rex.find("abc", 1, ExecFlags::empty()).unwrap();
    let state = rex.match_state().unwrap();
    assert_eq!(state.whole(), 1..2);
    assert_eq!(state.capture_count(), 1);

    // a failed attempt drops the previous state
    rex.find("xyz", 1, ExecFlags::empty()).unwrap();
    assert_eq!(rex.match_state().unwrap_err(), RexError::NoMatchState);
}

#[test]
fn test_byte_subject() {
    let subject: &[u8] = b"\xffab";
    let mut rex = Rex::<AutomataEngine>::with_option(
        "ab",
        CompileFlags::RAW,
        &RexOption {
            utf8: false,
            ..RexOption::default()
        },
    )
    .unwrap();
    let found = rex.find(subject, 1, ExecFlags::empty()).unwrap().unwrap();
    assert_eq!((found.start, found.end), (2, 3));
}
