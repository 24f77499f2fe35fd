// Tests for split
use crate::test::mock_engine::mock;
use crate::*;

fn pieces(sep: &str, subject: &str) -> Vec<String> {
    split(sep, subject, "", ExecFlags::empty())
        .unwrap()
        .into_iter()
        .map(|piece| String::from_utf8_lossy(piece).into_owned())
        .collect()
}

#[test]
fn test_split_basic() {
    assert_eq!(pieces(",", "a,b,,c"), vec!["a", "b", "", "c"]);
    assert_eq!(pieces(r"\s+", "one  two three"), vec!["one", "two", "three"]);
}

#[test]
fn test_split_no_separator() {
    assert_eq!(pieces("x", "abc"), vec!["abc"]);
    assert_eq!(pieces(",", ""), vec![""]);
    assert_eq!(pieces(",", ","), vec!["", ""]);
}

#[test]
fn test_split_empty_separator() {
    assert_eq!(pieces(r"\s*", "a b"), vec!["", "a", "b", ""]);
}

#[test]
fn test_split_reconstructs_subject() {
    let seps = [",", r"\s*", "x*", "a|", r"\b", "$"];
    let subjects = ["", "a,b", "a b c", "banana", ",,"];
    for sep in seps {
        let mut rex = Rex::new(sep, "").unwrap();
        for subject in subjects {
            let mut rebuilt = Vec::new();
            for piece in rex.split(subject, ExecFlags::empty()).with_separators(true) {
                let piece = piece.unwrap();
                rebuilt.extend_from_slice(piece.text);
                if let Some(m) = &piece.separator {
                    rebuilt.extend_from_slice(m.as_bytes());
                }
            }
            assert_eq!(rebuilt, subject.as_bytes(), "{sep:?} on {subject:?}");
        }
    }
}

#[test]
fn test_split_separator_values() {
    let mut rex = Rex::new(r"(-)|(\+)", "").unwrap();
    let pieces: Vec<SplitPiece<'_>> = rex
        .split("1-2+3", ExecFlags::empty())
        .with_separators(true)
        .collect::<RexResult<_>>()
        .unwrap();
    assert_eq!(pieces.len(), 3);
    assert_eq!(pieces[0].text, b"1");
    assert_eq!(pieces[0].separator_values(), vec![Some(&b"-"[..]), None]);
    assert_eq!(pieces[1].separator_values(), vec![None, Some(&b"+"[..])]);
    assert!(pieces[2].separator.is_none());
    assert!(pieces[2].separator_values().is_empty());
}

#[test]
fn test_split_without_separators() {
    let mut rex = Rex::new(",", "").unwrap();
    assert!(
        rex.split("a,b", ExecFlags::empty())
            .all(|piece| piece.unwrap().separator.is_none())
    );
}

#[test]
fn test_split_engine_error() {
    let mut rex = mock("b#1");
    let mut iter = rex.split("abab", ExecFlags::empty());
    assert_eq!(iter.next().unwrap().unwrap().text, b"a");
    assert!(matches!(iter.next(), Some(Err(RexError::Exec(_)))));
    assert!(iter.next().is_none());
}
