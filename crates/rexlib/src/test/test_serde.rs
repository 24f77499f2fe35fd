// Tests for JSON conversion of results
use serde_json::json;

use crate::serde::*;
use crate::*;

#[test]
fn test_found_json() {
    let found = find("(a)|(b)", "b", 1, "", ExecFlags::empty())
        .unwrap()
        .unwrap();
    assert_eq!(
        found_to_json(&found).unwrap(),
        json!({"start": 1, "end": 1, "captures": [false, "b"]})
    );
}

#[test]
fn test_exec_json() {
    let mut rex = Rex::new("(a)|(b)", "").unwrap();
    let exec = rex.exec("xb", 1, ExecFlags::empty()).unwrap().unwrap();
    assert_eq!(
        exec_to_json(&exec).unwrap(),
        json!({"start": 2, "end": 2, "offsets": [false, [2, 2]]})
    );
}

#[test]
fn test_gsub_json() {
    let result = gsub("o", "foo bar", Repl::template("0"), Some(1), "", ExecFlags::empty())
        .unwrap();
    assert_eq!(
        gsub_to_json(&result).unwrap(),
        json!({"output": "f0o bar", "matches": 1, "substitutions": 1})
    );
}

#[test]
fn test_dfa_json() {
    let mut rex = Rex::new("a+", "").unwrap();
    let full = rex.dfa_exec("xaaa", 1, ExecFlags::empty()).unwrap().unwrap();
    assert_eq!(
        dfa_to_json(&full).unwrap(),
        json!({"start": 2, "offsets": [1, 4, 1, 3, 1, 2], "count": 3})
    );
    assert_eq!(dfa_to_json(&DfaMatch::Partial).unwrap(), json!(true));
}

#[test]
fn test_split_json() {
    let mut rex = Rex::new(",", "").unwrap();
    let pieces: Vec<SplitPiece<'_>> = rex
        .split("a,b", ExecFlags::empty())
        .with_separators(true)
        .collect::<RexResult<_>>()
        .unwrap();
    assert_eq!(
        split_to_json(&pieces).unwrap(),
        json!([{"text": "a", "separator": [","]}, {"text": "b"}])
    );
}

#[test]
fn test_match_values_json() {
    let matches = gmatch(r"(\w)(\d)?", "a1b", "", ExecFlags::empty()).unwrap();
    let values: Vec<_> = matches.iter().map(|m| match_to_json(m).unwrap()).collect();
    assert_eq!(values, vec![json!(["a", "1"]), json!(["b", false])]);
}
