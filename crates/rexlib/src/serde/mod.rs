// Serde conversion of match results
//
// Byte slices are rendered as (lossy) UTF-8 strings; groups that did not
// participate become `false`.

use ::serde::Serialize;
use serde_json::Value;

use crate::rex_pattern::{DfaMatch, Exec, Found, Gsub, Match, SplitPiece};

#[derive(Serialize)]
#[serde(untagged)]
enum JsonCapture {
    Text(String),
    Unset(bool),
}

#[derive(Serialize)]
struct JsonFound {
    start: usize,
    end: usize,
    captures: Vec<JsonCapture>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonOffset {
    Pair(usize, usize),
    Unset(bool),
}

#[derive(Serialize)]
struct JsonExec {
    start: usize,
    end: usize,
    offsets: Vec<JsonOffset>,
}

#[derive(Serialize)]
struct JsonGsub {
    output: String,
    matches: usize,
    substitutions: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonDfa {
    Full {
        start: usize,
        offsets: Vec<usize>,
        count: usize,
    },
    Partial(bool),
}

#[derive(Serialize)]
struct JsonPiece {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    separator: Option<Vec<JsonCapture>>,
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn captures(values: &[Option<&[u8]>]) -> Vec<JsonCapture> {
    values
        .iter()
        .map(|value| match value {
            Some(bytes) => JsonCapture::Text(text(bytes)),
            None => JsonCapture::Unset(false),
        })
        .collect()
}

fn to_value<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

pub fn found_to_json(found: &Found<'_>) -> Result<Value, String> {
    to_value(JsonFound {
        start: found.start,
        end: found.end,
        captures: captures(&found.captures),
    })
}

pub fn exec_to_json(exec: &Exec) -> Result<Value, String> {
    to_value(JsonExec {
        start: exec.start,
        end: exec.end,
        offsets: exec
            .offsets
            .iter()
            .map(|offsets| match *offsets {
                Some((start, end)) => JsonOffset::Pair(start, end),
                None => JsonOffset::Unset(false),
            })
            .collect(),
    })
}

/// Result of `match`: a list of texts, `false` for unset groups.
pub fn values_to_json(values: &[Option<&[u8]>]) -> Result<Value, String> {
    to_value(captures(values))
}

/// A gmatch item: its captures, or the whole match without groups.
pub fn match_to_json(m: &Match<'_>) -> Result<Value, String> {
    values_to_json(&m.values())
}

pub fn gsub_to_json(result: &Gsub) -> Result<Value, String> {
    to_value(JsonGsub {
        output: text(&result.output),
        matches: result.matches,
        substitutions: result.substitutions,
    })
}

/// Flattened `[s1, e1, s2, e2, ...]` offsets, kept 0-based.
pub fn dfa_to_json(result: &DfaMatch) -> Result<Value, String> {
    let json = match result {
        DfaMatch::Full {
            start,
            offsets,
            count,
        } => JsonDfa::Full {
            start: *start,
            offsets: offsets.iter().flat_map(|&(s, e)| [s, e]).collect(),
            count: *count,
        },
        DfaMatch::Partial => JsonDfa::Partial(true),
    };
    to_value(json)
}

pub fn split_to_json(pieces: &[SplitPiece<'_>]) -> Result<Value, String> {
    let pieces: Vec<JsonPiece> = pieces
        .iter()
        .map(|piece| JsonPiece {
            text: text(piece.text),
            separator: piece
                .separator
                .as_ref()
                .map(|_| captures(&piece.separator_values())),
        })
        .collect();
    to_value(pieces)
}
