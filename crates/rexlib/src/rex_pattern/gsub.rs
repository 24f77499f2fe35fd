// Global substitution driven by gmatch
//
// Template replacement supports:
// - %0: entire match
// - %1-%9: capture groups (%1 is the entire match when there are no groups)
// - %%: literal %
// - % followed by anything else: that byte

use ahash::AHashMap;

use super::{Match, Rex};
use crate::engine::{AutomataEngine, Engine};
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::{RexError, RexResult};

pub type ReplFn<'a> = dyn FnMut(&Match<'_>) -> RexResult<Option<Vec<u8>>> + 'a;

/// What a match is replaced with. A table miss or a function returning
/// `None` keeps the matched text unchanged.
pub enum Repl<'a> {
    Template(&'a [u8]),
    /// Keyed by the first capture, or the whole match without groups.
    Table(&'a AHashMap<Vec<u8>, Vec<u8>>),
    Function(&'a mut ReplFn<'a>),
}

impl<'a> Repl<'a> {
    pub fn template<T: AsRef<[u8]> + ?Sized>(template: &'a T) -> Self {
        Repl::Template(template.as_ref())
    }
}

/// Outcome of `gsub`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gsub {
    pub output: Vec<u8>,
    /// Matches visited (bounded by `max`).
    pub matches: usize,
    /// Matches actually replaced.
    pub substitutions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a [u8]),
    Group(usize),
}

/// Split a template into literal runs and group references. Group indices
/// are checked against `ncap` here, before any matching happens.
fn parse_template(template: &[u8], ncap: usize) -> RexResult<Vec<Piece<'_>>> {
    let mut pieces = Vec::new();
    let mut lit_start = 0;
    let mut i = 0;
    while i < template.len() {
        if template[i] != b'%' {
            i += 1;
            continue;
        }
        if lit_start < i {
            pieces.push(Piece::Literal(&template[lit_start..i]));
        }
        i += 1;
        if i == template.len() {
            // trailing lone '%'
            pieces.push(Piece::Literal(&template[i - 1..i]));
            lit_start = i;
            break;
        }
        let c = template[i];
        if c.is_ascii_digit() {
            let mut n = (c - b'0') as usize;
            if n == 1 && ncap == 0 {
                n = 0;
            }
            if n > ncap {
                return Err(RexError::InvalidCaptureIndex {
                    index: n,
                    available: ncap,
                });
            }
            pieces.push(Piece::Group(n));
        } else {
            pieces.push(Piece::Literal(&template[i..i + 1]));
        }
        i += 1;
        lit_start = i;
    }
    if lit_start < template.len() {
        pieces.push(Piece::Literal(&template[lit_start..]));
    }
    Ok(pieces)
}

fn expand(pieces: &[Piece<'_>], m: &Match<'_>, out: &mut Vec<u8>) {
    for piece in pieces {
        match *piece {
            Piece::Literal(bytes) => out.extend_from_slice(bytes),
            // a group that did not participate expands to nothing
            Piece::Group(n) => out.extend_from_slice(m.get(n).unwrap_or_default()),
        }
    }
}

enum Prepared<'t, 'a> {
    Template(Vec<Piece<'t>>),
    Table(&'a AHashMap<Vec<u8>, Vec<u8>>),
    Function(&'a mut ReplFn<'a>),
}

impl<E: Engine> Rex<E> {
    /// Replace up to `max` matches (all when `None`) in `subject`.
    /// Zero-length matches count toward `max`. An engine or callback error
    /// aborts the whole call; no partial output is returned.
    pub fn gsub<S: AsRef<[u8]> + ?Sized>(
        &mut self,
        subject: &S,
        repl: Repl<'_>,
        max: Option<usize>,
        eflags: ExecFlags,
    ) -> RexResult<Gsub> {
        let subject = subject.as_ref();
        let ncap = self.capture_count()?;
        let mut repl = match repl {
            Repl::Template(template) => Prepared::Template(parse_template(template, ncap)?),
            Repl::Table(table) => Prepared::Table(table),
            Repl::Function(f) => Prepared::Function(f),
        };

        let mut output = Vec::with_capacity(subject.len());
        let mut matches = 0;
        let mut substitutions = 0;
        let mut last = 0;
        let mut iter = self.gmatch(subject, 1, eflags);
        while max.is_none_or(|max| matches < max) {
            let Some(m) = iter.next() else {
                break;
            };
            let m = m?;
            matches += 1;
            output.extend_from_slice(&subject[last..m.start()]);

            let replaced = match &mut repl {
                Prepared::Template(pieces) => {
                    expand(pieces, &m, &mut output);
                    true
                }
                Prepared::Table(table) => {
                    let key = m.values().first().copied().flatten();
                    match key.and_then(|key| table.get(key)) {
                        Some(value) => {
                            output.extend_from_slice(value);
                            true
                        }
                        None => false,
                    }
                }
                Prepared::Function(f) => match f(&m)? {
                    Some(value) => {
                        output.extend_from_slice(&value);
                        true
                    }
                    None => false,
                },
            };
            if replaced {
                substitutions += 1;
            } else {
                output.extend_from_slice(m.as_bytes());
            }
            last = m.end();
        }
        output.extend_from_slice(&subject[last..]);

        Ok(Gsub {
            output,
            matches,
            substitutions,
        })
    }
}

/// Compile `pattern` and run `gsub` once.
pub fn gsub<S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &S,
    repl: Repl<'_>,
    max: Option<usize>,
    cflags: impl Into<CompileFlags>,
    eflags: ExecFlags,
) -> RexResult<Gsub> {
    Rex::<AutomataEngine>::new(pattern, cflags)?.gsub(subject, repl, max, eflags)
}
