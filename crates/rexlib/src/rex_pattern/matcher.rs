// Single-shot matching: find / match / exec / tfind
//
// Positions handed back to callers are 1-based with an inclusive end, so a
// match of "12-34" over the whole subject reports (1, 5).

use super::{Match, Rex, start_offset};
use crate::engine::{AutomataEngine, Engine};
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::RexResult;

/// Result of `find` / `tfind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<'s> {
    /// 1-based start of the whole match.
    pub start: usize,
    /// Inclusive end of the whole match.
    pub end: usize,
    /// Group texts; `None` for a group that did not participate.
    pub captures: Vec<Option<&'s [u8]>>,
}

/// Result of `exec`: positions instead of texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exec {
    pub start: usize,
    pub end: usize,
    /// 1-based start and inclusive end per group.
    pub offsets: Vec<Option<(usize, usize)>>,
}

impl<'s> From<&Match<'s>> for Found<'s> {
    fn from(m: &Match<'s>) -> Self {
        Found {
            start: m.start() + 1,
            end: m.end(),
            captures: m.captures(),
        }
    }
}

impl From<&Match<'_>> for Exec {
    fn from(m: &Match<'_>) -> Self {
        let offsets = m
            .slots()
            .iter()
            .skip(1)
            .map(|slot| slot.range().map(|r| (r.start + 1, r.end)))
            .collect();
        Exec {
            start: m.start() + 1,
            end: m.end(),
            offsets,
        }
    }
}

impl<E: Engine> Rex<E> {
    fn single_shot<'s>(
        &mut self,
        subject: &'s [u8],
        init: i64,
        eflags: ExecFlags,
    ) -> RexResult<Option<Match<'s>>> {
        let offset = start_offset(init, subject.len());
        if offset > subject.len() {
            return Ok(None);
        }
        if self.execute(subject, offset, eflags)? {
            Ok(Some(self.current_match(subject)?))
        } else {
            Ok(None)
        }
    }

    /// Start, inclusive end and captures of the first match at or after `init`.
    pub fn find<'s, S: AsRef<[u8]> + ?Sized>(
        &mut self,
        subject: &'s S,
        init: i64,
        eflags: ExecFlags,
    ) -> RexResult<Option<Found<'s>>> {
        let m = self.single_shot(subject.as_ref(), init, eflags)?;
        Ok(m.as_ref().map(Found::from))
    }

    /// Table form of `find`; same data.
    pub fn tfind<'s, S: AsRef<[u8]> + ?Sized>(
        &mut self,
        subject: &'s S,
        init: i64,
        eflags: ExecFlags,
    ) -> RexResult<Option<Found<'s>>> {
        self.find(subject, init, eflags)
    }

    /// Captured substrings, or the whole match if the pattern has no groups.
    pub fn r#match<'s, S: AsRef<[u8]> + ?Sized>(
        &mut self,
        subject: &'s S,
        init: i64,
        eflags: ExecFlags,
    ) -> RexResult<Option<Vec<Option<&'s [u8]>>>> {
        let m = self.single_shot(subject.as_ref(), init, eflags)?;
        Ok(m.map(|m| m.values()))
    }

    /// Like `find`, but reports group positions instead of texts.
    pub fn exec<S: AsRef<[u8]> + ?Sized>(
        &mut self,
        subject: &S,
        init: i64,
        eflags: ExecFlags,
    ) -> RexResult<Option<Exec>> {
        let m = self.single_shot(subject.as_ref(), init, eflags)?;
        Ok(m.as_ref().map(Exec::from))
    }
}

/// Compile `pattern` and run `find` once.
pub fn find<'s, S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &'s S,
    init: i64,
    cflags: impl Into<CompileFlags>,
    eflags: ExecFlags,
) -> RexResult<Option<Found<'s>>> {
    Rex::<AutomataEngine>::new(pattern, cflags)?.find(subject, init, eflags)
}

/// Compile `pattern` and run `match` once.
pub fn r#match<'s, S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &'s S,
    init: i64,
    cflags: impl Into<CompileFlags>,
    eflags: ExecFlags,
) -> RexResult<Option<Vec<Option<&'s [u8]>>>> {
    Rex::<AutomataEngine>::new(pattern, cflags)?.r#match(subject, init, eflags)
}
