// Global iteration over a subject
//
// The scan offset only moves forward. After an empty match the next attempt
// at the same offset is made with NOTEMPTY|ANCHORED; if that retry fails the
// offset steps one engine unit and the retry is dropped. An empty match that
// starts where the previous match ended is skipped the same way instead of
// being yielded. Together these guarantee termination for patterns that can
// match the empty string anywhere.

use log::debug;

use super::{Match, Rex, start_offset};
use crate::engine::{AutomataEngine, Engine};
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::{RexError, RexResult};

pub struct GMatch<'r, 's, E: Engine = AutomataEngine> {
    rex: &'r mut Rex<E>,
    subject: &'s [u8],
    eflags: ExecFlags,
    offset: usize,
    retry: bool,
    last_end: Option<usize>,
    done: bool,
}

impl<'r, 's, E: Engine> GMatch<'r, 's, E> {
    pub(crate) fn new(
        rex: &'r mut Rex<E>,
        subject: &'s [u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Self {
        GMatch {
            rex,
            subject,
            eflags,
            offset,
            retry: false,
            last_end: None,
            done: false,
        }
    }

    fn step(&mut self) -> RexResult<Option<Match<'s>>> {
        loop {
            if self.offset > self.subject.len() {
                return Ok(None);
            }
            let eflags = if self.retry {
                self.eflags | ExecFlags::NOTEMPTY | ExecFlags::ANCHORED
            } else {
                self.eflags
            };

            if !self.rex.execute(self.subject, self.offset, eflags)? {
                if self.retry {
                    // The forced non-empty attempt failed: step over one unit.
                    self.retry = false;
                    self.offset = self.rex.advance(self.subject, self.offset);
                    continue;
                }
                return Ok(None);
            }

            let m = self.rex.current_match(self.subject)?;
            self.offset = m.end();
            if m.is_empty() {
                self.retry = true;
                if self.last_end == Some(m.start()) {
                    continue;
                }
            } else {
                self.retry = false;
            }
            self.last_end = Some(m.end());
            return Ok(Some(m));
        }
    }
}

impl<'s, E: Engine> Iterator for GMatch<'_, 's, E> {
    type Item = RexResult<Match<'s>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(m)) => Some(Ok(m)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                debug!("gmatch stopped at offset {}: {}", self.offset, err);
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<E: Engine> Rex<E> {
    /// Lazily iterate over every match from `init` (1-based) to the end.
    pub fn gmatch<'r, 's, S: AsRef<[u8]> + ?Sized>(
        &'r mut self,
        subject: &'s S,
        init: i64,
        eflags: ExecFlags,
    ) -> GMatch<'r, 's, E> {
        let subject = subject.as_ref();
        let offset = start_offset(init, subject.len());
        GMatch::new(self, subject, offset, eflags)
    }
}

/// Compile `pattern` and collect every match in `subject`.
pub fn gmatch<'s, S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &'s S,
    cflags: impl Into<CompileFlags>,
    eflags: ExecFlags,
) -> RexResult<Vec<Match<'s>>> {
    let mut rex = Rex::<AutomataEngine>::new(pattern, cflags)?;
    let matches = rex
        .gmatch(subject, 1, eflags)
        .collect::<Result<Vec<_>, RexError>>();
    matches
}
