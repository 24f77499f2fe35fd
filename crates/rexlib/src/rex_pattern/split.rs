// Split a subject on the matches of a pattern

use super::{GMatch, Match, Rex};
use crate::engine::{AutomataEngine, Engine};
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::{RexError, RexResult};

/// Text between two separators. `separator` is the match that ended this
/// piece; it is `None` for the final piece and whenever separators were not
/// requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPiece<'s> {
    pub text: &'s [u8],
    pub separator: Option<Match<'s>>,
}

impl<'s> SplitPiece<'s> {
    /// The separator's captures, or the whole separator without groups.
    pub fn separator_values(&self) -> Vec<Option<&'s [u8]>> {
        self.separator
            .as_ref()
            .map(Match::values)
            .unwrap_or_default()
    }
}

pub struct Split<'r, 's, E: Engine = AutomataEngine> {
    matches: GMatch<'r, 's, E>,
    subject: &'s [u8],
    last: usize,
    separators: bool,
    done: bool,
}

impl<'r, 's, E: Engine> Split<'r, 's, E> {
    /// Attach each separator match to the piece it terminates.
    pub fn with_separators(mut self, on: bool) -> Self {
        self.separators = on;
        self
    }
}

impl<'s, E: Engine> Iterator for Split<'_, 's, E> {
    type Item = RexResult<SplitPiece<'s>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.matches.next() {
            Some(Ok(m)) => {
                let text = &self.subject[self.last..m.start()];
                self.last = m.end();
                let separator = self.separators.then_some(m);
                Some(Ok(SplitPiece { text, separator }))
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
            None => {
                self.done = true;
                Some(Ok(SplitPiece {
                    text: &self.subject[self.last..],
                    separator: None,
                }))
            }
        }
    }
}

impl<E: Engine> Rex<E> {
    /// Lazily yield the pieces of `subject` between matches. A pattern that
    /// never matches yields the whole subject once.
    pub fn split<'r, 's, S: AsRef<[u8]> + ?Sized>(
        &'r mut self,
        subject: &'s S,
        eflags: ExecFlags,
    ) -> Split<'r, 's, E> {
        let subject = subject.as_ref();
        Split {
            matches: self.gmatch(subject, 1, eflags),
            subject,
            last: 0,
            separators: false,
            done: false,
        }
    }
}

/// Compile `sep` and collect the pieces of `subject`.
pub fn split<'s, S: AsRef<[u8]> + ?Sized>(
    sep: &str,
    subject: &'s S,
    cflags: impl Into<CompileFlags>,
    eflags: ExecFlags,
) -> RexResult<Vec<&'s [u8]>> {
    let mut rex = Rex::<AutomataEngine>::new(sep, cflags)?;
    let pieces = rex
        .split(subject, eflags)
        .map(|piece| piece.map(|piece| piece.text))
        .collect::<Result<Vec<_>, RexError>>();
    pieces
}
