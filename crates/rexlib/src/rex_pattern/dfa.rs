// Match-all execution with partial-match reporting

use super::{Rex, start_offset};
use crate::engine::{Engine, MatchAll};
use crate::flags::ExecFlags;
use crate::rex_error::{RexError, RexResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DfaMatch {
    Full {
        /// 1-based start of the longest match.
        start: usize,
        /// `(start, end)` of every match, longest first. These offsets are
        /// 0-based and NOT shifted to 1-based like every other position
        /// this crate reports; callers rely on the raw values.
        offsets: Vec<(usize, usize)>,
        count: usize,
    },
    /// The subject ended while a match was still possible.
    Partial,
}

impl<E: Engine> Rex<E> {
    /// One match-all attempt from `init`. `Partial` is only reported when
    /// `PARTIAL` or `PARTIAL_HARD` is among the flags. No match state
    /// survives the call.
    pub fn dfa_exec<S: AsRef<[u8]> + ?Sized>(
        &mut self,
        subject: &S,
        init: i64,
        eflags: ExecFlags,
    ) -> RexResult<Option<DfaMatch>> {
        let subject = subject.as_ref();
        self.state = None;
        self.error = None;
        let offset = start_offset(init, subject.len());
        if offset > subject.len() {
            return Ok(None);
        }

        let eflags = eflags | self.default_eflags;
        let engine = self.engine.as_mut().ok_or(RexError::Released)?;
        match engine.match_all(subject, offset, eflags) {
            Ok(MatchAll::Matched(slots)) => {
                let offsets: Vec<(usize, usize)> = slots
                    .iter()
                    .filter_map(|slot| slot.range().map(|r| (r.start, r.end)))
                    .collect();
                let Some(&(start, _)) = offsets.first() else {
                    return Ok(None);
                };
                Ok(Some(DfaMatch::Full {
                    start: start + 1,
                    count: offsets.len(),
                    offsets,
                }))
            }
            Ok(MatchAll::Partial) => Ok(Some(DfaMatch::Partial)),
            Ok(MatchAll::NoMatch) => Ok(None),
            Err(err) => {
                self.error = Some(err.clone());
                Err(RexError::Exec(err))
            }
        }
    }
}
