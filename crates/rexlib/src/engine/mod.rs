// Seam between the orchestration layer and a concrete regex engine
//
// Everything above this trait (find, gmatch, gsub, split, dfa_exec) only sees
// capture offsets, "no match", or an EngineError.

mod automata;

pub use automata::AutomataEngine;

use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::EngineError;
use crate::rex_option::RexOption;
use crate::rex_pattern::CaptureSlot;

/// Outcome of a "match all" (DFA-style) attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchAll {
    NoMatch,
    /// The subject ends while a match is still possible.
    Partial,
    /// Every match starting at the leftmost matching position, longest first.
    Matched(Vec<CaptureSlot>),
}

pub trait Engine: Sized {
    fn compile(
        pattern: &str,
        cflags: CompileFlags,
        option: &RexOption,
    ) -> Result<Self, EngineError>;

    /// Number of explicit capture groups (slot 0 not included).
    fn capture_count(&self) -> usize;

    /// One match attempt starting at byte `offset` (`offset <= subject.len()`).
    /// On success the returned table has `capture_count() + 1` slots and
    /// slot 0 is valid.
    fn exec(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Result<Option<Vec<CaptureSlot>>, EngineError>;

    fn match_all(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Result<MatchAll, EngineError>;

    /// Offset of the next engine unit after `offset`.
    fn advance(&self, _subject: &[u8], offset: usize) -> usize {
        offset + 1
    }

    fn version() -> (u32, u32, u32);
}
