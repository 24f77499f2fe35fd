// Compiled pattern handle and the execution primitive
//
// A Rex owns one compiled pattern plus the result of its most recent
// execution. Every execution starts by dropping the previous match state and
// error, so at most one match state is alive per handle. The higher level
// operations live in the submodules:
// - matcher: find / match / exec / tfind (one execution)
// - gmatch:  global iteration with the empty-match retry policy
// - gsub:    substitution driven by gmatch
// - split:   gaps between gmatch results
// - dfa:     match-all / partial execution

mod dfa;
mod gmatch;
mod gsub;
mod match_state;
mod matcher;
mod split;

pub use dfa::DfaMatch;
pub use gmatch::{GMatch, gmatch};
pub use gsub::{Gsub, Repl, ReplFn, gsub};
pub use match_state::{CaptureSlot, Match, MatchState};
pub use matcher::{Exec, Found, find, r#match};
pub use split::{Split, SplitPiece, split};

use log::{debug, trace};

use crate::engine::{AutomataEngine, Engine};
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::{EngineError, RexError, RexResult};
use crate::rex_option::RexOption;

pub const REX_TYPENAME: &str = "rex_regex";

pub struct Rex<E: Engine = AutomataEngine> {
    engine: Option<E>,
    state: Option<MatchState>,
    error: Option<EngineError>,
    default_eflags: ExecFlags,
    freed: bool,
}

impl Rex<AutomataEngine> {
    /// Compile `pattern` with the default options. `cflags` is either a
    /// numeric mask (`CompileFlags`, `u32`) or shorthand such as `"im"`.
    pub fn new(pattern: &str, cflags: impl Into<CompileFlags>) -> RexResult<Self> {
        Self::with_option(pattern, cflags, &RexOption::default())
    }
}

impl<E: Engine> Rex<E> {
    pub fn with_option(
        pattern: &str,
        cflags: impl Into<CompileFlags>,
        option: &RexOption,
    ) -> RexResult<Self> {
        let cflags = cflags.into() | option.default_cflags;
        let engine = E::compile(pattern, cflags, option).map_err(|err| {
            debug!("compile of {:?} failed: {}", pattern, err);
            RexError::Compile(err)
        })?;
        Ok(Rex {
            engine: Some(engine),
            state: None,
            error: None,
            default_eflags: option.default_eflags,
            freed: false,
        })
    }

    /// Number of explicit capture groups.
    pub fn capture_count(&self) -> RexResult<usize> {
        Ok(self.engine()?.capture_count())
    }

    /// Offsets of the last successful execution.
    pub fn match_state(&self) -> RexResult<&MatchState> {
        if self.freed {
            return Err(RexError::Released);
        }
        self.state.as_ref().ok_or(RexError::NoMatchState)
    }

    /// Error of the last execution, if it failed.
    pub fn last_error(&self) -> Option<&EngineError> {
        self.error.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.freed
    }

    /// Drop the compiled pattern, match state and error. Safe to call any
    /// number of times; only the first call releases anything.
    pub fn release(&mut self) {
        if !self.freed {
            self.freed = true;
            self.engine = None;
            self.state = None;
            self.error = None;
        }
    }

    pub(crate) fn engine(&self) -> RexResult<&E> {
        self.engine.as_ref().ok_or(RexError::Released)
    }

    /// Run the engine once at byte `offset`. Ok(true) leaves the capture
    /// table in `self.state`; Ok(false) is "no match"; an engine failure is
    /// kept in `self.error` and returned as `RexError::Exec`.
    pub(crate) fn execute(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> RexResult<bool> {
        self.state = None;
        self.error = None;
        let eflags = eflags | self.default_eflags;
        let engine = self.engine.as_mut().ok_or(RexError::Released)?;
        trace!("exec at {} flags 0x{:x}", offset, eflags.bits());
        match engine.exec(subject, offset, eflags) {
            Ok(Some(slots)) => {
                self.state = Some(MatchState::new(slots));
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                self.error = Some(err.clone());
                Err(RexError::Exec(err))
            }
        }
    }

    /// Offset of the next engine unit, used to step over a stalled position.
    pub(crate) fn advance(&self, subject: &[u8], offset: usize) -> usize {
        match &self.engine {
            Some(engine) => engine.advance(subject, offset),
            None => offset + 1,
        }
    }

    pub(crate) fn current_match<'s>(&self, subject: &'s [u8]) -> RexResult<Match<'s>> {
        Ok(Match::new(subject, self.match_state()?))
    }
}

impl<E: Engine> Drop for Rex<E> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<E: Engine> std::fmt::Display for Rex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.freed {
            write!(f, "{} (deleted)", REX_TYPENAME)
        } else {
            write!(f, "{} ({:p})", REX_TYPENAME, self)
        }
    }
}

impl<E: Engine> std::fmt::Debug for Rex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rex")
            .field("state", &self.state)
            .field("error", &self.error)
            .field("freed", &self.freed)
            .finish()
    }
}

/// Convert a 1-based `init` (negative counts from the end) into a byte
/// offset. The result may exceed `len`; callers treat that as "no result".
pub fn start_offset(init: i64, len: usize) -> usize {
    if init > 0 {
        (init - 1) as usize
    } else if init < 0 {
        let back = init.unsigned_abs() as usize;
        len.saturating_sub(back)
    } else {
        0
    }
}

/// `version()` of the default engine as `(major, minor, micro)`.
pub fn version() -> (u32, u32, u32) {
    AutomataEngine::version()
}

/// `version()` formatted as `major.minor.micro`.
pub fn version_string() -> String {
    let (major, minor, micro) = version();
    let mut buffer = itoa::Buffer::new();
    let mut out = String::with_capacity(16);
    out.push_str(buffer.format(major));
    out.push('.');
    out.push_str(buffer.format(minor));
    out.push('.');
    out.push_str(buffer.format(micro));
    out
}
