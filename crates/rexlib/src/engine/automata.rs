// regex-automata backend
//
// - meta::Regex answers exec() with capture offsets
// - when NOTEMPTY rejects an empty candidate, an anchored PikeVM with
//   MatchKind::All looks for the longest match at the same position
// - a dense DFA (MatchKind::All, anchored starts) answers match_all(): every
//   end offset reachable from one start position, plus partial detection when
//   the subject runs out while the DFA is still alive
// - the DFA is built on first use and kept for the handle's lifetime

use log::{debug, trace};
use regex_automata::{
    Anchored, Input, MatchKind,
    dfa::{Automaton, StartKind, dense},
    meta,
    nfa::thompson::{self, pikevm, pikevm::PikeVM},
    util::{captures::Captures, syntax},
};

use super::{Engine, MatchAll};
use crate::error_codes::*;
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::EngineError;
use crate::rex_option::RexOption;
use crate::rex_pattern::CaptureSlot;

const SUPPORTED_CFLAGS: CompileFlags = CompileFlags::CASELESS
    .union(CompileFlags::MULTILINE)
    .union(CompileFlags::DOTALL)
    .union(CompileFlags::EXTENDED)
    .union(CompileFlags::ANCHORED)
    .union(CompileFlags::UNGREEDY)
    .union(CompileFlags::RAW)
    .union(CompileFlags::OPTIMIZE)
    .union(CompileFlags::NEWLINE_LF);

const SUPPORTED_EFLAGS: ExecFlags = ExecFlags::ANCHORED
    .union(ExecFlags::NOTEMPTY)
    .union(ExecFlags::NOTEMPTY_ATSTART)
    .union(ExecFlags::PARTIAL)
    .union(ExecFlags::PARTIAL_HARD)
    .union(ExecFlags::NEWLINE_LF);

type DenseDfa = dense::DFA<Vec<u32>>;

/// Anchored longest-match searcher used to get past a rejected empty match.
struct Longest {
    vm: PikeVM,
    cache: pikevm::Cache,
    captures: Captures,
}

pub struct AutomataEngine {
    pattern: String,
    syntax: syntax::Config,
    regex: meta::Regex,
    captures: Captures,
    dfa: Option<DenseDfa>,
    longest: Option<Longest>,
    anchored: bool,
    utf8: bool,
    nfa_size_limit: Option<usize>,
    dfa_size_limit: Option<usize>,
}

impl Engine for AutomataEngine {
    fn compile(
        pattern: &str,
        cflags: CompileFlags,
        option: &RexOption,
    ) -> Result<Self, EngineError> {
        let unsupported = cflags.difference(SUPPORTED_CFLAGS);
        if !unsupported.is_empty() {
            return Err(EngineError::new(
                ERROR_COMPILE,
                format!("unsupported compile flags 0x{:x}", unsupported.bits()),
            ));
        }

        let utf8 = option.utf8 && !cflags.contains(CompileFlags::RAW);
        let syntax = syntax::Config::new()
            .case_insensitive(cflags.contains(CompileFlags::CASELESS))
            .multi_line(cflags.contains(CompileFlags::MULTILINE))
            .dot_matches_new_line(cflags.contains(CompileFlags::DOTALL))
            .ignore_whitespace(cflags.contains(CompileFlags::EXTENDED))
            .swap_greed(cflags.contains(CompileFlags::UNGREEDY))
            .unicode(utf8)
            .utf8(utf8);
        let config = meta::Config::new()
            .utf8_empty(utf8)
            .nfa_size_limit(option.nfa_size_limit);

        let regex = meta::Builder::new()
            .configure(config)
            .syntax(syntax)
            .build(pattern)
            .map_err(|err| compile_error(&err))?;
        let captures = regex.create_captures();
        debug!(
            "compiled pattern {:?} with {} groups",
            pattern,
            regex.captures_len().saturating_sub(1)
        );

        Ok(AutomataEngine {
            pattern: pattern.to_string(),
            syntax,
            regex,
            captures,
            dfa: None,
            longest: None,
            anchored: cflags.contains(CompileFlags::ANCHORED),
            utf8,
            nfa_size_limit: option.nfa_size_limit,
            dfa_size_limit: option.dfa_size_limit,
        })
    }

    fn capture_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    fn exec(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Result<Option<Vec<CaptureSlot>>, EngineError> {
        check_eflags(eflags)?;
        let anchored = self.anchored || eflags.contains(ExecFlags::ANCHORED);
        let not_empty = eflags.contains(ExecFlags::NOTEMPTY);
        let not_empty_atstart = eflags.contains(ExecFlags::NOTEMPTY_ATSTART);

        let mut at = offset;
        loop {
            let input = Input::new(subject)
                .range(at..)
                .anchored(anchor_mode(anchored));
            self.regex.search_captures(&input, &mut self.captures);
            let Some(m) = self.captures.get_match() else {
                return Ok(None);
            };

            // NOTEMPTY: the empty candidate is rejected. A longer match may
            // still start at the same position behind a preferred empty one;
            // otherwise the scan resumes one unit later. An anchored attempt
            // has nowhere else to go.
            let rejected =
                m.is_empty() && (not_empty || (not_empty_atstart && m.start() == offset));
            if !rejected {
                return Ok(Some(capture_slots(&self.captures)));
            }
            let start = m.start();
            if let Some(slots) = self.longest_at(subject, start)? {
                trace!("empty match at {} replaced by a longer one", start);
                return Ok(Some(slots));
            }
            if anchored || start >= subject.len() {
                return Ok(None);
            }
            at = next_offset(self.utf8, subject, start);
            trace!("rejected empty match at {}, resuming at {}", start, at);
        }
    }

    fn match_all(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Result<MatchAll, EngineError> {
        check_eflags(eflags)?;
        let anchored = self.anchored || eflags.contains(ExecFlags::ANCHORED);
        let not_empty = eflags.contains(ExecFlags::NOTEMPTY);
        let not_empty_atstart = eflags.contains(ExecFlags::NOTEMPTY_ATSTART);
        let want_partial =
            eflags.contains(ExecFlags::PARTIAL) || eflags.contains(ExecFlags::PARTIAL_HARD);
        let utf8 = self.utf8;

        let mut at = offset;
        if !anchored && !not_empty && !not_empty_atstart {
            // Jump straight to the leftmost start when a full match exists.
            let input = Input::new(subject).range(offset..);
            match self.regex.search(&input) {
                Some(m) => at = m.start(),
                None if !want_partial => return Ok(MatchAll::NoMatch),
                None => {}
            }
        }

        let dfa = self.dfa()?;
        let mut partial = false;
        loop {
            let walk = anchored_walk(dfa, subject, at)?;
            let mut ends: Vec<usize> = walk
                .ends
                .into_iter()
                .filter(|&end| {
                    end != at || !(not_empty || (not_empty_atstart && at == offset))
                })
                .collect();
            if !ends.is_empty() {
                ends.sort_unstable_by(|a, b| b.cmp(a));
                ends.dedup();
                return Ok(MatchAll::Matched(
                    ends.into_iter()
                        .map(|end| CaptureSlot::new(at, end))
                        .collect(),
                ));
            }
            if walk.alive && at < subject.len() {
                partial = true;
            }
            if anchored || at >= subject.len() {
                break;
            }
            at = next_offset(utf8, subject, at);
        }

        if partial && want_partial {
            Ok(MatchAll::Partial)
        } else {
            Ok(MatchAll::NoMatch)
        }
    }

    fn advance(&self, subject: &[u8], offset: usize) -> usize {
        next_offset(self.utf8, subject, offset)
    }

    fn version() -> (u32, u32, u32) {
        (0, 4, 9)
    }
}

impl AutomataEngine {
    /// Longest non-empty match starting exactly at `at`, if any.
    fn longest_at(
        &mut self,
        subject: &[u8],
        at: usize,
    ) -> Result<Option<Vec<CaptureSlot>>, EngineError> {
        let longest = self.longest()?;
        let input = Input::new(subject).range(at..).anchored(Anchored::Yes);
        longest
            .vm
            .search(&mut longest.cache, &input, &mut longest.captures);
        match longest.captures.get_match() {
            Some(m) if !m.is_empty() => Ok(Some(capture_slots(&longest.captures))),
            _ => Ok(None),
        }
    }

    fn longest(&mut self) -> Result<&mut Longest, EngineError> {
        let longest = match self.longest.take() {
            Some(longest) => longest,
            None => {
                debug!("building longest-match PikeVM for {:?}", self.pattern);
                let vm = PikeVM::builder()
                    .configure(PikeVM::config().match_kind(MatchKind::All))
                    .syntax(self.syntax)
                    .thompson(
                        thompson::Config::new()
                            .utf8(self.utf8)
                            .nfa_size_limit(self.nfa_size_limit),
                    )
                    .build(&self.pattern)
                    .map_err(|err| {
                        EngineError::new(ERROR_MATCH, format!("cannot build PikeVM: {}", err))
                    })?;
                Longest {
                    cache: vm.create_cache(),
                    captures: vm.create_captures(),
                    vm,
                }
            }
        };
        Ok(self.longest.insert(longest))
    }

    fn dfa(&mut self) -> Result<&DenseDfa, EngineError> {
        let dfa = match self.dfa.take() {
            Some(dfa) => dfa,
            None => {
                debug!("building match-all DFA for {:?}", self.pattern);
                dense::Builder::new()
                    .configure(
                        dense::Config::new()
                            .match_kind(MatchKind::All)
                            .start_kind(StartKind::Anchored)
                            .unicode_word_boundary(true)
                            .dfa_size_limit(self.dfa_size_limit)
                            .determinize_size_limit(self.dfa_size_limit),
                    )
                    .syntax(self.syntax)
                    .thompson(
                        thompson::Config::new()
                            .utf8(self.utf8)
                            .nfa_size_limit(self.nfa_size_limit),
                    )
                    .build(&self.pattern)
                    .map_err(|err| {
                        EngineError::new(ERROR_MATCH, format!("cannot build DFA: {}", err))
                    })?
            }
        };
        Ok(self.dfa.insert(dfa))
    }
}

struct Walk {
    /// End offsets of every match starting at the walk's origin.
    ends: Vec<usize>,
    /// The DFA never died before the subject ran out.
    alive: bool,
}

fn anchored_walk(dfa: &DenseDfa, subject: &[u8], at: usize) -> Result<Walk, EngineError> {
    let input = Input::new(subject).range(at..).anchored(Anchored::Yes);
    let mut sid = dfa
        .start_state_forward(&input)
        .map_err(|err| EngineError::new(ERROR_MATCH, err.to_string()))?;
    let mut ends = Vec::new();
    for (i, &byte) in subject[at..].iter().enumerate() {
        sid = dfa.next_state(sid, byte);
        if dfa.is_special_state(sid) {
            // Match states are reported one byte late.
            if dfa.is_match_state(sid) {
                ends.push(at + i);
            } else if dfa.is_dead_state(sid) {
                return Ok(Walk { ends, alive: false });
            } else if dfa.is_quit_state(sid) {
                return Err(EngineError::new(
                    ERROR_MATCH,
                    format!("DFA gave up on byte 0x{:02x} at offset {}", byte, at + i),
                ));
            }
        }
    }
    sid = dfa.next_eoi_state(sid);
    if dfa.is_match_state(sid) {
        ends.push(subject.len());
    }
    Ok(Walk { ends, alive: true })
}

fn capture_slots(captures: &Captures) -> Vec<CaptureSlot> {
    (0..captures.group_len())
        .map(|i| match captures.get_group(i) {
            Some(span) => CaptureSlot::new(span.start, span.end),
            None => CaptureSlot::UNSET,
        })
        .collect()
}

fn anchor_mode(anchored: bool) -> Anchored {
    if anchored { Anchored::Yes } else { Anchored::No }
}

fn check_eflags(eflags: ExecFlags) -> Result<(), EngineError> {
    let unsupported = eflags.difference(SUPPORTED_EFLAGS);
    if unsupported.is_empty() {
        Ok(())
    } else {
        Err(EngineError::new(
            ERROR_MATCH,
            format!("unsupported match flags 0x{:x}", unsupported.bits()),
        ))
    }
}

/// One character forward in UTF-8 mode, one byte otherwise.
fn next_offset(utf8: bool, subject: &[u8], offset: usize) -> usize {
    let mut next = offset + 1;
    if utf8 {
        while next < subject.len() && (subject[next] & 0xC0) == 0x80 {
            next += 1;
        }
    }
    next
}

fn compile_error(err: &meta::BuildError) -> EngineError {
    if let Some(syntax_err) = err.syntax_error() {
        let (code, message) = syntax_error_code(syntax_err);
        return EngineError::new(code, message);
    }
    if err.size_limit().is_some() {
        return EngineError::new(ERROR_EXPRESSION_TOO_LARGE, err.to_string());
    }
    EngineError::new(ERROR_COMPILE, err.to_string())
}

fn syntax_error_code(err: &regex_syntax::Error) -> (i32, String) {
    use regex_syntax::ast::ErrorKind as A;
    use regex_syntax::hir::ErrorKind as H;

    match err {
        regex_syntax::Error::Parse(e) => {
            let code = match e.kind() {
                A::CaptureLimitExceeded { .. } => ERROR_TOO_MANY_SUBPATTERNS,
                A::ClassEscapeInvalid { .. } => ERROR_INVALID_ESCAPE_IN_CHARACTER_CLASS,
                A::ClassRangeInvalid { .. } => ERROR_RANGE_OUT_OF_ORDER,
                A::ClassUnclosed { .. } => ERROR_UNTERMINATED_CHARACTER_CLASS,
                A::EscapeUnexpectedEof { .. } => ERROR_STRAY_BACKSLASH,
                A::EscapeUnrecognized { .. } => ERROR_UNRECOGNIZED_ESCAPE,
                A::FlagUnrecognized { .. } => ERROR_UNRECOGNIZED_CHARACTER,
                A::GroupNameDuplicate { .. } => ERROR_DUPLICATE_SUBPATTERN_NAME,
                A::GroupUnclosed { .. } | A::GroupUnopened { .. } => {
                    ERROR_UNMATCHED_PARENTHESIS
                }
                A::NestLimitExceeded { .. } => ERROR_EXPRESSION_TOO_LARGE,
                A::RepetitionCountInvalid { .. } => ERROR_QUANTIFIERS_OUT_OF_ORDER,
                A::RepetitionMissing { .. } => ERROR_NOTHING_TO_REPEAT,
                A::UnicodeClassInvalid { .. } => ERROR_UNKNOWN_PROPERTY,
                A::UnsupportedBackreference { .. } => ERROR_INEXISTENT_SUBPATTERN_REFERENCE,
                A::UnsupportedLookAround { .. } => ERROR_ASSERTION_EXPECTED,
                _ => ERROR_COMPILE,
            };
            (code, e.kind().to_string())
        }
        regex_syntax::Error::Translate(e) => {
            let code = match e.kind() {
                H::UnicodePropertyNotFound { .. } | H::UnicodePropertyValueNotFound { .. } => {
                    ERROR_UNKNOWN_PROPERTY
                }
                _ => ERROR_COMPILE,
            };
            (code, e.kind().to_string())
        }
        _ => (ERROR_COMPILE, err.to_string()),
    }
}
