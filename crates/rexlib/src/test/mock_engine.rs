// Literal-only engine with scripted failures, for exercising the
// orchestration layer without a real regex engine.
//
// Pattern syntax:
// - "text"     matches the literal text ("" matches empty everywhere)
// - "text#N"   the (N+1)th engine call fails with ERROR_MATCH
// - "("        fails to compile with ERROR_UNMATCHED_PARENTHESIS
// - "?"        fails to compile with an unknown code (777)

use crate::engine::{Engine, MatchAll};
use crate::error_codes::{ERROR_MATCH, ERROR_UNMATCHED_PARENTHESIS};
use crate::flags::{CompileFlags, ExecFlags};
use crate::rex_error::EngineError;
use crate::rex_option::RexOption;
use crate::rex_pattern::{CaptureSlot, Rex};

pub struct MockEngine {
    literal: Vec<u8>,
    fail_after: Option<usize>,
    pub calls: usize,
}

impl MockEngine {
    fn tick(&mut self) -> Result<(), EngineError> {
        self.calls += 1;
        match self.fail_after {
            Some(n) if self.calls > n => Err(EngineError::new(ERROR_MATCH, "scripted failure")),
            _ => Ok(()),
        }
    }

    fn find_from(&self, subject: &[u8], offset: usize, eflags: ExecFlags) -> Option<usize> {
        if eflags.contains(ExecFlags::NOTEMPTY) && self.literal.is_empty() {
            return None;
        }
        let last = if eflags.contains(ExecFlags::ANCHORED) {
            offset
        } else {
            subject.len()
        };
        (offset..=last).find(|&start| subject[start..].starts_with(&self.literal))
    }
}

impl Engine for MockEngine {
    fn compile(
        pattern: &str,
        _cflags: CompileFlags,
        _option: &RexOption,
    ) -> Result<Self, EngineError> {
        match pattern {
            "(" => Err(EngineError::new(ERROR_UNMATCHED_PARENTHESIS, "missing )")),
            "?" => Err(EngineError::new(777, "weird")),
            _ => {
                let (literal, fail_after) = match pattern.split_once('#') {
                    Some((literal, n)) => (literal, n.parse().ok()),
                    None => (pattern, None),
                };
                Ok(MockEngine {
                    literal: literal.as_bytes().to_vec(),
                    fail_after,
                    calls: 0,
                })
            }
        }
    }

    fn capture_count(&self) -> usize {
        0
    }

    fn exec(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Result<Option<Vec<CaptureSlot>>, EngineError> {
        self.tick()?;
        Ok(self
            .find_from(subject, offset, eflags)
            .map(|start| vec![CaptureSlot::new(start, start + self.literal.len())]))
    }

    fn match_all(
        &mut self,
        subject: &[u8],
        offset: usize,
        eflags: ExecFlags,
    ) -> Result<MatchAll, EngineError> {
        self.tick()?;
        if let Some(start) = self.find_from(subject, offset, eflags) {
            return Ok(MatchAll::Matched(vec![CaptureSlot::new(
                start,
                start + self.literal.len(),
            )]));
        }
        let partial = (offset..subject.len()).any(|start| self.literal.starts_with(&subject[start..]));
        if partial && eflags.contains(ExecFlags::PARTIAL) {
            Ok(MatchAll::Partial)
        } else {
            Ok(MatchAll::NoMatch)
        }
    }

    fn version() -> (u32, u32, u32) {
        (1, 2, 3)
    }
}

pub fn mock(pattern: &str) -> Rex<MockEngine> {
    Rex::with_option(pattern, CompileFlags::empty(), &RexOption::default())
        .expect("mock pattern compiles")
}
