// Regex orchestration layer
// find / match / exec / tfind, gmatch, gsub, split and dfa_exec over any
// engine implementing `engine::Engine`; regex-automata is the default engine.

#[cfg(test)]
mod test;

pub mod engine;
pub mod error_codes;
pub mod flags;
pub mod rex_error;
pub mod rex_option;
pub mod rex_pattern;

#[cfg(feature = "serde")]
pub mod serde;

pub use engine::{AutomataEngine, Engine, MatchAll};
pub use flags::{CompileFlags, ExecFlags, compile_flags, flags, match_flags};
pub use rex_error::{EngineError, RexError, RexResult};
pub use rex_option::RexOption;
pub use rex_pattern::{
    CaptureSlot, DfaMatch, Exec, Found, GMatch, Gsub, Match, MatchState, Repl, Rex, Split,
    SplitPiece, find, gmatch, gsub, r#match, split, start_offset, version, version_string,
};
