// Error taxonomy for compiled patterns and their executions

use smol_str::SmolStr;

use crate::error_codes;

/// Error reported by the underlying engine, either while compiling or while
/// running a match attempt. `code` is the engine-defined number; `message` is
/// the engine's own text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub code: i32,
    pub message: String,
}

impl EngineError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Symbolic name for the code, e.g. `ERROR_UNMATCHED_PARENTHESIS`.
    /// `None` when the code is not in the table.
    pub fn name(&self) -> Option<&'static str> {
        error_codes::lookup(self.code)
    }

    /// Name if known, otherwise the decimal code.
    pub fn symbol(&self) -> SmolStr {
        match self.name() {
            Some(name) => SmolStr::new_static(name),
            None => {
                let mut buffer = itoa::Buffer::new();
                SmolStr::new(buffer.format(self.code))
            }
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "error {} ({})", name, self.message),
            None => write!(f, "regex error: {} (code {})", self.message, self.code),
        }
    }
}

fn compile_message(err: &EngineError) -> String {
    match err.name() {
        Some(name) => format!("error {} ({})", name, err.message),
        None => format!("{} (code: {})", err.message, err.code),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RexError {
    /// Pattern could not be compiled; no handle exists.
    #[error("{}", compile_message(.0))]
    Compile(EngineError),
    /// Engine failure during a match attempt.
    #[error("{0}")]
    Exec(EngineError),
    /// Accessor called before any successful execution.
    #[error("no match state: the pattern has not matched since its last execution")]
    NoMatchState,
    /// Operation on a handle whose resources were released.
    #[error("attempt to use a released regex")]
    Released,
    #[error("invalid capture index %{index} in replacement string ({available} available)")]
    InvalidCaptureIndex { index: usize, available: usize },
    /// Error raised by a replacement callback.
    #[error("error calling replacement function: {0}")]
    Callback(String),
}

impl RexError {
    /// The engine error carried by `Compile`/`Exec`.
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            RexError::Compile(e) | RexError::Exec(e) => Some(e),
            _ => None,
        }
    }
}

pub type RexResult<T> = Result<T, RexError>;
