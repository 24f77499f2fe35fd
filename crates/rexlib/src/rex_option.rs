use crate::flags::{CompileFlags, ExecFlags};

#[derive(Debug, Clone)]
pub struct RexOption {
    /// Subjects and patterns are UTF-8. When false the engine works on raw
    /// bytes, as if every pattern carried `CompileFlags::RAW`.
    pub utf8: bool,
    /// Upper bound in bytes for the compiled NFA, `None` for the engine default.
    pub nfa_size_limit: Option<usize>,
    /// Upper bound in bytes for the DFA built by `dfa_exec`.
    pub dfa_size_limit: Option<usize>,
    /// OR-ed into every compile.
    pub default_cflags: CompileFlags,
    /// OR-ed into every execution.
    pub default_eflags: ExecFlags,
}

impl Default for RexOption {
    fn default() -> Self {
        Self {
            utf8: true,
            nfa_size_limit: Some(10 * (1 << 20)),
            dfa_size_limit: Some(10 * (1 << 20)),
            default_cflags: CompileFlags::empty(),
            default_eflags: ExecFlags::empty(),
        }
    }
}
