//! Adapter options

use smol_str::SmolStr;

/// Options controlling how engine results are presented as nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Simple name given to declarations whose native symbol has no name
    /// (constructors, anonymous objects).
    pub constructor_name: SmolStr,
    /// Reuse a session already open on this thread for the same module
    /// instead of opening a nested one.
    pub reuse_sessions: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            constructor_name: SmolStr::new_static("<init>"),
            reuse_sessions: true,
        }
    }
}

impl AdapterOptions {
    pub fn with_constructor_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.constructor_name = name.into();
        self
    }

    pub fn with_session_reuse(mut self, reuse: bool) -> Self {
        self.reuse_sessions = reuse;
        self
    }
}
