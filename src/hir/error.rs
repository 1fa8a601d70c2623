//! Error types for symbol graph queries.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors surfaced by node property access.
///
/// Failures are never memoized: a later access to the same property runs
/// the query again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The engine reported a symbol category the classifier does not map.
    #[error("Unsupported symbol kind {kind} for `{symbol}`")]
    UnsupportedSymbolKind { symbol: SmolStr, kind: SmolStr },

    /// The session or context a query needed is no longer usable.
    #[error("Stale analysis context: {reason}")]
    StaleContext { reason: String },

    /// A capability this adapter deliberately does not provide yet.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Any other failure reported by the engine.
    #[error("Engine error: {0}")]
    Engine(String),
}

impl AdapterError {
    pub fn unsupported(symbol: impl Into<SmolStr>, kind: impl ToString) -> Self {
        Self::UnsupportedSymbolKind {
            symbol: symbol.into(),
            kind: SmolStr::new(kind.to_string()),
        }
    }

    pub fn stale(reason: impl Into<String>) -> Self {
        Self::StaleContext {
            reason: reason.into(),
        }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleContext { .. })
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
