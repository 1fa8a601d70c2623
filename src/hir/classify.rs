//! Mapping from engine symbol categories to declaration kinds.

use std::fmt;

use crate::engine::{NativeScopeKind, NativeSymbolKind};

/// The declaration kinds the graph exposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    Class,
    Property,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Class => "class",
            DeclarationKind::Property => "property",
        })
    }
}

/// Where a function is declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    TopLevel,
    Member,
    /// SAM constructors and other lambda-like synthetic functions.
    Lambda,
}

/// Classify a native symbol category.
///
/// Every category is listed; anything that is not a class, function-like or
/// property symbol is returned as `Err` so callers can fail the whole
/// enumeration. No wildcard arm: a new engine category must be decided here.
pub fn classify(kind: NativeSymbolKind) -> Result<DeclarationKind, NativeSymbolKind> {
    match kind {
        NativeSymbolKind::NamedClassOrObject => Ok(DeclarationKind::Class),
        NativeSymbolKind::Function
        | NativeSymbolKind::Constructor
        | NativeSymbolKind::SamConstructor => Ok(DeclarationKind::Function),
        NativeSymbolKind::Property => Ok(DeclarationKind::Property),
        NativeSymbolKind::AnonymousObject
        | NativeSymbolKind::AnonymousFunction
        | NativeSymbolKind::LocalVariable
        | NativeSymbolKind::ValueParameter
        | NativeSymbolKind::TypeParameter
        | NativeSymbolKind::TypeAlias
        | NativeSymbolKind::EnumEntry
        | NativeSymbolKind::File => Err(kind),
    }
}

/// Map where the engine places a function to a [`FunctionKind`].
pub fn function_kind(scope: NativeScopeKind) -> Result<FunctionKind, NativeScopeKind> {
    match scope {
        NativeScopeKind::ClassMember => Ok(FunctionKind::Member),
        NativeScopeKind::TopLevel => Ok(FunctionKind::TopLevel),
        NativeScopeKind::SamConstructor => Ok(FunctionKind::Lambda),
        NativeScopeKind::Local | NativeScopeKind::Accessor => Err(scope),
    }
}
