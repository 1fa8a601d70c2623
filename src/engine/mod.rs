//! The semantic analysis engine as seen by the adapter.
//!
//! The engine owns name resolution, type checking and scopes. The adapter
//! only talks to it through [`Engine`], and every query except
//! [`Engine::source_file`] and [`Engine::location_of`] runs inside a session.
//!
//! ## Handles and pointers
//!
//! ```text
//! NativeSymbol / NativeType   ← valid only while their session is open
//!     │ symbol_pointer / type_pointer
//!     ▼
//! SymbolPointer / TypePointer ← plain values, stored in nodes
//!     │ restore_symbol / restore_type (in a fresh session)
//!     ▼
//! NativeSymbol / NativeType
//! ```
//!
//! A handle used after its session closed must be rejected with
//! [`AdapterError::StaleContext`](crate::hir::AdapterError::StaleContext).

mod memory;

pub use memory::{
    MemoryEngine, ParameterSpec, RawSymbolId, RawTypeId, SymbolSpec, TypeParameterSpec,
};

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, Location, TextRange};
use crate::hir::{AdapterResult, Modifier, Type, Variance};

/// Shared handle to an engine implementation.
pub type EngineRef = Arc<dyn Engine>;

/// A module or project the engine analyzes as one unit.
///
/// Sessions are opened per module; two entities in the same module share
/// the logical context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub u32);

/// An open analysis session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Session-bound reference to an engine symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeSymbol {
    pub session: SessionId,
    pub raw: u32,
}

/// Session-bound reference to an engine type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeType {
    pub session: SessionId,
    pub raw: u32,
}

/// Durable pointer to an engine symbol, restorable in any later session.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolPointer(pub u64);

impl fmt::Debug for SymbolPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolPointer({})", self.0)
    }
}

/// Durable pointer to an engine type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePointer(pub u64);

impl fmt::Debug for TypePointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypePointer({})", self.0)
    }
}

/// The entity a session is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextEntity {
    File(FileId),
    Symbol(SymbolPointer),
}

/// Structural description of a source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceFile {
    pub id: FileId,
    pub package_name: SmolStr,
    pub file_name: SmolStr,
    pub file_path: SmolStr,
}

impl SourceFile {
    pub fn new(
        id: FileId,
        package_name: impl Into<SmolStr>,
        file_name: impl Into<SmolStr>,
        file_path: impl Into<SmolStr>,
    ) -> Self {
        Self {
            id,
            package_name: package_name.into(),
            file_name: file_name.into(),
            file_path: file_path.into(),
        }
    }
}

/// The engine's own category for a symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeSymbolKind {
    NamedClassOrObject,
    AnonymousObject,
    Function,
    Constructor,
    SamConstructor,
    AnonymousFunction,
    Property,
    LocalVariable,
    ValueParameter,
    TypeParameter,
    TypeAlias,
    EnumEntry,
    File,
}

impl fmt::Display for NativeSymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Where the engine considers a symbol to be declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeScopeKind {
    TopLevel,
    ClassMember,
    SamConstructor,
    Local,
    Accessor,
}

impl fmt::Display for NativeScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeModality {
    Final,
    Sealed,
    Open,
    Abstract,
}

/// Where the engine got a symbol from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeOrigin {
    Source,
    SourceMemberGenerated,
    Library,
    JavaSource,
    JavaLibrary,
    SamConstructor,
    Delegated,
    SubstitutionOverride,
    IntersectionOverride,
    Plugin,
}

/// The syntax element a symbol was declared by.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxAnchor {
    pub file: FileId,
    pub range: TextRange,
    /// Fully qualified name derivable from the syntax, if any.
    pub fq_name: Option<SmolStr>,
}

/// An annotation application as reported by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationData {
    pub short_name: SmolStr,
    pub qualified_name: Option<SmolStr>,
    pub use_site_target: Option<SmolStr>,
    pub arguments: Vec<(SmolStr, AnnotationValue)>,
    pub anchor: Option<SyntaxAnchor>,
}

impl AnnotationData {
    pub fn new(qualified_name: impl Into<SmolStr>) -> Self {
        let qualified_name: SmolStr = qualified_name.into();
        let short_name = qualified_name
            .rsplit('.')
            .next()
            .map(SmolStr::new)
            .unwrap_or_else(|| qualified_name.clone());
        Self {
            short_name,
            qualified_name: Some(qualified_name),
            use_site_target: None,
            arguments: Vec::new(),
            anchor: None,
        }
    }

    pub fn with_argument(mut self, name: impl Into<SmolStr>, value: AnnotationValue) -> Self {
        self.arguments.push((name.into(), value));
        self
    }

    pub fn with_use_site_target(mut self, target: impl Into<SmolStr>) -> Self {
        self.use_site_target = Some(target.into());
        self
    }
}

/// A constant annotation argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    String(SmolStr),
    Class(Type),
    EnumEntry(SmolStr),
    Array(Vec<AnnotationValue>),
}

/// Extracted data for one value parameter symbol.
#[derive(Clone, Debug)]
pub struct ValueParameterInfo {
    pub name: SmolStr,
    pub ty: NativeType,
    pub has_default: bool,
    pub is_vararg: bool,
}

/// Extracted data for one type parameter symbol.
#[derive(Clone, Debug)]
pub struct TypeParameterInfo {
    pub name: SmolStr,
    pub variance: Variance,
    pub is_reified: bool,
    pub upper_bounds: Vec<NativeType>,
}

/// Query interface of a semantic analysis engine.
///
/// Implementations must reject handles whose session is closed and must
/// report contexts that can no longer be analyzed as `StaleContext`.
pub trait Engine: Send + Sync {
    /// Module owning `entity`; sessions for the same module may be shared.
    fn module_of(&self, entity: &ContextEntity) -> AdapterResult<ModuleId>;
    fn open_session(&self, module: ModuleId) -> AdapterResult<SessionId>;
    fn close_session(&self, session: SessionId);

    fn source_file(&self, file: FileId) -> AdapterResult<SourceFile>;
    fn location_of(&self, anchor: &SyntaxAnchor) -> Location;

    fn resolve_file_symbol(&self, session: SessionId, file: FileId) -> AdapterResult<NativeSymbol>;
    /// All members of a file or class scope, in no particular order.
    fn scope_members(
        &self,
        session: SessionId,
        container: NativeSymbol,
    ) -> AdapterResult<Vec<NativeSymbol>>;

    fn symbol_pointer(&self, symbol: NativeSymbol) -> AdapterResult<SymbolPointer>;
    fn restore_symbol(
        &self,
        session: SessionId,
        pointer: SymbolPointer,
    ) -> AdapterResult<NativeSymbol>;

    fn symbol_kind(&self, symbol: NativeSymbol) -> AdapterResult<NativeSymbolKind>;
    fn symbol_scope(&self, symbol: NativeSymbol) -> AdapterResult<NativeScopeKind>;
    fn modality(&self, symbol: NativeSymbol) -> AdapterResult<Option<NativeModality>>;
    fn is_extension(&self, symbol: NativeSymbol) -> AdapterResult<bool>;
    fn receiver_type(&self, symbol: NativeSymbol) -> AdapterResult<Option<NativeType>>;
    fn return_type(&self, symbol: NativeSymbol) -> AdapterResult<NativeType>;
    fn value_parameters(&self, symbol: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>>;
    fn value_parameter_info(&self, parameter: NativeSymbol) -> AdapterResult<ValueParameterInfo>;
    fn type_parameters(&self, symbol: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>>;
    fn type_parameter_info(&self, parameter: NativeSymbol) -> AdapterResult<TypeParameterInfo>;
    fn annotations(&self, symbol: NativeSymbol) -> AdapterResult<Vec<AnnotationData>>;
    fn origin(&self, symbol: NativeSymbol) -> AdapterResult<NativeOrigin>;
    fn name(&self, symbol: NativeSymbol) -> AdapterResult<Option<SmolStr>>;
    fn syntax_anchor(&self, symbol: NativeSymbol) -> AdapterResult<Option<SyntaxAnchor>>;
    fn doc_string(&self, symbol: NativeSymbol) -> AdapterResult<Option<String>>;
    fn modifiers(&self, symbol: NativeSymbol) -> AdapterResult<Vec<Modifier>>;

    fn type_pointer(&self, ty: NativeType) -> AdapterResult<TypePointer>;
    fn restore_type(&self, session: SessionId, pointer: TypePointer) -> AdapterResult<NativeType>;
    fn render_type(&self, ty: NativeType) -> AdapterResult<Type>;
    fn type_annotations(&self, ty: NativeType) -> AdapterResult<Vec<AnnotationData>>;
}
