//! In-memory engine over explicitly declared symbols.
//!
//! [`MemoryEngine`] answers every [`Engine`] query from tables filled through
//! a small builder API. It enforces the same session rules a real analyzer
//! does: handles die with their session, pointers only restore inside a
//! session of the module that owns them, and a disposed module can no
//! longer be analyzed.
//!
//! ```ignore
//! let memory = MemoryEngine::new();
//! let module = memory.add_module();
//! let file = memory.add_file(module, source, "fun foo(x: Int): String");
//! memory.add_member(
//!     file,
//!     SymbolSpec::function("foo")
//!         .param("x", Type::named("kotlin.Int"))
//!         .returns(Type::named("kotlin.String")),
//! );
//! ```

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{FileId, LineIndex, Location, TextRange, TextSize};
use crate::hir::{AdapterError, AdapterResult, Modifier, Type, Variance};

use super::{
    AnnotationData, ContextEntity, Engine, ModuleId, NativeModality, NativeOrigin,
    NativeScopeKind, NativeSymbol, NativeSymbolKind, NativeType, SessionId, SourceFile,
    SymbolPointer, SyntaxAnchor, TypeParameterInfo, TypePointer, ValueParameterInfo,
};

/// Index of a symbol in a [`MemoryEngine`], independent of any session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawSymbolId(pub u32);

/// Index of a type in a [`MemoryEngine`], independent of any session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawTypeId(pub u32);

// ============================================================================
// BUILDER SPECS
// ============================================================================

/// A value parameter to declare on a function.
#[derive(Clone, Debug)]
pub struct ParameterSpec {
    name: SmolStr,
    ty: Type,
    has_default: bool,
    is_vararg: bool,
    annotations: Vec<AnnotationData>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<SmolStr>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
            is_vararg: false,
            annotations: Vec::new(),
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn vararg(mut self) -> Self {
        self.is_vararg = true;
        self
    }

    pub fn annotation(mut self, annotation: AnnotationData) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A type parameter to declare on a function or class.
#[derive(Clone, Debug)]
pub struct TypeParameterSpec {
    name: SmolStr,
    variance: Variance,
    is_reified: bool,
    bounds: Vec<Type>,
}

impl TypeParameterSpec {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            variance: Variance::Invariant,
            is_reified: false,
            bounds: Vec::new(),
        }
    }

    pub fn variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    pub fn reified(mut self) -> Self {
        self.is_reified = true;
        self
    }

    pub fn bound(mut self, bound: Type) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// A symbol to declare in a file or class scope.
///
/// Declared symbols are anchored in source by default, which gives them a
/// location and a qualified name. [`SymbolSpec::synthetic`] drops the anchor.
#[derive(Clone, Debug)]
pub struct SymbolSpec {
    kind: NativeSymbolKind,
    scope: Option<NativeScopeKind>,
    name: Option<SmolStr>,
    modality: Option<NativeModality>,
    receiver: Option<Type>,
    returns: Option<Type>,
    return_annotations: Vec<AnnotationData>,
    parameters: Vec<ParameterSpec>,
    type_parameters: Vec<TypeParameterSpec>,
    annotations: Vec<AnnotationData>,
    origin: NativeOrigin,
    anchored: bool,
    range: TextRange,
    doc: Option<String>,
    modifiers: Vec<Modifier>,
}

impl SymbolSpec {
    /// A symbol of any native kind, including ones the graph does not map.
    pub fn of_kind(kind: NativeSymbolKind, name: Option<&str>) -> Self {
        Self {
            kind,
            scope: None,
            name: name.map(SmolStr::new),
            modality: None,
            receiver: None,
            returns: None,
            return_annotations: Vec::new(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            annotations: Vec::new(),
            origin: NativeOrigin::Source,
            anchored: true,
            range: TextRange::empty(TextSize::from(0)),
            doc: None,
            modifiers: Vec::new(),
        }
    }

    pub fn function(name: &str) -> Self {
        Self::of_kind(NativeSymbolKind::Function, Some(name)).modality(NativeModality::Final)
    }

    pub fn class(name: &str) -> Self {
        Self::of_kind(NativeSymbolKind::NamedClassOrObject, Some(name))
            .modality(NativeModality::Final)
    }

    pub fn property(name: &str, ty: Type) -> Self {
        Self::of_kind(NativeSymbolKind::Property, Some(name))
            .modality(NativeModality::Final)
            .returns(ty)
    }

    /// A constructor; it carries no name of its own.
    pub fn constructor() -> Self {
        Self::of_kind(NativeSymbolKind::Constructor, None)
    }

    /// A synthesized SAM constructor for the functional interface `name`.
    pub fn sam_constructor(name: &str) -> Self {
        Self::of_kind(NativeSymbolKind::SamConstructor, Some(name))
            .scope(NativeScopeKind::SamConstructor)
            .origin(NativeOrigin::SamConstructor)
            .synthetic()
    }

    /// Override the scope otherwise derived from the container.
    pub fn scope(mut self, scope: NativeScopeKind) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn modality(mut self, modality: NativeModality) -> Self {
        self.modality = Some(modality);
        self
    }

    pub fn make_abstract(self) -> Self {
        self.modality(NativeModality::Abstract)
    }

    /// Declare the symbol as an extension on `receiver`.
    pub fn extension(mut self, receiver: Type) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn param(self, name: &str, ty: Type) -> Self {
        self.parameter(ParameterSpec::new(name, ty))
    }

    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, ty: Type) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Annotation at the usage site of the return (or property) type.
    pub fn return_annotation(mut self, annotation: AnnotationData) -> Self {
        self.return_annotations.push(annotation);
        self
    }

    pub fn type_param(mut self, parameter: TypeParameterSpec) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn annotation(mut self, annotation: AnnotationData) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn origin(mut self, origin: NativeOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Source range of the declaring syntax.
    pub fn at(mut self, range: TextRange) -> Self {
        self.range = range;
        self.anchored = true;
        self
    }

    /// No backing syntax: no location and no qualified name.
    pub fn synthetic(mut self) -> Self {
        self.anchored = false;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

// ============================================================================
// TABLES
// ============================================================================

struct ModuleEntry {
    disposed: bool,
}

struct FileEntry {
    module: ModuleId,
    source: SourceFile,
    line_index: LineIndex,
    symbol: RawSymbolId,
}

struct SymbolEntry {
    module: ModuleId,
    file: FileId,
    kind: NativeSymbolKind,
    scope: NativeScopeKind,
    name: Option<SmolStr>,
    fq_name: Option<SmolStr>,
    modality: Option<NativeModality>,
    receiver: Option<RawTypeId>,
    ty: Option<RawTypeId>,
    members: Vec<RawSymbolId>,
    value_parameters: Vec<RawSymbolId>,
    type_parameters: Vec<RawSymbolId>,
    parameter: Option<ParameterData>,
    annotations: Vec<AnnotationData>,
    origin: NativeOrigin,
    anchor: Option<SyntaxAnchor>,
    doc: Option<String>,
    modifiers: Vec<Modifier>,
}

enum ParameterData {
    Value { has_default: bool, is_vararg: bool },
    Type { variance: Variance, is_reified: bool, bounds: Vec<RawTypeId> },
}

struct TypeEntry {
    module: ModuleId,
    ty: Type,
    annotations: Vec<AnnotationData>,
}

#[derive(Default)]
struct State {
    modules: Vec<ModuleEntry>,
    files: IndexMap<FileId, FileEntry>,
    symbols: Vec<SymbolEntry>,
    types: Vec<TypeEntry>,
    sessions: FxHashMap<SessionId, ModuleId>,
}

impl State {
    fn module_live(&self, module: ModuleId) -> AdapterResult<()> {
        match self.modules.get(module.0 as usize) {
            Some(entry) if entry.disposed => Err(AdapterError::stale(format!(
                "module {} was disposed",
                module.0
            ))),
            Some(_) => Ok(()),
            None => Err(AdapterError::engine(format!("unknown module {}", module.0))),
        }
    }

    fn session_module(&self, session: SessionId) -> AdapterResult<ModuleId> {
        let module = *self
            .sessions
            .get(&session)
            .ok_or_else(|| AdapterError::stale(format!("session {} is closed", session.0)))?;
        self.module_live(module)?;
        Ok(module)
    }

    fn symbol(&self, handle: NativeSymbol) -> AdapterResult<&SymbolEntry> {
        self.session_module(handle.session)?;
        self.symbols
            .get(handle.raw as usize)
            .ok_or_else(|| AdapterError::engine(format!("unknown symbol {}", handle.raw)))
    }

    fn ty(&self, handle: NativeType) -> AdapterResult<&TypeEntry> {
        self.session_module(handle.session)?;
        self.types
            .get(handle.raw as usize)
            .ok_or_else(|| AdapterError::engine(format!("unknown type {}", handle.raw)))
    }

    fn intern_type(
        &mut self,
        module: ModuleId,
        ty: Type,
        annotations: Vec<AnnotationData>,
    ) -> RawTypeId {
        let id = RawTypeId(self.types.len() as u32);
        self.types.push(TypeEntry {
            module,
            ty,
            annotations,
        });
        id
    }

    fn push_symbol(&mut self, entry: SymbolEntry) -> RawSymbolId {
        let id = RawSymbolId(self.symbols.len() as u32);
        self.symbols.push(entry);
        id
    }
}

fn handles(session: SessionId, ids: &[RawSymbolId]) -> Vec<NativeSymbol> {
    ids.iter()
        .map(|id| NativeSymbol {
            session,
            raw: id.0,
        })
        .collect()
}

fn unit_type() -> Type {
    Type::named("kotlin.Unit")
}

// ============================================================================
// ENGINE
// ============================================================================

/// Engine backed by in-memory tables, with per-query instrumentation.
pub struct MemoryEngine {
    state: RwLock<State>,
    next_session: AtomicU64,
    sessions_opened: AtomicUsize,
    calls: Mutex<FxHashMap<&'static str, usize>>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            next_session: AtomicU64::new(1),
            sessions_opened: AtomicUsize::new(0),
            calls: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn add_module(&self) -> ModuleId {
        let mut state = self.state.write();
        let id = ModuleId(state.modules.len() as u32);
        state.modules.push(ModuleEntry { disposed: false });
        id
    }

    /// Register a source file and return its file symbol.
    ///
    /// `text` backs the line/column mapping of every anchor in the file.
    ///
    /// # Panics
    ///
    /// Panics if `module` was not created by this engine.
    pub fn add_file(&self, module: ModuleId, source: SourceFile, text: &str) -> RawSymbolId {
        let mut state = self.state.write();
        assert!(
            (module.0 as usize) < state.modules.len(),
            "unknown module {}",
            module.0
        );
        let file = source.id;
        let package = source.package_name.clone();
        let symbol = state.push_symbol(SymbolEntry {
            module,
            file,
            kind: NativeSymbolKind::File,
            scope: NativeScopeKind::TopLevel,
            name: Some(source.file_name.clone()),
            fq_name: (!package.is_empty()).then_some(package),
            modality: None,
            receiver: None,
            ty: None,
            members: Vec::new(),
            value_parameters: Vec::new(),
            type_parameters: Vec::new(),
            parameter: None,
            annotations: Vec::new(),
            origin: NativeOrigin::Source,
            anchor: None,
            doc: None,
            modifiers: Vec::new(),
        });
        state.files.insert(
            file,
            FileEntry {
                module,
                source,
                line_index: LineIndex::new(text),
                symbol,
            },
        );
        symbol
    }

    /// Attach a file-level annotation.
    ///
    /// # Panics
    ///
    /// Panics if `file` is not registered.
    pub fn add_file_annotation(&self, file: FileId, annotation: AnnotationData) {
        let mut state = self.state.write();
        let symbol = state.files[&file].symbol;
        state.symbols[symbol.0 as usize].annotations.push(annotation);
    }

    /// Declare `decl` as a member of `container` (a file or class symbol).
    ///
    /// # Panics
    ///
    /// Panics if `container` was not created by this engine.
    pub fn add_member(&self, container: RawSymbolId, decl: SymbolSpec) -> RawSymbolId {
        let mut state = self.state.write();
        let parent = &state.symbols[container.0 as usize];
        let module = parent.module;
        let file = parent.file;
        let scope = decl.scope.unwrap_or(match parent.kind {
            NativeSymbolKind::File => NativeScopeKind::TopLevel,
            NativeSymbolKind::NamedClassOrObject | NativeSymbolKind::AnonymousObject => {
                NativeScopeKind::ClassMember
            }
            _ => NativeScopeKind::Local,
        });
        let fq_name = decl.name.as_ref().map(|name| match &parent.fq_name {
            Some(prefix) => SmolStr::new(format!("{prefix}.{name}")),
            None => name.clone(),
        });
        let default_type = match decl.kind {
            NativeSymbolKind::NamedClassOrObject => fq_name.clone().map(Type::named),
            NativeSymbolKind::Constructor => {
                parent.ty.map(|ty| state.types[ty.0 as usize].ty.clone())
            }
            _ => None,
        };

        let anchor = decl.anchored.then(|| SyntaxAnchor {
            file,
            range: decl.range,
            fq_name: fq_name.clone(),
        });
        let receiver = decl
            .receiver
            .map(|receiver| state.intern_type(module, receiver, Vec::new()));
        let return_type = decl.returns.or(default_type).unwrap_or_else(unit_type);
        let ty = state.intern_type(module, return_type, decl.return_annotations);

        let param_anchor = anchor.as_ref().map(|anchor| SyntaxAnchor {
            fq_name: None,
            ..anchor.clone()
        });
        let value_parameters = decl
            .parameters
            .into_iter()
            .map(|param| {
                let ty = state.intern_type(module, param.ty, Vec::new());
                state.push_symbol(SymbolEntry {
                    module,
                    file,
                    kind: NativeSymbolKind::ValueParameter,
                    scope: NativeScopeKind::Local,
                    name: Some(param.name),
                    fq_name: None,
                    modality: None,
                    receiver: None,
                    ty: Some(ty),
                    members: Vec::new(),
                    value_parameters: Vec::new(),
                    type_parameters: Vec::new(),
                    parameter: Some(ParameterData::Value {
                        has_default: param.has_default,
                        is_vararg: param.is_vararg,
                    }),
                    annotations: param.annotations,
                    origin: decl.origin,
                    anchor: param_anchor.clone(),
                    doc: None,
                    modifiers: Vec::new(),
                })
            })
            .collect();
        let type_parameters = decl
            .type_parameters
            .into_iter()
            .map(|param| {
                let bounds = param
                    .bounds
                    .into_iter()
                    .map(|bound| state.intern_type(module, bound, Vec::new()))
                    .collect();
                state.push_symbol(SymbolEntry {
                    module,
                    file,
                    kind: NativeSymbolKind::TypeParameter,
                    scope: NativeScopeKind::Local,
                    name: Some(param.name),
                    fq_name: None,
                    modality: None,
                    receiver: None,
                    ty: None,
                    members: Vec::new(),
                    value_parameters: Vec::new(),
                    type_parameters: Vec::new(),
                    parameter: Some(ParameterData::Type {
                        variance: param.variance,
                        is_reified: param.is_reified,
                        bounds,
                    }),
                    annotations: Vec::new(),
                    origin: decl.origin,
                    anchor: param_anchor.clone(),
                    doc: None,
                    modifiers: Vec::new(),
                })
            })
            .collect();

        let id = state.push_symbol(SymbolEntry {
            module,
            file,
            kind: decl.kind,
            scope,
            name: decl.name,
            fq_name: anchor.as_ref().and(fq_name),
            modality: decl.modality,
            receiver,
            ty: Some(ty),
            members: Vec::new(),
            value_parameters,
            type_parameters,
            parameter: None,
            annotations: decl.annotations,
            origin: decl.origin,
            anchor,
            doc: decl.doc,
            modifiers: decl.modifiers,
        });
        state.symbols[container.0 as usize].members.push(id);
        trace!(?container, ?id, kind = ?decl.kind, "declared symbol");
        id
    }

    /// Make every later session or query on `module` fail as stale.
    pub fn dispose_module(&self, module: ModuleId) {
        let mut state = self.state.write();
        if let Some(entry) = state.modules.get_mut(module.0 as usize) {
            entry.disposed = true;
            debug!(?module, "disposed module");
        }
    }

    /// Pointer to a declared symbol, as the graph would obtain it.
    pub fn pointer(&self, symbol: RawSymbolId) -> SymbolPointer {
        SymbolPointer(u64::from(symbol.0))
    }

    /// Number of times the named [`Engine`] method was called.
    pub fn call_count(&self, query: &str) -> usize {
        self.calls.lock().get(query).copied().unwrap_or(0)
    }

    /// Sessions currently open.
    pub fn open_sessions(&self) -> usize {
        self.state.read().sessions.len()
    }

    /// Sessions opened over the engine's lifetime.
    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    fn record(&self, query: &'static str) {
        *self.calls.lock().entry(query).or_default() += 1;
    }

    fn with_symbol<R>(
        &self,
        query: &'static str,
        symbol: NativeSymbol,
        f: impl FnOnce(&SymbolEntry) -> AdapterResult<R>,
    ) -> AdapterResult<R> {
        self.record(query);
        let state = self.state.read();
        f(state.symbol(symbol)?)
    }

    fn with_type<R>(
        &self,
        query: &'static str,
        ty: NativeType,
        f: impl FnOnce(&TypeEntry) -> AdapterResult<R>,
    ) -> AdapterResult<R> {
        self.record(query);
        let state = self.state.read();
        f(state.ty(ty)?)
    }
}

impl Engine for MemoryEngine {
    fn module_of(&self, entity: &ContextEntity) -> AdapterResult<ModuleId> {
        self.record("module_of");
        let state = self.state.read();
        match entity {
            ContextEntity::File(file) => state
                .files
                .get(file)
                .map(|entry| entry.module)
                .ok_or_else(|| AdapterError::engine(format!("unknown file {file}"))),
            ContextEntity::Symbol(pointer) => state
                .symbols
                .get(pointer.0 as usize)
                .map(|entry| entry.module)
                .ok_or_else(|| {
                    AdapterError::engine(format!("unknown symbol pointer {}", pointer.0))
                }),
        }
    }

    fn open_session(&self, module: ModuleId) -> AdapterResult<SessionId> {
        self.record("open_session");
        let mut state = self.state.write();
        state.module_live(module)?;
        let id = SessionId(self.next_session.fetch_add(1, Ordering::SeqCst));
        state.sessions.insert(id, module);
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    fn close_session(&self, session: SessionId) {
        self.record("close_session");
        self.state.write().sessions.remove(&session);
    }

    fn source_file(&self, file: FileId) -> AdapterResult<SourceFile> {
        self.record("source_file");
        self.state
            .read()
            .files
            .get(&file)
            .map(|entry| entry.source.clone())
            .ok_or_else(|| AdapterError::engine(format!("unknown file {file}")))
    }

    fn location_of(&self, anchor: &SyntaxAnchor) -> Location {
        self.record("location_of");
        self.state
            .read()
            .files
            .get(&anchor.file)
            .map_or(Location::NonExistent, |entry| {
                Location::file(
                    entry.source.file_path.clone(),
                    entry.line_index.span(anchor.range),
                )
            })
    }

    fn resolve_file_symbol(&self, session: SessionId, file: FileId) -> AdapterResult<NativeSymbol> {
        self.record("resolve_file_symbol");
        let state = self.state.read();
        let module = state.session_module(session)?;
        let entry = state
            .files
            .get(&file)
            .ok_or_else(|| AdapterError::engine(format!("unknown file {file}")))?;
        if entry.module != module {
            return Err(AdapterError::engine(format!(
                "{file} is not part of module {}",
                module.0
            )));
        }
        Ok(NativeSymbol {
            session,
            raw: entry.symbol.0,
        })
    }

    fn scope_members(
        &self,
        session: SessionId,
        container: NativeSymbol,
    ) -> AdapterResult<Vec<NativeSymbol>> {
        self.record("scope_members");
        let state = self.state.read();
        state.session_module(session)?;
        Ok(handles(session, &state.symbol(container)?.members))
    }

    fn symbol_pointer(&self, symbol: NativeSymbol) -> AdapterResult<SymbolPointer> {
        self.with_symbol("symbol_pointer", symbol, |_| {
            Ok(SymbolPointer(u64::from(symbol.raw)))
        })
    }

    fn restore_symbol(
        &self,
        session: SessionId,
        pointer: SymbolPointer,
    ) -> AdapterResult<NativeSymbol> {
        self.record("restore_symbol");
        let state = self.state.read();
        let module = state.session_module(session)?;
        let entry = state
            .symbols
            .get(pointer.0 as usize)
            .ok_or_else(|| AdapterError::engine(format!("unknown symbol pointer {}", pointer.0)))?;
        if entry.module != module {
            return Err(AdapterError::engine(format!(
                "symbol pointer {} belongs to another module",
                pointer.0
            )));
        }
        Ok(NativeSymbol {
            session,
            raw: pointer.0 as u32,
        })
    }

    fn symbol_kind(&self, symbol: NativeSymbol) -> AdapterResult<NativeSymbolKind> {
        self.with_symbol("symbol_kind", symbol, |entry| Ok(entry.kind))
    }

    fn symbol_scope(&self, symbol: NativeSymbol) -> AdapterResult<NativeScopeKind> {
        self.with_symbol("symbol_scope", symbol, |entry| Ok(entry.scope))
    }

    fn modality(&self, symbol: NativeSymbol) -> AdapterResult<Option<NativeModality>> {
        self.with_symbol("modality", symbol, |entry| Ok(entry.modality))
    }

    fn is_extension(&self, symbol: NativeSymbol) -> AdapterResult<bool> {
        self.with_symbol("is_extension", symbol, |entry| Ok(entry.receiver.is_some()))
    }

    fn receiver_type(&self, symbol: NativeSymbol) -> AdapterResult<Option<NativeType>> {
        self.with_symbol("receiver_type", symbol, |entry| {
            Ok(entry.receiver.map(|ty| NativeType {
                session: symbol.session,
                raw: ty.0,
            }))
        })
    }

    fn return_type(&self, symbol: NativeSymbol) -> AdapterResult<NativeType> {
        self.with_symbol("return_type", symbol, |entry| {
            entry
                .ty
                .map(|ty| NativeType {
                    session: symbol.session,
                    raw: ty.0,
                })
                .ok_or_else(|| AdapterError::engine(format!("symbol {} has no type", symbol.raw)))
        })
    }

    fn value_parameters(&self, symbol: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>> {
        self.with_symbol("value_parameters", symbol, |entry| {
            Ok(handles(symbol.session, &entry.value_parameters))
        })
    }

    fn value_parameter_info(&self, parameter: NativeSymbol) -> AdapterResult<ValueParameterInfo> {
        self.with_symbol("value_parameter_info", parameter, |entry| {
            match (&entry.parameter, &entry.name, entry.ty) {
                (Some(ParameterData::Value { has_default, is_vararg }), Some(name), Some(ty)) => {
                    Ok(ValueParameterInfo {
                        name: name.clone(),
                        ty: NativeType {
                            session: parameter.session,
                            raw: ty.0,
                        },
                        has_default: *has_default,
                        is_vararg: *is_vararg,
                    })
                }
                _ => Err(AdapterError::engine(format!(
                    "symbol {} is not a value parameter",
                    parameter.raw
                ))),
            }
        })
    }

    fn type_parameters(&self, symbol: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>> {
        self.with_symbol("type_parameters", symbol, |entry| {
            Ok(handles(symbol.session, &entry.type_parameters))
        })
    }

    fn type_parameter_info(&self, parameter: NativeSymbol) -> AdapterResult<TypeParameterInfo> {
        self.with_symbol("type_parameter_info", parameter, |entry| {
            match (&entry.parameter, &entry.name) {
                (
                    Some(ParameterData::Type {
                        variance,
                        is_reified,
                        bounds,
                    }),
                    Some(name),
                ) => Ok(TypeParameterInfo {
                    name: name.clone(),
                    variance: *variance,
                    is_reified: *is_reified,
                    upper_bounds: bounds
                        .iter()
                        .map(|bound| NativeType {
                            session: parameter.session,
                            raw: bound.0,
                        })
                        .collect(),
                }),
                _ => Err(AdapterError::engine(format!(
                    "symbol {} is not a type parameter",
                    parameter.raw
                ))),
            }
        })
    }

    fn annotations(&self, symbol: NativeSymbol) -> AdapterResult<Vec<AnnotationData>> {
        self.with_symbol("annotations", symbol, |entry| Ok(entry.annotations.clone()))
    }

    fn origin(&self, symbol: NativeSymbol) -> AdapterResult<NativeOrigin> {
        self.with_symbol("origin", symbol, |entry| Ok(entry.origin))
    }

    fn name(&self, symbol: NativeSymbol) -> AdapterResult<Option<SmolStr>> {
        self.with_symbol("name", symbol, |entry| Ok(entry.name.clone()))
    }

    fn syntax_anchor(&self, symbol: NativeSymbol) -> AdapterResult<Option<SyntaxAnchor>> {
        self.with_symbol("syntax_anchor", symbol, |entry| Ok(entry.anchor.clone()))
    }

    fn doc_string(&self, symbol: NativeSymbol) -> AdapterResult<Option<String>> {
        self.with_symbol("doc_string", symbol, |entry| Ok(entry.doc.clone()))
    }

    fn modifiers(&self, symbol: NativeSymbol) -> AdapterResult<Vec<Modifier>> {
        self.with_symbol("modifiers", symbol, |entry| Ok(entry.modifiers.clone()))
    }

    fn type_pointer(&self, ty: NativeType) -> AdapterResult<TypePointer> {
        self.with_type("type_pointer", ty, |_| Ok(TypePointer(u64::from(ty.raw))))
    }

    fn restore_type(&self, session: SessionId, pointer: TypePointer) -> AdapterResult<NativeType> {
        self.record("restore_type");
        let state = self.state.read();
        let module = state.session_module(session)?;
        let entry = state
            .types
            .get(pointer.0 as usize)
            .ok_or_else(|| AdapterError::engine(format!("unknown type pointer {}", pointer.0)))?;
        if entry.module != module {
            return Err(AdapterError::engine(format!(
                "type pointer {} belongs to another module",
                pointer.0
            )));
        }
        Ok(NativeType {
            session,
            raw: pointer.0 as u32,
        })
    }

    fn render_type(&self, ty: NativeType) -> AdapterResult<Type> {
        self.with_type("render_type", ty, |entry| Ok(entry.ty.clone()))
    }

    fn type_annotations(&self, ty: NativeType) -> AdapterResult<Vec<AnnotationData>> {
        self.with_type("type_annotations", ty, |entry| Ok(entry.annotations.clone()))
    }
}
