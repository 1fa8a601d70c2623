//! Scoped engine access.
//!
//! [`with_context`] opens a session for the module owning a context entity,
//! runs a query inside it and closes the session on every exit path. The
//! query must turn everything it needs into owned values before returning:
//! native handles carry their session and are rejected once it closes.

use std::cell::RefCell;
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::engine::{
    AnnotationData, ContextEntity, Engine, EngineRef, ModuleId, NativeModality, NativeOrigin,
    NativeScopeKind, NativeSymbol, NativeSymbolKind, NativeType, SessionId, SymbolPointer,
    SyntaxAnchor, TypeParameterInfo, TypePointer, ValueParameterInfo,
};

use super::error::AdapterResult;
use super::types::{Modifier, Type};

thread_local! {
    /// Sessions opened by `with_context` on this thread, innermost last.
    static ACTIVE: RefCell<Vec<ActiveSession>> = const { RefCell::new(Vec::new()) };
}

#[derive(Copy, Clone)]
struct ActiveSession {
    engine: usize,
    module: ModuleId,
    id: SessionId,
}

fn engine_key(engine: &EngineRef) -> usize {
    Arc::as_ptr(engine) as *const () as usize
}

/// Run `query` inside a session bound to the module owning `context`.
///
/// With `reuse` set, a session already open on this thread for the same
/// engine and module is borrowed instead of opening a nested one; the
/// borrowed session is left open for its owner to close.
pub fn with_context<R>(
    engine: &EngineRef,
    context: &ContextEntity,
    reuse: bool,
    query: impl FnOnce(&Session<'_>) -> AdapterResult<R>,
) -> AdapterResult<R> {
    let module = engine.module_of(context)?;
    let key = engine_key(engine);

    let reused = if reuse {
        ACTIVE.with(|active| {
            active
                .borrow()
                .iter()
                .rev()
                .find(|s| s.engine == key && s.module == module)
                .map(|s| s.id)
        })
    } else {
        None
    };

    let session = match reused {
        Some(id) => {
            trace!(?context, ?id, "reusing analysis session");
            Session {
                engine: engine.as_ref(),
                id,
                owned: false,
            }
        }
        None => {
            let id = engine.open_session(module)?;
            debug!(?context, ?module, ?id, "opened analysis session");
            ACTIVE.with(|active| {
                active.borrow_mut().push(ActiveSession {
                    engine: key,
                    module,
                    id,
                })
            });
            Session {
                engine: engine.as_ref(),
                id,
                owned: true,
            }
        }
    };

    query(&session)
}

/// A live analysis session.
///
/// Closing happens in `Drop`, so early returns and panics inside a query
/// release the session too.
pub struct Session<'e> {
    engine: &'e dyn Engine,
    id: SessionId,
    owned: bool,
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        let _ = ACTIVE.try_with(|active| {
            let mut active = active.borrow_mut();
            if let Some(pos) = active.iter().rposition(|s| s.id == self.id) {
                active.remove(pos);
            }
        });
        self.engine.close_session(self.id);
        debug!(id = ?self.id, "closed analysis session");
    }
}

impl<'e> Session<'e> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn engine(&self) -> &'e dyn Engine {
        self.engine
    }

    pub fn resolve_file_symbol(&self, file: crate::base::FileId) -> AdapterResult<NativeSymbol> {
        self.engine.resolve_file_symbol(self.id, file)
    }

    pub fn scope_members(&self, container: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>> {
        self.engine.scope_members(self.id, container)
    }

    pub fn restore_symbol(&self, pointer: SymbolPointer) -> AdapterResult<NativeSymbol> {
        self.engine.restore_symbol(self.id, pointer)
    }

    pub fn restore_type(&self, pointer: TypePointer) -> AdapterResult<NativeType> {
        self.engine.restore_type(self.id, pointer)
    }

    pub fn symbol_pointer(&self, symbol: NativeSymbol) -> AdapterResult<SymbolPointer> {
        self.engine.symbol_pointer(symbol)
    }

    pub fn type_pointer(&self, ty: NativeType) -> AdapterResult<TypePointer> {
        self.engine.type_pointer(ty)
    }

    pub fn symbol_kind(&self, symbol: NativeSymbol) -> AdapterResult<NativeSymbolKind> {
        self.engine.symbol_kind(symbol)
    }

    pub fn symbol_scope(&self, symbol: NativeSymbol) -> AdapterResult<NativeScopeKind> {
        self.engine.symbol_scope(symbol)
    }

    pub fn modality(&self, symbol: NativeSymbol) -> AdapterResult<Option<NativeModality>> {
        self.engine.modality(symbol)
    }

    pub fn is_extension(&self, symbol: NativeSymbol) -> AdapterResult<bool> {
        self.engine.is_extension(symbol)
    }

    pub fn receiver_type(&self, symbol: NativeSymbol) -> AdapterResult<Option<NativeType>> {
        self.engine.receiver_type(symbol)
    }

    pub fn return_type(&self, symbol: NativeSymbol) -> AdapterResult<NativeType> {
        self.engine.return_type(symbol)
    }

    pub fn value_parameters(&self, symbol: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>> {
        self.engine.value_parameters(symbol)
    }

    pub fn value_parameter_info(
        &self,
        parameter: NativeSymbol,
    ) -> AdapterResult<ValueParameterInfo> {
        self.engine.value_parameter_info(parameter)
    }

    pub fn type_parameters(&self, symbol: NativeSymbol) -> AdapterResult<Vec<NativeSymbol>> {
        self.engine.type_parameters(symbol)
    }

    pub fn type_parameter_info(&self, parameter: NativeSymbol) -> AdapterResult<TypeParameterInfo> {
        self.engine.type_parameter_info(parameter)
    }

    pub fn annotations(&self, symbol: NativeSymbol) -> AdapterResult<Vec<AnnotationData>> {
        self.engine.annotations(symbol)
    }

    pub fn origin(&self, symbol: NativeSymbol) -> AdapterResult<NativeOrigin> {
        self.engine.origin(symbol)
    }

    pub fn name(&self, symbol: NativeSymbol) -> AdapterResult<Option<SmolStr>> {
        self.engine.name(symbol)
    }

    pub fn syntax_anchor(&self, symbol: NativeSymbol) -> AdapterResult<Option<SyntaxAnchor>> {
        self.engine.syntax_anchor(symbol)
    }

    pub fn doc_string(&self, symbol: NativeSymbol) -> AdapterResult<Option<String>> {
        self.engine.doc_string(symbol)
    }

    pub fn modifiers(&self, symbol: NativeSymbol) -> AdapterResult<Vec<Modifier>> {
        self.engine.modifiers(symbol)
    }

    pub fn render_type(&self, ty: NativeType) -> AdapterResult<Type> {
        self.engine.render_type(ty)
    }

    pub fn type_annotations(&self, ty: NativeType) -> AdapterResult<Vec<AnnotationData>> {
        self.engine.type_annotations(ty)
    }
}
