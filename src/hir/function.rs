//! Function declarations.

use std::fmt;
use std::sync::Arc;

use crate::engine::{NativeModality, NativeSymbolKind};

use super::classify::{FunctionKind, function_kind};
use super::declaration::{Declaration, DeclarationCore, DeclarationNode};
use super::error::{AdapterError, AdapterResult};
use super::memo::Memo;
use super::parameter::{ParameterNode, TypeParameterNode};
use super::type_ref::TypeReferenceNode;
use super::types::Type;
use super::visitor::SymbolVisitor;

/// A function, constructor or SAM constructor.
#[derive(Clone)]
pub struct FunctionDeclaration {
    inner: Arc<FunctionInner>,
}

struct FunctionInner {
    core: DeclarationCore,
    function_kind: Memo<FunctionKind>,
    is_abstract: Memo<bool>,
    extension_receiver: Memo<Option<TypeReferenceNode>>,
    return_type: Memo<TypeReferenceNode>,
    parameters: Memo<Vec<ParameterNode>>,
    type_parameters: Memo<Vec<TypeParameterNode>>,
}

impl FunctionDeclaration {
    pub(crate) fn new(core: DeclarationCore) -> Self {
        Self {
            inner: Arc::new(FunctionInner {
                core,
                function_kind: Memo::new(),
                is_abstract: Memo::new(),
                extension_receiver: Memo::new(),
                return_type: Memo::new(),
                parameters: Memo::new(),
                type_parameters: Memo::new(),
            }),
        }
    }

    /// Top-level, member or lambda-like, from where the engine places the
    /// symbol. Local functions and accessors are unsupported.
    pub fn function_kind(&self) -> AdapterResult<FunctionKind> {
        self.inner
            .function_kind
            .get_or_try_init(|| {
                self.inner.core.query(|session, symbol| {
                    let scope = session.symbol_scope(symbol)?;
                    function_kind(scope).or_else(|scope| {
                        let options = self.inner.core.graph().options();
                        let name = session
                            .name(symbol)?
                            .unwrap_or_else(|| options.constructor_name.clone());
                        Err(AdapterError::unsupported(name, scope))
                    })
                })
            })
            .copied()
    }

    /// True only for plain functions whose modality is abstract.
    pub fn is_abstract(&self) -> AdapterResult<bool> {
        self.inner
            .is_abstract
            .get_or_try_init(|| {
                self.inner.core.query(|session, symbol| {
                    if session.symbol_kind(symbol)? != NativeSymbolKind::Function {
                        return Ok(false);
                    }
                    Ok(session.modality(symbol)? == Some(NativeModality::Abstract))
                })
            })
            .copied()
    }

    /// Receiver type of an extension function; `None` for other functions.
    pub fn extension_receiver(&self) -> AdapterResult<Option<&TypeReferenceNode>> {
        self.inner
            .extension_receiver
            .get_or_try_init(|| self.inner.core.compute_extension_receiver())
            .map(Option::as_ref)
    }

    pub fn return_type(&self) -> AdapterResult<&TypeReferenceNode> {
        self.inner
            .return_type
            .get_or_try_init(|| self.inner.core.compute_return_type())
    }

    /// Value parameters in declaration order.
    pub fn parameters(&self) -> AdapterResult<&[ParameterNode]> {
        self.inner
            .parameters
            .get_or_try_init(|| {
                let core = &self.inner.core;
                core.query(|session, symbol| {
                    session
                        .value_parameters(symbol)?
                        .into_iter()
                        .map(|param| {
                            ParameterNode::from_native(
                                core.graph(),
                                session,
                                param,
                                self.pointer(),
                                core.key(),
                            )
                        })
                        .collect()
                })
            })
            .map(Vec::as_slice)
    }

    /// Only plain functions carry type parameters; constructors report none.
    pub fn type_parameters(&self) -> AdapterResult<&[TypeParameterNode]> {
        self.inner
            .type_parameters
            .get_or_try_init(|| {
                let core = &self.inner.core;
                core.query(|session, symbol| match session.symbol_kind(symbol)? {
                    NativeSymbolKind::Function => core.type_parameters_in(session, symbol),
                    _ => Ok(Vec::new()),
                })
            })
            .map(Vec::as_slice)
    }

    /// The declaration this function overrides. Not provided.
    pub fn find_overridee(&self) -> AdapterResult<Option<DeclarationNode>> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::find_overridee"))
    }

    /// This function as seen through an instantiation of its containing
    /// type. Not provided.
    pub fn as_member_of(&self, _containing: &Type) -> AdapterResult<FunctionDeclaration> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::as_member_of"))
    }

    /// Not provided.
    pub fn is_actual(&self) -> AdapterResult<bool> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::is_actual"))
    }

    /// Not provided.
    pub fn is_expect(&self) -> AdapterResult<bool> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::is_expect"))
    }

    /// Not provided.
    pub fn find_actuals(&self) -> AdapterResult<Vec<DeclarationNode>> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::find_actuals"))
    }

    /// Not provided.
    pub fn find_expects(&self) -> AdapterResult<Vec<DeclarationNode>> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::find_expects"))
    }

    /// Local declarations inside the body. Not provided.
    pub fn declarations(&self) -> AdapterResult<&[DeclarationNode]> {
        Err(AdapterError::NotImplemented("FunctionDeclaration::declarations"))
    }

    pub(crate) fn memoized_type_references(&self) -> Vec<TypeReferenceNode> {
        let inner = &self.inner;
        let mut refs: Vec<_> = inner.return_type.get().cloned().into_iter().collect();
        refs.extend(inner.extension_receiver.get().cloned().flatten());
        refs
    }

    pub(crate) fn memoized_parameters(&self) -> &[ParameterNode] {
        self.inner.parameters.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn memoized_type_parameters(&self) -> &[TypeParameterNode] {
        self.inner.type_parameters.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        visitor.visit_function_declaration(self, data)
    }
}

impl Declaration for FunctionDeclaration {
    fn core(&self) -> &DeclarationCore {
        &self.inner.core
    }
}

impl PartialEq for FunctionDeclaration {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDeclaration")
            .field("core", &self.inner.core)
            .field("function_kind", &self.inner.function_kind)
            .finish()
    }
}
