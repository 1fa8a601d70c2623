//! The closed set of node variants.

use crate::base::Location;

use super::annotation::AnnotationNode;
use super::declaration::{Declaration, DeclarationNode};
use super::error::AdapterResult;
use super::file::FileNode;
use super::graph::NodeKey;
use super::parameter::{ParameterNode, TypeParameterNode};
use super::type_ref::TypeReferenceNode;
use super::types::Origin;
use super::visitor::SymbolVisitor;

/// Any node of the symbol graph.
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolNode {
    File(FileNode),
    Declaration(DeclarationNode),
    TypeReference(TypeReferenceNode),
    Annotation(AnnotationNode),
    Parameter(ParameterNode),
    TypeParameter(TypeParameterNode),
}

impl SymbolNode {
    pub fn origin(&self) -> AdapterResult<Origin> {
        match self {
            SymbolNode::File(file) => Ok(file.origin()),
            SymbolNode::Declaration(decl) => decl.origin(),
            SymbolNode::TypeReference(ty) => Ok(ty.origin()),
            SymbolNode::Annotation(annotation) => Ok(annotation.origin()),
            SymbolNode::Parameter(param) => Ok(param.origin()),
            SymbolNode::TypeParameter(param) => Ok(param.origin()),
        }
    }

    pub fn location(&self) -> AdapterResult<Location> {
        match self {
            SymbolNode::File(file) => Ok(file.location()),
            SymbolNode::Declaration(decl) => decl.location().cloned(),
            SymbolNode::TypeReference(ty) => ty.location(),
            SymbolNode::Annotation(annotation) => Ok(annotation.location().clone()),
            SymbolNode::Parameter(param) => Ok(param.location().clone()),
            SymbolNode::TypeParameter(param) => Ok(param.location().clone()),
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        match self {
            SymbolNode::File(file) => file.parent(),
            SymbolNode::Declaration(decl) => decl.parent(),
            SymbolNode::TypeReference(ty) => ty.parent(),
            SymbolNode::Annotation(annotation) => annotation.parent(),
            SymbolNode::Parameter(param) => param.parent(),
            SymbolNode::TypeParameter(param) => param.parent(),
        }
    }

    /// Annotations attached to the node; annotations and type parameters
    /// carry none.
    pub fn annotations(&self) -> AdapterResult<&[AnnotationNode]> {
        match self {
            SymbolNode::File(file) => file.annotations(),
            SymbolNode::Declaration(decl) => decl.annotations(),
            SymbolNode::TypeReference(ty) => ty.annotations(),
            SymbolNode::Parameter(param) => Ok(param.annotations()),
            SymbolNode::Annotation(_) | SymbolNode::TypeParameter(_) => Ok(&[]),
        }
    }

    /// Key other nodes use to refer to this one. Annotations are never
    /// parents and have none.
    pub fn key(&self) -> Option<NodeKey> {
        match self {
            SymbolNode::File(file) => Some(file.key()),
            SymbolNode::Declaration(decl) => Some(NodeKey::Symbol(decl.pointer())),
            SymbolNode::TypeReference(ty) => Some(ty.key()),
            SymbolNode::Parameter(param) => Some(param.key()),
            SymbolNode::TypeParameter(param) => Some(param.key()),
            SymbolNode::Annotation(_) => None,
        }
    }

    /// Children that have already been computed. Never queries the engine.
    pub fn memoized_children(&self) -> Vec<SymbolNode> {
        let mut children = Vec::new();
        match self {
            SymbolNode::File(file) => {
                children.extend(
                    file.memoized_declarations()
                        .iter()
                        .cloned()
                        .map(SymbolNode::Declaration),
                );
                children.extend(
                    file.memoized_annotations()
                        .iter()
                        .cloned()
                        .map(SymbolNode::Annotation),
                );
            }
            SymbolNode::Declaration(decl) => {
                match decl {
                    DeclarationNode::Function(function) => {
                        children.extend(
                            function
                                .memoized_type_references()
                                .into_iter()
                                .map(SymbolNode::TypeReference),
                        );
                        children.extend(
                            function
                                .memoized_parameters()
                                .iter()
                                .cloned()
                                .map(SymbolNode::Parameter),
                        );
                        children.extend(
                            function
                                .memoized_type_parameters()
                                .iter()
                                .cloned()
                                .map(SymbolNode::TypeParameter),
                        );
                    }
                    DeclarationNode::Class(class) => {
                        children.extend(
                            class
                                .memoized_declarations()
                                .iter()
                                .cloned()
                                .map(SymbolNode::Declaration),
                        );
                        children.extend(
                            class
                                .memoized_type_parameters()
                                .iter()
                                .cloned()
                                .map(SymbolNode::TypeParameter),
                        );
                    }
                    DeclarationNode::Property(property) => {
                        children.extend(
                            property
                                .memoized_type_references()
                                .into_iter()
                                .map(SymbolNode::TypeReference),
                        );
                    }
                }
                children.extend(
                    decl.core()
                        .memoized_annotations()
                        .iter()
                        .cloned()
                        .map(SymbolNode::Annotation),
                );
            }
            SymbolNode::TypeReference(ty) => {
                children.extend(
                    ty.memoized_annotations()
                        .iter()
                        .cloned()
                        .map(SymbolNode::Annotation),
                );
            }
            SymbolNode::Parameter(param) => {
                children.push(SymbolNode::TypeReference(param.ty().clone()));
                children.extend(param.annotations().iter().cloned().map(SymbolNode::Annotation));
            }
            SymbolNode::TypeParameter(param) => {
                children.extend(param.bounds().iter().cloned().map(SymbolNode::TypeReference));
            }
            SymbolNode::Annotation(_) => {}
        }
        children
    }

    /// Dispatch to the visitor method for this variant.
    pub fn accept<D, R, V>(&self, visitor: &mut V, data: D) -> R
    where
        V: SymbolVisitor<D, R> + ?Sized,
    {
        match self {
            SymbolNode::File(file) => file.accept(visitor, data),
            SymbolNode::Declaration(decl) => decl.accept(visitor, data),
            SymbolNode::TypeReference(ty) => ty.accept(visitor, data),
            SymbolNode::Annotation(annotation) => annotation.accept(visitor, data),
            SymbolNode::Parameter(param) => param.accept(visitor, data),
            SymbolNode::TypeParameter(param) => param.accept(visitor, data),
        }
    }
}

impl From<FileNode> for SymbolNode {
    fn from(file: FileNode) -> Self {
        SymbolNode::File(file)
    }
}

impl From<DeclarationNode> for SymbolNode {
    fn from(decl: DeclarationNode) -> Self {
        SymbolNode::Declaration(decl)
    }
}

impl From<TypeReferenceNode> for SymbolNode {
    fn from(ty: TypeReferenceNode) -> Self {
        SymbolNode::TypeReference(ty)
    }
}
