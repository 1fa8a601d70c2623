//! Visitor pattern over symbol graph nodes.

use super::annotation::AnnotationNode;
use super::declaration::{ClassDeclaration, PropertyDeclaration};
use super::file::FileNode;
use super::function::FunctionDeclaration;
use super::parameter::{ParameterNode, TypeParameterNode};
use super::type_ref::TypeReferenceNode;

/// Visitor over every node variant.
///
/// `D` is auxiliary input threaded through a traversal and `R` the result.
/// Each node's `accept` calls exactly one of these methods and returns its
/// result unchanged; traversal order is up to the visitor.
pub trait SymbolVisitor<D, R> {
    fn visit_file(&mut self, file: &FileNode, data: D) -> R;
    fn visit_function_declaration(&mut self, function: &FunctionDeclaration, data: D) -> R;
    fn visit_class_declaration(&mut self, class: &ClassDeclaration, data: D) -> R;
    fn visit_property_declaration(&mut self, property: &PropertyDeclaration, data: D) -> R;
    fn visit_type_reference(&mut self, type_ref: &TypeReferenceNode, data: D) -> R;
    fn visit_annotation(&mut self, annotation: &AnnotationNode, data: D) -> R;
    fn visit_value_parameter(&mut self, parameter: &ParameterNode, data: D) -> R;
    fn visit_type_parameter(&mut self, parameter: &TypeParameterNode, data: D) -> R;
}
