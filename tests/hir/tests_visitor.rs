//! Visitor dispatch and a full traversal driven by the visitor.

use rstest::rstest;
use symgraph::engine::{AnnotationData, SymbolSpec, TypeParameterSpec};
use symgraph::hir::{
    AdapterResult, AnnotationNode, ClassDeclaration, Declaration, DeclarationNode, FileNode,
    FunctionDeclaration, ParameterNode, PropertyDeclaration, SymbolNode, SymbolVisitor, Type,
    TypeParameterNode, TypeReferenceNode,
};

use crate::helpers::graph_fixtures::{Fixture, int, list_of, string};

/// Records which method ran and describes the node it was given.
#[derive(Default)]
struct RecordingVisitor {
    calls: Vec<&'static str>,
}

impl SymbolVisitor<u32, String> for RecordingVisitor {
    fn visit_file(&mut self, file: &FileNode, data: u32) -> String {
        self.calls.push("file");
        format!("{data} file {}", file.file_name())
    }
    fn visit_function_declaration(&mut self, function: &FunctionDeclaration, data: u32) -> String {
        self.calls.push("function");
        format!("{data} fun {}", function.simple_name().unwrap())
    }
    fn visit_class_declaration(&mut self, class: &ClassDeclaration, data: u32) -> String {
        self.calls.push("class");
        format!("{data} class {}", class.simple_name().unwrap())
    }
    fn visit_property_declaration(&mut self, property: &PropertyDeclaration, data: u32) -> String {
        self.calls.push("property");
        format!("{data} val {}", property.simple_name().unwrap())
    }
    fn visit_type_reference(&mut self, ty: &TypeReferenceNode, data: u32) -> String {
        self.calls.push("type_reference");
        format!("{data} : {}", ty.resolve().unwrap())
    }
    fn visit_annotation(&mut self, annotation: &AnnotationNode, data: u32) -> String {
        self.calls.push("annotation");
        format!("{data} @{}", annotation.short_name())
    }
    fn visit_value_parameter(&mut self, param: &ParameterNode, data: u32) -> String {
        self.calls.push("value_parameter");
        format!("{data} param {}", param.name())
    }
    fn visit_type_parameter(&mut self, param: &TypeParameterNode, data: u32) -> String {
        self.calls.push("type_parameter");
        format!("{data} <{}>", param.name())
    }
}

/// Calls the visit method matching `node` directly, bypassing `accept`.
fn visit_directly(visitor: &mut RecordingVisitor, node: &SymbolNode, data: u32) -> String {
    match node {
        SymbolNode::File(file) => visitor.visit_file(file, data),
        SymbolNode::Declaration(DeclarationNode::Function(function)) => {
            visitor.visit_function_declaration(function, data)
        }
        SymbolNode::Declaration(DeclarationNode::Class(class)) => {
            visitor.visit_class_declaration(class, data)
        }
        SymbolNode::Declaration(DeclarationNode::Property(property)) => {
            visitor.visit_property_declaration(property, data)
        }
        SymbolNode::TypeReference(ty) => visitor.visit_type_reference(ty, data),
        SymbolNode::Annotation(annotation) => visitor.visit_annotation(annotation, data),
        SymbolNode::Parameter(param) => visitor.visit_value_parameter(param, data),
        SymbolNode::TypeParameter(param) => visitor.visit_type_parameter(param, data),
    }
}

/// Renders an indented outline, computing children as it goes.
#[derive(Default)]
struct OutlineVisitor {
    lines: Vec<String>,
}

impl OutlineVisitor {
    fn line(&mut self, depth: usize, text: String) {
        self.lines.push(format!("{}{}", "  ".repeat(depth), text));
    }

    fn annotations(&mut self, annotations: &[AnnotationNode], depth: usize) -> AdapterResult<()> {
        for annotation in annotations {
            annotation.accept(self, depth)?;
        }
        Ok(())
    }
}

impl SymbolVisitor<usize, AdapterResult<()>> for OutlineVisitor {
    fn visit_file(&mut self, file: &FileNode, depth: usize) -> AdapterResult<()> {
        self.line(depth, format!("file {}", file.file_name()));
        self.annotations(file.annotations()?, depth + 1)?;
        for decl in file.declarations()? {
            decl.accept(self, depth + 1)?;
        }
        Ok(())
    }

    fn visit_function_declaration(
        &mut self,
        function: &FunctionDeclaration,
        depth: usize,
    ) -> AdapterResult<()> {
        self.line(depth, format!("fun {}", function.simple_name()?));
        for param in function.type_parameters()? {
            param.accept(self, depth + 1)?;
        }
        for param in function.parameters()? {
            param.accept(self, depth + 1)?;
        }
        function.return_type()?.accept(self, depth + 1)
    }

    fn visit_class_declaration(
        &mut self,
        class: &ClassDeclaration,
        depth: usize,
    ) -> AdapterResult<()> {
        self.line(depth, format!("class {}", class.simple_name()?));
        self.annotations(class.annotations()?, depth + 1)?;
        for param in class.type_parameters()? {
            param.accept(self, depth + 1)?;
        }
        for decl in class.declarations()? {
            decl.accept(self, depth + 1)?;
        }
        Ok(())
    }

    fn visit_property_declaration(
        &mut self,
        property: &PropertyDeclaration,
        depth: usize,
    ) -> AdapterResult<()> {
        self.line(depth, format!("val {}", property.simple_name()?));
        property.property_type()?.accept(self, depth + 1)
    }

    fn visit_type_reference(&mut self, ty: &TypeReferenceNode, depth: usize) -> AdapterResult<()> {
        self.line(depth, format!(": {}", ty.resolve()?));
        self.annotations(ty.annotations()?, depth + 1)
    }

    fn visit_annotation(&mut self, annotation: &AnnotationNode, depth: usize) -> AdapterResult<()> {
        self.line(depth, format!("@{}", annotation.short_name()));
        Ok(())
    }

    fn visit_value_parameter(&mut self, param: &ParameterNode, depth: usize) -> AdapterResult<()> {
        self.line(depth, format!("param {}", param.name()));
        param.ty().accept(self, depth + 1)
    }

    fn visit_type_parameter(
        &mut self,
        param: &TypeParameterNode,
        depth: usize,
    ) -> AdapterResult<()> {
        self.line(depth, format!("<{}>", param.name()));
        for bound in param.bounds() {
            bound.accept(self, depth + 1)?;
        }
        Ok(())
    }
}

fn sample() -> Fixture {
    let fixture = Fixture::new();
    let cache = fixture.declare(
        SymbolSpec::class("Cache")
            .annotation(AnnotationData::new("kotlin.jvm.JvmInline"))
            .type_param(TypeParameterSpec::new("K").bound(Type::named("kotlin.Any"))),
    );
    fixture
        .memory
        .add_member(cache, SymbolSpec::property("size", int()));
    fixture.memory.add_member(
        cache,
        SymbolSpec::function("keys").returns(list_of(Type::named("K"))),
    );
    fixture.declare(SymbolSpec::function("greet").param("name", string()));
    fixture
}

#[rstest]
#[case::file(0)]
#[case::class(1)]
#[case::type_reference(2)]
#[case::value_parameter(3)]
#[case::type_parameter(4)]
#[case::annotation(5)]
#[case::property(6)]
#[case::function(7)]
fn test_accept_matches_direct_visit(#[case] index: usize) {
    let fixture = sample();
    let file = fixture.file();
    let decls = file.declarations().unwrap();
    let cache = decls[0].as_class().unwrap();
    let greet = decls[1].as_function().unwrap();

    let nodes = [
        SymbolNode::from(file.clone()),
        SymbolNode::Declaration(decls[0].clone()),
        SymbolNode::from(greet.return_type().unwrap().clone()),
        SymbolNode::Parameter(greet.parameters().unwrap()[0].clone()),
        SymbolNode::TypeParameter(cache.type_parameters().unwrap()[0].clone()),
        SymbolNode::Annotation(cache.annotations().unwrap()[0].clone()),
        SymbolNode::Declaration(cache.declarations().unwrap()[0].clone()),
        SymbolNode::Declaration(decls[1].clone()),
    ];
    let node = &nodes[index];

    let mut via_accept = RecordingVisitor::default();
    let mut direct = RecordingVisitor::default();
    let accepted = node.accept(&mut via_accept, 42);
    let visited = visit_directly(&mut direct, node, 42);

    assert_eq!(accepted, visited);
    assert_eq!(via_accept.calls, direct.calls);
    assert_eq!(via_accept.calls.len(), 1);
}

#[test]
fn test_accept_describes_each_variant() {
    let fixture = sample();
    let file = fixture.file();
    let decls = file.declarations().unwrap();
    let cache = decls[0].as_class().unwrap();
    let greet = decls[1].as_function().unwrap();

    let mut visitor = RecordingVisitor::default();
    let described = [
        file.accept(&mut visitor, 0),
        decls[0].accept(&mut visitor, 1),
        greet.return_type().unwrap().accept(&mut visitor, 2),
        greet.parameters().unwrap()[0].accept(&mut visitor, 3),
        cache.type_parameters().unwrap()[0].accept(&mut visitor, 4),
        cache.annotations().unwrap()[0].accept(&mut visitor, 5),
        cache.declarations().unwrap()[0].accept(&mut visitor, 6),
        decls[1].accept(&mut visitor, 7),
    ];

    assert_eq!(
        described,
        [
            "0 file Main.kt",
            "1 class Cache",
            "2 : Unit",
            "3 param name",
            "4 <K>",
            "5 @JvmInline",
            "6 val size",
            "7 fun greet",
        ]
    );
    assert_eq!(
        visitor.calls,
        [
            "file",
            "class",
            "type_reference",
            "value_parameter",
            "type_parameter",
            "annotation",
            "property",
            "function",
        ]
    );
}

#[test]
fn test_outline_traversal() {
    let fixture = sample();
    let file = fixture.file();

    let mut outline = OutlineVisitor::default();
    file.accept(&mut outline, 0).unwrap();

    assert_eq!(
        outline.lines,
        [
            "file Main.kt",
            "  class Cache",
            "    @JvmInline",
            "    <K>",
            "      : Any",
            "    val size",
            "      : Int",
            "    fun keys",
            "      : List<K>",
            "  fun greet",
            "    param name",
            "      : String",
            "    : Unit",
        ]
    );
}

#[test]
fn test_traversal_stops_at_first_failure() {
    let fixture = sample();
    let file = fixture.file();
    fixture.memory.dispose_module(fixture.module);

    let mut outline = OutlineVisitor::default();
    let err = file.accept(&mut outline, 0).unwrap_err();

    assert!(err.is_stale());
    assert!(outline.lines.is_empty() || outline.lines == ["file Main.kt"]);
}
