//! Capabilities that exist as operations but are not provided.
//!
//! They must report `NotImplemented`, never an empty or default value.

use symgraph::engine::SymbolSpec;
use symgraph::hir::{AdapterError, Declaration, Type};

use crate::helpers::graph_fixtures::{Fixture, int};
use crate::helpers::node_assertions::{assert_not_implemented, find_class, find_function};

fn fixture() -> Fixture {
    let fixture = Fixture::new();
    let class = fixture.declare(SymbolSpec::class("Impl"));
    fixture
        .memory
        .add_member(class, SymbolSpec::function("run").returns(int()));
    fixture
}

#[test]
fn test_function_relationships_not_implemented() {
    let fixture = fixture();
    let file = fixture.file();
    let class = find_class(file.declarations().unwrap(), "Impl");
    let run = find_function(class.declarations().unwrap(), "run");

    assert_not_implemented(run.find_overridee());
    assert_not_implemented(run.as_member_of(&Type::named("com.example.Impl")));
    assert_not_implemented(run.is_actual());
    assert_not_implemented(run.is_expect());
    assert_not_implemented(run.find_actuals());
    assert_not_implemented(run.find_expects());
    assert_not_implemented(run.declarations());
}

#[test]
fn test_parent_declaration_not_implemented() {
    let fixture = fixture();
    let file = fixture.file();
    let class = find_class(file.declarations().unwrap(), "Impl");
    let run = find_function(class.declarations().unwrap(), "run");

    assert_not_implemented(run.parent_declaration());
    assert_not_implemented(class.parent_declaration());
}

#[test]
fn test_type_reference_syntax_not_implemented() {
    let fixture = fixture();
    let file = fixture.file();
    let class = find_class(file.declarations().unwrap(), "Impl");
    let run = find_function(class.declarations().unwrap(), "run");
    let return_type = run.return_type().unwrap();

    assert_not_implemented(return_type.element());
    assert_not_implemented(return_type.location());
    assert_not_implemented(return_type.modifiers());
}

#[test]
fn test_not_implemented_is_distinguishable() {
    let err = AdapterError::NotImplemented("FunctionDeclaration::is_actual");
    assert!(err.is_not_implemented());
    assert!(!err.is_stale());
    assert_eq!(err.to_string(), "Not implemented: FunctionDeclaration::is_actual");
}
